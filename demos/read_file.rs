//! Example: Reading NBT files from disk
//!
//! NBT files can be either uncompressed or gzip/zlib compressed. The gzip
//! helpers sniff the header and inflate before decoding.
//!
//! Run with: cargo run --example read_file -- <path_to_nbt_file> [--little]

use std::env;

use nbtree::{Endianness, NodeRef, ReadConfig, Reader, gzip};

/// Pretty-print any NBT value recursively
fn dump(value: NodeRef<'_>, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    match &*value {
        nbtree::Node::End => format!("{pad}End"),
        nbtree::Node::Byte(v) => format!("{pad}Byte({v})"),
        nbtree::Node::Short(v) => format!("{pad}Short({v})"),
        nbtree::Node::Int(v) => format!("{pad}Int({v})"),
        nbtree::Node::Long(v) => format!("{pad}Long({v})"),
        nbtree::Node::Float(v) => format!("{pad}Float({v})"),
        nbtree::Node::Double(v) => format!("{pad}Double({v})"),
        nbtree::Node::ByteArray(v) => format!("{pad}ByteArray({} bytes)", v.len()),
        nbtree::Node::String(v) => format!("{pad}String({:?})", v.decode()),
        nbtree::Node::IntArray(v) => format!("{pad}IntArray({} ints)", v.len()),
        nbtree::Node::LongArray(v) => format!("{pad}LongArray({} longs)", v.len()),
        nbtree::Node::List(list) => {
            let mut out = format!("{pad}List[{}] {{\n", list.len());
            for item in value.elements() {
                out.push_str(&dump(item, indent + 1));
                out.push('\n');
            }
            out.push_str(&format!("{pad}}}"));
            out
        }
        nbtree::Node::Compound(_) => {
            let mut out = format!("{pad}Compound {{\n");
            for (key, val) in value.entries() {
                let nested = dump(val, indent + 1);
                out.push_str(&format!("{pad}  {:?}: {}\n", key.decode(), nested.trim_start()));
            }
            out.push_str(&format!("{pad}}}"));
            out
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let Some(path) = args.get(1) else {
        println!("Usage: cargo run --example read_file -- <path_to_nbt_file> [--little]");
        println!();
        println!("Supported formats:");
        println!("  - Uncompressed NBT");
        println!("  - Gzip compressed NBT (.dat files)");
        println!("  - Zlib compressed NBT");
        return Ok(());
    };

    let byte_order = if args.iter().any(|arg| arg == "--little") {
        Endianness::Little
    } else {
        Endianness::Big
    };
    let reader = Reader::new(ReadConfig::default().with_byte_order(byte_order));

    println!("Reading NBT file: {path} ({byte_order:?} endian)");
    match gzip::read_file(path, &reader) {
        Ok(root) => println!("{}", dump(root.view(), 0)),
        Err(e) => {
            println!("Failed to parse NBT: {e}");
            println!("Try --little if this is a Bedrock Edition file.");
        }
    }

    Ok(())
}
