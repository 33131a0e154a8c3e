use std::hint::black_box;

use bytes::{Bytes, BytesMut};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use nbtree::{
    BigEndian, Compound, IoInput, LittleEndian, List, Node, Reader, Writer, mutf8, read_slice,
};

/// A chunk-like tree: many small compounds, a few large arrays, mixed strings.
fn build_tree() -> Node {
    let mut sections = List::new();
    for y in -4..20i8 {
        let mut section = Compound::new();
        section.insert("Y", y).unwrap();
        section.insert("BlockStates", vec![0x0123_4567_89AB_CDEFi64; 256]).unwrap();
        section.insert("BlockLight", vec![15i8; 2048]).unwrap();

        let mut palette = List::new();
        for name in ["minecraft:stone", "minecraft:dirt", "minecraft:air", "minecraft:bedrock"] {
            let mut entry = Compound::new();
            entry.insert("Name", name).unwrap();
            palette.push(entry).unwrap();
        }
        section.insert("Palette", palette).unwrap();
        sections.push(section).unwrap();
    }

    let mut root = Compound::new();
    root.insert("DataVersion", 3700i32).unwrap();
    root.insert("Status", "minecraft:full").unwrap();
    root.insert("Heightmap", vec![64i32; 256]).unwrap();
    root.insert("sections", sections).unwrap();
    Node::from(root)
}

fn bench_codec(c: &mut Criterion) {
    let tree = build_tree();
    let be = tree.write_to_vec::<BigEndian>().unwrap();
    let le = tree.write_to_vec::<LittleEndian>().unwrap();

    let mut group = c.benchmark_group("chunk");
    group.throughput(Throughput::Bytes(be.len() as u64));

    group.bench_function("read_slice_be", |b| {
        b.iter(|| read_slice::<BigEndian>(black_box(&be)).unwrap())
    });
    group.bench_function("read_slice_le", |b| {
        b.iter(|| read_slice::<LittleEndian>(black_box(&le)).unwrap())
    });
    group.bench_function("read_io_be", |b| {
        let reader = Reader::default();
        b.iter(|| reader.decode(IoInput::new(black_box(&be[..]))).unwrap())
    });
    group.bench_function("read_bytes_be", |b| {
        let reader = Reader::default();
        let shared = Bytes::from(be.clone());
        b.iter(|| reader.decode(&mut black_box(shared.clone())).unwrap())
    });
    group.bench_function("write_vec_be", |b| {
        b.iter(|| black_box(&tree).write_to_vec::<BigEndian>().unwrap())
    });
    group.bench_function("write_bytes_mut_be", |b| {
        let writer = Writer::default();
        b.iter(|| {
            let mut out = BytesMut::with_capacity(be.len());
            writer.encode(black_box(&tree), &mut out).unwrap();
            out
        })
    });
    group.bench_function("gzip_round_trip", |b| {
        b.iter(|| {
            let packed = nbtree::gzip::compress(black_box(&be), 6).unwrap();
            let raw = nbtree::gzip::decompress(&packed).unwrap();
            read_slice::<BigEndian>(&raw).unwrap()
        })
    });
    group.finish();
}

fn bench_mutf8(c: &mut Criterion) {
    let ascii = "minecraft:stone_bricks ".repeat(64);
    let mixed = "\u{1F34C} banana\0split \u{c5}\u{c4}\u{d6} ".repeat(64);

    let mut group = c.benchmark_group("mutf8");
    for (name, text) in [("ascii", &ascii), ("mixed", &mixed)] {
        let encoded = mutf8::encode(text).into_owned();
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_function(format!("encode_{name}"), |b| {
            b.iter(|| mutf8::encode(black_box(text)).len())
        });
        group.bench_function(format!("decode_{name}"), |b| {
            b.iter(|| mutf8::decode(black_box(&encoded)).unwrap().len())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec, bench_mutf8);
criterion_main!(benches);
