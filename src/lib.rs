//! Owned NBT (Named Binary Tag) trees and their binary codec.
//!
//! A [`Node`] holds one value of one [`Tag`]; [`List`], [`Compound`] and the
//! [`Array`] types own their children. [`Reader`] and [`Writer`] move trees
//! to and from any [`InputStream`] / [`OutputStream`], in big- or
//! little-endian order, with strings carried as Modified UTF-8.
//!
//! ```
//! use nbtree::{BigEndian, Compound, List, Node, read_slice};
//!
//! let mut scores = List::new();
//! scores.push(10i32).unwrap();
//! scores.push(20i32).unwrap();
//!
//! let mut root = Compound::new();
//! root.insert("name", "Steve").unwrap();
//! root.insert("scores", scores).unwrap();
//! let root = Node::from(root);
//!
//! let bytes = root.write_to_vec::<BigEndian>().unwrap();
//! let decoded = read_slice::<BigEndian>(&bytes).unwrap();
//! assert_eq!(decoded, root);
//! assert_eq!(decoded.view().path(["scores"]).and_then(|s| s.get(1)).unwrap(), Node::Int(20));
//! ```

mod config;
pub mod endian;
mod error;
#[cfg(feature = "gzip")]
pub mod gzip;
mod index;
pub mod io;
pub mod mutf8;
mod read;
#[cfg(feature = "serde")]
mod serde_impl;
mod string;
pub mod tag;
mod value;
mod view;
mod write;

pub use config::*;
pub use endian::{BigEndian, ByteOrder, Endianness, LittleEndian, NativeEndian, Scalar};
pub use error::*;
pub use index::*;
pub use io::{InputStream, IoInput, IoOutput, OutputStream, SliceInput};
pub use read::*;
pub use string::*;
pub use tag::{NbtType, Tag, kind};
pub use value::*;
pub use view::{NodeMut, NodeRef};
pub use write::*;
