//! Compressed NBT files.
//!
//! Most NBT files on disk are gzip streams, some are zlib streams. The helpers
//! here sniff the header, inflate when needed and hand the bytes to the
//! codec.

use std::{borrow::Cow, fs, io::Read, path::Path};

use flate2::{
    Compression as Level,
    read::{GzDecoder, ZlibDecoder},
    write::GzEncoder,
};
use tracing::debug;

use crate::{Error, Node, Reader, Result, Writer};

/// Container format detected from the first bytes of a buffer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Compression {
    None,
    Gzip,
    Zlib,
}

impl Compression {
    pub fn detect(data: &[u8]) -> Self {
        match data {
            [0x1f, 0x8b, ..] => Compression::Gzip,
            [0x78, 0x01 | 0x5e | 0x9c | 0xda, ..] => Compression::Zlib,
            _ => Compression::None,
        }
    }
}

/// Returns `true` when `data` starts with a gzip or zlib header.
#[inline]
pub fn is_compressed(data: &[u8]) -> bool {
    Compression::detect(data) != Compression::None
}

/// Inflates `data` if it is compressed, borrowing it unchanged otherwise.
pub fn decompress(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    let compression = Compression::detect(data);
    let mut out = Vec::new();
    match compression {
        Compression::None => return Ok(Cow::Borrowed(data)),
        Compression::Gzip => GzDecoder::new(data).read_to_end(&mut out),
        Compression::Zlib => ZlibDecoder::new(data).read_to_end(&mut out),
    }
    .map_err(Error::ReadFailure)?;
    debug!(?compression, compressed = data.len(), inflated = out.len(), "inflated nbt data");
    Ok(Cow::Owned(out))
}

/// Gzip-compresses `data` at `level` (0-9).
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Level::new(level));
    encoder.write_all(data).map_err(Error::WriteFailure)?;
    encoder.finish().map_err(Error::WriteFailure)
}

/// Reads a file, inflating it when compressed, and decodes one root entry.
pub fn read_file(path: impl AsRef<Path>, reader: &Reader) -> Result<Node> {
    let raw = fs::read(path).map_err(Error::ReadFailure)?;
    let data = decompress(&raw)?;
    reader.decode(&*data)
}

/// Encodes `node` as the unnamed root entry and writes it to a file, gzip
/// compressed when `compressed` is set.
pub fn write_file(
    path: impl AsRef<Path>,
    node: &Node,
    writer: &Writer,
    compressed: bool,
) -> Result<()> {
    let mut data = Vec::new();
    writer.encode(node, &mut data)?;
    if compressed {
        data = compress(&data, Level::default().level())?;
    }
    fs::write(path, data).map_err(Error::WriteFailure)
}
