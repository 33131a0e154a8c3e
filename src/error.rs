//! Error types for NBT decoding, encoding and tree manipulation.
//!
//! This module contains the [`Error`] type which represents every failure the
//! crate can report, from a truncated stream to a typed accessor used on the
//! wrong kind of node.
//!
//! # Example
//!
//! ```
//! use nbtree::{BigEndian, Error, Result, read_slice};
//!
//! fn try_parse(data: &[u8]) -> Result<()> {
//!     match read_slice::<BigEndian>(data) {
//!         Ok(_) => Ok(()),
//!         Err(Error::TruncatedInput) => {
//!             println!("Data was truncated");
//!             Err(Error::TruncatedInput)
//!         }
//!         Err(Error::InvalidTag(tag)) => {
//!             println!("Unknown tag type: {:#04x}", tag);
//!             Err(Error::InvalidTag(tag))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! # assert!(try_parse(&[0x0A, 0x00]).is_err());
//! ```

use std::fmt::{self, Display};
use std::io;

use crate::{NbtString, Tag};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when reading,
/// writing or manipulating NBT data.
///
/// Decode errors are fatal to the decode call that produced them: no partial
/// tree is returned and the stream position must be discarded.
#[derive(Debug)]
pub enum Error {
    /// A byte outside the closed tag set (0-12) was found where a tag was
    /// expected, or End appeared where a value tag is required.
    InvalidTag(u8),

    /// The input ended in the middle of a value, or a length field claims more
    /// bytes than the stream has left.
    TruncatedInput,

    /// A count or length field is negative or out of range.
    InvalidLength(i64),

    /// A Modified UTF-8 sequence is malformed. Carries the byte offset of the
    /// offending sequence inside the string payload.
    MalformedText(usize),

    /// Containers are nested deeper than the configured maximum.
    DepthExceeded(usize),

    /// A payload was accessed through the wrong tag: `(expected, actual)`.
    TypeMismatch(Tag, Tag),

    /// A compound contained the same key twice under the fatal duplicate-key
    /// policy.
    DuplicateKey(NbtString),

    /// Extra bytes remain after decoding a complete slice.
    TrailingData(usize),

    /// The input capability failed for a reason other than end-of-stream.
    ReadFailure(io::Error),

    /// The output capability rejected bytes.
    WriteFailure(io::Error),

    Message(String),
}

impl Error {
    /// Returns `true` for the error kinds a decoder can produce from bad input.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidTag(_)
                | Error::TruncatedInput
                | Error::InvalidLength(_)
                | Error::MalformedText(_)
                | Error::DepthExceeded(_)
                | Error::DuplicateKey(_)
                | Error::TrailingData(_)
        )
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidTag(tag) => write!(formatter, "invalid NBT tag type: {tag:#04x}"),
            Error::TruncatedInput => formatter.write_str("unexpected end of input"),
            Error::InvalidLength(len) => write!(formatter, "invalid length field: {len}"),
            Error::MalformedText(offset) => {
                write!(formatter, "malformed modified UTF-8 at byte {offset}")
            }
            Error::DepthExceeded(max) => {
                write!(formatter, "nesting depth exceeds the maximum of {max}")
            }
            Error::TypeMismatch(expected, actual) => write!(
                formatter,
                "tag mismatch: expected {}, got {}",
                expected.name(),
                actual.name()
            ),
            Error::DuplicateKey(key) => write!(formatter, "duplicate compound key {key:?}"),
            Error::TrailingData(remaining_bytes) => write!(
                formatter,
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            ),
            Error::ReadFailure(error) => write!(formatter, "read failed: {error}"),
            Error::WriteFailure(error) => write!(formatter, "write failed: {error}"),
            Error::Message(message) => formatter.write_str(message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadFailure(error) | Error::WriteFailure(error) => Some(error),
            _ => None,
        }
    }
}
