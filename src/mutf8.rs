//! Modified UTF-8 transcoding.
//!
//! Modified UTF-8 differs from UTF-8 in two ways:
//!
//! - U+0000 is written as the overlong pair `0xC0 0x80`, so encoded text never
//!   contains a zero byte.
//! - Code points above U+FFFF are split into a UTF-16 surrogate pair and each
//!   half is written as its own 3-byte sequence, 6 bytes in total.
//!
//! Decoding here is strict: overlong forms (other than `0xC0 0x80`), literal
//! zero bytes, 4-byte sequences and unpaired surrogates are rejected with
//! [`Error::MalformedText`]. That makes `encode(decode(b)) == b` hold for every
//! accepted `b`.
//!
//! ```
//! use nbtree::mutf8;
//!
//! let encoded = mutf8::encode("a\0😀");
//! assert_eq!(&*encoded, b"a\xC0\x80\xED\xA0\xBD\xED\xB8\x80");
//! assert_eq!(mutf8::decode(&encoded).unwrap(), "a\0😀");
//! ```

use std::borrow::Cow;

use crate::{Error, Result};

/// Encodes UTF-8 text. Borrows the input when it is already valid Modified
/// UTF-8 (no NUL and nothing above U+FFFF).
#[inline]
pub fn encode(text: &str) -> Cow<'_, [u8]> {
    simd_cesu8::mutf8::encode(text)
}

/// Number of bytes [`encode`] produces for `text`, without encoding it.
pub fn encoded_len(text: &str) -> usize {
    text.bytes()
        .map(|byte| match byte {
            0x00 => 2,
            // lead byte of a 4-byte sequence; its 3 continuation bytes add 3 more
            0xF0..=0xF7 => 3,
            _ => 1,
        })
        .sum()
}

/// Encodes UTF-16 text, failing on an unpaired surrogate.
pub fn encode_utf16(units: &[u16]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded_len_utf16(units));
    let mut failed_at = None;
    for_each_utf16_unit(units, |unit| match unit {
        Some(unit) => push_unit(&mut out, unit),
        None => {
            failed_at.get_or_insert(out.len());
        }
    });
    match failed_at {
        Some(offset) => Err(Error::MalformedText(offset)),
        None => Ok(out),
    }
}

/// Encodes UTF-16 text, replacing unpaired surrogates with U+FFFD.
pub fn encode_utf16_lossy(units: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len_utf16(units));
    for_each_utf16_unit(units, |unit| push_unit(&mut out, unit.unwrap_or(0xFFFD)));
    out
}

/// Number of bytes [`encode_utf16`] produces for `units`.
pub fn encoded_len_utf16(units: &[u16]) -> usize {
    units
        .iter()
        .map(|&unit| match unit {
            0x0001..=0x007F => 1,
            0x0000 | 0x0080..=0x07FF => 2,
            _ => 3,
        })
        .sum()
}

/// Walks UTF-16 code units, passing `None` for each unpaired surrogate.
fn for_each_utf16_unit(units: &[u16], mut f: impl FnMut(Option<u16>)) {
    let mut index = 0;
    while index < units.len() {
        let unit = units[index];
        match unit {
            0xD800..=0xDBFF => match units.get(index + 1) {
                Some(&low @ 0xDC00..=0xDFFF) => {
                    f(Some(unit));
                    f(Some(low));
                    index += 2;
                    continue;
                }
                _ => f(None),
            },
            0xDC00..=0xDFFF => f(None),
            _ => f(Some(unit)),
        }
        index += 1;
    }
}

/// Writes one UTF-16 code unit in its Modified UTF-8 form. Surrogate halves
/// take the 3-byte form like any other unit above U+07FF.
#[inline]
fn push_unit(out: &mut Vec<u8>, unit: u16) {
    match unit {
        0x0001..=0x007F => out.push(unit as u8),
        0x0000 | 0x0080..=0x07FF => {
            out.push(0xC0 | (unit >> 6) as u8);
            out.push(0x80 | (unit & 0x3F) as u8);
        }
        _ => {
            out.push(0xE0 | (unit >> 12) as u8);
            out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
            out.push(0x80 | (unit & 0x3F) as u8);
        }
    }
}

/// Decodes Modified UTF-8 into UTF-8. Borrows when no transcoding is needed.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    simd_cesu8::mutf8::decode_strict(bytes).map_err(|_| malformed_at(bytes))
}

/// Decodes Modified UTF-8 into UTF-16 code units.
pub fn decode_utf16(bytes: &[u8]) -> Result<Vec<u16>> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut chars = Chars { bytes, pos: 0 };
    let mut buf = [0u16; 2];
    while let Some(ch) = chars.next_char()? {
        out.extend_from_slice(ch.encode_utf16(&mut buf));
    }
    Ok(out)
}

/// Decodes Modified UTF-8, replacing malformed sequences with U+FFFD.
#[inline]
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    simd_cesu8::mutf8::decode_lossy(bytes)
}

/// Checks that `bytes` is well-formed Modified UTF-8.
#[inline]
pub fn validate(bytes: &[u8]) -> Result<()> {
    decode(bytes).map(drop)
}

/// Locates the first malformed sequence in text already known to be invalid.
#[cold]
fn malformed_at(bytes: &[u8]) -> Error {
    let mut chars = Chars { bytes, pos: 0 };
    loop {
        match chars.next_char() {
            Ok(Some(_)) => {}
            Ok(None) => return Error::MalformedText(chars.pos),
            Err(e) => return e,
        }
    }
}

/// Streaming decoder: never looks further back than the start of the current
/// code point.
struct Chars<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Chars<'_> {
    fn next_char(&mut self) -> Result<Option<char>> {
        let start = self.pos;
        let Some(unit) = self.next_unit()? else {
            return Ok(None);
        };
        let code_point = match unit {
            0xD800..=0xDBFF => match self.next_unit()? {
                Some(low @ 0xDC00..=0xDFFF) => {
                    0x10000 + (((unit as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00)
                }
                _ => return Err(Error::MalformedText(start)),
            },
            0xDC00..=0xDFFF => return Err(Error::MalformedText(start)),
            _ => unit as u32,
        };
        char::from_u32(code_point)
            .map(Some)
            .ok_or(Error::MalformedText(start))
    }

    /// Decodes one 1-3 byte sequence into a UTF-16 code unit.
    fn next_unit(&mut self) -> Result<Option<u16>> {
        let start = self.pos;
        let Some(&first) = self.bytes.get(start) else {
            return Ok(None);
        };
        let (unit, len) = match first {
            0x01..=0x7F => (first as u16, 1),
            0xC0..=0xDF => {
                let second = self.continuation(start, 1)?;
                let unit = ((first as u16 & 0x1F) << 6) | (second as u16 & 0x3F);
                // the only overlong form allowed is 0xC0 0x80 for U+0000
                if unit != 0 && unit < 0x80 {
                    return Err(Error::MalformedText(start));
                }
                (unit, 2)
            }
            0xE0..=0xEF => {
                let second = self.continuation(start, 1)?;
                let third = self.continuation(start, 2)?;
                let unit = ((first as u16 & 0x0F) << 12)
                    | ((second as u16 & 0x3F) << 6)
                    | (third as u16 & 0x3F);
                if unit < 0x800 {
                    return Err(Error::MalformedText(start));
                }
                (unit, 3)
            }
            _ => return Err(Error::MalformedText(start)),
        };
        self.pos += len;
        Ok(Some(unit))
    }

    #[inline]
    fn continuation(&self, start: usize, offset: usize) -> Result<u8> {
        match self.bytes.get(start + offset) {
            Some(&byte) if byte & 0xC0 == 0x80 => Ok(byte),
            _ => Err(Error::MalformedText(start)),
        }
    }
}
