use std::{
    borrow::{Borrow, Cow},
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
};

use crate::{Result, mutf8};

/// A borrowed Modified UTF-8 string, the view counterpart of [`NbtString`].
///
/// The bytes are always well-formed Modified UTF-8. Comparison, ordering and
/// hashing work on the encoded bytes, so `NbtStr` can key a map directly.
#[repr(transparent)]
pub struct NbtStr([u8]);

impl NbtStr {
    /// Views `bytes` as a string after checking they are well-formed.
    pub fn from_mutf8(bytes: &[u8]) -> Result<&NbtStr> {
        mutf8::validate(bytes)?;
        Ok(Self::from_mutf8_unchecked(bytes))
    }

    /// Callers must pass well-formed Modified UTF-8.
    #[inline]
    pub(crate) fn from_mutf8_unchecked(bytes: &[u8]) -> &NbtStr {
        // SAFETY: `NbtStr` is a `repr(transparent)` wrapper around `[u8]`.
        unsafe { &*(bytes as *const [u8] as *const NbtStr) }
    }

    /// The empty string.
    #[inline]
    pub fn empty() -> &'static NbtStr {
        Self::from_mutf8_unchecked(&[])
    }

    /// Returns the encoded bytes.
    #[inline]
    pub fn as_mutf8_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in encoded bytes, which is what the wire length prefix counts.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes to UTF-8, borrowing when the bytes need no transcoding.
    #[inline]
    pub fn decode(&self) -> Cow<'_, str> {
        mutf8::decode_lossy(&self.0)
    }

    #[inline]
    pub fn to_utf8_string(&self) -> String {
        self.decode().into_owned()
    }

    /// Decodes to UTF-16 code units.
    pub fn to_utf16(&self) -> Vec<u16> {
        self.decode().encode_utf16().collect()
    }
}

impl PartialEq for NbtStr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for NbtStr {}

impl PartialOrd for NbtStr {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NbtStr {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Hash for NbtStr {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl PartialEq<str> for NbtStr {
    fn eq(&self, other: &str) -> bool {
        *mutf8::encode(other) == self.0
    }
}

impl PartialEq<&str> for NbtStr {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Debug for NbtStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.decode(), f)
    }
}

impl fmt::Display for NbtStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.decode())
    }
}

impl ToOwned for NbtStr {
    type Owned = NbtString;

    #[inline]
    fn to_owned(&self) -> NbtString {
        NbtString {
            data: self.0.to_vec(),
        }
    }
}

impl AsRef<[u8]> for NbtStr {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An owned Modified UTF-8 string.
///
/// Text is transcoded once, when the string is built; accessors that hand out
/// UTF-8 or UTF-16 produce fresh copies on demand.
///
/// ```
/// use nbtree::NbtString;
///
/// let name = NbtString::from("caf\u{e9}\0");
/// assert_eq!(name.as_mutf8_bytes(), b"caf\xC3\xA9\xC0\x80");
/// assert_eq!(name.decode(), "caf\u{e9}\0");
/// assert_eq!(name, "caf\u{e9}\0");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NbtString {
    data: Vec<u8>,
}

impl NbtString {
    #[inline]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Takes ownership of `bytes` after checking they are well-formed.
    pub fn from_mutf8(bytes: Vec<u8>) -> Result<Self> {
        mutf8::validate(&bytes)?;
        Ok(Self { data: bytes })
    }

    /// Callers must pass well-formed Modified UTF-8.
    #[inline]
    pub(crate) fn from_mutf8_unchecked(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Like [`NbtString::from_mutf8`], replacing malformed sequences with U+FFFD.
    pub fn from_mutf8_lossy(bytes: &[u8]) -> Self {
        match mutf8::validate(bytes) {
            Ok(()) => Self {
                data: bytes.to_vec(),
            },
            Err(_) => Self::from(&*mutf8::decode_lossy(bytes)),
        }
    }

    /// Transcodes UTF-16, failing on an unpaired surrogate.
    pub fn from_utf16(units: &[u16]) -> Result<Self> {
        Ok(Self {
            data: mutf8::encode_utf16(units)?,
        })
    }

    /// Transcodes UTF-16, replacing unpaired surrogates with U+FFFD.
    pub fn from_utf16_lossy(units: &[u16]) -> Self {
        Self {
            data: mutf8::encode_utf16_lossy(units),
        }
    }

    #[inline]
    pub fn as_nbt_str(&self) -> &NbtStr {
        NbtStr::from_mutf8_unchecked(&self.data)
    }

    #[inline]
    pub fn into_mutf8_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Appends UTF-8 text, transcoding it.
    pub fn push_str(&mut self, text: &str) {
        self.data.extend_from_slice(&mutf8::encode(text));
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl Deref for NbtString {
    type Target = NbtStr;

    #[inline]
    fn deref(&self) -> &NbtStr {
        self.as_nbt_str()
    }
}

impl Borrow<NbtStr> for NbtString {
    #[inline]
    fn borrow(&self) -> &NbtStr {
        self.as_nbt_str()
    }
}

impl AsRef<NbtStr> for NbtString {
    #[inline]
    fn as_ref(&self) -> &NbtStr {
        self.as_nbt_str()
    }
}

impl From<&str> for NbtString {
    #[inline]
    fn from(text: &str) -> Self {
        Self {
            data: mutf8::encode(text).into_owned(),
        }
    }
}

impl From<&String> for NbtString {
    #[inline]
    fn from(text: &String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<String> for NbtString {
    fn from(text: String) -> Self {
        let transcoded = match mutf8::encode(&text) {
            Cow::Borrowed(_) => None,
            Cow::Owned(data) => Some(data),
        };
        // already Modified UTF-8: reuse the allocation
        Self {
            data: transcoded.unwrap_or_else(|| text.into_bytes()),
        }
    }
}

impl From<&NbtStr> for NbtString {
    #[inline]
    fn from(text: &NbtStr) -> Self {
        text.to_owned()
    }
}

impl PartialEq<str> for NbtString {
    fn eq(&self, other: &str) -> bool {
        self.as_nbt_str() == other
    }
}

impl PartialEq<&str> for NbtString {
    fn eq(&self, other: &&str) -> bool {
        self.as_nbt_str() == *other
    }
}

impl fmt::Debug for NbtString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_nbt_str(), f)
    }
}

impl fmt::Display for NbtString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_nbt_str(), f)
    }
}
