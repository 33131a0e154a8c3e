use crate::Endianness;

/// Default cap on container nesting while decoding and encoding.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// What the reader does when a compound names the same key twice.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum DuplicateKeyPolicy {
    /// Keep the later value and log a warning.
    #[default]
    LastWins,
    /// Fail with [`Error::DuplicateKey`](crate::Error::DuplicateKey).
    Fatal,
}

/// What the reader does with malformed Modified UTF-8 in names and strings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum TextPolicy {
    /// Fail with [`Error::MalformedText`](crate::Error::MalformedText).
    #[default]
    Strict,
    /// Replace malformed sequences with U+FFFD.
    Lossy,
}

/// Decode options.
///
/// ```
/// use nbtree::{DuplicateKeyPolicy, Endianness, ReadConfig};
///
/// let config = ReadConfig::default()
///     .with_byte_order(Endianness::Little)
///     .with_max_depth(64)
///     .with_duplicate_keys(DuplicateKeyPolicy::Fatal);
/// assert_eq!(config.max_depth, 64);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ReadConfig {
    pub byte_order: Endianness,
    /// Deepest allowed container nesting, the root container counting as 1.
    pub max_depth: usize,
    pub duplicate_keys: DuplicateKeyPolicy,
    pub text: TextPolicy,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            byte_order: Endianness::Big,
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_keys: DuplicateKeyPolicy::LastWins,
            text: TextPolicy::Strict,
        }
    }
}

impl ReadConfig {
    #[inline]
    pub fn with_byte_order(mut self, byte_order: Endianness) -> Self {
        self.byte_order = byte_order;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    #[inline]
    pub fn with_text(mut self, policy: TextPolicy) -> Self {
        self.text = policy;
        self
    }
}

/// Encode options.
///
/// ```
/// use nbtree::{Endianness, WriteConfig};
///
/// let config = WriteConfig::default()
///     .with_byte_order(Endianness::Little)
///     .with_max_depth(64);
/// assert_eq!(config.max_depth, 64);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WriteConfig {
    pub byte_order: Endianness,
    /// Deepest allowed container nesting, the root container counting as 1.
    pub max_depth: usize,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            byte_order: Endianness::Big,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WriteConfig {
    #[inline]
    pub fn with_byte_order(mut self, byte_order: Endianness) -> Self {
        self.byte_order = byte_order;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
