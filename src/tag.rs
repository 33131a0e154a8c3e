use crate::{Error, Result};

pub mod kind;

pub use kind::NbtType;

/// The closed set of NBT value kinds, with their wire byte values.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Tag {
    #[default]
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl Tag {
    const ALL: [Tag; 13] = [
        Tag::End,
        Tag::Byte,
        Tag::Short,
        Tag::Int,
        Tag::Long,
        Tag::Float,
        Tag::Double,
        Tag::ByteArray,
        Tag::String,
        Tag::List,
        Tag::Compound,
        Tag::IntArray,
        Tag::LongArray,
    ];

    /// Returns `true` if `value` is one of the 13 recognized tag bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use nbtree::Tag;
    ///
    /// assert!(Tag::is_valid(0));
    /// assert!(Tag::is_valid(12));
    /// assert!(!Tag::is_valid(13));
    /// ```
    #[inline]
    pub const fn is_valid(value: u8) -> bool {
        value <= Tag::LongArray as u8
    }

    /// Converts a raw byte into a tag, failing with [`Error::InvalidTag`] for
    /// anything outside the closed set.
    #[inline]
    pub fn from_u8(value: u8) -> Result<Self> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::InvalidTag(value))
    }

    /// Returns `true` if this is a primitive tag type.
    ///
    /// Primitive tags are: End, Byte, Short, Int, Long, Float, Double.
    /// These tags store their values directly without additional structure.
    ///
    /// # Example
    ///
    /// ```
    /// use nbtree::Tag;
    ///
    /// assert!(Tag::Int.is_primitive());
    /// assert!(Tag::Double.is_primitive());
    /// assert!(!Tag::List.is_primitive());
    /// assert!(!Tag::ByteArray.is_primitive());
    /// ```
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::End
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Returns `true` if this is an array tag type: ByteArray, IntArray or
    /// LongArray.
    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray | Self::LongArray)
    }

    /// Returns `true` if this tag contains other nodes (List, Compound).
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// The smallest number of bytes one unnamed payload of this tag occupies
    /// on the wire.
    pub(crate) const fn min_payload_size(self) -> usize {
        match self {
            Self::End => 0,
            Self::Byte => 1,
            Self::Short | Self::String => 2,
            Self::Int | Self::Float | Self::ByteArray | Self::IntArray | Self::LongArray => 4,
            Self::Long | Self::Double => 8,
            Self::List => 5,
            Self::Compound => 1,
        }
    }

    /// Canonical `TAG_*` name of the tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_Int_Array",
            Self::LongArray => "TAG_Long_Array",
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;

    #[inline]
    fn try_from(value: u8) -> Result<Self> {
        Tag::from_u8(value)
    }
}

impl From<Tag> for u8 {
    #[inline]
    fn from(tag: Tag) -> u8 {
        tag as u8
    }
}
