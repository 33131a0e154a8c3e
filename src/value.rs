use std::mem;

use crate::{Error, NbtString, NbtType, NodeMut, NodeRef, Result, Tag};

mod array;
mod compound;
mod list;

pub use array::*;
pub use compound::*;
pub use list::*;

/// One NBT value: exactly one payload of exactly one tag.
///
/// A node owns everything below it. Dropping a node drops its whole subtree,
/// and cloning is an explicit deep copy.
///
/// Equality is structural. Floats compare by bit pattern so that a decoded
/// tree equals the tree it was encoded from even when it holds NaN.
#[derive(Clone, Debug, Default)]
pub enum Node {
    #[default]
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(ByteArray),
    String(NbtString),
    List(List),
    Compound(Compound),
    IntArray(IntArray),
    LongArray(LongArray),
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::End, Node::End) => true,
            (Node::Byte(a), Node::Byte(b)) => a == b,
            (Node::Short(a), Node::Short(b)) => a == b,
            (Node::Int(a), Node::Int(b)) => a == b,
            (Node::Long(a), Node::Long(b)) => a == b,
            (Node::Float(a), Node::Float(b)) => a.to_bits() == b.to_bits(),
            (Node::Double(a), Node::Double(b)) => a.to_bits() == b.to_bits(),
            (Node::ByteArray(a), Node::ByteArray(b)) => a == b,
            (Node::String(a), Node::String(b)) => a == b,
            (Node::List(a), Node::List(b)) => a == b,
            (Node::Compound(a), Node::Compound(b)) => a == b,
            (Node::IntArray(a), Node::IntArray(b)) => a == b,
            (Node::LongArray(a), Node::LongArray(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

macro_rules! copy_accessors {
    ($($fn_name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $fn_name(&self) -> Result<$ty> {
                match self {
                    Node::$variant(value) => Ok(*value),
                    other => Err(Error::TypeMismatch(Tag::$variant, other.tag())),
                }
            }
        )*
    };
}

macro_rules! ref_accessors {
    ($($fn_name:ident, $fn_name_mut:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $fn_name(&self) -> Result<&$ty> {
                match self {
                    Node::$variant(value) => Ok(value),
                    other => Err(Error::TypeMismatch(Tag::$variant, other.tag())),
                }
            }

            #[inline]
            pub fn $fn_name_mut(&mut self) -> Result<&mut $ty> {
                match self {
                    Node::$variant(value) => Ok(value),
                    other => Err(Error::TypeMismatch(Tag::$variant, other.tag())),
                }
            }
        )*
    };
}

impl Node {
    /// Returns the tag of the active payload.
    #[inline]
    pub fn tag(&self) -> Tag {
        match self {
            Node::End => Tag::End,
            Node::Byte(_) => Tag::Byte,
            Node::Short(_) => Tag::Short,
            Node::Int(_) => Tag::Int,
            Node::Long(_) => Tag::Long,
            Node::Float(_) => Tag::Float,
            Node::Double(_) => Tag::Double,
            Node::ByteArray(_) => Tag::ByteArray,
            Node::String(_) => Tag::String,
            Node::List(_) => Tag::List,
            Node::Compound(_) => Tag::Compound,
            Node::IntArray(_) => Tag::IntArray,
            Node::LongArray(_) => Tag::LongArray,
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, Node::End)
    }

    /// Returns `true` if the active tag is `T`'s tag.
    #[inline]
    pub fn is<T: NbtType>(&self) -> bool {
        self.tag() == T::TAG
    }

    /// Borrows the payload through the type-level tag `T`.
    ///
    /// ```
    /// use nbtree::{Error, Node, Tag, kind};
    ///
    /// let node = Node::from("hello");
    /// assert_eq!(node.get::<kind::String>().unwrap(), "hello");
    /// assert!(matches!(
    ///     node.get::<kind::Int>(),
    ///     Err(Error::TypeMismatch(Tag::Int, Tag::String))
    /// ));
    /// ```
    #[inline]
    pub fn get<T: NbtType>(&self) -> Result<&T::Payload> {
        T::payload(self).ok_or_else(|| Error::TypeMismatch(T::TAG, self.tag()))
    }

    #[inline]
    pub fn get_mut<T: NbtType>(&mut self) -> Result<&mut T::Payload> {
        let actual = self.tag();
        T::payload_mut(self).ok_or(Error::TypeMismatch(T::TAG, actual))
    }

    /// Moves the payload out. On a mismatch the node is dropped and the error
    /// reports both tags.
    pub fn into_payload<T: NbtType>(self) -> Result<T::Payload> {
        T::from_node(self).map_err(|node| Error::TypeMismatch(T::TAG, node.tag()))
    }

    copy_accessors!(
        as_byte => Byte: i8,
        as_short => Short: i16,
        as_int => Int: i32,
        as_long => Long: i64,
        as_float => Float: f32,
        as_double => Double: f64,
    );

    ref_accessors!(
        as_byte_array, as_byte_array_mut => ByteArray: ByteArray,
        as_string, as_string_mut => String: NbtString,
        as_list, as_list_mut => List: List,
        as_compound, as_compound_mut => Compound: Compound,
        as_int_array, as_int_array_mut => IntArray: IntArray,
        as_long_array, as_long_array_mut => LongArray: LongArray,
    );

    /// Moves the value out, leaving [`Node::End`] behind.
    #[inline]
    pub fn take(&mut self) -> Node {
        mem::take(self)
    }

    /// A read-only traversal handle over this node.
    #[inline]
    pub fn view(&self) -> NodeRef<'_> {
        NodeRef::new(self)
    }

    /// A mutable traversal handle over this node. The handle may replace the
    /// node with one of any tag.
    #[inline]
    pub fn view_mut(&mut self) -> NodeMut<'_> {
        NodeMut::new(self)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                #[inline]
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    ByteArray => ByteArray,
    NbtString => String,
    List => List,
    Compound => Compound,
    IntArray => IntArray,
    LongArray => LongArray,
);

impl From<bool> for Node {
    #[inline]
    fn from(value: bool) -> Self {
        Node::Byte(value as i8)
    }
}

impl From<&str> for Node {
    #[inline]
    fn from(value: &str) -> Self {
        Node::String(value.into())
    }
}

impl From<String> for Node {
    #[inline]
    fn from(value: String) -> Self {
        Node::String(value.into())
    }
}

impl From<Vec<i8>> for Node {
    #[inline]
    fn from(value: Vec<i8>) -> Self {
        Node::ByteArray(value.into())
    }
}

impl From<Vec<i32>> for Node {
    #[inline]
    fn from(value: Vec<i32>) -> Self {
        Node::IntArray(value.into())
    }
}

impl From<Vec<i64>> for Node {
    #[inline]
    fn from(value: Vec<i64>) -> Self {
        Node::LongArray(value.into())
    }
}
