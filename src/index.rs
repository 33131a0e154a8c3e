use std::borrow::Cow;

use crate::{NbtStr, NbtString, Node, mutf8};

mod private {
    use crate::{NbtStr, NbtString};

    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for NbtStr {}
    impl Sealed for NbtString {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// Text usable as a compound key.
///
/// UTF-8 keys are transcoded on each lookup; [`NbtStr`] and [`NbtString`] are
/// used as-is.
pub trait Key: private::Sealed {
    #[doc(hidden)]
    fn to_key(&self) -> Cow<'_, NbtStr>;
}

impl Key for str {
    #[inline]
    fn to_key(&self) -> Cow<'_, NbtStr> {
        match mutf8::encode(self) {
            Cow::Borrowed(bytes) => Cow::Borrowed(NbtStr::from_mutf8_unchecked(bytes)),
            Cow::Owned(bytes) => Cow::Owned(NbtString::from_mutf8_unchecked(bytes)),
        }
    }
}

impl Key for String {
    #[inline]
    fn to_key(&self) -> Cow<'_, NbtStr> {
        self.as_str().to_key()
    }
}

impl Key for NbtStr {
    #[inline]
    fn to_key(&self) -> Cow<'_, NbtStr> {
        Cow::Borrowed(self)
    }
}

impl Key for NbtString {
    #[inline]
    fn to_key(&self) -> Cow<'_, NbtStr> {
        Cow::Borrowed(self.as_nbt_str())
    }
}

impl<T: ?Sized + Key> Key for &T {
    #[inline]
    fn to_key(&self) -> Cow<'_, NbtStr> {
        (**self).to_key()
    }
}

/// A position inside a container node: a list index or a compound key.
///
/// Indexing a node of the wrong kind, an index out of bounds, or a missing
/// key all yield `None`.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into<'a>(&self, node: &'a Node) -> Option<&'a Node>;

    #[doc(hidden)]
    fn index_into_mut<'a>(&self, node: &'a mut Node) -> Option<&'a mut Node>;
}

impl Index for usize {
    #[inline]
    fn index_into<'a>(&self, node: &'a Node) -> Option<&'a Node> {
        match node {
            Node::List(list) => list.get(*self),
            _ => None,
        }
    }

    #[inline]
    fn index_into_mut<'a>(&self, node: &'a mut Node) -> Option<&'a mut Node> {
        match node {
            Node::List(list) => list.slot_mut(*self),
            _ => None,
        }
    }
}

macro_rules! key_index {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Index for $ty {
                #[inline]
                fn index_into<'a>(&self, node: &'a Node) -> Option<&'a Node> {
                    match node {
                        Node::Compound(compound) => compound.get(self),
                        _ => None,
                    }
                }

                #[inline]
                fn index_into_mut<'a>(&self, node: &'a mut Node) -> Option<&'a mut Node> {
                    match node {
                        Node::Compound(compound) => compound.slot_mut(self),
                        _ => None,
                    }
                }
            }
        )*
    };
}

key_index!(str, String, NbtStr, NbtString);

impl<T: ?Sized + Index> Index for &T {
    #[inline]
    fn index_into<'a>(&self, node: &'a Node) -> Option<&'a Node> {
        (**self).index_into(node)
    }

    #[inline]
    fn index_into_mut<'a>(&self, node: &'a mut Node) -> Option<&'a mut Node> {
        (**self).index_into_mut(node)
    }
}
