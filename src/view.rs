use std::{fmt, ops::Deref};

use crate::{
    ByteArray, Compound, Error, Index, IntArray, List, LongArray, NbtStr, NbtString, NbtType,
    Node, Result, Tag,
};

/// Where a mutable handle points, which decides what it may be replaced with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    /// A root or otherwise unconstrained node.
    Free,
    /// A compound value: anything but End.
    Entry,
    /// A list element: only the list's tag.
    Element,
}

/// A read-only handle into a tree.
///
/// `NodeRef` is `Copy` and borrows the tree for `'a`, so indexing through it
/// yields handles that outlive the handle they came from.
///
/// ```
/// use nbtree::{Compound, List, Node};
///
/// let mut inner = List::new();
/// inner.push(7i32).unwrap();
/// let mut root = Compound::new();
/// root.insert("values", inner).unwrap();
/// let root = Node::from(root);
///
/// let seven = root.view().get("values").and_then(|list| list.get(0));
/// assert_eq!(seven.map(|n| n.as_int().unwrap()), Some(7));
/// assert!(root.view().get("missing").is_none());
/// assert!(root.view().get(0).is_none());
/// ```
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub(crate) fn new(node: &'a Node) -> Self {
        Self { node }
    }

    /// The underlying node, borrowed for the full tree lifetime.
    #[inline]
    pub fn node(self) -> &'a Node {
        self.node
    }

    /// Follows a list index or compound key.
    #[inline]
    pub fn get<I: Index>(self, index: I) -> Option<NodeRef<'a>> {
        index.index_into(self.node).map(NodeRef::new)
    }

    /// Follows a path of indices, stopping at the first miss.
    pub fn path<I, P>(self, path: P) -> Option<NodeRef<'a>>
    where
        I: Index,
        P: IntoIterator<Item = I>,
    {
        path.into_iter()
            .try_fold(self, |node, index| node.get(index))
    }

    /// Typed payload access with the tree lifetime.
    #[inline]
    pub fn payload<T: NbtType>(self) -> Result<&'a T::Payload> {
        self.node.get::<T>()
    }

    /// Handles to the elements of a list; empty for every other tag.
    pub fn elements(self) -> impl Iterator<Item = NodeRef<'a>> {
        let items = match self.node {
            Node::List(list) => list.as_slice(),
            _ => &[],
        };
        items.iter().map(NodeRef::new)
    }

    /// Key/handle pairs of a compound; empty for every other tag.
    pub fn entries(self) -> impl Iterator<Item = (&'a NbtStr, NodeRef<'a>)> {
        let compound = match self.node {
            Node::Compound(compound) => Some(compound),
            _ => None,
        };
        compound
            .into_iter()
            .flat_map(|compound| compound.iter())
            .map(|(key, node)| (key.as_nbt_str(), NodeRef::new(node)))
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    #[inline]
    fn deref(&self) -> &Node {
        self.node
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.node, f)
    }
}

impl PartialEq for NodeRef<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl PartialEq<Node> for NodeRef<'_> {
    #[inline]
    fn eq(&self, other: &Node) -> bool {
        self.node == other
    }
}

/// A mutable handle into a tree.
///
/// The handle exposes the read API through `Deref` and mutation through its own
/// methods, which keep the parent container valid: a compound value cannot be
/// replaced with End, and a list element can only be replaced with a node of
/// the list's tag.
///
/// ```
/// use nbtree::{Compound, Error, List, Node, Tag};
///
/// let mut list = List::new();
/// list.push(1i32).unwrap();
/// let mut root = Compound::new();
/// root.insert("list", list).unwrap();
/// let mut root = Node::from(root);
///
/// let mut view = root.view_mut();
/// let mut first = view.get_mut("list").unwrap().into_mut(0usize).unwrap();
/// assert_eq!(first.replace(5i32).unwrap(), Node::Int(1));
/// assert!(matches!(
///     first.replace("five"),
///     Err(Error::TypeMismatch(Tag::Int, Tag::String))
/// ));
/// assert_eq!(root.view().path(["list"]).and_then(|l| l.get(0)).unwrap(), Node::Int(5));
/// ```
pub struct NodeMut<'a> {
    node: &'a mut Node,
    slot: Slot,
}

impl<'a> NodeMut<'a> {
    #[inline]
    pub(crate) fn new(node: &'a mut Node) -> Self {
        Self::with_slot(node, Slot::Free)
    }

    #[inline]
    pub(crate) fn with_slot(node: &'a mut Node, slot: Slot) -> Self {
        Self { node, slot }
    }

    /// A shorter-lived handle with the same rules.
    #[inline]
    pub fn reborrow(&mut self) -> NodeMut<'_> {
        NodeMut::with_slot(self.node, self.slot)
    }

    #[inline]
    pub fn as_ref(&self) -> NodeRef<'_> {
        NodeRef::new(self.node)
    }

    #[inline]
    pub fn get<I: Index>(&self, index: I) -> Option<NodeRef<'_>> {
        self.as_ref().get(index)
    }

    #[inline]
    pub fn get_mut<I: Index>(&mut self, index: I) -> Option<NodeMut<'_>> {
        self.reborrow().into_mut(index)
    }

    /// Like [`NodeMut::get_mut`], consuming the handle to keep the full
    /// tree lifetime.
    pub fn into_mut<I: Index>(self, index: I) -> Option<NodeMut<'a>> {
        let slot = match self.node {
            Node::List(_) => Slot::Element,
            _ => Slot::Entry,
        };
        index
            .index_into_mut(self.node)
            .map(|node| NodeMut::with_slot(node, slot))
    }

    /// Swaps in `node` and returns the previous value.
    pub fn replace(&mut self, node: impl Into<Node>) -> Result<Node> {
        let node = node.into();
        match self.slot {
            Slot::Free => {}
            Slot::Entry if node.is_end() => return Err(Error::InvalidTag(Tag::End as u8)),
            Slot::Entry => {}
            Slot::Element if node.tag() != self.node.tag() => {
                return Err(Error::TypeMismatch(self.node.tag(), node.tag()));
            }
            Slot::Element => {}
        }
        Ok(std::mem::replace(self.node, node))
    }

    /// Mutable typed payload access. The tag cannot change through it.
    #[inline]
    pub fn payload_mut<T: NbtType>(&mut self) -> Result<&mut T::Payload> {
        self.node.get_mut::<T>()
    }

    /// Like [`NodeMut::payload_mut`], consuming the handle.
    #[inline]
    pub fn into_payload_mut<T: NbtType>(self) -> Result<&'a mut T::Payload> {
        self.node.get_mut::<T>()
    }

    #[inline]
    pub fn as_byte_array_mut(&mut self) -> Result<&mut ByteArray> {
        self.node.as_byte_array_mut()
    }

    #[inline]
    pub fn as_string_mut(&mut self) -> Result<&mut NbtString> {
        self.node.as_string_mut()
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Result<&mut List> {
        self.node.as_list_mut()
    }

    #[inline]
    pub fn as_compound_mut(&mut self) -> Result<&mut Compound> {
        self.node.as_compound_mut()
    }

    #[inline]
    pub fn as_int_array_mut(&mut self) -> Result<&mut IntArray> {
        self.node.as_int_array_mut()
    }

    #[inline]
    pub fn as_long_array_mut(&mut self) -> Result<&mut LongArray> {
        self.node.as_long_array_mut()
    }
}

impl Deref for NodeMut<'_> {
    type Target = Node;

    #[inline]
    fn deref(&self) -> &Node {
        self.node
    }
}

impl fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.node, f)
    }
}
