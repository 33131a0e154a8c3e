use std::ops::Index;

use crate::{Error, NbtType, Node, NodeMut, Result, Tag, view::Slot};

/// A homogeneous, ordered sequence of nodes.
///
/// The element tag is stored once for the whole list. An empty list always
/// reports [`Tag::End`]; the first element pushed fixes the tag until the list
/// is emptied again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct List {
    tag: Tag,
    items: Vec<Node>,
}

impl List {
    #[inline]
    pub const fn new() -> Self {
        Self {
            tag: Tag::End,
            items: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tag: Tag::End,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Builds a list from nodes, rejecting End elements and mixed tags.
    pub fn from_nodes<I>(nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Node>,
    {
        let nodes = nodes.into_iter();
        let mut list = List::with_capacity(nodes.size_hint().0);
        for node in nodes {
            list.push(node)?;
        }
        Ok(list)
    }

    /// Builds a list of `T` payloads. The result is homogeneous by
    /// construction.
    ///
    /// ```
    /// use nbtree::{List, Tag, kind};
    ///
    /// let list = List::from_payloads::<kind::Int, _>([1, 2, 3]);
    /// assert_eq!(list.element_tag(), Tag::Int);
    /// assert_eq!(list.len(), 3);
    /// ```
    pub fn from_payloads<T, I>(payloads: I) -> Self
    where
        T: NbtType,
        I: IntoIterator<Item = T::Payload>,
    {
        if T::TAG == Tag::End {
            return List::new();
        }
        let items: Vec<Node> = payloads.into_iter().map(T::into_node).collect();
        let tag = if items.is_empty() { Tag::End } else { T::TAG };
        Self { tag, items }
    }

    /// The shared element tag, [`Tag::End`] when empty.
    #[inline]
    pub fn element_tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks that `node` may join this list.
    fn admit(&self, node: &Node) -> Result<()> {
        let tag = node.tag();
        if tag == Tag::End {
            return Err(Error::InvalidTag(Tag::End as u8));
        }
        if !self.items.is_empty() && tag != self.tag {
            return Err(Error::TypeMismatch(self.tag, tag));
        }
        Ok(())
    }

    /// Appends an element.
    ///
    /// Fails with [`Error::TypeMismatch`] when the element's tag differs from
    /// the list's, and with [`Error::InvalidTag`] for [`Node::End`].
    pub fn push(&mut self, node: impl Into<Node>) -> Result<()> {
        let node = node.into();
        self.admit(&node)?;
        self.tag = node.tag();
        self.items.push(node);
        Ok(())
    }

    /// Appends an element without checking its tag.
    ///
    /// The caller guarantees the element has the list's tag (or is the first
    /// element and not End). Breaking that makes the list unwritable: the
    /// writer reports [`Error::TypeMismatch`] for it.
    #[inline]
    pub fn push_unchecked(&mut self, node: Node) {
        debug_assert!(self.admit(&node).is_ok());
        if self.items.is_empty() {
            self.tag = node.tag();
        }
        self.items.push(node);
    }

    /// Inserts an element at `index`, shifting later elements.
    ///
    /// Fails with [`Error::InvalidLength`] if `index > len`.
    pub fn insert(&mut self, index: usize, node: impl Into<Node>) -> Result<()> {
        if index > self.items.len() {
            return Err(Error::InvalidLength(index as i64));
        }
        let node = node.into();
        self.admit(&node)?;
        self.tag = node.tag();
        self.items.insert(index, node);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Node> {
        let node = self.items.pop();
        self.reset_if_empty();
        node
    }

    /// Removes and returns the element at `index`, or `None` when out of
    /// bounds.
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        if index >= self.items.len() {
            return None;
        }
        let node = self.items.remove(index);
        self.reset_if_empty();
        Some(node)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.tag = Tag::End;
    }

    #[inline]
    fn reset_if_empty(&mut self) {
        if self.items.is_empty() {
            self.tag = Tag::End;
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    /// A mutable handle on one element. Replacing the element through the
    /// handle only accepts nodes of the list's tag.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<NodeMut<'_>> {
        self.items
            .get_mut(index)
            .map(|node| NodeMut::with_slot(node, Slot::Element))
    }

    /// Raw element access for views, which carry the slot rules themselves.
    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = NodeMut<'_>> {
        self.items
            .iter_mut()
            .map(|node| NodeMut::with_slot(node, Slot::Element))
    }

    /// Iterates the payloads as `T`, checking the element tag once.
    ///
    /// An empty list matches every `T`.
    pub fn typed<T: NbtType>(&self) -> Result<impl Iterator<Item = &T::Payload>> {
        if !self.items.is_empty() && self.tag != T::TAG {
            return Err(Error::TypeMismatch(T::TAG, self.tag));
        }
        Ok(self.items.iter().filter_map(T::payload))
    }

    #[inline]
    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Node> {
        self.items
    }
}

impl Index<usize> for List {
    type Output = Node;

    #[inline]
    fn index(&self, index: usize) -> &Node {
        &self.items[index]
    }
}

impl TryFrom<Vec<Node>> for List {
    type Error = Error;

    fn try_from(nodes: Vec<Node>) -> Result<Self> {
        List::from_nodes(nodes)
    }
}

impl IntoIterator for List {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
