use std::{
    collections::{BTreeMap, HashMap, btree_map, hash_map},
    hash::BuildHasher,
};

use crate::{Error, Key, NbtStr, NbtString, Node, NodeMut, Result, Tag, view::Slot};

/// Backing storage for a [`Compound`]: a map from names to nodes with
/// unique-key insert.
///
/// The map's iteration order is the order [`Writer`](crate::Writer) emits
/// entries in. [`BTreeMap`] (the default) orders them by key bytes;
/// [`HashMap`] gives an order that is fixed for one map but differs between
/// runs.
pub trait CompoundMap: Default {
    type Iter<'a>: Iterator<Item = (&'a NbtString, &'a Node)>
    where
        Self: 'a;
    type IterMut<'a>: Iterator<Item = (&'a NbtString, &'a mut Node)>
    where
        Self: 'a;
    type IntoIter: Iterator<Item = (NbtString, Node)>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &NbtStr) -> Option<&Node>;
    fn get_mut(&mut self, key: &NbtStr) -> Option<&mut Node>;
    /// Inserts or replaces, returning the replaced value.
    fn insert(&mut self, key: NbtString, value: Node) -> Option<Node>;
    fn remove(&mut self, key: &NbtStr) -> Option<Node>;
    fn clear(&mut self);
    fn iter(&self) -> Self::Iter<'_>;
    fn iter_mut(&mut self) -> Self::IterMut<'_>;
    fn into_entries(self) -> Self::IntoIter;
}

impl CompoundMap for BTreeMap<NbtString, Node> {
    type Iter<'a>
        = btree_map::Iter<'a, NbtString, Node>
    where
        Self: 'a;
    type IterMut<'a>
        = btree_map::IterMut<'a, NbtString, Node>
    where
        Self: 'a;
    type IntoIter = btree_map::IntoIter<NbtString, Node>;

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    #[inline]
    fn get(&self, key: &NbtStr) -> Option<&Node> {
        BTreeMap::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: &NbtStr) -> Option<&mut Node> {
        BTreeMap::get_mut(self, key)
    }

    #[inline]
    fn insert(&mut self, key: NbtString, value: Node) -> Option<Node> {
        BTreeMap::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: &NbtStr) -> Option<Node> {
        BTreeMap::remove(self, key)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }

    #[inline]
    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        BTreeMap::iter_mut(self)
    }

    #[inline]
    fn into_entries(self) -> Self::IntoIter {
        IntoIterator::into_iter(self)
    }
}

impl<S: BuildHasher + Default> CompoundMap for HashMap<NbtString, Node, S> {
    type Iter<'a>
        = hash_map::Iter<'a, NbtString, Node>
    where
        Self: 'a;
    type IterMut<'a>
        = hash_map::IterMut<'a, NbtString, Node>
    where
        Self: 'a;
    type IntoIter = hash_map::IntoIter<NbtString, Node>;

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    #[inline]
    fn get(&self, key: &NbtStr) -> Option<&Node> {
        HashMap::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: &NbtStr) -> Option<&mut Node> {
        HashMap::get_mut(self, key)
    }

    #[inline]
    fn insert(&mut self, key: NbtString, value: Node) -> Option<Node> {
        HashMap::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: &NbtStr) -> Option<Node> {
        HashMap::remove(self, key)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }

    #[inline]
    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        HashMap::iter_mut(self)
    }

    #[inline]
    fn into_entries(self) -> Self::IntoIter {
        IntoIterator::into_iter(self)
    }
}

/// A mapping from names to nodes with unique keys.
///
/// With the default storage, entries are kept sorted by their Modified UTF-8
/// key bytes, which is also the order the writer emits them in, so encoding
/// the same compound twice gives identical bytes.
///
/// Compounds inside a [`Node`] always use the default storage. Other
/// [`CompoundMap`]s serve as root entry collections, see
/// [`Reader::decode_entries_into`](crate::Reader::decode_entries_into) and
/// [`Writer::encode_entries`](crate::Writer::encode_entries).
///
/// ```
/// use std::collections::HashMap;
///
/// use nbtree::{Compound, NbtString, Node};
///
/// let mut entries = Compound::<HashMap<NbtString, Node>>::default();
/// entries.insert("x", 1i32).unwrap();
/// assert_eq!(entries.get("x"), Some(&Node::Int(1)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound<M = BTreeMap<NbtString, Node>> {
    entries: M,
}

impl Compound {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builds a compound from entries; later duplicates replace earlier ones.
    pub fn from_entries<K, V, I>(entries: I) -> Result<Self>
    where
        K: Into<NbtString>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut compound = Compound::new();
        for (key, value) in entries {
            compound.insert(key, value)?;
        }
        Ok(compound)
    }
}

impl<M: CompoundMap> Compound<M> {
    /// Wraps caller-supplied storage. Fails if the map already holds
    /// [`Node::End`] under some key.
    pub fn from_map(entries: M) -> Result<Self> {
        if entries.iter().any(|(_, value)| value.is_end()) {
            return Err(Error::InvalidTag(Tag::End as u8));
        }
        Ok(Self { entries })
    }

    #[inline]
    pub fn into_map(self) -> M {
        self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or replaces an entry, returning the value it replaced.
    ///
    /// [`Node::End`] cannot be stored in a compound since End terminates a
    /// compound on the wire; it is rejected with [`Error::InvalidTag`].
    ///
    /// ```
    /// use nbtree::{Compound, Node};
    ///
    /// let mut compound = Compound::new();
    /// assert_eq!(compound.insert("x", 1i32).unwrap(), None);
    /// assert_eq!(compound.insert("x", 2i32).unwrap(), Some(Node::Int(1)));
    /// assert_eq!(compound.get("x"), Some(&Node::Int(2)));
    /// assert!(compound.insert("y", Node::End).is_err());
    /// ```
    pub fn insert(
        &mut self,
        key: impl Into<NbtString>,
        value: impl Into<Node>,
    ) -> Result<Option<Node>> {
        let value = value.into();
        if value.is_end() {
            return Err(Error::InvalidTag(Tag::End as u8));
        }
        Ok(self.entries.insert(key.into(), value))
    }

    /// Reader fast path: the value was produced by the decoder and is never End.
    #[inline]
    pub(crate) fn insert_decoded(&mut self, key: NbtString, value: Node) -> Option<Node> {
        self.entries.insert(key, value)
    }

    #[inline]
    pub fn get<K: Key + ?Sized>(&self, key: &K) -> Option<&Node> {
        self.entries.get(&key.to_key())
    }

    /// A mutable handle on one value. The handle refuses to turn the value
    /// into [`Node::End`].
    #[inline]
    pub fn get_mut<K: Key + ?Sized>(&mut self, key: &K) -> Option<NodeMut<'_>> {
        self.entries
            .get_mut(&key.to_key())
            .map(|node| NodeMut::with_slot(node, Slot::Entry))
    }

    #[inline]
    pub(crate) fn slot_mut<K: Key + ?Sized>(&mut self, key: &K) -> Option<&mut Node> {
        self.entries.get_mut(&key.to_key())
    }

    #[inline]
    pub fn contains_key<K: Key + ?Sized>(&self, key: &K) -> bool {
        self.entries.get(&key.to_key()).is_some()
    }

    #[inline]
    pub fn remove<K: Key + ?Sized>(&mut self, key: &K) -> Option<Node> {
        self.entries.remove(&key.to_key())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn iter(&self) -> M::Iter<'_> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&NbtString, NodeMut<'_>)> {
        self.entries
            .iter_mut()
            .map(|(key, node)| (key, NodeMut::with_slot(node, Slot::Entry)))
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &NbtString> {
        self.entries.iter().map(|(key, _)| key)
    }

    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Moves every entry of `other` into `self`, replacing values on key
    /// collisions.
    pub fn merge<N: CompoundMap>(&mut self, other: Compound<N>) {
        for (key, value) in other {
            self.entries.insert(key, value);
        }
    }
}

impl<M: CompoundMap> IntoIterator for Compound<M> {
    type Item = (NbtString, Node);
    type IntoIter = M::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_entries()
    }
}

impl<'a, M: CompoundMap> IntoIterator for &'a Compound<M> {
    type Item = (&'a NbtString, &'a Node);
    type IntoIter = M::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
