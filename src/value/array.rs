use std::{
    fmt,
    hash::Hash,
    ops::{Deref, DerefMut},
};

use crate::{Error, Result, Scalar, Tag};

mod private {
    pub trait Sealed {}
    impl Sealed for i8 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// Element types that have a native NBT array tag.
pub trait ArrayElement:
    private::Sealed + Scalar + Eq + Hash + Default + fmt::Debug
{
    /// The array tag carrying elements of this type.
    const ARRAY_TAG: Tag;
}

impl ArrayElement for i8 {
    const ARRAY_TAG: Tag = Tag::ByteArray;
}

impl ArrayElement for i32 {
    const ARRAY_TAG: Tag = Tag::IntArray;
}

impl ArrayElement for i64 {
    const ARRAY_TAG: Tag = Tag::LongArray;
}

/// An owned, contiguous run of fixed-width integers.
///
/// Unlike a [`List`](crate::List) of numbers there is no per-element tag: the
/// wire form is a 4-byte count followed by the raw elements.
///
/// The slice API is available through `Deref`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Array<T: ArrayElement> {
    data: Vec<T>,
}

pub type ByteArray = Array<i8>;
pub type IntArray = Array<i32>;
pub type LongArray = Array<i64>;

impl<T: ArrayElement> Array<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// The tag an array of this element type is written with.
    #[inline]
    pub const fn tag(&self) -> Tag {
        T::ARRAY_TAG
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Inserts `value` at `index`, shifting later elements.
    ///
    /// Fails with [`Error::InvalidLength`] if `index > len`.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.data.len() {
            return Err(Error::InvalidLength(index as i64));
        }
        self.data.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, or `None` when out of
    /// bounds.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.data.len()).then(|| self.data.remove(index))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: ArrayElement> Deref for Array<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T: ArrayElement> DerefMut for Array<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: ArrayElement> From<Vec<T>> for Array<T> {
    #[inline]
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: ArrayElement> From<&[T]> for Array<T> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<T: ArrayElement> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T: ArrayElement> Extend<T> for Array<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl<T: ArrayElement> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T: ArrayElement> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: ArrayElement> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
