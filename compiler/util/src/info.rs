use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A syntax node (or any other value) tagged with its position in the source.
///
/// Passes copy `info` onto the nodes they synthesize and never inspect it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithInfo<I, T> {
    /// Where the item came from, in whatever form the driver chooses.
    pub info: I,

    /// The tagged value.
    pub item: T,
}

impl<I, T> WithInfo<I, T> {
    /// Tag `item` with `info`.
    pub fn new(info: I, item: T) -> Self {
        WithInfo { info, item }
    }

    /// Rebuild the item, keeping its position.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithInfo<I, U> {
        WithInfo {
            info: self.info,
            item: f(self.item),
        }
    }

    /// Move the item onto the heap, for recursive nodes.
    pub fn boxed(self) -> WithInfo<I, Box<T>> {
        self.map(Box::new)
    }

    /// Tag a different item with this item's position.
    pub fn replace<U>(&self, new: U) -> WithInfo<I, U>
    where
        I: Clone,
    {
        WithInfo {
            info: self.info.clone(),
            item: new,
        }
    }

    /// Borrow the item. Used when analyzing a tree without consuming it.
    pub fn as_ref(&self) -> WithInfo<I, &T>
    where
        I: Clone,
    {
        WithInfo {
            info: self.info.clone(),
            item: &self.item,
        }
    }

    /// Borrow through a box (or other pointer) around the item.
    pub fn as_deref<'a>(&'a self) -> WithInfo<I, &'a T::Target>
    where
        I: Clone,
        T: Deref,
        T::Target: 'a,
    {
        WithInfo {
            info: self.info.clone(),
            item: self.item.deref(),
        }
    }
}

impl<I, T> WithInfo<I, Box<T>> {
    /// Inverse of [`WithInfo::boxed`].
    pub fn unboxed(self) -> WithInfo<I, T> {
        self.map(|value| *value)
    }
}
