//! Module implement live range views over a [TreeList](crate::TreeList).

use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::RangeBounds,
};

use crate::{
    comparator::Comparator,
    iter::ListIter,
    list::{SortedSource, TreeList},
    span::Span,
    Error, Result,
};

/// Live window over a contiguous run of a [TreeList](crate::TreeList).
///
/// A view does not own elements, it shares the list's nodes. Changes made
/// through the view are visible in the list and in the views it was carved
/// from. A view knows its position, size and boundary elements; any
/// structural change to the list that does not go through the view makes
/// it stale, and every later operation fails with
/// [Error::ConcurrentModification].
///
/// Views can be narrowed further, the narrower view is again a [SubList].
///
/// Elements added to a view must land inside it: a non empty view takes
/// elements between its first and last element, an empty view takes
/// elements that sort right at its position.
pub struct SubList<T> {
    pub(crate) span: Span<T>,
}

impl<T> SubList<T> {
    pub(crate) fn new(span: Span<T>) -> SubList<T> {
        SubList { span }
    }

    /// Return the comparator of the backing list.
    pub fn comparator(&self) -> Comparator<T> {
        self.span.tree.borrow().comparator().clone()
    }

    /// Return number of elements in this view.
    pub fn len(&self) -> Result<usize> {
        self.span.len()
    }

    /// Check whether this view is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.span.len()? == 0)
    }

    /// Return whether this view can still be used.
    pub fn is_stale(&self) -> bool {
        self.span.len().is_err()
    }
}

/// Write API.
impl<T> SubList<T> {
    /// Insert `item` into the backing list. `item` must sort inside this
    /// view, else fails with [Error::InvalidArgument].
    pub fn add(&mut self, item: T) -> Result<bool> {
        self.span.add(item)
    }

    /// Insert every element from `items`, stops at the first failure.
    pub fn extend<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.span.add(item)?;
        }
        Ok(())
    }

    /// Not supported, the sort order decides the position.
    pub fn add_at(&mut self, index: usize, _item: T) -> Result<()> {
        err_at!(Unsupported, msg: "add() at index {} of a sorted view", index)
    }

    /// Not supported, the sort order decides the position.
    pub fn add_all_at<I>(&mut self, index: usize, _items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        err_at!(Unsupported, msg: "add_all() at index {} of a sorted view", index)
    }

    /// Not supported, the sort order decides the position.
    pub fn set(&mut self, index: usize, _item: T) -> Result<T> {
        err_at!(Unsupported, msg: "set() at index {} of a sorted view", index)
    }

    /// Remove one element of this view that compares equal to `item`.
    pub fn remove(&mut self, item: &T) -> Result<bool> {
        self.span.remove(item)
    }

    /// Remove and return the element at `index`, relative to this view.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.span.remove_at(index)
    }

    /// Keep only the elements for which `f` returns true, return the number
    /// of removed elements. `f` can read this list and its views, but must
    /// not modify them.
    pub fn retain<F>(&mut self, f: F) -> Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.span.retain(f)
    }

    /// Remove every element of this view from the backing list.
    pub fn clear(&mut self) -> Result<()> {
        self.span.clear()
    }
}

/// Read API.
impl<T> SubList<T> {
    /// Return whether an element of this view compares equal to `item`.
    pub fn contains(&self, item: &T) -> Result<bool> {
        self.span.contains(item)
    }

    pub fn contains_all<'a, I>(&self, items: I) -> Result<bool>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for item in items {
            if !self.span.contains(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Return the element at `index`, relative to this view.
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.span.get(index)
    }

    pub fn first(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        self.span.first()
    }

    pub fn last(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        self.span.last()
    }

    pub fn index_of(&self, item: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.span.index_of(item)
    }

    pub fn last_index_of(&self, item: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.span.last_index_of(item)
    }

    pub fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.span.to_vec()
    }

    /// Iterator starting before the first element of this view.
    pub fn iter(&self) -> Result<ListIter<T>> {
        self.span.iter_at(0)
    }

    /// Iterator starting before the element at `index`.
    pub fn list_iter(&self, index: usize) -> Result<ListIter<T>> {
        self.span.iter_at(index)
    }

    /// Compare with another view, element by element.
    pub fn equals(&self, other: &SubList<T>) -> Result<bool>
    where
        T: PartialEq,
    {
        self.span.equals(&other.span)
    }

    /// Compare with a list, element by element.
    pub fn equals_list(&self, other: &TreeList<T>) -> Result<bool>
    where
        T: PartialEq,
    {
        self.span.equals(&other.span)
    }

    /// Compare with a slice, element by element.
    pub fn equals_slice(&self, other: &[T]) -> Result<bool>
    where
        T: PartialEq,
    {
        self.span.equals_slice(other)
    }

    /// Hash the elements of this view in order. An equal list, or view,
    /// feeds the same sequence into `state`.
    pub fn hash_items<H>(&self, state: &mut H) -> Result<()>
    where
        T: Hash,
        H: Hasher,
    {
        self.span.hash_items(state)
    }
}

/// View API, same semantics as the list's, relative to this view.
impl<T> SubList<T> {
    pub fn sub_list(&self, from: usize, to: usize) -> Result<SubList<T>> {
        self.span.slice(from, to)
    }

    pub fn head_list(&self, to: &T, inclusive: bool) -> Result<SubList<T>> {
        self.span.head(to, inclusive)
    }

    pub fn tail_list(&self, from: &T, inclusive: bool) -> Result<SubList<T>> {
        self.span.tail(from, inclusive)
    }

    pub fn range<R>(&self, range: R) -> Result<SubList<T>>
    where
        R: RangeBounds<T>,
    {
        self.span.range(range)
    }

    pub fn ceiling(&self, item: &T) -> Result<Option<SubList<T>>> {
        self.span.ceiling(item)
    }

    pub fn floor(&self, item: &T) -> Result<Option<SubList<T>>> {
        self.span.floor(item)
    }
}

impl<T> SortedSource<T> for SubList<T>
where
    T: Clone,
{
    fn comparator(&self) -> Comparator<T> {
        SubList::comparator(self)
    }

    fn items(&self) -> Result<Vec<T>> {
        self.span.to_vec()
    }
}

impl<T> fmt::Debug for SubList<T>
where
    T: fmt::Debug + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.span.to_vec() {
            Ok(items) => f.debug_list().entries(items.iter()).finish(),
            Err(_) => write!(f, "SubList<stale>"),
        }
    }
}

#[cfg(test)]
#[path = "sublist_test.rs"]
mod sublist_test;
