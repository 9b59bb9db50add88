//! Module provide the sorted list implemented by [TreeList] type.
//!
//! [TreeList] is implemented using a [red-black tree][wiki-rbt], with the
//! list operations layered on top:
//!
//! - Elements are ordered from least to greatest by a [Comparator].
//! - Duplicates are kept, in insertion order among themselves.
//! - add(), contains() and remove() are O(log n).
//! - get(), remove_at(), index_of() and last_index_of() are O(n), they walk
//!   the in-order chain from the minimum.
//! - Insertion at a caller chosen index, or replacement, is not supported.
//!
//! Range views:
//! ```
//! use treelist::TreeList;
//!
//! let list = TreeList::from_items(vec![10, 20, 30, 40, 50]).unwrap();
//! let head = list.head_list(&30, false).unwrap();
//! let tail = list.tail_list(&30, true).unwrap();
//! assert_eq!(head.to_vec().unwrap(), vec![10, 20]);
//! assert_eq!(tail.to_vec().unwrap(), vec![30, 40, 50]);
//!
//! let mut view = list.range(15..=40).unwrap();
//! view.add(25).unwrap();
//! assert_eq!(view.to_vec().unwrap(), vec![20, 25, 30, 40]);
//! assert_eq!(list.to_vec(), vec![10, 20, 25, 30, 40, 50]);
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{
    collections::{BTreeSet, BinaryHeap},
    fmt,
    hash::{Hash, Hasher},
    ops::RangeBounds,
};

use crate::{
    comparator::Comparator,
    iter::ListIter,
    span::{self, Span, Walk, Window},
    sublist::SubList,
    tree::Tree,
    Error, Result,
};

/// Source of elements that carries its own ordering.
///
/// [TreeList::from_sorted] builds a list that inherits the source's
/// ordering.
pub trait SortedSource<T> {
    /// Ordering of the source.
    fn comparator(&self) -> Comparator<T>;

    /// Elements of the source.
    fn items(&self) -> Result<Vec<T>>;
}

/// Sorted list, backed by a red-black tree.
///
/// Refer package level documentation for brief description.
pub struct TreeList<T> {
    pub(crate) span: Span<T>,
}

impl<T> Default for TreeList<T>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeList<T> {
    /// Create an empty list, ordered by the natural ordering of `T`.
    pub fn new() -> TreeList<T>
    where
        T: PartialOrd,
    {
        Self::with_comparator(Comparator::natural())
    }

    /// Create an empty list, ordered by `comparator`.
    pub fn with_comparator(comparator: Comparator<T>) -> TreeList<T> {
        TreeList {
            span: Span::new(Tree::new(comparator)),
        }
    }

    /// Create a list from `items`, ordered by natural ordering.
    pub fn from_items<I>(items: I) -> Result<TreeList<T>>
    where
        T: PartialOrd,
        I: IntoIterator<Item = T>,
    {
        Self::from_items_with(Comparator::natural(), items)
    }

    /// Create a list from `items`, ordered by `comparator`.
    pub fn from_items_with<I>(comparator: Comparator<T>, items: I) -> Result<TreeList<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::with_comparator(comparator);
        list.extend(items)?;
        Ok(list)
    }

    /// Create a list with the elements of `source`, ordered the same way
    /// as `source`.
    pub fn from_sorted<S>(source: &S) -> Result<TreeList<T>>
    where
        S: SortedSource<T>,
    {
        Self::from_items_with(source.comparator(), source.items()?)
    }
}

/// Maintenance API.
impl<T> TreeList<T> {
    /// Return the comparator used to order this list.
    pub fn comparator(&self) -> Comparator<T> {
        self.span.tree.borrow().comparator().clone()
    }

    /// Return number of elements in this list.
    #[inline]
    pub fn len(&self) -> usize {
        self.span.tree.borrow().len()
    }

    /// Check whether this list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.tree.borrow().is_empty()
    }

    /// Validate the backing tree, refer to red-black rules and list
    /// bookkeeping.
    pub fn validate(&self) -> Result<()>
    where
        T: fmt::Debug,
    {
        self.span.tree.borrow().validate()
    }
}

/// Write API.
impl<T> TreeList<T> {
    /// Insert `item` in sorted order, after any element equal to it.
    /// Always return true, fails only when `item` cannot be compared.
    pub fn add(&mut self, item: T) -> Result<bool> {
        self.span.add(item)
    }

    /// Insert every element from `items`. Stops at the first element that
    /// cannot be compared, elements before it stay inserted.
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
        err_at!(Unsupported, msg: "add() at index {} of a sorted list", index)
    }

    /// Not supported, the sort order decides the position.
    pub fn add_all_at<I>(&mut self, index: usize, _items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        err_at!(Unsupported, msg: "add_all() at index {} of a sorted list", index)
    }

    /// Not supported, the sort order decides the position.
    pub fn set(&mut self, index: usize, _item: T) -> Result<T> {
        err_at!(Unsupported, msg: "set() at index {} of a sorted list", index)
    }

    /// Remove one element that compares equal to `item`. Return whether an
    /// element was removed.
    pub fn remove(&mut self, item: &T) -> Result<bool> {
        self.span.remove(item)
    }

    /// Remove and return the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.span.remove_at(index)
    }

    /// Keep only the elements for which `f` returns true, return the number
    /// of removed elements. `f` can read views of this list, but must not
    /// modify them.
    pub fn retain<F>(&mut self, f: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let nodes = {
            let tree = self.span.tree.borrow();
            span::rejects(&tree, &Window::whole(&tree), f)
        };
        let mut tree = self.span.tree.borrow_mut();
        span::unlink_all(&mut tree, &[], nodes)
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.span.tree.borrow_mut().clear()
    }
}

/// Read API.
impl<T> TreeList<T> {
    /// Return whether an element compares equal to `item`.
    pub fn contains(&self, item: &T) -> Result<bool> {
        self.span.contains(item)
    }

    /// Return whether every element in `items` is present in this list.
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

    /// Return the element at `index`.
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.span.get(index)
    }

    /// Return the least element.
    pub fn first(&self) -> Option<T>
    where
        T: Clone,
    {
        let tree = self.span.tree.borrow();
        match tree.is_empty() {
            true => None,
            false => Some(tree.item(tree.min()).clone()),
        }
    }

    /// Return the greatest element.
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        let tree = self.span.tree.borrow();
        match tree.is_empty() {
            true => None,
            false => Some(tree.item(tree.max()).clone()),
        }
    }

    /// Index of the first element equal to `item`, by `PartialEq`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let tree = self.span.tree.borrow();
        span::index_of(&tree, &Window::whole(&tree), item)
    }

    /// Index of the last element equal to `item`, by `PartialEq`.
    pub fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let tree = self.span.tree.borrow();
        span::last_index_of(&tree, &Window::whole(&tree), item)
    }

    /// Return the elements in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let tree = self.span.tree.borrow();
        span::collect(&tree, &Window::whole(&tree))
    }

    /// Iterator starting before the least element.
    pub fn iter(&self) -> ListIter<T> {
        let tree = self.span.tree.borrow();
        let (shared, windows) = (self.span.tree.clone(), Vec::default());
        ListIter::start(shared, windows, &tree, &Window::whole(&tree), 0)
    }

    /// Iterator starting before the element at `index`. `index` can be
    /// equal to len(), to iterate backward from the end.
    pub fn list_iter(&self, index: usize) -> Result<ListIter<T>> {
        self.span.iter_at(index)
    }
}

/// View API.
///
/// Views are live, changes made through the list or the view are visible
/// to the other. Structural changes made to the list, other than through
/// the view, render the view stale.
impl<T> TreeList<T> {
    /// View over the elements at positions `from..to`.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<SubList<T>> {
        self.span.slice(from, to)
    }

    /// View over the elements less than `to`, or less than or equal to
    /// `to` when `inclusive`.
    pub fn head_list(&self, to: &T, inclusive: bool) -> Result<SubList<T>> {
        self.span.head(to, inclusive)
    }

    /// View over the elements greater than or equal to `from`, or strictly
    /// greater when not `inclusive`.
    pub fn tail_list(&self, from: &T, inclusive: bool) -> Result<SubList<T>> {
        self.span.tail(from, inclusive)
    }

    /// View over the elements within `range`, by value.
    pub fn range<R>(&self, range: R) -> Result<SubList<T>>
    where
        R: RangeBounds<T>,
    {
        self.span.range(range)
    }

    /// View over the least elements greater than or equal to `item`. All
    /// of them compare equal. None if there is no such element.
    pub fn ceiling(&self, item: &T) -> Result<Option<SubList<T>>> {
        self.span.ceiling(item)
    }

    /// View over the greatest elements less than or equal to `item`. All
    /// of them compare equal. None if there is no such element.
    pub fn floor(&self, item: &T) -> Result<Option<SubList<T>>> {
        self.span.floor(item)
    }
}

impl<T> SortedSource<T> for TreeList<T>
where
    T: Clone,
{
    fn comparator(&self) -> Comparator<T> {
        TreeList::comparator(self)
    }

    fn items(&self) -> Result<Vec<T>> {
        Ok(self.to_vec())
    }
}

impl<T> SortedSource<T> for BTreeSet<T>
where
    T: Ord + Clone,
{
    fn comparator(&self) -> Comparator<T> {
        Comparator::natural()
    }

    fn items(&self) -> Result<Vec<T>> {
        Ok(self.iter().cloned().collect())
    }
}

impl<T> SortedSource<T> for BinaryHeap<T>
where
    T: Ord + Clone,
{
    fn comparator(&self) -> Comparator<T> {
        Comparator::natural()
    }

    fn items(&self) -> Result<Vec<T>> {
        Ok(self.iter().cloned().collect())
    }
}

impl<T> PartialEq for TreeList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.span.tree.borrow(), other.span.tree.borrow());
        let (wa, wb) = (Window::whole(&a), Window::whole(&b));
        a.len() == b.len()
            && Walk::new(&a, &wa)
                .zip(Walk::new(&b, &wb))
                .all(|(x, y)| a.item(x) == b.item(y))
    }
}

impl<T> Eq for TreeList<T> where T: Eq {}

impl<T> PartialEq<[T]> for TreeList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &[T]) -> bool {
        let tree = self.span.tree.borrow();
        let window = Window::whole(&tree);
        tree.len() == other.len()
            && Walk::new(&tree, &window)
                .zip(other.iter())
                .all(|(x, y)| tree.item(x) == y)
    }
}

impl<T> PartialEq<Vec<T>> for TreeList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Vec<T>) -> bool {
        self == other.as_slice()
    }
}

impl<T> Hash for TreeList<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let tree = self.span.tree.borrow();
        let window = Window::whole(&tree);
        state.write_usize(tree.len());
        for node in Walk::new(&tree, &window) {
            tree.item(node).hash(state);
        }
    }
}

impl<T> fmt::Debug for TreeList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tree = self.span.tree.borrow();
        let window = Window::whole(&tree);
        f.debug_list()
            .entries(Walk::new(&tree, &window).map(|node| tree.item(node)))
            .finish()
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;
