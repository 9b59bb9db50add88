// Shared engine behind TreeList and SubList.
//
// A span is the shared tree plus the chain of windows addressing it,
// innermost first. A list has no window and spans the whole tree. A view
// has its own window followed by the windows of the views it was carved
// from, mutations through a view keep all of them current.

use std::{
    cell::RefCell,
    cmp::Ordering,
    hash::{Hash, Hasher},
    ops::{Bound, RangeBounds},
    rc::Rc as Ref,
};

use crate::{
    iter::ListIter,
    node::{Handle, NIL},
    sublist::SubList,
    tree::{Deleted, Tree},
    Error, Result,
};

pub type Shared<T> = Ref<RefCell<Tree<T>>>;

pub type Windows = Vec<Ref<RefCell<Window>>>;

/// Bookkeeping for a view: position, size and boundary nodes, valid as
/// long as `mod_count` matches the tree.
#[derive(Clone, Copy, Debug)]
pub struct Window {
    pub offset: usize,
    pub size: usize,
    pub mod_count: u64,
    pub min: Handle,
    pub max: Handle,
}

impl Window {
    /// Window over the entire tree.
    pub fn whole<T>(tree: &Tree<T>) -> Window {
        Window {
            offset: 0,
            size: tree.len(),
            mod_count: tree.mod_count(),
            min: tree.min(),
            max: tree.max(),
        }
    }

    // `node` was just inserted inside this window. When its element ties
    // `max` it lands after the whole run of equals, the window then grows
    // by one node past `max`, which is either `node` or an equal element.
    fn extend<T>(&mut self, tree: &Tree<T>, node: Handle, ties_max: bool) {
        if self.size == 0 {
            self.min = node;
            self.max = node;
        } else if ties_max || tree.predecessor(node) == self.max {
            self.max = tree.successor(self.max);
        } else if tree.successor(node) == self.min {
            self.min = node;
        }
        self.size += 1;
        self.mod_count = tree.mod_count();
    }

    // `node`, inside this window, is about to be deleted.
    fn shrink<T>(&mut self, tree: &Tree<T>, node: Handle) {
        if self.size == 1 {
            self.min = NIL;
            self.max = NIL;
        } else {
            if self.max == node {
                self.max = tree.predecessor(node);
            }
            if self.min == node {
                self.min = tree.successor(node);
            }
        }
        self.size -= 1;
    }

    fn settle<T>(&mut self, tree: &Tree<T>, deleted: &Deleted<T>) {
        self.min = deleted.remap(self.min);
        self.max = deleted.remap(self.max);
        self.mod_count = tree.mod_count();
    }
}

/// Fail when `mod_count`, cached by an iterator or view, lags the tree.
pub fn check_fresh<T>(tree: &Tree<T>, mod_count: u64) -> Result<()> {
    if tree.mod_count() == mod_count {
        Ok(())
    } else {
        log::debug!("stale access {} != {}", mod_count, tree.mod_count());
        err_at!(
            ConcurrentModification, msg: "list modified, {} != {}", mod_count,
            tree.mod_count()
        )
    }
}

pub fn check_index(index: usize, size: usize) -> Result<()> {
    if index < size {
        Ok(())
    } else {
        err_at!(IndexOutOfBounds, msg: "index {} >= size {}", index, size)
    }
}

/// Nodes covered by a window, in order.
pub struct Walk<'a, T> {
    tree: &'a Tree<T>,
    node: Handle,
    remaining: usize,
}

impl<'a, T> Walk<'a, T> {
    pub fn new(tree: &'a Tree<T>, window: &Window) -> Walk<'a, T> {
        Walk {
            tree,
            node: window.min,
            remaining: window.size,
        }
    }
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        if self.remaining == 0 || self.node.is_nil() {
            return None;
        }
        let node = self.node;
        self.node = self.tree.successor(node);
        self.remaining -= 1;
        Some(node)
    }
}

pub fn collect<T: Clone>(tree: &Tree<T>, window: &Window) -> Vec<T> {
    Walk::new(tree, window)
        .map(|node| tree.item(node).clone())
        .collect()
}

/// First position holding an element equal, by `PartialEq`, to `item`.
pub fn index_of<T: PartialEq>(tree: &Tree<T>, window: &Window, item: &T) -> Option<usize> {
    Walk::new(tree, window).position(|node| tree.item(node) == item)
}

/// Last position holding an element equal to `item`, scans past the whole
/// run of duplicates.
pub fn last_index_of<T: PartialEq>(
    tree: &Tree<T>,
    window: &Window,
    item: &T,
) -> Option<usize> {
    let mut found = None;
    for (index, node) in Walk::new(tree, window).enumerate() {
        if tree.item(node) == item {
            found = Some(index);
        }
    }
    found
}

/// Count the leading elements less than `probe`, or less than or equal to
/// it when `inclusive`.
pub fn rank<T>(tree: &Tree<T>, window: &Window, probe: &T, inclusive: bool) -> Result<usize> {
    let mut n = 0;
    for node in Walk::new(tree, window) {
        match tree.compare(probe, node)? {
            Ordering::Greater => n += 1,
            Ordering::Equal if inclusive => n += 1,
            _ => break,
        }
    }
    Ok(n)
}

/// Delete `node` from the tree, keeping every window in `windows`
/// consistent. `node` must lie inside all of them.
pub fn unlink<T>(tree: &mut Tree<T>, windows: &[Ref<RefCell<Window>>], node: Handle) -> Deleted<T> {
    for window in windows.iter() {
        window.borrow_mut().shrink(tree, node);
    }
    let deleted = tree.delete(node);
    for window in windows.iter() {
        window.borrow_mut().settle(tree, &deleted);
    }
    deleted
}

/// Nodes of `window` for which `f` returns false, in order.
pub fn rejects<T, F>(tree: &Tree<T>, window: &Window, mut f: F) -> Vec<Handle>
where
    F: FnMut(&T) -> bool,
{
    Walk::new(tree, window)
        .filter(|node| !f(tree.item(*node)))
        .collect()
}

/// Delete `nodes`, listed in order, keeping every window in `windows`
/// consistent. Return the number of deleted elements.
pub fn unlink_all<T>(
    tree: &mut Tree<T>,
    windows: &[Ref<RefCell<Window>>],
    mut nodes: Vec<Handle>,
) -> usize {
    for i in 0..nodes.len() {
        let deleted = unlink(tree, windows, nodes[i]);
        // only the in-order next node can be relocated.
        if let Some(next) = nodes.get_mut(i + 1) {
            *next = deleted.remap(*next);
        }
    }
    nodes.len()
}

pub struct Span<T> {
    pub tree: Shared<T>,
    pub windows: Windows, // innermost first, empty for a list.
}

impl<T> Span<T> {
    pub fn new(tree: Tree<T>) -> Span<T> {
        Span {
            tree: Ref::new(RefCell::new(tree)),
            windows: Windows::default(),
        }
    }

    #[inline]
    pub fn is_view(&self) -> bool {
        !self.windows.is_empty()
    }

    /// Current window of this span, fails if the span is a stale view.
    pub fn bounds(&self, tree: &Tree<T>) -> Result<Window> {
        match self.windows.first() {
            None => Ok(Window::whole(tree)),
            Some(window) => {
                let window = *window.borrow();
                check_fresh(tree, window.mod_count)?;
                Ok(window)
            }
        }
    }

    pub fn len(&self) -> Result<usize> {
        let tree = self.tree.borrow();
        Ok(self.bounds(&tree)?.size)
    }

    // locate `item` within this span, short-circuit on the view's bounds.
    fn search(&self, tree: &Tree<T>, window: &Window, item: &T) -> Result<Option<Handle>> {
        if !self.is_view() {
            return tree.search(item);
        }
        if window.size == 0 {
            return Ok(None);
        }

        let low = tree.compare(item, window.min)?;
        let high = tree.compare(item, window.max)?;
        match (low, high) {
            (Ordering::Less, _) | (_, Ordering::Greater) => Ok(None),
            (Ordering::Equal, _) => Ok(Some(window.min)),
            (_, Ordering::Equal) => Ok(Some(window.max)),
            _ => tree.search(item),
        }
    }

    // an empty view takes `item` only if it sorts right at the view's
    // position, else `item` must lie within the view's first and last.
    fn check_position(&self, tree: &Tree<T>, window: &Window, item: &T) -> Result<()> {
        let ok = match window.size {
            0 => {
                let before = match window.offset {
                    0 => NIL,
                    offset => tree.nth(offset - 1),
                };
                let after = match before.is_nil() {
                    true => tree.min(),
                    false => tree.successor(before),
                };
                (before.is_nil() || tree.compare(item, before)? != Ordering::Less)
                    && (after.is_nil() || tree.compare(item, after)? == Ordering::Less)
            }
            _ => {
                tree.compare(item, window.min)? != Ordering::Less
                    && tree.compare(item, window.max)? != Ordering::Greater
            }
        };

        match ok {
            true => Ok(()),
            false => err_at!(
                InvalidArgument, msg: "element outside view at {}..{}", window.offset,
                window.offset + window.size
            ),
        }
    }
}

/// Read API.
impl<T> Span<T> {
    pub fn contains(&self, item: &T) -> Result<bool> {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        Ok(self.search(&tree, &window, item)?.is_some())
    }

    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        check_index(index, window.size)?;
        Ok(tree.item(tree.nth(window.offset + index)).clone())
    }

    pub fn first(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        Ok(Walk::new(&tree, &window).next().map(|n| tree.item(n).clone()))
    }

    pub fn last(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        match window.size {
            0 => Ok(None),
            _ => Ok(Some(tree.item(window.max).clone())),
        }
    }

    pub fn index_of(&self, item: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        Ok(index_of(&tree, &window, item))
    }

    pub fn last_index_of(&self, item: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        Ok(last_index_of(&tree, &window, item))
    }

    pub fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        Ok(collect(&tree, &window))
    }

    /// Compare, element by element, with the span `other`.
    pub fn equals(&self, other: &Span<T>) -> Result<bool>
    where
        T: PartialEq,
    {
        let (a, b) = (self.tree.borrow(), other.tree.borrow());
        let (wa, wb) = (self.bounds(&a)?, other.bounds(&b)?);
        Ok(wa.size == wb.size
            && Walk::new(&a, &wa)
                .zip(Walk::new(&b, &wb))
                .all(|(x, y)| a.item(x) == b.item(y)))
    }

    pub fn equals_slice(&self, other: &[T]) -> Result<bool>
    where
        T: PartialEq,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        Ok(window.size == other.len()
            && Walk::new(&tree, &window)
                .zip(other.iter())
                .all(|(x, y)| tree.item(x) == y))
    }

    /// Feed the length followed by the elements, in order, into `state`.
    pub fn hash_items<H>(&self, state: &mut H) -> Result<()>
    where
        T: Hash,
        H: Hasher,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        state.write_usize(window.size);
        for node in Walk::new(&tree, &window) {
            tree.item(node).hash(state);
        }
        Ok(())
    }

    /// Iterator positioned before the element at `index`.
    pub fn iter_at(&self, index: usize) -> Result<ListIter<T>> {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        if index > window.size {
            return err_at!(IndexOutOfBounds, msg: "position {} > size {}", index, window.size);
        }
        let (shared, windows) = (Ref::clone(&self.tree), self.windows.clone());
        Ok(ListIter::start(shared, windows, &tree, &window, index))
    }
}

/// Write API.
impl<T> Span<T> {
    pub fn add(&self, item: T) -> Result<bool> {
        let mut tree = self.tree.borrow_mut();
        let window = self.bounds(&tree)?;
        let mut ties = Vec::with_capacity(self.windows.len());
        if self.is_view() {
            self.check_position(&tree, &window, &item)?;
            for window in self.windows.iter() {
                let window = *window.borrow();
                let tie = window.size > 0 && tree.compare(&item, window.max)? == Ordering::Equal;
                ties.push(tie);
            }
        }
        let node = tree.insert(item)?;
        for (window, tie) in self.windows.iter().zip(ties.into_iter()) {
            window.borrow_mut().extend(&tree, node, tie);
        }
        Ok(true)
    }

    pub fn remove(&self, item: &T) -> Result<bool> {
        let mut tree = self.tree.borrow_mut();
        let window = self.bounds(&tree)?;
        match self.search(&tree, &window, item)? {
            Some(node) => {
                unlink(&mut tree, &self.windows, node);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove_at(&self, index: usize) -> Result<T> {
        let mut tree = self.tree.borrow_mut();
        let window = self.bounds(&tree)?;
        check_index(index, window.size)?;
        let node = tree.nth(window.offset + index);
        Ok(unlink(&mut tree, &self.windows, node).item)
    }

    /// `f` runs while the list is borrowed for reading, it can read this
    /// list and its views but must not modify them.
    pub fn retain<F>(&self, f: F) -> Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let nodes = {
            let tree = self.tree.borrow();
            let window = self.bounds(&tree)?;
            rejects(&tree, &window, f)
        };
        let mut tree = self.tree.borrow_mut();
        self.bounds(&tree)?;
        Ok(unlink_all(&mut tree, &self.windows, nodes))
    }

    pub fn clear(&self) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let window = self.bounds(&tree)?;
        if self.is_view() {
            let nodes = Walk::new(&tree, &window).collect();
            unlink_all(&mut tree, &self.windows, nodes);
        } else {
            tree.clear();
        }
        Ok(())
    }
}

/// View API.
impl<T> Span<T> {
    /// View over positions `from..to` of this span.
    pub fn slice(&self, from: usize, to: usize) -> Result<SubList<T>> {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        self.carve(&tree, &window, from, to)
    }

    pub fn head(&self, to: &T, inclusive: bool) -> Result<SubList<T>> {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        let to = rank(&tree, &window, to, inclusive)?;
        self.carve(&tree, &window, 0, to)
    }

    pub fn tail(&self, from: &T, inclusive: bool) -> Result<SubList<T>> {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        let from = rank(&tree, &window, from, !inclusive)?;
        self.carve(&tree, &window, from, window.size)
    }

    pub fn range<R>(&self, range: R) -> Result<SubList<T>>
    where
        R: RangeBounds<T>,
    {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;

        let low = match range.start_bound() {
            Bound::Included(low) | Bound::Excluded(low) => Some(low),
            Bound::Unbounded => None,
        };
        let high = match range.end_bound() {
            Bound::Included(high) | Bound::Excluded(high) => Some(high),
            Bound::Unbounded => None,
        };
        if let (Some(low), Some(high)) = (low, high) {
            if tree.comparator().compare(low, high)? == Ordering::Greater {
                return err_at!(InvalidArgument, msg: "range start is after range end");
            }
        }

        let from = match range.start_bound() {
            Bound::Included(low) => rank(&tree, &window, low, false)?,
            Bound::Excluded(low) => rank(&tree, &window, low, true)?,
            Bound::Unbounded => 0,
        };
        let to = match range.end_bound() {
            Bound::Included(high) => rank(&tree, &window, high, true)?,
            Bound::Excluded(high) => rank(&tree, &window, high, false)?,
            Bound::Unbounded => window.size,
        };
        self.carve(&tree, &window, from, to.max(from))
    }

    /// View over the least elements greater than or equal to `item`.
    pub fn ceiling(&self, item: &T) -> Result<Option<SubList<T>>> {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        let from = rank(&tree, &window, item, false)?;
        if from == window.size {
            return Ok(None);
        }
        let first = tree.advance(window.min, from);
        let to = rank(&tree, &window, tree.item(first), true)?;
        Ok(Some(self.carve(&tree, &window, from, to)?))
    }

    /// View over the greatest elements less than or equal to `item`.
    pub fn floor(&self, item: &T) -> Result<Option<SubList<T>>> {
        let tree = self.tree.borrow();
        let window = self.bounds(&tree)?;
        let to = rank(&tree, &window, item, true)?;
        if to == 0 {
            return Ok(None);
        }
        let last = tree.advance(window.min, to - 1);
        let from = rank(&tree, &window, tree.item(last), false)?;
        Ok(Some(self.carve(&tree, &window, from, to)?))
    }

    fn carve(&self, tree: &Tree<T>, window: &Window, from: usize, to: usize) -> Result<SubList<T>> {
        if from > to || to > window.size {
            return err_at!(
                IndexOutOfBounds, msg: "sub-list {}..{} of size {}", from, to, window.size
            );
        }

        let (min, max) = match from == to {
            true => (NIL, NIL),
            false => {
                let min = tree.advance(window.min, from);
                (min, tree.advance(min, to - from - 1))
            }
        };
        let sub = Window {
            offset: window.offset + from,
            size: to - from,
            mod_count: tree.mod_count(),
            min,
            max,
        };
        log::debug!(
            "view {}..{} over {} elements, depth {}",
            sub.offset,
            sub.offset + sub.size,
            tree.len(),
            self.windows.len() + 1
        );

        let mut windows = vec![Ref::new(RefCell::new(sub))];
        windows.extend(self.windows.iter().cloned());
        let span = Span {
            tree: Ref::clone(&self.tree),
            windows,
        };
        Ok(SubList::new(span))
    }
}

#[cfg(test)]
#[path = "span_test.rs"]
mod span_test;
