//! Module implement the fail-fast list iterator.

use crate::{
    node::{Handle, NIL},
    span::{self, Shared, Window, Windows},
    tree::Tree,
    Error, Result,
};

/// Bidirectional cursor over a [TreeList](crate::TreeList) or a
/// [SubList](crate::SubList).
///
/// The cursor sits between two elements. [ListIter::next_item] returns the
/// element after the cursor and moves it forward, [ListIter::previous_item]
/// returns the element before the cursor and moves it backward. Each step
/// is O(log n) worst case.
///
/// The iterator is fail-fast: any structural change to the list that is
/// not made through this iterator's own [ListIter::remove] makes every
/// later navigation or removal fail with [Error::ConcurrentModification].
///
/// As an [Iterator] it yields `Result<T>` moving forward, and stops after
/// the first error.
pub struct ListIter<T> {
    tree: Shared<T>,
    windows: Windows, // set when iterating a view.
    index: usize,     // position of cursor, relative to the view.
    next: Handle,
    prev: Handle,
    last: Handle, // node returned by the last call to next/previous.
    mod_count: u64,
    fin: bool,
}

impl<T> ListIter<T> {
    pub(crate) fn start(
        tree: Shared<T>,
        windows: Windows,
        t: &Tree<T>,
        window: &Window,
        index: usize,
    ) -> ListIter<T> {
        let at = window.offset + index;
        let next = if at < t.len() { t.nth(at) } else { NIL };
        let prev = if next.is_nil() {
            t.max()
        } else {
            t.predecessor(next)
        };

        ListIter {
            tree,
            windows,
            index,
            next,
            prev,
            last: NIL,
            mod_count: t.mod_count(),
            fin: false,
        }
    }

    fn size(&self, tree: &Tree<T>) -> usize {
        match self.windows.first() {
            Some(window) => window.borrow().size,
            None => tree.len(),
        }
    }

    /// Return whether there is an element after the cursor.
    pub fn has_next(&self) -> bool {
        self.index < self.size(&self.tree.borrow())
    }

    /// Return whether there is an element before the cursor.
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Index of the element a call to next_item() would return.
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// Index of the element a call to previous_item() would return, None
    /// at the start of the list.
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Return the element after the cursor, and move the cursor forward.
    pub fn next_item(&mut self) -> Result<T>
    where
        T: Clone,
    {
        let tree = self.tree.borrow();
        span::check_fresh(&tree, self.mod_count)?;
        if self.index >= self.size(&tree) {
            return err_at!(NoSuchElement, msg: "no element after {}", self.index);
        }

        let node = self.next;
        self.prev = node;
        self.next = tree.successor(node);
        self.last = node;
        self.index += 1;
        Ok(tree.item(node).clone())
    }

    /// Return the element before the cursor, and move the cursor backward.
    pub fn previous_item(&mut self) -> Result<T>
    where
        T: Clone,
    {
        let tree = self.tree.borrow();
        span::check_fresh(&tree, self.mod_count)?;
        if self.index == 0 {
            return err_at!(NoSuchElement, msg: "no element before 0");
        }

        let node = self.prev;
        self.next = node;
        self.prev = tree.predecessor(node);
        self.last = node;
        self.index -= 1;
        Ok(tree.item(node).clone())
    }

    /// Remove the element returned by the last call to next_item() or
    /// previous_item(). Can be called once per such call.
    pub fn remove(&mut self) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        span::check_fresh(&tree, self.mod_count)?;
        if self.last.is_nil() {
            return err_at!(IllegalState, msg: "remove() without next or previous");
        }

        let last = self.last;
        let (pred, succ) = (tree.predecessor(last), tree.successor(last));
        let deleted = span::unlink(&mut tree, &self.windows, last);
        if last == self.prev {
            self.prev = pred;
            self.index -= 1;
        } else {
            self.next = succ;
        }
        self.prev = deleted.remap(self.prev);
        self.next = deleted.remap(self.next);
        self.last = NIL;
        self.mod_count = tree.mod_count();
        Ok(())
    }

    /// Not supported, the sort order decides where elements go.
    pub fn add(&mut self, _item: T) -> Result<()> {
        err_at!(Unsupported, msg: "add() through a sorted list iterator")
    }

    /// Not supported, the sort order decides where elements go.
    pub fn set(&mut self, _item: T) -> Result<()> {
        err_at!(Unsupported, msg: "set() through a sorted list iterator")
    }
}

impl<T> Iterator for ListIter<T>
where
    T: Clone,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fin {
            return None;
        }
        let fresh = self.tree.borrow().mod_count() == self.mod_count;
        if fresh && !self.has_next() {
            return None;
        }
        let item = self.next_item();
        self.fin = item.is_err();
        Some(item)
    }
}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
