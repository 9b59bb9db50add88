//! Module implement the red-black tree backing [TreeList](crate::TreeList).
//!
//! Nodes live in an arena and refer to each other through handles. A single
//! sentinel node, [NIL], stands for every leaf and for the parent of root,
//! so rotation and fix-up code never special cases absent children.
//!
//! Elements that compare equal are kept in insertion order: descent goes
//! left only when the new element is strictly less, hence a duplicate always
//! lands as the right descendant of the last equal node on its path.

use std::{cmp::Ordering, fmt, mem};

use crate::{
    comparator::Comparator,
    node::{Arena, Handle, Node, NIL},
    Error, Result,
};

/// Outcome of [Tree::delete].
pub struct Deleted<T> {
    /// Element that was removed from the tree.
    pub item: T,
    /// When the removed node had two children, its successor's element is
    /// moved into it and the successor's node is unlinked instead. This is
    /// `(from, to)`, handles pointing at `from` must now point at `to`.
    pub relocated: Option<(Handle, Handle)>,
}

impl<T> Deleted<T> {
    /// Translate a handle held across the delete.
    #[inline]
    pub fn remap(&self, handle: Handle) -> Handle {
        match self.relocated {
            Some((from, to)) if from == handle => to,
            _ => handle,
        }
    }
}

pub struct Tree<T> {
    arena: Arena<T>,
    root: Handle,
    min: Handle,
    max: Handle,
    n_count: usize,  // number of elements in the tree.
    mod_count: u64,  // bumped on every structural change.
    comparator: Comparator<T>,
}

impl<T> Tree<T> {
    pub fn new(comparator: Comparator<T>) -> Tree<T> {
        Tree {
            arena: Arena::new(),
            root: NIL,
            min: NIL,
            max: NIL,
            n_count: Default::default(),
            mod_count: Default::default(),
            comparator,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    #[inline]
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    #[inline]
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    #[inline]
    pub fn min(&self) -> Handle {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Handle {
        self.max
    }

    /// Return the element held by `node`.
    pub fn item(&self, node: Handle) -> &T {
        match self.arena.get(node).item.as_ref() {
            Some(item) => item,
            None => panic!("item(): {:?} holds no element, call the programmer", node),
        }
    }

    /// Compare `item` with the element held by `node`.
    #[inline]
    pub fn compare(&self, item: &T, node: Handle) -> Result<Ordering> {
        self.comparator.compare(item, self.item(node))
    }

    #[inline]
    fn left(&self, node: Handle) -> Handle {
        self.arena.get(node).left
    }

    #[inline]
    fn right(&self, node: Handle) -> Handle {
        self.arena.get(node).right
    }

    #[inline]
    fn parent(&self, node: Handle) -> Handle {
        self.arena.get(node).parent
    }

    #[inline]
    fn is_black(&self, node: Handle) -> bool {
        self.arena.get(node).is_black()
    }

    #[inline]
    fn node_mut(&mut self, node: Handle) -> &mut Node<T> {
        self.arena.get_mut(node)
    }

    fn paint(&mut self, node: Handle, black: bool) {
        match black {
            true => self.node_mut(node).set_black(),
            false => self.node_mut(node).set_red(),
        }
    }
}

/// Traversal API.
impl<T> Tree<T> {
    /// In-order next node, [NIL] if `node` is the last one.
    pub fn successor(&self, mut node: Handle) -> Handle {
        if node.is_nil() {
            return NIL;
        }
        let right = self.right(node);
        if !right.is_nil() {
            let mut next = right;
            while !self.left(next).is_nil() {
                next = self.left(next);
            }
            return next;
        }
        let mut parent = self.parent(node);
        while !parent.is_nil() && node == self.right(parent) {
            node = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// In-order previous node, [NIL] if `node` is the first one.
    pub fn predecessor(&self, mut node: Handle) -> Handle {
        if node.is_nil() {
            return NIL;
        }
        let left = self.left(node);
        if !left.is_nil() {
            let mut prev = left;
            while !self.right(prev).is_nil() {
                prev = self.right(prev);
            }
            return prev;
        }
        let mut parent = self.parent(node);
        while !parent.is_nil() && node == self.left(parent) {
            node = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Walk `steps` successors from `node`.
    pub fn advance(&self, mut node: Handle, steps: usize) -> Handle {
        for _ in 0..steps {
            node = self.successor(node);
        }
        node
    }

    /// Node at in-order position `index`, walking from the minimum. Caller
    /// shall make sure `index < len`.
    #[inline]
    pub fn nth(&self, index: usize) -> Handle {
        self.advance(self.min, index)
    }
}

/// CRUD API.
impl<T> Tree<T> {
    /// Descend from root and return the first node whose element compares
    /// equal to `item`. With duplicates this need not be the first one in
    /// order.
    pub fn search(&self, item: &T) -> Result<Option<Handle>> {
        let mut node = self.root;
        while !node.is_nil() {
            node = match self.compare(item, node)? {
                Ordering::Equal => return Ok(Some(node)),
                Ordering::Less => self.left(node),
                Ordering::Greater => self.right(node),
            };
        }
        Ok(None)
    }

    /// Insert `item` in sorted order, after all elements equal to it.
    /// Comparisons are done before anything is linked, an incomparable
    /// element leaves the tree untouched.
    pub fn insert(&mut self, item: T) -> Result<Handle> {
        let (mut parent, mut node, mut is_left) = (NIL, self.root, false);
        while !node.is_nil() {
            parent = node;
            is_left = self.compare(&item, node)? == Ordering::Less;
            node = if is_left {
                self.left(node)
            } else {
                self.right(node)
            };
        }

        let new_node = self.arena.alloc(item);
        self.node_mut(new_node).parent = parent;
        if parent.is_nil() {
            self.root = new_node;
        } else if is_left {
            self.node_mut(parent).left = new_node;
        } else {
            self.node_mut(parent).right = new_node;
        }

        // a new extreme always hangs off the old one.
        if self.min.is_nil() || (is_left && parent == self.min) {
            self.min = new_node;
        }
        if self.max.is_nil() || (!is_left && parent == self.max) {
            self.max = new_node;
        }

        self.fix_after_insert(new_node);
        self.n_count += 1;
        self.mod_count += 1;
        Ok(new_node)
    }

    /// Remove `node` from the tree and rebalance.
    pub fn delete(&mut self, node: Handle) -> Deleted<T> {
        if self.max == node {
            self.max = self.predecessor(node);
        }
        if self.min == node {
            self.min = self.successor(node);
        }

        let (left, right) = (self.left(node), self.right(node));
        let target = if left.is_nil() || right.is_nil() {
            node
        } else {
            self.successor(node)
        };

        let child = match self.left(target) {
            left if !left.is_nil() => left,
            _ => self.right(target),
        };
        let parent = self.parent(target);
        self.node_mut(child).parent = parent; // sentinel included.
        if parent.is_nil() {
            self.root = child;
        } else if target == self.left(parent) {
            self.node_mut(parent).left = child;
        } else {
            self.node_mut(parent).right = child;
        }

        let rebalance = self.is_black(target);
        let (item, relocated) = if target == node {
            (self.arena.free(target), None)
        } else {
            let moved = self.arena.free(target);
            let item = mem::replace(&mut self.node_mut(node).item, moved);
            if self.max == target {
                self.max = node;
            }
            (item, Some((target, node)))
        };

        if rebalance {
            self.fix_after_delete(child);
        }
        self.node_mut(NIL).parent = NIL;

        self.n_count -= 1;
        self.mod_count += 1;
        match item {
            Some(item) => Deleted { item, relocated },
            None => panic!("delete(): {:?} held no element, call the programmer", node),
        }
    }

    pub fn clear(&mut self) {
        log::trace!("clear tree with {} elements", self.n_count);
        self.arena.clear();
        self.root = NIL;
        self.min = NIL;
        self.max = NIL;
        self.n_count = 0;
        self.mod_count += 1;
    }
}

//--------- rotation and fix-up routines ----------------

impl<T> Tree<T> {
    //              (p)                       (p)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          left      x              node      xr
    //                   / \             /  \
    //                 xl   xr       left    xl
    //
    fn rotate_left(&mut self, node: Handle) {
        let x = self.right(node);
        let xl = self.left(x);
        self.node_mut(node).right = xl;
        if !xl.is_nil() {
            self.node_mut(xl).parent = node;
        }
        let parent = self.parent(node);
        self.node_mut(x).parent = parent;
        if parent.is_nil() {
            self.root = x;
        } else if node == self.left(parent) {
            self.node_mut(parent).left = x;
        } else {
            self.node_mut(parent).right = x;
        }
        self.node_mut(x).left = node;
        self.node_mut(node).parent = x;
    }

    //              (p)                       (p)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //           x       right             xl     node
    //          / \                               / \
    //        xl   xr                           xr   right
    //
    fn rotate_right(&mut self, node: Handle) {
        let x = self.left(node);
        let xr = self.right(x);
        self.node_mut(node).left = xr;
        if !xr.is_nil() {
            self.node_mut(xr).parent = node;
        }
        let parent = self.parent(node);
        self.node_mut(x).parent = parent;
        if parent.is_nil() {
            self.root = x;
        } else if node == self.right(parent) {
            self.node_mut(parent).right = x;
        } else {
            self.node_mut(parent).left = x;
        }
        self.node_mut(x).right = node;
        self.node_mut(node).parent = x;
    }

    fn fix_after_insert(&mut self, mut node: Handle) {
        while !self.is_black(self.parent(node)) {
            // parent is red, hence not the root, grand-parent exists.
            let parent = self.parent(node);
            let grand = self.parent(parent);
            if parent == self.left(grand) {
                let uncle = self.right(grand);
                if !self.is_black(uncle) {
                    self.paint(parent, true);
                    self.paint(uncle, true);
                    self.paint(grand, false);
                    node = grand;
                } else {
                    if node == self.right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grand = self.parent(parent);
                    self.paint(parent, true);
                    self.paint(grand, false);
                    self.rotate_right(grand);
                }
            } else {
                let uncle = self.left(grand);
                if !self.is_black(uncle) {
                    self.paint(parent, true);
                    self.paint(uncle, true);
                    self.paint(grand, false);
                    node = grand;
                } else {
                    if node == self.left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grand = self.parent(parent);
                    self.paint(parent, true);
                    self.paint(grand, false);
                    self.rotate_left(grand);
                }
            }
        }
        let root = self.root;
        self.paint(root, true);
    }

    fn fix_after_delete(&mut self, mut node: Handle) {
        while node != self.root && self.is_black(node) {
            let parent = self.parent(node);
            if node == self.left(parent) {
                let mut sibling = self.right(parent);
                if !self.is_black(sibling) {
                    self.paint(sibling, true);
                    self.paint(parent, false);
                    self.rotate_left(parent);
                    sibling = self.right(parent);
                }
                let (sl, sr) = (self.left(sibling), self.right(sibling));
                if self.is_black(sl) && self.is_black(sr) {
                    self.paint(sibling, false);
                    node = parent;
                } else {
                    if self.is_black(sr) {
                        self.paint(sl, true);
                        self.paint(sibling, false);
                        self.rotate_right(sibling);
                        sibling = self.right(parent);
                    }
                    let black = self.is_black(parent);
                    self.paint(sibling, black);
                    self.paint(parent, true);
                    let sr = self.right(sibling);
                    self.paint(sr, true);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if !self.is_black(sibling) {
                    self.paint(sibling, true);
                    self.paint(parent, false);
                    self.rotate_right(parent);
                    sibling = self.left(parent);
                }
                let (sl, sr) = (self.left(sibling), self.right(sibling));
                if self.is_black(sl) && self.is_black(sr) {
                    self.paint(sibling, false);
                    node = parent;
                } else {
                    if self.is_black(sl) {
                        self.paint(sr, true);
                        self.paint(sibling, false);
                        self.rotate_left(sibling);
                        sibling = self.left(parent);
                    }
                    let black = self.is_black(parent);
                    self.paint(sibling, black);
                    self.paint(parent, true);
                    let sl = self.left(sibling);
                    self.paint(sl, true);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }
        self.paint(node, true);
    }
}

impl<T> Tree<T> {
    /// Validate red-black tree with following rules:
    ///
    /// * Root and the sentinel are black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Parent links agree with child links.
    /// * In-order walk is non-decreasing under the comparator.
    /// * `min`, `max` and element count match the tree.
    pub fn validate(&self) -> Result<()>
    where
        T: fmt::Debug,
    {
        if !self.is_black(self.root) {
            return err_at!(Fatal, msg: "red root {:?}", self.root);
        }
        if !self.is_black(NIL) || self.arena.get(NIL).item.is_some() {
            return err_at!(Fatal, msg: "sentinel is red or holds an element");
        }
        if !self.root.is_nil() && !self.parent(self.root).is_nil() {
            return err_at!(Fatal, msg: "root has a parent");
        }

        let (n_count, _) = self.validate_tree(self.root, 1 /*depth*/)?;
        if n_count != self.n_count || n_count != self.arena.len() {
            return err_at!(
                Fatal, msg: "mismatch in count {} != {}/{}", n_count, self.n_count,
                self.arena.len()
            );
        }

        let (mut first, mut last) = (self.root, self.root);
        while !first.is_nil() && !self.left(first).is_nil() {
            first = self.left(first);
        }
        while !last.is_nil() && !self.right(last).is_nil() {
            last = self.right(last);
        }
        if first != self.min || last != self.max {
            return err_at!(
                Fatal, msg: "endpoints {:?}/{:?} != {:?}/{:?}", self.min, self.max,
                first, last
            );
        }

        let mut node = self.min;
        let mut next = self.successor(node);
        while !next.is_nil() {
            if self.compare(self.item(node), next)? == Ordering::Greater {
                return err_at!(
                    Fatal, msg: "sort {:?} > {:?}", self.item(node), self.item(next)
                );
            }
            node = next;
            next = self.successor(next);
        }

        Ok(())
    }

    // return (n_count, n_blacks) for the subtree under `node`.
    fn validate_tree(&self, node: Handle, depth: usize) -> Result<(usize, usize)> {
        if node.is_nil() {
            return Ok((0, 1));
        }

        let (left, right) = (self.left(node), self.right(node));
        let red = !self.is_black(node);
        if red && !(self.is_black(left) && self.is_black(right)) {
            return err_at!(Fatal, msg: "consecutive reds at depth {}", depth);
        }
        for child in [left, right].iter() {
            if !child.is_nil() && self.parent(*child) != node {
                return err_at!(Fatal, msg: "broken parent link at depth {}", depth);
            }
        }

        let (ln, lblacks) = self.validate_tree(left, depth + 1)?;
        let (rn, rblacks) = self.validate_tree(right, depth + 1)?;
        if lblacks != rblacks {
            return err_at!(Fatal, msg: "unbalanced blacks {} {}", lblacks, rblacks);
        }

        let n_blacks = if red { lblacks } else { lblacks + 1 };
        Ok((ln + rn + 1, n_blacks))
    }

    /// Return the depth of the deepest leaf, test helper.
    #[cfg(test)]
    pub fn depth(&self) -> usize {
        fn walk<T>(tree: &Tree<T>, node: Handle) -> usize {
            match node.is_nil() {
                true => 0,
                false => 1 + walk(tree, tree.left(node)).max(walk(tree, tree.right(node))),
            }
        }
        walk(self, self.root)
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
