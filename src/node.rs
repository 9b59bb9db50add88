// Node corresponds to a single element in the tree, nodes live in an arena
// and link to each other through handles.

/// Stable address of a node inside the arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Handle(usize);

/// Shared sentinel, stands for every leaf and for the parent of root.
pub const NIL: Handle = Handle(0);

impl Handle {
    #[inline]
    pub fn is_nil(self) -> bool {
        self == NIL
    }

    #[inline]
    fn to_index(self) -> usize {
        self.0
    }
}

pub struct Node<T> {
    pub item: Option<T>, // None only for sentinel and free slots.
    pub black: bool,     // store: black or red
    pub parent: Handle,
    pub left: Handle,
    pub right: Handle,
}

impl<T> Node<T> {
    fn new(item: Option<T>, black: bool) -> Node<T> {
        Node {
            item,
            black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }
}

/// Node storage. Slot zero is the sentinel, free slots are reused by
/// later allocations.
pub struct Arena<T> {
    slots: Vec<Node<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub fn new() -> Arena<T> {
        Arena {
            slots: vec![Node::new(None, true /*black*/)],
            free: Vec::default(),
        }
    }

    /// Number of live nodes, sentinel not included.
    pub fn len(&self) -> usize {
        self.slots.len() - 1 - self.free.len()
    }

    /// Allocate a new red node, unlinked.
    pub fn alloc(&mut self, item: T) -> Handle {
        match self.free.pop() {
            Some(handle) => {
                self.slots[handle.to_index()] = Node::new(Some(item), false);
                handle
            }
            None => {
                self.slots.push(Node::new(Some(item), false));
                Handle(self.slots.len() - 1)
            }
        }
    }

    /// Release the node, returning the element it still holds.
    pub fn free(&mut self, handle: Handle) -> Option<T> {
        debug_assert!(!handle.is_nil(), "freeing the sentinel");
        let node = &mut self.slots[handle.to_index()];
        let item = node.item.take();
        *node = Node::new(None, true);
        self.free.push(handle);
        item
    }

    #[inline]
    pub fn get(&self, handle: Handle) -> &Node<T> {
        &self.slots[handle.to_index()]
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> &mut Node<T> {
        &mut self.slots[handle.to_index()]
    }

    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[0] = Node::new(None, true);
        self.free.clear();
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
