//! Module implement serde support for [TreeList] and [SubList].
//!
//! Both serialize as a sequence of their elements, least first. A list
//! deserializes back under the natural ordering of its element type, use
//! [TreeList::deserialize_with] to rebuild it under an explicit
//! [Comparator].

use serde::{
    de::{self, Deserialize, Deserializer, SeqAccess, Visitor},
    ser::{self, Serialize, Serializer},
};

use std::{fmt, result};

use crate::{
    comparator::Comparator,
    span::{Walk, Window},
    sublist::SubList,
    TreeList,
};

impl<T> Serialize for TreeList<T>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> result::Result<S::Ok, S::Error> {
        let tree = self.span.tree.borrow();
        let window = Window::whole(&tree);
        serializer.collect_seq(Walk::new(&tree, &window).map(|node| tree.item(node)))
    }
}

impl<T> Serialize for SubList<T>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> result::Result<S::Ok, S::Error> {
        let tree = self.span.tree.borrow();
        let window = self.span.bounds(&tree).map_err(<S::Error as ser::Error>::custom)?;
        serializer.collect_seq(Walk::new(&tree, &window).map(|node| tree.item(node)))
    }
}

impl<'de, T> Deserialize<'de> for TreeList<T>
where
    T: PartialOrd + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> result::Result<Self, D::Error> {
        let visitor = TreeListVisitor {
            comparator: Comparator::natural(),
        };
        deserializer.deserialize_seq(visitor)
    }
}

impl<T> TreeList<T> {
    /// Deserialize a list, ordering its elements by `comparator`.
    pub fn deserialize_with<'de, D>(
        comparator: Comparator<T>,
        deserializer: D,
    ) -> result::Result<TreeList<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(TreeListVisitor { comparator })
    }
}

struct TreeListVisitor<T> {
    comparator: Comparator<T>,
}

impl<'de, T> Visitor<'de> for TreeListVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = TreeList<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> result::Result<TreeList<T>, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut list = TreeList::with_comparator(self.comparator);
        while let Some(item) = seq.next_element()? {
            list.add(item).map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(list)
    }
}

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;
