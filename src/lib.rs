//! Package implement a sorted list, backed by a red-black tree.
//!
//! [TreeList] keeps its elements ordered from least to greatest, either by
//! their natural ordering or by a [Comparator] supplied at construction.
//! Duplicates are allowed and keep their insertion order among themselves.
//! The list is exposed with list semantics:
//!
//! - Sorted insert via add(), the position is never chosen by the caller.
//! - Index based get() and remove_at(), O(index) by walking from the
//!   minimum.
//! - Value based contains() and remove(), O(log n).
//! - Bidirectional, fail-fast iteration via [ListIter].
//! - Live range views, [SubList], by index or by value bounds. Views share
//!   nodes with the list, changes through either side are visible to the
//!   other.
//! - Not thread safe.
//!
//! Constructing a new [TreeList] and basic operations:
//!
//! ```
//! use treelist::TreeList;
//!
//! let mut list: TreeList<i32> = TreeList::new();
//! for item in [5, 3, 8, 1, 4].iter() {
//!     list.add(*item).unwrap();
//! }
//! assert_eq!(list.to_vec(), vec![1, 3, 4, 5, 8]);
//! assert_eq!(list.get(2).unwrap(), 4);
//!
//! let mut view = list.sub_list(1, 4).unwrap();
//! assert_eq!(view.to_vec().unwrap(), vec![3, 4, 5]);
//! assert!(view.remove(&4).unwrap());
//! assert_eq!(view.len().unwrap(), 2);
//! assert_eq!(list.len(), 4);
//! ```
//!
//! Iterators and views are fail-fast: once the list is changed by anyone
//! else, their next operation returns [Error::ConcurrentModification].
//!
//! ```
//! use treelist::{Error, TreeList};
//!
//! let mut list: TreeList<i32> = TreeList::new();
//! list.add(10).unwrap();
//! let mut iter = list.iter();
//! list.add(20).unwrap();
//! match iter.next_item() {
//!     Err(Error::ConcurrentModification(_, _)) => (),
//!     _ => unreachable!(),
//! }
//! ```

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(IndexOutOfBounds, msg: "index {} >= {}", index, len);
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, comparator.compare(a, b));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
}

mod comparator;
mod iter;
mod list;
mod node;
#[cfg(feature = "serde")]
mod persist;
mod span;
mod sublist;
mod tree;

pub use comparator::Comparator;
pub use iter::ListIter;
pub use list::{SortedSource, TreeList};
pub use sublist::SubList;

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    /// Tree invariants are broken, reported by validate().
    Fatal(String, String),
    IndexOutOfBounds(String, String),
    NoSuchElement(String, String),
    InvalidArgument(String, String),
    IllegalState(String, String),
    /// Two elements cannot be ordered by the active comparator.
    Incomparable(String, String),
    /// Iterator or view is stale, the list was changed behind its back.
    ConcurrentModification(String, String),
    Unsupported(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            IndexOutOfBounds(p, msg) => write!(f, "{} IndexOutOfBounds: {}", p, msg),
            NoSuchElement(p, msg) => write!(f, "{} NoSuchElement: {}", p, msg),
            InvalidArgument(p, msg) => write!(f, "{} InvalidArgument: {}", p, msg),
            IllegalState(p, msg) => write!(f, "{} IllegalState: {}", p, msg),
            Incomparable(p, msg) => write!(f, "{} Incomparable: {}", p, msg),
            ConcurrentModification(p, msg) => {
                write!(f, "{} ConcurrentModification: {}", p, msg)
            }
            Unsupported(p, msg) => write!(f, "{} Unsupported: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
