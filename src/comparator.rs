//! Module implement the ordering used by [TreeList](crate::TreeList).

use std::{cmp::Ordering, fmt, rc::Rc as Ref};

use crate::{Error, Result};

type PartialFn<T> = dyn Fn(&T, &T) -> Option<Ordering>;

/// Ordering applied to elements of a sorted list.
///
/// Either the natural ordering of the element type, via [PartialOrd], or
/// an explicit ordering supplied as a closure. All element comparisons in
/// a list go through its comparator, never through [PartialEq], hence the
/// comparator should be consistent with equality.
///
/// Pairs that the ordering cannot order, like `f64::NAN` under natural
/// ordering, fail with [Error::Incomparable].
pub struct Comparator<T> {
    order: Order<T>,
}

enum Order<T> {
    Natural(fn(&T, &T) -> Option<Ordering>),
    Explicit(Ref<PartialFn<T>>),
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        let order = match &self.order {
            Order::Natural(f) => Order::Natural(*f),
            Order::Explicit(f) => Order::Explicit(Ref::clone(f)),
        };
        Comparator { order }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.order {
            Order::Natural(_) => write!(f, "Comparator::Natural"),
            Order::Explicit(_) => write!(f, "Comparator::Explicit"),
        }
    }
}

impl<T> Default for Comparator<T>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::natural()
    }
}

impl<T> Comparator<T> {
    /// Order elements by their natural ordering.
    pub fn natural() -> Comparator<T>
    where
        T: PartialOrd,
    {
        Comparator {
            order: Order::Natural(natural_cmp::<T>),
        }
    }

    /// Order elements by a total order.
    pub fn new<F>(f: F) -> Comparator<T>
    where
        F: 'static + Fn(&T, &T) -> Ordering,
    {
        Comparator {
            order: Order::Explicit(Ref::new(move |a: &T, b: &T| Some(f(a, b)))),
        }
    }

    /// Order elements by a partial order, `None` is reported as
    /// [Error::Incomparable] when the pair shows up.
    pub fn partial<F>(f: F) -> Comparator<T>
    where
        F: 'static + Fn(&T, &T) -> Option<Ordering>,
    {
        Comparator {
            order: Order::Explicit(Ref::new(f)),
        }
    }

    /// Return a comparator that imposes the reverse of this ordering.
    pub fn reversed(&self) -> Comparator<T>
    where
        T: 'static,
    {
        let this = self.clone();
        Comparator::partial(move |a: &T, b: &T| this.partial_compare(b, a))
    }

    /// Return whether this is the natural ordering of `T`.
    pub fn is_natural(&self) -> bool {
        matches!(self.order, Order::Natural(_))
    }

    /// Compare `a` with `b`.
    pub fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        match self.partial_compare(a, b) {
            Some(ord) => Ok(ord),
            None => err_at!(Incomparable, msg: "elements cannot be ordered"),
        }
    }

    fn partial_compare(&self, a: &T, b: &T) -> Option<Ordering> {
        match &self.order {
            Order::Natural(f) => f(a, b),
            Order::Explicit(f) => f(a, b),
        }
    }
}

fn natural_cmp<T: PartialOrd>(a: &T, b: &T) -> Option<Ordering> {
    a.partial_cmp(b)
}

#[cfg(test)]
#[path = "comparator_test.rs"]
mod comparator_test;
