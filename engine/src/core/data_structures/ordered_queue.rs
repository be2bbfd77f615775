/*!
 * Ordered Queue
 * Stable priority queue ordered by an injected comparison rule
 */

use crate::core::types::SchedulerResult;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Ordering rule injected into an [`OrderedQueue`]
///
/// Implemented for any `Fn(&T, &T) -> Ordering` closure, so ad-hoc orderings
/// need no wrapper type.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Priority queue with FIFO order among equal elements
///
/// New items land immediately before the first element the comparator ranks
/// strictly after them. Elements that compare equal therefore keep their
/// insertion order, which is what lets an always-equal comparator behave as a
/// plain FIFO.
///
/// # Performance
/// - Contiguous ring buffer storage, no per-node allocation
/// - `offer`, `remove` and `remove_at` are O(n); `peek` and `poll` are O(1)
#[derive(Debug, Clone)]
pub struct OrderedQueue<T, C> {
    items: VecDeque<T>,
    comparator: C,
}

impl<T, C> OrderedQueue<T, C>
where
    C: Comparator<T>,
{
    /// Create an empty queue ordered by `comparator`
    pub fn new(comparator: C) -> Self {
        Self {
            items: VecDeque::new(),
            comparator,
        }
    }

    /// Insert `item`, returning the zero-based position it landed at
    ///
    /// Position 0 means the item is the new head. Fails only if the backing
    /// storage cannot grow.
    pub fn offer(&mut self, item: T) -> SchedulerResult<usize> {
        self.items.try_reserve(1)?;

        let index = self
            .items
            .iter()
            .position(|existing| self.comparator.compare(&item, existing) == Ordering::Less)
            .unwrap_or(self.items.len());

        self.items.insert(index, item);
        Ok(index)
    }

    /// Make room for `additional` more items, so the next offers cannot fail
    pub fn reserve(&mut self, additional: usize) -> SchedulerResult<()> {
        self.items.try_reserve(additional)?;
        Ok(())
    }

    /// Head of the queue without removing it
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Remove and return the head of the queue
    #[inline]
    pub fn poll(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Element at `index`, or `None` when out of range
    #[inline]
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Remove the element at `index`, shifting later elements forward
    #[inline]
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.items.remove(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in queue order, head first
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    /// Drop every remaining element
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<T, C> OrderedQueue<T, C>
where
    T: PartialEq,
    C: Comparator<T>,
{
    /// Remove every element equal to `item`, returning how many were removed
    ///
    /// Uses `PartialEq`, never the comparator: two elements the policy ranks
    /// as equal are still distinct entries.
    pub fn remove(&mut self, item: &T) -> usize {
        let before = self.items.len();
        self.items.retain(|existing| existing != item);
        before - self.items.len()
    }
}
