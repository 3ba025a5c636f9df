//! MinHeap: a binary min-heap keyed by partially ordered priorities.
//!
//! Entries are (payload, priority) pairs on a growable buffer — unlike
//! the fixed-capacity containers, the heap may reallocate. The heap-order
//! invariant (parent ≤ both children) holds between operations. Order
//! among equal priorities is unspecified: the heap is not stable.
//!
//! Priorities only need `PartialOrd`. An admission or re-sift that
//! compares two incomparable priorities (a NaN float, unrelated elements
//! of a genuine partial order) does not misplace anything: the partial
//! sift is unwound swap by swap, the heap ends up exactly as it was, and
//! the caller gets an ordering-violation result — with the rejected entry
//! riding back in the `push` case.

use crate::error::{OrderViolation, PopOrderViolation};
use core::cmp::Ordering;

#[derive(Debug, Clone)]
struct Entry<T, K> {
    data: T,
    priority: K,
}

/// Binary min-heap over `PartialOrd` priorities.
#[derive(Debug, Clone)]
pub struct MinHeap<T, K: PartialOrd> {
    entries: Vec<Entry<T, K>>,
}

impl<T, K: PartialOrd> MinHeap<T, K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The minimum-priority payload, if any. O(1).
    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|e| &e.data)
    }

    pub fn peek_with_priority(&self) -> Option<(&T, &K)> {
        self.entries.first().map(|e| (&e.data, &e.priority))
    }

    /// Insert an entry, sifting up in O(log n).
    ///
    /// If `priority` turns out to be incomparable with an entry on the
    /// sift path, the partial sift is reversed and the entry comes back
    /// in the error; the heap is unchanged.
    pub fn push(&mut self, data: T, priority: K) -> Result<(), OrderViolation<T, K>> {
        self.entries.push(Entry { data, priority });
        let last = self.entries.len() - 1;
        let mut pos = last;
        while pos > 0 {
            let parent = (pos - 1) / 2;
            match self.entries[pos]
                .priority
                .partial_cmp(&self.entries[parent].priority)
            {
                Some(Ordering::Less) => {
                    self.entries.swap(pos, parent);
                    pos = parent;
                }
                Some(_) => break,
                None => {
                    let entry = self.unwind_sift_up(last, pos);
                    return Err(OrderViolation {
                        data: entry.data,
                        priority: entry.priority,
                    });
                }
            }
        }
        Ok(())
    }

    /// Remove and return the minimum entry, or `Ok(None)` when empty.
    /// O(log n) sift-down; an incomparable pair restores the heap and
    /// reports a violation with nothing removed.
    pub fn pop_with_priority(&mut self) -> Result<Option<(T, K)>, PopOrderViolation> {
        let len = self.entries.len();
        if len <= 1 {
            return Ok(self.entries.pop().map(|e| (e.data, e.priority)));
        }

        // Move the minimum to the tail, then sift the former tail down
        // within the shortened prefix. Every step of the descent is
        // recorded so a comparison failure can be unwound exactly.
        self.entries.swap(0, len - 1);
        let bound = len - 1;
        let mut path = vec![0usize];
        loop {
            let pos = *path.last().expect("path starts non-empty");
            let left = 2 * pos + 1;
            if left >= bound {
                break;
            }
            let right = left + 1;
            let child = if right < bound {
                match self.entries[left]
                    .priority
                    .partial_cmp(&self.entries[right].priority)
                {
                    Some(Ordering::Greater) => right,
                    Some(_) => left,
                    None => return Err(self.unwind_sift_down(&path, len)),
                }
            } else {
                left
            };
            match self.entries[child]
                .priority
                .partial_cmp(&self.entries[pos].priority)
            {
                Some(Ordering::Less) => {
                    self.entries.swap(pos, child);
                    path.push(child);
                }
                Some(_) => break,
                None => return Err(self.unwind_sift_down(&path, len)),
            }
        }
        let min = self.entries.pop().expect("len >= 2 checked above");
        Ok(Some((min.data, min.priority)))
    }

    /// Remove and return the minimum payload; see
    /// [`pop_with_priority`](Self::pop_with_priority).
    pub fn pop(&mut self) -> Result<Option<T>, PopOrderViolation> {
        Ok(self.pop_with_priority()?.map(|(data, _)| data))
    }

    /// Iterate payloads in unspecified (storage) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.data)
    }

    pub fn iter_with_priority(&self) -> impl Iterator<Item = (&T, &K)> {
        self.entries.iter().map(|e| (&e.data, &e.priority))
    }

    /// Consume the heap, yielding entries in unspecified order.
    pub fn into_iter_unordered(self) -> impl Iterator<Item = (T, K)> {
        self.entries.into_iter().map(|e| (e.data, e.priority))
    }

    /// Reverse a failed sift-up. The climbing entry sits at `pos`; its
    /// climb path is the ancestor chain of `last` (parent hops are
    /// deterministic), so the swaps can be replayed backwards and the
    /// entry popped off the tail.
    fn unwind_sift_up(&mut self, last: usize, pos: usize) -> Entry<T, K> {
        let mut chain = Vec::new();
        let mut at = last;
        while at != pos {
            chain.push(at);
            at = (at - 1) / 2;
        }
        chain.push(pos);
        while chain.len() > 1 {
            let upper = chain.pop().expect("len > 1");
            let lower = *chain.last().expect("len >= 1");
            self.entries.swap(upper, lower);
        }
        self.entries.pop().expect("entry pushed at start of push")
    }

    /// Reverse a failed sift-down: replay the recorded descent backwards,
    /// then undo the initial root/tail swap.
    fn unwind_sift_down(&mut self, path: &[usize], len: usize) -> PopOrderViolation {
        for i in (1..path.len()).rev() {
            self.entries.swap(path[i], path[i - 1]);
        }
        self.entries.swap(0, len - 1);
        PopOrderViolation
    }
}

impl<T, K: PartialOrd> Default for MinHeap<T, K> {
    fn default() -> Self {
        Self::new()
    }
}
