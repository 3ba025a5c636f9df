//! LimitedWriteCell: a cell that can be written at most N times.
//!
//! The write budget is an atomic counter fixed at construction. Each
//! `try_write` claims one unit with a fetch-update decrement, so
//! concurrent writers linearize on the counter and no unit is consumed
//! twice; once the counter hits zero every further write fails and hands
//! the value back untouched. A budget of zero is a valid configuration: a
//! permanently empty cell.
//!
//! Read safety under concurrent rewrites is the subtle part. `read`
//! returns `Option<&T>`, and a borrowed value must not be freed while a
//! reader holds it — but a later `try_write` replaces it. Instead of
//! deferred reclamation machinery, the fixed budget is exploited: every
//! winning write owns a dedicated retirement slot (its unique claim index)
//! and parks its boxed value there for the life of the cell. Replaced
//! values are retired, not freed, so a reader's borrow stays valid until
//! the cell itself drops — at which point every written value is released
//! exactly once. Allocation is bounded by the budget, fixed up front.

#[cfg(feature = "loom")]
use loom::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};
#[cfg(not(feature = "loom"))]
use core::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

/// A cell permitting up to a fixed number of successful writes.
pub struct LimitedWriteCell<T> {
    /// Remaining successful writes. Sole arbiter of write admission.
    budget: AtomicUsize,
    /// One retirement slot per budget unit; slot `i` is written only by
    /// the winner of the `i`-th unit, and read only under `&mut self`.
    written: Box<[AtomicPtr<T>]>,
    /// Most recently published value, or null before the first write.
    /// Always points into one of the retirement slots' allocations.
    latest: AtomicPtr<T>,
}

// AtomicPtr is Send + Sync for any T, so the compiler cannot infer the
// right bounds here. Writers move T in and readers borrow it across
// threads, hence Send + Sync for sharing; drop frees values written by
// other threads, hence Send for sending.
unsafe impl<T: Send> Send for LimitedWriteCell<T> {}
unsafe impl<T: Send + Sync> Sync for LimitedWriteCell<T> {}

impl<T> LimitedWriteCell<T> {
    /// Create an empty cell allowing `budget` successful writes in total.
    pub fn new(budget: usize) -> Self {
        Self {
            budget: AtomicUsize::new(budget),
            written: (0..budget)
                .map(|_| AtomicPtr::new(core::ptr::null_mut()))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
            latest: AtomicPtr::new(core::ptr::null_mut()),
        }
    }

    /// Attempt to publish `value`, consuming one unit of budget.
    ///
    /// Succeeds at most `budget` times across the cell's lifetime; after
    /// exhaustion the value is returned untouched. Each success observes a
    /// strictly decreasing remaining budget.
    pub fn try_write(&self, value: T) -> Result<(), T> {
        let prev = match self
            .budget
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |b| b.checked_sub(1))
        {
            Ok(prev) => prev,
            Err(_) => return Err(value),
        };

        // prev is in 1..=N and unique among winners, so the claim index
        // N - prev is this writer's slot alone.
        let index = self.written.len() - prev;
        let ptr = Box::into_raw(Box::new(value));
        self.written[index].store(ptr, Ordering::Relaxed);
        // Publish after the pointee is fully written.
        self.latest.store(ptr, Ordering::Release);
        Ok(())
    }

    /// The most recently published value, or `None` before the first
    /// successful write.
    ///
    /// The borrow stays valid for the life of the cell: replaced values
    /// are retired, never freed early.
    pub fn read(&self) -> Option<&T> {
        let ptr = self.latest.load(Ordering::Acquire);
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { &*ptr })
        }
    }

    /// Units of budget left. Observational only: another writer may claim
    /// a unit between this load and any decision based on it.
    pub fn remaining(&self) -> usize {
        self.budget.load(Ordering::Acquire)
    }

    /// Total budget the cell was created with.
    pub fn budget(&self) -> usize {
        self.written.len()
    }

    /// Consume the cell, returning the latest published value.
    ///
    /// Retired earlier values are released here; the latest is moved out.
    pub fn into_inner(self) -> Option<T> {
        let latest = self.latest.load(Ordering::Relaxed);
        let mut out = None;
        for slot in self.written.iter() {
            // Null the slot so the Drop impl running after this loop
            // cannot free the same allocation again.
            let ptr = slot.swap(core::ptr::null_mut(), Ordering::Relaxed);
            if !ptr.is_null() {
                let boxed = unsafe { Box::from_raw(ptr) };
                if ptr == latest {
                    out = Some(*boxed);
                }
            }
        }
        out
    }
}

impl<T> Drop for LimitedWriteCell<T> {
    fn drop(&mut self) {
        // &mut self: no concurrent writers, relaxed suffices. Values are
        // freed through the retirement slots only; `latest` aliases one
        // of them and must not be freed separately.
        for slot in self.written.iter() {
            let ptr = slot.load(Ordering::Relaxed);
            if !ptr.is_null() {
                drop(unsafe { Box::from_raw(ptr) });
            }
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for LimitedWriteCell<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LimitedWriteCell")
            .field("budget", &self.written.len())
            .field("remaining", &self.remaining())
            .field("latest", &self.read())
            .finish()
    }
}
