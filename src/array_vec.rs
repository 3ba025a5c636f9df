//! ArrayVec: an ordered sequence over an inline fixed-capacity buffer.
//!
//! The buffer is `[MaybeUninit<T>; N]`; the first `len` elements are
//! initialized and everything past them is not, which is the single
//! invariant every method below maintains. Mutations that would exceed
//! the capacity fail with [`CapacityError`] carrying the element back,
//! never reallocating.

use crate::error::CapacityError;
use core::mem::MaybeUninit;
use core::ops::{Deref, DerefMut};

pub struct ArrayVec<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

impl<T, const N: usize> ArrayVec<T, N> {
    /// Create an empty vector with capacity `N`.
    pub fn new() -> Self {
        ArrayVec {
            // An array of MaybeUninit needs no initialization.
            data: unsafe { MaybeUninit::uninit().assume_init() },
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Append at the tail, or hand the element back when full.
    pub fn push(&mut self, item: T) -> Result<(), CapacityError<T>> {
        if self.len < N {
            self.data[self.len] = MaybeUninit::new(item);
            self.len += 1;
            Ok(())
        } else {
            Err(CapacityError(item))
        }
    }

    /// Remove and return the tail element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len > 0 {
            self.len -= 1;
            Some(unsafe { self.data[self.len].assume_init_read() })
        } else {
            None
        }
    }

    /// Insert at `index`, shifting later elements right. O(N).
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), CapacityError<T>> {
        assert!(index <= self.len, "insert index out of bounds");
        if self.len == N {
            return Err(CapacityError(item));
        }
        unsafe {
            let base = self.data.as_mut_ptr().add(index);
            core::ptr::copy(base, base.add(1), self.len - index);
            (*base).write(item);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove the element at `index`, shifting later elements left. O(N).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "remove index out of bounds");
        unsafe {
            let base = self.data.as_mut_ptr().add(index);
            let item = (*base).assume_init_read();
            core::ptr::copy(base.add(1), base, self.len - index - 1);
            self.len -= 1;
            item
        }
    }

    /// Remove the element at `index` by swapping the tail into its place.
    /// O(1), does not preserve order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "swap_remove index out of bounds");
        self.data.swap(index, self.len - 1);
        self.pop().expect("len checked above")
    }

    /// Drop all elements, keeping the capacity.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

impl<T, const N: usize> Default for ArrayVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for ArrayVec<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Deref for ArrayVec<T, N> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        // The first len slots are initialized.
        unsafe { core::slice::from_raw_parts(self.data.as_ptr().cast::<T>(), self.len) }
    }
}

impl<T, const N: usize> DerefMut for ArrayVec<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { core::slice::from_raw_parts_mut(self.data.as_mut_ptr().cast::<T>(), self.len) }
    }
}

impl<T: core::fmt::Debug, const N: usize> core::fmt::Debug for ArrayVec<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
