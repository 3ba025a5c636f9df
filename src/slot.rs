//! AtomicSlot: a single-word lock-free cell for ownership shapes.
//!
//! The slot stores one encoded [`PtrShape`](crate::PtrShape) word in an
//! `AtomicPtr` and moves whole ownership shapes between threads with
//! single-word read-modify-write operations. Every operation comes in two
//! families:
//!
//! - a raw family (`*_with`) taking explicit [`Ordering`]s, marked
//!   `unsafe`: the caller picks an ordering sufficient for their
//!   synchronization pattern. Relaxed is never sufficient when the stored
//!   pointer will be dereferenced — a thread may then observe the pointer
//!   before the pointee's initializing writes are visible.
//! - a safe family pinned to `SeqCst`, correct by construction for any
//!   pattern at the cost of the strongest fences.
//!
//! Ownership rules per operation:
//! - `swap` returns the previous shape to the caller; nothing is released.
//! - `store` releases the previous shape synchronously inside the call.
//! - `load` and the compare-exchange family exist only for `Copy` shapes
//!   (borrows); an owning shape cannot be duplicated by a copy-load, and
//!   the type system rules it out rather than a runtime branch.
//! - dropping the slot releases whatever is still stored, exactly once.
//!
//! Compare-exchange failure is contention, not an error: the caller gets
//! the actual current shape back and decides whether to retry.

use crate::shape::PtrShape;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;

#[cfg(feature = "loom")]
use loom::sync::atomic::{AtomicPtr, Ordering};
#[cfg(not(feature = "loom"))]
use core::sync::atomic::{AtomicPtr, Ordering};

/// Single-word atomic storage for a pointer shape `P`.
pub struct AtomicSlot<T, P: PtrShape<T>> {
    ptr: AtomicPtr<T>,
    _shape: PhantomData<P>,
}

// Sharing the slot lets any thread extract the stored shape, so the shape
// itself must be sendable. This is exactly the right bound per shape:
// Box<T> asks T: Send, &T asks T: Sync, &mut T asks T: Send.
unsafe impl<T, P: PtrShape<T> + Send> Sync for AtomicSlot<T, P> {}
unsafe impl<T, P: PtrShape<T> + Send> Send for AtomicSlot<T, P> {}

impl<T, P: PtrShape<T>> AtomicSlot<T, P> {
    /// Create a slot holding `initial`.
    pub fn new(initial: P) -> Self {
        Self {
            ptr: AtomicPtr::new(initial.into_raw()),
            _shape: PhantomData,
        }
    }

    /// Replace the stored shape, returning the previous one. Ownership of
    /// the previous shape transfers to the caller; nothing is released.
    ///
    /// # Safety
    ///
    /// `order` must synchronize sufficiently for the caller's access
    /// pattern; relaxed ordering can surface a pointer whose pointee
    /// writes are not yet visible to this thread.
    pub unsafe fn swap_with(&self, val: P, order: Ordering) -> P {
        unsafe { P::from_raw(self.ptr.swap(val.into_raw(), order)) }
    }

    /// Replace the stored shape, returning the previous one (`SeqCst`).
    pub fn swap(&self, val: P) -> P {
        unsafe { self.swap_with(val, Ordering::SeqCst) }
    }

    /// Replace the stored shape and release the previous one.
    ///
    /// The release happens synchronously inside the call, exactly once.
    ///
    /// # Safety
    ///
    /// Same ordering contract as [`swap_with`](Self::swap_with).
    pub unsafe fn store_with(&self, val: P, order: Ordering) {
        // Swap so the previous shape is reconstructed and dropped here.
        unsafe {
            self.swap_with(val, order);
        }
    }

    /// Replace the stored shape and release the previous one (`SeqCst`).
    pub fn store(&self, val: P) {
        unsafe { self.store_with(val, Ordering::SeqCst) }
    }

    /// Consume the slot without an atomic operation, returning the stored
    /// shape. `self` by value proves no other thread can race this.
    pub fn into_inner(self) -> P {
        let slot = ManuallyDrop::new(self);
        unsafe { P::from_raw(slot.ptr.load(Ordering::Relaxed)) }
    }
}

impl<T, P: PtrShape<T>> Drop for AtomicSlot<T, P> {
    fn drop(&mut self) {
        // &mut self rules out concurrent mutation, so relaxed suffices.
        let _: P = unsafe { P::from_raw(self.ptr.load(Ordering::Relaxed)) };
    }
}

/// Operations that duplicate the stored shape, available only when the
/// shape is `Copy` (borrows). If the `Copy` bound were relaxed, every one
/// of these would have to release the copy it does not return.
impl<T, P: PtrShape<T> + Copy> AtomicSlot<T, P> {
    /// Read the current shape.
    ///
    /// # Safety
    ///
    /// Same ordering contract as [`swap_with`](Self::swap_with).
    pub unsafe fn load_with(&self, order: Ordering) -> P {
        unsafe { P::from_raw(self.ptr.load(order)) }
    }

    /// Read the current shape (`SeqCst`).
    pub fn load(&self) -> P {
        unsafe { self.load_with(Ordering::SeqCst) }
    }

    /// Install `new` iff the current shape encodes equal to `current`.
    ///
    /// `Ok` carries the previous shape (ownership of `new` moved into the
    /// slot); `Err` carries the actual current shape and the caller still
    /// owns `new`. Failure is expected under contention.
    ///
    /// # Safety
    ///
    /// Same ordering contract as [`swap_with`](Self::swap_with).
    pub unsafe fn compare_exchange_with(
        &self,
        current: P,
        new: P,
        success: Ordering,
        failure: Ordering,
    ) -> Result<P, P> {
        self.ptr
            .compare_exchange(current.into_raw(), new.into_raw(), success, failure)
            .map(|prev| unsafe { P::from_raw(prev) })
            .map_err(|actual| unsafe { P::from_raw(actual) })
    }

    /// Install `new` iff the current shape equals `current` (`SeqCst`).
    pub fn compare_exchange(&self, current: P, new: P) -> Result<P, P> {
        unsafe { self.compare_exchange_with(current, new, Ordering::SeqCst, Ordering::SeqCst) }
    }

    /// Like [`compare_exchange_with`](Self::compare_exchange_with), but may
    /// fail spuriously even when the comparison would succeed. Callers
    /// needing forward progress retry in a loop; the retry bound is caller
    /// policy, not a library guarantee.
    ///
    /// # Safety
    ///
    /// Same ordering contract as [`swap_with`](Self::swap_with).
    pub unsafe fn compare_exchange_weak_with(
        &self,
        current: P,
        new: P,
        success: Ordering,
        failure: Ordering,
    ) -> Result<P, P> {
        self.ptr
            .compare_exchange_weak(current.into_raw(), new.into_raw(), success, failure)
            .map(|prev| unsafe { P::from_raw(prev) })
            .map_err(|actual| unsafe { P::from_raw(actual) })
    }

    /// Weak compare-exchange at `SeqCst`; may fail spuriously.
    pub fn compare_exchange_weak(&self, current: P, new: P) -> Result<P, P> {
        unsafe {
            self.compare_exchange_weak_with(current, new, Ordering::SeqCst, Ordering::SeqCst)
        }
    }
}

/// Optional shapes: the null sentinel is `None`, which enables emptiness
/// operations.
impl<T, S> AtomicSlot<T, Option<S>>
where
    Option<S>: PtrShape<T>,
{
    /// Create an empty slot.
    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Swap in `None`, returning what was stored.
    ///
    /// # Safety
    ///
    /// Same ordering contract as [`swap_with`](Self::swap_with).
    pub unsafe fn take_with(&self, order: Ordering) -> Option<S> {
        unsafe { self.swap_with(None, order) }
    }

    /// Swap in `None`, returning what was stored (`SeqCst`).
    pub fn take(&self) -> Option<S> {
        unsafe { self.take_with(Ordering::SeqCst) }
    }

    /// Install `val` iff the slot is currently empty.
    ///
    /// On failure the slot is unchanged and `val` comes back untouched.
    ///
    /// # Safety
    ///
    /// Same ordering contract as [`swap_with`](Self::swap_with).
    pub unsafe fn try_insert_with(
        &self,
        val: S,
        success: Ordering,
        failure: Ordering,
    ) -> Result<(), S> {
        // Encode up front so the word can be handed back on failure.
        let raw: *mut T = Some(val).into_raw();
        match self
            .ptr
            .compare_exchange(core::ptr::null_mut(), raw, success, failure)
        {
            Ok(_) => Ok(()),
            Err(_) => {
                let val = unsafe { <Option<S>>::from_raw(raw) };
                match val {
                    Some(val) => Err(val),
                    // A present shape never encodes to null.
                    None => unreachable!("non-null encoding decoded to None"),
                }
            }
        }
    }

    /// Install `val` iff the slot is currently empty (`SeqCst`).
    pub fn try_insert(&self, val: S) -> Result<(), S> {
        unsafe { self.try_insert_with(val, Ordering::SeqCst, Ordering::SeqCst) }
    }
}

impl<T, S> Default for AtomicSlot<T, Option<S>>
where
    Option<S>: PtrShape<T>,
{
    fn default() -> Self {
        Self::empty()
    }
}

/// Slot owning a heap value.
pub type AtomicBox<T> = AtomicSlot<T, Box<T>>;
/// Slot owning a heap value or empty.
pub type AtomicOptionBox<T> = AtomicSlot<T, Option<Box<T>>>;
/// Slot holding a shared borrow.
pub type AtomicRef<'a, T> = AtomicSlot<T, &'a T>;
/// Slot holding a shared borrow or empty.
pub type AtomicOptionRef<'a, T> = AtomicSlot<T, Option<&'a T>>;
/// Slot holding an exclusive borrow.
pub type AtomicMutRef<'a, T> = AtomicSlot<T, &'a mut T>;
/// Slot holding an exclusive borrow or empty.
pub type AtomicOptionMutRef<'a, T> = AtomicSlot<T, Option<&'a mut T>>;

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicUsize;

    #[test]
    fn box_swap_chain() {
        let a = AtomicBox::new(Box::new(5));
        assert_eq!(*a.swap(Box::new(6)), 5);
        assert_eq!(*a.swap(Box::new(7)), 6);
        assert_eq!(*a.into_inner(), 7);
    }

    #[test]
    fn option_box_insert_take() {
        let a = AtomicOptionBox::empty();
        a.try_insert(Box::new(5)).unwrap();
        let rejected = a.try_insert(Box::new(6)).unwrap_err();
        assert_eq!(*rejected, 6);
        assert_eq!(*a.take().unwrap(), 5);
        assert_eq!(a.take(), None);
        a.store(Some(Box::new(7)));
        assert_eq!(*a.into_inner().unwrap(), 7);
    }

    #[test]
    fn ref_compare_exchange() {
        let arr = [5, 6, 7];
        let a = AtomicRef::new(&arr[0]);
        assert_eq!(*a.swap(&arr[1]), 5);
        assert_eq!(*a.compare_exchange(&arr[1], &arr[2]).unwrap(), 6);
        assert_eq!(*a.compare_exchange(&arr[1], &arr[0]).unwrap_err(), 7);
        assert_eq!(*a.load(), 7);
    }

    #[test]
    fn mut_ref_swap() {
        let x = &mut 5;
        let y = &mut 6;
        let a = AtomicMutRef::new(x);
        assert_eq!(*a.swap(y), 5);
        assert_eq!(*a.into_inner(), 6);
    }

    #[test]
    fn release_accounting() {
        struct Tally<'a>(&'a AtomicUsize);
        impl Drop for Tally<'_> {
            fn drop(&mut self) {
                self.0.fetch_add(1, core::sync::atomic::Ordering::SeqCst);
            }
        }

        let drops = AtomicUsize::new(0);
        let a = AtomicOptionBox::new(Some(Box::new(Tally(&drops))));

        // store releases the old value inside the call
        a.store(Some(Box::new(Tally(&drops))));
        assert_eq!(drops.load(core::sync::atomic::Ordering::SeqCst), 1);

        // swap transfers ownership out instead of releasing
        let prev = a.swap(Some(Box::new(Tally(&drops))));
        assert_eq!(drops.load(core::sync::atomic::Ordering::SeqCst), 1);
        drop(prev);
        assert_eq!(drops.load(core::sync::atomic::Ordering::SeqCst), 2);

        // failed insert releases nothing until the caller drops the reject
        let rejected = a.try_insert(Box::new(Tally(&drops))).unwrap_err();
        assert_eq!(drops.load(core::sync::atomic::Ordering::SeqCst), 2);
        drop(rejected);
        assert_eq!(drops.load(core::sync::atomic::Ordering::SeqCst), 3);

        // slot drop releases the remaining value exactly once
        drop(a);
        assert_eq!(drops.load(core::sync::atomic::Ordering::SeqCst), 4);
    }

    #[test]
    fn raw_family_with_acq_rel() {
        let a = AtomicOptionBox::empty();
        unsafe {
            a.try_insert_with(Box::new(1), Ordering::AcqRel, Ordering::Acquire)
                .unwrap();
            assert_eq!(*a.take_with(Ordering::AcqRel).unwrap(), 1);
            a.store_with(Some(Box::new(2)), Ordering::Release);
            assert_eq!(*a.swap_with(None, Ordering::AcqRel).unwrap(), 2);
        }
    }
}
