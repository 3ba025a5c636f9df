//! Pointer-shape capability: how ownership round-trips through a raw word.
//!
//! A shape is a pointer-like value — an exclusively owned heap value, a
//! shared borrow, an exclusive borrow, or an optional wrapper over one of
//! those — that can be encoded into a single `*mut T` and reconstructed
//! from it. The encoding is what lets [`AtomicSlot`](crate::AtomicSlot)
//! move whole ownership shapes with single-word atomic operations.
//!
//! The implementation set is closed on purpose: four shapes cover the
//! ownership vocabulary this crate deals in, and keeping the set small
//! keeps the unsafe reconstruction contract auditable in one place.

/// A value that is represented by exactly one raw pointer.
///
/// Implementors must uphold, for every value `p`:
/// - round-trip: `P::from_raw(p.into_raw())` reconstructs a value with the
///   same logical content and the same ownership obligations;
/// - sentinel freedom: `into_raw` never returns null for a present value,
///   so `Option<P>` can reserve null for `None` without aliasing a live
///   encoding.
///
/// `into_raw` gives up whatever the shape owns (nothing is dropped);
/// `from_raw` takes those obligations back. Between the two calls the raw
/// word is the sole carrier of ownership.
pub trait PtrShape<T> {
    /// Reconstruct the shape from a previously encoded pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must have come from `into_raw` on a value of this exact shape
    /// type, and the ownership it encoded must not have been reclaimed by
    /// another `from_raw` call in the meantime.
    unsafe fn from_raw(ptr: *mut T) -> Self;

    /// Encode the shape into its raw pointer, surrendering ownership to
    /// the returned word.
    fn into_raw(self) -> *mut T;
}

/// Exclusive heap ownership. Decoding re-forms the `Box`, so dropping the
/// decoded value releases the allocation.
impl<T> PtrShape<T> for Box<T> {
    unsafe fn from_raw(ptr: *mut T) -> Self {
        unsafe { Box::from_raw(ptr) }
    }

    fn into_raw(self) -> *mut T {
        Box::into_raw(self)
    }
}

/// Shared borrow. Carries no release obligation; the lifetime bound on the
/// reference keeps the pointee alive past any decode.
impl<T> PtrShape<T> for &'_ T {
    unsafe fn from_raw(ptr: *mut T) -> Self {
        unsafe { &*ptr }
    }

    fn into_raw(self) -> *mut T {
        self as *const T as *mut T
    }
}

/// Exclusive borrow. Like `&T`, but decoding hands back the unique `&mut`,
/// so a given encoding must be decoded at most once.
impl<T> PtrShape<T> for &'_ mut T {
    unsafe fn from_raw(ptr: *mut T) -> Self {
        unsafe { &mut *ptr }
    }

    fn into_raw(self) -> *mut T {
        self
    }
}

/// Optional wrapper: `None` is the null sentinel. Valid shapes never
/// encode to null (see the trait contract), so presence is unambiguous.
impl<T, P: PtrShape<T>> PtrShape<T> for Option<P> {
    unsafe fn from_raw(ptr: *mut T) -> Self {
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { P::from_raw(ptr) })
        }
    }

    fn into_raw(self) -> *mut T {
        match self {
            Some(p) => p.into_raw(),
            None => core::ptr::null_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_round_trip() {
        let b = Box::new(17u32);
        let raw = b.into_raw();
        let b = unsafe { <Box<u32>>::from_raw(raw) };
        assert_eq!(*b, 17);
    }

    #[test]
    fn ref_round_trip_is_same_address() {
        let x = 5u8;
        let raw = <&u8 as PtrShape<u8>>::into_raw(&x);
        assert_eq!(raw as *const u8, &x as *const u8);
        let r: &u8 = unsafe { PtrShape::from_raw(raw) };
        assert_eq!(*r, 5);
    }

    #[test]
    fn option_none_is_null() {
        let raw = <Option<&u8> as PtrShape<u8>>::into_raw(None);
        assert!(raw.is_null());
        let back: Option<&u8> = unsafe { PtrShape::from_raw(raw) };
        assert!(back.is_none());
    }

    #[test]
    fn option_some_survives() {
        let x = 9u8;
        let raw = Some(&x).into_raw();
        let back: Option<&u8> = unsafe { PtrShape::from_raw(raw) };
        assert_eq!(back.copied(), Some(9));
    }
}
