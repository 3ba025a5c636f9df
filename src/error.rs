//! Failure types shared by the fixed-capacity containers and the heap.
//!
//! Every recoverable failure hands the rejected element(s) back to the
//! caller, so nothing is lost on the error path.

use core::fmt;

/// A mutation would exceed the container's fixed capacity.
///
/// Carries the element that could not be inserted; the container state is
/// unchanged.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CapacityError<T>(pub T);

impl<T> CapacityError<T> {
    /// Recover the rejected element.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CapacityError(..)")
    }
}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fixed capacity exceeded")
    }
}

impl<T> std::error::Error for CapacityError<T> {}

/// A heap admission compared two incomparable priorities.
///
/// Returned by [`MinHeap::push`](crate::MinHeap::push); the heap is
/// restored to its pre-call arrangement and the rejected entry rides back
/// in the error.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OrderViolation<T, K> {
    /// The payload that was being pushed.
    pub data: T,
    /// Its priority, incomparable with one already in the heap.
    pub priority: K,
}

impl<T, K> fmt::Debug for OrderViolation<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderViolation(..)")
    }
}

impl<T, K> fmt::Display for OrderViolation<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("priority is incomparable with an element in the heap")
    }
}

impl<T, K> std::error::Error for OrderViolation<T, K> {}

/// A pop compared two incomparable priorities while re-sifting.
///
/// The heap is restored to its pre-call arrangement; nothing is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopOrderViolation;

impl fmt::Display for PopOrderViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("incomparable priorities encountered while popping")
    }
}

impl std::error::Error for PopOrderViolation {}
