//! atomic-slot: lock-free atomic ownership slots, bounded-write cells,
//! and fixed-capacity containers.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: give allocation-conscious code a small set of primitives where
//!   every piece has one precise contract that can be audited on its own.
//! - Layers:
//!   - PtrShape<T>: the encode/decode capability that represents an
//!     ownership shape (owned heap value, shared borrow, exclusive
//!     borrow, optionally absent) as a single raw word. All unsafe
//!     pointer reconstruction lives behind this trait and the closed set
//!     of four implementations.
//!   - AtomicSlot<T, P>: a single-word atomic cell over any shape;
//!     load/store/swap/compare-exchange move whole ownership shapes
//!     between threads. Raw-ordering variants are `unsafe` (the caller
//!     picks the fences); the default variants are pinned to `SeqCst`
//!     and safe by construction.
//!   - LimitedWriteCell<T>: "set at most N times" — an atomic budget
//!     counter arbitrating write admission over retired value storage,
//!     so reads stay borrow-safe without reclamation machinery.
//!   - Fixed-capacity containers (ArrayVec, ArrayMap, ArraySet, BitSet)
//!     and MinHeap: single-threaded structures; the fixed-capacity family
//!     never reallocates and reports capacity exhaustion by handing the
//!     element back.
//!
//! Constraints
//! - The slot and the cell are lock-free: no operation blocks, CAS
//!   failure is an expected contention outcome and retry is caller
//!   policy.
//! - Exactly-once release: every owned value that enters a slot or cell
//!   is released exactly once, whichever exit path runs (store, swap to
//!   caller, consumption, or drop).
//! - The containers have no internal synchronization; sharing one across
//!   threads without external locking is out of contract.
//! - Capacity is fixed at construction for the array family and the bit
//!   set; only MinHeap may reallocate.
//!
//! Why this split?
//! - Localize unsafety: raw-pointer decode exists only inside `PtrShape`
//!   impls and the two atomic types; containers are almost entirely safe
//!   code over `MaybeUninit` buffers.
//! - Type-level misuse prevention: owning shapes cannot be copy-loaded
//!   out of a slot — `load`/`compare_exchange` only exist for `Copy`
//!   shapes, so double-ownership is unrepresentable rather than checked.
//! - Ordering discipline in one place: the `unsafe fn *_with` families
//!   document the one hazard (a relaxed load can surface a pointer before
//!   its pointee's writes), and the safe families cannot hit it.
//!
//! Notes and non-goals
//! - No dynamic-growth collections, no GC, no cross-process memory, no
//!   serialization surface.
//! - An arena or any other buffer source is an external collaborator:
//!   `BitSet` consumes caller-supplied word storage but no arena is
//!   implemented here.
//! - Concurrency verification: the `loom` feature swaps the slot/cell
//!   atomics for loom's and enables the interleaving tests in
//!   `src/loom_tests.rs`:
//!
//! ```text
//! cargo test --features loom
//! ```

mod array_map;
mod array_vec;
mod bit_set;
mod error;
mod limited;
mod min_heap;
mod shape;
mod slot;

#[cfg(all(test, feature = "loom"))]
mod loom_tests;

// Public surface
pub use array_map::{ArrayMap, ArraySet};
pub use array_vec::ArrayVec;
pub use bit_set::{BitSet, Iter as BitSetIter};
pub use error::{CapacityError, OrderViolation, PopOrderViolation};
pub use limited::LimitedWriteCell;
pub use min_heap::MinHeap;
pub use shape::PtrShape;
pub use slot::{
    AtomicBox, AtomicMutRef, AtomicOptionBox, AtomicOptionMutRef, AtomicOptionRef, AtomicRef,
    AtomicSlot,
};
