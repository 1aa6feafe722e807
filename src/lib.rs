#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

//! `DynArray`: a growable contiguous array with explicit, fallible allocation.
//!
//! `DynArray<T>` owns a single heap block of `capacity` slots, of which the
//! first `len` hold live elements. It supports indexed access, amortized
//! constant-time append, positional insert and erase, range erase, clearing
//! and iteration. Every operation that may allocate returns a `Result`, so
//! allocation failure is reported to the caller instead of aborting.
//!
//! This crate is `no_std` compatible; it needs only `core` and `alloc`.
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! - `push_back()`: amortized O(1), O(n) on a growth step
//! - `at()`, `get()`, indexing: O(1)
//! - `pop_back()`: O(1)
//! - `insert(i, _)`, `erase(i)`, `remove(i)`: O(n - i)
//! - `erase_range(first, last)`: O(n - first)
//! - `clear()`: O(n) element drops, no deallocation
//! - `reserve()`: O(n) when it grows, O(1) otherwise
//!
//! ## Growth Policy
//! - `new()` allocates nothing
//! - A full array grows to `max(MIN_NON_ZERO_CAPACITY, capacity * GROWTH_FACTOR)`,
//!   i.e. 1, 2, 4, 8, ...
//! - Capacity never shrinks; `clear()` and erasing keep the allocation
//!
//! ## `no_std` Compatibility
//!
//! `DynArrayError` implements `core::error::Error` either way. The optional
//! `std` feature only switches on `thiserror`'s std support:
//! ```toml
//! [dependencies]
//! dynarray = { version = "0.1", features = ["std"] }
//! ```
//!
//! # Basic Usage
//!
//! ```
//! # use dynarray::DynArray;
//! let mut array = DynArray::new();
//! assert!(array.is_empty());
//!
//! array.push_back(10).unwrap();
//! array.push_back(20).unwrap();
//! array.push_back(30).unwrap();
//! assert_eq!(array, [10, 20, 30]);
//!
//! array.insert(1, 15).unwrap();
//! assert_eq!(array, [10, 15, 20, 30]);
//!
//! array.erase(2).unwrap();
//! assert_eq!(array, [10, 15, 30]);
//!
//! array.push_back(40).unwrap();
//! array.push_back(50).unwrap();
//! array.erase_range(1, 4).unwrap();
//! assert_eq!(array, [10, 50]);
//!
//! array.clear();
//! assert!(array.is_empty());
//! ```
//!
//! # Error Handling
//!
//! Bounds violations are reported before anything is modified:
//!
//! ```
//! # use dynarray::{DynArray, DynArrayError};
//! let mut array: DynArray<i32> = [1, 2, 3].into_iter().collect();
//!
//! assert_eq!(array.at(3), Err(DynArrayError::OutOfRange { index: 3, length: 3 }));
//! assert!(array.insert(4, 0).is_err());
//! assert!(array.erase_range(2, 2).is_err());
//! assert_eq!(array, [1, 2, 3]);
//!
//! // Popping an empty array is a no-op; `try_pop_back` reports it instead.
//! array.clear();
//! assert_eq!(array.pop_back(), None);
//! assert_eq!(array.try_pop_back(), Err(DynArrayError::EmptyContainer));
//! ```
//!
//! # Iterator Support
//!
//! ```
//! # use dynarray::DynArray;
//! let array: DynArray<&str> = ["a", "b", "c"].into_iter().collect();
//!
//! for item in &array {
//!     println!("{item}");
//! }
//!
//! let backwards: Vec<_> = array.iter_rev().copied().collect();
//! assert_eq!(backwards, ["c", "b", "a"]);
//!
//! let owned: Vec<_> = array.into_iter().collect();
//! assert_eq!(owned, ["a", "b", "c"]);
//! ```

extern crate alloc;

#[cfg(test)]
extern crate std;

mod array;
mod error;
mod iter;
mod raw;

// Re-export public types and traits
pub use array::{DynArray, GROWTH_FACTOR, MIN_NON_ZERO_CAPACITY};
pub use error::DynArrayError;
pub use iter::{IntoIter, Iter, IterMut, IterRev};
