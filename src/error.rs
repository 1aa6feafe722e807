use thiserror::Error;

/// Error types for `DynArray` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DynArrayError {
    /// Index is beyond the permitted bound for the operation
    #[error("Index out of range: index {index} is beyond array length {length}")]
    OutOfRange {
        /// Index that was accessed
        index: usize,
        /// Current length of the array
        length: usize,
    },
    /// Range is empty, inverted, or reaches past the end of the array
    #[error("Range out of bounds: {first}..{last} is not a non-empty range within length {length}")]
    RangeOutOfBounds {
        /// Start of the requested range (inclusive)
        first: usize,
        /// End of the requested range (exclusive)
        last: usize,
        /// Current length of the array
        length: usize,
    },
    /// The global allocator could not provide the requested block
    #[error("Allocation failure: could not allocate {bytes} bytes")]
    AllocationFailure {
        /// Size of the block that was requested
        bytes: usize,
    },
    /// Requested capacity cannot be represented as an allocation size
    #[error("Capacity overflow: {requested} elements exceed the maximum allocation size")]
    CapacityOverflow {
        /// Number of slots that was requested
        requested: usize,
    },
    /// Operation requires at least one element
    #[error("Operation on empty array")]
    EmptyContainer,
}
