use alloc::alloc::{alloc, dealloc, Layout};
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use crate::error::DynArrayError;

/// Owns one block of `cap` uninitialized `T` slots.
///
/// `RawBuf` only allocates and releases memory. It never constructs, reads
/// or drops elements; tracking which slots are live is the owner's job.
/// A zero capacity, or a zero-sized `T`, holds no allocation and uses a
/// dangling pointer.
#[derive(Debug)]
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: `RawBuf` uniquely owns its allocation, so it can move between
// threads or be shared exactly when `T` can.
unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates a block of exactly `cap` slots.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::CapacityOverflow` if `cap` slots do not fit in
    /// `isize::MAX` bytes, and `DynArrayError::AllocationFailure` if the
    /// global allocator returns null.
    pub(crate) fn allocate(cap: usize) -> Result<Self, DynArrayError> {
        if cap == 0 {
            return Ok(Self::new());
        }

        let layout = Self::layout(cap)?;
        if Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        // SAFETY: `cap > 0` and `T` is not zero-sized, so the layout is non-zero.
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(DynArrayError::AllocationFailure {
            bytes: layout.size(),
        })?;

        Ok(Self {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }

    fn layout(cap: usize) -> Result<Layout, DynArrayError> {
        Layout::array::<T>(cap).map_err(|_| DynArrayError::CapacityOverflow { requested: cap })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index` must be at most `capacity()`. The slot at `capacity()` is
    /// one-past-the-end and must not be read or written.
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap, "slot {index} beyond capacity {}", self.cap);
        // SAFETY: the caller keeps `index` within the allocation (or one past it).
        unsafe { self.ptr.as_ptr().add(index) }
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap == 0 || Self::IS_ZST {
            return;
        }
        // The same layout was accepted in `allocate`, so this cannot fail.
        if let Ok(layout) = Self::layout(self.cap) {
            // SAFETY: `ptr` was returned by `alloc` with exactly this layout
            // and has not been released before.
            unsafe {
                dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
            }
        }
    }
}
