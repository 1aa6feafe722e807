use core::fmt;
use core::mem;
use core::ops::{Index, IndexMut};
use core::ptr;
use core::slice;

use crate::error::DynArrayError;
use crate::iter::{Iter, IterMut, IterRev};
use crate::raw::RawBuf;

/// Capacity allocated by the first growth of an empty array.
pub const MIN_NON_ZERO_CAPACITY: usize = 1;

/// Factor applied to the capacity of a full array when it grows.
pub const GROWTH_FACTOR: usize = 2;

/// A growable array owning one contiguous allocation
///
/// Slots `[0, len)` hold live elements; slots `[len, capacity)` are
/// allocated but uninitialized. The allocation is created lazily and only
/// ever grows, through [`DynArray::reserve`].
///
/// References returned by [`DynArray::at`] or the iterators borrow the
/// array, so they cannot outlive a call that may reallocate or shift:
///
/// ```compile_fail
/// use dynarray::DynArray;
///
/// let mut array = DynArray::new();
/// array.push_back(1).unwrap();
/// let first = array.at(0).unwrap();
/// array.push_back(2).unwrap(); // may reallocate under `first`
/// assert_eq!(*first, 1);
/// ```
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

/// Moves the tail left over a run of erased slots and restores `len`.
///
/// Runs on drop, so the array is consistent again even when dropping one
/// of the erased elements panics.
struct CloseGap<'a, T> {
    array: &'a mut DynArray<T>,
    first: usize,
    last: usize,
    tail_len: usize,
}

impl<T> Drop for CloseGap<'_, T> {
    fn drop(&mut self) {
        // SAFETY: `[last, last + tail_len)` are live elements outside `len`
        // and `[first, last)` no longer holds live values, so the bitwise
        // move neither duplicates nor loses an element.
        unsafe {
            ptr::copy(
                self.array.buf.slot(self.last),
                self.array.buf.slot(self.first),
                self.tail_len,
            );
        }
        self.array.len = self.first + self.tail_len;
    }
}

#[cold]
fn allocation_failed(err: DynArrayError) -> ! {
    panic!("{err}")
}

impl<T> DynArray<T> {
    /// Creates an empty array. Nothing is allocated.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates an empty array with exactly `capacity` allocated slots.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::CapacityOverflow` if `capacity` elements do
    /// not fit in `isize::MAX` bytes, or `DynArrayError::AllocationFailure`
    /// if the allocator cannot provide the block.
    pub fn with_capacity(capacity: usize) -> Result<Self, DynArrayError> {
        Ok(Self {
            buf: RawBuf::allocate(capacity)?,
            len: 0,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    fn check_index(&self, index: usize) -> Result<(), DynArrayError> {
        if index >= self.len {
            Err(DynArrayError::OutOfRange {
                index,
                length: self.len,
            })
        } else {
            Ok(())
        }
    }

    /// Gets the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::OutOfRange` if `index >= len()`.
    #[allow(clippy::indexing_slicing)] // Bounds checked above
    pub fn at(&self, index: usize) -> Result<&T, DynArrayError> {
        self.check_index(index)?;
        Ok(&self.as_slice()[index])
    }

    /// Gets a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::OutOfRange` if `index >= len()`.
    #[allow(clippy::indexing_slicing)]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DynArrayError> {
        self.check_index(index)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Gets the element at `index`, or `None` if it is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Views the live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the pointer is non-null and aligned (dangling only when
        // nothing is allocated, where `len` is 0) and `[0, len)` is live.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` makes the borrow unique.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Grows the allocation to exactly `new_capacity` slots.
    ///
    /// The new block is allocated before anything else happens; the live
    /// elements are then moved across in index order and the old block is
    /// released. Does nothing if `new_capacity <= capacity()`. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::CapacityOverflow` or
    /// `DynArrayError::AllocationFailure`; the array is unchanged in both
    /// cases.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), DynArrayError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }

        let new_buf = RawBuf::allocate(new_capacity)?;
        // SAFETY: both blocks hold at least `len` slots and are distinct
        // allocations. After the copy the old slots count as uninitialized:
        // dropping the old `RawBuf` only releases memory.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_ptr(), self.len);
        }
        self.buf = new_buf;
        Ok(())
    }

    /// Doubles the capacity until `additional` more elements fit.
    fn grow_for(&mut self, additional: usize) -> Result<(), DynArrayError> {
        let capacity = self.capacity();
        let required = self
            .len
            .checked_add(additional)
            .ok_or(DynArrayError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        if required <= capacity {
            return Ok(());
        }

        let mut new_capacity = capacity.max(MIN_NON_ZERO_CAPACITY);
        while new_capacity < required {
            new_capacity =
                new_capacity
                    .checked_mul(GROWTH_FACTOR)
                    .ok_or(DynArrayError::CapacityOverflow {
                        requested: new_capacity.saturating_mul(GROWTH_FACTOR),
                    })?;
        }
        self.reserve(new_capacity)
    }

    /// Appends `value` after the last element.
    ///
    /// A full array doubles its capacity first (an empty one grows to 1).
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::CapacityOverflow` or
    /// `DynArrayError::AllocationFailure` if growing fails. The array is
    /// unchanged and `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<(), DynArrayError> {
        self.grow_for(1)?;
        // SAFETY: `len < capacity` after growing, so the slot is allocated
        // and uninitialized.
        unsafe {
            self.buf.slot(self.len).write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// Returns `None` and leaves the array untouched if it is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY: the slot held the last live element and is no longer
        // covered by `len`, so ownership moves out exactly once.
        Some(unsafe { self.buf.slot(self.len).read() })
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::EmptyContainer` if the array is empty.
    pub fn try_pop_back(&mut self) -> Result<T, DynArrayError> {
        self.pop_back().ok_or(DynArrayError::EmptyContainer)
    }

    /// Inserts `value` at `index`, shifting later elements one slot right.
    ///
    /// `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::OutOfRange` if `index > len()`, checked
    /// before any growth. Growth failures are reported as by `push_back`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), DynArrayError> {
        if index > self.len {
            return Err(DynArrayError::OutOfRange {
                index,
                length: self.len,
            });
        }

        self.grow_for(1)?;
        // SAFETY: `len < capacity`, so `[index, len]` is inside the block.
        // `ptr::copy` handles the overlapping shift; the hole it leaves at
        // `index` is then filled without dropping the stale bits.
        unsafe {
            let hole = self.buf.slot(index);
            ptr::copy(hole, hole.add(1), self.len - index);
            hole.write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// one slot left.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::OutOfRange` if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T, DynArrayError> {
        self.check_index(index)?;

        // SAFETY: `index < len`. The element is read out before its slot is
        // overwritten by the shift, and `len` shrinks by the one element
        // that left.
        unsafe {
            let hole = self.buf.slot(index);
            let value = hole.read();
            ptr::copy(hole.add(1), hole, self.len - index - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Drops the element at `index`, shifting later elements one slot left.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::OutOfRange` if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> Result<(), DynArrayError> {
        self.remove(index).map(drop)
    }

    /// Drops the elements in `[first, last)` and closes the gap.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::RangeOutOfBounds` if `first >= len()`,
    /// `last > len()` or `first >= last`. Empty ranges are rejected.
    pub fn erase_range(&mut self, first: usize, last: usize) -> Result<(), DynArrayError> {
        if first >= self.len || last > self.len || first >= last {
            return Err(DynArrayError::RangeOutOfBounds {
                first,
                last,
                length: self.len,
            });
        }

        let tail_len = self.len - last;
        self.len = first;
        let gap = CloseGap {
            array: self,
            first,
            last,
            tail_len,
        };
        // SAFETY: `[first, last)` were live and are now outside `len`; each
        // is dropped once. `gap` moves the tail down afterwards, also when a
        // drop unwinds.
        unsafe {
            let erased = ptr::slice_from_raw_parts_mut(gap.array.buf.slot(first), last - first);
            ptr::drop_in_place(erased);
        }
        drop(gap);
        Ok(())
    }

    /// Drops every element in index order. The allocation is kept.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), self.len);
        self.len = 0;
        // SAFETY: `live` covers the elements that were live; `len` is already
        // 0, so a panicking drop cannot cause a second drop later.
        unsafe {
            ptr::drop_in_place(live);
        }
    }

    /// Returns an iterator over the elements in index order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }

    /// Returns an iterator over the elements in descending index order.
    #[must_use]
    pub fn iter_rev(&self) -> IterRev<'_, T> {
        IterRev::new(self.as_slice())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.as_mut_slice())
    }

    /// Copies the array into a fresh allocation of the same capacity.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::AllocationFailure` if the new block cannot
    /// be allocated.
    pub fn try_clone(&self) -> Result<Self, DynArrayError>
    where
        T: Clone,
    {
        let mut copy = Self::with_capacity(self.capacity())?;
        for value in self {
            let cloned = value.clone();
            // SAFETY: `copy` has our capacity and `copy.len < self.len`, so
            // the slot is allocated and uninitialized. `len` is bumped per
            // element so a panicking `clone` drops only finished copies.
            unsafe {
                copy.buf.slot(copy.len).write(cloned);
            }
            copy.len += 1;
        }
        Ok(copy)
    }

    /// Takes the buffer out, leaving an empty unallocated array behind.
    pub(crate) fn into_raw_parts(mut self) -> (RawBuf<T>, usize) {
        let len = mem::replace(&mut self.len, 0);
        let buf = mem::replace(&mut self.buf, RawBuf::new());
        (buf, len)
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        self.clear();
        // `buf` releases the allocation when it drops.
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// # Panics
    ///
    /// Panics if the new block cannot be allocated; use
    /// [`DynArray::try_clone`] to handle that case.
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| allocation_failed(err))
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(value) => value,
            None => panic!("Index {index} out of bounds for array of length {len}"),
        }
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("Index {index} out of bounds for array of length {len}"),
        }
    }
}

impl<T: PartialEq<U>, U> PartialEq<DynArray<U>> for DynArray<T> {
    fn eq(&self, other: &DynArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: PartialEq<U>, U> PartialEq<[U]> for DynArray<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for DynArray<T> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for DynArray<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> Extend<T> for DynArray<T> {
    /// # Panics
    ///
    /// Panics if growing the array fails.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.grow_for(lower) {
            allocation_failed(err);
        }
        for value in iter {
            if let Err(err) = self.push_back(value) {
                allocation_failed(err);
            }
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    /// # Panics
    ///
    /// Panics if the block for `items.len()` elements cannot be allocated.
    fn from(items: &[T]) -> Self {
        let mut array =
            Self::with_capacity(items.len()).unwrap_or_else(|err| allocation_failed(err));
        array.extend(items.iter().cloned());
        array
    }
}
