// src/buffer/core.rs
//! Core buffer structure: construction, growth, and accessors
//!
//! This module provides the owning [`Buffer`] type with its capacity-growth
//! discipline and the zero-sentinel invariant.

use zeroize::{DefaultIsZeroes, Zeroize};

use super::raw::RawBuf;
use crate::alloc::{BufAlloc, Global};
use crate::error::{BufferError, Result};

/// A generic growable buffer over fixed-width elements.
///
/// `Buffer` owns its backing storage exclusively and releases it on drop.
/// Storage always reserves one extra element slot past the logical end,
/// kept at the zero value, so the populated elements double as a
/// zero-terminated sequence of arbitrary element width, not just 1-byte
/// characters; see [`as_terminated`](Self::as_terminated).
///
/// Elements are plain data: `T` must implement
/// [`DefaultIsZeroes`](zeroize::DefaultIsZeroes), meaning `T::default()` is
/// the zeroed representation. All primitive numeric types qualify, and the
/// marker can be implemented for `Copy + Default` records.
///
/// Every operation that may allocate returns a [`Result`] and leaves the
/// buffer unchanged on failure; nothing fails silently.
///
/// # Examples
///
/// ```
/// use zvec::Buffer;
/// # use zvec::BufferError;
///
/// let mut buf: Buffer<u32> = Buffer::new();
/// buf.push(1)?;
/// buf.push(2)?;
/// assert_eq!(buf.as_slice(), &[1, 2]);
/// # Ok::<(), BufferError>(())
/// ```
pub struct Buffer<T: DefaultIsZeroes, A: BufAlloc = Global> {
    /// Backing storage (nil until the first growth)
    pub(crate) raw: RawBuf<T, A>,
    /// Number of populated elements
    pub(crate) len: usize,
}

impl<T: DefaultIsZeroes> Buffer<T, Global> {
    /// Creates the nil buffer: no storage, zero length, zero capacity.
    ///
    /// Never allocates; the first growing operation does.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    ///
    /// let buf: Buffer<u8> = Buffer::new();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates a buffer of `len` zero elements.
    ///
    /// Allocates exactly enough storage for `len` elements plus the
    /// trailing sentinel; `len == capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let buf: Buffer<u64> = Buffer::zeroed(3)?;
    /// assert_eq!(buf.as_slice(), &[0, 0, 0]);
    /// assert_eq!(buf.capacity(), 3);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn zeroed(len: usize) -> Result<Self> {
        Self::zeroed_in(len, Global)
    }

    /// Creates an empty buffer with pre-allocated capacity.
    ///
    /// Like [`zeroed`](Self::zeroed) but the length stays 0: pre-allocates
    /// without populating.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let buf: Buffer<u16> = Buffer::with_capacity(8)?;
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.capacity(), 8);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates an owning buffer holding a deep copy of `src`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let buf = Buffer::from_slice(&[1i32, 2, 3])?;
    /// assert_eq!(buf.as_slice(), &[1, 2, 3]);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn from_slice(src: &[T]) -> Result<Self> {
        Self::from_slice_in(src, Global)
    }
}

impl<T: DefaultIsZeroes, A: BufAlloc> Buffer<T, A> {
    /// Creates the nil buffer using the given allocator.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            raw: RawBuf::new_in(alloc),
            len: 0,
        }
    }

    /// Creates a buffer of `len` zero elements using the given allocator.
    pub fn zeroed_in(len: usize, alloc: A) -> Result<Self> {
        let mut raw = RawBuf::new_in(alloc);
        raw.grow_to(len)?;
        // SAFETY: len + 1 slots were just allocated.
        unsafe { raw.fill_default(0, len + 1) };
        Ok(Self { raw, len })
    }

    /// Creates an empty buffer with pre-allocated capacity using the given
    /// allocator.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        let mut raw = RawBuf::new_in(alloc);
        raw.grow_to(capacity)?;
        // SAFETY: capacity + 1 slots exist; initialize the sentinel.
        unsafe { raw.fill_default(0, 1) };
        Ok(Self { raw, len: 0 })
    }

    /// Creates an owning copy of `src` using the given allocator.
    pub fn from_slice_in(src: &[T], alloc: A) -> Result<Self> {
        let mut raw = RawBuf::new_in(alloc);
        raw.grow_to(src.len())?;
        // SAFETY: src.len() + 1 slots exist and src cannot alias a block
        // this allocator just produced.
        unsafe {
            raw.copy_in(0, src.as_ptr(), src.len());
            raw.fill_default(src.len(), src.len() + 1);
        }
        Ok(Self {
            raw,
            len: src.len(),
        })
    }

    /// Returns a deep copy of this buffer using a clone of its allocator.
    ///
    /// The copy has its own storage; mutating it never affects `self`.
    pub fn try_clone(&self) -> Result<Self>
    where
        A: Clone,
    {
        Self::from_slice_in(self.as_slice(), self.raw.allocator().clone())
    }

    /// Returns the number of populated elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the storage can hold without
    /// reallocation.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns a reference to the allocator this buffer grows with.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Returns the populated elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized; base is dangling only
        // when len == 0.
        unsafe { std::slice::from_raw_parts(self.raw.base().as_ptr(), self.len) }
    }

    /// Returns the populated elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`; &mut self gives exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.raw.base().as_ptr(), self.len) }
    }

    /// Returns the populated elements plus the trailing zero sentinel.
    ///
    /// The result always ends in `T::default()`, which makes it usable as a
    /// zero-terminated sequence. The nil buffer has no storage and yields
    /// an empty slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let buf = Buffer::from_slice(&[7u8, 8, 9])?;
    /// assert_eq!(buf.as_terminated(), &[7, 8, 9, 0]);
    /// # Ok::<(), BufferError>(())
    /// ```
    #[inline]
    pub fn as_terminated(&self) -> &[T] {
        if !self.raw.is_allocated() {
            return &[];
        }
        // SAFETY: slots [0, len] inclusive are initialized when allocated.
        unsafe { std::slice::from_raw_parts(self.raw.base().as_ptr(), self.len + 1) }
    }

    /// Returns the address of the first element.
    ///
    /// Dangling (but well-aligned) for the nil buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.raw.base().as_ptr()
    }

    /// Returns the mutable address of the first element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.base().as_ptr()
    }

    /// Returns the element at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns the mutable element at `index`, or `None` past the end.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns the first element, or `None` when empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, or `None` when empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the mutable first element, or `None` when empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the mutable last element, or `None` when empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Resizes the buffer to `new_len` elements.
    ///
    /// Growth doubles the capacity from a floor of 1 until it exceeds
    /// `new_len`, reallocating through the buffer's allocator; newly
    /// exposed elements are zero, as is the sentinel past them. Shrinking
    /// retains capacity and refreshes only the sentinel at the new end.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailed`] if the allocator refuses the
    /// request, [`BufferError::CapacityOverflow`] if the element count
    /// overflows the layout arithmetic. Either way the buffer keeps its
    /// prior length, capacity, and contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let mut buf = Buffer::from_slice(&[5u32])?;
    /// buf.resize(3)?;
    /// assert_eq!(buf.as_slice(), &[5, 0, 0]);
    ///
    /// buf.resize(1)?;
    /// assert_eq!(buf.as_slice(), &[5]);
    /// assert!(buf.capacity() >= 3);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        let old_len = self.len;
        if new_len == old_len {
            return Ok(());
        }

        if new_len >= self.raw.capacity() {
            let mut expanded = self.raw.capacity().max(1);
            while expanded <= new_len {
                expanded = expanded
                    .checked_mul(2)
                    .ok_or(BufferError::CapacityOverflow)?;
            }
            self.raw.grow_to(expanded)?;
        }

        if new_len > old_len {
            // SAFETY: capacity now exceeds new_len, so slot new_len exists.
            unsafe { self.raw.fill_default(old_len, new_len + 1) };
            self.len = new_len;
        } else {
            self.truncate_to(new_len);
        }
        Ok(())
    }

    /// Grows capacity to at least `total` elements without changing the
    /// length or the populated elements. No-op when `total` does not exceed
    /// the current length.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let mut buf = Buffer::from_slice(&[1u8, 2])?;
    /// buf.reserve(100)?;
    /// assert!(buf.capacity() > 100);
    /// assert_eq!(buf.as_slice(), &[1, 2]);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn reserve(&mut self, total: usize) -> Result<()> {
        if total <= self.len {
            return Ok(());
        }
        let keep = self.len;
        self.resize(total)?;
        self.truncate_to(keep);
        Ok(())
    }

    /// Shrinks the length to 0, retaining capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate_to(0);
    }

    /// Shrinks to `new_len`, refreshing the sentinel at the new end.
    /// Callers guarantee `new_len <= self.len`.
    pub(crate) fn truncate_to(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.len);
        if self.raw.is_allocated() {
            // SAFETY: new_len <= len <= capacity.
            unsafe { self.raw.fill_default(new_len, new_len + 1) };
        }
        self.len = new_len;
    }

    /// Zeroes the elements in `start..end` in place without changing the
    /// length. Bounds clamp to the populated range.
    pub fn wipe_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.len);
        let start = start.min(end);
        self.as_mut_slice()[start..end].zeroize();
    }

    /// Zeroes every populated element in place without changing the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let mut buf = Buffer::from_slice(&[1u8, 2, 3])?;
    /// buf.wipe();
    /// assert_eq!(buf.as_slice(), &[0, 0, 0]);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn wipe(&mut self) {
        self.as_mut_slice().zeroize();
    }

    /// Releases the backing storage and resets to the nil state.
    ///
    /// Dropping the buffer does the same; `free` is for reuse of the
    /// variable afterwards.
    pub fn free(&mut self) {
        self.raw.release();
        self.len = 0;
    }

    /// Exchanges contents with `other` in constant time.
    ///
    /// Only the storage handles move; no element is copied.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Converts an address inside the storage back into an element index.
    ///
    /// Clamps to 0 for pointers preceding the storage; the caller is
    /// responsible for passing a pointer that lies within it.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let buf = Buffer::from_slice(&[10u32, 20, 30])?;
    /// let second = &buf.as_slice()[1] as *const u32;
    /// assert_eq!(buf.offset_of(second), 1);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn offset_of(&self, ptr: *const T) -> usize {
        let base = self.raw.base().as_ptr() as usize;
        (ptr as usize).saturating_sub(base) / size_of::<T>()
    }
}

impl<T: DefaultIsZeroes> Default for Buffer<T, Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DefaultIsZeroes, A: BufAlloc> AsRef<[T]> for Buffer<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: DefaultIsZeroes + std::fmt::Debug, A: BufAlloc> std::fmt::Debug for Buffer<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: DefaultIsZeroes + PartialEq, A: BufAlloc, B: BufAlloc> PartialEq<Buffer<T, B>>
    for Buffer<T, A>
{
    fn eq(&self, other: &Buffer<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: DefaultIsZeroes + PartialEq, A: BufAlloc> PartialEq<[T]> for Buffer<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: DefaultIsZeroes + PartialEq, A: BufAlloc, const N: usize> PartialEq<[T; N]>
    for Buffer<T, A>
{
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: DefaultIsZeroes + Eq, A: BufAlloc> Eq for Buffer<T, A> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_nil() {
        let buf: Buffer<u32> = Buffer::new();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert!(buf.as_slice().is_empty());
        assert!(buf.as_terminated().is_empty());
    }

    #[test]
    fn test_zeroed() {
        let buf: Buffer<u64> = Buffer::zeroed(4).unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(buf.as_terminated(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_with_capacity() {
        let buf: Buffer<u8> = Buffer::with_capacity(16).unwrap();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.as_terminated(), &[0]);
    }

    #[test]
    fn test_from_slice_deep_copies() {
        let src = [1u32, 2, 3];
        let buf = Buffer::from_slice(&src).unwrap();
        assert_eq!(buf.as_slice(), &src);
        assert_ne!(buf.as_ptr(), src.as_ptr());
    }

    #[test]
    fn test_try_clone_independent() {
        let a = Buffer::from_slice(&[9u8, 8, 7]).unwrap();
        let mut b = a.try_clone().unwrap();
        b.as_mut_slice()[0] = 1;
        assert_eq!(a.as_slice(), &[9, 8, 7]);
        assert_eq!(b.as_slice(), &[1, 8, 7]);
    }

    #[test]
    fn test_resize_grow_zero_fills() {
        let mut buf = Buffer::from_slice(&[5u32]).unwrap();
        buf.resize(4).unwrap();
        assert_eq!(buf.len(), 4);
        assert!(buf.capacity() > 4);
        assert_eq!(buf.as_slice(), &[5, 0, 0, 0]);
        assert_eq!(buf.as_terminated().last(), Some(&0));
    }

    #[test]
    fn test_resize_shrink_retains_capacity() {
        let mut buf: Buffer<u16> = Buffer::zeroed(8).unwrap();
        let cap = buf.capacity();
        buf.resize(2).unwrap();
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_resize_doubles_past_request() {
        let mut buf: Buffer<u8> = Buffer::new();
        buf.resize(5).unwrap();
        // doubling from a floor of 1 until the capacity exceeds 5
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn test_resize_overflow_leaves_untouched() {
        let mut buf = Buffer::from_slice(&[1u64, 2]).unwrap();
        let cap = buf.capacity();
        assert_eq!(buf.resize(usize::MAX / 2), Err(BufferError::CapacityOverflow));
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_reserve_keeps_contents() {
        let mut buf = Buffer::from_slice(&[3i32, 4]).unwrap();
        buf.reserve(64).unwrap();
        assert!(buf.capacity() > 64);
        assert_eq!(buf.as_slice(), &[3, 4]);
        assert_eq!(buf.len(), 2);

        // reserve below the current length is a no-op
        let cap = buf.capacity();
        buf.reserve(1).unwrap();
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_clear_retains_capacity() {
        let mut buf = Buffer::from_slice(&[1u8, 2, 3]).unwrap();
        let cap = buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf.as_terminated()[0], 0);
    }

    #[test]
    fn test_wipe_range_clamps() {
        let mut buf = Buffer::from_slice(&[1u8, 2, 3, 4]).unwrap();
        buf.wipe_range(1, 100);
        assert_eq!(buf.as_slice(), &[1, 0, 0, 0]);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_free_resets_to_nil() {
        let mut buf = Buffer::from_slice(&[1u32, 2]).unwrap();
        buf.free();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        // reusable after free
        buf.push(7).unwrap();
        assert_eq!(buf.as_slice(), &[7]);
    }

    #[test]
    fn test_swap_is_field_exchange() {
        let mut a = Buffer::from_slice(&[1u8]).unwrap();
        let mut b = Buffer::from_slice(&[2u8, 3]).unwrap();
        let a_ptr = a.as_ptr();
        let b_ptr = b.as_ptr();
        a.swap(&mut b);
        assert_eq!(a.as_slice(), &[2, 3]);
        assert_eq!(b.as_slice(), &[1]);
        assert_eq!(a.as_ptr(), b_ptr);
        assert_eq!(b.as_ptr(), a_ptr);
    }

    #[test]
    fn test_offset_of_clamps_below_base() {
        let buf = Buffer::from_slice(&[1u32, 2, 3]).unwrap();
        let before = buf.as_ptr().wrapping_sub(2);
        assert_eq!(buf.offset_of(before), 0);
        assert_eq!(buf.offset_of(buf.as_ptr().wrapping_add(2)), 2);
    }

    #[test]
    fn test_front_back_on_empty() {
        let buf: Buffer<u8> = Buffer::new();
        assert_eq!(buf.front(), None);
        assert_eq!(buf.back(), None);
    }
}
