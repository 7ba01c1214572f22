// src/buffer/raw.rs
//! Unsafe allocation core backing the safe buffer layers.
//!
//! All raw-pointer handling lives here; the layers above only see safe
//! slices plus a handful of documented unsafe fill calls.

use std::alloc::Layout;
use std::ptr::NonNull;

use crate::alloc::BufAlloc;
use crate::error::{BufferError, Result};

/// Owner of the backing storage block.
///
/// Allocated storage always holds `cap + 1` element slots; the extra slot
/// carries the zero sentinel maintained by [`super::Buffer`]. `ptr == None`
/// is the nil state with no allocation at all.
pub(crate) struct RawBuf<T, A: BufAlloc> {
    ptr: Option<NonNull<T>>,
    cap: usize,
    alloc: A,
}

impl<T, A: BufAlloc> RawBuf<T, A> {
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: None,
            cap: 0,
            alloc,
        }
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(crate) fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Base pointer of the storage; dangling in the nil state, which is
    /// valid only for zero-length slice construction.
    #[inline(always)]
    pub(crate) fn base(&self) -> NonNull<T> {
        self.ptr.unwrap_or(NonNull::dangling())
    }

    fn layout_for(slots: usize) -> Result<Layout> {
        Layout::array::<T>(slots).map_err(|_| BufferError::CapacityOverflow)
    }

    /// Grows the storage so it can hold `new_cap` elements plus the sentinel
    /// slot. Newly acquired slots are uninitialized; the caller must
    /// initialize every slot it exposes. On failure the storage is
    /// untouched.
    pub(crate) fn grow_to(&mut self, new_cap: usize) -> Result<()> {
        const {
            assert!(size_of::<T>() > 0, "zero-sized element types are not supported");
        }
        debug_assert!(new_cap >= self.cap);

        let slots = new_cap
            .checked_add(1)
            .ok_or(BufferError::CapacityOverflow)?;
        let new_layout = Self::layout_for(slots)?;

        let block = match self.ptr {
            None => self.alloc.allocate(new_layout),
            Some(ptr) => {
                // Layout of the live block; validated when it was allocated.
                let old_layout = Self::layout_for(self.cap + 1)?;
                // SAFETY: ptr came from this allocator with old_layout and
                // the new size is nonzero.
                unsafe {
                    self.alloc
                        .reallocate(ptr.cast(), old_layout, new_layout.size())
                }
            }
        };

        match block {
            Some(block) => {
                self.ptr = Some(block.cast());
                self.cap = new_cap;
                Ok(())
            }
            None => Err(BufferError::AllocationFailed {
                bytes: new_layout.size(),
            }),
        }
    }

    /// Returns the storage to the allocator and resets to the nil state.
    pub(crate) fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            let layout = Layout::array::<T>(self.cap + 1)
                .expect("layout of a live block was validated at allocation");
            // SAFETY: ptr came from this allocator with this layout.
            unsafe { self.alloc.deallocate(ptr.cast(), layout) };
        }
        self.cap = 0;
    }

    /// Writes the zero element into every slot in `start..end`.
    ///
    /// # Safety
    ///
    /// Storage must be allocated and `end <= cap + 1`.
    pub(crate) unsafe fn fill_default(&mut self, start: usize, end: usize)
    where
        T: Default,
    {
        debug_assert!(self.ptr.is_some());
        debug_assert!(end <= self.cap + 1);
        let base = self.base().as_ptr();
        for slot in start..end {
            // SAFETY: slot is within the allocated block per the contract.
            unsafe { base.add(slot).write(T::default()) };
        }
    }

    /// Copies `count` elements from `src` into the storage starting at
    /// `at`.
    ///
    /// # Safety
    ///
    /// Storage must be allocated, `at + count <= cap + 1`, and `src` must
    /// not alias the storage.
    pub(crate) unsafe fn copy_in(&mut self, at: usize, src: *const T, count: usize) {
        debug_assert!(self.ptr.is_some());
        debug_assert!(at + count <= self.cap + 1);
        // SAFETY: disjoint regions per the contract.
        unsafe { std::ptr::copy_nonoverlapping(src, self.base().as_ptr().add(at), count) };
    }
}

impl<T, A: BufAlloc> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}

// The raw pointer is an exclusively owned block, so the usual container
// rules apply.
unsafe impl<T: Send, A: BufAlloc + Send> Send for RawBuf<T, A> {}
unsafe impl<T: Sync, A: BufAlloc + Sync> Sync for RawBuf<T, A> {}
