// src/alloc.rs
//! Pluggable, fallible allocation strategy.
//!
//! Every [`crate::Buffer`] carries an allocator chosen at construction time.
//! This replaces a process-wide allocator hook with an injected strategy:
//! there is no global mutable state, and two buffers in the same process can
//! use different allocators.
//!
//! The default strategy is [`Global`], a thin wrapper over [`std::alloc`].
//! Custom implementations are useful for arena allocation, accounting, or
//! fault injection in tests.

use std::alloc::Layout;
use std::ptr::NonNull;

/// A realloc-style allocation strategy used by [`crate::Buffer`].
///
/// All methods are fallible: a refused request is reported as `None` and the
/// caller's state is left untouched. Implementations must never panic on
/// exhaustion.
///
/// # Example
///
/// ```
/// use std::alloc::Layout;
/// use std::ptr::NonNull;
/// use zvec::{BufAlloc, Buffer};
///
/// /// Refuses every request; useful for exercising failure paths.
/// struct NoAlloc;
///
/// impl BufAlloc for NoAlloc {
///     fn allocate(&self, _layout: Layout) -> Option<NonNull<u8>> {
///         None
///     }
///     unsafe fn reallocate(
///         &self,
///         _ptr: NonNull<u8>,
///         _old_layout: Layout,
///         _new_size: usize,
///     ) -> Option<NonNull<u8>> {
///         None
///     }
///     unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
/// }
///
/// let mut buf: Buffer<u32, NoAlloc> = Buffer::new_in(NoAlloc);
/// assert!(buf.push(1).is_err());
/// assert_eq!(buf.len(), 0);
/// ```
pub trait BufAlloc {
    /// Allocates a fresh block for `layout`, or `None` on failure.
    ///
    /// `layout.size()` is never zero when called by this crate.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Resizes the block at `ptr` from `old_layout` to `new_size` bytes,
    /// preserving the first `min(old, new)` bytes. Returns the (possibly
    /// relocated) block, or `None` on failure with the original block still
    /// valid.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `old_layout`, and
    /// `new_size` must be nonzero and not overflow when rounded up to
    /// `old_layout.align()`.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// Returns the block at `ptr` to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout` and must
    /// not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The default allocation strategy, backed by [`std::alloc`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl BufAlloc for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() > 0);
        // SAFETY: layout has nonzero size.
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    #[inline]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        debug_assert!(new_size > 0);
        // SAFETY: forwarded caller contract.
        NonNull::new(unsafe { std::alloc::realloc(ptr.as_ptr(), old_layout, new_size) })
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
