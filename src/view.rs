// src/view.rs
//! Borrowing views over element sequences
//!
//! A [`View`] aliases memory it does not own: external arrays, zero-
//! terminated sequences, or sub-ranges of a [`Buffer`]. Because it carries
//! the source's lifetime, the borrow checker rules out growing it, freeing
//! it, or letting it outlive its source.

use std::ops::Deref;

use zeroize::DefaultIsZeroes;

use crate::alloc::{BufAlloc, Global};
use crate::buffer::Buffer;
use crate::error::Result;

/// A non-owning view over a sequence of elements.
///
/// Capacity always equals length: a view can be narrowed or copied into an
/// owning [`Buffer`], never grown or released. It dereferences to `[T]`,
/// so all slice methods apply.
///
/// # Examples
///
/// ```
/// use zvec::View;
///
/// let raw = [1u32, 2, 3];
/// let view = View::new(&raw);
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.as_ptr(), raw.as_ptr()); // no copy
/// ```
#[derive(Debug, Clone, Copy)]
pub struct View<'a, T> {
    items: &'a [T],
}

impl<'a, T> View<'a, T> {
    /// Creates a view over `items` without copying.
    #[inline]
    pub const fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    /// Returns the number of viewed elements.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the view covers no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the capacity, which for a view is always its length.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Returns the viewed elements as a slice.
    #[inline]
    pub const fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Returns the address of the first viewed element.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.items.as_ptr()
    }

    /// Narrows to `amount` elements starting at `start`, clamping both to
    /// the viewed range.
    pub fn window(&self, start: usize, amount: usize) -> View<'a, T> {
        let start = start.min(self.items.len());
        let amount = amount.min(self.items.len() - start);
        View::new(&self.items[start..start + amount])
    }

    /// Narrows to the first `amount` elements, clamped to the length.
    #[inline]
    pub fn first(&self, amount: usize) -> View<'a, T> {
        self.window(0, amount)
    }

    /// Narrows to the last `amount` elements, clamped to the length.
    pub fn last(&self, amount: usize) -> View<'a, T> {
        let amount = amount.min(self.items.len());
        self.window(self.items.len() - amount, amount)
    }
}

impl<'a, T: DefaultIsZeroes + PartialEq> View<'a, T> {
    /// Creates a view over the prefix of `items` that precedes the first
    /// zero element.
    ///
    /// When no element is zero, the whole slice is viewed. This is the
    /// in-bounds counterpart of
    /// [`from_zero_terminated`](Self::from_zero_terminated).
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::View;
    ///
    /// let text = *b"abc\0xyz";
    /// let view = View::terminated(&text);
    /// assert_eq!(view.as_slice(), b"abc");
    /// ```
    pub fn terminated(items: &'a [T]) -> Self {
        let zero = T::default();
        let len = items
            .iter()
            .position(|element| *element == zero)
            .unwrap_or(items.len());
        Self {
            items: &items[..len],
        }
    }

    /// Creates a view by scanning forward from `start` in element-width
    /// strides until the zero element, which is excluded.
    ///
    /// This generalizes null-terminated strings to arbitrary fixed-width
    /// elements.
    ///
    /// # Safety
    ///
    /// `start` must point to a sequence of initialized elements in which a
    /// zero element occurs, all reachable within one allocation; the view
    /// must not outlive that allocation, and the elements must not be
    /// mutated while it exists. The caller chooses `'a` accordingly.
    pub unsafe fn from_zero_terminated(start: *const T) -> Self {
        let zero = T::default();
        let mut len = 0;
        // SAFETY: the terminator is reachable per the contract.
        while unsafe { *start.add(len) } != zero {
            len += 1;
        }
        Self {
            // SAFETY: len elements before the terminator are initialized.
            items: unsafe { std::slice::from_raw_parts(start, len) },
        }
    }
}

impl<'a, T: DefaultIsZeroes> View<'a, T> {
    /// Materializes an owning deep copy of the viewed elements.
    pub fn to_buffer(&self) -> Result<Buffer<T, Global>> {
        Buffer::from_slice(self.items)
    }

    /// Materializes an owning deep copy using the given allocator.
    pub fn to_buffer_in<A: BufAlloc>(&self, alloc: A) -> Result<Buffer<T, A>> {
        Buffer::from_slice_in(self.items, alloc)
    }
}

impl<'a, T> Deref for View<'a, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.items
    }
}

impl<'a, T> AsRef<[T]> for View<'a, T> {
    fn as_ref(&self) -> &[T] {
        self.items
    }
}

impl<'a, T: PartialEq> PartialEq for View<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a, T: PartialEq> PartialEq<[T]> for View<'a, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items == other
    }
}

impl<'a, T: DefaultIsZeroes + PartialEq, A: BufAlloc> PartialEq<Buffer<T, A>> for View<'a, T> {
    fn eq(&self, other: &Buffer<T, A>) -> bool {
        self.items == other.as_slice()
    }
}

impl<T: DefaultIsZeroes, A: BufAlloc> Buffer<T, A> {
    /// Returns a borrowing view over all populated elements.
    #[inline]
    pub fn view(&self) -> View<'_, T> {
        View::new(self.as_slice())
    }

    /// Returns a borrowing view over `amount` elements starting at
    /// `start`, clamping both to the populated range.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let buf = Buffer::from_slice(&[1u8, 2, 3, 4])?;
    /// let mid = buf.window(1, 2);
    /// assert_eq!(mid.as_slice(), &[2, 3]);
    /// # Ok::<(), BufferError>(())
    /// ```
    #[inline]
    pub fn window(&self, start: usize, amount: usize) -> View<'_, T> {
        self.view().window(start, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_aliases_without_copy() {
        let raw = [1u32, 2, 3];
        let view = View::new(&raw);
        assert_eq!(view.as_ptr(), raw.as_ptr());
        assert_eq!(view.len(), 3);
        assert_eq!(view.capacity(), 3);
    }

    #[test]
    fn test_terminated_excludes_zero() {
        let text = *b"abc\0def";
        let view = View::terminated(&text);
        assert_eq!(view.as_slice(), b"abc");
        assert_eq!(view.as_ptr(), text.as_ptr());
    }

    #[test]
    fn test_terminated_without_zero_views_all() {
        let items = [4u16, 5, 6];
        let view = View::terminated(&items);
        assert_eq!(view.as_slice(), &[4, 5, 6]);
    }

    #[test]
    fn test_from_zero_terminated_wide_elements() {
        // zero-terminated "string" of 4-byte records
        let records = [7u32, 8, 9, 0];
        let view = unsafe { View::from_zero_terminated(records.as_ptr()) };
        assert_eq!(view.as_slice(), &[7, 8, 9]);
        assert_eq!(view.as_ptr(), records.as_ptr());
    }

    #[test]
    fn test_window_clamps() {
        let items = [1u8, 2, 3, 4, 5];
        let view = View::new(&items);
        assert_eq!(view.window(1, 3).as_slice(), &[2, 3, 4]);
        assert_eq!(view.window(3, 99).as_slice(), &[4, 5]);
        assert!(view.window(9, 1).is_empty());
        assert_eq!(view.first(2).as_slice(), &[1, 2]);
        assert_eq!(view.last(2).as_slice(), &[4, 5]);
        assert_eq!(view.last(99).as_slice(), &items);
    }

    #[test]
    fn test_to_buffer_is_deep_copy() {
        let items = [1u8, 2];
        let view = View::new(&items);
        let mut owned = view.to_buffer().unwrap();
        owned.push(3).unwrap();
        assert_eq!(owned.as_slice(), &[1, 2, 3]);
        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn test_buffer_window() {
        let buf = Buffer::from_slice(&[10u32, 20, 30]).unwrap();
        let tail = buf.window(1, 5);
        assert_eq!(tail.as_slice(), &[20, 30]);
        assert_eq!(tail.as_ptr(), buf.as_ptr().wrapping_add(1));
        assert_eq!(buf.view(), buf);
    }
}
