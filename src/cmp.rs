// src/cmp.rs
//! Whole-buffer ordering and comparator helpers
//!
//! The buffer ordering is length-major: a shorter sequence always sorts
//! before a longer one regardless of content, and contents are compared
//! only at equal lengths. This is NOT the usual lexicographic sequence
//! ordering; callers relying on dictionary order should compare slices
//! directly.

use std::cmp::Ordering;

use zeroize::DefaultIsZeroes;

use crate::alloc::BufAlloc;
use crate::buffer::Buffer;

/// Orders two element sequences length-major.
///
/// Shorter sorts before longer regardless of content; equal lengths fall
/// back to element-wise comparison.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use zvec::cmp::compare;
///
/// // [9, 9] is "less" than [1, 2, 3] purely because it is shorter
/// assert_eq!(compare(&[9, 9], &[1, 2, 3]), Ordering::Less);
/// assert_eq!(compare(&[1, 2], &[1, 3]), Ordering::Less);
/// assert_eq!(compare::<u8>(&[], &[]), Ordering::Equal);
/// ```
pub fn compare<T: Ord>(lhs: &[T], rhs: &[T]) -> Ordering {
    lhs.len()
        .cmp(&rhs.len())
        .then_with(|| lhs.cmp(rhs))
}

/// Returns `true` when the sequences have equal length and equal elements.
#[inline]
pub fn equal<T: PartialEq>(lhs: &[T], rhs: &[T]) -> bool {
    lhs == rhs
}

/// Returns `true` when `lhs` orders before `rhs` (length-major).
#[inline]
pub fn less<T: Ord>(lhs: &[T], rhs: &[T]) -> bool {
    compare(lhs, rhs) == Ordering::Less
}

/// Returns `true` when `lhs` does not order after `rhs` (length-major).
#[inline]
pub fn less_or_equal<T: Ord>(lhs: &[T], rhs: &[T]) -> bool {
    compare(lhs, rhs) != Ordering::Greater
}

/// Returns `true` when `lhs` orders after `rhs` (length-major).
#[inline]
pub fn greater<T: Ord>(lhs: &[T], rhs: &[T]) -> bool {
    compare(lhs, rhs) == Ordering::Greater
}

/// Returns `true` when `lhs` does not order before `rhs` (length-major).
#[inline]
pub fn greater_or_equal<T: Ord>(lhs: &[T], rhs: &[T]) -> bool {
    compare(lhs, rhs) != Ordering::Less
}

/// Ascending comparator for any ordered element type.
///
/// One generic function covers the whole fixed-width numeric family. For
/// nullable elements, `Option<T>` already orders `None` before any
/// `Some`, so null-safe ordering comes with the type.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use zvec::cmp::ascending;
///
/// assert_eq!(ascending(&1, &2), Ordering::Less);
/// assert_eq!(ascending(&None, &Some("text")), Ordering::Less);
/// ```
#[inline]
pub fn ascending<T: Ord>(lhs: &T, rhs: &T) -> Ordering {
    lhs.cmp(rhs)
}

/// Descending comparator for any ordered element type.
#[inline]
pub fn descending<T: Ord>(lhs: &T, rhs: &T) -> Ordering {
    rhs.cmp(lhs)
}

impl<T: DefaultIsZeroes + Ord, A: BufAlloc> Buffer<T, A> {
    /// Orders this buffer against another sequence length-major; see
    /// [`compare`].
    #[inline]
    pub fn compare(&self, other: &[T]) -> Ordering {
        compare(self.as_slice(), other)
    }
}
