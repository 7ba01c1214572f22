// src/buffer/ops.rs
//! Index-shifting mutation, sub-range slices, sorting, and searching

use std::cmp::Ordering;

use zeroize::{DefaultIsZeroes, Zeroize};

use super::core::Buffer;
use crate::alloc::BufAlloc;
use crate::error::Result;

impl<T: DefaultIsZeroes, A: BufAlloc> Buffer<T, A> {
    /// Writes `value` at `index`, growing the buffer first when `index` is
    /// past the end.
    ///
    /// Growth zero-fills the gap between the old length and `index`; an
    /// out-of-range index is never an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let mut buf: Buffer<u32> = Buffer::new();
    /// buf.insert(3, 9)?;
    /// assert_eq!(buf.as_slice(), &[0, 0, 0, 9]);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.len {
            self.resize(index + 1)?;
        }
        self.as_mut_slice()[index] = value;
        Ok(())
    }

    /// Appends `value` at the logical end.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<()> {
        let end = self.len;
        self.insert(end, value)
    }

    /// Removes and returns the last element; `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        let value = *self.back()?;
        self.truncate_to(self.len - 1);
        Some(value)
    }

    /// Removes `amount` elements from the front by moving the rest down.
    ///
    /// No-op when `amount` is 0 or exceeds the current length.
    pub fn shift_by(&mut self, amount: usize) {
        if amount == 0 || amount > self.len {
            return;
        }
        let new_len = self.len - amount;
        self.as_mut_slice().copy_within(amount.., 0);
        self.truncate_to(new_len);
    }

    /// Removes and returns the first element; `None` when empty.
    pub fn shift(&mut self) -> Option<T> {
        let value = *self.front()?;
        self.shift_by(1);
        Some(value)
    }

    /// Opens a zero-filled gap of `amount` slots at the front.
    pub fn unshift_by(&mut self, amount: usize) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let old_len = self.len;
        self.resize(old_len + amount)?;
        let slice = self.as_mut_slice();
        slice.copy_within(..old_len, amount);
        slice[..amount].zeroize();
        Ok(())
    }

    /// Prepends a single element, shifting the rest up.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let mut buf = Buffer::from_slice(&[2u8, 3])?;
    /// buf.unshift(1)?;
    /// assert_eq!(buf.as_slice(), &[1, 2, 3]);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn unshift(&mut self, value: T) -> Result<()> {
        let old_len = self.len;
        self.resize(old_len + 1)?;
        let slice = self.as_mut_slice();
        slice.copy_within(..old_len, 1);
        slice[0] = value;
        Ok(())
    }

    /// Removes `amount` elements starting at `start` by moving the tail
    /// down. Out-of-range amounts clamp to the populated run.
    pub fn erase_at(&mut self, start: usize, amount: usize) {
        if start >= self.len || amount == 0 {
            return;
        }
        let amount = amount.min(self.len - start);
        let new_len = self.len - amount;
        self.as_mut_slice().copy_within(start + amount.., start);
        self.truncate_to(new_len);
    }

    /// Removes the elements in `start..end`.
    #[inline]
    pub fn erase_range(&mut self, start: usize, end: usize) {
        self.erase_at(start, end.saturating_sub(start));
    }

    /// Removes the element at `index`.
    #[inline]
    pub fn erase(&mut self, index: usize) {
        self.erase_at(index, 1);
    }

    /// Inserts all of `donor` at `index`, shifting the tail up to make
    /// room. An index past the end clamps to an append.
    ///
    /// # Examples
    ///
    /// ```
    /// use zvec::Buffer;
    /// # use zvec::BufferError;
    ///
    /// let mut buf = Buffer::from_slice(&[1u8, 4])?;
    /// buf.splice(1, &[2, 3])?;
    /// assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn splice(&mut self, index: usize, donor: &[T]) -> Result<()> {
        if donor.is_empty() {
            return Ok(());
        }
        let old_len = self.len;
        let at = index.min(old_len);
        self.resize(old_len + donor.len())?;
        let slice = self.as_mut_slice();
        slice.copy_within(at..old_len, at + donor.len());
        slice[at..at + donor.len()].copy_from_slice(donor);
        Ok(())
    }

    /// Inserts all of `donor` at the front.
    #[inline]
    pub fn prepend(&mut self, donor: &[T]) -> Result<()> {
        self.splice(0, donor)
    }

    /// Appends all of `donor` at the logical end.
    pub fn append(&mut self, donor: &[T]) -> Result<()> {
        if donor.is_empty() {
            return Ok(());
        }
        let old_len = self.len;
        self.resize(old_len + donor.len())?;
        self.as_mut_slice()[old_len..].copy_from_slice(donor);
        Ok(())
    }

    /// Reverses the elements in place.
    #[inline]
    pub fn reverse(&mut self) {
        self.as_mut_slice().reverse();
    }

    /// Returns an owning deep copy of `amount` elements starting at
    /// `start`. Out-of-range bounds clamp to the populated range.
    pub fn slice(&self, start: usize, amount: usize) -> Result<Self>
    where
        A: Clone,
    {
        let start = start.min(self.len);
        let amount = amount.min(self.len - start);
        Self::from_slice_in(
            &self.as_slice()[start..start + amount],
            self.allocator().clone(),
        )
    }

    /// Returns an owning deep copy of the elements in `start..end`.
    ///
    /// An inverted or out-of-range pair clamps to the populated range.
    pub fn slice_range(&self, start: usize, end: usize) -> Result<Self>
    where
        A: Clone,
    {
        let end = end.min(self.len);
        let start = start.min(end);
        self.slice(start, end - start)
    }

    /// Returns an owning deep copy of the first `amount` elements,
    /// clamped to the current length.
    #[inline]
    pub fn slice_first(&self, amount: usize) -> Result<Self>
    where
        A: Clone,
    {
        self.slice(0, amount)
    }

    /// Returns an owning deep copy of the last `amount` elements,
    /// clamped to the current length.
    #[inline]
    pub fn slice_last(&self, amount: usize) -> Result<Self>
    where
        A: Clone,
    {
        let amount = amount.min(self.len);
        self.slice(self.len - amount, amount)
    }

    /// Sorts the elements in place in ascending order.
    ///
    /// The sort is not stable (equal elements may be reordered).
    #[inline]
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.as_mut_slice().sort_unstable();
    }

    /// Sorts the elements in place with a caller-supplied ordering.
    #[inline]
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_unstable_by(compare);
    }

    /// Binary-searches for `key`, returning its index.
    ///
    /// Precondition: the buffer is sorted ascending (see
    /// [`sort`](Self::sort)). On an unsorted buffer the result is
    /// unreliable; a present key may be reported absent.
    #[inline]
    pub fn search(&self, key: &T) -> Option<usize>
    where
        T: Ord,
    {
        self.as_slice().binary_search(key).ok()
    }

    /// Binary-searches with the comparator the buffer was sorted by.
    ///
    /// Same precondition as [`search`](Self::search), relative to
    /// `compare`.
    #[inline]
    pub fn search_by<F>(&self, key: &T, mut compare: F) -> Option<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_slice()
            .binary_search_by(|probe| compare(probe, key))
            .ok()
    }

    /// Linearly scans for the first element equal to `key`.
    #[inline]
    pub fn find(&self, key: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.as_slice().iter().find(|probe| *probe == key)
    }

    /// Linearly scans for the first element the comparator reports equal
    /// to `key`.
    pub fn find_by<F>(&self, key: &T, mut compare: F) -> Option<&T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_slice()
            .iter()
            .find(|probe| compare(probe, key) == Ordering::Equal)
    }

    /// Invokes `action(index, &element)` for every element in ascending
    /// index order.
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(usize, &T),
    {
        for (index, element) in self.as_slice().iter().enumerate() {
            action(index, element);
        }
    }

    /// Invokes `action(index, &mut element)` for every element in
    /// ascending index order.
    pub fn for_each_mut<F>(&mut self, mut action: F)
    where
        F: FnMut(usize, &mut T),
    {
        for (index, element) in self.as_mut_slice().iter_mut().enumerate() {
            action(index, element);
        }
    }

    /// Returns an iterator over the populated elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the populated elements.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<'a, T: DefaultIsZeroes, A: BufAlloc> IntoIterator for &'a Buffer<T, A> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: DefaultIsZeroes, A: BufAlloc> IntoIterator for &'a mut Buffer<T, A> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
