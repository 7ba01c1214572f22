// tests/integration_tests.rs
//! Integration tests for the buffer, view, and comparison modules

use std::alloc::Layout;
use std::cmp::Ordering;
use std::ptr::NonNull;

use zvec::prelude::*;

/// Allocator that refuses every request; exercises failure paths the way
/// an exhausted system would.
struct NoAlloc;

impl BufAlloc for NoAlloc {
    fn allocate(&self, _layout: Layout) -> Option<NonNull<u8>> {
        None
    }

    unsafe fn reallocate(
        &self,
        _ptr: NonNull<u8>,
        _old_layout: Layout,
        _new_size: usize,
    ) -> Option<NonNull<u8>> {
        None
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

/// Allocator that delegates to [`Global`] until a request budget runs out.
struct Budgeted {
    remaining: std::cell::Cell<usize>,
}

impl Budgeted {
    fn new(requests: usize) -> Self {
        Self {
            remaining: std::cell::Cell::new(requests),
        }
    }

    fn spend(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            return false;
        }
        self.remaining.set(left - 1);
        true
    }
}

impl BufAlloc for Budgeted {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if !self.spend() {
            return None;
        }
        Global.allocate(layout)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if !self.spend() {
            return None;
        }
        unsafe { Global.reallocate(ptr, old_layout, new_size) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { Global.deallocate(ptr, layout) }
    }
}

#[test]
fn test_resize_postconditions() {
    let mut buf = Buffer::from_slice(&[1u32, 2]).unwrap();
    buf.resize(6).unwrap();
    assert_eq!(buf.len(), 6);
    assert!(buf.capacity() >= 6);
    assert_eq!(buf.as_slice(), &[1, 2, 0, 0, 0, 0]);

    buf.resize(1).unwrap();
    assert_eq!(buf.len(), 1);
    assert!(buf.capacity() >= 6);
}

#[test]
fn test_push_pop_preserves_prefix() {
    let mut buf = Buffer::from_slice(&[10u64, 20, 30]).unwrap();
    buf.push(40).unwrap();
    assert_eq!(buf.pop(), Some(40));
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.as_slice(), &[10, 20, 30]);
}

#[test]
fn test_clone_is_independent_deep_copy() {
    let original = Buffer::from_slice(&[1u32, 2, 3]).unwrap();
    let mut copy = original.try_clone().unwrap();

    assert_eq!(copy.len(), original.len());
    assert_ne!(copy.as_ptr(), original.as_ptr());
    assert_eq!(copy, original);

    copy.as_mut_slice()[1] = 99;
    assert_eq!(original.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_append_then_slice_first_recovers_original() {
    let mut a = Buffer::from_slice(&[5u8, 6, 7]).unwrap();
    let b = Buffer::from_slice(&[8u8, 9]).unwrap();
    let original_len = a.len();

    a.append(b.as_slice()).unwrap();
    assert_eq!(a.as_slice(), &[5, 6, 7, 8, 9]);

    let front = a.slice_first(original_len).unwrap();
    assert_eq!(front.as_slice(), &[5, 6, 7]);
}

#[test]
fn test_reverse_is_involution() {
    for items in [&[][..], &[42u32][..], &[1, 2, 3][..], &[1, 2, 3, 4][..]] {
        let mut buf = Buffer::from_slice(items).unwrap();
        buf.reverse();
        buf.reverse();
        assert_eq!(buf.as_slice(), items);
    }
}

#[test]
fn test_insert_past_end_zero_fills_between() {
    let mut buf = Buffer::from_slice(&[1u16]).unwrap();
    buf.insert(4, 9).unwrap();
    assert_eq!(buf.len(), 5);
    assert_eq!(buf.get(4), Some(&9));
    assert_eq!(&buf.as_slice()[1..4], &[0, 0, 0]);
}

#[test]
fn test_sort_then_search_hits_and_misses() {
    let mut buf = Buffer::from_slice(&[44u32, 11, 33, 22]).unwrap();
    buf.sort();

    for key in [11u32, 22, 33, 44] {
        let index = buf.search(&key).unwrap();
        assert_eq!(buf.as_slice()[index], key);
    }
    assert_eq!(buf.search(&55), None);
}

#[test]
fn test_compare_is_length_major() {
    assert_eq!(compare(&[9u8, 9], &[1, 2, 3]), Ordering::Less);
    assert_eq!(compare(&[1u8, 2, 3], &[9, 9]), Ordering::Greater);
    assert_eq!(compare(&[1u8, 2], &[1, 2]), Ordering::Equal);
}

#[test]
fn test_unshift_erase_reverse_scenario() {
    // owning buffer over 4-byte integers
    let mut buf = Buffer::from_slice(&[1i32, 2, 3]).unwrap();

    buf.unshift_by(2).unwrap();
    assert_eq!(buf.as_slice(), &[0, 0, 1, 2, 3]);

    buf.erase_at(1, 2);
    assert_eq!(buf.as_slice(), &[0, 2, 3]);

    buf.reverse();
    assert_eq!(buf.as_slice(), &[3, 2, 0]);
}

#[test]
fn test_terminated_view_aliases_without_allocation() {
    let text = *b"abc\0";
    let view = View::terminated(&text);
    assert_eq!(view.len(), 3);
    assert_eq!(view.as_slice(), b"abc");
    assert_eq!(view.as_ptr(), text.as_ptr());
}

// The walk from the original demo program: a zero-terminated array of ints
// exercised through every index-shifting operation in turn.
#[test]
fn test_demo_walkthrough() {
    let arr = [1i32, 2, 3, 4, 5, 6, 7, 0];
    let terminated = View::terminated(&arr);
    assert_eq!(terminated.len(), 7);

    let mut copy = terminated.to_buffer().unwrap();

    copy.unshift_by(4).unwrap();
    assert_eq!(copy.as_slice(), &[0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]);

    copy.prepend(terminated.as_slice()).unwrap();
    assert_eq!(copy.len(), 18);
    assert_eq!(&copy.as_slice()[..7], &[1, 2, 3, 4, 5, 6, 7]);

    copy.erase_at(5, 3);
    assert_eq!(copy.len(), 15);

    copy.erase(2);
    assert_eq!(copy.len(), 14);

    copy.splice(4, terminated.as_slice()).unwrap();
    assert_eq!(copy.len(), 21);
    assert_eq!(&copy.as_slice()[4..11], &[1, 2, 3, 4, 5, 6, 7]);

    let mut sliced = copy.slice_first(6).unwrap();
    assert_eq!(sliced.len(), 6);

    sliced.sort_by(ascending);
    let mut sorted = sliced.as_slice().to_vec();
    sorted.sort_unstable();
    assert_eq!(sliced.as_slice(), sorted.as_slice());

    sliced.shift_by(2);
    assert_eq!(sliced.len(), 4);

    assert!(sliced.pop().is_some());
    assert_eq!(sliced.len(), 3);

    assert!(sliced.shift().is_some());
    assert_eq!(sliced.len(), 2);

    sliced.append(terminated.as_slice()).unwrap();
    assert_eq!(sliced.len(), 9);

    sliced.free();
    assert!(sliced.is_empty());
}

// The original out-of-memory probe: an absurd resize request must fail and
// leave the buffer unchanged.
#[test]
fn test_insane_resize_fails_cleanly() {
    let mut buf: Buffer<i32> = Buffer::new();
    let insane = usize::MAX / 2;
    assert!(buf.resize(insane).is_err());
    assert_ne!(buf.len(), insane);
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 0);
}

#[test]
fn test_refused_allocator_leaves_buffer_untouched() {
    let mut buf: Buffer<u32, NoAlloc> = Buffer::new_in(NoAlloc);
    assert!(matches!(
        buf.push(1),
        Err(BufferError::AllocationFailed { .. })
    ));
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 0);

    assert!(Buffer::<u8, NoAlloc>::zeroed_in(4, NoAlloc).is_err());
    assert!(Buffer::<u8, NoAlloc>::with_capacity_in(4, NoAlloc).is_err());
}

#[test]
fn test_exhausted_allocator_preserves_contents() {
    // budget: one allocation for the initial copy, none for growth
    let mut buf = Buffer::from_slice_in(&[1u8, 2, 3], Budgeted::new(1)).unwrap();
    let cap = buf.capacity();

    let err = buf.resize(cap + 1).unwrap_err();
    assert!(matches!(err, BufferError::AllocationFailed { .. }));
    assert_eq!(buf.as_slice(), &[1, 2, 3]);
    assert_eq!(buf.capacity(), cap);
}

#[test]
fn test_sentinel_terminates_after_every_operation() {
    let mut buf = Buffer::from_slice(&[3u16, 1, 2]).unwrap();
    buf.push(4).unwrap();
    assert_eq!(buf.as_terminated().last(), Some(&0));

    buf.unshift(5).unwrap();
    assert_eq!(buf.as_terminated().last(), Some(&0));

    buf.sort();
    buf.erase(0);
    buf.shift_by(1);
    assert_eq!(buf.as_terminated().last(), Some(&0));

    // the terminated slice re-read as a view reproduces the contents
    let round = View::terminated(buf.as_terminated());
    assert_eq!(round.as_slice(), buf.as_slice());
}

#[test]
fn test_views_of_buffers_feed_mutations() {
    let donor = Buffer::from_slice(&[7u8, 8]).unwrap();
    let mut target = Buffer::from_slice(&[1u8, 2]).unwrap();

    target.splice(1, donor.view().as_slice()).unwrap();
    assert_eq!(target.as_slice(), &[1, 7, 8, 2]);

    let window = donor.window(1, 1);
    target.append(window.as_slice()).unwrap();
    assert_eq!(target.as_slice(), &[1, 7, 8, 2, 8]);
}

#[test]
fn test_pointer_offset_roundtrip() {
    let buf = Buffer::from_slice(&[10u64, 20, 30, 40]).unwrap();
    for index in 0..buf.len() {
        let ptr = &buf.as_slice()[index] as *const u64;
        assert_eq!(buf.offset_of(ptr), index);
    }
}
