//! Lock-free single-producer single-consumer ring buffer.
//!
//! Capacity is fixed at construction and must be a power of two; one slot is
//! always kept empty so a full ring and an empty ring never share the same
//! `head == tail` representation. This is the same reserved-slot trick as
//! most textbook SPSC rings (c.f. the sequence-number variant in the
//! `debasishg-ringmpsc-rs` reference, which instead relies on `u64` wraparound
//! being astronomically rare — we trade that for a simpler wrapped-index
//! protocol since this ring never needs to span more than one allocation's
//! worth of in-flight messages).
//!
//! ## Memory ordering protocol
//!
//! - Producer: write the slot, then `Release`-store `tail`.
//! - Consumer: `Acquire`-load `tail`, read the slot, then `Release`-store
//!   `head`.
//! - Producer reads `head` with `Acquire` to check for space; consumer reads
//!   `tail` with `Acquire` to check for data. Each side's own cursor is only
//!   ever written by that side, so its own loads use `Relaxed`.
//!
//! `head`/`tail` are [`CachePadded`] to keep the producer and consumer
//! cursors off the same cache line — without that, every push and every pop
//! would ping-pong the line between cores.

use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::errors::InvalidConfig;

/// A single-producer single-consumer lock-free ring buffer of `T`.
pub struct SpscRing<T> {
    buffer: Box<[UnsafeCell<MaybeUninit<T>>]>,
    mask: usize,
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
}

unsafe impl<T: Send> Send for SpscRing<T> {}
unsafe impl<T: Send> Sync for SpscRing<T> {}

impl<T> SpscRing<T> {
    /// Build a ring with room for `capacity - 1` live elements. `capacity`
    /// must be a power of two and at least 2.
    pub fn new(capacity: usize) -> Result<Self, InvalidConfig> {
        if capacity < 2 {
            return Err(InvalidConfig::RingCapacityTooSmall(capacity));
        }
        if !capacity.is_power_of_two() {
            return Err(InvalidConfig::RingCapacityNotPowerOfTwo(capacity));
        }

        let mut buffer = Vec::with_capacity(capacity);
        buffer.resize_with(capacity, || UnsafeCell::new(MaybeUninit::uninit()));

        Ok(Self {
            buffer: buffer.into_boxed_slice(),
            mask: capacity - 1,
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
        })
    }

    /// Number of elements that can be stored without loss (one less than the
    /// backing allocation, by the reserved-slot invariant).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.mask
    }

    /// Push a single element. Returns `false` without touching `item` if the
    /// ring is full — the caller keeps ownership and may retry or drop it.
    #[inline]
    pub fn push(&self, item: T) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let next = (tail + 1) & self.mask;
        let head = self.head.load(Ordering::Acquire);
        if next == head {
            return false;
        }

        unsafe {
            (*self.buffer[tail].get()).write(item);
        }
        self.tail.store(next, Ordering::Release);
        true
    }

    /// Pop a single element by value. Returns `None` if the ring is empty.
    #[inline]
    pub fn pop(&self) -> Option<T> {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head == tail {
            return None;
        }

        let item = unsafe { (*self.buffer[head].get()).assume_init_read() };
        self.head.store((head + 1) & self.mask, Ordering::Release);
        Some(item)
    }

    /// Zero-copy peek at the next element without removing it. Pair with
    /// [`SpscRing::advance`] to consume it after use.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head == tail {
            return None;
        }
        Some(unsafe { (*self.buffer[head].get()).assume_init_ref() })
    }

    /// Drop and retire the element last returned by [`SpscRing::front`].
    /// Calling this when the ring is empty is a logic error (it would
    /// advance past the producer's tail); callers must only call it after a
    /// successful `front()`.
    #[inline]
    pub fn advance(&self) {
        let head = self.head.load(Ordering::Relaxed);
        unsafe {
            std::ptr::drop_in_place((*self.buffer[head].get()).as_mut_ptr());
        }
        self.head.store((head + 1) & self.mask, Ordering::Release);
    }

    /// True if no elements are queued. Consumer-side only: racy if called
    /// from the producer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Relaxed) == self.tail.load(Ordering::Acquire)
    }

    /// Approximate occupied length. Racy under concurrent access; useful for
    /// metrics, not for control flow.
    pub fn len(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        let capacity = self.mask + 1;
        (tail + capacity - head) % capacity
    }
}

impl<T> Drop for SpscRing<T> {
    fn drop(&mut self) {
        while self.pop().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two_capacity() {
        assert_eq!(
            SpscRing::<u8>::new(3).unwrap_err(),
            InvalidConfig::RingCapacityNotPowerOfTwo(3)
        );
    }

    #[test]
    fn rejects_too_small_capacity() {
        assert_eq!(
            SpscRing::<u8>::new(1).unwrap_err(),
            InvalidConfig::RingCapacityTooSmall(1)
        );
    }

    #[test]
    fn push_pop_preserves_order() {
        let ring = SpscRing::<u32>::new(8).unwrap();
        for i in 0..7 {
            assert!(ring.push(i));
        }
        // capacity 8 reserves one slot, so the 7th push above fills it.
        assert!(!ring.push(999));
        for i in 0..7 {
            assert_eq!(ring.pop(), Some(i));
        }
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn front_and_advance_do_not_copy_out() {
        let ring = SpscRing::<String>::new(4).unwrap();
        assert!(ring.push("a".to_string()));
        assert!(ring.push("b".to_string()));
        assert_eq!(ring.front().map(String::as_str), Some("a"));
        ring.advance();
        assert_eq!(ring.front().map(String::as_str), Some("b"));
        ring.advance();
        assert!(ring.front().is_none());
    }

    #[test]
    fn wraps_around_correctly() {
        let ring = SpscRing::<u32>::new(4).unwrap();
        for round in 0..10 {
            assert!(ring.push(round));
            assert_eq!(ring.pop(), Some(round));
        }
    }

    #[test]
    fn drop_runs_destructors_for_queued_items() {
        use std::rc::Rc;
        let counter = Rc::new(());
        let ring = SpscRing::<Rc<()>>::new(4).unwrap();
        ring.push(counter.clone());
        ring.push(counter.clone());
        assert_eq!(Rc::strong_count(&counter), 3);
        drop(ring);
        assert_eq!(Rc::strong_count(&counter), 1);
    }

    #[test]
    fn concurrent_producer_consumer_spsc() {
        use std::sync::Arc;
        use std::thread;

        let ring = Arc::new(SpscRing::<u64>::new(1024).unwrap());
        let producer_ring = ring.clone();
        const N: u64 = 200_000;

        let producer = thread::spawn(move || {
            let mut i = 0u64;
            while i < N {
                if producer_ring.push(i) {
                    i += 1;
                }
            }
        });

        let mut received = 0u64;
        while received < N {
            if let Some(v) = ring.pop() {
                assert_eq!(v, received);
                received += 1;
            }
        }
        producer.join().unwrap();
    }
}
