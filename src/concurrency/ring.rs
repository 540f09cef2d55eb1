//! Single-producer / single-consumer bounded ring buffer.
//!
//! # Memory ordering protocol
//!
//! `head` is the next write slot and is only stored by the producer; `tail`
//! is the next read slot and is only stored by the consumer. Each side reads
//! its own index with `Relaxed` and the other side's with `Acquire`:
//!
//! - The producer loads `tail` with `Acquire` to observe the consumer's
//!   `Release` of freed slots, writes the slot, then stores `head` with
//!   `Release` to publish the new item.
//! - The consumer loads `head` with `Acquire` to observe the producer's
//!   `Release`, reads the slot(s), then stores `tail` with `Release` to free
//!   them.
//!
//! Indices are kept wrapped: all arithmetic is `& (N - 1)`, so `N` must be a
//! power of two. The buffer is empty when `head == tail` and full when
//! `(head + 1) & (N - 1) == tail`, which sacrifices one slot and makes the
//! effective capacity `N - 1`.

use crossbeam::utils::CachePadded;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A bounded lock-free queue for `Copy` records, moving items from exactly
/// one producer thread to exactly one consumer thread.
///
/// `N` must be a power of two and at least 2 (checked at compile time); the
/// queue holds at most `N - 1` items. Construct it, then [`split`] it into
/// its two endpoint handles:
///
/// ```
/// use marketpipe_rs::concurrency::SpscRingBuffer;
///
/// let (mut producer, mut consumer) = SpscRingBuffer::<u32, 8>::new().split();
/// assert!(producer.push(7));
/// assert_eq!(consumer.pop(), Some(7));
/// assert_eq!(consumer.pop(), None);
/// ```
///
/// [`split`]: SpscRingBuffer::split
pub struct SpscRingBuffer<T, const N: usize> {
    /// Next write slot. Stored only by the producer.
    head: CachePadded<AtomicUsize>,
    /// Next read slot. Stored only by the consumer.
    tail: CachePadded<AtomicUsize>,
    buffer: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

// SAFETY: slots are only written by the producer between its `tail` Acquire
// and `head` Release, and only read by the consumer between its `head`
// Acquire and `tail` Release; the index protocol keeps those regions
// disjoint. The handles returned by `split` are the sole way to touch the
// slots, and neither is `Clone`, so the single-writer/single-reader
// assumption holds by construction.
unsafe impl<T: Send, const N: usize> Sync for SpscRingBuffer<T, N> {}

impl<T: Copy, const N: usize> SpscRingBuffer<T, N> {
    const CAPACITY_OK: () = assert!(
        N >= 2 && N.is_power_of_two(),
        "ring capacity must be a power of two"
    );
    const MASK: usize = N - 1;

    /// Create an empty ring buffer.
    pub fn new() -> Self {
        let () = Self::CAPACITY_OK;

        Self {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            buffer: (0..N)
                .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
                .collect(),
        }
    }

    /// Maximum number of items the buffer can hold at once.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Consume the buffer and hand out its two endpoints. The producer half
    /// may be moved to one thread and the consumer half to another; the type
    /// system enforces the single-producer / single-consumer contract.
    pub fn split(self) -> (Producer<T, N>, Consumer<T, N>) {
        let ring = Arc::new(self);

        (
            Producer {
                ring: Arc::clone(&ring),
            },
            Consumer { ring },
        )
    }
}

impl<T: Copy, const N: usize> Default for SpscRingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The write endpoint of a [`SpscRingBuffer`]. Exactly one exists per
/// buffer; hold it on the producing thread only.
pub struct Producer<T, const N: usize> {
    ring: Arc<SpscRingBuffer<T, N>>,
}

impl<T: Copy, const N: usize> Producer<T, N> {
    /// Append an item. Returns `false` iff the buffer is full.
    ///
    /// Never blocks, allocates, or spins; callers that must not drop items
    /// retry in their own loop.
    #[inline]
    pub fn push(&mut self, item: T) -> bool {
        let ring = &*self.ring;
        let current_tail = ring.tail.load(Ordering::Acquire);
        let current_head = ring.head.load(Ordering::Relaxed);
        let next_head = (current_head + 1) & SpscRingBuffer::<T, N>::MASK;

        if next_head == current_tail {
            return false;
        }

        // SAFETY: `current_head` is strictly inside the free region
        // [head, tail): the consumer has released this slot (observed via
        // the Acquire load of `tail`) and will not read it until the
        // Release store of `head` below publishes it.
        unsafe {
            (*ring.buffer[current_head].get()).write(item);
        }

        ring.head.store(next_head, Ordering::Release);

        true
    }

    /// Maximum number of items the buffer can hold at once.
    pub const fn capacity(&self) -> usize {
        N - 1
    }
}

/// The read endpoint of a [`SpscRingBuffer`]. Exactly one exists per
/// buffer; hold it on the consuming thread only.
pub struct Consumer<T, const N: usize> {
    ring: Arc<SpscRingBuffer<T, N>>,
}

impl<T: Copy, const N: usize> Consumer<T, N> {
    /// Remove and return the oldest item, or `None` iff the buffer is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let ring = &*self.ring;
        let current_tail = ring.tail.load(Ordering::Relaxed);
        let current_head = ring.head.load(Ordering::Acquire);

        if current_tail == current_head {
            return None;
        }

        // SAFETY: `current_tail != current_head`, so this slot holds an item
        // the producer published before its Release store of `head`, which
        // the Acquire load above synchronized with.
        let item = unsafe { (*ring.buffer[current_tail].get()).assume_init_read() };

        ring.tail
            .store((current_tail + 1) & SpscRingBuffer::<T, N>::MASK, Ordering::Release);

        Some(item)
    }

    /// Drain up to `out.len()` items into `out`, in FIFO order, returning
    /// how many were written.
    ///
    /// The drained items form at most two contiguous runs of the backing
    /// storage (one when the occupied region does not cross the wrap point),
    /// each moved with a single bulk copy. At most `N - 1` items can be
    /// drained per call regardless of `out.len()`.
    pub fn pop_many(&mut self, out: &mut [T]) -> usize {
        let ring = &*self.ring;
        let current_tail = ring.tail.load(Ordering::Relaxed);
        let current_head = ring.head.load(Ordering::Acquire);

        let available = if current_tail < current_head {
            current_head - current_tail
        } else if current_tail > current_head {
            (N - current_tail) + current_head
        } else {
            return 0;
        };

        let count = available.min(out.len());
        let first_run = count.min(N - current_tail);

        // SAFETY: the `count` slots starting at `current_tail` (wrapping at
        // N) all hold published items, by the same Acquire/Release argument
        // as `pop`. `UnsafeCell<MaybeUninit<T>>` is layout-compatible with
        // `T`, the runs are in-bounds, and `out` cannot overlap the buffer.
        unsafe {
            ptr::copy_nonoverlapping(
                ring.buffer[current_tail].get().cast::<T>(),
                out.as_mut_ptr(),
                first_run,
            );

            if first_run < count {
                ptr::copy_nonoverlapping(
                    ring.buffer[0].get().cast::<T>(),
                    out.as_mut_ptr().add(first_run),
                    count - first_run,
                );
            }
        }

        ring.tail
            .store((current_tail + count) & SpscRingBuffer::<T, N>::MASK, Ordering::Release);

        count
    }

    /// Maximum number of items the buffer can hold at once.
    pub const fn capacity(&self) -> usize {
        N - 1
    }
}
