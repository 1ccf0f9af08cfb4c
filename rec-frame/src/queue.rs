//! Bounded drop-oldest frame queue
//!
//! The single structure shared between the capture thread (producer) and
//! the encode worker (consumer). Pushing never blocks: at capacity the
//! oldest entry is evicted before the newest is inserted, bounding
//! worst-case end-to-end latency at the cost of occasional dropped frames.

use crate::types::RawFrame;
use crossbeam_queue::ArrayQueue;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default capacity; small on purpose so a stalled encoder drops frames
/// instead of accumulating latency.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Lock-free SPSC frame queue with drop-oldest overflow
pub struct FrameQueue {
    inner: ArrayQueue<RawFrame>,

    // Statistics (atomic for lock-free reads)
    submitted: AtomicU64,
    dropped: AtomicU64,
}

impl FrameQueue {
    /// Create a queue holding at most `capacity` frames (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: ArrayQueue::new(capacity.max(1)),
            submitted: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }

    /// Append a frame, evicting the oldest entry if the queue is full.
    ///
    /// Never blocks and never fails; eviction and insertion are a single
    /// operation from the producer's view, so size never exceeds capacity.
    pub fn push(&self, frame: RawFrame) {
        self.submitted.fetch_add(1, Ordering::Relaxed);

        if let Some(evicted) = self.inner.force_push(frame) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            log::trace!(
                "frame queue full, evicted oldest {} frame ({} bytes)",
                evicted.track.label(),
                evicted.len()
            );
        }
    }

    /// Remove and return the oldest frame, or None if empty. Never blocks.
    pub fn pop(&self) -> Option<RawFrame> {
        self.inner.pop()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Get queue statistics
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            depth: self.inner.len(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueueStats {
    pub submitted: u64,
    pub dropped: u64,
    pub depth: usize,
}
