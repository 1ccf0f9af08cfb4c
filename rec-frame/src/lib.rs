//! Frame types and queueing for the streaming encode pipeline
//!
//! Key properties:
//! - Lock-free bounded queue between capture and worker threads
//! - Drop-oldest overflow so the producer is never blocked
//! - Plain owned payloads, no shared mutable frame state

pub mod queue;
pub mod types;

pub use queue::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let queue = FrameQueue::with_default_capacity();
        assert_eq!(queue.capacity(), DEFAULT_QUEUE_CAPACITY);
    }
}
