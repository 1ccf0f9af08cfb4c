//! Codec capability boundary
//!
//! The pipeline drives any block/streaming encoder through this interface.
//! An adapter instance belongs to exactly one track and, once handed to a
//! pipeline, is only ever touched from the pipeline's worker thread, so
//! implementations need `Send` but no internal locking.

use crate::error::CodecError;
use rec_frame::{EncodedUnit, FormatDescriptor, TrackKind};

/// Outcome of offering one raw frame to the encoder's input side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStatus {
    /// The frame was consumed; the caller may drop it
    Accepted,
    /// Input side temporarily full; resubmit the same frame next cycle
    Full,
}

/// One step of draining the encoder's output side
#[derive(Debug)]
pub enum PollEvent {
    /// Nothing available within the poll timeout
    Empty,
    /// Output format stabilized; forward to track registration before any
    /// unit of this track reaches the sink
    FormatChanged(FormatDescriptor),
    /// A compressed unit
    Unit(EncodedUnit),
}

/// Capability interface over an underlying encoder, one instance per track.
///
/// Contract:
/// - `open()` is called before any feed/drain call, `close()` after the
///   last one; both run on the pipeline's worker thread.
/// - `submit_input` returning [`InputStatus::Full`] must leave the encoder
///   and the track clock untouched, so the identical frame can be
///   resubmitted with an unchanged timestamp.
/// - `poll_output` blocks at most `timeout_us` and must release the
///   underlying output resource every call, even when no byte buffer was
///   attached to it.
/// - `presentation_time` is strictly non-decreasing across calls for the
///   adapter's track; implementations advance their clock only when a
///   submission is accepted (see [`crate::clock::TrackClock`]).
pub trait CodecAdapter: Send {
    fn track(&self) -> TrackKind;

    /// Acquire the underlying encoder
    fn open(&mut self) -> Result<(), CodecError>;

    /// Flush and release the underlying encoder
    fn close(&mut self) -> Result<(), CodecError>;

    /// Timestamp, in microseconds, for a frame of `byte_len` bytes
    fn presentation_time(&mut self, byte_len: usize) -> i64;

    /// Offer one raw frame to the encoder's input side
    fn submit_input(&mut self, data: &[u8], pts_us: i64) -> Result<InputStatus, CodecError>;

    /// Collect one pending output event, waiting at most `timeout_us`
    fn poll_output(&mut self, timeout_us: i64) -> Result<PollEvent, CodecError>;
}
