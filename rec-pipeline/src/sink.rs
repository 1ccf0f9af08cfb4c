//! Downstream collaborator contracts

use parking_lot::RwLock;
use rec_frame::{EncodedUnit, FormatDescriptor, TrackKind};
use std::sync::Arc;

/// Container/muxer collaborator.
///
/// `register_track` is called when a track's output format stabilizes, in
/// principle once per track; the core does not enforce exactly-once, so
/// implementations must tolerate idempotent or late registration.
/// `write_sample` is called once per encoded unit. Errors are logged by
/// the core and do not affect pipeline state.
pub trait MuxerSink: Send + Sync {
    fn register_track(&self, format: &FormatDescriptor, track: TrackKind) -> anyhow::Result<()>;

    fn write_sample(&self, unit: &EncodedUnit) -> anyhow::Result<()>;
}

/// Live-data callback invoked for every encoded unit
pub type LiveCallback = dyn Fn(&[u8], TrackKind) + Send + Sync;

/// Shared slot holding the currently registered live callback, if any
pub(crate) type CallbackSlot = Arc<RwLock<Option<Box<LiveCallback>>>>;
