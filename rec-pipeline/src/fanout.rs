//! Output fan-out
//!
//! Every encoded unit goes to two independent consumers: the registered
//! live callback (absence is a no-op, not an error) and the muxer sink.
//! Both deliveries are best-effort; a failure on one side never suppresses
//! the other. Unit classification feeds logging and stats only.

use crate::sink::{CallbackSlot, MuxerSink};
use crate::worker::Shared;
use rec_frame::{EncodedUnit, FormatDescriptor, TrackKind, UnitKind};
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) struct OutputFanOut {
    muxer: Arc<dyn MuxerSink>,
    callback: CallbackSlot,
    shared: Arc<Shared>,
}

impl OutputFanOut {
    pub(crate) fn new(muxer: Arc<dyn MuxerSink>, callback: CallbackSlot, shared: Arc<Shared>) -> Self {
        Self {
            muxer,
            callback,
            shared,
        }
    }

    /// Forward a stabilized output format to track registration
    pub(crate) fn register_track(&self, format: &FormatDescriptor, track: TrackKind) {
        if let Err(e) = self.muxer.register_track(format, track) {
            log::warn!("{} track registration failed: {:#}", track.label(), e);
        }
    }

    /// Deliver one encoded unit to both consumers
    pub(crate) fn deliver(&self, unit: &EncodedUnit) {
        let counters = &self.shared.counters;
        counters.units.fetch_add(1, Ordering::Relaxed);

        match unit.kind {
            UnitKind::KeyFrame => {
                counters.key_frames.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "{} key frame, {} bytes pts {} us",
                    unit.track.label(),
                    unit.len(),
                    unit.pts_us
                );
            }
            UnitKind::CodecConfig => {
                counters.config_units.fetch_add(1, Ordering::Relaxed);
                log::debug!("{} codec config, {} bytes", unit.track.label(), unit.len());
            }
            UnitKind::Regular => {
                log::trace!(
                    "{} unit, {} bytes pts {} us",
                    unit.track.label(),
                    unit.len(),
                    unit.pts_us
                );
            }
        }

        {
            let callback = self.callback.read();
            if let Some(cb) = callback.as_ref() {
                cb(&unit.data, unit.track);
            }
        }

        if let Err(e) = self.muxer.write_sample(unit) {
            log::warn!(
                "{} muxer write failed, {} bytes lost: {:#}",
                unit.track.label(),
                unit.len(),
                e
            );
        }
    }

    /// Drop the live callback reference (final stop teardown)
    pub(crate) fn clear_callback(&self) {
        *self.callback.write() = None;
    }
}
