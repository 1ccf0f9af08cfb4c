//! Lifecycle controller and public pipeline surface
//!
//! `start`/`stop`/`submit` are safe from any thread. The controller never
//! touches the encoder itself; it posts directives onto the worker's
//! channel, so all acquire/release work is serialized on the worker thread
//! and cannot race the drain loop.

use crate::config::PipelineConfig;
use crate::fanout::OutputFanOut;
use crate::sink::{CallbackSlot, MuxerSink};
use crate::state::PipelineState;
use crate::worker::{worker_main, Directive, Shared};
use crossbeam::channel::{self, Sender};
use parking_lot::{Mutex, RwLock};
use rec_codec::CodecAdapter;
use rec_frame::{FrameQueue, QueueStats, RawFrame, TrackKind};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Snapshot of pipeline activity (lock-free reads)
#[derive(Debug, Clone, Copy)]
pub struct PipelineStats {
    pub queue: QueueStats,
    pub fed_frames: u64,
    pub fed_bytes: u64,
    pub units: u64,
    pub key_frames: u64,
    pub config_units: u64,
    pub cycle_errors: u64,
}

struct Control {
    tx: Option<Sender<Directive>>,
    handle: Option<JoinHandle<()>>,
}

/// Single-track streaming encode pipeline
pub struct EncodePipeline {
    config: PipelineConfig,
    queue: Arc<FrameQueue>,
    shared: Arc<Shared>,
    callback: CallbackSlot,
    muxer: Arc<dyn MuxerSink>,
    codec_factory: Box<dyn Fn() -> Box<dyn CodecAdapter> + Send + Sync>,
    control: Mutex<Control>,
}

impl EncodePipeline {
    /// Create a pipeline for one track.
    ///
    /// `codec_factory` builds a fresh adapter per encode session; the
    /// instance is moved onto the worker thread, which opens it before the
    /// first feed and closes it on stop.
    pub fn new<F>(config: PipelineConfig, codec_factory: F, muxer: Arc<dyn MuxerSink>) -> Self
    where
        F: Fn() -> Box<dyn CodecAdapter> + Send + Sync + 'static,
    {
        Self {
            config,
            queue: Arc::new(FrameQueue::new(config.queue_capacity)),
            shared: Arc::new(Shared::new()),
            callback: Arc::new(RwLock::new(None)),
            muxer,
            codec_factory: Box::new(codec_factory),
            control: Mutex::new(Control {
                tx: None,
                handle: None,
            }),
        }
    }

    pub fn track(&self) -> TrackKind {
        self.config.track
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Submit a raw frame. Never blocks; silently discarded unless the
    /// pipeline is running.
    pub fn submit(&self, frame: RawFrame) {
        if !self.shared.running.load(Ordering::Acquire) {
            log::trace!(
                "{} frame discarded, pipeline not running",
                frame.track.label()
            );
            return;
        }

        if frame.track != self.config.track {
            log::debug!(
                "{} frame discarded by {} pipeline",
                frame.track.label(),
                self.config.track.label()
            );
            return;
        }

        self.queue.push(frame);
    }

    /// Begin encoding. No-op unless the pipeline is idle.
    pub fn start(&self) {
        let mut control = self.control.lock();

        {
            let mut state = self.shared.state.lock();
            if *state != PipelineState::Idle {
                log::debug!(
                    "{} start ignored while {}",
                    self.config.track.label(),
                    state.label()
                );
                return;
            }
            *state = PipelineState::Starting;
        }

        // Reap the previous session's thread before spawning a new one.
        if let Some(handle) = control.handle.take() {
            let _ = handle.join();
        }

        let (tx, rx) = channel::unbounded();
        let codec = (self.codec_factory)();
        let fanout = OutputFanOut::new(
            Arc::clone(&self.muxer),
            Arc::clone(&self.callback),
            Arc::clone(&self.shared),
        );

        self.shared.msg_active.store(true, Ordering::Release);

        let config = self.config;
        let queue = Arc::clone(&self.queue);
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(format!("rec-enc-{}", self.config.track.label()))
            .spawn(move || worker_main(config, codec, queue, fanout, shared, rx))
            .expect("failed to spawn encode worker");

        let _ = tx.send(Directive::Start);
        control.tx = Some(tx);
        control.handle = Some(handle);

        log::info!("{} encode pipeline starting", self.config.track.label());
    }

    /// Request a stop. No-op unless starting or running; safe to call
    /// repeatedly, the encoder is released exactly once per session.
    pub fn stop(&self) {
        let control = self.control.lock();

        {
            let mut state = self.shared.state.lock();
            match *state {
                PipelineState::Starting | PipelineState::Running => {
                    *state = PipelineState::Stopping;
                }
                _ => {
                    log::debug!(
                        "{} stop ignored while {}",
                        self.config.track.label(),
                        state.label()
                    );
                    return;
                }
            }
        }

        // Clear the gate first so the drain loop winds down even before
        // the stop directive is consumed.
        self.shared.running.store(false, Ordering::Release);
        if self.shared.msg_active.load(Ordering::Acquire) {
            if let Some(tx) = control.tx.as_ref() {
                let _ = tx.send(Directive::Stop);
            }
        }

        log::info!("{} encode pipeline stopping", self.config.track.label());
    }

    /// Whether the drain loop is active. Eventually consistent: a caller
    /// may observe the old value while a start/stop directive is still in
    /// flight on the worker.
    pub fn is_encoding(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    pub fn state(&self) -> PipelineState {
        *self.shared.state.lock()
    }

    /// Register the live-data callback, replacing any previous one
    pub fn set_live_callback<F>(&self, callback: F)
    where
        F: Fn(&[u8], TrackKind) + Send + Sync + 'static,
    {
        *self.callback.write() = Some(Box::new(callback));
    }

    pub fn clear_live_callback(&self) {
        *self.callback.write() = None;
    }

    /// Get pipeline statistics
    pub fn stats(&self) -> PipelineStats {
        let counters = &self.shared.counters;
        PipelineStats {
            queue: self.queue.stats(),
            fed_frames: counters.fed_frames.load(Ordering::Relaxed),
            fed_bytes: counters.fed_bytes.load(Ordering::Relaxed),
            units: counters.units.load(Ordering::Relaxed),
            key_frames: counters.key_frames.load(Ordering::Relaxed),
            config_units: counters.config_units.load(Ordering::Relaxed),
            cycle_errors: counters.cycle_errors.load(Ordering::Relaxed),
        }
    }
}

impl Drop for EncodePipeline {
    fn drop(&mut self) {
        self.stop();

        let mut control = self.control.lock();
        if let Some(handle) = control.handle.take() {
            let _ = handle.join();
        }
    }
}
