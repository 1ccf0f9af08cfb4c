//! Encode worker thread
//!
//! One dedicated thread per pipeline owns the codec adapter outright, so
//! the drain loop needs no locking. Start/stop arrive as directives on a
//! channel consumed only here, which keeps every encoder acquire/release
//! call on this thread regardless of which thread asked for it.

use crate::config::PipelineConfig;
use crate::fanout::OutputFanOut;
use crate::state::PipelineState;
use crossbeam::channel::{Receiver, TryRecvError};
use parking_lot::Mutex;
use rec_codec::{CodecAdapter, InputStatus, PollEvent};
use rec_frame::{FrameQueue, RawFrame};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Lifecycle request posted onto the worker's channel
pub(crate) enum Directive {
    Start,
    Stop,
}

/// Counters read lock-free by `EncodePipeline::stats`
#[derive(Default)]
pub(crate) struct Counters {
    pub fed_frames: AtomicU64,
    pub fed_bytes: AtomicU64,
    pub units: AtomicU64,
    pub key_frames: AtomicU64,
    pub config_units: AtomicU64,
    pub cycle_errors: AtomicU64,
}

/// State visible to both the controller and the worker thread
pub(crate) struct Shared {
    /// Drain loop gate; checked at the top of every iteration
    pub running: AtomicBool,
    /// True while a worker thread is alive for this pipeline
    pub msg_active: AtomicBool,
    pub state: Mutex<PipelineState>,
    pub counters: Counters,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            msg_active: AtomicBool::new(false),
            state: Mutex::new(PipelineState::Idle),
            counters: Counters::default(),
        }
    }
}

pub(crate) fn worker_main(
    config: PipelineConfig,
    mut codec: Box<dyn CodecAdapter>,
    queue: Arc<FrameQueue>,
    fanout: OutputFanOut,
    shared: Arc<Shared>,
    rx: Receiver<Directive>,
) {
    let track = config.track;
    log::info!("{} encode worker started", track.label());

    // Frame held back after a transient "input full" rejection.
    let mut pending: Option<RawFrame> = None;
    let mut open = false;

    loop {
        let directive = if shared.running.load(Ordering::Acquire) {
            match rx.try_recv() {
                Ok(d) => Some(d),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Directive::Stop),
            }
        } else {
            // Parked until the next directive; nothing runs while stopped.
            match rx.recv() {
                Ok(d) => Some(d),
                Err(_) => Some(Directive::Stop),
            }
        };

        match directive {
            Some(Directive::Start) => {
                if !open {
                    match codec.open() {
                        Ok(()) => {
                            open = true;
                            *shared.state.lock() = PipelineState::Running;
                            shared.running.store(true, Ordering::Release);
                            log::info!("{} encoder acquired", track.label());
                        }
                        Err(e) => {
                            log::error!("{} encoder acquisition failed: {}", track.label(), e);
                            break;
                        }
                    }
                }
            }
            Some(Directive::Stop) => break,
            None => {}
        }

        if open && shared.running.load(Ordering::Acquire) {
            cycle(&config, codec.as_mut(), &queue, &fanout, &shared, &mut pending);
        }
    }

    // Final stop directive runs the release hook exactly once.
    if open {
        if let Err(e) = codec.close() {
            log::warn!("{} encoder release failed: {}", track.label(), e);
        } else {
            log::info!("{} encoder released", track.label());
        }
    }

    fanout.clear_callback();
    shared.running.store(false, Ordering::Release);
    *shared.state.lock() = PipelineState::Idle;
    shared.msg_active.store(false, Ordering::Release);
    log::info!("{} encode worker exiting", track.label());
}

/// One feed-and-drain pass. Faults are contained here: anything that goes
/// wrong is logged with track context and the next pass starts clean.
fn cycle(
    config: &PipelineConfig,
    codec: &mut dyn CodecAdapter,
    queue: &FrameQueue,
    fanout: &OutputFanOut,
    shared: &Shared,
    pending: &mut Option<RawFrame>,
) {
    let track = config.track;

    if config.feeds_input() {
        // A backlog at capacity displaces a head frame stalled on a full
        // encoder, the same freshness rule the queue applies internally.
        if pending.is_some() && queue.is_full() {
            *pending = None;
            log::trace!("{} stalled head frame displaced by backlog", track.label());
        }

        if let Some(frame) = pending.take().or_else(|| queue.pop()) {
            let pts_us = codec.presentation_time(frame.len());
            match codec.submit_input(&frame.data, pts_us) {
                Ok(InputStatus::Accepted) => {
                    shared.counters.fed_frames.fetch_add(1, Ordering::Relaxed);
                    shared
                        .counters
                        .fed_bytes
                        .fetch_add(frame.len() as u64, Ordering::Relaxed);
                    log::trace!(
                        "{} frame fed, {} bytes pts {} us",
                        track.label(),
                        frame.len(),
                        pts_us
                    );
                }
                Ok(InputStatus::Full) => {
                    *pending = Some(frame);
                }
                Err(e) => {
                    shared.counters.cycle_errors.fetch_add(1, Ordering::Relaxed);
                    log::warn!("{} encoder feed error, frame skipped: {}", track.label(), e);
                }
            }
        }
    }

    // Drain everything currently available before the next feed pass.
    loop {
        match codec.poll_output(config.poll_timeout_us) {
            Ok(PollEvent::Empty) => break,
            Ok(PollEvent::FormatChanged(format)) => {
                log::info!(
                    "{} output format stabilized ({})",
                    track.label(),
                    format.codec
                );
                fanout.register_track(&format, track);
            }
            Ok(PollEvent::Unit(unit)) => {
                fanout.deliver(&unit);
            }
            Err(e) => {
                shared.counters.cycle_errors.fetch_add(1, Ordering::Relaxed);
                log::warn!("{} encoder drain error: {}", track.label(), e);
                break;
            }
        }
    }
}
