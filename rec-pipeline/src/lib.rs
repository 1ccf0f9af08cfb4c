//! Streaming encode pipeline core
//!
//! Reconciles three independently paced actors (capture thread, encode
//! worker, downstream consumers) through a bounded drop-oldest queue:
//! - `submit` is O(1) and never blocks the capture thread
//! - one dedicated worker thread per pipeline owns the codec adapter
//! - start/stop serialize through a directive channel, so encoder
//!   acquire/release never races the drain loop
//! - every encoded unit fans out to a live callback and a muxer sink,
//!   each delivery best-effort and independent

pub mod config;
pub mod pipeline;
pub mod sink;
pub mod state;

mod fanout;
mod worker;

pub use config::*;
pub use pipeline::*;
pub use sink::{LiveCallback, MuxerSink};
pub use state::*;
