//! Codec boundary for the streaming encode pipeline
//!
//! Key pieces:
//! - `CodecAdapter` capability trait the worker drives
//! - Transient signals (`InputStatus`, `PollEvent`) kept out of the error
//!   taxonomy so busy encoders are retried, not handled
//! - Per-track presentation clock models (sample count for audio,
//!   wall clock for video)

pub mod adapter;
pub mod clock;
pub mod error;

pub use adapter::*;
pub use clock::*;
pub use error::*;
