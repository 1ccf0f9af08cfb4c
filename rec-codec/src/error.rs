//! Codec error taxonomy
//!
//! Only genuine encoder faults live here. Transient "input full" and
//! "output empty" conditions are ordinary values (`InputStatus::Full`,
//! `PollEvent::Empty`) because they are retried, not handled.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// A feed/drain call arrived before `open()` or after `close()`
    #[error("encoder not open")]
    NotOpen,

    /// `open()` called on an already-open adapter
    #[error("encoder already open")]
    AlreadyOpen,

    /// The underlying encoder rejected its configuration
    #[error("encoder configuration rejected: {0}")]
    Configuration(String),

    /// Fault reported by the underlying encoder backend
    #[error("encoder backend: {0}")]
    Backend(String),
}
