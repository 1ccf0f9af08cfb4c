//! Pipeline lifecycle states

/// Lifecycle state of one encode pipeline
///
/// Transitions only happen under the controller's lock or on the worker
/// thread itself; `Running` is the only state in which frames are dequeued
/// and the encoder is driven.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No worker thread alive, no encoder held
    Idle = 0,
    /// Worker spawned, encoder acquisition pending on it
    Starting = 1,
    /// Drain loop active
    Running = 2,
    /// Stop requested, encoder release pending on the worker
    Stopping = 3,
}

impl PipelineState {
    pub fn label(self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Starting => "starting",
            PipelineState::Running => "running",
            PipelineState::Stopping => "stopping",
        }
    }
}
