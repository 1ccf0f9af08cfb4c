//! Pipeline configuration

use rec_frame::{TrackKind, DEFAULT_QUEUE_CAPACITY};

/// How long one output poll may wait on the encoder before the drain loop
/// moves on and re-checks the run flag.
pub const DEFAULT_POLL_TIMEOUT_US: i64 = 10_000;

/// Per-track pipeline configuration
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub track: TrackKind,

    /// Frame queue capacity; overflow evicts the oldest frame
    pub queue_capacity: usize,

    /// Upper bound for one encoder output poll, in microseconds
    pub poll_timeout_us: i64,

    /// Video only: an external render path feeds the encoder's input
    /// surface directly, so the worker's own feed step is suppressed
    pub external_render: bool,
}

impl PipelineConfig {
    pub fn audio() -> Self {
        Self {
            track: TrackKind::Audio,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            poll_timeout_us: DEFAULT_POLL_TIMEOUT_US,
            external_render: false,
        }
    }

    pub fn video() -> Self {
        Self {
            track: TrackKind::Video,
            ..Self::audio()
        }
    }

    /// True when the worker should take input frames from the queue
    pub fn feeds_input(&self) -> bool {
        !(self.external_render && self.track.is_video())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::audio();
        assert_eq!(config.track, TrackKind::Audio);
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert!(config.feeds_input());

        let config = PipelineConfig::video();
        assert_eq!(config.track, TrackKind::Video);
        assert!(config.feeds_input());
    }

    #[test]
    fn test_external_render_only_affects_video() {
        let mut config = PipelineConfig::video();
        config.external_render = true;
        assert!(!config.feeds_input());

        let mut config = PipelineConfig::audio();
        config.external_render = true;
        assert!(config.feeds_input());
    }
}
