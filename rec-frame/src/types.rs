//! Track and frame data types

/// Which of the two independent media streams a frame belongs to
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio = 0,
    Video = 1,
}

impl TrackKind {
    /// Short label for log messages
    pub fn label(self) -> &'static str {
        match self {
            TrackKind::Audio => "audio",
            TrackKind::Video => "video",
        }
    }

    pub fn is_video(self) -> bool {
        matches!(self, TrackKind::Video)
    }
}

/// Raw captured frame (PCM samples or a YUV picture)
///
/// Ownership moves producer -> queue -> worker; the payload is copied into
/// the encoder's input buffer and the frame is dropped.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub data: Vec<u8>,
    pub track: TrackKind,
}

impl RawFrame {
    pub fn new(track: TrackKind, data: Vec<u8>) -> Self {
        Self { data, track }
    }

    pub fn audio(data: Vec<u8>) -> Self {
        Self::new(TrackKind::Audio, data)
    }

    pub fn video(data: Vec<u8>) -> Self {
        Self::new(TrackKind::Video, data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Classification of a compressed unit, for diagnostics only
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Ordinary compressed frame
    Regular = 0,
    /// Self-contained video frame decodable without prior frames
    KeyFrame = 1,
    /// Out-of-band encoder configuration (e.g. parameter sets)
    CodecConfig = 2,
}

impl UnitKind {
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Regular => "regular",
            UnitKind::KeyFrame => "key frame",
            UnitKind::CodecConfig => "codec config",
        }
    }
}

/// One compressed unit produced by the encoder
#[derive(Debug, Clone)]
pub struct EncodedUnit {
    pub data: Vec<u8>,
    pub track: TrackKind,
    /// Presentation timestamp in microseconds
    pub pts_us: i64,
    pub kind: UnitKind,
}

impl EncodedUnit {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Opaque codec-specific configuration, emitted once per track when the
/// encoder's output format stabilizes and consumed by the muxer to
/// register the track.
#[derive(Debug, Clone)]
pub struct FormatDescriptor {
    /// Codec identifier (e.g. "h264", "aac")
    pub codec: String,
    /// Out-of-band configuration bytes, codec-specific layout
    pub extradata: Vec<u8>,
}

impl FormatDescriptor {
    pub fn new(codec: impl Into<String>, extradata: Vec<u8>) -> Self {
        Self {
            codec: codec.into(),
            extradata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_labels() {
        assert_eq!(TrackKind::Audio.label(), "audio");
        assert_eq!(TrackKind::Video.label(), "video");
        assert!(TrackKind::Video.is_video());
        assert!(!TrackKind::Audio.is_video());
    }

    #[test]
    fn test_raw_frame_constructors() {
        let frame = RawFrame::audio(vec![0u8; 4096]);
        assert_eq!(frame.track, TrackKind::Audio);
        assert_eq!(frame.len(), 4096);

        let frame = RawFrame::video(vec![0u8; 1920 * 1080 * 3 / 2]);
        assert_eq!(frame.track, TrackKind::Video);
        assert!(!frame.is_empty());
    }
}
