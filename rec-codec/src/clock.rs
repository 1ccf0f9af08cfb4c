//! Per-track presentation time models
//!
//! Audio derives timestamps from the number of sample bytes already fed
//! (a byte count is an exact sample count for PCM), video from the
//! wall-clock delta since the clock started. Both clamp a non-increasing
//! candidate to one microsecond past the previous accepted timestamp, so
//! presentation time is strictly increasing per track.
//!
//! `presentation_time()` is a pure read; the clock only advances via
//! `advance()`, called when the encoder accepts a frame. A frame rejected
//! with "input full" therefore resubmits with an unchanged timestamp.

use std::time::Instant;

const MICROS_PER_SEC: u64 = 1_000_000;

/// Sample-count clock for PCM audio
pub struct AudioClock {
    byte_rate: u64,
    bytes_fed: u64,
    last_pts_us: i64,
}

impl AudioClock {
    pub fn new(sample_rate: u32, channels: u16, bytes_per_sample: u16) -> Self {
        let byte_rate = sample_rate as u64 * channels as u64 * bytes_per_sample as u64;
        Self {
            byte_rate: byte_rate.max(1),
            bytes_fed: 0,
            last_pts_us: -1,
        }
    }

    /// Timestamp for the next frame, in microseconds
    pub fn presentation_time(&self, _byte_len: usize) -> i64 {
        let raw = (self.bytes_fed * MICROS_PER_SEC / self.byte_rate) as i64;
        let pts = raw.max(self.last_pts_us + 1);
        if pts != raw {
            log::debug!(
                "audio pts drift: clamped {} -> {} us",
                raw,
                pts
            );
        }
        pts
    }

    /// Record an accepted frame of `byte_len` bytes stamped `pts_us`
    pub fn advance(&mut self, byte_len: usize, pts_us: i64) {
        self.bytes_fed += byte_len as u64;
        self.last_pts_us = pts_us;
    }
}

/// Wall-clock model for video frames
pub struct VideoClock {
    origin: Instant,
    last_pts_us: i64,
}

impl VideoClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last_pts_us: -1,
        }
    }

    /// Timestamp for the next frame, in microseconds since the clock started
    pub fn presentation_time(&self, _byte_len: usize) -> i64 {
        let raw = self.origin.elapsed().as_micros() as i64;
        let pts = raw.max(self.last_pts_us + 1);
        if pts != raw {
            log::debug!(
                "video pts drift: clamped {} -> {} us",
                raw,
                pts
            );
        }
        pts
    }

    pub fn advance(&mut self, _byte_len: usize, pts_us: i64) {
        self.last_pts_us = pts_us;
    }
}

impl Default for VideoClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Track-kind dispatch over the two clock models
pub enum TrackClock {
    Audio(AudioClock),
    Video(VideoClock),
}

impl TrackClock {
    pub fn audio(sample_rate: u32, channels: u16, bytes_per_sample: u16) -> Self {
        TrackClock::Audio(AudioClock::new(sample_rate, channels, bytes_per_sample))
    }

    pub fn video() -> Self {
        TrackClock::Video(VideoClock::new())
    }

    pub fn presentation_time(&self, byte_len: usize) -> i64 {
        match self {
            TrackClock::Audio(clock) => clock.presentation_time(byte_len),
            TrackClock::Video(clock) => clock.presentation_time(byte_len),
        }
    }

    pub fn advance(&mut self, byte_len: usize, pts_us: i64) {
        match self {
            TrackClock::Audio(clock) => clock.advance(byte_len, pts_us),
            TrackClock::Video(clock) => clock.advance(byte_len, pts_us),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_audio_pts_from_sample_count() {
        // 48 kHz stereo s16: 192000 bytes per second.
        let mut clock = AudioClock::new(48_000, 2, 2);

        let pts0 = clock.presentation_time(19_200);
        assert_eq!(pts0, 0);
        clock.advance(19_200, pts0);

        // 19200 bytes = 100 ms of audio.
        let pts1 = clock.presentation_time(19_200);
        assert_eq!(pts1, 100_000);
        clock.advance(19_200, pts1);

        let pts2 = clock.presentation_time(19_200);
        assert_eq!(pts2, 200_000);
    }

    #[test]
    fn test_audio_pts_unchanged_until_advance() {
        let mut clock = AudioClock::new(48_000, 2, 2);

        let pts = clock.presentation_time(4096);
        // A rejected submission recomputes the same timestamp.
        assert_eq!(clock.presentation_time(4096), pts);

        clock.advance(4096, pts);
        assert!(clock.presentation_time(4096) > pts);
    }

    #[test]
    fn test_audio_pts_strictly_increasing_at_high_byte_rate() {
        // 96 kHz, 8 channels, f32: over 3 MB/s, where integer division
        // alone would repeat timestamps for tiny frames.
        let mut clock = AudioClock::new(96_000, 8, 4);

        let mut last = -1i64;
        for _ in 0..32 {
            let pts = clock.presentation_time(2);
            assert!(pts > last, "pts {} not greater than {}", pts, last);
            clock.advance(2, pts);
            last = pts;
        }
    }

    #[test]
    fn test_video_pts_wall_clock() {
        let mut clock = VideoClock::new();

        let pts0 = clock.presentation_time(0);
        clock.advance(0, pts0);

        thread::sleep(Duration::from_millis(5));

        let pts1 = clock.presentation_time(0);
        assert!(pts1 > pts0);
        assert!(pts1 >= 5_000);
    }

    #[test]
    fn test_video_pts_monotonic_clamp() {
        let mut clock = VideoClock::new();

        let pts = clock.presentation_time(0);
        // Pretend a later frame was stamped far in the future; the next
        // candidate must still come out strictly greater.
        clock.advance(0, pts + 1_000_000);

        let next = clock.presentation_time(0);
        assert_eq!(next, pts + 1_000_001);
    }
}
