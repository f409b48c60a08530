//! Test doubles for the audio pipeline.

use std::time::Duration;

use rodio::Source;
use rodio::source::SeekError;

use super::types::LoadedSource;

/// Finite, seekable synthetic stream: `total_frames` frames of a constant
/// non-zero sample, so silence from the pause path is distinguishable
/// from real output.
pub(crate) struct TestSource {
    total_frames: u64,
    /// Position in samples, not frames.
    pos: u64,
    channels: u16,
    sample_rate: u32,
}

impl TestSource {
    pub(crate) fn new(total_frames: u64, channels: u16, sample_rate: u32) -> Self {
        Self {
            total_frames,
            pos: 0,
            channels,
            sample_rate,
        }
    }
}

impl Iterator for TestSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.pos >= self.total_frames * u64::from(self.channels) {
            return None;
        }
        self.pos += 1;
        Some(0.25)
    }
}

impl Source for TestSource {
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(
            self.total_frames as f64 / f64::from(self.sample_rate),
        ))
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        let frame = (pos.as_secs_f64() * f64::from(self.sample_rate)) as u64;
        self.pos = frame.min(self.total_frames) * u64::from(self.channels);
        Ok(())
    }
}

/// A `LoadedSource` over a synthetic stream of `secs` seconds.
pub(crate) fn loaded(title: &str, secs: f64, channels: u16, sample_rate: u32) -> LoadedSource {
    let total_frames = (secs * f64::from(sample_rate)) as u64;
    LoadedSource {
        source: Box::new(TestSource::new(total_frames, channels, sample_rate)),
        sample_rate,
        channels,
        duration: Duration::from_secs_f64(secs),
        title: title.to_string(),
    }
}
