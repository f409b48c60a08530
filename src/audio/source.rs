//! The control node sitting between the decoder and the output device.

use std::time::Duration;

use rodio::Source;

use super::transport::TransportHandle;

/// Wraps a decoded stream and consults the shared transport state on
/// every frame boundary.
///
/// While paused it emits silence and the frame cursor stays put, so a
/// paused track holds its position exactly. When the inner stream runs
/// out and `looping` is set, it seeks back to the start and keeps going;
/// otherwise it ends and the sink drains.
pub(crate) struct ControlSource {
    inner: Box<dyn Source + Send>,
    ctl: TransportHandle,
    channels: u16,
    sample_rate: u32,
    /// Sample index within the current frame.
    offset: u16,
    /// Local frame cursor, published to `ctl` at each frame boundary.
    frames: u64,
    paused: bool,
    looping: bool,
    done: bool,
}

impl ControlSource {
    pub(crate) fn new(
        inner: Box<dyn Source + Send>,
        channels: u16,
        sample_rate: u32,
        ctl: TransportHandle,
    ) -> Self {
        Self {
            inner,
            ctl,
            channels: channels.max(1),
            sample_rate,
            offset: 0,
            frames: 0,
            paused: false,
            looping: false,
            done: false,
        }
    }

    /// Frame-boundary exchange with the UI loop: publish the cursor, pick
    /// up flag changes. One short lock per frame keeps the render path
    /// responsive to toggles without per-sample locking overhead.
    fn sync(&mut self) {
        // Same poison policy as the track side: the flags and cursor are
        // always valid values, so a dead toggling thread must not stop
        // the render path from honoring further toggles.
        let mut ctl = self.ctl.lock().unwrap_or_else(|e| e.into_inner());
        ctl.frames = self.frames;
        self.paused = ctl.paused;
        self.looping = ctl.looping;
    }

    fn rewind(&mut self) {
        self.frames = 0;
        // Publish right away so the next position query already sees the
        // restarted stream instead of a full-length cursor.
        let mut ctl = self.ctl.lock().unwrap_or_else(|e| e.into_inner());
        ctl.frames = 0;
    }
}

impl Iterator for ControlSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.done {
            return None;
        }

        if self.offset == 0 {
            self.sync();
        }

        if self.paused {
            self.offset = (self.offset + 1) % self.channels;
            return Some(0.0);
        }

        let sample = match self.inner.next() {
            Some(sample) => sample,
            None => {
                // Mid-frame exhaustion means a malformed stream; end it.
                if !self.looping || self.offset != 0 {
                    self.done = true;
                    return None;
                }
                if self.inner.try_seek(Duration::ZERO).is_err() {
                    self.done = true;
                    return None;
                }
                self.rewind();
                match self.inner.next() {
                    Some(sample) => sample,
                    None => {
                        self.done = true;
                        return None;
                    }
                }
            }
        };

        self.offset += 1;
        if self.offset == self.channels {
            self.offset = 0;
            self.frames += 1;
        }
        Some(sample)
    }
}

impl Source for ControlSource {
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
        // Unbounded once looping is in play; callers track duration
        // separately.
        None
    }
}
