//! Playback transport: the pause/loop/position layer around one track.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::source::UniformSourceIterator;

use super::engine::{DEVICE_SAMPLE_RATE, SourceGraph};
use super::source::ControlSource;
use super::types::LoadedSource;

/// Transport state shared between the UI loop and the render path.
///
/// The render path publishes `frames` and reads the flags; the UI loop
/// reads `frames` and flips the flags. Every access goes through the
/// mutex, and the critical sections stay small so the render path never
/// stalls long enough to glitch.
#[derive(Debug, Default)]
pub struct TransportCtl {
    /// Sample-frame cursor at the stream's native rate.
    pub frames: u64,
    pub paused: bool,
    pub looping: bool,
}

pub type TransportHandle = Arc<Mutex<TransportCtl>>;

/// One loaded track together with its transport state.
///
/// The decoded stream itself lives inside the source graph handed to the
/// output sink; the track keeps the shared control handle and everything
/// needed to answer position queries.
pub struct Track {
    title: String,
    duration: Duration,
    sample_rate: u32,
    ctl: TransportHandle,
}

impl Track {
    /// Wrap a decoded source in the control node plus the rate adapter.
    ///
    /// Returns the track and the graph to hand to the output sink; the
    /// caller is in charge of registering it, so construction has no
    /// side effect on the device.
    pub fn new(loaded: LoadedSource) -> (Self, SourceGraph) {
        let ctl: TransportHandle = Arc::new(Mutex::new(TransportCtl::default()));
        let control = ControlSource::new(
            loaded.source,
            loaded.channels,
            loaded.sample_rate,
            ctl.clone(),
        );
        let graph: SourceGraph = Box::new(UniformSourceIterator::new(
            control,
            loaded.channels,
            DEVICE_SAMPLE_RATE,
        ));

        let track = Self {
            title: loaded.title,
            duration: loaded.duration,
            sample_rate: loaded.sample_rate.max(1),
            ctl,
        };
        (track, graph)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current playback position, converted from the frame cursor.
    pub fn position(&self) -> Duration {
        let frames = self.with_ctl(|ctl| ctl.frames);
        Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate))
    }

    /// `position / duration`. May read slightly past 1.0 right at the end
    /// of the track; callers treat anything >= 1.0 as finished.
    pub fn percent(&self) -> f64 {
        let total = self.duration.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        self.position().as_secs_f64() / total
    }

    /// Flip the pause flag under the lock; returns the new value.
    pub fn toggle_pause(&self) -> bool {
        self.with_ctl(|ctl| {
            ctl.paused = !ctl.paused;
            ctl.paused
        })
    }

    /// Force the pause flag on, used when a track runs out.
    pub fn pause(&self) {
        self.with_ctl(|ctl| ctl.paused = true);
    }

    /// Flip the loop flag under the lock; returns the new value. The
    /// render path picks the change up on its next frame, without
    /// disturbing the current position or the pause state.
    pub fn toggle_loop(&self) -> bool {
        self.with_ctl(|ctl| {
            ctl.looping = !ctl.looping;
            ctl.looping
        })
    }

    pub fn set_looping(&self, on: bool) {
        self.with_ctl(|ctl| ctl.looping = on);
    }

    pub fn paused(&self) -> bool {
        self.with_ctl(|ctl| ctl.paused)
    }

    pub fn looping(&self) -> bool {
        self.with_ctl(|ctl| ctl.looping)
    }

    fn with_ctl<R>(&self, f: impl FnOnce(&mut TransportCtl) -> R) -> R {
        // A poisoned lock only means a panicking thread died mid-access;
        // the flags and cursor are always valid values, so keep going.
        let mut ctl = self.ctl.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut ctl)
    }
}
