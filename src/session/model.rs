//! The session state machine.

use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::audio::{LoadError, LoadResult, LoadedSource, OutputSink, Track};
use crate::browser;

use super::loader;

/// Where the session is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No track; the user is browsing.
    Idle,
    /// A decode is in flight. Any prior track keeps playing meanwhile.
    Loading,
    Playing,
    Paused,
    /// The track reached its end and looping was off.
    Finished,
}

/// Owns the output sink and at most one track at a time.
pub struct Session {
    sink: Box<dyn OutputSink>,
    track: Option<Track>,
    state: SessionState,
    /// State to fall back to when a load fails.
    resume: SessionState,
    last_error: Option<LoadError>,
    /// Bumped per load request; completions carrying an older value are
    /// from superseded requests and get dropped.
    generation: u64,
    /// Loop flag applied to every freshly loaded track.
    default_looping: bool,
}

impl Session {
    pub fn new(sink: Box<dyn OutputSink>, default_looping: bool) -> Self {
        Self {
            sink,
            track: None,
            state: SessionState::Idle,
            resume: SessionState::Idle,
            last_error: None,
            generation: 0,
            default_looping,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Kick off an asynchronous load of `path`.
    ///
    /// Selecting something that is not an audio file is not an error;
    /// it is ignored without touching any state.
    pub fn request_load(&mut self, path: &Path, extensions: &[String], tx: &Sender<LoadResult>) {
        if !browser::is_audio_file(path, extensions) {
            return;
        }
        if self.state != SessionState::Loading {
            self.resume = self.state;
        }
        self.generation += 1;
        self.state = SessionState::Loading;
        loader::spawn_load(path.to_path_buf(), self.generation, tx.clone());
    }

    /// Fold a finished load back into the session.
    pub fn apply_load(&mut self, result: LoadResult) {
        match result {
            LoadResult::Loaded { generation, loaded } if generation == self.generation => {
                self.complete_load(loaded);
            }
            LoadResult::Failed { generation, error } if generation == self.generation => {
                self.fail_load(error);
            }
            // Stale generation: a newer request superseded this one.
            _ => {}
        }
    }

    fn complete_load(&mut self, loaded: LoadedSource) {
        let (track, graph) = Track::new(loaded);
        if self.default_looping {
            track.set_looping(true);
        }
        // The old graph must be gone before the new one goes in: the
        // device renders at most one graph at any time, and clearing
        // releases the superseded stream's file handle and buffers.
        self.sink.clear();
        self.sink.register(graph);
        self.track = Some(track);
        self.state = SessionState::Playing;
        self.last_error = None;
    }

    fn fail_load(&mut self, error: LoadError) {
        // A failed load never disturbs whatever was already playing.
        self.last_error = Some(error);
        self.state = self.resume;
    }

    /// Pause/resume toggle. Only meaningful with an active track.
    pub fn toggle_pause(&mut self) {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return;
        }
        if let Some(track) = &self.track {
            let paused = track.toggle_pause();
            self.state = if paused {
                SessionState::Paused
            } else {
                SessionState::Playing
            };
        }
    }

    /// Loop toggle; the playback state is preserved.
    pub fn toggle_loop(&mut self) {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return;
        }
        if let Some(track) = &self.track {
            track.toggle_loop();
        }
    }

    /// Periodic end-of-track check.
    ///
    /// Percent is polled rather than signalled, so a reading slightly past
    /// 1.0 is expected right at the end; anything >= 1.0 counts as done.
    pub fn on_tick(&mut self) {
        if self.state != SessionState::Playing {
            return;
        }
        let Some(track) = &self.track else {
            return;
        };
        if track.percent() < 1.0 {
            return;
        }
        if track.looping() {
            // The control node restarts the stream by itself; the next
            // tick already observes a rewound cursor.
            return;
        }
        track.pause();
        self.state = SessionState::Finished;
    }

    /// Whether the event loop should keep scheduling progress ticks.
    pub fn ticking(&self) -> bool {
        self.track.is_some() && self.state != SessionState::Finished
    }

    // Read-only surface for the presentation layer.

    pub fn title(&self) -> &str {
        self.track.as_ref().map(Track::title).unwrap_or("")
    }

    pub fn paused(&self) -> bool {
        self.track.as_ref().is_some_and(Track::paused)
    }

    pub fn looping(&self) -> bool {
        self.track.as_ref().is_some_and(Track::looping)
    }

    pub fn elapsed(&self) -> Duration {
        self.track
            .as_ref()
            .map(Track::position)
            .unwrap_or(Duration::ZERO)
    }

    pub fn total(&self) -> Duration {
        self.track
            .as_ref()
            .map(Track::duration)
            .unwrap_or(Duration::ZERO)
    }

    pub fn percent(&self) -> f64 {
        self.track.as_ref().map(Track::percent).unwrap_or(0.0)
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    /// Tear down playback on quit.
    pub fn shutdown(&mut self) {
        self.sink.clear();
        self.track = None;
        self.state = SessionState::Idle;
    }
}
