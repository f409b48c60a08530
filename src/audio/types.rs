//! Message types exchanged between the loader and the UI loop.

use std::time::Duration;

use rodio::Source;

use super::decode::LoadError;

/// A successfully opened and decoded stream plus its format metadata.
///
/// The source is guaranteed seekable: the capability is checked once at
/// decode time, so loop restarts never hit a missing-seek path later.
pub struct LoadedSource {
    pub source: Box<dyn Source + Send>,
    /// Native sample rate of the stream, in frames per second.
    pub sample_rate: u32,
    pub channels: u16,
    /// Total playable time, computed once at load.
    pub duration: Duration,
    /// Display title, derived from the file's base name.
    pub title: String,
}

/// Outcome of an asynchronous load, delivered back to the UI loop.
///
/// `generation` identifies which load request produced the result, so a
/// completion from a superseded request can be dropped.
pub enum LoadResult {
    Loaded { generation: u64, loaded: LoadedSource },
    Failed { generation: u64, error: LoadError },
}
