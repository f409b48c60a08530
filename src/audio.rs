//! Audio subsystem: decoding, the playback transport and the output device.
//!
//! `transport::Track` is the pause/loop/position-aware layer around one
//! decoded stream. `engine::AudioEngine` owns the output device; at most
//! one source graph is registered with it at any time.

mod decode;
mod engine;
mod source;
mod transport;
mod types;

pub use decode::{LoadError, open_and_decode};
pub use engine::{AudioEngine, OutputSink, SourceGraph};
pub use transport::Track;
pub use types::{LoadResult, LoadedSource};

#[cfg(test)]
pub(crate) mod testutil;
