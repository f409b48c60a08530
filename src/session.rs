//! Session control: at most one playing track, loaded asynchronously.
//!
//! The `Session` state machine owns the output sink and the current
//! track; the runtime event loop feeds it commands, loader results and
//! periodic ticks.

mod loader;
mod model;

pub use model::{Session, SessionState};
