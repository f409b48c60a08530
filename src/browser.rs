//! Directory browser: the list the user picks tracks from.
//!
//! One directory level at a time; subdirectories plus files with a
//! recognized audio extension.

mod list;

pub use list::{Browser, is_audio_file};

#[cfg(test)]
mod tests;
