//! Opening and decoding audio files into playable sources.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::decoder::DecoderError;
use rodio::{Decoder, Source};
use thiserror::Error;

use super::types::LoadedSource;

/// Failures while turning a path into a playable source.
///
/// All of these are recoverable: they surface in the UI as the last error
/// and leave whatever was already playing alone.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecoderError,
    },
    #[error("could not determine the duration of {}", path.display())]
    UnknownDuration { path: PathBuf },
    #[error("{} does not support seeking", path.display())]
    Unseekable { path: PathBuf },
}

/// Open and decode `path`, returning the stream and its format metadata.
///
/// This also performs the one-time capability check: the decoded stream
/// must accept a seek, otherwise loop restarts could fail mid-playback.
/// Checking here turns that case into an ordinary load error.
pub fn open_and_decode(path: &Path) -> Result<LoadedSource, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut source = Decoder::new(BufReader::new(file)).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let sample_rate = source.sample_rate();
    let channels = source.channels();

    let duration = source
        .total_duration()
        .or_else(|| probe_duration(path))
        .ok_or_else(|| LoadError::UnknownDuration {
            path: path.to_path_buf(),
        })?;

    if source.try_seek(Duration::ZERO).is_err() {
        return Err(LoadError::Unseekable {
            path: path.to_path_buf(),
        });
    }

    Ok(LoadedSource {
        source: Box::new(source),
        sample_rate,
        channels,
        duration,
        title: title_for(path),
    })
}

/// Duration fallback for containers the decoder cannot measure up front.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}

/// Display title: the file's base name without its extension.
fn title_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}
