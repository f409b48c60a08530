use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::audio::{self, LoadResult};

/// Run the open + decode work off the UI loop.
///
/// The UI loop never blocks on file I/O; the outcome comes back as a
/// `LoadResult` message on `tx`, tagged with the request's generation.
pub(super) fn spawn_load(path: PathBuf, generation: u64, tx: Sender<LoadResult>) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = match audio::open_and_decode(&path) {
            Ok(loaded) => LoadResult::Loaded { generation, loaded },
            Err(error) => LoadResult::Failed { generation, error },
        };
        // The receiver going away just means the app is shutting down.
        let _ = tx.send(result);
    })
}
