use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::BrowserSettings;

/// One row in the browser: a subdirectory or a playable file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Single-level directory navigator feeding the file list UI.
pub struct Browser {
    cwd: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
}

/// True when the path's extension matches one of the configured audio
/// extensions, case-insensitively.
pub fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

impl Browser {
    pub fn open(dir: &Path, settings: &BrowserSettings) -> Self {
        let cwd = dir.to_path_buf();
        let entries = read_entries(&cwd, settings);
        Self {
            cwd,
            entries,
            selected: 0,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// Move selection down, wrapping at the end of the list.
    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    /// Move selection up, wrapping at the start of the list.
    pub fn prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.entries.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Enter the selected entry: descend into directories, hand back the
    /// path of files so the caller can load them.
    pub fn enter(&mut self, settings: &BrowserSettings) -> Option<PathBuf> {
        let entry = self.entries.get(self.selected)?.clone();
        if entry.is_dir {
            self.cwd = entry.path;
            self.reload(settings);
            None
        } else {
            Some(entry.path)
        }
    }

    /// Go up to the parent directory, keeping the directory we came from
    /// selected so backing out feels stable.
    pub fn ascend(&mut self, settings: &BrowserSettings) {
        let Some(parent) = self.cwd.parent().map(Path::to_path_buf) else {
            return;
        };
        let from = self.cwd.clone();
        self.cwd = parent;
        self.reload(settings);
        if let Some(pos) = self.entries.iter().position(|e| e.path == from) {
            self.selected = pos;
        }
    }

    fn reload(&mut self, settings: &BrowserSettings) {
        self.entries = read_entries(&self.cwd, settings);
        self.selected = 0;
    }
}

/// List `dir` one level deep: subdirectories plus audio files.
/// Directories sort first, then case-insensitive names. An unreadable
/// directory simply lists as empty.
fn read_entries(dir: &Path, settings: &BrowserSettings) -> Vec<Entry> {
    let mut entries: Vec<Entry> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_map(Result::ok)
        .filter_map(|e| {
            let path = e.path().to_path_buf();
            let name = path.file_name().and_then(|s| s.to_str())?.to_string();
            if !settings.show_hidden && name.starts_with('.') {
                return None;
            }
            let is_dir = e.file_type().is_dir();
            if !is_dir && !is_audio_file(&path, &settings.extensions) {
                return None;
            }
            Some(Entry { name, path, is_dir })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    entries
}
