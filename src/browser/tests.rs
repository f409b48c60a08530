use std::fs;
use std::path::Path;

use super::list::{Browser, is_audio_file};
use crate::config::BrowserSettings;

fn touch(path: &Path) {
    fs::write(path, b"").unwrap();
}

/// A small mixed tree:
///
/// root/
///   albums/
///     track.mp3
///   singles/
///   .hidden-dir/
///   b-song.FLAC
///   a-song.mp3
///   notes.txt
///   .hidden.mp3
fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir(root.join("albums")).unwrap();
    touch(&root.join("albums").join("track.mp3"));
    fs::create_dir(root.join("singles")).unwrap();
    fs::create_dir(root.join(".hidden-dir")).unwrap();
    touch(&root.join("b-song.FLAC"));
    touch(&root.join("a-song.mp3"));
    touch(&root.join("notes.txt"));
    touch(&root.join(".hidden.mp3"));

    dir
}

fn names(browser: &Browser) -> Vec<&str> {
    browser.entries().iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn recognizes_audio_extensions_case_insensitively() {
    let exts = vec!["mp3".to_string(), "flac".to_string()];
    assert!(is_audio_file(Path::new("a.mp3"), &exts));
    assert!(is_audio_file(Path::new("a.MP3"), &exts));
    assert!(is_audio_file(Path::new("a.FlAc"), &exts));
    assert!(!is_audio_file(Path::new("a.txt"), &exts));
    assert!(!is_audio_file(Path::new("noext"), &exts));
}

#[test]
fn lists_dirs_first_then_audio_files_sorted() {
    let dir = sample_tree();
    let browser = Browser::open(dir.path(), &BrowserSettings::default());

    // Hidden entries and non-audio files are filtered out; directories
    // sort before files, names case-insensitively within each group.
    assert_eq!(names(&browser), vec!["albums", "singles", "a-song.mp3", "b-song.FLAC"]);
}

#[test]
fn show_hidden_includes_dotfiles() {
    let dir = sample_tree();
    let settings = BrowserSettings {
        show_hidden: true,
        ..BrowserSettings::default()
    };
    let browser = Browser::open(dir.path(), &settings);

    let listed = names(&browser);
    assert!(listed.contains(&".hidden-dir"));
    assert!(listed.contains(&".hidden.mp3"));
    assert!(!listed.contains(&"notes.txt"));
}

#[test]
fn selection_wraps_both_ways() {
    let dir = sample_tree();
    let mut browser = Browser::open(dir.path(), &BrowserSettings::default());
    assert_eq!(browser.selected(), 0);

    browser.prev();
    assert_eq!(browser.selected(), browser.entries().len() - 1);
    browser.next();
    assert_eq!(browser.selected(), 0);

    browser.select_last();
    assert_eq!(browser.selected(), browser.entries().len() - 1);
    browser.next();
    assert_eq!(browser.selected(), 0);
    browser.select_first();
    assert_eq!(browser.selected(), 0);
}

#[test]
fn enter_descends_into_directories() {
    let dir = sample_tree();
    let settings = BrowserSettings::default();
    let mut browser = Browser::open(dir.path(), &settings);

    // "albums" is the first entry.
    assert_eq!(browser.enter(&settings), None);
    assert_eq!(browser.cwd(), dir.path().join("albums"));
    assert_eq!(names(&browser), vec!["track.mp3"]);
}

#[test]
fn enter_hands_back_file_paths() {
    let dir = sample_tree();
    let settings = BrowserSettings::default();
    let mut browser = Browser::open(dir.path(), &settings);

    browser.select_first();
    browser.next();
    browser.next();
    assert_eq!(browser.selected_entry().unwrap().name, "a-song.mp3");
    assert_eq!(browser.enter(&settings), Some(dir.path().join("a-song.mp3")));
    // Playing a file does not move the browser.
    assert_eq!(browser.cwd(), dir.path());
}

#[test]
fn ascend_reselects_the_directory_we_left() {
    let dir = sample_tree();
    let settings = BrowserSettings::default();
    let mut browser = Browser::open(dir.path(), &settings);

    browser.next();
    assert_eq!(browser.selected_entry().unwrap().name, "singles");
    browser.enter(&settings);
    assert_eq!(browser.cwd(), dir.path().join("singles"));
    assert!(browser.entries().is_empty());

    browser.ascend(&settings);
    assert_eq!(browser.cwd(), dir.path());
    assert_eq!(browser.selected_entry().unwrap().name, "singles");
}

#[test]
fn empty_selection_is_safe() {
    let dir = tempfile::tempdir().unwrap();
    let settings = BrowserSettings::default();
    let mut browser = Browser::open(dir.path(), &settings);

    assert!(browser.entries().is_empty());
    assert!(browser.selected_entry().is_none());
    browser.next();
    browser.prev();
    browser.select_last();
    assert_eq!(browser.enter(&settings), None);
}

#[test]
fn unreadable_directory_lists_empty() {
    let settings = BrowserSettings::default();
    let browser = Browser::open(Path::new("/definitely/not/a/real/dir"), &settings);
    assert!(browser.entries().is_empty());
}
