//! Flat-file playlist persistence.
//!
//! Record format: one `title|locator` pair per line, UTF-8, split on the
//! first `|` so locators containing `|` survive a round trip. Titles may
//! not contain `|`; `add` refuses them since such a record would corrupt
//! parsing on the next load.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::model::Track;

/// Persistence failures while rewriting the playlist file.
///
/// Reads never produce an error: a missing or unreadable file is treated
/// as an empty playlist.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write playlist {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ordered playlist backed by a newline-delimited text file.
///
/// Insertion order is playback order; duplicates are allowed. Every
/// mutation rewrites the whole file (single-writer, UI thread owns it).
pub struct PlaylistStore {
    path: PathBuf,
    tracks: Vec<Track>,
}

impl PlaylistStore {
    /// Create an empty store bound to `path` (nothing is read yet).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tracks: Vec::new(),
        }
    }

    /// Create a store bound to `path` and load whatever the file holds.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        store.load();
        store
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Locators of all tracks, in playback order.
    pub fn locators(&self) -> Vec<PathBuf> {
        self.tracks.iter().map(|t| t.locator.clone()).collect()
    }

    /// Replace the in-memory list with the file contents.
    ///
    /// Lines without a `|` are skipped silently; a missing or unreadable
    /// file yields an empty list. Idempotent.
    pub fn load(&mut self) {
        self.tracks.clear();
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return;
        };
        for line in contents.lines() {
            if let Some(track) = parse_record(line) {
                self.tracks.push(track);
            }
        }
    }

    /// Rewrite the playlist file from the in-memory list.
    ///
    /// Writes a sibling temp file and renames it over the target, which is
    /// as atomic as a single-writer needs.
    pub fn save(&self) -> Result<(), StoreError> {
        let records: Vec<String> = self
            .tracks
            .iter()
            .map(|t| format!("{}|{}", t.title, t.locator.display()))
            .collect();
        let body = records.join("\n");

        let write = |path: &Path| -> io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let tmp = path.with_extension("txt.tmp");
            fs::write(&tmp, &body)?;
            fs::rename(&tmp, path)
        };

        write(&self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Append a track and persist. A blank or `|`-containing title is
    /// ignored silently; callers validate before prompting the save.
    pub fn add(&mut self, title: &str, locator: impl Into<PathBuf>) -> Result<(), StoreError> {
        let title = title.trim();
        if title.is_empty() || title.contains('|') {
            return Ok(());
        }
        self.tracks.push(Track::new(title, locator));
        self.save()
    }

    /// Remove the entry at `index` (if valid) and persist.
    pub fn remove(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.tracks.len() {
            return Ok(());
        }
        self.tracks.remove(index);
        self.save()
    }
}

fn parse_record(line: &str) -> Option<Track> {
    let (title, locator) = line.split_once('|')?;
    if title.is_empty() {
        return None;
    }
    Some(Track::new(title, locator))
}

/// Default playlist location: `$XDG_DATA_HOME/rondo/playlist.txt`, falling
/// back to `~/.local/share/rondo/playlist.txt`.
pub fn default_playlist_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("playlist.txt"))
}

/// Directory that `add` copies audio files into when `copy_into_library`
/// is enabled.
pub fn library_dir() -> Option<PathBuf> {
    data_dir().map(|d| d.join("songs"))
}

fn data_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("rondo"))
}
