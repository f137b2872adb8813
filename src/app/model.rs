//! Application model types: `App` and the modal `Prompt` state.

use std::path::PathBuf;

use crate::audio::PlaybackHandle;
use crate::playlist::{PlaylistStore, StoreError};

/// Modal input state for the line-prompt flows (adding and deleting
/// tracks). While a prompt is open, normal key handling is suspended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Prompt {
    #[default]
    None,
    /// First add step: typing the audio file path.
    AddPath { buf: String },
    /// Second add step: typing the title for the chosen file.
    AddTitle { locator: PathBuf, buf: String },
    /// y/n confirmation before removing the track at the given index.
    ConfirmDelete(usize),
}

/// The main application model.
pub struct App {
    pub store: PlaylistStore,
    pub selected: usize,
    pub playback_handle: Option<PlaybackHandle>,
    pub prompt: Prompt,
    /// Transient line shown in the status box (errors, confirmations).
    pub status: Option<String>,
    /// Set when the playlist changed and the engine's track list needs a
    /// resync.
    tracks_dirty: bool,
}

impl App {
    pub fn new(store: PlaylistStore) -> Self {
        Self {
            store,
            selected: 0,
            playback_handle: None,
            prompt: Prompt::None,
            status: None,
            // starts dirty so the initial track list gets synced
            tracks_dirty: true,
        }
    }

    /// Attach the `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    pub fn has_tracks(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn tracks_dirty(&self) -> bool {
        self.tracks_dirty
    }

    pub fn clear_tracks_dirty(&mut self) {
        self.tracks_dirty = false;
    }

    /// Move the selection down, wrapping at the end of the list.
    pub fn select_next(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the selection up, wrapping at the start of the list.
    pub fn select_prev(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Keep the selection inside the list after mutations.
    pub fn clamp_selected(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Append a track and schedule an engine resync.
    pub fn add_track(&mut self, title: &str, locator: impl Into<PathBuf>) -> Result<(), StoreError> {
        let before = self.store.len();
        self.store.add(title, locator)?;
        if self.store.len() != before {
            self.tracks_dirty = true;
        }
        Ok(())
    }

    /// Remove the track at `index` and schedule an engine resync.
    pub fn remove_track(&mut self, index: usize) -> Result<(), StoreError> {
        let before = self.store.len();
        self.store.remove(index)?;
        if self.store.len() != before {
            self.tracks_dirty = true;
            self.clamp_selected();
        }
        Ok(())
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
