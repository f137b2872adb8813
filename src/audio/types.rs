//! Audio-related small types and handles.
//!
//! This module defines the command enum, the engine state machine states
//! and the shared playback info/clock handles used by the audio subsystem.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum EngineCmd {
    /// Replace the track list (sent after any playlist mutation).
    SetTracks(Vec<PathBuf>),
    /// Release the current decoder, load the track at the given index and
    /// start playing it.
    Load(usize),
    /// Toggle pause/resume.
    TogglePause,
    /// Jump to an absolute offset into the current track.
    SeekTo(Duration),
    /// Scrub by the specified number of seconds (positive or negative).
    SeekBy(i64),
    /// Load the next track, wrapping at the end of the playlist.
    Next,
    /// Load the previous track, wrapping at the start of the playlist.
    Prev,
    /// Release the decoder and go back to Idle.
    Stop,
    /// Release everything and exit the audio thread.
    Quit,
}

/// The engine's state machine. Loading goes straight to `Playing`;
/// `Stop`, a failed load and natural end of track all land back in `Idle`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Index of the loaded track in the playlist (if any).
    pub index: Option<usize>,
    /// Playback position as last published by the progress ticker,
    /// clamped to `[0, duration]`.
    pub position: Duration,
    /// Total duration of the loaded track (zero when unknown).
    pub duration: Duration,
    /// Where the engine state machine currently is.
    pub state: EngineState,
    /// Last load failure, surfaced in the status line.
    pub error: Option<String>,
}

impl PlaybackInfo {
    pub fn playing(&self) -> bool {
        self.state == EngineState::Playing
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Wall-clock position tracking: `accumulated` holds the position at the
/// last pause/seek, `started_at` is set while playback is running.
#[derive(Debug, Default)]
pub struct PositionClock {
    pub started_at: Option<Instant>,
    pub accumulated: Duration,
}

impl PositionClock {
    pub fn position(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// Freeze the clock at `at` (paused or freshly sought while paused).
    pub fn freeze(&mut self, at: Duration) {
        self.accumulated = at;
        self.started_at = None;
    }

    /// Start the clock running from `at`.
    pub fn run_from(&mut self, at: Duration) {
        self.accumulated = at;
        self.started_at = Some(Instant::now());
    }
}

pub type ClockHandle = Arc<Mutex<PositionClock>>;
