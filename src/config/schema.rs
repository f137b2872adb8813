use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/rondo/config.toml` or `~/.config/rondo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RONDO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playlist: PlaylistSettings,
    pub ticker: TickerSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Where the playlist file lives. Defaults to
    /// `$XDG_DATA_HOME/rondo/playlist.txt` when unset.
    pub path: Option<PathBuf>,
    /// When true, `add` copies the audio file into the rondo data
    /// directory and stores the copy's path instead of the original.
    pub copy_into_library: bool,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            path: None,
            copy_into_library: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TickerSettings {
    /// How often the progress ticker polls the playback position
    /// (milliseconds).
    pub interval_ms: u64,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self { interval_ms: 500 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ rondo: music, round and round ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}
