//! Utilities for creating `rodio` sinks from audio file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position. Unlike a hard-coded
//! library, playlist entries are user-typed paths, so failures are
//! ordinary and must leave the engine in a clean state.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

/// A track locator that could not be turned into a live decoder.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {path}: unsupported or corrupt audio")]
    Decode { path: PathBuf },
}

/// Create a paused `Sink` for the file at `path` that starts playback at
/// `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, PlayError> {
    let file = File::open(path).map_err(|source| PlayError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|_| PlayError::Decode {
            path: path.to_path_buf(),
        })?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Total duration of the file at `path`, if the tag reader can work it out.
///
/// rodio's `total_duration` is unreliable for mp3, so the dial's maximum
/// comes from lofty's properties instead.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}
