use std::path::PathBuf;

/// One playlist entry: a user-facing title and the audio file it points at.
///
/// Immutable once created; owned by the [`PlaylistStore`](super::PlaylistStore)
/// and referenced elsewhere by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub locator: PathBuf,
}

impl Track {
    pub fn new(title: impl Into<String>, locator: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            locator: locator.into(),
        }
    }
}
