//! Application module: the model shared between the runtime and the UI.
//!
//! The `App` model lives in `app::model` and holds the playlist store,
//! selection, modal input state and the playback handle.

mod model;

pub use model::*;
