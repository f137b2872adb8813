//! Playback engine: a dedicated audio thread driven by an mpsc command
//! channel, sharing playback state with the UI through mutex-guarded
//! handles.

mod engine;
mod sink;
mod thread;
mod ticker;
mod types;

pub use engine::PlayerEngine;
pub use types::*;

#[cfg(test)]
mod tests;
