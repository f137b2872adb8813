//! Playlist model and persistence.
//!
//! The playlist is the whole library here: an ordered list of
//! (title, locator) pairs kept in a flat text file and rewritten in
//! full on every mutation.

mod model;
mod store;

pub use model::*;
pub use store::*;
