//! Domain types shared across the engine

mod crates;
mod ids;
mod track;

pub use crates::Crate;
pub use ids::{CrateId, EntryId, ListenerId, TrackId};
pub use track::{format_seconds, SourcePlatform, Track};
