//! Core game module - states, events, errors and the per-entity timeline.
//!
//! Every other plugin builds on the types exported here.

mod error;
mod events;
mod facing;
mod plugin;
mod states;
mod timeline;

pub use error::*;
pub use events::*;
pub use facing::Facing;
pub use plugin::CorePlugin;
pub use states::*;
pub use timeline::Timeline;
