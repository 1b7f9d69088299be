//! Player module - character classes' shared controller, attacks and input.

mod catalog;
mod components;
mod controller;
mod ground;
mod plugin;
mod systems;

pub use catalog::*;
pub use components::*;
pub use controller::{CharacterController, CharacterState, ControlInput, SpawnRequest, TickOutcome};
pub use ground::{GroundProbe, GroundSensor};
pub use plugin::PlayerPlugin;
pub use systems::spawn_character;
