//! Combat module - hit volumes, the damage table and hit resolution.

mod components;
mod data;
mod plugin;
mod spawning;
mod systems;

pub use components::*;
pub use data::*;
pub use plugin::CombatPlugin;
pub use spawning::spawn_attack_volume;
