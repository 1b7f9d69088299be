//! Enemies module - enemy brain, data, spawning and AI systems.

mod ai;
mod animation;
mod brain;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use animation::EnemyAnimation;
pub use brain::*;
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
