//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::animation;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::core::GameplaySet;

/// Enemy plugin - handles enemy data, AI, death and animation flags.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(Update, ai::route_detection.in_set(GameplaySet::Sense))
            .add_systems(Update, ai::think.in_set(GameplaySet::Decide))
            .add_systems(
                Update,
                (
                    ai::handle_enemy_death,
                    ai::despawn_dead_enemies,
                    animation::sync_enemy_animation,
                )
                    .chain()
                    .in_set(GameplaySet::Present),
            );
    }
}
