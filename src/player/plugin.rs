//! Player plugin - input, controller drive and animation flags.

use bevy::prelude::*;

use super::components::*;
use super::ground::GroundProbe;
use super::systems;
use crate::core::GameplaySet;

/// Player plugin - drives every character controller once per tick.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .init_resource::<GroundProbe>()
            .add_systems(Update, systems::read_keyboard.in_set(GameplaySet::Sense))
            .add_systems(Update, systems::drive_characters.in_set(GameplaySet::Decide))
            .add_systems(
                Update,
                systems::sync_character_animation.in_set(GameplaySet::Present),
            );
    }
}
