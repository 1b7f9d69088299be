//! Combat plugin - hit volumes, damage and deaths.

use bevy::prelude::*;

use super::data::{load_damage_table, DamageTable, SpawnTemplates};
use super::systems;
use crate::core::GameplaySet;

/// Combat plugin - owns the damage table and resolves every hit.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DamageTable>()
            .init_resource::<SpawnTemplates>()
            .add_systems(Startup, load_damage_table)
            .add_systems(Update, systems::tick_hit_volumes.in_set(GameplaySet::Sense))
            .add_systems(
                Update,
                (systems::resolve_hits, systems::check_deaths)
                    .chain()
                    .in_set(GameplaySet::Resolve),
            );
    }
}
