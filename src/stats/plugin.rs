//! Stats plugin - applies heal and level-up requests to resource pools.

use bevy::prelude::*;

use super::class::{CharacterClass, Level};
use super::pool::ResourcePool;
use crate::core::{GameplaySet, HealEvent, LevelUpEvent};

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (apply_level_ups, apply_heals).in_set(GameplaySet::Resolve),
        );
    }
}

/// Raise the level, recompute maxima and refill all three pools.
fn apply_level_ups(
    mut events: EventReader<LevelUpEvent>,
    mut characters: Query<(&CharacterClass, &mut Level, &mut ResourcePool)>,
) {
    for event in events.read() {
        let Ok((class, mut level, mut pools)) = characters.get_mut(event.player) else {
            warn!("Level up for {:?}, which is not a character", event.player);
            continue;
        };

        if pools.is_dead() {
            debug!("Ignoring level up for dead {}", class.name());
            continue;
        }

        level.0 += 1;
        let stats = class.stats_at(level.0);
        pools.apply_stats(&stats);

        info!(
            "{} reached level {} (hp {}, stamina {}, mana {})",
            class.name(),
            level.0,
            stats.max_health,
            stats.max_stamina,
            stats.max_mana
        );
    }
}

fn apply_heals(mut events: EventReader<HealEvent>, mut pools: Query<&mut ResourcePool>) {
    for event in events.read() {
        if let Ok(mut pool) = pools.get_mut(event.target) {
            let restored = pool.heal(event.amount);
            debug!("Healed {:?} for {}", event.target, restored);
        }
    }
}
