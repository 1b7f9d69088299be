//! Resource gauges - display-only mirrors of every character's pools.
//!
//! A gauge is a plain numeric range (value out of max). Whatever draws the
//! HUD reads these; gameplay never reads them back.

use bevy::prelude::*;

use crate::core::GameplaySet;
use crate::player::Player;
use crate::stats::{ResourceKind, ResourcePool};

/// One slider-like readout for one pool of one character.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ResourceGauge {
    pub character: Entity,
    pub kind: ResourceKind,
    pub value: f32,
    pub max: f32,
}

impl ResourceGauge {
    fn read(character: Entity, kind: ResourceKind, pools: &ResourcePool) -> Self {
        Self {
            character,
            kind,
            value: pools.current(kind),
            max: pools.max(kind),
        }
    }

    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.value / self.max
        }
    }
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(
        Update,
        (spawn_gauges, update_gauges, cleanup_gauges)
            .chain()
            .in_set(GameplaySet::Present),
    );
}

/// Give every new character a health, stamina and mana gauge.
fn spawn_gauges(
    mut commands: Commands,
    characters: Query<(Entity, &ResourcePool), Added<Player>>,
) {
    for (character, pools) in characters.iter() {
        for kind in [ResourceKind::Health, ResourceKind::Stamina, ResourceKind::Mana] {
            commands.spawn((
                Name::new(format!("{kind:?} gauge")),
                ResourceGauge::read(character, kind, pools),
            ));
        }
    }
}

/// Push pool values into gauges whenever the pool changed.
fn update_gauges(
    characters: Query<Ref<ResourcePool>, With<Player>>,
    mut gauges: Query<&mut ResourceGauge>,
) {
    for mut gauge in gauges.iter_mut() {
        let Ok(pools) = characters.get(gauge.character) else {
            continue;
        };
        if !pools.is_changed() {
            continue;
        }
        let fresh = ResourceGauge::read(gauge.character, gauge.kind, &pools);
        gauge.set_if_neq(fresh);
    }
}

/// Remove gauges of characters that no longer exist.
fn cleanup_gauges(
    mut commands: Commands,
    characters: Query<(), With<Player>>,
    gauges: Query<(Entity, &ResourceGauge)>,
) {
    for (entity, gauge) in gauges.iter() {
        if !characters.contains(gauge.character) {
            commands.entity(entity).despawn_recursive();
        }
    }
}
