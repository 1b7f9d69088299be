//! Enemy spawning.

use bevy::prelude::*;

use super::animation::EnemyAnimation;
use super::brain::EnemyBrain;
use super::components::*;
use super::data::EnemyDefinition;
use crate::combat::{DamageTag, Faction, HitVolume};
use crate::core::Facing;
use crate::physics::{BodyShape, MotionIntent, SensorShape};
use crate::stats::{Pool, ResourcePool};

/// Spawn an enemy with its chase zone and (disabled) strike volume.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec2,
) -> Entity {
    let enemy = commands
        .spawn((
            Name::new(definition.name.clone()),
            Enemy,
            EnemyType(enemy_type.to_string()),
            EnemyBrain::new(definition.to_params(position.x)),
            // Enemies only use the health pool.
            ResourcePool::new(
                Pool::new(definition.max_health, 0.0),
                Pool::new(0.0, 0.0),
                Pool::new(0.0, 0.0),
            ),
            definition.intake_overrides(),
            Faction::Enemy,
            EnemyAnimation::default(),
            Facing::Right,
            MotionIntent::default(),
            BodyShape {
                half_extents: definition.body,
            },
            Transform::from_translation(position.extend(0.0)),
        ))
        .id();

    let zone = commands
        .spawn((
            Name::new("ChaseZone"),
            ChaseZone { owner: enemy },
            SensorShape {
                half_extents: definition.chase_zone,
            },
            Transform::default(),
        ))
        .id();

    let strike = commands
        .spawn((
            Name::new("Strike"),
            HitVolume {
                owner: enemy,
                faction: Faction::Enemy,
                tag: DamageTag::MobStrike,
                enabled: false,
                piercing: true,
                damage: definition.strike_damage,
            },
            SensorShape {
                half_extents: definition.strike_size,
            },
            Transform::from_translation(definition.strike_offset.extend(0.0)),
        ))
        .id();

    commands
        .entity(enemy)
        .add_children(&[zone, strike])
        .insert(StrikeVolumeLink {
            volume: strike,
            offset: definition.strike_offset,
        });

    info!(
        "Spawned {} at ({}, {})",
        definition.name, position.x, position.y
    );
    enemy
}
