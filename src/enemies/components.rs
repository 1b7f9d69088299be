//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct EnemyType(pub String);

/// Detection trigger around an enemy. Characters entering it become the
/// owner's target.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseZone {
    pub owner: Entity,
}

/// The enemy's persistent strike volume, armed only during a strike window.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct StrikeVolumeLink {
    pub volume: Entity,
    /// Offset for a right-facing enemy.
    pub offset: Vec2,
}

/// Timer before a dead enemy is removed from the world.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl Default for DeathTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Once))
    }
}
