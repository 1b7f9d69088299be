//! Combat-related components.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Identifies what kind of attack a hit volume carries. Damage is looked up
/// per tag, never stored on the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageTag {
    FireBall,
    IceSpear,
    Lightning,
    FighterQ,
    FighterE,
    FighterR,
    RangerArrow,
    RangerE,
    /// An enemy's melee strike.
    MobStrike,
}

impl DamageTag {
    pub const ALL: [DamageTag; 9] = [
        Self::FireBall,
        Self::IceSpear,
        Self::Lightning,
        Self::FighterQ,
        Self::FighterE,
        Self::FighterR,
        Self::RangerArrow,
        Self::RangerE,
        Self::MobStrike,
    ];
}

/// Which side an entity fights for. Hit volumes only damage the other side.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

/// A trigger region that deals damage on enter while enabled.
///
/// Disabled volumes exist (so windups and idle enemy weapons have a body to
/// arm later) but never register hits.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitVolume {
    /// Entity credited with the hit.
    pub owner: Entity,
    pub faction: Faction,
    pub tag: DamageTag,
    pub enabled: bool,
    /// Piercing volumes survive their hits; the rest are consumed by the first.
    pub piercing: bool,
    /// Fixed amount overriding the damage table (enemy strikes).
    pub damage: Option<f32>,
}

/// Arms a windup volume after a delay and removes it at the end of its
/// active window.
#[derive(Component, Debug)]
pub struct VolumeLifetime {
    pub arm: Option<Timer>,
    pub expire: Timer,
}

/// Straight-line mover for projectile volumes.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub velocity: Vec2,
}

/// Per-enemy-type damage intake, replacing table entries for the listed tags.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct DamageOverrides(pub Vec<(DamageTag, f32)>);

impl DamageOverrides {
    pub fn get(&self, tag: DamageTag) -> Option<f32> {
        self.0
            .iter()
            .find_map(|(candidate, amount)| (*candidate == tag).then_some(*amount))
    }
}

/// Marker component for entities that have died (prevents repeated death handling).
#[derive(Component)]
pub struct Dead;
