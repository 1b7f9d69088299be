//! Per-class attack tables.
//!
//! Every class has three attack slots. The controller logic is identical for
//! all of them; only the numbers and effect kinds below differ.

use bevy::prelude::*;

use crate::combat::DamageTag;
use crate::core::AnimationCue;
use crate::stats::{CharacterClass, Cost};

/// The three attack buttons (Q, E and R on a keyboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackSlot {
    Basic,
    Second,
    Third,
}

impl AttackSlot {
    pub const ALL: [AttackSlot; 3] = [Self::Basic, Self::Second, Self::Third];

    fn index(self) -> usize {
        match self {
            Self::Basic => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    pub fn animation_cue(self) -> AnimationCue {
        match self {
            Self::Basic => AnimationCue::BasicAttack,
            Self::Second => AnimationCue::SecondAttack,
            Self::Third => AnimationCue::ThirdAttack,
        }
    }
}

/// A moving hit volume spawned in front of the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub tag: DamageTag,
    /// Spawn offset from the character for a right-facing character.
    pub offset: Vec2,
    /// Velocity for a right-facing character.
    pub velocity: Vec2,
}

/// Hit volumes attached to the character for a short active window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeSpec {
    pub tag: DamageTag,
    pub offset: Vec2,
    /// Seconds each strike stays armed.
    pub active_window: f32,
    pub strikes: u32,
    /// Seconds between consecutive strikes.
    pub interval: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackEffect {
    Projectile(ProjectileSpec),
    MeleeVolume(MeleeSpec),
    /// `count` shots, each `spacing` further out and `interval` seconds later.
    MultiProjectile {
        shot: ProjectileSpec,
        count: u32,
        spacing: Vec2,
        interval: f32,
    },
}

/// One row of the catalog.
///
/// The three fractions split `duration`: melee volumes appear (disabled) at
/// the windup, the effect lands at the effect point and the character is
/// free again at recovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackDefinition {
    pub id: &'static str,
    pub cost: Cost,
    /// Seconds from attack start to the end of the animation.
    pub duration: f32,
    pub windup_fraction: f32,
    pub effect_fraction: f32,
    pub recovery_fraction: f32,
    /// Seconds from attack start to the sound cue.
    pub sound_delay: f32,
    pub sound_cue: &'static str,
    pub effect: AttackEffect,
}

impl AttackDefinition {
    pub fn windup_time(&self) -> f32 {
        self.windup_fraction * self.duration
    }

    pub fn effect_time(&self) -> f32 {
        self.effect_fraction * self.duration
    }

    pub fn recovery_time(&self) -> f32 {
        self.recovery_fraction * self.duration
    }

    /// `0 <= windup < effect < recovery <= 1`.
    pub fn is_well_formed(&self) -> bool {
        self.duration > 0.0
            && self.windup_fraction >= 0.0
            && self.windup_fraction < self.effect_fraction
            && self.effect_fraction < self.recovery_fraction
            && self.recovery_fraction <= 1.0
    }
}

/// Static attack tables, one per class.
pub struct AttackCatalog;

impl AttackCatalog {
    pub fn get(class: CharacterClass, slot: AttackSlot) -> &'static AttackDefinition {
        &Self::kit(class)[slot.index()]
    }

    pub fn kit(class: CharacterClass) -> &'static [AttackDefinition; 3] {
        match class {
            CharacterClass::Wizard => &WIZARD,
            CharacterClass::Fighter => &FIGHTER,
            CharacterClass::Ranger => &RANGER,
        }
    }
}

static WIZARD: [AttackDefinition; 3] = [
    AttackDefinition {
        id: "fireball",
        cost: Cost::new(0.0, 5.0),
        duration: 0.55,
        windup_fraction: 0.5,
        effect_fraction: 0.9,
        recovery_fraction: 1.0,
        sound_delay: 0.25,
        sound_cue: "wizard_q",
        effect: AttackEffect::Projectile(ProjectileSpec {
            tag: DamageTag::FireBall,
            offset: Vec2::new(3.5, 1.9),
            velocity: Vec2::new(12.0, 0.0),
        }),
    },
    AttackDefinition {
        id: "ice_spear",
        cost: Cost::new(10.0, 10.0),
        duration: 0.6,
        windup_fraction: 0.5,
        effect_fraction: 0.9,
        recovery_fraction: 1.0,
        sound_delay: 0.4,
        sound_cue: "wizard_e",
        effect: AttackEffect::Projectile(ProjectileSpec {
            tag: DamageTag::IceSpear,
            offset: Vec2::new(3.5, 2.5),
            velocity: Vec2::new(15.0, 0.0),
        }),
    },
    AttackDefinition {
        id: "lightning",
        cost: Cost::new(25.0, 25.0),
        duration: 1.2,
        windup_fraction: 0.15,
        effect_fraction: 0.4,
        recovery_fraction: 1.0,
        sound_delay: 0.3,
        sound_cue: "wizard_r",
        effect: AttackEffect::MultiProjectile {
            shot: ProjectileSpec {
                tag: DamageTag::Lightning,
                offset: Vec2::new(7.0, 1.0),
                velocity: Vec2::ZERO,
            },
            count: 3,
            spacing: Vec2::new(3.5, 0.0),
            interval: 0.3,
        },
    },
];

static FIGHTER: [AttackDefinition; 3] = [
    AttackDefinition {
        id: "slash",
        cost: Cost::stamina(5.0),
        duration: 0.55,
        windup_fraction: 0.4,
        effect_fraction: 0.5,
        recovery_fraction: 1.0,
        sound_delay: 0.25,
        sound_cue: "fighter_q",
        effect: AttackEffect::MeleeVolume(MeleeSpec {
            tag: DamageTag::FighterQ,
            offset: Vec2::new(1.2, 0.0),
            active_window: 0.25,
            strikes: 1,
            interval: 0.0,
        }),
    },
    AttackDefinition {
        id: "cleave",
        cost: Cost::stamina(15.0),
        duration: 0.6,
        windup_fraction: 0.45,
        effect_fraction: 0.55,
        recovery_fraction: 1.0,
        sound_delay: 0.0,
        sound_cue: "fighter_e",
        effect: AttackEffect::MeleeVolume(MeleeSpec {
            tag: DamageTag::FighterE,
            offset: Vec2::new(1.4, 0.0),
            active_window: 0.2,
            strikes: 1,
            interval: 0.0,
        }),
    },
    AttackDefinition {
        id: "heavy_slash",
        cost: Cost::stamina(30.0),
        duration: 0.8,
        windup_fraction: 0.25,
        effect_fraction: 0.4,
        recovery_fraction: 1.0,
        sound_delay: 0.3,
        sound_cue: "fighter_r",
        effect: AttackEffect::MeleeVolume(MeleeSpec {
            tag: DamageTag::FighterR,
            offset: Vec2::new(1.8, 0.2),
            active_window: 0.45,
            strikes: 1,
            interval: 0.0,
        }),
    },
];

static RANGER: [AttackDefinition; 3] = [
    AttackDefinition {
        id: "arrow",
        cost: Cost::new(10.0, 5.0),
        duration: 0.75,
        windup_fraction: 0.3,
        effect_fraction: 0.65,
        recovery_fraction: 1.0,
        sound_delay: 0.25,
        sound_cue: "ranger_q",
        effect: AttackEffect::Projectile(ProjectileSpec {
            tag: DamageTag::RangerArrow,
            offset: Vec2::new(3.5, 1.0),
            velocity: Vec2::new(18.0, 0.0),
        }),
    },
    AttackDefinition {
        id: "double_slash",
        cost: Cost::new(20.0, 10.0),
        duration: 0.6,
        windup_fraction: 0.45,
        effect_fraction: 0.5,
        recovery_fraction: 1.0,
        sound_delay: 0.3,
        sound_cue: "ranger_e",
        effect: AttackEffect::MeleeVolume(MeleeSpec {
            tag: DamageTag::RangerE,
            offset: Vec2::new(1.2, 0.0),
            active_window: 0.15,
            strikes: 2,
            interval: 0.17,
        }),
    },
    AttackDefinition {
        id: "arrow_rain",
        cost: Cost::new(10.0, 25.0),
        duration: 1.4,
        windup_fraction: 0.15,
        effect_fraction: 0.5,
        recovery_fraction: 1.0,
        sound_delay: 0.36,
        sound_cue: "ranger_r",
        effect: AttackEffect::MultiProjectile {
            shot: ProjectileSpec {
                tag: DamageTag::RangerArrow,
                offset: Vec2::new(4.0, 7.0),
                velocity: Vec2::new(5.0, -12.0),
            },
            count: 3,
            spacing: Vec2::new(4.0, 0.0),
            interval: 0.3,
        },
    },
];
