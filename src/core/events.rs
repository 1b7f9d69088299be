//! Global events used for cross-system communication.
//!
//! The physics bridge reports overlaps, the combat systems turn them into
//! damage, and the presentation collaborators (audio, animation, HUD) listen
//! for cues. Every event here is one-way: nobody waits on a reply.

use bevy::prelude::*;

use crate::combat::DamageTag;

/// Trigger-volume overlap reported by the collision layer.
///
/// Either entity may be the sensor; routing figures out which side is the
/// hit volume, chase zone or body.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    Entered(Entity, Entity),
    Stayed(Entity, Entity),
    Exited(Entity, Entity),
}

/// Sent after damage has been applied to a character or an enemy.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that owned the hit volume
    pub source: Entity,
    pub amount: f32,
    pub tag: DamageTag,
}

/// Sent exactly once when an entity's health crosses to zero.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Restores health on a character. Never revives the dead.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealEvent {
    pub target: Entity,
    pub amount: f32,
}

/// Sent to level a character up; pools are recomputed and refilled.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpEvent {
    /// The character entity
    pub player: Entity,
}

/// Fire-and-forget sound request. `cue` names the clip, e.g. `"wizard_q"`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundCueEvent {
    pub emitter: Entity,
    pub cue: &'static str,
}

/// One-shot animation triggers, layered over the boolean animation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    BasicAttack,
    SecondAttack,
    ThirdAttack,
    EnemyAttack,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCueEvent {
    pub entity: Entity,
    pub cue: AnimationCue,
}
