//! Player-related components.

use bevy::prelude::*;

use super::catalog::AttackSlot;
use super::controller::CharacterState;

/// Marker component for player characters.
#[derive(Component)]
pub struct Player;

/// Marks characters whose intents come from the keyboard.
#[derive(Component)]
pub struct KeyboardControlled;

/// What the character wants to do this tick.
///
/// Input sources write it; the controller consumes it. `jump` and `attack`
/// are one-shots and are cleared after every tick, so a denied action is
/// dropped rather than retried.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct CharacterIntent {
    /// -1.0 (left) to 1.0 (right).
    pub horizontal: f32,
    pub jump: bool,
    pub attack: Option<AttackSlot>,
}

/// Boolean animator flags, recomputed every tick from the controller state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterAnimation {
    pub is_idle: bool,
    pub is_walking: bool,
    pub is_attacking: bool,
    pub is_jumping: bool,
    pub is_dead: bool,
}

impl CharacterAnimation {
    pub fn from_state(state: CharacterState) -> Self {
        Self {
            is_idle: state == CharacterState::Idle,
            is_walking: state == CharacterState::Walking,
            is_attacking: state == CharacterState::Attacking,
            is_jumping: state == CharacterState::Jumping,
            is_dead: state == CharacterState::Dead,
        }
    }
}

/// Tunables shared by every character.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Minimum seconds between two walk sound cues.
    pub walk_cue_interval: f32,
    /// Collision box of a character body.
    pub body_half_extents: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_cue_interval: 0.4,
            body_half_extents: Vec2::new(0.5, 1.0),
        }
    }
}
