//! Game state definitions that control the overall flow of the game.
//!
//! Gameplay systems run in every state except `Paused`. Enemies keep
//! patrolling after the player falls.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - `InGame` is active gameplay
/// - `Paused` freezes every gameplay system
/// - `GameOver` once a player character has died
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Active gameplay
    #[default]
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player has died
    GameOver,
}

/// Ordering of the per-tick gameplay pipeline.
///
/// Sensors update first, state machines decide, combat resolves the
/// consequences, and presentation mirrors the result for the collaborators.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    Sense,
    Decide,
    Resolve,
    Present,
}

/// Run condition: gameplay is live.
pub fn gameplay_running(state: Option<Res<State<GameState>>>) -> bool {
    state.map_or(true, |state| *state.get() != GameState::Paused)
}
