//! Core plugin that sets up game states, events, and the gameplay schedule.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (InGame, Paused, GameOver)
/// - Global events (OverlapEvent, DamageEvent, DeathEvent, etc.)
/// - The chained `GameplaySet` pipeline in `Update`
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // Headless apps built from MinimalPlugins have no state machinery yet.
        if !app.is_plugin_added::<StatesPlugin>() {
            app.add_plugins(StatesPlugin);
        }

        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<OverlapEvent>()
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<HealEvent>()
            .add_event::<LevelUpEvent>()
            .add_event::<SoundCueEvent>()
            .add_event::<AnimationCueEvent>()

            .configure_sets(
                Update,
                (
                    GameplaySet::Sense,
                    GameplaySet::Decide,
                    GameplaySet::Resolve,
                    GameplaySet::Present,
                )
                    .chain()
                    .run_if(gameplay_running),
            )

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            );
    }
}

/// Handle Escape key to pause/unpause the game.
///
/// Headless apps carry no keyboard resource; the system is then a no-op.
fn handle_pause_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            GameState::GameOver => {}
        }
    }
}
