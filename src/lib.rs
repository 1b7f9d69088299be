//! Vanguard 2D - gameplay layer for a side-scrolling action game in Bevy.
//!
//! Three character classes share one controller driven by per-class attack
//! tables; enemies run a patrol/chase/attack/hurt/dead brain; combat turns
//! hit-volume overlaps into damage.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, the gameplay system sets
//! - **Stats**: Resource pools, character classes, levelling
//! - **Player**: Character controller, attack catalog, input
//! - **Combat**: Hit volumes, damage table, hit resolution
//! - **Enemies**: Enemy brain, data files, AI systems
//! - **Physics**: Rapier bridge, or kinematic motion for headless runs
//! - **Audio**: Sound cue playback
//! - **UI**: Resource gauges
//!
//! Physics is left to the caller: add [`physics::PhysicsBridgePlugin`] next
//! to rapier, or [`physics::KinematicMotionPlugin`] to run without it.

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod physics;
pub mod player;
pub mod stats;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all gameplay sub-plugins.
pub struct VanguardPlugin;

impl Plugin for VanguardPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Resource pools and levelling
            .add_plugins(stats::StatsPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Presentation collaborators
            .add_plugins(audio::SoundCuePlugin)
            .add_plugins(ui::UiPlugin);
    }
}
