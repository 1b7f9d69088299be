//! Vanguard 2D - headless demo.
//!
//! Spawns a strip of ground, one character of each class and two enemies,
//! scripts the characters' intents for a few seconds of simulated time and
//! logs what happened.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::core::FrameCount;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use vanguard2d::core::{DamageEvent, DeathEvent, GameplaySet};
use vanguard2d::enemies::{spawn_enemy, EnemyBrain, EnemyRegistry};
use vanguard2d::physics::{BodyShape, Ground, PhysicsBridgePlugin};
use vanguard2d::player::{spawn_character, AttackSlot, CharacterController, CharacterIntent, PlayerConfig};
use vanguard2d::stats::{CharacterClass, ResourceKind, ResourcePool};
use vanguard2d::VanguardPlugin;

/// Frames to simulate before exiting (ten seconds at 60 Hz).
const DEMO_FRAMES: u32 = 600;

fn main() -> AppExit {
    App::new()
        // Headless bevy: no window, no renderer
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            TransformPlugin,
            HierarchyPlugin,
            LogPlugin::default(),
        ))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(PhysicsBridgePlugin)

        // Our game plugin
        .add_plugins(VanguardPlugin)

        .add_systems(PostStartup, setup_demo)
        .add_systems(Update, script_intents.in_set(GameplaySet::Sense))
        .add_systems(Update, (log_combat, finish_demo).after(GameplaySet::Present))
        .run()
}

/// Runs after the enemy definitions have been loaded at startup.
fn setup_demo(mut commands: Commands, config: Res<PlayerConfig>, registry: Res<EnemyRegistry>) {
    commands.spawn((
        Name::new("Ground"),
        Ground,
        BodyShape {
            half_extents: Vec2::new(60.0, 0.5),
        },
        Transform::from_xyz(0.0, -1.5, 0.0),
    ));

    for (class, x) in [
        (CharacterClass::Wizard, -8.0),
        (CharacterClass::Fighter, -2.0),
        (CharacterClass::Ranger, 6.0),
    ] {
        spawn_character(&mut commands, class, Vec2::new(x, 0.0), &config);
    }

    for (enemy_type, x) in [("goblin", 0.0), ("skeleton", 14.0)] {
        match registry.get(enemy_type) {
            Some(definition) => {
                spawn_enemy(&mut commands, enemy_type, definition, Vec2::new(x, 0.0));
            }
            None => warn!("Unknown enemy type in demo: {}", enemy_type),
        }
    }
}

/// Scripted stand-in for a player at the keyboard.
fn script_intents(
    frames: Res<FrameCount>,
    mut characters: Query<(&CharacterClass, &mut CharacterIntent)>,
) {
    let frame = frames.0;

    for (class, mut intent) in characters.iter_mut() {
        match class {
            CharacterClass::Wizard => {
                if frame % 90 == 30 {
                    intent.attack = Some(AttackSlot::Basic);
                }
                if frame == 320 {
                    intent.attack = Some(AttackSlot::Third);
                }
            }
            CharacterClass::Fighter => {
                intent.horizontal = if frame < 60 { 1.0 } else { 0.0 };
                if frame % 50 == 0 {
                    intent.attack = Some(AttackSlot::Basic);
                }
                if frame == 400 {
                    intent.attack = Some(AttackSlot::Third);
                }
            }
            CharacterClass::Ranger => {
                intent.horizontal = if (100..160).contains(&frame) { 1.0 } else { 0.0 };
                if frame == 200 {
                    intent.jump = true;
                }
                if frame % 120 == 60 {
                    intent.attack = Some(AttackSlot::Basic);
                }
                if frame == 450 {
                    intent.attack = Some(AttackSlot::Third);
                }
            }
        }
    }
}

fn log_combat(mut damage: EventReader<DamageEvent>, mut deaths: EventReader<DeathEvent>) {
    for event in damage.read() {
        info!(
            "{:?} hit {:?} with {:?} for {}",
            event.source, event.target, event.tag, event.amount
        );
    }
    for event in deaths.read() {
        info!("{:?} was killed by {:?}", event.entity, event.killed_by);
    }
}

fn finish_demo(
    frames: Res<FrameCount>,
    characters: Query<(&CharacterController, &ResourcePool)>,
    enemies: Query<(&Name, &EnemyBrain, &ResourcePool)>,
    mut exit: EventWriter<AppExit>,
) {
    if frames.0 < DEMO_FRAMES {
        return;
    }

    for (controller, pools) in characters.iter() {
        info!(
            "{}: {:?}, hp {} stamina {} mana {}",
            controller.class().name(),
            controller.state(),
            pools.current(ResourceKind::Health),
            pools.current(ResourceKind::Stamina),
            pools.current(ResourceKind::Mana),
        );
    }
    for (name, brain, pools) in enemies.iter() {
        info!(
            "{}: {:?}, hp {}",
            name,
            brain.state(),
            pools.current(ResourceKind::Health)
        );
    }
    exit.send(AppExit::Success);
}
