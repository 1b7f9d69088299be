//! Shared helpers for the headless gameplay tests.

#![allow(dead_code)]

use core::time::Duration;

use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use vanguard2d::core::{AnimationCueEvent, DamageEvent, DeathEvent, SoundCueEvent};
use vanguard2d::physics::KinematicMotionPlugin;
use vanguard2d::VanguardPlugin;

/// Fixed step, exactly representable so positions and timers stay exact.
pub const DT: f32 = 0.125;

/// Headless app on kinematic motion, already past its first (zero-length)
/// update, with every gameplay event recorded.
pub fn create_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin, HierarchyPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            DT,
        )))
        .add_plugins((VanguardPlugin, KinematicMotionPlugin));

    record_events::<DamageEvent>(&mut app);
    record_events::<DeathEvent>(&mut app);
    record_events::<SoundCueEvent>(&mut app);
    record_events::<AnimationCueEvent>(&mut app);

    app.finish();
    // Startup runs here; time starts advancing on the next update.
    app.update();
    app
}

pub fn step(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Run gameplay spawn helpers that take `Commands`.
pub fn with_commands<R>(app: &mut App, f: impl FnOnce(&mut Commands) -> R) -> R {
    let world = app.world_mut();
    let mut queue = CommandQueue::default();
    let mut commands = Commands::new(&mut queue, world);
    let out = f(&mut commands);
    queue.apply(world);
    out
}

/// Every event of type `E` seen so far.
#[derive(Resource)]
pub struct Recorded<E: Event + Clone>(pub Vec<E>);

impl<E: Event + Clone> Default for Recorded<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<E: Event + Clone>(mut reader: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(reader.read().cloned());
}

pub fn record_events<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<E>>()
        .add_systems(Last, record::<E>);
}

pub fn recorded<E: Event + Clone>(app: &App) -> &[E] {
    &app.world().resource::<Recorded<E>>().0
}

pub fn sound_count(app: &App, cue: &str) -> usize {
    recorded::<SoundCueEvent>(app)
        .iter()
        .filter(|event| event.cue == cue)
        .count()
}

pub fn get<C: Component>(app: &App, entity: Entity) -> &C {
    app.world()
        .get::<C>(entity)
        .unwrap_or_else(|| panic!("{entity:?} has no {}", std::any::type_name::<C>()))
}

pub fn get_mut<C: Component>(app: &mut App, entity: Entity) -> Mut<'_, C> {
    app.world_mut()
        .get_mut::<C>(entity)
        .unwrap_or_else(|| panic!("{entity:?} has no {}", std::any::type_name::<C>()))
}

pub fn send<E: Event>(app: &mut App, event: E) {
    app.world_mut().send_event(event);
}
