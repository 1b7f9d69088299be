//! Rapier adapter: colliders, ground probe, overlap events and motion.
//!
//! Nothing outside this file names a rapier type. Gameplay talks to the
//! physics world only through `MotionIntent`, `GroundContact`, the shape
//! components and `OverlapEvent`.

use bevy::prelude::*;
use bevy::utils::HashSet;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::combat::{Faction, HitVolume};
use crate::core::{GameplaySet, OverlapEvent};
use crate::player::GroundProbe;

const GROUND_GROUP: Group = Group::GROUP_1;
const CHARACTER_GROUP: Group = Group::GROUP_2;
const ENEMY_GROUP: Group = Group::GROUP_3;
const SENSOR_GROUP: Group = Group::GROUP_4;

/// Connects the gameplay layer to `bevy_rapier2d`. Add it next to
/// `RapierPhysicsPlugin`.
pub struct PhysicsBridgePlugin;

impl Plugin for PhysicsBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveOverlaps>()
            .add_systems(
                Update,
                (
                    attach_bodies,
                    attach_sensors,
                    sync_disabled_volumes,
                    probe_ground,
                    translate_collisions,
                )
                    .chain()
                    .in_set(GameplaySet::Sense),
            )
            .add_systems(Update, apply_motion.in_set(GameplaySet::Present));
    }
}

/// Sensor pairs currently overlapping, replayed as `Stayed` every tick.
#[derive(Resource, Default)]
struct ActiveOverlaps(HashSet<(Entity, Entity)>);

fn body_groups(faction: Option<&Faction>, is_ground: bool) -> CollisionGroups {
    if is_ground {
        return CollisionGroups::new(GROUND_GROUP, CHARACTER_GROUP | ENEMY_GROUP);
    }
    let membership = match faction {
        Some(Faction::Enemy) => ENEMY_GROUP,
        _ => CHARACTER_GROUP,
    };
    // Characters and enemies pass through each other; only ground and
    // sensors touch them.
    CollisionGroups::new(membership, GROUND_GROUP | SENSOR_GROUP)
}

fn attach_bodies(
    mut commands: Commands,
    bodies: Query<(Entity, &BodyShape, Option<&Faction>, Has<Ground>), Added<BodyShape>>,
) {
    for (entity, shape, faction, is_ground) in bodies.iter() {
        let collider = Collider::cuboid(shape.half_extents.x, shape.half_extents.y);
        let groups = body_groups(faction, is_ground);

        if is_ground {
            commands
                .entity(entity)
                .insert((RigidBody::Fixed, collider, groups));
        } else {
            commands.entity(entity).insert((
                RigidBody::Dynamic,
                collider,
                groups,
                LockedAxes::ROTATION_LOCKED,
                Velocity::zero(),
                ExternalImpulse::default(),
                ActiveEvents::COLLISION_EVENTS,
            ));
        }
    }
}

fn attach_sensors(
    mut commands: Commands,
    sensors: Query<(Entity, &SensorShape, Option<&HitVolume>), Added<SensorShape>>,
) {
    for (entity, shape, volume) in sensors.iter() {
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert((
            Collider::cuboid(shape.half_extents.x, shape.half_extents.y),
            Sensor,
            // Sensors parented to a body must not add to its mass.
            ColliderMassProperties::Density(0.0),
            CollisionGroups::new(SENSOR_GROUP, CHARACTER_GROUP | ENEMY_GROUP),
            ActiveEvents::COLLISION_EVENTS,
        ));
        if volume.is_some_and(|volume| !volume.enabled) {
            entity_commands.insert(ColliderDisabled);
        }
    }
}

/// Disabled hit volumes have no collider in the physics world, so arming one
/// reports a fresh overlap for everything already inside it.
fn sync_disabled_volumes(
    mut commands: Commands,
    volumes: Query<(Entity, &HitVolume, Has<ColliderDisabled>), (Changed<HitVolume>, With<Collider>)>,
) {
    for (entity, volume, disabled) in volumes.iter() {
        if volume.enabled && disabled {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else if !volume.enabled && !disabled {
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}

fn probe_ground(
    probe: Res<GroundProbe>,
    rapier_context: Query<&RapierContext>,
    ground: Query<(), With<Ground>>,
    mut characters: Query<(Entity, &Transform, &mut GroundContact)>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    // Group tests run both ways, so the ray has to be a member the ground
    // filter accepts.
    let filter =
        QueryFilter::default().groups(CollisionGroups::new(CHARACTER_GROUP, GROUND_GROUP));
    for (entity, transform, mut contact) in characters.iter_mut() {
        let origin = transform.translation.truncate() + probe.offset;
        let hit = context
            .cast_ray(
                origin,
                Vec2::NEG_Y,
                probe.length,
                true,
                filter.exclude_collider(entity),
            )
            .is_some_and(|(hit_entity, _)| ground.contains(hit_entity));

        if contact.grounded != hit {
            contact.grounded = hit;
        }
    }
}

fn translate_collisions(
    mut collisions: EventReader<CollisionEvent>,
    mut active: ResMut<ActiveOverlaps>,
    mut overlaps: EventWriter<OverlapEvent>,
) {
    let mut started = HashSet::new();

    for collision in collisions.read() {
        match *collision {
            CollisionEvent::Started(a, b, _) => {
                active.0.insert((a, b));
                started.insert((a, b));
                overlaps.send(OverlapEvent::Entered(a, b));
            }
            // Despawned colliders arrive here too, flagged REMOVED.
            CollisionEvent::Stopped(a, b, _) => {
                let was_active = active.0.remove(&(a, b)) | active.0.remove(&(b, a));
                if was_active {
                    overlaps.send(OverlapEvent::Exited(a, b));
                }
            }
        }
    }

    for pair in active.0.iter().filter(|pair| !started.contains(*pair)) {
        overlaps.send(OverlapEvent::Stayed(pair.0, pair.1));
    }
}

fn apply_motion(mut bodies: Query<(&mut MotionIntent, &mut Velocity, &mut ExternalImpulse)>) {
    for (mut motion, mut velocity, mut impulse) in bodies.iter_mut() {
        velocity.linvel.x = motion.velocity_x;
        if let Some(strength) = motion.impulse_y.take() {
            impulse.impulse = Vec2::Y * strength;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::combat::DamageTag;
    use crate::core::CorePlugin;

    #[derive(Resource, Default)]
    struct Seen(Vec<OverlapEvent>);

    fn record(mut events: EventReader<OverlapEvent>, mut seen: ResMut<Seen>) {
        seen.0.extend(events.read().copied());
    }

    fn rapier_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TransformPlugin, HierarchyPlugin, CorePlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
                1.0 / 60.0,
            )))
            .init_resource::<GroundProbe>()
            .init_resource::<Seen>()
            .add_plugins((RapierPhysicsPlugin::<NoUserData>::default(), PhysicsBridgePlugin))
            .add_systems(Last, record);
        app.finish();
        app.cleanup();
        app.update();
        app
    }

    fn step(app: &mut App, frames: usize) {
        for _ in 0..frames {
            app.update();
        }
    }

    fn spawn_ground(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                Ground,
                BodyShape {
                    half_extents: Vec2::new(60.0, 0.5),
                },
                Transform::from_xyz(0.0, -1.5, 0.0),
            ))
            .id()
    }

    fn spawn_body(app: &mut App, position: Vec2, grounded: bool) -> Entity {
        app.world_mut()
            .spawn((
                BodyShape {
                    half_extents: Vec2::new(0.5, 1.0),
                },
                GroundContact { grounded },
                MotionIntent::default(),
                Faction::Player,
                Transform::from_translation(position.extend(0.0)),
            ))
            .id()
    }

    fn between(event: &OverlapEvent, x: Entity, y: Entity) -> bool {
        let (a, b) = match *event {
            OverlapEvent::Entered(a, b) | OverlapEvent::Stayed(a, b) | OverlapEvent::Exited(a, b) => {
                (a, b)
            }
        };
        (a, b) == (x, y) || (a, b) == (y, x)
    }

    fn count(app: &App, x: Entity, y: Entity, kind: fn(&OverlapEvent) -> bool) -> usize {
        app.world()
            .resource::<Seen>()
            .0
            .iter()
            .filter(|event| kind(event) && between(event, x, y))
            .count()
    }

    fn entered(event: &OverlapEvent) -> bool {
        matches!(event, OverlapEvent::Entered(..))
    }

    fn stayed(event: &OverlapEvent) -> bool {
        matches!(event, OverlapEvent::Stayed(..))
    }

    fn exited(event: &OverlapEvent) -> bool {
        matches!(event, OverlapEvent::Exited(..))
    }

    #[test]
    fn probe_sees_ground_under_a_standing_body() {
        let mut app = rapier_app();
        spawn_ground(&mut app);
        let standing = spawn_body(&mut app, Vec2::ZERO, false);
        let airborne = spawn_body(&mut app, Vec2::new(20.0, 10.0), true);

        step(&mut app, 4);

        assert!(app.world().get::<GroundContact>(standing).unwrap().grounded);
        assert!(!app.world().get::<GroundContact>(airborne).unwrap().grounded);
    }

    #[test]
    fn sensor_overlaps_enter_stay_and_exit() {
        let mut app = rapier_app();
        spawn_ground(&mut app);
        let body = spawn_body(&mut app, Vec2::ZERO, true);
        let zone = app
            .world_mut()
            .spawn((
                SensorShape {
                    half_extents: Vec2::new(2.0, 2.0),
                },
                Transform::default(),
            ))
            .id();

        step(&mut app, 5);
        assert_eq!(count(&app, zone, body, entered), 1);
        assert!(count(&app, zone, body, stayed) >= 1);
        assert_eq!(count(&app, zone, body, exited), 0);

        app.world_mut().entity_mut(zone).despawn();
        step(&mut app, 4);
        assert_eq!(count(&app, zone, body, exited), 1);

        app.world_mut().resource_mut::<Seen>().0.clear();
        step(&mut app, 2);
        assert!(app.world().resource::<Seen>().0.is_empty());
    }

    #[test]
    fn arming_a_volume_reenters_bodies_already_inside() {
        let mut app = rapier_app();
        spawn_ground(&mut app);
        let body = spawn_body(&mut app, Vec2::ZERO, true);
        let strike = app
            .world_mut()
            .spawn((
                HitVolume {
                    owner: body,
                    faction: Faction::Enemy,
                    tag: DamageTag::MobStrike,
                    enabled: false,
                    piercing: true,
                    damage: None,
                },
                SensorShape {
                    half_extents: Vec2::new(1.0, 1.0),
                },
                Transform::default(),
            ))
            .id();

        step(&mut app, 4);
        assert!(app.world().get::<ColliderDisabled>(strike).is_some());
        assert_eq!(count(&app, strike, body, entered), 0);

        app.world_mut().get_mut::<HitVolume>(strike).unwrap().enabled = true;
        step(&mut app, 4);
        assert!(app.world().get::<ColliderDisabled>(strike).is_none());
        assert_eq!(count(&app, strike, body, entered), 1);

        app.world_mut().get_mut::<HitVolume>(strike).unwrap().enabled = false;
        step(&mut app, 4);
        app.world_mut().get_mut::<HitVolume>(strike).unwrap().enabled = true;
        step(&mut app, 4);
        assert_eq!(count(&app, strike, body, entered), 2);
    }
}
