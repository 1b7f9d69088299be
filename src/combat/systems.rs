//! Combat systems - hit-volume lifetimes, hit resolution and deaths.

use bevy::prelude::*;
use bevy::utils::HashSet;

use super::components::*;
use super::data::DamageTable;
use crate::core::{DamageEvent, DeathEvent, GameState, OverlapEvent, SoundCueEvent};
use crate::enemies::EnemyBrain;
use crate::physics::MotionIntent;
use crate::player::{CharacterController, Player};
use crate::stats::{CharacterClass, ResourcePool};

/// Arm windup volumes, move projectiles and remove expired volumes.
///
/// A volume whose owner is dead or gone is removed at once, so attacks
/// scheduled before a death never land.
pub fn tick_hit_volumes(
    mut commands: Commands,
    time: Res<Time>,
    owners: Query<&ResourcePool>,
    mut volumes: Query<(
        Entity,
        &mut HitVolume,
        &mut VolumeLifetime,
        Option<&Projectile>,
        &mut Transform,
    )>,
) {
    let delta = time.delta();

    for (entity, mut volume, mut lifetime, projectile, mut transform) in volumes.iter_mut() {
        let owner_alive = owners
            .get(volume.owner)
            .is_ok_and(|pools| !pools.is_dead());
        if !owner_alive {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        if let Some(projectile) = projectile {
            transform.translation += (projectile.velocity * delta.as_secs_f32()).extend(0.0);
        }

        if let Some(arm) = lifetime.arm.as_mut() {
            arm.tick(delta);
            if arm.finished() {
                lifetime.arm = None;
                volume.enabled = true;
            }
            continue;
        }

        lifetime.expire.tick(delta);
        if lifetime.expire.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Apply damage for every hit volume that entered a hostile body this tick.
///
/// Each (volume, target) pair counts once per pass. Disabled volumes and
/// volumes of dead owners never hit. Entities marked [`Dead`] are outside
/// the query; one that dies during the pass takes no further hits.
#[allow(clippy::too_many_arguments)]
pub fn resolve_hits(
    mut commands: Commands,
    mut overlaps: EventReader<OverlapEvent>,
    table: Res<DamageTable>,
    volumes: Query<&HitVolume>,
    mut targets: Query<
        (
            &Faction,
            &mut ResourcePool,
            Option<&mut EnemyBrain>,
            Option<&mut CharacterController>,
            Option<&CharacterClass>,
            Option<&DamageOverrides>,
            Option<&mut MotionIntent>,
        ),
        Without<Dead>,
    >,
    mut damage_events: EventWriter<DamageEvent>,
    mut death_events: EventWriter<DeathEvent>,
    mut sounds: EventWriter<SoundCueEvent>,
) {
    let mut died_this_frame = HashSet::new();
    let mut resolved = HashSet::new();
    let mut consumed = HashSet::new();

    for overlap in overlaps.read() {
        let OverlapEvent::Entered(a, b) = *overlap else {
            continue;
        };

        let (volume_entity, target) = if volumes.contains(a) && targets.contains(b) {
            (a, b)
        } else if volumes.contains(b) && targets.contains(a) {
            (b, a)
        } else {
            continue;
        };
        let Ok(volume) = volumes.get(volume_entity) else {
            continue;
        };

        if !volume.enabled || consumed.contains(&volume_entity) {
            continue;
        }
        let owner_alive = targets
            .get(volume.owner)
            .is_ok_and(|(_, pools, ..)| !pools.is_dead());
        if !owner_alive {
            continue;
        }
        if died_this_frame.contains(&target) || !resolved.insert((volume_entity, target)) {
            continue;
        }

        let Ok((faction, mut pools, brain, controller, class, overrides, motion)) =
            targets.get_mut(target)
        else {
            continue;
        };
        if *faction == volume.faction || pools.is_dead() {
            continue;
        }
        if brain.as_ref().is_some_and(|brain| !brain.accepts_hits()) {
            continue;
        }

        let amount = overrides
            .and_then(|overrides| overrides.get(volume.tag))
            .or(volume.damage)
            .unwrap_or_else(|| table.get(volume.tag));
        let change = pools.damage(amount);

        damage_events.send(DamageEvent {
            target,
            source: volume.owner,
            amount: change.applied,
            tag: volume.tag,
        });

        if !volume.piercing {
            consumed.insert(volume_entity);
            commands.entity(volume_entity).despawn_recursive();
        }

        if change.died {
            died_this_frame.insert(target);
            commands.entity(target).insert(Dead);
            if let Some(mut motion) = motion {
                motion.velocity_x = 0.0;
            }
            if let Some(mut brain) = brain {
                brain.die();
            }
            if let Some(mut controller) = controller {
                controller.die();
            }
            if let Some(class) = class {
                sounds.send(SoundCueEvent {
                    emitter: target,
                    cue: class.sounds().death,
                });
            }
            death_events.send(DeathEvent {
                entity: target,
                killed_by: Some(volume.owner),
            });
        } else {
            if let Some(mut brain) = brain {
                brain.hurt();
            }
            if let Some(class) = class {
                sounds.send(SoundCueEvent {
                    emitter: target,
                    cue: class.sounds().hurt,
                });
            }
        }
    }
}

/// A fallen player ends the run.
pub fn check_deaths(
    mut death_events: EventReader<DeathEvent>,
    players: Query<(), With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if players.contains(event.entity) {
            info!("Player {:?} died! Transitioning to Game Over...", event.entity);
            next_state.set(GameState::GameOver);
        }
    }
}
