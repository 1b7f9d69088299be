//! Enemy AI systems: detection, the per-tick brain drive and death.

use bevy::prelude::*;

use super::brain::EnemyBrain;
use super::components::{ChaseZone, DeathTimer, Enemy, StrikeVolumeLink};
use crate::combat::{Dead, HitVolume};
use crate::core::{AnimationCue, AnimationCueEvent, GameplayError, OverlapEvent};
use crate::physics::MotionIntent;
use crate::player::Player;
use crate::stats::ResourcePool;

/// Route chase-zone overlaps to the owning brain.
///
/// `Entered` and `Stayed` offer the character as a target (ignored while
/// one is held); `Exited` drops it.
pub fn route_detection(
    mut overlaps: EventReader<OverlapEvent>,
    zones: Query<&ChaseZone>,
    characters: Query<&ResourcePool, With<Player>>,
    mut brains: Query<&mut EnemyBrain>,
) {
    for overlap in overlaps.read() {
        let (a, b) = match *overlap {
            OverlapEvent::Entered(a, b)
            | OverlapEvent::Stayed(a, b)
            | OverlapEvent::Exited(a, b) => (a, b),
        };

        let (zone, other) = if let Ok(zone) = zones.get(a) {
            (zone, b)
        } else if let Ok(zone) = zones.get(b) {
            (zone, a)
        } else {
            continue;
        };

        let Ok(pools) = characters.get(other) else {
            continue;
        };
        let Ok(mut brain) = brains.get_mut(zone.owner) else {
            continue;
        };

        match overlap {
            OverlapEvent::Exited(..) => {
                if brain.release(other) {
                    debug!("{:?} lost sight of {:?}", zone.owner, other);
                }
            }
            _ if !pools.is_dead() => {
                if brain.acquire(other) {
                    debug!("{:?} is chasing {:?}", zone.owner, other);
                }
            }
            _ => {}
        }
    }
}

/// Advance every living enemy brain by one tick.
///
/// The target handle is resolved here; a target that was despawned or has
/// died counts as lost.
pub fn think(
    time: Res<Time>,
    characters: Query<(&Transform, &ResourcePool), With<Player>>,
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &mut EnemyBrain,
            &mut MotionIntent,
            Option<&StrikeVolumeLink>,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    mut strikes: Query<(&mut HitVolume, &mut Transform), (Without<Enemy>, Without<Player>)>,
    mut animation_cues: EventWriter<AnimationCueEvent>,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut brain, mut motion, strike_link) in enemies.iter_mut() {
        let target_position = brain.target().and_then(|target| {
            characters
                .get(target)
                .ok()
                .filter(|(_, pools)| !pools.is_dead())
                .map(|(target_transform, _)| target_transform.translation.truncate())
        });

        let tick = brain.tick(transform.translation.truncate(), target_position, dt);
        motion.velocity_x = tick.velocity_x;

        if let Some(lost) = tick.lost_target {
            debug!(
                "{:?}: {}",
                entity,
                GameplayError::DanglingTargetReference(lost)
            );
        }

        if tick.attacked {
            animation_cues.send(AnimationCueEvent {
                entity,
                cue: AnimationCue::EnemyAttack,
            });
        }

        let Some(link) = strike_link else {
            if tick.attacked {
                warn!(
                    "{:?}: {}",
                    entity,
                    GameplayError::MissingCollaborator("strike volume".to_string())
                );
            }
            continue;
        };
        let Ok((mut volume, mut strike_transform)) = strikes.get_mut(link.volume) else {
            if tick.attacked {
                warn!(
                    "{:?}: {}",
                    entity,
                    GameplayError::MissingCollaborator(format!("strike volume {:?}", link.volume))
                );
            }
            continue;
        };

        let offset = brain.facing().mirror(link.offset);
        if strike_transform.translation.x != offset.x {
            strike_transform.translation.x = offset.x;
        }
        if volume.enabled != tick.strike_active {
            volume.enabled = tick.strike_active;
        }
    }
}

/// Stop dead enemies, disarm their strike and start the removal timer.
pub fn handle_enemy_death(
    mut commands: Commands,
    mut enemies: Query<
        (
            Entity,
            &EnemyBrain,
            &mut MotionIntent,
            Option<&StrikeVolumeLink>,
        ),
        (With<Enemy>, Without<DeathTimer>),
    >,
    mut strikes: Query<&mut HitVolume>,
) {
    for (entity, brain, mut motion, strike_link) in enemies.iter_mut() {
        if !brain.is_dead() {
            continue;
        }

        motion.velocity_x = 0.0;
        if let Some(mut volume) = strike_link.and_then(|link| strikes.get_mut(link.volume).ok()) {
            volume.enabled = false;
        }
        commands.entity(entity).insert(DeathTimer::default());
        info!("Enemy {:?} died", entity);
    }
}

/// Despawn enemies once their death timer runs out.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
