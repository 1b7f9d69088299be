//! Turning controller spawn requests into hit-volume entities.

use bevy::prelude::*;

use super::components::*;
use super::data::SpawnTemplates;
use crate::core::GameplayError;
use crate::physics::SensorShape;
use crate::player::SpawnRequest;

/// Spawn the hit volume a character asked for.
///
/// Projectiles live in world space at `origin + offset`. Melee volumes are
/// parented to `owner` and start disabled until their arm delay elapses.
/// A tag without a template fails with `MissingCollaborator` and spawns
/// nothing.
pub fn spawn_attack_volume(
    commands: &mut Commands,
    templates: &SpawnTemplates,
    owner: Entity,
    faction: Faction,
    origin: Vec2,
    request: &SpawnRequest,
) -> Result<Entity, GameplayError> {
    match *request {
        SpawnRequest::Projectile {
            tag,
            offset,
            velocity,
        } => {
            let template = templates.get(tag)?;
            let projectile = commands
                .spawn((
                    Name::new(format!("{tag:?}")),
                    HitVolume {
                        owner,
                        faction,
                        tag,
                        enabled: true,
                        piercing: template.piercing,
                        damage: None,
                    },
                    VolumeLifetime {
                        arm: None,
                        expire: Timer::from_seconds(template.lifetime, TimerMode::Once),
                    },
                    Projectile { velocity },
                    SensorShape {
                        half_extents: template.half_extents,
                    },
                    Transform::from_translation((origin + offset).extend(0.0)),
                ))
                .id();
            Ok(projectile)
        }
        SpawnRequest::Melee {
            tag,
            offset,
            arm_after,
            active_window,
        } => {
            let template = templates.get(tag)?;
            let armed = arm_after <= 0.0;
            let volume = commands
                .spawn((
                    Name::new(format!("{tag:?}")),
                    HitVolume {
                        owner,
                        faction,
                        tag,
                        enabled: armed,
                        piercing: template.piercing,
                        damage: None,
                    },
                    VolumeLifetime {
                        arm: (!armed).then(|| Timer::from_seconds(arm_after, TimerMode::Once)),
                        expire: Timer::from_seconds(active_window, TimerMode::Once),
                    },
                    SensorShape {
                        half_extents: template.half_extents,
                    },
                    Transform::from_translation(offset.extend(0.0)),
                ))
                .id();
            commands.entity(owner).add_child(volume);
            Ok(volume)
        }
    }
}
