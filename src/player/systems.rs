//! Character systems: input, the per-tick controller drive and presentation.

use bevy::prelude::*;

use super::catalog::AttackSlot;
use super::components::*;
use super::controller::{CharacterController, ControlInput};
use crate::combat::{spawn_attack_volume, Dead, Faction, SpawnTemplates};
use crate::core::{AnimationCueEvent, Facing, GameplayError, SoundCueEvent};
use crate::physics::{BodyShape, GroundContact, MotionIntent};
use crate::stats::{CharacterClass, Level, ResourcePool};

/// Map the keyboard onto `CharacterIntent` for keyboard-controlled characters.
///
/// Does nothing when the app has no keyboard input resource (headless runs).
pub fn read_keyboard(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut characters: Query<&mut CharacterIntent, With<KeyboardControlled>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    let mut horizontal = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        horizontal -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        horizontal += 1.0;
    }

    let attack = if keyboard.just_pressed(KeyCode::KeyQ) {
        Some(AttackSlot::Basic)
    } else if keyboard.just_pressed(KeyCode::KeyE) {
        Some(AttackSlot::Second)
    } else if keyboard.just_pressed(KeyCode::KeyR) {
        Some(AttackSlot::Third)
    } else {
        None
    };

    for mut intent in characters.iter_mut() {
        intent.horizontal = horizontal;
        intent.jump |= keyboard.just_pressed(KeyCode::Space);
        if attack.is_some() {
            intent.attack = attack;
        }
    }
}

/// Advance every living character controller by one tick and carry out its
/// decisions.
pub fn drive_characters(
    mut commands: Commands,
    time: Res<Time>,
    templates: Res<SpawnTemplates>,
    mut characters: Query<
        (
            Entity,
            &Transform,
            &mut CharacterController,
            &mut ResourcePool,
            &mut CharacterIntent,
            &GroundContact,
            &mut MotionIntent,
        ),
        Without<Dead>,
    >,
    mut sounds: EventWriter<SoundCueEvent>,
    mut animation_cues: EventWriter<AnimationCueEvent>,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut controller, mut pools, mut intent, ground, mut motion) in
        characters.iter_mut()
    {
        let input = ControlInput {
            horizontal: intent.horizontal,
            jump: intent.jump,
            attack: intent.attack,
            grounded: ground.grounded,
        };
        // One-shots never carry over into the next tick.
        intent.jump = false;
        intent.attack = None;

        let outcome = controller.tick(&input, &mut pools, dt);

        motion.velocity_x = outcome.velocity_x;
        if outcome.jump_impulse.is_some() {
            motion.impulse_y = outcome.jump_impulse;
        }

        for cue in outcome.sounds {
            sounds.send(SoundCueEvent {
                emitter: entity,
                cue,
            });
        }
        if let Some(cue) = outcome.animation_cue {
            animation_cues.send(AnimationCueEvent { entity, cue });
        }

        let origin = transform.translation.truncate();
        for request in &outcome.spawns {
            if let Err(e) = spawn_attack_volume(
                &mut commands,
                &templates,
                entity,
                Faction::Player,
                origin,
                request,
            ) {
                warn!("{} skipped a spawn: {}", controller.class().name(), e);
            }
        }

        for denied in &outcome.denied {
            match denied {
                GameplayError::MissingCollaborator(_) => {
                    warn!("{} {:?}: {}", controller.class().name(), entity, denied)
                }
                _ => debug!("{} {:?}: {}", controller.class().name(), entity, denied),
            }
        }

        if outcome.died {
            motion.velocity_x = 0.0;
            commands.entity(entity).insert(Dead);
            info!("{} {:?} is dead", controller.class().name(), entity);
        }
    }
}

/// Mirror controller state into the animator flags and the facing component.
pub fn sync_character_animation(
    mut characters: Query<(&CharacterController, &mut CharacterAnimation, &mut Facing)>,
) {
    for (controller, mut animation, mut facing) in characters.iter_mut() {
        animation.set_if_neq(CharacterAnimation::from_state(controller.state()));
        facing.set_if_neq(controller.facing());
    }
}

/// Spawn a character of `class` at full resources.
pub fn spawn_character(
    commands: &mut Commands,
    class: CharacterClass,
    position: Vec2,
    config: &PlayerConfig,
) -> Entity {
    commands
        .spawn((
            Name::new(class.name()),
            Player,
            class,
            Level::default(),
            ResourcePool::from_stats(&class.base_stats()),
            CharacterController::new(class, config.walk_cue_interval),
            CharacterIntent::default(),
            CharacterAnimation::from_state(Default::default()),
            Facing::Right,
            Faction::Player,
            // Physics collaborators
            GroundContact::default(),
            MotionIntent::default(),
            BodyShape {
                half_extents: config.body_half_extents,
            },
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}
