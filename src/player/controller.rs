//! Character state machine shared by every class.
//!
//! One controller drives Idle, Walking, Attacking, Jumping and Dead for a
//! character. It never touches the world directly: each tick it consumes the
//! intents, the ground probe and the resource pools, and returns what the
//! surrounding systems should do (move, jump, spawn, play sounds).

use bevy::prelude::*;

use super::catalog::{AttackCatalog, AttackDefinition, AttackEffect, AttackSlot};
use super::ground::GroundSensor;
use crate::combat::DamageTag;
use crate::core::{AnimationCue, Facing, GameplayError, Timeline};
use crate::stats::{CharacterClass, Mobility, ResourceKind, ResourcePool};

/// Below this magnitude horizontal input counts as standing still.
const MOVE_DEADZONE: f32 = 0.01;

/// Seconds a fresh jump stays `Jumping` while the probe still sees ground.
const TAKEOFF_GRACE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    #[default]
    Idle,
    Walking,
    Attacking,
    Jumping,
    Dead,
}

/// A hit volume the character wants spawned. Offsets and velocities are
/// already mirrored to the facing at attack start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    Projectile {
        tag: DamageTag,
        offset: Vec2,
        velocity: Vec2,
    },
    /// Attached to the character, disabled until `arm_after` elapses.
    Melee {
        tag: DamageTag,
        offset: Vec2,
        arm_after: f32,
        active_window: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CharacterEffect {
    Sound(&'static str),
    Spawn(SpawnRequest),
    Recover,
}

/// Everything the controller reads for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlInput {
    /// -1.0 (left) to 1.0 (right).
    pub horizontal: f32,
    pub jump: bool,
    pub attack: Option<AttackSlot>,
    /// This tick's ground probe.
    pub grounded: bool,
}

/// What the controller decided this tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickOutcome {
    pub velocity_x: f32,
    pub jump_impulse: Option<f32>,
    pub sounds: Vec<&'static str>,
    pub spawns: Vec<SpawnRequest>,
    pub animation_cue: Option<AnimationCue>,
    /// Actions refused this tick. Informational only.
    pub denied: Vec<GameplayError>,
    /// True on the tick the controller noticed its own death.
    pub died: bool,
}

#[derive(Component, Debug, Clone)]
pub struct CharacterController {
    class: CharacterClass,
    mobility: Mobility,
    state: CharacterState,
    facing: Facing,
    ground: GroundSensor,
    timeline: Timeline<CharacterEffect>,
    walk_cue_interval: f32,
    walk_cue_cooldown: f32,
    takeoff_grace: f32,
}

impl CharacterController {
    pub fn new(class: CharacterClass, walk_cue_interval: f32) -> Self {
        Self {
            class,
            mobility: class.mobility(),
            state: CharacterState::Idle,
            facing: Facing::Right,
            ground: GroundSensor::new(true),
            timeline: Timeline::new(),
            walk_cue_interval,
            walk_cue_cooldown: 0.0,
            takeoff_grace: 0.0,
        }
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_grounded(&self) -> bool {
        self.ground.is_grounded()
    }

    /// Effects still waiting on the attack timeline.
    pub fn pending_effects(&self) -> usize {
        self.timeline.pending_count()
    }

    /// Enter the terminal state and drop every pending effect.
    pub fn die(&mut self) {
        self.state = CharacterState::Dead;
        self.timeline.cancel_all();
    }

    /// Start an attack. All-or-nothing: on error nothing changed.
    pub fn try_attack(
        &mut self,
        slot: AttackSlot,
        pools: &mut ResourcePool,
    ) -> Result<&'static AttackDefinition, GameplayError> {
        match self.state {
            CharacterState::Dead => return Err(GameplayError::Busy("dead")),
            CharacterState::Attacking => return Err(GameplayError::Busy("attacking")),
            _ => {}
        }

        let attack = AttackCatalog::get(self.class, slot);
        pools.spend_cost(&attack.cost)?;

        self.state = CharacterState::Attacking;
        self.schedule_attack(attack);
        Ok(attack)
    }

    fn schedule_attack(&mut self, attack: &AttackDefinition) {
        let facing = self.facing;

        self.timeline
            .schedule(attack.sound_delay, CharacterEffect::Sound(attack.sound_cue));

        match attack.effect {
            AttackEffect::Projectile(shot) => {
                self.timeline.schedule(
                    attack.effect_time(),
                    CharacterEffect::Spawn(SpawnRequest::Projectile {
                        tag: shot.tag,
                        offset: facing.mirror(shot.offset),
                        velocity: facing.mirror(shot.velocity),
                    }),
                );
            }
            AttackEffect::MultiProjectile {
                shot,
                count,
                spacing,
                interval,
            } => {
                for k in 0..count {
                    let k = k as f32;
                    self.timeline.schedule(
                        attack.effect_time() + interval * k,
                        CharacterEffect::Spawn(SpawnRequest::Projectile {
                            tag: shot.tag,
                            offset: facing.mirror(shot.offset + spacing * k),
                            velocity: facing.mirror(shot.velocity),
                        }),
                    );
                }
            }
            AttackEffect::MeleeVolume(melee) => {
                let arm_after = attack.effect_time() - attack.windup_time();
                for k in 0..melee.strikes {
                    self.timeline.schedule(
                        attack.windup_time(),
                        CharacterEffect::Spawn(SpawnRequest::Melee {
                            tag: melee.tag,
                            offset: facing.mirror(melee.offset),
                            arm_after: arm_after + melee.interval * k as f32,
                            active_window: melee.active_window,
                        }),
                    );
                }
            }
        }

        self.timeline
            .schedule(attack.recovery_time(), CharacterEffect::Recover);
    }

    /// Advance one tick.
    pub fn tick(&mut self, input: &ControlInput, pools: &mut ResourcePool, dt: f32) -> TickOutcome {
        let mut out = TickOutcome::default();

        if self.state == CharacterState::Dead {
            return out;
        }
        if pools.is_dead() {
            self.die();
            out.died = true;
            return out;
        }

        let sounds = self.class.sounds();

        if self.ground.update(input.grounded) {
            out.sounds.push(sounds.jump);
        }
        if !input.grounded {
            self.takeoff_grace = 0.0;
        }
        self.takeoff_grace = (self.takeoff_grace - dt).max(0.0);

        for effect in self.timeline.advance(dt) {
            match effect {
                CharacterEffect::Sound(cue) => out.sounds.push(cue),
                CharacterEffect::Spawn(request) => out.spawns.push(request),
                CharacterEffect::Recover => {
                    if self.state == CharacterState::Attacking {
                        self.state = CharacterState::Idle;
                    }
                }
            }
        }

        if self.state != CharacterState::Attacking {
            if let Some(slot) = input.attack {
                match self.try_attack(slot, pools) {
                    Ok(_) => out.animation_cue = Some(slot.animation_cue()),
                    Err(e) => out.denied.push(e),
                }
            }
        } else if input.attack.is_some() {
            out.denied.push(GameplayError::Busy("attacking"));
        }

        if self.state == CharacterState::Attacking {
            pools.regenerate(dt);
            return out;
        }

        let mut jumped = false;
        if input.jump {
            if !self.ground.is_grounded() || self.takeoff_grace > 0.0 {
                out.denied.push(GameplayError::Busy("airborne"));
            } else {
                match pools.spend(ResourceKind::Stamina, self.mobility.jump_cost) {
                    Ok(()) => {
                        jumped = true;
                        self.takeoff_grace = TAKEOFF_GRACE;
                        out.jump_impulse = Some(self.mobility.jump_impulse);
                        out.sounds.push(sounds.jump);
                    }
                    Err(e) => out.denied.push(e),
                }
            }
        }

        let exhausted = pools.current(ResourceKind::Stamina) <= 0.0;
        let horizontal = if exhausted { 0.0 } else { input.horizontal.clamp(-1.0, 1.0) };
        let moving = horizontal.abs() > MOVE_DEADZONE;
        if moving {
            if let Some(facing) = Facing::from_direction(horizontal) {
                self.facing = facing;
            }
            out.velocity_x = horizontal * self.mobility.move_speed;
        }

        let airborne = !self.ground.is_grounded();
        self.state = if jumped || airborne || self.takeoff_grace > 0.0 {
            CharacterState::Jumping
        } else if moving {
            CharacterState::Walking
        } else {
            CharacterState::Idle
        };

        if self.state == CharacterState::Walking {
            self.walk_cue_cooldown -= dt;
            if self.walk_cue_cooldown <= 0.0 {
                out.sounds.push(sounds.walk);
                self.walk_cue_cooldown = self.walk_cue_interval;
            }
        } else {
            self.walk_cue_cooldown = 0.0;
        }

        pools.regenerate(dt);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Pool;

    const DT: f32 = 0.125;

    fn pools(stamina: f32, mana: f32) -> ResourcePool {
        ResourcePool::new(
            Pool::new(100.0, 0.0),
            Pool::new(stamina, 0.0),
            Pool::new(mana, 0.0),
        )
    }

    fn standing() -> ControlInput {
        ControlInput {
            grounded: true,
            ..default()
        }
    }

    fn run(
        controller: &mut CharacterController,
        pools: &mut ResourcePool,
        input: ControlInput,
        ticks: usize,
    ) -> Vec<TickOutcome> {
        (0..ticks).map(|_| controller.tick(&input, pools, DT)).collect()
    }

    #[test]
    fn second_attack_rejected_until_recovery() {
        let mut controller = CharacterController::new(CharacterClass::Fighter, 0.4);
        let mut pools = pools(100.0, 0.0);

        let attack = ControlInput {
            attack: Some(AttackSlot::Basic),
            ..standing()
        };
        let first = controller.tick(&attack, &mut pools, DT);
        assert_eq!(first.animation_cue, Some(AnimationCue::BasicAttack));
        assert_eq!(controller.state(), CharacterState::Attacking);
        assert_eq!(pools.current(ResourceKind::Stamina), 95.0);

        // Scheduled from 0.125 s, so the reset lands at 0.675 s.
        for _ in 0..4 {
            let out = controller.tick(&attack, &mut pools, DT);
            assert_eq!(out.denied, vec![GameplayError::Busy("attacking")]);
            assert_eq!(controller.state(), CharacterState::Attacking);
        }
        assert_eq!(pools.current(ResourceKind::Stamina), 95.0);

        // The held intent starts a fresh attack on the tick the reset fires.
        let out = controller.tick(&attack, &mut pools, DT);
        assert!(out.denied.is_empty());
        assert_eq!(out.animation_cue, Some(AnimationCue::BasicAttack));
        assert_eq!(pools.current(ResourceKind::Stamina), 90.0);
    }

    #[test]
    fn combined_cost_denial_leaves_pools_untouched() {
        let mut controller = CharacterController::new(CharacterClass::Ranger, 0.4);
        let mut pools = pools(10.0, 10.0);

        assert!(controller.try_attack(AttackSlot::Basic, &mut pools).is_ok());
        assert_eq!(pools.current(ResourceKind::Stamina), 0.0);
        assert_eq!(pools.current(ResourceKind::Mana), 5.0);

        run(&mut controller, &mut pools, standing(), 8);
        assert_eq!(controller.state(), CharacterState::Idle);

        let err = controller
            .try_attack(AttackSlot::Basic, &mut pools)
            .unwrap_err();
        assert!(matches!(
            err,
            GameplayError::InsufficientResource {
                kind: ResourceKind::Stamina,
                ..
            }
        ));
        assert_eq!(pools.current(ResourceKind::Stamina), 0.0);
        assert_eq!(pools.current(ResourceKind::Mana), 5.0);
        assert_eq!(controller.state(), CharacterState::Idle);
    }

    #[test]
    fn walking_and_jumping_follow_class_mobility() {
        let mobility = CharacterClass::Ranger.mobility();
        let mut controller = CharacterController::new(CharacterClass::Ranger, 0.4);
        let mut pools = pools(100.0, 0.0);

        let walk = ControlInput {
            horizontal: 1.0,
            ..standing()
        };
        let out = controller.tick(&walk, &mut pools, DT);
        assert_eq!(out.velocity_x, mobility.move_speed);

        let jump = ControlInput {
            jump: true,
            ..standing()
        };
        let out = controller.tick(&jump, &mut pools, DT);
        assert_eq!(out.jump_impulse, Some(mobility.jump_impulse));
        assert_eq!(
            pools.current(ResourceKind::Stamina),
            100.0 - mobility.jump_cost
        );
    }

    #[test]
    fn movement_is_ignored_while_attacking() {
        let mut controller = CharacterController::new(CharacterClass::Wizard, 0.4);
        let mut pools = pools(100.0, 100.0);
        controller.try_attack(AttackSlot::Basic, &mut pools).unwrap();

        let push_left = ControlInput {
            horizontal: -1.0,
            jump: true,
            ..standing()
        };
        let out = controller.tick(&push_left, &mut pools, DT);
        assert_eq!(out.velocity_x, 0.0);
        assert_eq!(out.jump_impulse, None);
        assert_eq!(controller.facing(), Facing::Right);
        assert_eq!(controller.state(), CharacterState::Attacking);
    }

    #[test]
    fn effects_fire_on_the_attack_timeline() {
        let mut controller = CharacterController::new(CharacterClass::Wizard, 0.4);
        let mut pools = pools(100.0, 100.0);
        controller.try_attack(AttackSlot::Basic, &mut pools).unwrap();

        let outcomes = run(&mut controller, &mut pools, standing(), 5);
        // Sound at 0.25 s, fireball at 0.495 s, recovery at 0.55 s.
        assert_eq!(outcomes[1].sounds, vec!["wizard_q"]);
        assert!(outcomes[2].spawns.is_empty());
        assert_eq!(outcomes[3].spawns.len(), 1);
        assert_eq!(controller.state(), CharacterState::Idle);
        assert_eq!(controller.pending_effects(), 0);
    }

    #[test]
    fn facing_mirrors_spawn_offsets() {
        let mut controller = CharacterController::new(CharacterClass::Wizard, 0.4);
        let mut pools = pools(100.0, 100.0);

        let left = ControlInput {
            horizontal: -1.0,
            ..standing()
        };
        controller.tick(&left, &mut pools, DT);
        assert_eq!(controller.facing(), Facing::Left);

        controller.try_attack(AttackSlot::Basic, &mut pools).unwrap();
        let spawns: Vec<SpawnRequest> = run(&mut controller, &mut pools, standing(), 5)
            .into_iter()
            .flat_map(|out| out.spawns)
            .collect();

        assert_eq!(
            spawns,
            vec![SpawnRequest::Projectile {
                tag: DamageTag::FireBall,
                offset: Vec2::new(-3.5, 1.9),
                velocity: Vec2::new(-12.0, 0.0),
            }]
        );
    }

    #[test]
    fn lightning_strikes_three_times_spaced_out() {
        let mut controller = CharacterController::new(CharacterClass::Wizard, 0.4);
        let mut pools = pools(100.0, 100.0);
        controller.try_attack(AttackSlot::Third, &mut pools).unwrap();

        let offsets: Vec<Vec2> = run(&mut controller, &mut pools, standing(), 10)
            .into_iter()
            .flat_map(|out| out.spawns)
            .map(|spawn| match spawn {
                SpawnRequest::Projectile { offset, .. } => offset,
                SpawnRequest::Melee { offset, .. } => offset,
            })
            .collect();

        assert_eq!(
            offsets,
            vec![Vec2::new(7.0, 1.0), Vec2::new(10.5, 1.0), Vec2::new(14.0, 1.0)]
        );
        assert_eq!(controller.state(), CharacterState::Idle);
    }

    #[test]
    fn melee_volumes_spawn_at_windup_and_arm_later() {
        let mut controller = CharacterController::new(CharacterClass::Ranger, 0.4);
        let mut pools = pools(100.0, 100.0);
        controller.try_attack(AttackSlot::Second, &mut pools).unwrap();

        let spawns: Vec<SpawnRequest> = run(&mut controller, &mut pools, standing(), 5)
            .into_iter()
            .flat_map(|out| out.spawns)
            .collect();

        assert_eq!(spawns.len(), 2);
        let arms: Vec<f32> = spawns
            .iter()
            .map(|spawn| match spawn {
                SpawnRequest::Melee { arm_after, .. } => *arm_after,
                SpawnRequest::Projectile { .. } => f32::NAN,
            })
            .collect();
        assert!((arms[0] - 0.03).abs() < 1e-4);
        assert!((arms[1] - 0.2).abs() < 1e-4);
    }

    #[test]
    fn death_suppresses_pending_effects() {
        let mut controller = CharacterController::new(CharacterClass::Wizard, 0.4);
        let mut pools = pools(100.0, 100.0);
        controller.try_attack(AttackSlot::Third, &mut pools).unwrap();

        pools.damage(500.0);
        let out = controller.tick(&standing(), &mut pools, DT);
        assert!(out.died);
        assert_eq!(controller.state(), CharacterState::Dead);

        let later = run(
            &mut controller,
            &mut pools,
            ControlInput {
                horizontal: 1.0,
                jump: true,
                attack: Some(AttackSlot::Basic),
                grounded: true,
            },
            20,
        );
        assert!(later.iter().all(|out| *out == TickOutcome::default()));
        assert_eq!(controller.pending_effects(), 0);
    }

    #[test]
    fn jump_spends_stamina_and_needs_ground() {
        let mut controller = CharacterController::new(CharacterClass::Fighter, 0.4);
        let mut pools = pools(30.0, 0.0);

        let jump = ControlInput {
            jump: true,
            ..standing()
        };
        let out = controller.tick(&jump, &mut pools, DT);
        assert_eq!(out.jump_impulse, Some(12.0));
        assert_eq!(pools.current(ResourceKind::Stamina), 5.0);
        assert_eq!(controller.state(), CharacterState::Jumping);

        let airborne = ControlInput {
            jump: true,
            grounded: false,
            ..default()
        };
        let out = controller.tick(&airborne, &mut pools, DT);
        assert_eq!(out.jump_impulse, None);
        assert_eq!(controller.state(), CharacterState::Jumping);

        // Landed, but 5 stamina cannot pay for another jump.
        let out = controller.tick(&jump, &mut pools, DT);
        assert_eq!(out.jump_impulse, None);
        assert!(matches!(
            out.denied[..],
            [GameplayError::InsufficientResource { .. }]
        ));
        assert_eq!(controller.state(), CharacterState::Idle);
    }

    #[test]
    fn landing_cue_fires_once_per_landing() {
        let mut controller = CharacterController::new(CharacterClass::Ranger, 0.4);
        let mut pools = pools(100.0, 100.0);

        let probes = [true, false, false, true, true, true];
        let landings: usize = probes
            .iter()
            .map(|&grounded| {
                let input = ControlInput {
                    grounded,
                    ..default()
                };
                controller.tick(&input, &mut pools, DT)
            })
            .filter(|out| out.sounds.contains(&"ranger_jump"))
            .count();

        assert_eq!(landings, 1);
    }

    #[test]
    fn exhaustion_blocks_walking() {
        let mut controller = CharacterController::new(CharacterClass::Fighter, 0.4);
        let mut pools = pools(0.0, 0.0);

        let walk = ControlInput {
            horizontal: 1.0,
            ..standing()
        };
        let out = controller.tick(&walk, &mut pools, DT);
        assert_eq!(out.velocity_x, 0.0);
        assert_eq!(controller.state(), CharacterState::Idle);
    }

    #[test]
    fn walk_cue_respects_its_interval() {
        let mut controller = CharacterController::new(CharacterClass::Wizard, 0.5);
        let mut pools = pools(100.0, 100.0);

        let walk = ControlInput {
            horizontal: 1.0,
            ..standing()
        };
        let cues: Vec<bool> = run(&mut controller, &mut pools, walk, 9)
            .iter()
            .map(|out| out.sounds.contains(&"wizard_walk"))
            .collect();

        assert_eq!(
            cues,
            vec![true, false, false, false, true, false, false, false, true]
        );
        assert_eq!(controller.state(), CharacterState::Walking);
    }
}
