//! Enemy behaviour state machine.
//!
//! Patrol between two x bounds, chase a detected character, attack it after a
//! delay once in range, flinch when hit and die at zero health. The brain only
//! holds an entity handle for its target; the caller resolves that handle to a
//! position every tick and passes `None` when it no longer resolves.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::Facing;

/// What happens after an attack fires while the target is still in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackCadence {
    /// Re-arm the delay at once and keep attacking from the same spot.
    #[default]
    Rearm,
    /// Drop back to Chase; the next range check starts a fresh delay.
    ReturnToChase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyState {
    #[default]
    Patrol,
    Chase,
    Attack,
    Hurt,
    Dead,
}

/// Tunables for one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyParams {
    pub min_x: f32,
    pub max_x: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    /// Horizontal distance at which the enemy stops and attacks.
    pub attack_range: f32,
    /// When set, a target more than this far above cannot be attacked.
    pub vertical_tolerance: Option<f32>,
    pub attack_delay: f32,
    pub hurt_duration: f32,
    /// Seconds the strike volume stays armed after an attack fires.
    pub strike_window: f32,
    pub cadence: AttackCadence,
}

impl Default for EnemyParams {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 10.0,
            patrol_speed: 2.0,
            chase_speed: 4.0,
            attack_range: 1.0,
            vertical_tolerance: None,
            attack_delay: 1.0,
            hurt_duration: 0.5,
            strike_window: 0.4,
            cadence: AttackCadence::Rearm,
        }
    }
}

/// Result of one brain tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnemyTick {
    pub velocity_x: f32,
    /// An attack fired this tick.
    pub attacked: bool,
    /// The strike volume should be armed.
    pub strike_active: bool,
    /// The target handle stopped resolving and was dropped.
    pub lost_target: Option<Entity>,
}

#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    params: EnemyParams,
    state: EnemyState,
    facing: Facing,
    target: Option<Entity>,
    /// Seconds left before the pending attack fires.
    attack_timer: Option<f32>,
    hurt_elapsed: f32,
    strike_remaining: f32,
    stalled: bool,
}

impl EnemyBrain {
    pub fn new(params: EnemyParams) -> Self {
        Self {
            params,
            state: EnemyState::Patrol,
            facing: Facing::Right,
            target: None,
            attack_timer: None,
            hurt_elapsed: 0.0,
            strike_remaining: 0.0,
            stalled: false,
        }
    }

    pub fn params(&self) -> &EnemyParams {
        &self.params
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn attack_pending(&self) -> bool {
        self.attack_timer.is_some()
    }

    /// In range of a target it cannot reach vertically.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    /// Hurt doubles as a brief invulnerability window.
    pub fn accepts_hits(&self) -> bool {
        !matches!(self.state, EnemyState::Hurt | EnemyState::Dead)
    }

    /// Take a target reported by the chase zone. Ignored when one is held.
    pub fn acquire(&mut self, target: Entity) -> bool {
        if self.is_dead() || self.target.is_some() {
            return false;
        }
        self.target = Some(target);
        if self.state == EnemyState::Patrol {
            self.state = EnemyState::Chase;
        }
        true
    }

    /// The chase zone lost `target`. Other entities leaving are ignored.
    pub fn release(&mut self, target: Entity) -> bool {
        if self.target != Some(target) {
            return false;
        }
        self.lose_target();
        true
    }

    /// Drop the target and cancel the pending attack. Hurt recovery is left
    /// running.
    pub fn lose_target(&mut self) {
        self.target = None;
        self.attack_timer = None;
        self.stalled = false;
        if matches!(self.state, EnemyState::Chase | EnemyState::Attack) {
            self.state = EnemyState::Patrol;
        }
    }

    /// Flinch from a hit. Returns false while already hurt or dead.
    pub fn hurt(&mut self) -> bool {
        if !self.accepts_hits() {
            return false;
        }
        self.state = EnemyState::Hurt;
        self.hurt_elapsed = 0.0;
        self.strike_remaining = 0.0;
        true
    }

    /// Terminal. Clears every timer.
    pub fn die(&mut self) {
        self.state = EnemyState::Dead;
        self.target = None;
        self.attack_timer = None;
        self.strike_remaining = 0.0;
        self.stalled = false;
    }

    /// Advance one tick from `position`. `target_position` is the resolved
    /// target, or `None` when the handle no longer points at a live character.
    pub fn tick(&mut self, position: Vec2, target_position: Option<Vec2>, dt: f32) -> EnemyTick {
        let mut out = EnemyTick::default();
        if self.is_dead() {
            return out;
        }

        if self.strike_remaining > 0.0 {
            self.strike_remaining = (self.strike_remaining - dt).max(0.0);
        }

        let target_position = match (self.target, target_position) {
            (Some(target), None) => {
                out.lost_target = Some(target);
                self.lose_target();
                None
            }
            (Some(_), position) => position,
            (None, _) => None,
        };

        if self.state == EnemyState::Hurt {
            self.hurt_elapsed += dt;
            if self.hurt_elapsed >= self.params.hurt_duration {
                self.state = match (self.target, self.attack_timer) {
                    (Some(_), Some(_)) => EnemyState::Attack,
                    (Some(_), None) => EnemyState::Chase,
                    (None, _) => EnemyState::Patrol,
                };
            }
            out.strike_active = self.strike_remaining > 0.0;
            return out;
        }

        match (self.state, target_position) {
            (EnemyState::Chase | EnemyState::Attack, Some(target)) => {
                self.pursue(position, target, dt, &mut out);
            }
            _ => {
                self.state = EnemyState::Patrol;
                out.velocity_x = self.patrol(position.x, dt);
            }
        }

        out.strike_active = self.strike_remaining > 0.0;
        out
    }

    fn patrol(&mut self, x: f32, dt: f32) -> f32 {
        let (min_x, max_x) = (self.params.min_x, self.params.max_x);
        let at_bound = |facing: Facing, x: f32| match facing {
            Facing::Right => x >= max_x,
            Facing::Left => x <= min_x,
        };

        if at_bound(self.facing, x) {
            self.facing = self.facing.flipped();
        }

        let mut velocity = self.facing.sign() * self.params.patrol_speed;
        let next = x + velocity * dt;
        if dt > 0.0 && at_bound(self.facing, next) {
            let bound = match self.facing {
                Facing::Right => max_x,
                Facing::Left => min_x,
            };
            velocity = (bound - x) / dt;
            self.facing = self.facing.flipped();
        }
        velocity
    }

    fn pursue(&mut self, position: Vec2, target: Vec2, dt: f32, out: &mut EnemyTick) {
        let dx = target.x - position.x;
        if let Some(facing) = Facing::from_direction(dx) {
            self.facing = facing;
        }

        if dx.abs() > self.params.attack_range {
            self.state = EnemyState::Chase;
            self.stalled = false;
            self.attack_timer = None;
            out.velocity_x = self.facing.sign() * self.params.chase_speed;
            return;
        }

        let out_of_reach = self
            .params
            .vertical_tolerance
            .is_some_and(|tolerance| target.y - position.y > tolerance);
        if out_of_reach {
            self.state = EnemyState::Chase;
            self.stalled = true;
            self.attack_timer = None;
            return;
        }

        self.stalled = false;
        if self.state != EnemyState::Attack || self.attack_timer.is_none() {
            self.state = EnemyState::Attack;
            self.attack_timer = Some(self.params.attack_delay);
            return;
        }

        let remaining = self.attack_timer.unwrap_or(0.0) - dt;
        if remaining > 0.0 {
            self.attack_timer = Some(remaining);
            return;
        }

        out.attacked = true;
        self.strike_remaining = self.params.strike_window;
        match self.params.cadence {
            AttackCadence::Rearm => self.attack_timer = Some(self.params.attack_delay),
            AttackCadence::ReturnToChase => {
                self.attack_timer = None;
                self.state = EnemyState::Chase;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.125;

    fn target() -> Entity {
        Entity::from_raw(7)
    }

    /// Tick the brain, integrating its velocity into `position`.
    fn step(brain: &mut EnemyBrain, position: &mut Vec2, target: Option<Vec2>) -> EnemyTick {
        let out = brain.tick(*position, target, DT);
        position.x += out.velocity_x * DT;
        out
    }

    #[test]
    fn patrol_reaches_bound_and_turns() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::ZERO;

        for _ in 0..40 {
            step(&mut brain, &mut position, None);
        }

        assert_eq!(position.x, 10.0);
        assert_eq!(brain.facing(), Facing::Left);
        assert_eq!(brain.state(), EnemyState::Patrol);

        let out = step(&mut brain, &mut position, None);
        assert_eq!(out.velocity_x, -2.0);
    }

    #[test]
    fn patrol_never_leaves_its_bounds() {
        let mut brain = EnemyBrain::new(EnemyParams {
            patrol_speed: 3.0,
            ..default()
        });
        let mut position = Vec2::new(4.0, 0.0);

        for _ in 0..200 {
            step(&mut brain, &mut position, None);
            assert!((0.0..=10.0).contains(&position.x), "{}", position.x);
        }
    }

    #[test]
    fn detection_starts_chase_toward_target() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::new(5.0, 0.0);
        assert!(brain.acquire(target()));
        assert_eq!(brain.state(), EnemyState::Chase);

        let out = step(&mut brain, &mut position, Some(Vec2::new(1.0, 0.0)));
        assert_eq!(out.velocity_x, -4.0);
        assert_eq!(brain.facing(), Facing::Left);
    }

    #[test]
    fn attack_fires_after_delay_and_rearms() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::new(5.0, 0.0);
        let player = Some(Vec2::new(5.5, 0.0));
        brain.acquire(target());

        let first = step(&mut brain, &mut position, player);
        assert_eq!(brain.state(), EnemyState::Attack);
        assert_eq!(first.velocity_x, 0.0);

        let fired: Vec<bool> = (0..16)
            .map(|_| step(&mut brain, &mut position, player).attacked)
            .collect();
        let fire_ticks: Vec<usize> = fired
            .iter()
            .enumerate()
            .filter_map(|(i, fired)| fired.then_some(i))
            .collect();

        assert_eq!(fire_ticks, vec![7, 15]);
        assert_eq!(brain.state(), EnemyState::Attack);
    }

    #[test]
    fn return_to_chase_goes_through_chase_after_each_attack() {
        let mut brain = EnemyBrain::new(EnemyParams {
            cadence: AttackCadence::ReturnToChase,
            ..default()
        });
        let mut position = Vec2::new(5.0, 0.0);
        let player = Some(Vec2::new(5.5, 0.0));
        brain.acquire(target());

        step(&mut brain, &mut position, player);
        for _ in 0..7 {
            step(&mut brain, &mut position, player);
        }
        assert_eq!(brain.state(), EnemyState::Attack);

        let out = step(&mut brain, &mut position, player);
        assert!(out.attacked);
        assert_eq!(brain.state(), EnemyState::Chase);
        assert!(!brain.attack_pending());

        step(&mut brain, &mut position, player);
        assert_eq!(brain.state(), EnemyState::Attack);
        assert!(brain.attack_pending());
    }

    #[test]
    fn strike_window_follows_each_attack() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::new(5.0, 0.0);
        let player = Some(Vec2::new(5.5, 0.0));
        brain.acquire(target());

        let active: Vec<bool> = (0..14)
            .map(|_| step(&mut brain, &mut position, player).strike_active)
            .collect();

        // Fires on tick 8; armed for 0.4 s.
        assert!(active[..8].iter().all(|a| !a));
        assert!(active[8..12].iter().all(|a| *a));
        assert!(!active[12]);
    }

    #[test]
    fn losing_target_cancels_pending_attack() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::new(5.0, 0.0);
        let player = Some(Vec2::new(5.5, 0.0));
        brain.acquire(target());

        for _ in 0..7 {
            step(&mut brain, &mut position, player);
        }
        assert!(brain.attack_pending());

        assert!(brain.release(target()));
        assert_eq!(brain.state(), EnemyState::Patrol);
        assert!(!brain.attack_pending());

        let out = step(&mut brain, &mut position, None);
        assert!(!out.attacked);
        assert_eq!(out.velocity_x.abs(), 2.0);
    }

    #[test]
    fn release_of_another_entity_is_ignored() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        brain.acquire(target());
        assert!(!brain.release(Entity::from_raw(99)));
        assert_eq!(brain.target(), Some(target()));
    }

    #[test]
    fn dangling_target_reverts_to_patrol() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::new(5.0, 0.0);
        brain.acquire(target());
        step(&mut brain, &mut position, Some(Vec2::new(5.5, 0.0)));
        assert!(brain.attack_pending());

        let out = step(&mut brain, &mut position, None);
        assert_eq!(out.lost_target, Some(target()));
        assert_eq!(brain.state(), EnemyState::Patrol);
        assert!(!brain.attack_pending());
    }

    #[test]
    fn hurt_suspends_attack_timer_and_resumes_attack() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::new(5.0, 0.0);
        let player = Some(Vec2::new(5.5, 0.0));
        brain.acquire(target());

        for _ in 0..5 {
            step(&mut brain, &mut position, player);
        }
        assert!(brain.hurt());
        assert!(!brain.accepts_hits());
        assert!(!brain.hurt());

        for _ in 0..4 {
            let out = step(&mut brain, &mut position, player);
            assert_eq!(out.velocity_x, 0.0);
            assert!(!out.attacked);
        }
        assert_eq!(brain.state(), EnemyState::Attack);
        assert!(brain.accepts_hits());

        // 0.5 s of the delay was spent before the flinch; 0.5 s remain.
        let fired: Vec<bool> = (0..4)
            .map(|_| step(&mut brain, &mut position, player).attacked)
            .collect();
        assert_eq!(fired, vec![false, false, false, true]);
    }

    #[test]
    fn hurt_without_target_returns_to_patrol() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::new(5.0, 0.0);
        brain.hurt();

        for _ in 0..4 {
            step(&mut brain, &mut position, None);
        }
        assert_eq!(brain.state(), EnemyState::Patrol);
        assert_eq!(position.x, 5.0);
    }

    #[test]
    fn target_above_tolerance_stalls_chase() {
        let mut brain = EnemyBrain::new(EnemyParams {
            vertical_tolerance: Some(1.5),
            ..default()
        });
        let mut position = Vec2::new(5.0, 0.0);
        brain.acquire(target());

        for _ in 0..20 {
            let out = step(&mut brain, &mut position, Some(Vec2::new(4.5, 3.0)));
            assert_eq!(out.velocity_x, 0.0);
            assert!(!out.attacked);
        }
        assert!(brain.is_stalled());
        assert_eq!(brain.state(), EnemyState::Chase);
        assert_eq!(brain.facing(), Facing::Left);

        step(&mut brain, &mut position, Some(Vec2::new(4.5, 1.0)));
        assert_eq!(brain.state(), EnemyState::Attack);
        assert!(!brain.is_stalled());
    }

    #[test]
    fn dead_is_terminal() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let mut position = Vec2::new(5.0, 0.0);
        brain.acquire(target());
        brain.die();

        assert!(!brain.hurt());
        assert!(!brain.acquire(target()));
        let out = step(&mut brain, &mut position, Some(Vec2::new(5.5, 0.0)));
        assert_eq!(out, EnemyTick::default());
        assert_eq!(brain.state(), EnemyState::Dead);
    }
}
