//! Enemy animator flags.

use bevy::prelude::*;

use super::brain::{EnemyBrain, EnemyState};
use crate::core::Facing;

/// Boolean animator flags, recomputed every tick from the brain.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyAnimation {
    /// Holding position: stalled below a target it cannot reach.
    pub is_idle: bool,
    pub is_walking: bool,
    pub is_running: bool,
    pub is_attacking: bool,
    pub is_hurt: bool,
    pub is_dead: bool,
}

impl EnemyAnimation {
    pub fn from_brain(brain: &EnemyBrain) -> Self {
        let state = brain.state();
        Self {
            is_idle: state == EnemyState::Chase && brain.is_stalled(),
            is_walking: state == EnemyState::Patrol,
            is_running: state == EnemyState::Chase && !brain.is_stalled(),
            is_attacking: state == EnemyState::Attack,
            is_hurt: state == EnemyState::Hurt,
            is_dead: state == EnemyState::Dead,
        }
    }
}

pub fn sync_enemy_animation(mut enemies: Query<(&EnemyBrain, &mut EnemyAnimation, &mut Facing)>) {
    for (brain, mut animation, mut facing) in enemies.iter_mut() {
        animation.set_if_neq(EnemyAnimation::from_brain(brain));
        facing.set_if_neq(brain.facing());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::EnemyParams;

    #[test]
    fn exactly_one_flag_per_state() {
        let mut brain = EnemyBrain::new(EnemyParams::default());
        let flags = EnemyAnimation::from_brain(&brain);
        assert!(flags.is_walking);

        brain.hurt();
        let flags = EnemyAnimation::from_brain(&brain);
        assert!(flags.is_hurt && !flags.is_walking);

        brain.die();
        assert_eq!(
            EnemyAnimation::from_brain(&brain),
            EnemyAnimation {
                is_dead: true,
                ..default()
            }
        );
    }
}
