//! Physics-free motion for headless runs and tests.

use bevy::prelude::*;

use super::components::MotionIntent;
use crate::core::GameplaySet;

/// Moves bodies straight from their `MotionIntent`, with no collision and no
/// gravity. Ground contact is left to whoever owns `GroundContact`.
pub struct KinematicMotionPlugin;

impl Plugin for KinematicMotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, integrate_motion.in_set(GameplaySet::Present));
    }
}

fn integrate_motion(time: Res<Time>, mut bodies: Query<(&mut Transform, &mut MotionIntent)>) {
    let dt = time.delta_secs();
    for (mut transform, mut motion) in bodies.iter_mut() {
        transform.translation.x += motion.velocity_x * dt;
        motion.impulse_y = None;
    }
}
