//! Physics-facing components. Gameplay code writes and reads these; only the
//! bridge knows how they map onto a physics engine.

use bevy::prelude::*;

/// What gameplay wants the body to do this tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionIntent {
    /// Horizontal velocity in units per second.
    pub velocity_x: f32,
    /// One-shot upward impulse, cleared once applied.
    pub impulse_y: Option<f32>,
}

/// Result of the downward ground probe.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundContact {
    pub grounded: bool,
}

impl Default for GroundContact {
    fn default() -> Self {
        Self { grounded: true }
    }
}

/// Marker for surfaces the ground probe accepts.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Ground;

/// Solid box for characters, enemies and ground.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodyShape {
    pub half_extents: Vec2,
}

/// Trigger box: hit volumes and chase zones.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SensorShape {
    pub half_extents: Vec2,
}
