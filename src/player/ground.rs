//! Grounded detection with a landing edge.

use bevy::prelude::*;

/// Downward probe configuration shared by every character.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    /// Ray origin relative to the character's position.
    pub offset: Vec2,
    /// Ray length.
    pub length: f32,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            length: 1.5,
        }
    }
}

/// Remembers the previous probe result so landings fire once per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroundSensor {
    grounded: bool,
}

impl GroundSensor {
    pub fn new(grounded: bool) -> Self {
        Self { grounded }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Record this tick's probe. Returns true on the airborne to grounded edge.
    pub fn update(&mut self, hit: bool) -> bool {
        let landed = hit && !self.grounded;
        self.grounded = hit;
        landed
    }
}
