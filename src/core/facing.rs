//! Horizontal facing shared by characters and enemies.

use bevy::prelude::*;

/// Which way an entity looks. Mirrors spawn offsets; has no effect on physics.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing for a horizontal direction, or `None` when there is none.
    pub fn from_direction(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Self::Right)
        } else if x < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Mirror a right-facing vector to this facing.
    pub fn mirror(self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.sign(), v.y)
    }
}
