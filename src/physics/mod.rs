//! Physics integration.
//!
//! Gameplay code writes `MotionIntent` and reads `GroundContact` and
//! `OverlapEvent`. [`PhysicsBridgePlugin`] backs those with rapier;
//! [`KinematicMotionPlugin`] moves bodies by hand for headless tests.

mod bridge;
mod components;
mod kinematic;

pub use bridge::PhysicsBridgePlugin;
pub use components::*;
pub use kinematic::KinematicMotionPlugin;
