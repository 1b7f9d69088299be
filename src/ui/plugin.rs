//! UI plugin - display-only readouts.

use bevy::prelude::*;

use super::hud;

/// UI plugin - keeps resource gauges in step with the characters.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
    }
}
