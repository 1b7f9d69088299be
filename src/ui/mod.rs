//! UI module - HUD gauges.

mod hud;
mod plugin;

pub use hud::ResourceGauge;
pub use plugin::UiPlugin;
