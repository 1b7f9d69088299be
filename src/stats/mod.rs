//! Stats module - resource pools, character classes and levelling.

mod class;
mod plugin;
mod pool;

pub use class::*;
pub use plugin::StatsPlugin;
pub use pool::*;
