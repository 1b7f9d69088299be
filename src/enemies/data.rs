//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::brain::{AttackCadence, EnemyParams};
use crate::combat::{DamageOverrides, DamageTag};
use crate::core::DataLoadError;

pub const ENEMY_DATA_DIR: &str = "assets/data/enemies";

/// Enemy definition loaded from RON file.
///
/// Patrol bounds are relative to the spawn position, so one definition can
/// be placed anywhere.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    /// (left, right) patrol bounds as offsets from the spawn x.
    pub patrol_span: (f32, f32),
    pub attack_range: f32,
    #[serde(default)]
    pub vertical_tolerance: Option<f32>,
    pub attack_delay: f32,
    #[serde(default = "default_hurt_duration")]
    pub hurt_duration: f32,
    #[serde(default = "default_strike_window")]
    pub strike_window: f32,
    #[serde(default)]
    pub cadence: AttackCadence,
    /// Fixed strike damage; `None` uses the damage table's `MobStrike`.
    #[serde(default)]
    pub strike_damage: Option<f32>,
    #[serde(default = "default_body")]
    pub body: Vec2,
    #[serde(default = "default_chase_zone")]
    pub chase_zone: Vec2,
    #[serde(default = "default_strike_offset")]
    pub strike_offset: Vec2,
    #[serde(default = "default_strike_size")]
    pub strike_size: Vec2,
    /// Replaces damage table entries for hits this enemy takes.
    #[serde(default)]
    pub damage_overrides: HashMap<DamageTag, f32>,
}

fn default_hurt_duration() -> f32 {
    0.5
}

fn default_strike_window() -> f32 {
    0.4
}

fn default_body() -> Vec2 {
    Vec2::new(0.5, 1.0)
}

fn default_chase_zone() -> Vec2 {
    Vec2::new(6.0, 2.0)
}

fn default_strike_offset() -> Vec2 {
    Vec2::new(0.8, 0.0)
}

fn default_strike_size() -> Vec2 {
    Vec2::new(0.6, 0.8)
}

impl EnemyDefinition {
    /// Built-in melee grunt: re-arms its attack while the target stays close.
    pub fn goblin() -> Self {
        Self {
            name: "Goblin".to_string(),
            max_health: 100.0,
            patrol_speed: 2.0,
            chase_speed: 4.0,
            patrol_span: (0.0, 10.0),
            attack_range: 1.0,
            vertical_tolerance: None,
            attack_delay: 1.0,
            hurt_duration: default_hurt_duration(),
            strike_window: default_strike_window(),
            cadence: AttackCadence::Rearm,
            strike_damage: None,
            body: default_body(),
            chase_zone: default_chase_zone(),
            strike_offset: default_strike_offset(),
            strike_size: default_strike_size(),
            damage_overrides: HashMap::new(),
        }
    }

    /// Built-in skeleton: swings once per approach and cannot hit targets
    /// standing on ledges above it.
    pub fn skeleton() -> Self {
        Self {
            name: "Skeleton".to_string(),
            max_health: 80.0,
            patrol_speed: 1.5,
            chase_speed: 3.0,
            patrol_span: (-4.0, 4.0),
            attack_range: 1.2,
            vertical_tolerance: Some(1.5),
            attack_delay: 0.8,
            cadence: AttackCadence::ReturnToChase,
            strike_damage: Some(15.0),
            damage_overrides: HashMap::from([(DamageTag::Lightning, 60.0)]),
            ..Self::goblin()
        }
    }

    /// Reject definitions the brain cannot run.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let invalid = |reason: &str| DataLoadError::InvalidDefinition {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.max_health <= 0.0 {
            return Err(invalid("max_health must be positive"));
        }
        if self.patrol_span.0 > self.patrol_span.1 {
            return Err(invalid("patrol_span left bound is right of the right bound"));
        }
        if self.patrol_speed < 0.0 || self.chase_speed < 0.0 {
            return Err(invalid("speeds cannot be negative"));
        }
        if self.attack_range < 0.0 || self.attack_delay < 0.0 {
            return Err(invalid("attack range and delay cannot be negative"));
        }
        if self.hurt_duration < 0.0 || self.strike_window < 0.0 {
            return Err(invalid("hurt duration and strike window cannot be negative"));
        }
        if self.damage_overrides.values().any(|amount| *amount < 0.0) {
            return Err(invalid("damage overrides cannot be negative"));
        }
        Ok(())
    }

    /// Brain parameters for an enemy spawned at `spawn_x`.
    pub fn to_params(&self, spawn_x: f32) -> EnemyParams {
        EnemyParams {
            min_x: spawn_x + self.patrol_span.0,
            max_x: spawn_x + self.patrol_span.1,
            patrol_speed: self.patrol_speed,
            chase_speed: self.chase_speed,
            attack_range: self.attack_range,
            vertical_tolerance: self.vertical_tolerance,
            attack_delay: self.attack_delay,
            hurt_duration: self.hurt_duration,
            strike_window: self.strike_window,
            cadence: self.cadence,
        }
    }

    pub fn intake_overrides(&self) -> DamageOverrides {
        let mut overrides: Vec<_> = self
            .damage_overrides
            .iter()
            .map(|(tag, amount)| (*tag, *amount))
            .collect();
        overrides.sort_by_key(|(tag, _)| DamageTag::ALL.iter().position(|t| t == tag));
        DamageOverrides(overrides)
    }

    pub fn from_ron(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let definition: Self =
            ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
                path: path.to_string(),
                details: e.to_string(),
            })?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents, &display)
    }
}

/// Resource holding all enemy definitions, keyed by type name.
///
/// Starts with the built-in goblin and skeleton; files on disk replace or
/// extend them.
#[derive(Resource)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        Self {
            definitions: HashMap::from([
                ("goblin".to_string(), EnemyDefinition::goblin()),
                ("skeleton".to_string(), EnemyDefinition::skeleton()),
            ]),
        }
    }
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Load every `.ron` file in `dir`. Returns how many were accepted;
    /// broken files are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, DataLoadError> {
        if !dir.exists() {
            return Err(DataLoadError::FileNotFound(dir.display().to_string()));
        }

        let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
            path: dir.display().to_string(),
            details: e.to_string(),
        })?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }

            let enemy_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match EnemyDefinition::load(&path) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    self.definitions.insert(enemy_type, definition);
                    loaded += 1;
                }
                Err(e) => error!("Skipping enemy definition {:?}: {}", path, e),
            }
        }
        Ok(loaded)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    match registry.load_dir(Path::new(ENEMY_DATA_DIR)) {
        Ok(count) => info!(
            "Loaded {} enemy definitions ({} known)",
            count,
            registry.definitions.len()
        ),
        Err(e) => warn!("{}; using built-in enemy definitions", e),
    }
}
