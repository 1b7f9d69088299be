//! Damage table and hit-box templates.

use bevy::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::DamageTag;
use crate::core::{DataLoadError, GameplayError};

pub const DAMAGE_TABLE_PATH: &str = "assets/data/damage_table.ron";

/// Shared mapping from damage tag to damage amount.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DamageTable {
    amounts: HashMap<DamageTag, f32>,
}

impl Default for DamageTable {
    fn default() -> Self {
        let amounts = DamageTag::ALL
            .into_iter()
            .map(|tag| (tag, Self::builtin(tag)))
            .collect();
        Self { amounts }
    }
}

impl DamageTable {
    fn builtin(tag: DamageTag) -> f32 {
        match tag {
            DamageTag::Lightning => 45.0,
            DamageTag::FireBall => 25.0,
            DamageTag::IceSpear => 20.0,
            DamageTag::FighterQ => 25.0,
            DamageTag::FighterE => 20.0,
            DamageTag::FighterR => 40.0,
            DamageTag::RangerArrow => 20.0,
            DamageTag::RangerE => 15.0,
            DamageTag::MobStrike => 10.0,
        }
    }

    pub fn get(&self, tag: DamageTag) -> f32 {
        self.amounts
            .get(&tag)
            .copied()
            .unwrap_or_else(|| Self::builtin(tag))
    }

    /// Parse a RON map of `Tag: amount`. Tags absent from the file keep
    /// their built-in amount.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let entries: HashMap<DamageTag, f32> =
            ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
                path: path.to_string(),
                details: e.to_string(),
            })?;

        let mut table = Self::default();
        for (tag, amount) in entries {
            if !amount.is_finite() || amount < 0.0 {
                return Err(DataLoadError::InvalidDefinition {
                    name: format!("{tag:?}"),
                    reason: format!("damage must be a non-negative number, got {amount}"),
                });
            }
            table.amounts.insert(tag, amount);
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(DataLoadError::FileNotFound(display));
        }
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents, &display)
    }
}

/// Load the damage table at startup, keeping the built-in amounts on failure.
pub fn load_damage_table(mut table: ResMut<DamageTable>) {
    match DamageTable::load(Path::new(DAMAGE_TABLE_PATH)) {
        Ok(loaded) => {
            info!("Loaded damage table from {}", DAMAGE_TABLE_PATH);
            *table = loaded;
        }
        Err(e) => warn!("{e}; using built-in damage table"),
    }
}

/// Size and lifetime of the hit box spawned for a tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBoxTemplate {
    pub half_extents: Vec2,
    /// Seconds before a projectile is removed. Melee volumes use their
    /// attack's active window instead.
    pub lifetime: f32,
    pub piercing: bool,
}

/// Hit-box templates keyed by damage tag.
#[derive(Resource, Debug, Clone)]
pub struct SpawnTemplates {
    templates: HashMap<DamageTag, HitBoxTemplate>,
}

impl Default for SpawnTemplates {
    fn default() -> Self {
        let projectile = |w: f32, h: f32, lifetime: f32| HitBoxTemplate {
            half_extents: Vec2::new(w, h),
            lifetime,
            piercing: false,
        };
        let strike = |w: f32, h: f32, lifetime: f32| HitBoxTemplate {
            half_extents: Vec2::new(w, h),
            lifetime,
            piercing: true,
        };

        let templates = HashMap::from([
            (DamageTag::FireBall, projectile(0.6, 0.4, 3.0)),
            (DamageTag::IceSpear, projectile(0.8, 0.25, 3.0)),
            (DamageTag::RangerArrow, projectile(0.5, 0.15, 2.0)),
            (DamageTag::Lightning, strike(0.8, 3.0, 0.4)),
            (DamageTag::FighterQ, strike(1.2, 1.0, 0.5)),
            (DamageTag::FighterE, strike(1.4, 1.0, 0.5)),
            (DamageTag::FighterR, strike(1.8, 1.4, 1.0)),
            (DamageTag::RangerE, strike(1.2, 0.9, 0.35)),
            (DamageTag::MobStrike, strike(0.9, 0.8, 0.0)),
        ]);
        Self { templates }
    }
}

impl SpawnTemplates {
    pub fn get(&self, tag: DamageTag) -> Result<&HitBoxTemplate, GameplayError> {
        self.templates
            .get(&tag)
            .ok_or_else(|| GameplayError::MissingCollaborator(format!("hit box template for {tag:?}")))
    }

    pub fn insert(&mut self, tag: DamageTag, template: HitBoxTemplate) {
        self.templates.insert(tag, template);
    }

    pub fn remove(&mut self, tag: DamageTag) -> Option<HitBoxTemplate> {
        self.templates.remove(&tag)
    }
}
