//! Character classes and their stat tables.

use bevy::prelude::*;

/// Playable character class. Selects the stat table and the attack kit.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Wizard,
    Fighter,
    Ranger,
}

/// Current level of a character, starting at 1.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(pub u32);

impl Default for Level {
    fn default() -> Self {
        Self(1)
    }
}

/// Everything about a character that depends only on class and level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassStats {
    pub max_health: f32,
    pub max_stamina: f32,
    pub max_mana: f32,
    pub stamina_regen: f32,
    pub mana_regen: f32,
}

/// Movement numbers. They depend on the class alone, never on level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mobility {
    /// Horizontal speed in units per second.
    pub move_speed: f32,
    /// Upward impulse applied on jump.
    pub jump_impulse: f32,
    /// Stamina spent per jump.
    pub jump_cost: f32,
}

/// Per-level increments on top of the base table.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Growth {
    health: f32,
    stamina: f32,
    mana: f32,
    stamina_regen: f32,
    mana_regen: f32,
}

/// Sound cue ids a class plays outside of attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSounds {
    pub walk: &'static str,
    /// Played on takeoff and on landing.
    pub jump: &'static str,
    pub hurt: &'static str,
    pub death: &'static str,
}

const MOVE_SPEED: f32 = 5.0;
const JUMP_IMPULSE: f32 = 12.0;
const JUMP_COST: f32 = 25.0;

impl CharacterClass {
    pub const ALL: [CharacterClass; 3] = [Self::Wizard, Self::Fighter, Self::Ranger];

    pub fn name(self) -> &'static str {
        match self {
            Self::Wizard => "Wizard",
            Self::Fighter => "Fighter",
            Self::Ranger => "Ranger",
        }
    }

    /// Level 1 stats.
    pub fn base_stats(self) -> ClassStats {
        let (max_health, max_stamina, max_mana, stamina_regen, mana_regen) = match self {
            Self::Wizard => (100.0, 60.0, 100.0, 6.0, 10.0),
            Self::Fighter => (150.0, 100.0, 20.0, 12.0, 1.0),
            Self::Ranger => (120.0, 80.0, 50.0, 9.0, 5.0),
        };

        ClassStats {
            max_health,
            max_stamina,
            max_mana,
            stamina_regen,
            mana_regen,
        }
    }

    pub fn mobility(self) -> Mobility {
        Mobility {
            move_speed: MOVE_SPEED,
            jump_impulse: JUMP_IMPULSE,
            jump_cost: JUMP_COST,
        }
    }

    fn growth(self) -> Growth {
        match self {
            Self::Wizard => Growth {
                health: 8.0,
                stamina: 5.0,
                mana: 15.0,
                stamina_regen: 0.5,
                mana_regen: 1.5,
            },
            Self::Fighter => Growth {
                health: 15.0,
                stamina: 12.0,
                mana: 2.0,
                stamina_regen: 1.5,
                mana_regen: 0.0,
            },
            Self::Ranger => Growth {
                health: 10.0,
                stamina: 8.0,
                mana: 6.0,
                stamina_regen: 1.0,
                mana_regen: 0.5,
            },
        }
    }

    /// Stats at `level`. Levels below 1 are treated as 1.
    pub fn stats_at(self, level: u32) -> ClassStats {
        let base = self.base_stats();
        let growth = self.growth();
        let steps = level.saturating_sub(1) as f32;

        ClassStats {
            max_health: base.max_health + growth.health * steps,
            max_stamina: base.max_stamina + growth.stamina * steps,
            max_mana: base.max_mana + growth.mana * steps,
            stamina_regen: base.stamina_regen + growth.stamina_regen * steps,
            mana_regen: base.mana_regen + growth.mana_regen * steps,
        }
    }

    pub fn sounds(self) -> ClassSounds {
        match self {
            Self::Wizard => ClassSounds {
                walk: "wizard_walk",
                jump: "wizard_jump",
                hurt: "wizard_hurt",
                death: "wizard_dead",
            },
            Self::Fighter => ClassSounds {
                walk: "fighter_walk",
                jump: "fighter_jump",
                hurt: "fighter_hurt",
                death: "fighter_dead",
            },
            Self::Ranger => ClassSounds {
                walk: "ranger_walk",
                jump: "ranger_jump",
                hurt: "ranger_hurt",
                death: "ranger_dead",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_matches_base_table() {
        for class in CharacterClass::ALL {
            assert_eq!(class.stats_at(1), class.base_stats());
            assert_eq!(class.stats_at(0), class.base_stats());
        }
    }

    #[test]
    fn levels_grow_every_pool() {
        for class in CharacterClass::ALL {
            let one = class.stats_at(1);
            let three = class.stats_at(3);
            assert!(three.max_health > one.max_health);
            assert!(three.max_stamina > one.max_stamina);
            assert!(three.max_mana > one.max_mana);
        }
    }

    #[test]
    fn every_class_pays_the_same_jump() {
        for class in CharacterClass::ALL {
            assert_eq!(class.mobility().jump_cost, 25.0);
        }
    }
}
