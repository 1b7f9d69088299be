//! Health, stamina and mana pools.

use bevy::prelude::*;

use super::class::ClassStats;
use crate::core::GameplayError;

/// Which of the three pools an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Health,
    Stamina,
    Mana,
}

/// One bounded pool. Invariant: `0 <= current <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pool {
    pub current: f32,
    pub max: f32,
    pub regen_per_second: f32,
}

impl Pool {
    pub fn new(max: f32, regen_per_second: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            regen_per_second,
        }
    }

    pub fn percentage(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }
}

/// Stamina and mana an action costs. Health is never a cost.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cost {
    pub stamina: f32,
    pub mana: f32,
}

impl Cost {
    pub const FREE: Cost = Cost {
        stamina: 0.0,
        mana: 0.0,
    };

    pub const fn stamina(amount: f32) -> Self {
        Self {
            stamina: amount,
            mana: 0.0,
        }
    }

    pub const fn new(stamina: f32, mana: f32) -> Self {
        Self { stamina, mana }
    }
}

/// Result of a health change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthChange {
    /// Amount actually removed (or restored) after clamping.
    pub applied: f32,
    /// True only on the change that crossed from alive to dead.
    pub died: bool,
}

/// A character's three pools.
///
/// Stamina and mana regenerate every tick and gate actions. Health only moves
/// through `damage`, `heal` and level changes, never by regeneration.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ResourcePool {
    health: Pool,
    stamina: Pool,
    mana: Pool,
    /// Latched false by the damage that empties health.
    alive: bool,
}

impl ResourcePool {
    pub fn new(health: Pool, stamina: Pool, mana: Pool) -> Self {
        Self {
            alive: health.current > 0.0,
            health,
            stamina,
            mana,
        }
    }

    pub fn from_stats(stats: &ClassStats) -> Self {
        Self::new(
            Pool::new(stats.max_health, 0.0),
            Pool::new(stats.max_stamina, stats.stamina_regen),
            Pool::new(stats.max_mana, stats.mana_regen),
        )
    }

    pub fn get(&self, kind: ResourceKind) -> &Pool {
        match kind {
            ResourceKind::Health => &self.health,
            ResourceKind::Stamina => &self.stamina,
            ResourceKind::Mana => &self.mana,
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> &mut Pool {
        match kind {
            ResourceKind::Health => &mut self.health,
            ResourceKind::Stamina => &mut self.stamina,
            ResourceKind::Mana => &mut self.mana,
        }
    }

    pub fn current(&self, kind: ResourceKind) -> f32 {
        self.get(kind).current
    }

    pub fn max(&self, kind: ResourceKind) -> f32 {
        self.get(kind).max
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    /// Spend from a single pool.
    ///
    /// Stamina and mana refuse (and stay untouched) when short. Health always
    /// gives way and clamps at zero; use [`ResourcePool::damage`] when the
    /// death edge matters.
    pub fn spend(&mut self, kind: ResourceKind, amount: f32) -> Result<(), GameplayError> {
        let amount = amount.max(0.0);
        if kind == ResourceKind::Health {
            self.damage(amount);
            return Ok(());
        }

        let pool = self.get_mut(kind);
        if pool.current < amount {
            return Err(GameplayError::InsufficientResource {
                kind,
                needed: amount,
                available: pool.current,
            });
        }
        pool.set(pool.current - amount);
        Ok(())
    }

    /// Check a combined cost without touching anything.
    pub fn can_afford(&self, cost: &Cost) -> Result<(), GameplayError> {
        for (kind, needed) in [
            (ResourceKind::Stamina, cost.stamina),
            (ResourceKind::Mana, cost.mana),
        ] {
            let available = self.current(kind);
            if needed > 0.0 && available < needed {
                return Err(GameplayError::InsufficientResource {
                    kind,
                    needed,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Spend a combined cost all-or-nothing.
    pub fn spend_cost(&mut self, cost: &Cost) -> Result<(), GameplayError> {
        self.can_afford(cost)?;
        self.stamina.set(self.stamina.current - cost.stamina.max(0.0));
        self.mana.set(self.mana.current - cost.mana.max(0.0));
        Ok(())
    }

    /// Regenerate stamina and mana for one tick.
    pub fn regenerate(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        for pool in [&mut self.stamina, &mut self.mana] {
            pool.set(pool.current + pool.regen_per_second * delta);
        }
    }

    pub fn damage(&mut self, amount: f32) -> HealthChange {
        let before = self.health.current;
        self.health.set(before - amount.max(0.0));
        let applied = before - self.health.current;

        let died = self.alive && self.health.current <= 0.0;
        if died {
            self.alive = false;
        }

        HealthChange { applied, died }
    }

    /// Restore health. The dead stay dead.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.alive {
            return 0.0;
        }
        let before = self.health.current;
        self.health.set(before + amount.max(0.0));
        self.health.current - before
    }

    /// Adopt new maxima and regen rates, refilling every pool.
    pub fn apply_stats(&mut self, stats: &ClassStats) {
        self.health = Pool::new(stats.max_health, 0.0);
        self.stamina = Pool::new(stats.max_stamina, stats.stamina_regen);
        self.mana = Pool::new(stats.max_mana, stats.mana_regen);
    }

    /// Overwrite a pool's current value (clamped). Test and scripting helper.
    pub fn set_current(&mut self, kind: ResourceKind, value: f32) {
        self.get_mut(kind).set(value);
        if kind == ResourceKind::Health && value > 0.0 {
            self.alive = true;
        }
    }
}
