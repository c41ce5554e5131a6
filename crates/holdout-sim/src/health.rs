//! Combatant hit points.

use serde::{Deserialize, Serialize};

/// Result of a damage call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead; nothing changed.
    Ignored,
    /// Hit points dropped but the combatant lives.
    Damaged { remaining: u32 },
    /// This call took the combatant to zero. Returned once per lifetime.
    Killed,
}

/// Hit points of a damageable entity. Once dead, it stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
    alive: bool,
}

impl Health {
    /// Full health. `max` is clamped to at least 1.
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            alive: true,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    /// Current over max, in [0, 1].
    pub fn fraction(&self) -> f64 {
        f64::from(self.current) / f64::from(self.max)
    }

    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }
        self.current = self.current.saturating_sub(amount);
        if self.current == 0 {
            self.alive = false;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged {
                remaining: self.current,
            }
        }
    }

    /// Restore up to `amount`, never past max. Returns what was applied.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let healed = amount.min(self.max - self.current);
        self.current += healed;
        healed
    }
}
