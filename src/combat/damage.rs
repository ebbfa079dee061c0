//! Damage ranges
//!
//! Handles damage calculation with:
//! - Uniform damage ranges (attack rolls, traps, enemy hits)
//! - A non-negative floor on every applied amount

use std::fmt;

use super::dice::Dice;

/// Clamp a computed damage value to the non-negative floor.
///
/// Negative damage would heal the target.
pub fn clamp_damage(amount: i32) -> i32 {
    amount.max(0)
}

/// An inclusive range of damage values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRange {
    /// Lowest raw roll
    pub low: i32,
    /// Highest raw roll
    pub high: i32,
}

impl DamageRange {
    /// Create a new damage range
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// A range centred on `base` with the given spread on both sides
    pub const fn around(base: i32, spread: i32) -> Self {
        Self::new(base.saturating_sub(spread), base.saturating_add(spread))
    }

    /// Roll within the range, clamped to the damage floor
    pub fn roll(&self, dice: &mut Dice) -> i32 {
        clamp_damage(dice.range(self.low, self.high))
    }

    /// Smallest value [`roll`](Self::roll) can return
    pub fn min(&self) -> i32 {
        clamp_damage(self.low)
    }

    /// Largest value [`roll`](Self::roll) can return
    pub fn max(&self) -> i32 {
        clamp_damage(self.high.max(self.low))
    }

    /// Check if a value is a possible roll
    pub fn contains(&self, value: i32) -> bool {
        value >= self.min() && value <= self.max()
    }
}

impl fmt::Display for DamageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min(), self.max())
    }
}
