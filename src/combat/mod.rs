//! Combat system module
//!
//! Implements turn-based party combat with:
//! - A seedable dice source shared by every random draw
//! - Damage ranges clamped to a non-negative floor
//! - Action resolution (attack, potion, class special, pass)
//! - The encounter state machine (in progress, victory, team wiped)

mod action;
mod damage;
mod dice;
mod state;

pub use action::{resolve, ActionOutcome, PlayerAction};
pub use damage::{clamp_damage, DamageRange};
pub use dice::Dice;
pub use state::{CombatState, Encounter};
