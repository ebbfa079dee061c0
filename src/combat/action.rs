//! Action resolution
//!
//! Turns one [`PlayerAction`] into its numeric outcome and applies it to the
//! acting character and the enemy.

use std::fmt;
use std::str::FromStr;

use super::dice::Dice;
use crate::character::{Character, Enemy, PotionOutcome, SpecialOutcome};

/// What a character does on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Attack,
    UsePotion,
    Special,
    Pass,
}

impl PlayerAction {
    /// All actions, in menu order
    pub const ALL: [PlayerAction; 4] = [
        PlayerAction::Attack,
        PlayerAction::UsePotion,
        PlayerAction::Special,
        PlayerAction::Pass,
    ];
}

impl FromStr for PlayerAction {
    type Err = ();

    /// Accepts the menu number or the action word
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "attack" => Ok(PlayerAction::Attack),
            "2" | "potion" | "use potion" => Ok(PlayerAction::UsePotion),
            "3" | "special" | "ability" => Ok(PlayerAction::Special),
            "4" | "pass" => Ok(PlayerAction::Pass),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerAction::Attack => "Attack",
            PlayerAction::UsePotion => "Use Potion",
            PlayerAction::Special => "Use Special Ability",
            PlayerAction::Pass => "Pass",
        };
        f.write_str(s)
    }
}

/// The resolved effect of one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Basic attack landed for `damage`
    Hit { damage: i32 },
    /// Potion attempt
    Potion(PotionOutcome),
    /// Special ability that damaged the enemy
    SpecialHit { damage: i32 },
    /// Special ability that blocks the enemy's counter-attack
    Block,
    Passed,
}

impl ActionOutcome {
    /// Whether the enemy skips its counter-attack against the actor
    pub fn blocks_retaliation(&self) -> bool {
        matches!(self, ActionOutcome::Block)
    }

    /// Damage dealt to the enemy, if any
    pub fn damage_dealt(&self) -> Option<i32> {
        match self {
            ActionOutcome::Hit { damage } | ActionOutcome::SpecialHit { damage } => Some(*damage),
            _ => None,
        }
    }
}

/// Resolve an action, mutating the actor and the enemy
pub fn resolve(
    action: PlayerAction,
    actor: &mut Character,
    enemy: &mut Enemy,
    dice: &mut Dice,
) -> ActionOutcome {
    match action {
        PlayerAction::Attack => {
            let damage = actor.attack(dice);
            enemy.take_damage(damage);
            ActionOutcome::Hit { damage }
        }
        PlayerAction::UsePotion => ActionOutcome::Potion(actor.use_potion()),
        PlayerAction::Special => match actor.special_ability(dice) {
            SpecialOutcome::Block => ActionOutcome::Block,
            SpecialOutcome::Damage(damage) => {
                enemy.take_damage(damage);
                ActionOutcome::SpecialHit { damage }
            }
        },
        PlayerAction::Pass => ActionOutcome::Passed,
    }
}
