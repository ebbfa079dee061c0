//! Narration of game events
//!
//! The engines report what happened as [`GameEvent`]s; a [`Narrator`]
//! decides how to show them.

use std::fmt;
use std::io::Write;

use tracing::warn;

use crate::character::{EnemyKind, Item, SpecialOutcome};

/// Something that happened in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Exploring,
    EnemyAppeared { enemy: EnemyKind, health: i32 },
    TurnStarted { actor: String },
    Attacked { actor: String, enemy: EnemyKind, damage: i32, enemy_health: i32 },
    PotionUsed { actor: String, restored: i32 },
    NoPotions { actor: String },
    /// A class special ability, named by the class table
    SpecialUsed { actor: String, ability: &'static str, outcome: SpecialOutcome, enemy_health: i32 },
    Passed { actor: String },
    EnemyDefeated { enemy: EnemyKind },
    LootFound { actor: String, item: Item },
    Retaliation { enemy: EnemyKind, target: String, damage: i32, health: i32 },
    CharacterDefeated { name: String },
    TeamWiped,
    Treasure { name: String, item: Item },
    Trap { name: String, damage: i32 },
    NothingFound,
    ProgressSaved,
    SaveFailed { reason: String },
    SaveLoaded,
    NoSaveFound,
    SaveCorrupt { reason: String },
    InvalidInput,
    Farewell,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Exploring => write!(f, "You are exploring the Mystic Lands..."),
            GameEvent::EnemyAppeared { enemy, health } => {
                write!(f, "A wild {} appeared! It has {} HP.", enemy, health)
            }
            GameEvent::TurnStarted { actor } => write!(f, "{}'s Turn:", actor),
            GameEvent::Attacked {
                actor,
                enemy,
                damage,
                enemy_health,
            } => write!(
                f,
                "{} dealt {} damage to the {}. Its health is now {}.",
                actor, damage, enemy, enemy_health
            ),
            GameEvent::PotionUsed { actor, restored } => {
                write!(f, "{} used a Potion! Restored {} health.", actor, restored)
            }
            GameEvent::NoPotions { actor } => write!(f, "{} has no Potions left!", actor),
            GameEvent::SpecialUsed {
                actor,
                ability,
                outcome,
                enemy_health,
            } => match outcome {
                SpecialOutcome::Block => write!(
                    f,
                    "[Special Ability: {}] {} blocks the next attack completely!",
                    ability, actor
                ),
                SpecialOutcome::Damage(damage) => write!(
                    f,
                    "[Special Ability: {}] {} dealt {} damage! Enemy health is now {}.",
                    ability, actor, damage, enemy_health
                ),
            },
            GameEvent::Passed { actor } => write!(f, "{} passed their turn.", actor),
            GameEvent::EnemyDefeated { enemy } => write!(f, "You defeated the {}!", enemy),
            GameEvent::LootFound { actor, item } => {
                write!(f, "{} found {} in the loot!", actor, item)
            }
            GameEvent::Retaliation {
                enemy,
                target,
                damage,
                health,
            } => write!(
                f,
                "The {} attacked {} for {}! Their health is now {}.",
                enemy, target, damage, health
            ),
            GameEvent::CharacterDefeated { name } => write!(f, "{} has been defeated!", name),
            GameEvent::TeamWiped => write!(f, "Your entire team has been defeated! Game over."),
            GameEvent::Treasure { name, item } => write!(f, "{} found a {}!", name, item),
            GameEvent::Trap { name, damage } => {
                write!(f, "{} triggered a trap and lost {} health!", name, damage)
            }
            GameEvent::NothingFound => write!(f, "You found nothing this time."),
            GameEvent::ProgressSaved => write!(f, "Progress saved!"),
            GameEvent::SaveFailed { reason } => write!(f, "Could not save progress: {}", reason),
            GameEvent::SaveLoaded => write!(f, "Saved progress found! Loading game..."),
            GameEvent::NoSaveFound => {
                write!(f, "No saved progress found. Starting a new game...")
            }
            GameEvent::SaveCorrupt { reason } => write!(
                f,
                "Saved progress is unreadable ({}). Starting a new game...",
                reason
            ),
            GameEvent::InvalidInput => write!(f, "Invalid choice. Try again."),
            GameEvent::Farewell => write!(f, "Goodbye, adventurers!"),
        }
    }
}

/// A sink for game events and free-form lines
pub trait Narrator {
    /// Report a game event
    fn narrate(&mut self, event: GameEvent);

    /// Show a line that is not a game event (menus, status blocks)
    fn line(&mut self, _text: &str) {}
}

/// Records events in memory
impl Narrator for Vec<GameEvent> {
    fn narrate(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Writes every event as a line of text
#[derive(Debug)]
pub struct ConsoleNarrator<W: Write> {
    out: W,
}

impl<W: Write> ConsoleNarrator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the narrator, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("Failed to write narration: {}", e);
        }
    }
}

impl<W: Write> Narrator for ConsoleNarrator<W> {
    fn narrate(&mut self, event: GameEvent) {
        self.write_line(&event.to_string());
    }

    fn line(&mut self, text: &str) {
        self.write_line(text);
    }
}
