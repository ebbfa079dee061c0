//! mystic - Legends of the Mystic Lands
//!
//! A turn-based text adventure: a party explores, fights enemies with
//! class-specific abilities, collects loot and saves its progress.

pub mod character;
pub mod combat;
pub mod config;
pub mod explore;
pub mod input;
pub mod narrate;
pub mod save;
pub mod session;

pub use character::{Character, ClassTag, Enemy, EnemyKind, Item, MAX_HEALTH};
pub use combat::{CombatState, Dice, Encounter, PlayerAction};
pub use config::Config;
pub use explore::{ExplorationOutcome, Explorer};
pub use input::{ActionSource, ConsoleInput, InputError, MenuChoice, ScriptedInput};
pub use narrate::{ConsoleNarrator, GameEvent, Narrator};
pub use save::{SaveError, SaveStore};
pub use session::{Session, SessionEnd};
