//! Exploration
//!
//! Each exploration step either starts an encounter or applies a
//! non-combat event (treasure, trap, or nothing) to the party.

use tracing::{debug, info};

use crate::character::{Character, Item};
use crate::combat::{CombatState, DamageRange, Dice, Encounter};
use crate::input::{ActionSource, InputError};
use crate::narrate::{GameEvent, Narrator};

/// Default probability that a step leads to combat
pub const DEFAULT_ENCOUNTER_CHANCE: f64 = 0.6;

/// Damage dealt by a trap
pub const TRAP_DAMAGE: DamageRange = DamageRange::new(10, 20);

/// Non-combat events, drawn uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    Treasure,
    Trap,
    Nothing,
}

impl WorldEvent {
    pub const ALL: [WorldEvent; 3] = [WorldEvent::Treasure, WorldEvent::Trap, WorldEvent::Nothing];
}

/// What one exploration step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorationOutcome {
    /// An encounter was fought to the given end state
    Combat(CombatState),
    /// Roster member `recipient` found `item`
    Treasure { recipient: usize, item: Item },
    /// Roster member `victim` triggered a trap rolling `damage`
    Trap { victim: usize, damage: i32 },
    Nothing,
}

impl ExplorationOutcome {
    /// Whether the party was wiped out
    pub fn is_team_wiped(&self) -> bool {
        matches!(self, ExplorationOutcome::Combat(CombatState::TeamWiped))
    }
}

/// Exploration engine
#[derive(Debug, Clone, Copy)]
pub struct Explorer {
    encounter_chance: f64,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(DEFAULT_ENCOUNTER_CHANCE)
    }
}

impl Explorer {
    pub fn new(encounter_chance: f64) -> Self {
        Self {
            encounter_chance: encounter_chance.clamp(0.0, 1.0),
        }
    }

    pub fn encounter_chance(&self) -> f64 {
        self.encounter_chance
    }

    /// Take one exploration step
    pub fn explore(
        &self,
        roster: &mut [Character],
        input: &mut dyn ActionSource,
        narrator: &mut dyn Narrator,
        dice: &mut Dice,
    ) -> Result<ExplorationOutcome, InputError> {
        narrator.narrate(GameEvent::Exploring);

        if dice.chance(self.encounter_chance) {
            let mut encounter = Encounter::spawn(dice);
            let state = encounter.run(roster, input, narrator, dice)?;
            return Ok(ExplorationOutcome::Combat(state));
        }

        let event = dice
            .pick(&WorldEvent::ALL)
            .copied()
            .unwrap_or(WorldEvent::Nothing);
        debug!("Exploration event: {:?}", event);
        Ok(self.apply(event, roster, narrator, dice))
    }

    /// Apply a non-combat event to a random party member
    pub fn apply(
        &self,
        event: WorldEvent,
        roster: &mut [Character],
        narrator: &mut dyn Narrator,
        dice: &mut Dice,
    ) -> ExplorationOutcome {
        let target = match event {
            WorldEvent::Nothing => None,
            _ => dice.index(roster.len()),
        };

        let outcome = match (event, target) {
            (WorldEvent::Treasure, Some(recipient)) => {
                let item = Item::random_loot(dice);
                let character = &mut roster[recipient];
                character.grant(item);
                narrator.narrate(GameEvent::Treasure {
                    name: character.name().to_string(),
                    item,
                });
                ExplorationOutcome::Treasure { recipient, item }
            }
            (WorldEvent::Trap, Some(victim)) => {
                let damage = TRAP_DAMAGE.roll(dice);
                let character = &mut roster[victim];
                let lost = character.take_damage(damage);
                narrator.narrate(GameEvent::Trap {
                    name: character.name().to_string(),
                    damage,
                });
                if lost > 0 && character.is_defeated() {
                    narrator.narrate(GameEvent::CharacterDefeated {
                        name: character.name().to_string(),
                    });
                }
                ExplorationOutcome::Trap { victim, damage }
            }
            _ => {
                narrator.narrate(GameEvent::NothingFound);
                ExplorationOutcome::Nothing
            }
        };

        info!("Exploration outcome: {:?}", outcome);
        outcome
    }
}
