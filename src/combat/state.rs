//! Combat state tracking
//!
//! Drives one encounter between the party and a single enemy:
//! - Round-robin turns over the living roster
//! - Action resolution and enemy retaliation
//! - Victory (with loot) and team-wipe detection

use tracing::{debug, info};

use super::action::{resolve, ActionOutcome, PlayerAction};
use super::dice::Dice;
use crate::character::{Character, Enemy, Item, PotionOutcome, SpecialOutcome};
use crate::input::{ActionSource, InputError};
use crate::narrate::{GameEvent, Narrator};

/// Where an encounter stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    InProgress,
    /// Enemy defeated; `looter` (roster index) received `loot`
    Victory { looter: usize, loot: Item },
    /// Every character is at 0 health
    TeamWiped,
}

impl CombatState {
    /// Whether the encounter is over
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CombatState::InProgress)
    }
}

/// One encounter, from spawn to victory or team wipe
#[derive(Debug, Clone)]
pub struct Encounter {
    enemy: Enemy,
    state: CombatState,
    turns: u32,
}

impl Encounter {
    /// Start an encounter against the given enemy
    pub fn new(enemy: Enemy) -> Self {
        Self {
            enemy,
            state: CombatState::InProgress,
            turns: 0,
        }
    }

    /// Start an encounter against a freshly spawned enemy
    pub fn spawn(dice: &mut Dice) -> Self {
        Self::new(Enemy::spawn(dice))
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Number of character turns taken so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Run the encounter to completion, asking `input` for each action
    pub fn run(
        &mut self,
        roster: &mut [Character],
        input: &mut dyn ActionSource,
        narrator: &mut dyn Narrator,
        dice: &mut Dice,
    ) -> Result<CombatState, InputError> {
        info!(
            "Encounter started: {} with {} HP, hits up to {}",
            self.enemy.kind(),
            self.enemy.health(),
            self.enemy.damage()
        );
        narrator.narrate(GameEvent::EnemyAppeared {
            enemy: self.enemy.kind(),
            health: self.enemy.health(),
        });

        while !self.state.is_terminal() {
            if roster.iter().all(Character::is_defeated) {
                self.finish(CombatState::TeamWiped, narrator);
                break;
            }

            for idx in 0..roster.len() {
                if roster[idx].is_defeated() {
                    continue;
                }

                narrator.narrate(GameEvent::TurnStarted {
                    actor: roster[idx].name().to_string(),
                });
                let action = input.choose_action(&roster[idx])?;
                if self.take_turn(roster, idx, action, narrator, dice).is_terminal() {
                    break;
                }
            }
        }

        Ok(self.state)
    }

    /// Play one character's turn: resolve, check for victory, retaliate,
    /// check for a team wipe.
    ///
    /// Turns on a finished encounter or a defeated character change nothing.
    pub fn take_turn(
        &mut self,
        roster: &mut [Character],
        idx: usize,
        action: PlayerAction,
        narrator: &mut dyn Narrator,
        dice: &mut Dice,
    ) -> CombatState {
        if self.state.is_terminal() {
            return self.state;
        }
        let Some(actor) = roster.get_mut(idx) else {
            return self.state;
        };
        if actor.is_defeated() {
            return self.state;
        }

        self.turns += 1;
        let outcome = resolve(action, actor, &mut self.enemy, dice);
        debug!("{} chose {}: {:?}", actor.name(), action, outcome);
        narrator.narrate(self.describe(actor, outcome));

        if self.enemy.is_defeated() {
            let loot = Item::random_loot(dice);
            actor.grant(loot);
            narrator.narrate(GameEvent::EnemyDefeated {
                enemy: self.enemy.kind(),
            });
            narrator.narrate(GameEvent::LootFound {
                actor: actor.name().to_string(),
                item: loot,
            });
            self.finish(CombatState::Victory { looter: idx, loot }, narrator);
            return self.state;
        }

        if !outcome.blocks_retaliation() {
            let hit = self.enemy.attack(dice);
            actor.take_damage(hit);
            narrator.narrate(GameEvent::Retaliation {
                enemy: self.enemy.kind(),
                target: actor.name().to_string(),
                damage: hit,
                health: actor.health(),
            });
            if actor.is_defeated() {
                narrator.narrate(GameEvent::CharacterDefeated {
                    name: actor.name().to_string(),
                });
            }
        }

        if roster.iter().all(Character::is_defeated) {
            self.finish(CombatState::TeamWiped, narrator);
        }
        self.state
    }

    fn describe(&self, actor: &Character, outcome: ActionOutcome) -> GameEvent {
        let name = actor.name().to_string();
        match outcome {
            ActionOutcome::Hit { damage } => GameEvent::Attacked {
                actor: name,
                enemy: self.enemy.kind(),
                damage,
                enemy_health: self.enemy.health(),
            },
            ActionOutcome::Potion(PotionOutcome::Healed { restored }) => GameEvent::PotionUsed {
                actor: name,
                restored,
            },
            ActionOutcome::Potion(PotionOutcome::NoPotions) => GameEvent::NoPotions { actor: name },
            ActionOutcome::Block => self.special(actor, SpecialOutcome::Block),
            ActionOutcome::SpecialHit { damage } => {
                self.special(actor, SpecialOutcome::Damage(damage))
            }
            ActionOutcome::Passed => GameEvent::Passed { actor: name },
        }
    }

    fn special(&self, actor: &Character, outcome: SpecialOutcome) -> GameEvent {
        GameEvent::SpecialUsed {
            actor: actor.name().to_string(),
            ability: actor.class().profile().ability,
            outcome,
            enemy_health: self.enemy.health(),
        }
    }

    fn finish(&mut self, state: CombatState, narrator: &mut dyn Narrator) {
        if state == CombatState::TeamWiped {
            narrator.narrate(GameEvent::TeamWiped);
        }
        info!("Encounter with {} ended: {:?}", self.enemy.kind(), state);
        self.state = state;
    }
}
