//! Session controller
//!
//! Owns the roster for one play session:
//! - Load a saved party or create a new one
//! - Show party status and read menu choices
//! - Dispatch to exploration and persistence
//! - End on exit, closed input, or a team wipe

use anyhow::Result;
use tracing::{info, warn};

use crate::character::Character;
use crate::combat::Dice;
use crate::config::Config;
use crate::explore::Explorer;
use crate::input::{ActionSource, InputError, MenuChoice};
use crate::narrate::{GameEvent, Narrator};
use crate::save::SaveStore;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player chose to exit, or input ran out
    Quit,
    /// Every character was defeated in combat
    TeamWiped,
}

/// A play session
pub struct Session<I, N> {
    roster: Vec<Character>,
    dice: Dice,
    explorer: Explorer,
    store: SaveStore,
    input: I,
    narrator: N,
}

impl<I: ActionSource, N: Narrator> Session<I, N> {
    /// Start a session: resume the saved party or create a new one.
    ///
    /// Returns `Ok(None)` if input closed during character creation.
    pub fn start(config: &Config, mut input: I, mut narrator: N) -> Result<Option<Self>> {
        config.validate()?;
        let store = SaveStore::new(&config.save_path);
        let dice = Dice::from_seed(config.seed);

        let loaded = match store.load() {
            Ok(Some(roster)) if !roster.is_empty() => Some(roster),
            Ok(_) => None,
            Err(e) if e.is_corrupt() => {
                warn!("Ignoring corrupt save {}: {}", store.path().display(), e);
                narrator.narrate(GameEvent::SaveCorrupt {
                    reason: e.to_string(),
                });
                None
            }
            Err(e) => return Err(e.into()),
        };

        let roster = match loaded {
            Some(roster) => {
                narrator.narrate(GameEvent::SaveLoaded);
                roster
            }
            None => {
                if store.path().exists() {
                    info!("Starting new game over unusable save");
                } else {
                    narrator.narrate(GameEvent::NoSaveFound);
                }
                match create_party(config.party_size, &mut input)? {
                    Some(roster) => roster,
                    None => return Ok(None),
                }
            }
        };

        info!("Session started with {} characters", roster.len());

        Ok(Some(Self {
            roster,
            dice,
            explorer: Explorer::new(config.encounter_chance),
            store,
            input,
            narrator,
        }))
    }

    /// Resume a session with an existing roster
    pub fn with_roster(config: &Config, roster: Vec<Character>, input: I, narrator: N) -> Self {
        Self {
            roster,
            dice: Dice::from_seed(config.seed),
            explorer: Explorer::new(config.encounter_chance),
            store: SaveStore::new(&config.save_path),
            input,
            narrator,
        }
    }

    pub fn roster(&self) -> &[Character] {
        &self.roster
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Run the menu loop until the session ends
    pub fn run(&mut self) -> Result<SessionEnd> {
        loop {
            self.show_status();

            let choice = match self.input.choose_menu() {
                Ok(choice) => choice,
                Err(InputError::Closed) => {
                    info!("Input closed, ending session");
                    return Ok(SessionEnd::Quit);
                }
                Err(e) => return Err(e.into()),
            };

            if let Some(end) = self.step(choice)? {
                return Ok(end);
            }
        }
    }

    /// Handle one menu choice; `Some` when the session is over
    pub fn step(&mut self, choice: MenuChoice) -> Result<Option<SessionEnd>> {
        match choice {
            MenuChoice::Explore => {
                let outcome = match self.explorer.explore(
                    &mut self.roster,
                    &mut self.input,
                    &mut self.narrator,
                    &mut self.dice,
                ) {
                    Ok(outcome) => outcome,
                    Err(InputError::Closed) => return Ok(Some(SessionEnd::Quit)),
                    Err(e) => return Err(e.into()),
                };
                if outcome.is_team_wiped() {
                    info!("Party defeated, session over");
                    return Ok(Some(SessionEnd::TeamWiped));
                }
                Ok(None)
            }
            MenuChoice::Save => {
                match self.store.save(&self.roster) {
                    Ok(()) => self.narrator.narrate(GameEvent::ProgressSaved),
                    Err(e) => {
                        warn!("Save failed: {}", e);
                        self.narrator.narrate(GameEvent::SaveFailed {
                            reason: e.to_string(),
                        });
                    }
                }
                Ok(None)
            }
            MenuChoice::Exit => {
                self.narrator.narrate(GameEvent::Farewell);
                Ok(Some(SessionEnd::Quit))
            }
        }
    }

    fn show_status(&mut self) {
        for character in &self.roster {
            self.narrator.line(&format!("\n{}", character));
        }
    }
}

/// Ask for a name and class for each party slot.
///
/// Returns `Ok(None)` if input closes before the party is complete.
pub fn create_party(size: usize, input: &mut dyn ActionSource) -> Result<Option<Vec<Character>>> {
    let mut roster = Vec::with_capacity(size);
    for slot in 0..size {
        let name = match input.choose_name(slot) {
            Ok(name) => name,
            Err(InputError::Closed) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let class = match input.choose_class(&name) {
            Ok(class) => class,
            Err(InputError::Closed) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        info!("Created {} the {}", name, class);
        roster.push(Character::new(name, class)?);
    }
    Ok(Some(roster))
}
