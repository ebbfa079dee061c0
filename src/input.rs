//! Player input
//!
//! Every choice the game asks for goes through an [`ActionSource`].
//! [`ConsoleInput`] reads lines from any `BufRead`, re-prompting on
//! unrecognized input without consuming a turn.

use std::io::{self, BufRead, Cursor, Write};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::character::{Character, ClassTag};
use crate::combat::PlayerAction;
use crate::narrate::GameEvent;

/// Input errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid choice: {0:?}")]
    Invalid(String),

    #[error("input closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Session menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Explore,
    Save,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "explore" => Ok(MenuChoice::Explore),
            "2" | "save" => Ok(MenuChoice::Save),
            "3" | "exit" | "quit" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

/// Parse a turn action
pub fn parse_action(raw: &str) -> Result<PlayerAction, InputError> {
    raw.parse()
        .map_err(|_| InputError::Invalid(raw.trim().to_string()))
}

/// Parse a session menu choice
pub fn parse_menu(raw: &str) -> Result<MenuChoice, InputError> {
    raw.parse()
        .map_err(|_| InputError::Invalid(raw.trim().to_string()))
}

/// Parse a class by menu number or name
pub fn parse_class(raw: &str) -> Result<ClassTag, InputError> {
    match raw.trim() {
        "1" => Ok(ClassTag::Warrior),
        "2" => Ok(ClassTag::Mage),
        "3" => Ok(ClassTag::Rogue),
        other => other
            .parse()
            .map_err(|_| InputError::Invalid(other.to_string())),
    }
}

/// Parse a character name (must not be blank)
pub fn parse_name(raw: &str) -> Result<String, InputError> {
    let name = raw.trim();
    if name.is_empty() {
        Err(InputError::Invalid(String::new()))
    } else {
        Ok(name.to_string())
    }
}

/// Source of player decisions
pub trait ActionSource {
    /// Action for `actor` on their combat turn
    fn choose_action(&mut self, actor: &Character) -> Result<PlayerAction, InputError>;

    /// Next session menu choice
    fn choose_menu(&mut self) -> Result<MenuChoice, InputError>;

    /// Name for the character in party slot `slot` (0-based)
    fn choose_name(&mut self, slot: usize) -> Result<String, InputError>;

    /// Class for a new character
    fn choose_class(&mut self, name: &str) -> Result<ClassTag, InputError>;
}

/// Line-based input with prompts written to `W`
pub struct ConsoleInput<R, W> {
    reader: R,
    prompt_out: W,
    rejected: usize,
}

/// Input replayed from fixed lines, with prompts discarded
pub type ScriptedInput = ConsoleInput<Cursor<Vec<u8>>, io::Sink>;

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self {
            reader,
            prompt_out,
            rejected: 0,
        }
    }

    /// Number of lines rejected as invalid so far
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Show `menu`, then read lines until `parse` accepts one
    fn prompt<T>(
        &mut self,
        menu: &[String],
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T, InputError> {
        loop {
            for line in menu {
                writeln!(self.prompt_out, "{}", line)?;
            }
            write!(self.prompt_out, "> ")?;
            self.prompt_out.flush()?;

            let mut raw = String::new();
            if self.reader.read_line(&mut raw)? == 0 {
                return Err(InputError::Closed);
            }

            match parse(&raw) {
                Err(InputError::Invalid(bad)) => {
                    debug!("Rejected input {:?}", bad);
                    self.rejected += 1;
                    writeln!(self.prompt_out, "\n{}\n", GameEvent::InvalidInput)?;
                }
                other => return other,
            }
        }
    }
}

impl ScriptedInput {
    /// Replay the given lines in order
    pub fn scripted<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut buf = String::new();
        for line in lines {
            buf.push_str(line.as_ref());
            buf.push('\n');
        }
        Self::new(Cursor::new(buf.into_bytes()), io::sink())
    }
}

impl<R: BufRead, W: Write> ActionSource for ConsoleInput<R, W> {
    fn choose_action(&mut self, actor: &Character) -> Result<PlayerAction, InputError> {
        let mut menu = vec![
            format!("\n{}'s Turn:", actor.name()),
            "Choose your action:".to_string(),
        ];
        for (i, action) in PlayerAction::ALL.iter().enumerate() {
            menu.push(format!("{}. {}", i + 1, action));
        }
        self.prompt(&menu, parse_action)
    }

    fn choose_menu(&mut self) -> Result<MenuChoice, InputError> {
        let menu = [
            "\nWhat would you like to do?".to_string(),
            "1. Explore".to_string(),
            "2. Save Progress".to_string(),
            "3. Exit".to_string(),
        ];
        self.prompt(&menu, parse_menu)
    }

    fn choose_name(&mut self, slot: usize) -> Result<String, InputError> {
        let menu = [format!("Enter Player {}'s name:", slot + 1)];
        self.prompt(&menu, parse_name)
    }

    fn choose_class(&mut self, name: &str) -> Result<ClassTag, InputError> {
        let mut menu = vec![format!("\nChoose a class for {}:", name)];
        for (i, class) in ClassTag::ALL.iter().enumerate() {
            menu.push(format!("{}. {} - {}", i + 1, class, class.profile().blurb));
        }
        self.prompt(&menu, parse_class)
    }
}
