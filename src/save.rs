//! Save/load of the party roster
//!
//! The save file is a JSON array of character records. Saving overwrites the
//! whole file; loading validates every record and reports a missing file
//! separately from a corrupt one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::character::{Character, CharacterError, ClassTag, Inventory};

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("save file corrupted: {0}")]
    Corrupt(String),

    #[error("save file record {index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: CharacterError,
    },
}

impl SaveError {
    /// Whether the file exists but could not be understood
    pub fn is_corrupt(&self) -> bool {
        matches!(self, SaveError::Corrupt(_) | SaveError::InvalidRecord { .. })
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            SaveError::Io(e.into())
        } else {
            SaveError::Corrupt(e.to_string())
        }
    }
}

/// One stored character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterRecord {
    /// Class tag; an unknown tag fails deserialization
    pub class_name: ClassTag,
    pub name: String,
    pub health: i32,
    pub inventory: Inventory,
    pub base_damage: i32,
}

impl From<&Character> for CharacterRecord {
    fn from(c: &Character) -> Self {
        Self {
            class_name: c.class(),
            name: c.name().to_string(),
            health: c.health(),
            inventory: c.inventory().clone(),
            base_damage: c.base_damage(),
        }
    }
}

impl TryFrom<CharacterRecord> for Character {
    type Error = CharacterError;

    fn try_from(r: CharacterRecord) -> Result<Self, Self::Error> {
        Character::restore(r.name, r.class_name, r.health, r.inventory, r.base_damage)
    }
}

/// Roster persistence at a fixed path
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a full snapshot of the roster, replacing any previous save
    pub fn save(&self, roster: &[Character]) -> Result<(), SaveError> {
        let records: Vec<CharacterRecord> = roster.iter().map(CharacterRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)?;

        // Write to a sibling temp file first so a failed write keeps the old save
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        info!("Saved {} characters to {}", roster.len(), self.path.display());
        Ok(())
    }

    /// Load the roster; `Ok(None)` when no save file exists
    pub fn load(&self) -> Result<Option<Vec<Character>>, SaveError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No save file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let records: Vec<CharacterRecord> = serde_json::from_str(&json)?;
        let roster = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Character::try_from(record)
                    .map_err(|source| SaveError::InvalidRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Loaded {} characters from {}", roster.len(), self.path.display());
        Ok(Some(roster))
    }
}
