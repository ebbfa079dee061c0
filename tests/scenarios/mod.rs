//! Scenario Tests for Legends of the Mystic Lands
//!
//! Play test scenarios covering:
//! - Combat: encounters to victory and team wipe
//! - Exploration: non-combat events and health bounds
//! - Persistence: save/load round trips and corrupt saves
//! - Session: menu loop, party creation, and session endings

pub mod combat;
pub mod persistence;
pub mod session;
