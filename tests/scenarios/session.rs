//! Session scenario tests
//!
//! Tests the menu loop: party creation, invalid input, and how sessions end.

use mystic::{ClassTag, GameEvent, SaveStore, SessionEnd};

use crate::harness::{bare, party, TestGame};

/// Test: A brand new game creates the party, saves, and exits
#[test]
fn test_new_game_flow() {
    let game = TestGame::new(51);

    let mut session = game
        .start(&["Brom", "warrior", "Ilsa", "2", "2", "3"])
        .expect("session");
    assert!(session.narrator().contains(&GameEvent::NoSaveFound));
    assert_eq!(session.roster()[0].class(), ClassTag::Warrior);
    assert_eq!(session.roster()[1].class(), ClassTag::Mage);

    assert_eq!(session.run().unwrap(), SessionEnd::Quit);
    let loaded = SaveStore::new(game.save_path()).load().unwrap().unwrap();
    assert_eq!(loaded.len(), 2);
}

/// Test: Invalid menu input is rejected and re-prompted without state change
#[test]
fn test_invalid_menu_input_reprompts() {
    let game = TestGame::new(52);
    let roster = party();

    let mut session = game.session(roster.clone(), &["9", "dance", "", "3"]);
    assert_eq!(session.run().unwrap(), SessionEnd::Quit);

    assert_eq!(session.input().rejected(), 3);
    assert_eq!(session.roster(), roster.as_slice());
    assert!(!game.save_path().exists());
}

/// Test: Invalid class choices are re-prompted during creation
#[test]
fn test_invalid_class_reprompts() {
    let game = TestGame::new(53);

    let session = game
        .start(&["Brom", "bard", "7", "3", "Ilsa", "1"])
        .expect("session");
    assert_eq!(session.input().rejected(), 2);
    assert_eq!(session.roster()[0].class(), ClassTag::Rogue);
    assert_eq!(session.roster()[1].class(), ClassTag::Warrior);
}

/// Test: A team wipe ends the session and leaves later input unread
#[test]
fn test_team_wipe_ends_session() {
    let game = TestGame::new(54).with_encounter_chance(1.0);
    let roster = vec![
        bare("A", ClassTag::Rogue, 1, 15),
        bare("B", ClassTag::Rogue, 1, 15),
    ];

    let mut session = game.session(roster, &["1", "4", "4", "2", "3"]);
    assert_eq!(session.run().unwrap(), SessionEnd::TeamWiped);

    assert!(session.roster().iter().all(|c| c.health() == 0));
    assert_eq!(session.narrator().last(), Some(&GameEvent::TeamWiped));
    // The save line after the wipe was never acted on
    assert!(!game.save_path().exists());
}

/// Test: Input ending mid-fight ends the session quietly
#[test]
fn test_input_closed_mid_fight() {
    let game = TestGame::new(55).with_encounter_chance(1.0);
    let mut session = game.session(party(), &["1"]);
    assert_eq!(session.run().unwrap(), SessionEnd::Quit);
}
