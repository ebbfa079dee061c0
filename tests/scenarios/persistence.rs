//! Persistence scenario tests
//!
//! Tests saving through the session menu, resuming a saved party, and
//! recovering from unreadable save files.

use std::fs;

use mystic::{ClassTag, GameEvent, Item, SaveStore};

use crate::harness::{character, party, TestGame};

/// Test: Saving from the menu writes a snapshot that loads back identically
#[test]
fn test_menu_save_round_trip() {
    let game = TestGame::new(41);
    let mut roster = party();
    roster[0].take_damage(33);
    roster[1].grant(Item::MagicSword);
    roster[1].use_potion();

    let mut session = game.session(roster.clone(), &["2", "3"]);
    session.run().unwrap();
    assert!(session.narrator().contains(&GameEvent::ProgressSaved));

    let loaded = SaveStore::new(game.save_path()).load().unwrap().unwrap();
    assert_eq!(loaded, roster);
    for (a, b) in loaded.iter().zip(&roster) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.class(), b.class());
        assert_eq!(a.health(), b.health());
        assert_eq!(a.inventory(), b.inventory());
        assert_eq!(a.base_damage(), b.base_damage());
    }
}

/// Test: Starting with a save file resumes that party without creation prompts
#[test]
fn test_start_resumes_saved_party() {
    let game = TestGame::new(42);
    let saved = vec![
        character("Vex", ClassTag::Rogue, 61, 15),
        character("Ilsa", ClassTag::Mage, 12, 25),
    ];
    SaveStore::new(game.save_path()).save(&saved).unwrap();

    let session = game.start(&["3"]).expect("session");
    assert_eq!(session.roster(), saved.as_slice());
    assert!(session.narrator().contains(&GameEvent::SaveLoaded));
}

/// Test: A corrupt save starts a new game and is replaced on the next save
#[test]
fn test_corrupt_save_falls_back_to_new_game() {
    let game = TestGame::new(43);
    fs::write(
        game.save_path(),
        r#"[{"class_name":"Necromancer","name":"Z","health":50,"inventory":{},"base_damage":9}]"#,
    )
    .unwrap();

    let mut session = game
        .start(&["Brom", "1", "Ilsa", "2", "2", "3"])
        .expect("session");
    assert!(session
        .narrator()
        .iter()
        .any(|e| matches!(e, GameEvent::SaveCorrupt { .. })));
    assert_eq!(session.roster().len(), 2);

    session.run().unwrap();

    let loaded = SaveStore::new(game.save_path()).load().unwrap().unwrap();
    assert_eq!(loaded[0].name(), "Brom");
    assert_eq!(loaded[1].class(), ClassTag::Mage);
}

/// Test: An empty saved roster is treated like no save at all
#[test]
fn test_empty_save_starts_new_game() {
    let game = TestGame::new(44);
    fs::write(game.save_path(), "[]").unwrap();

    let session = game.start(&["Solo", "3"]);
    // Default party size is 2 and input ran out before the second character
    assert!(session.is_none());
}
