//! Combat scenario tests
//!
//! Tests encounters driven through scripted input: victory, loot,
//! retaliation, blocking, and team wipes.

use mystic::character::{starting_inventory, SpecialOutcome};
use mystic::{
    ActionSource, ClassTag, CombatState, Dice, Encounter, Enemy, EnemyKind, GameEvent,
    PlayerAction, ScriptedInput, MAX_HEALTH,
};

use crate::harness::{bare, character, item_total, party};

/// Test: Mage fireball finishes a 50 HP enemy on the first turn
#[test]
fn test_mage_fireball_victory() {
    let mut dice = Dice::seeded(21);
    let mut roster = vec![character("Ilsa", ClassTag::Mage, 80, 25)];
    let mut input = ScriptedInput::scripted(&["3"]);
    let mut events: Vec<GameEvent> = Vec::new();
    let mut encounter = Encounter::new(Enemy::new(EnemyKind::Goblin, 50, 20));

    let state = encounter
        .run(&mut roster, &mut input, &mut events, &mut dice)
        .unwrap();

    assert!(matches!(state, CombatState::Victory { looter: 0, .. }));
    assert_eq!(encounter.enemy().health(), 0);
    assert_eq!(roster[0].health(), 80);
    assert_eq!(
        item_total(&roster[0]),
        starting_inventory().values().sum::<u32>() + 1
    );
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::Retaliation { .. })));
}

/// Test: Attacks that always deal at least 15 beat a 60 HP enemy within 4 turns
#[test]
fn test_attacks_win_within_bound() {
    for seed in 0..20 {
        let mut dice = Dice::seeded(seed);
        let mut roster = vec![character("Brom", ClassTag::Warrior, 100, 20)];
        let mut input = ScriptedInput::scripted(&["1"; 4]);
        let mut events: Vec<GameEvent> = Vec::new();
        let mut encounter = Encounter::new(Enemy::new(EnemyKind::Orc, 60, 5));

        let state = encounter
            .run(&mut roster, &mut input, &mut events, &mut dice)
            .unwrap();

        let CombatState::Victory { looter, loot } = state else {
            panic!("seed {}: expected victory, got {:?}", seed, state);
        };
        assert_eq!(looter, 0);
        assert!(encounter.turns() <= 4);
        assert_eq!(
            roster[0].item_count(loot),
            starting_inventory().get(&loot).copied().unwrap_or(0) + 1
        );
        // Every turn but the last drew a 5-point retaliation
        assert_eq!(
            roster[0].health(),
            100 - 5 * (encounter.turns() as i32 - 1)
        );
    }
}

/// Test: Party at low health passing every turn is wiped, and no further
/// input is read after the wipe
#[test]
fn test_team_wipe_stops_reading_input() {
    let mut dice = Dice::seeded(3);
    let mut roster = vec![
        bare("A", ClassTag::Rogue, 5, 15),
        bare("B", ClassTag::Rogue, 5, 15),
    ];
    let mut input = ScriptedInput::scripted(&["4", "4", "1"]);
    let mut events: Vec<GameEvent> = Vec::new();
    let mut encounter = Encounter::new(Enemy::new(EnemyKind::Troll, 100, 5));

    let state = encounter
        .run(&mut roster, &mut input, &mut events, &mut dice)
        .unwrap();

    assert_eq!(state, CombatState::TeamWiped);
    assert!(roster.iter().all(|c| c.health() == 0));
    assert_eq!(encounter.turns(), 2);

    // The third line is still waiting
    let leftover = input.choose_action(&roster[0]).unwrap();
    assert_eq!(leftover, PlayerAction::Attack);
}

/// Test: Warrior shield block takes no damage on that turn
#[test]
fn test_warrior_block_in_encounter() {
    let mut dice = Dice::seeded(8);
    let mut roster = party();
    let mut input = ScriptedInput::scripted(&["3", "3"]);
    let mut events: Vec<GameEvent> = Vec::new();
    let mut encounter = Encounter::new(Enemy::new(EnemyKind::Skeleton, 50, 25));

    let state = encounter
        .run(&mut roster, &mut input, &mut events, &mut dice)
        .unwrap();

    assert!(matches!(state, CombatState::Victory { looter: 1, .. }));
    assert_eq!(roster[0].health(), MAX_HEALTH);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::SpecialUsed {
            actor,
            ability: "Shield Block",
            outcome: SpecialOutcome::Block,
            ..
        } if actor == "Brom"
    )));
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::Retaliation { .. })));
}

/// Test: A character defeated mid-round is skipped in later rounds
#[test]
fn test_defeated_character_skipped() {
    let mut dice = Dice::seeded(5);
    let mut roster = vec![
        bare("Frail", ClassTag::Rogue, 5, 15),
        character("Ilsa", ClassTag::Mage, 80, 25),
    ];
    let mut input = ScriptedInput::scripted(&["4", "3", "3"]);
    let mut events: Vec<GameEvent> = Vec::new();
    let mut encounter = Encounter::new(Enemy::new(EnemyKind::Orc, 100, 5));

    let state = encounter
        .run(&mut roster, &mut input, &mut events, &mut dice)
        .unwrap();

    assert!(matches!(state, CombatState::Victory { looter: 1, .. }));
    assert_eq!(encounter.turns(), 3);
    assert_eq!(roster[0].health(), 0);
    assert_eq!(roster[1].health(), 75);
    assert!(events.contains(&GameEvent::CharacterDefeated {
        name: "Frail".into()
    }));
    let frail_turns = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TurnStarted { actor } if actor == "Frail"))
        .count();
    assert_eq!(frail_turns, 1);
}

/// Test: Potions heal within bounds and run out cleanly mid-fight
#[test]
fn test_potion_use_in_encounter() {
    let mut dice = Dice::seeded(6);
    let mut roster = vec![character("Vex", ClassTag::Rogue, 40, 15)];
    let mut input = ScriptedInput::scripted(&["2", "2", "3", "3", "3", "3", "3", "3"]);
    let mut events: Vec<GameEvent> = Vec::new();
    let mut encounter = Encounter::new(Enemy::new(EnemyKind::Goblin, 60, 5));

    encounter
        .run(&mut roster, &mut input, &mut events, &mut dice)
        .unwrap();

    assert!(events.contains(&GameEvent::PotionUsed {
        actor: "Vex".into(),
        restored: 30
    }));
    assert!(events.contains(&GameEvent::NoPotions {
        actor: "Vex".into()
    }));
    assert!((0..=MAX_HEALTH).contains(&roster[0].health()));
}

/// Test: Random encounters keep every health value in bounds
#[test]
fn test_random_encounters_keep_health_bounds() {
    for seed in 0..30 {
        let mut dice = Dice::seeded(seed);
        let mut roster = party();
        let mut input = ScriptedInput::scripted(&["1"; 64]);
        let mut events: Vec<GameEvent> = Vec::new();
        let mut encounter = Encounter::spawn(&mut dice);

        let state = encounter
            .run(&mut roster, &mut input, &mut events, &mut dice)
            .unwrap();

        assert!(state.is_terminal());
        assert!(encounter.enemy().health() >= 0);
        for c in &roster {
            assert!((0..=MAX_HEALTH).contains(&c.health()));
        }
    }
}

/// Test: Same seed and same input replay the same fight
#[test]
fn test_seeded_replay() {
    let play = || {
        let mut dice = Dice::seeded(77);
        let mut roster = party();
        let mut input = ScriptedInput::scripted(&["1", "4", "2", "1", "1", "1", "1", "1", "1", "1"]);
        let mut events: Vec<GameEvent> = Vec::new();
        let mut encounter = Encounter::spawn(&mut dice);
        let state = encounter.run(&mut roster, &mut input, &mut events, &mut dice);
        (state.ok(), roster, events)
    };

    assert_eq!(play(), play());
}
