//! Characters and enemies
//!
//! Handles the combatants of the game:
//! - Player characters with a class, health and inventory
//! - The class table driving starting stats and special abilities
//! - Enemies spawned for a single encounter

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::{clamp_damage, DamageRange, Dice};

/// Health ceiling for every character
pub const MAX_HEALTH: i32 = 100;

/// Spread of a character attack roll around its base damage
pub const ATTACK_SPREAD: i32 = 5;

/// Health restored by one potion
pub const POTION_HEAL: i32 = 30;

/// Fixed damage of the Mage fireball
pub const FIREBALL_DAMAGE: i32 = 50;

/// Minimum hit of any enemy attack
pub const ENEMY_MIN_HIT: i32 = 5;

/// Highest base damage a character can carry
pub const MAX_BASE_DAMAGE: i32 = MAX_HEALTH;

/// Enemy health drawn at spawn
pub const ENEMY_HEALTH: DamageRange = DamageRange::new(50, 100);

/// Enemy damage ceiling drawn at spawn
pub const ENEMY_DAMAGE: DamageRange = DamageRange::new(15, 25);

/// Items a character can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Item {
    Gold,
    Potion,
    #[serde(rename = "Magic Sword")]
    MagicSword,
}

impl Item {
    /// Items that can drop as loot
    pub const LOOT: [Item; 3] = [Item::Gold, Item::Potion, Item::MagicSword];

    /// Display name, also used as the save file key
    pub fn as_str(&self) -> &'static str {
        match self {
            Item::Gold => "Gold",
            Item::Potion => "Potion",
            Item::MagicSword => "Magic Sword",
        }
    }

    /// Draw one loot item uniformly
    pub fn random_loot(dice: &mut Dice) -> Item {
        dice.pick(&Self::LOOT).copied().unwrap_or(Item::Gold)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item counts carried by a character
pub type Inventory = BTreeMap<Item, u32>;

/// A fresh starting inventory (10 Gold, 1 Potion).
///
/// Every call allocates a new map; characters never share one.
pub fn starting_inventory() -> Inventory {
    BTreeMap::from([(Item::Gold, 10), (Item::Potion, 1)])
}

/// Character class discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassTag {
    Warrior,
    Mage,
    Rogue,
}

impl ClassTag {
    /// All classes, in menu order
    pub const ALL: [ClassTag; 3] = [ClassTag::Warrior, ClassTag::Mage, ClassTag::Rogue];

    /// Look up this class in the class table
    pub fn profile(self) -> &'static ClassProfile {
        match self {
            ClassTag::Warrior => &CLASS_TABLE[0],
            ClassTag::Mage => &CLASS_TABLE[1],
            ClassTag::Rogue => &CLASS_TABLE[2],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassTag::Warrior => "Warrior",
            ClassTag::Mage => "Mage",
            ClassTag::Rogue => "Rogue",
        }
    }
}

impl FromStr for ClassTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warrior" => Ok(ClassTag::Warrior),
            "mage" => Ok(ClassTag::Mage),
            "rogue" => Ok(ClassTag::Rogue),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a special ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialOutcome {
    /// The next enemy attack against the user is negated
    Block,
    /// Damage dealt to the enemy
    Damage(i32),
}

/// Per-class stats and special ability
pub struct ClassProfile {
    /// Health at creation, before clamping to [`MAX_HEALTH`]
    pub starting_health: i32,
    pub base_damage: i32,
    /// Name of the special ability
    pub ability: &'static str,
    /// One line describing the class on the creation menu
    pub blurb: &'static str,
    special: fn(&Character, &mut Dice) -> SpecialOutcome,
}

fn shield_block(_: &Character, _: &mut Dice) -> SpecialOutcome {
    SpecialOutcome::Block
}

fn fireball(_: &Character, _: &mut Dice) -> SpecialOutcome {
    SpecialOutcome::Damage(FIREBALL_DAMAGE)
}

fn critical_strike(character: &Character, dice: &mut Dice) -> SpecialOutcome {
    SpecialOutcome::Damage(character.attack(dice).saturating_mul(2))
}

static CLASS_TABLE: [ClassProfile; 3] = [
    ClassProfile {
        starting_health: 120,
        base_damage: 20,
        ability: "Shield Block",
        blurb: "High health and decent attack.",
        special: shield_block,
    },
    ClassProfile {
        starting_health: 80,
        base_damage: 25,
        ability: "Fireball",
        blurb: "Low health but powerful spells.",
        special: fireball,
    },
    ClassProfile {
        starting_health: 90,
        base_damage: 15,
        ability: "Critical Strike",
        blurb: "Balanced stats with critical strikes.",
        special: critical_strike,
    },
];

/// Errors building or restoring a character
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharacterError {
    #[error("character name must not be empty")]
    EmptyName,

    #[error("health {0} outside 0..=100")]
    HealthOutOfRange(i32),

    #[error("base damage {0} outside 0..=100")]
    DamageOutOfRange(i32),
}

/// Result of drinking a potion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotionOutcome {
    /// Potion consumed, `restored` health gained
    Healed { restored: i32 },
    /// No potion in the inventory; nothing changed
    NoPotions,
}

/// A player character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    name: String,
    class: ClassTag,
    health: i32,
    inventory: Inventory,
    base_damage: i32,
}

impl Character {
    /// Create a new character with the class defaults
    pub fn new(name: impl Into<String>, class: ClassTag) -> Result<Self, CharacterError> {
        let profile = class.profile();
        Self::build(
            name.into(),
            class,
            profile.starting_health.clamp(0, MAX_HEALTH),
            starting_inventory(),
            profile.base_damage,
        )
    }

    /// Rebuild a character from stored stats, validating every field
    pub fn restore(
        name: impl Into<String>,
        class: ClassTag,
        health: i32,
        inventory: Inventory,
        base_damage: i32,
    ) -> Result<Self, CharacterError> {
        if !(0..=MAX_HEALTH).contains(&health) {
            return Err(CharacterError::HealthOutOfRange(health));
        }
        Self::build(name.into(), class, health, inventory, base_damage)
    }

    fn build(
        name: String,
        class: ClassTag,
        health: i32,
        inventory: Inventory,
        base_damage: i32,
    ) -> Result<Self, CharacterError> {
        if name.trim().is_empty() {
            return Err(CharacterError::EmptyName);
        }
        if !(0..=MAX_BASE_DAMAGE).contains(&base_damage) {
            return Err(CharacterError::DamageOutOfRange(base_damage));
        }
        Ok(Self {
            name,
            class,
            health,
            inventory,
            base_damage,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> ClassTag {
        self.class
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn base_damage(&self) -> i32 {
        self.base_damage
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// How many of an item the character carries
    pub fn item_count(&self, item: Item) -> u32 {
        self.inventory.get(&item).copied().unwrap_or(0)
    }

    /// Check if the character is out of the fight
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// The range an attack roll can land in
    pub fn attack_range(&self) -> DamageRange {
        DamageRange::around(self.base_damage, ATTACK_SPREAD)
    }

    /// Roll an attack
    pub fn attack(&self, dice: &mut Dice) -> i32 {
        self.attack_range().roll(dice)
    }

    /// Use the class special ability
    pub fn special_ability(&self, dice: &mut Dice) -> SpecialOutcome {
        (self.class.profile().special)(self, dice)
    }

    /// Drink a potion if one is carried
    pub fn use_potion(&mut self) -> PotionOutcome {
        match self.inventory.get_mut(&Item::Potion) {
            Some(count) if *count > 0 => {
                *count -= 1;
                let restored = self.heal(POTION_HEAL);
                PotionOutcome::Healed { restored }
            }
            _ => PotionOutcome::NoPotions,
        }
    }

    /// Take damage (returns health actually lost)
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - clamp_damage(amount)).clamp(0, MAX_HEALTH);
        before - self.health
    }

    /// Heal (cannot exceed [`MAX_HEALTH`])
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).clamp(0, MAX_HEALTH);
        self.health - before
    }

    /// Add one of an item to the inventory (counts saturate)
    pub fn grant(&mut self, item: Item) {
        let count = self.inventory.entry(item).or_insert(0);
        *count = count.saturating_add(1);
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}'s Status ({}):", self.name, self.class)?;
        writeln!(f, "Health: {}/{}", self.health, MAX_HEALTH)?;
        let items: Vec<String> = self
            .inventory
            .iter()
            .map(|(item, count)| format!("{}: {}", item, count))
            .collect();
        write!(f, "Inventory: {{{}}}", items.join(", "))
    }
}

/// Kinds of enemy that can appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Troll,
    Skeleton,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Goblin,
        EnemyKind::Orc,
        EnemyKind::Troll,
        EnemyKind::Skeleton,
    ];
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Troll => "Troll",
            EnemyKind::Skeleton => "Skeleton",
        };
        f.write_str(s)
    }
}

/// An enemy, alive for one encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    kind: EnemyKind,
    health: i32,
    damage: i32,
}

impl Enemy {
    /// Create an enemy with explicit stats
    pub fn new(kind: EnemyKind, health: i32, damage: i32) -> Self {
        Self {
            kind,
            health: health.max(0),
            damage,
        }
    }

    /// Spawn a random enemy
    pub fn spawn(dice: &mut Dice) -> Self {
        let kind = dice
            .pick(&EnemyKind::ALL)
            .copied()
            .unwrap_or(EnemyKind::Goblin);
        let health = ENEMY_HEALTH.roll(dice);
        let damage = ENEMY_DAMAGE.roll(dice);
        Self::new(kind, health, damage)
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Ceiling of this enemy's attack roll
    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// The range an attack roll can land in
    pub fn attack_range(&self) -> DamageRange {
        DamageRange::new(ENEMY_MIN_HIT, self.damage.max(ENEMY_MIN_HIT))
    }

    /// Roll an attack
    pub fn attack(&self, dice: &mut Dice) -> i32 {
        self.attack_range().roll(dice)
    }

    /// Take damage (returns health actually lost)
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - clamp_damage(amount)).max(0);
        before - self.health
    }
}
