//! Tile identifiers and tile values.
//!
//! ## Encoding
//!
//! A physical tile is a `Tile` id. Its *value* (what the face shows) is
//! `id / 10` and its *instance* (which of the identical copies it is) is
//! `id % 10`. Values are laid out so that suits never touch:
//!
//! | Values | Meaning                                   |
//! |--------|-------------------------------------------|
//! | 1-9    | characters (man)                          |
//! | 11-19  | circles (pin)                             |
//! | 21-29  | bamboo (sou)                              |
//! | 31-34  | winds: east, south, west, north           |
//! | 35-37  | dragons: white, green, red                |
//! | 41-48  | flowers                                   |
//!
//! The gaps at 10, 20 and 30 mean `value + 1` and `value + 2` never
//! produce a false run across suits.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A tile face, independent of which physical copy it is.
pub type TileValue = u8;

/// Number of instance slots per value in a tile id.
pub const INSTANCES_PER_VALUE: u16 = 10;

/// Physical tile identifier.
///
/// ```
/// use rust_mahjong::core::Tile;
///
/// let tile = Tile::new(193);
/// assert_eq!(tile.value(), 19);
/// assert_eq!(tile.instance(), 3);
/// assert_eq!(Tile::from_value(19, 3), tile);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(pub u16);

impl Tile {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn from_value(value: TileValue, instance: u16) -> Self {
        Self(value as u16 * INSTANCES_PER_VALUE + instance)
    }

    #[must_use]
    pub const fn id(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn value(self) -> TileValue {
        (self.0 / INSTANCES_PER_VALUE) as TileValue
    }

    #[must_use]
    pub const fn instance(self) -> u16 {
        self.0 % INSTANCES_PER_VALUE
    }

    #[must_use]
    pub const fn is_flower(self) -> bool {
        is_flower(self.value())
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thirteen orphans: every terminal and every honour.
pub const ORPHANS: [TileValue; 13] = [1, 9, 11, 19, 21, 29, 31, 32, 33, 34, 35, 36, 37];

pub const TERMINALS: [TileValue; 6] = [1, 9, 11, 19, 21, 29];

pub const WINDS: [TileValue; 4] = [31, 32, 33, 34];

pub const DRAGONS: [TileValue; 3] = [35, 36, 37];

/// Values that count for "all greens".
pub const GREEN_TILES: [TileValue; 6] = [22, 23, 24, 26, 28, 36];

/// Base value of each number suit.
pub const NUMBER_SUITS: [TileValue; 3] = [0, 10, 20];

pub const HONOUR_SUIT: TileValue = 30;

pub const EAST_WIND: TileValue = 31;

pub const NORTH_WIND: TileValue = 34;

pub const FIRST_FLOWER: TileValue = 41;

/// Exclusive upper bound on non-flower values.
pub const MAX_PLAYABLE_VALUE: TileValue = 38;

#[must_use]
pub const fn is_number(value: TileValue) -> bool {
    value < HONOUR_SUIT
}

#[must_use]
pub const fn is_flower(value: TileValue) -> bool {
    value > 40
}

/// The base value of the suit a value belongs to (0, 10, 20, 30 or 40).
#[must_use]
pub const fn suit_of(value: TileValue) -> TileValue {
    (value / 10) * 10
}

#[must_use]
pub fn is_orphan(value: TileValue) -> bool {
    ORPHANS.contains(&value)
}

#[must_use]
pub fn is_terminal(value: TileValue) -> bool {
    TERMINALS.contains(&value)
}

/// Map tiles to their values, preserving order.
#[must_use]
pub fn tile_values(tiles: &[Tile]) -> Vec<TileValue> {
    tiles.iter().map(|tile| tile.value()).collect()
}

/// Group tiles by value. Each bucket keeps the input order.
#[must_use]
pub fn value_buckets(tiles: &[Tile]) -> FxHashMap<TileValue, Vec<Tile>> {
    let mut buckets: FxHashMap<TileValue, Vec<Tile>> = FxHashMap::default();
    for &tile in tiles {
        buckets.entry(tile.value()).or_default().push(tile);
    }
    buckets
}

/// Count how many times each value occurs.
#[must_use]
pub fn value_counts(values: &[TileValue]) -> [u8; 64] {
    let mut counts = [0u8; 64];
    for &value in values {
        counts[value as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_value_and_instance() {
        let tile = Tile::new(372);
        assert_eq!(tile.value(), 37);
        assert_eq!(tile.instance(), 2);
        assert!(!tile.is_flower());
        assert!(Tile::new(410).is_flower());
    }

    #[test]
    fn test_suits_do_not_touch() {
        assert_eq!(suit_of(9), 0);
        assert_eq!(suit_of(11), 10);
        assert_eq!(suit_of(29), 20);
        assert_eq!(suit_of(35), HONOUR_SUIT);
        assert!(is_number(29));
        assert!(!is_number(31));
    }

    #[test]
    fn test_orphans_and_terminals() {
        for value in TERMINALS {
            assert!(is_orphan(value));
        }
        assert!(is_orphan(36));
        assert!(!is_terminal(36));
        assert!(!is_orphan(5));
    }

    #[test]
    fn test_value_buckets_keep_order() {
        let tiles = [Tile::new(53), Tile::new(71), Tile::new(50)];
        let buckets = value_buckets(&tiles);
        assert_eq!(buckets[&5], vec![Tile::new(53), Tile::new(50)]);
        assert_eq!(buckets[&7], vec![Tile::new(71)]);
    }

    #[test]
    fn test_tile_serializes_as_number() {
        let json = serde_json::to_string(&Tile::new(123)).unwrap();
        assert_eq!(json, "123");
    }
}
