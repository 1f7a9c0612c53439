//! The wall.
//!
//! Live draws come off the front; kan and flower replacements come off the
//! back (the dead wall). Nothing else mutates the deck.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use super::tile::{Tile, TileValue};

const COPIES_PER_VALUE: u16 = 4;

fn copies_of(values: impl IntoIterator<Item = TileValue>) -> Vec<Tile> {
    values
        .into_iter()
        .flat_map(|value| (0..COPIES_PER_VALUE).map(move |r| Tile::from_value(value, r)))
        .collect()
}

/// All 136 tiles of a four-player set, in ascending order.
#[must_use]
pub fn four_player_tiles() -> Vec<Tile> {
    copies_of((1..=9).chain(11..=19).chain(21..=29).chain(31..=37))
}

/// The 108 tiles of a three-player set: characters 2-8 are removed.
#[must_use]
pub fn three_player_tiles() -> Vec<Tile> {
    copies_of([1, 9].into_iter().chain(11..=19).chain(21..=29).chain(31..=37))
}

/// One tile for each of the eight flowers.
#[must_use]
pub fn four_player_flowers() -> Vec<Tile> {
    (41..=48).map(|value| Tile::from_value(value, 0)).collect()
}

/// Three-player games drop the fourth flower of each set.
#[must_use]
pub fn three_player_flowers() -> Vec<Tile> {
    [41, 42, 43, 45, 46, 47]
        .into_iter()
        .map(|value| Tile::from_value(value, 0))
        .collect()
}

/// Ordered wall of tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    tiles: VecDeque<Tile>,
}

impl Deck {
    /// Use the tiles exactly in the given order.
    #[must_use]
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// Shuffle the given tile set with a seeded generator.
    #[must_use]
    pub fn shuffled(mut tiles: Vec<Tile>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut tiles);
        Self::from_tiles(tiles)
    }

    /// Draw from the live end.
    ///
    /// Panics on an empty deck: the end-wall threshold keeps enough tiles
    /// back that a correctly driven round never exhausts it.
    pub fn pop(&mut self) -> Tile {
        self.tiles
            .pop_front()
            .unwrap_or_else(|| panic!("Cannot draw from an empty deck"))
    }

    /// Draw a replacement tile from the dead wall.
    pub fn pop_back(&mut self) -> Tile {
        self.tiles
            .pop_back()
            .unwrap_or_else(|| panic!("Cannot draw from an empty deck"))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_sizes() {
        assert_eq!(four_player_tiles().len(), 136);
        assert_eq!(three_player_tiles().len(), 108);
        assert_eq!(four_player_flowers().len(), 8);
        assert_eq!(three_player_flowers().len(), 6);
    }

    #[test]
    fn test_three_player_set_has_no_middle_characters() {
        assert!(three_player_tiles()
            .iter()
            .all(|tile| !(2..=8).contains(&tile.value())));
    }

    #[test]
    fn test_pop_front_and_back() {
        let mut deck = Deck::from_tiles([Tile::new(10), Tile::new(20), Tile::new(30)]);
        assert_eq!(deck.pop(), Tile::new(10));
        assert_eq!(deck.pop_back(), Tile::new(30));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = GameRng::new(11);
        let deck = Deck::shuffled(four_player_tiles(), &mut rng);
        let mut tiles: Vec<_> = deck.iter().copied().collect();
        assert_ne!(tiles, four_player_tiles());
        tiles.sort();
        assert_eq!(tiles, four_player_tiles());
    }

    #[test]
    #[should_panic(expected = "empty deck")]
    fn test_pop_empty_panics() {
        let mut deck = Deck::default();
        deck.pop();
    }
}
