//! Melds: groups of tiles within a formed hand.
//!
//! `Meld` holds physical tiles and is what the decomposer produces;
//! `TileValueMeld` holds faces only and is what pattern predicates read.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tile::{Tile, TileValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum MeldType {
    Chi = 0,
    Pon = 1,
    Kan = 2,
    Pair = 3,
    /// The whole 14-tile thirteen orphans hand as one group.
    ThirteenOrphans = 4,
}

/// Short tile list; only thirteen orphans spills to the heap.
pub type MeldTiles<T> = SmallVec<[T; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: MeldTiles<Tile>,
    /// Position of the winning tile in `tiles`, if it belongs to this meld.
    pub winning_tile_index: Option<usize>,
}

impl Meld {
    #[must_use]
    pub fn new(meld_type: MeldType, tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            meld_type,
            tiles: tiles.into_iter().collect(),
            winning_tile_index: None,
        }
    }

    #[must_use]
    pub fn to_values(&self) -> TileValueMeld {
        TileValueMeld {
            meld_type: self.meld_type,
            tiles: self.tiles.iter().map(|tile| tile.value()).collect(),
            winning_tile_index: self.winning_tile_index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileValueMeld {
    pub meld_type: MeldType,
    pub tiles: MeldTiles<TileValue>,
    pub winning_tile_index: Option<usize>,
}

impl TileValueMeld {
    #[must_use]
    pub fn new(meld_type: MeldType, tiles: impl IntoIterator<Item = TileValue>) -> Self {
        Self {
            meld_type,
            tiles: tiles.into_iter().collect(),
            winning_tile_index: None,
        }
    }

    /// First (lowest) value of the meld.
    #[must_use]
    pub fn first(&self) -> TileValue {
        self.tiles[0]
    }

    /// The winning value, if the winning tile is in this meld.
    #[must_use]
    pub fn winning_value(&self) -> Option<TileValue> {
        self.winning_tile_index.map(|index| self.tiles[index])
    }

    #[must_use]
    pub fn is_triplet_like(&self) -> bool {
        matches!(self.meld_type, MeldType::Pon | MeldType::Kan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meld_to_values() {
        let mut meld = Meld::new(MeldType::Chi, [Tile::new(21), Tile::new(33), Tile::new(40)]);
        meld.winning_tile_index = Some(1);
        let values = meld.to_values();
        assert_eq!(values.tiles.as_slice(), &[2, 3, 4]);
        assert_eq!(values.winning_value(), Some(3));
        assert_eq!(values.first(), 2);
    }

    #[test]
    fn test_triplet_like() {
        assert!(TileValueMeld::new(MeldType::Pon, [5, 5, 5]).is_triplet_like());
        assert!(TileValueMeld::new(MeldType::Kan, [5, 5, 5, 5]).is_triplet_like());
        assert!(!TileValueMeld::new(MeldType::Pair, [5, 5]).is_triplet_like());
    }
}
