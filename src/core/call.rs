//! Calls: melds declared to the table.
//!
//! Open calls claim another player's discard; closed kans are formed
//! entirely from one's own hand. A call never changes after it is made,
//! except that an added kan replaces the pon it extends.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::meld::MeldType;
use super::player::PlayerId;
use super::tile::{Tile, TileValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CallType {
    Chi = 0,
    Pon = 1,
    OpenKan = 2,
    AddKan = 3,
    ClosedKan = 4,
}

/// A declared meld.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "call_type", rename_all = "snake_case")]
pub enum Call {
    Chi {
        called_player: PlayerId,
        called_tile: Tile,
        other_tiles: [Tile; 2],
    },
    Pon {
        called_player: PlayerId,
        called_tile: Tile,
        other_tiles: [Tile; 2],
    },
    OpenKan {
        called_player: PlayerId,
        called_tile: Tile,
        other_tiles: [Tile; 3],
    },
    AddKan {
        called_player: PlayerId,
        called_tile: Tile,
        added_tile: Tile,
        other_tiles: [Tile; 2],
    },
    ClosedKan {
        tiles: [Tile; 4],
    },
}

impl Call {
    #[must_use]
    pub fn call_type(&self) -> CallType {
        match self {
            Call::Chi { .. } => CallType::Chi,
            Call::Pon { .. } => CallType::Pon,
            Call::OpenKan { .. } => CallType::OpenKan,
            Call::AddKan { .. } => CallType::AddKan,
            Call::ClosedKan { .. } => CallType::ClosedKan,
        }
    }

    #[must_use]
    pub fn meld_type(&self) -> MeldType {
        match self.call_type() {
            CallType::Chi => MeldType::Chi,
            CallType::Pon => MeldType::Pon,
            CallType::OpenKan | CallType::AddKan | CallType::ClosedKan => MeldType::Kan,
        }
    }

    /// The claimed discard, for open calls.
    #[must_use]
    pub fn called_tile(&self) -> Option<Tile> {
        match self {
            Call::Chi { called_tile, .. }
            | Call::Pon { called_tile, .. }
            | Call::OpenKan { called_tile, .. }
            | Call::AddKan { called_tile, .. } => Some(*called_tile),
            Call::ClosedKan { .. } => None,
        }
    }

    /// The value that identifies the meld: the called tile's value, or the
    /// kan value for closed kans.
    #[must_use]
    pub fn key_value(&self) -> TileValue {
        match self {
            Call::ClosedKan { tiles } => tiles[0].value(),
            _ => self.called_tile().map(Tile::value).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Call::ClosedKan { .. })
    }

    /// Every tile of the call.
    ///
    /// Closed kans keep their declared order, added kans list the added and
    /// called tiles first, and everything else is sorted.
    ///
    /// ```
    /// use rust_mahjong::core::{Call, PlayerId, Tile};
    ///
    /// let chi = Call::Chi {
    ///     called_player: PlayerId::new(0),
    ///     called_tile: Tile::new(30),
    ///     other_tiles: [Tile::new(40), Tile::new(21)],
    /// };
    /// assert_eq!(chi.tiles().as_slice(), &[Tile::new(21), Tile::new(30), Tile::new(40)]);
    /// ```
    #[must_use]
    pub fn tiles(&self) -> SmallVec<[Tile; 4]> {
        match self {
            Call::ClosedKan { tiles } => SmallVec::from_slice(tiles),
            Call::AddKan {
                called_tile,
                added_tile,
                other_tiles,
                ..
            } => {
                let mut tiles = SmallVec::from_slice(&[*added_tile, *called_tile]);
                tiles.extend_from_slice(other_tiles);
                tiles
            }
            Call::Chi {
                called_tile,
                other_tiles,
                ..
            }
            | Call::Pon {
                called_tile,
                other_tiles,
                ..
            } => sorted_with(*called_tile, other_tiles),
            Call::OpenKan {
                called_tile,
                other_tiles,
                ..
            } => sorted_with(*called_tile, other_tiles),
        }
    }
}

fn sorted_with(called: Tile, others: &[Tile]) -> SmallVec<[Tile; 4]> {
    let mut tiles: SmallVec<[Tile; 4]> = SmallVec::from_slice(others);
    tiles.push(called);
    tiles.sort();
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pon() -> Call {
        Call::Pon {
            called_player: PlayerId::new(1),
            called_tile: Tile::new(43),
            other_tiles: [Tile::new(40), Tile::new(41)],
        }
    }

    #[test]
    fn test_pon_tiles_sorted() {
        assert_eq!(
            pon().tiles().as_slice(),
            &[Tile::new(40), Tile::new(41), Tile::new(43)]
        );
        assert_eq!(pon().meld_type(), MeldType::Pon);
        assert_eq!(pon().key_value(), 4);
    }

    #[test]
    fn test_add_kan_tiles_order() {
        let kan = Call::AddKan {
            called_player: PlayerId::new(1),
            called_tile: Tile::new(43),
            added_tile: Tile::new(42),
            other_tiles: [Tile::new(40), Tile::new(41)],
        };
        assert_eq!(
            kan.tiles().as_slice(),
            &[Tile::new(42), Tile::new(43), Tile::new(40), Tile::new(41)]
        );
        assert_eq!(kan.meld_type(), MeldType::Kan);
        assert!(!kan.is_closed());
    }

    #[test]
    fn test_closed_kan() {
        let kan = Call::ClosedKan {
            tiles: [Tile::new(73), Tile::new(70), Tile::new(71), Tile::new(72)],
        };
        assert_eq!(kan.tiles()[0], Tile::new(73));
        assert_eq!(kan.called_tile(), None);
        assert_eq!(kan.key_value(), 7);
        assert!(kan.is_closed());
    }

    #[test]
    fn test_call_json_is_tagged() {
        let json = serde_json::to_value(pon()).unwrap();
        assert_eq!(json["call_type"], "pon");
        assert_eq!(json["called_tile"], 43);
        let restored: Call = serde_json::from_value(json).unwrap();
        assert_eq!(restored, pon());
    }
}
