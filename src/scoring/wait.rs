//! How the winning tile completed the hand.

use serde::{Deserialize, Serialize};

use crate::core::meld::{MeldType, TileValueMeld};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaitPattern {
    /// Two-sided sequence wait.
    Ryanmen,
    /// Middle of a sequence.
    Kanchan,
    /// 1-2 waiting on 3, or 8-9 waiting on 7.
    Penchan,
    /// One of two pairs became the triplet.
    Shanpon,
    /// Single tile waiting on its pair.
    Tanki,
    /// Thirteen orphans, winning tile held once.
    Kokushi,
    /// Thirteen orphans, winning tile completing the pair.
    Kokushi13,
}

/// Classify the meld holding the winning tile.
///
/// Panics if the meld has no winning tile or is a kan: a kan never
/// appears in a decomposition of the concealed tiles.
///
/// ```
/// use rust_mahjong::core::{MeldType, TileValueMeld};
/// use rust_mahjong::scoring::{wait_pattern, WaitPattern};
///
/// let mut meld = TileValueMeld::new(MeldType::Chi, [7, 8, 9]);
/// meld.winning_tile_index = Some(0);
/// assert_eq!(wait_pattern(&meld), WaitPattern::Penchan);
/// ```
#[must_use]
pub fn wait_pattern(meld: &TileValueMeld) -> WaitPattern {
    let index = meld
        .winning_tile_index
        .unwrap_or_else(|| panic!("Meld {:?} does not hold the winning tile", meld));
    match meld.meld_type {
        MeldType::Chi => match index {
            0 if meld.tiles[0] % 10 == 7 => WaitPattern::Penchan,
            0 => WaitPattern::Ryanmen,
            1 => WaitPattern::Kanchan,
            2 if meld.tiles[2] % 10 == 3 => WaitPattern::Penchan,
            2 => WaitPattern::Ryanmen,
            _ => panic!("Unexpected winning tile index {} in chi meld", index),
        },
        MeldType::Pon => WaitPattern::Shanpon,
        MeldType::Pair => WaitPattern::Tanki,
        MeldType::ThirteenOrphans => {
            let winning = meld.tiles[index];
            if meld.tiles.iter().filter(|&&value| value == winning).count() == 2 {
                WaitPattern::Kokushi13
            } else {
                WaitPattern::Kokushi
            }
        }
        MeldType::Kan => panic!("Winning tile found in kan meld"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winning(meld_type: MeldType, tiles: &[u8], index: usize) -> TileValueMeld {
        let mut meld = TileValueMeld::new(meld_type, tiles.iter().copied());
        meld.winning_tile_index = Some(index);
        meld
    }

    #[test]
    fn test_chi_waits() {
        assert_eq!(wait_pattern(&winning(MeldType::Chi, &[3, 4, 5], 0)), WaitPattern::Ryanmen);
        assert_eq!(wait_pattern(&winning(MeldType::Chi, &[3, 4, 5], 1)), WaitPattern::Kanchan);
        assert_eq!(wait_pattern(&winning(MeldType::Chi, &[3, 4, 5], 2)), WaitPattern::Ryanmen);
        assert_eq!(wait_pattern(&winning(MeldType::Chi, &[11, 12, 13], 2)), WaitPattern::Penchan);
        assert_eq!(wait_pattern(&winning(MeldType::Chi, &[27, 28, 29], 0)), WaitPattern::Penchan);
    }

    #[test]
    fn test_set_waits() {
        assert_eq!(wait_pattern(&winning(MeldType::Pon, &[5, 5, 5], 2)), WaitPattern::Shanpon);
        assert_eq!(wait_pattern(&winning(MeldType::Pair, &[31, 31], 1)), WaitPattern::Tanki);
    }

    #[test]
    fn test_thirteen_orphans_waits() {
        let tiles = [1, 1, 9, 11, 19, 21, 29, 31, 32, 33, 34, 35, 36, 37];
        assert_eq!(
            wait_pattern(&winning(MeldType::ThirteenOrphans, &tiles, 1)),
            WaitPattern::Kokushi13
        );
        assert_eq!(
            wait_pattern(&winning(MeldType::ThirteenOrphans, &tiles, 5)),
            WaitPattern::Kokushi
        );
    }

    #[test]
    #[should_panic(expected = "kan meld")]
    fn test_kan_panics() {
        let _ = wait_pattern(&winning(MeldType::Kan, &[5, 5, 5, 5], 0));
    }
}
