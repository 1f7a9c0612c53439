//! Facts about one decomposition of a winning hand.
//!
//! `PatternCalculator` looks at a single formed hand together with the
//! declared calls and precomputes what the pattern predicates ask about:
//! meld counts, triplet values, sequence starts, suits in use and so on.
//! Predicates then only read fields.

use rustc_hash::FxHashMap;

use super::wait::{wait_pattern, WaitPattern};
use super::win::Win;
use crate::core::call::Call;
use crate::core::meld::{Meld, MeldType, TileValueMeld};
use crate::core::tile::{is_number, is_orphan, suit_of, TileValue};
use crate::hand::shanten::ValueMask;

/// How many melds of each kind the hand holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeldCounts {
    pub pair_count: u32,
    /// Value of the (last) pair.
    pub pair_tile: TileValue,
    pub chii: u32,
    pub simple_open_triplet: u32,
    pub orphan_open_triplet: u32,
    pub simple_closed_triplet: u32,
    pub orphan_closed_triplet: u32,
    pub simple_open_quad: u32,
    pub orphan_open_quad: u32,
    pub simple_closed_quad: u32,
    pub orphan_closed_quad: u32,
}

impl MeldCounts {
    fn count(win: &Win, formed_hand: &[Meld]) -> Self {
        let mut counts = MeldCounts::default();
        for meld in formed_hand {
            let value = meld.tiles[0].value();
            match meld.meld_type {
                MeldType::Chi => counts.chii += 1,
                // A triplet completed by someone else's discard counts as open.
                MeldType::Pon if meld.winning_tile_index.is_some() && !win.is_tsumo() => {
                    if is_orphan(value) {
                        counts.orphan_open_triplet += 1;
                    } else {
                        counts.simple_open_triplet += 1;
                    }
                }
                MeldType::Pon => {
                    if is_orphan(value) {
                        counts.orphan_closed_triplet += 1;
                    } else {
                        counts.simple_closed_triplet += 1;
                    }
                }
                MeldType::Kan => panic!("Unexpected kan meld in formed hand"),
                MeldType::Pair => {
                    counts.pair_count += 1;
                    counts.pair_tile = value;
                }
                MeldType::ThirteenOrphans => {}
            }
        }
        for call in &win.calls {
            let orphan = is_orphan(call.key_value());
            match call {
                Call::Chi { .. } => counts.chii += 1,
                Call::Pon { .. } if orphan => counts.orphan_open_triplet += 1,
                Call::Pon { .. } => counts.simple_open_triplet += 1,
                Call::OpenKan { .. } | Call::AddKan { .. } if orphan => {
                    counts.orphan_open_quad += 1
                }
                Call::OpenKan { .. } | Call::AddKan { .. } => counts.simple_open_quad += 1,
                Call::ClosedKan { .. } if orphan => counts.orphan_closed_quad += 1,
                Call::ClosedKan { .. } => counts.simple_closed_quad += 1,
            }
        }
        counts
    }
}

/// 0 for a meld of simples, 1 for honours, 2 for one holding a terminal.
fn outsideness(meld: &TileValueMeld) -> usize {
    let first = meld.first();
    match meld.meld_type {
        MeldType::Chi if first % 10 == 1 || first % 10 == 7 => 2,
        MeldType::Chi | MeldType::ThirteenOrphans => 0,
        _ if !is_number(first) => 1,
        _ if first % 10 == 1 || first % 10 == 9 => 2,
        _ => 0,
    }
}

pub struct PatternCalculator<'a> {
    pub win: &'a Win,
    /// Winner's seat wind, 0 being east.
    pub seat: usize,
    pub flowers: ValueMask,
    /// The formed hand followed by the calls.
    pub melds: Vec<TileValueMeld>,
    pub winning_tile: TileValue,
    pub wait_pattern: WaitPattern,
    /// Every tile value of the hand, calls included.
    pub hand_tiles: Vec<TileValue>,
    /// Suit bases (0, 10, 20, 30) in use.
    pub used_suits: ValueMask,
    /// Which outsideness levels occur among the melds.
    pub outsidenesses: [bool; 3],
    /// Number of sequences starting at each value.
    pub chii_starts: FxHashMap<TileValue, u32>,
    pub concealed_triplets: u32,
    pub quads: u32,
    /// First value of every triplet or quad.
    pub triplet_tiles: ValueMask,
    pub counts: MeldCounts,
    /// No calls other than closed kans.
    pub is_closed_hand: bool,
}

impl<'a> PatternCalculator<'a> {
    /// Panics if no meld of `formed_hand` holds the winning tile.
    #[must_use]
    pub fn new(win: &'a Win, formed_hand: &[Meld]) -> Self {
        let counts = MeldCounts::count(win, formed_hand);

        let melds: Vec<TileValueMeld> = formed_hand
            .iter()
            .map(Meld::to_values)
            .chain(win.calls.iter().map(|call| {
                TileValueMeld::new(call.meld_type(), call.tiles().iter().map(|tile| tile.value()))
            }))
            .collect();

        let winning_meld = melds
            .iter()
            .find(|meld| meld.winning_tile_index.is_some())
            .unwrap_or_else(|| panic!("Formed hand {:?} has no winning tile", formed_hand));
        let winning_tile = winning_meld
            .winning_value()
            .unwrap_or_else(|| panic!("Formed hand {:?} has no winning tile", formed_hand));
        let wait_pattern = wait_pattern(winning_meld);

        let hand_tiles: Vec<TileValue> = melds
            .iter()
            .flat_map(|meld| meld.tiles.iter().copied())
            .collect();
        let used_suits = hand_tiles.iter().map(|&value| suit_of(value)).collect();

        let mut outsidenesses = [false; 3];
        for meld in &melds {
            outsidenesses[outsideness(meld)] = true;
        }

        let mut chii_starts: FxHashMap<TileValue, u32> = FxHashMap::default();
        for meld in melds.iter().filter(|meld| meld.meld_type == MeldType::Chi) {
            *chii_starts.entry(meld.first()).or_default() += 1;
        }

        let concealed_triplets = formed_hand
            .iter()
            .filter(|meld| {
                meld.meld_type == MeldType::Pon
                    && (meld.winning_tile_index.is_none() || win.is_tsumo())
            })
            .count()
            + win.calls.iter().filter(|call| call.is_closed()).count();
        let quads = melds
            .iter()
            .filter(|meld| meld.meld_type == MeldType::Kan)
            .count();
        let triplet_tiles = melds
            .iter()
            .filter(|meld| meld.is_triplet_like())
            .map(TileValueMeld::first)
            .collect();

        Self {
            win,
            seat: win.seat(),
            flowers: win.flowers.iter().map(|tile| tile.value()).collect(),
            winning_tile,
            wait_pattern,
            melds,
            hand_tiles,
            used_suits,
            outsidenesses,
            chii_starts,
            concealed_triplets: concealed_triplets as u32,
            quads: quads as u32,
            triplet_tiles,
            counts,
            is_closed_hand: win.calls.iter().all(Call::is_closed),
        }
    }

    /// How many tiles of `value` the hand holds, calls included.
    #[must_use]
    pub fn tile_count(&self, value: TileValue) -> usize {
        self.hand_tiles.iter().filter(|&&held| held == value).count()
    }

    #[must_use]
    pub fn is_tsumo(&self) -> bool {
        self.win.is_tsumo()
    }

    /// Number of distinct sequence starts occurring exactly `times` times.
    #[must_use]
    pub fn sequences_repeated(&self, times: u32) -> usize {
        self.chii_starts.values().filter(|&&count| count == times).count()
    }

    #[must_use]
    pub fn has_sequence_at(&self, value: TileValue) -> bool {
        self.chii_starts.contains_key(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;
    use crate::core::tile::Tile;
    use crate::hand::decompose::formed_hand_possibilities;

    fn hand(ids: &[u16]) -> Vec<Tile> {
        ids.iter().copied().map(Tile::new).collect()
    }

    #[test]
    fn test_counts_and_facts() {
        // 123m 456m 123p 555s + east pair, won on 6m by ron.
        let tiles = hand(&[10, 20, 30, 40, 50, 110, 120, 130, 250, 251, 252, 310, 311, 60]);
        let win = Win::new(PlayerId::new(1), Some(PlayerId::new(0)), tiles.clone(), 4);
        let formed = formed_hand_possibilities(&tiles);
        assert_eq!(formed.len(), 1);

        let calculator = PatternCalculator::new(&win, &formed[0]);
        assert_eq!(calculator.counts.chii, 3);
        assert_eq!(calculator.counts.simple_closed_triplet, 1);
        assert_eq!(calculator.counts.pair_count, 1);
        assert_eq!(calculator.counts.pair_tile, 31);
        assert_eq!(calculator.winning_tile, 6);
        assert_eq!(calculator.wait_pattern, WaitPattern::Ryanmen);
        assert_eq!(calculator.concealed_triplets, 1);
        assert_eq!(calculator.used_suits.values(), vec![0, 10, 20, 30]);
        assert!(calculator.triplet_tiles.contains(25));
        assert!(calculator.has_sequence_at(4));
        assert!(calculator.is_closed_hand);
        assert_eq!(calculator.seat, 1);
    }

    #[test]
    fn test_ron_triplet_is_open() {
        // 111m 999m 123p 456p + 7s pair, won on 9m.
        let tiles = hand(&[10, 11, 12, 90, 91, 110, 120, 130, 140, 150, 160, 270, 271, 92]);
        let formed = formed_hand_possibilities(&tiles);

        let ron = Win::new(PlayerId::new(0), Some(PlayerId::new(2)), tiles.clone(), 4);
        let calculator = PatternCalculator::new(&ron, &formed[0]);
        assert_eq!(calculator.counts.orphan_open_triplet, 1);
        assert_eq!(calculator.counts.orphan_closed_triplet, 1);
        assert_eq!(calculator.concealed_triplets, 1);

        let tsumo = Win::new(PlayerId::new(0), None, tiles, 4);
        let calculator = PatternCalculator::new(&tsumo, &formed[0]);
        assert_eq!(calculator.counts.orphan_closed_triplet, 2);
        assert_eq!(calculator.concealed_triplets, 2);
    }

    #[test]
    fn test_calls_are_counted() {
        let tiles = hand(&[110, 120, 130, 140, 150, 160, 270, 271, 272, 50, 51]);
        let mut win = Win::new(PlayerId::new(0), None, tiles.clone(), 4);
        win.calls.push(Call::ClosedKan {
            tiles: [Tile::new(350), Tile::new(351), Tile::new(352), Tile::new(353)],
        });
        let formed = formed_hand_possibilities(&tiles);
        let calculator = PatternCalculator::new(&win, &formed[0]);
        assert_eq!(calculator.counts.orphan_closed_quad, 1);
        assert_eq!(calculator.quads, 1);
        assert!(calculator.triplet_tiles.contains(35));
        assert!(calculator.is_closed_hand);
        assert_eq!(calculator.tile_count(35), 4);
        assert_eq!(calculator.concealed_triplets, 2);
    }
}
