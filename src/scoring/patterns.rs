//! The pattern table.
//!
//! Each entry names a pattern, gives its default han and fu, and points at
//! the predicate that says how many times the pattern applies to a hand
//! (usually 0 or 1; flower and counter patterns can apply several times).
//! Han and fu are multiplied by that count.

use super::calculator::PatternCalculator;
use super::wait::WaitPattern;
use crate::core::meld::MeldType;
use crate::core::tile::{
    is_number, TileValue, DRAGONS, EAST_WIND, GREEN_TILES, HONOUR_SUIT, NORTH_WIND, NUMBER_SUITS,
    TERMINALS, WINDS,
};
use crate::hand::shanten::ValueMask;

/// Computes how many times a pattern applies.
pub type MultiplicityFn = fn(&PatternCalculator<'_>) -> u32;

/// A built-in pattern.
#[derive(Clone, Copy)]
pub struct PatternDef {
    /// Key used in `GameOptions::pattern_data` and `Scoring::patterns`.
    pub name: &'static str,
    pub display_name: &'static str,
    pub han: u32,
    pub fu: u32,
    pub multiplicity: MultiplicityFn,
}

impl std::fmt::Debug for PatternDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternDef")
            .field("name", &self.name)
            .field("han", &self.han)
            .field("fu", &self.fu)
            .finish()
    }
}

const fn pattern(
    name: &'static str,
    display_name: &'static str,
    han: u32,
    fu: u32,
    multiplicity: MultiplicityFn,
) -> PatternDef {
    PatternDef {
        name,
        display_name,
        han,
        fu,
        multiplicity,
    }
}

pub static PATTERNS: &[PatternDef] = &[
    // Special wins
    pattern("BLESSING_OF_HEAVEN", "Blessing of Heaven", 20, 0, blessing_of_heaven),
    pattern("BLESSING_OF_EARTH", "Blessing of Earth", 19, 0, blessing_of_earth),
    pattern("RIICHI", "Riichi", 1, 0, riichi),
    pattern("DOUBLE_RIICHI", "Double Riichi", 2, 0, double_riichi),
    pattern("IPPATSU", "Ippatsu", 1, 0, ippatsu),
    pattern("ROBBING_A_KAN", "Robbing a Kan", 1, 0, robbing_a_kan),
    pattern("UNDER_THE_SEA", "Under the Sea", 1, 0, under_the_sea),
    pattern("UNDER_THE_RIVER", "Under the River", 1, 0, under_the_river),
    pattern("AFTER_A_FLOWER", "After a Flower", 1, 0, after_a_flower),
    pattern("AFTER_A_KAN", "After a Kan", 2, 0, after_a_kan),
    pattern("DRAW", "Draw", 1, 0, draw),
    // Sequences
    pattern("ALL_SEQUENCES", "All Sequences", 1, 0, all_sequences),
    pattern("PURE_DOUBLE_SEQUENCE", "Pure Double Sequence", 1, 0, pure_double_sequence),
    pattern("TWICE_PURE_DOUBLE_SEQUENCE", "Twice Pure Double Sequence", 4, 0, twice_pure_double_sequence),
    pattern("PURE_TRIPLE_SEQUENCE", "Pure Triple Sequence", 6, 0, pure_triple_sequence),
    pattern("PURE_QUADRUPLE_SEQUENCE", "Pure Quadruple Sequence", 12, 0, pure_quadruple_sequence),
    pattern("PURE_STRAIGHT", "Pure Straight", 3, 0, pure_straight),
    pattern("MIXED_TRIPLE_SEQUENCE", "Mixed Triple Sequence", 2, 0, mixed_triple_sequence),
    // Pinfu
    pattern("CLOSED_PINFU", "Pinfu", 0, 0, closed_pinfu),
    pattern("OPEN_PINFU", "Open Pinfu", 0, 2, open_pinfu),
    pattern("NON_PINFU_TSUMO", "Non Pinfu Tsumo", 0, 2, non_pinfu_tsumo),
    // Sets
    pattern("ALL_TRIPLETS", "All Triplets", 3, 0, all_triplets),
    pattern("TRIPLE_TRIPLETS", "Triple Triplets", 4, 0, triple_triplets),
    pattern("THREE_CONCEALED_TRIPLETS", "Three Concealed Triplets", 3, 0, three_concealed_triplets),
    pattern("FOUR_CONCEALED_TRIPLETS", "Four Concealed Triplets", 12, 0, four_concealed_triplets),
    pattern(
        "FOUR_CONCEALED_TRIPLETS_1_SIDED_WAIT",
        "Four Concealed Triplets 1-sided Wait",
        12,
        0,
        four_concealed_triplets_1_sided_wait,
    ),
    pattern("THREE_QUADS", "Three Quads", 4, 0, three_quads),
    pattern("FOUR_QUADS", "Four Quads", 18, 0, four_quads),
    // Pairs
    pattern("SEVEN_PAIRS", "Seven Pairs", 3, 0, seven_pairs),
    pattern("EYES", "Eyes", 1, 0, eyes),
    // Flushes
    pattern("HALF_FLUSH", "Half Flush", 3, 0, half_flush),
    pattern("FULL_FLUSH", "Full Flush", 7, 0, full_flush),
    pattern("NINE_GATES", "Nine Gates", 11, 0, nine_gates),
    pattern("TRUE_NINE_GATES", "True Nine Gates", 19, 0, true_nine_gates),
    pattern("ALL_GREENS", "All Greens", 16, 0, all_greens),
    // Terminals
    pattern("ALL_SIMPLES", "All Simples", 1, 0, all_simples),
    pattern("HALF_OUTSIDE_HAND", "Half Outside Hand", 2, 0, half_outside_hand),
    pattern("FULLY_OUTSIDE_HAND", "Fully Outside Hand", 4, 0, fully_outside_hand),
    pattern("ALL_TERMINALS_AND_HONOURS", "All Terminals and Honours", 3, 0, all_terminals_and_honours),
    pattern("ALL_TERMINALS", "All Terminals", 13, 0, all_terminals),
    pattern("THIRTEEN_ORPHANS", "Thirteen Orphans", 13, 0, thirteen_orphans),
    pattern(
        "THIRTEEN_ORPHANS_13_SIDED_WAIT",
        "Thirteen Orphans 13-sided Wait",
        13,
        0,
        thirteen_orphans_13_sided_wait,
    ),
    // Honours
    pattern("LITTLE_THREE_DRAGONS", "Little Three Dragons", 5, 0, little_three_dragons),
    pattern("BIG_THREE_DRAGONS", "Big Three Dragons", 8, 0, big_three_dragons),
    pattern("FOUR_LITTLE_WINDS", "Four Little Winds", 12, 0, four_little_winds),
    pattern("FOUR_BIG_WINDS", "Four Big Winds", 16, 0, four_big_winds),
    pattern("ALL_HONOURS", "All Honours", 10, 0, all_honours),
    // Yakuhai
    pattern("SEAT_WIND", "Seat Wind", 1, 0, seat_wind),
    pattern("PREVALENT_WIND", "Prevalent Wind", 1, 0, prevalent_wind),
    pattern("NORTH_WIND", "North Wind", 1, 0, north_wind),
    pattern("WHITE_DRAGON", "White Dragon", 1, 0, white_dragon),
    pattern("GREEN_DRAGON", "Green Dragon", 1, 0, green_dragon),
    pattern("RED_DRAGON", "Red Dragon", 1, 0, red_dragon),
    pattern("YAKUHAI_PAIR", "Yakuhai Pair", 0, 2, yakuhai_pair),
    // Meld fu
    pattern("SIMPLE_OPEN_TRIPLET", "Simple Open Triplet", 0, 2, |c| c.counts.simple_open_triplet),
    pattern("ORPHAN_OPEN_TRIPLET", "Orphan Open Triplet", 0, 4, |c| c.counts.orphan_open_triplet),
    pattern("SIMPLE_CLOSED_TRIPLET", "Simple Closed Triplet", 0, 4, |c| c.counts.simple_closed_triplet),
    pattern("ORPHAN_CLOSED_TRIPLET", "Orphan Closed Triplet", 0, 8, |c| c.counts.orphan_closed_triplet),
    pattern("SIMPLE_OPEN_QUAD", "Simple Open Quad", 0, 8, |c| c.counts.simple_open_quad),
    pattern("ORPHAN_OPEN_QUAD", "Orphan Open Quad", 0, 16, |c| c.counts.orphan_open_quad),
    pattern("SIMPLE_CLOSED_QUAD", "Simple Closed Quad", 0, 16, |c| c.counts.simple_closed_quad),
    pattern("ORPHAN_CLOSED_QUAD", "Orphan Closed Quad", 0, 32, |c| c.counts.orphan_closed_quad),
    // No calls
    pattern("NO_CALLS", "No Calls", 1, 0, no_calls),
    pattern("NO_CALLS_TSUMO", "No Calls Tsumo", 0, 0, no_calls_tsumo),
    pattern("NO_CALLS_RON", "No Calls Ron", 0, 10, no_calls_ron),
    // Flowers
    pattern("NO_FLOWERS", "No Flowers", 1, 0, no_flowers),
    pattern("SEAT_FLOWER", "Seat Flower", 1, 0, seat_flower),
    pattern("SET_OF_FLOWERS", "Set of Flowers", 2, 0, set_of_flowers),
    pattern("FIVE_FLOWERS", "Five Flowers", 2, 0, five_flowers),
    pattern("SEVEN_FLOWERS", "Seven Flowers", 2, 0, seven_flowers),
    pattern("TWO_SETS_OF_FLOWERS", "Two Sets of Flowers", 8, 0, two_sets_of_flowers),
    // Waits
    pattern("OPEN_WAIT", "Open Wait", 0, 0, |c| u32::from(c.wait_pattern == WaitPattern::Ryanmen)),
    pattern("CLOSED_WAIT", "Closed Wait", 0, 2, |c| u32::from(c.wait_pattern == WaitPattern::Kanchan)),
    pattern("EDGE_WAIT", "Edge Wait", 0, 2, |c| u32::from(c.wait_pattern == WaitPattern::Penchan)),
    pattern("DUAL_PON_WAIT", "Dual Pon Wait", 0, 0, |c| u32::from(c.wait_pattern == WaitPattern::Shanpon)),
    pattern("PAIR_WAIT", "Pair Wait", 0, 2, pair_wait),
];

fn flag(condition: bool) -> u32 {
    u32::from(condition)
}

fn contains_all(mask: ValueMask, values: &[TileValue]) -> bool {
    values.iter().all(|&value| mask.contains(value))
}

// Special wins

fn blessing_of_heaven(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.is_tenhou)
}

fn blessing_of_earth(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.is_chiihou)
}

fn riichi(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.is_riichi && !c.win.is_double_riichi)
}

fn double_riichi(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.is_double_riichi)
}

fn ippatsu(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.is_ippatsu)
}

fn robbing_a_kan(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.is_chankan)
}

fn under_the_sea(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.is_haitei)
}

fn under_the_river(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.is_houtei)
}

fn after_a_flower(c: &PatternCalculator<'_>) -> u32 {
    c.win.after_flower_count
}

fn after_a_kan(c: &PatternCalculator<'_>) -> u32 {
    c.win.after_kan_count
}

fn draw(c: &PatternCalculator<'_>) -> u32 {
    c.win.draw_count
}

// Sequences

fn all_sequences(c: &PatternCalculator<'_>) -> u32 {
    flag(c.counts.chii == 4)
}

fn pure_double_sequence(c: &PatternCalculator<'_>) -> u32 {
    flag(c.sequences_repeated(2) == 1)
}

fn twice_pure_double_sequence(c: &PatternCalculator<'_>) -> u32 {
    flag(c.sequences_repeated(2) == 2)
}

fn pure_triple_sequence(c: &PatternCalculator<'_>) -> u32 {
    flag(c.sequences_repeated(3) == 1)
}

fn pure_quadruple_sequence(c: &PatternCalculator<'_>) -> u32 {
    flag(c.sequences_repeated(4) == 1)
}

/// 123, 456 and 789 of one suit.
fn pure_straight(c: &PatternCalculator<'_>) -> u32 {
    flag(NUMBER_SUITS.iter().any(|&suit| {
        c.has_sequence_at(suit + 1) && c.has_sequence_at(suit + 4) && c.has_sequence_at(suit + 7)
    }))
}

/// The same sequence in all three suits.
fn mixed_triple_sequence(c: &PatternCalculator<'_>) -> u32 {
    flag(c.chii_starts.keys().any(|&start| {
        start < 10 && c.has_sequence_at(start + 10) && c.has_sequence_at(start + 20)
    }))
}

// Pinfu

fn is_pinfu_shape(c: &PatternCalculator<'_>) -> bool {
    c.counts.chii == 4 && c.wait_pattern == WaitPattern::Ryanmen && yakuhai_pair(c) == 0
}

fn closed_pinfu(c: &PatternCalculator<'_>) -> u32 {
    flag(is_pinfu_shape(c) && c.is_closed_hand)
}

fn open_pinfu(c: &PatternCalculator<'_>) -> u32 {
    flag(is_pinfu_shape(c) && !c.is_closed_hand)
}

fn non_pinfu_tsumo(c: &PatternCalculator<'_>) -> u32 {
    flag(c.is_tsumo() && closed_pinfu(c) == 0)
}

// Sets

fn all_triplets(c: &PatternCalculator<'_>) -> u32 {
    flag(c.triplet_tiles.len() == 4)
}

fn triple_triplets(c: &PatternCalculator<'_>) -> u32 {
    flag(c.triplet_tiles.iter().any(|value| {
        value < 10 && contains_all(c.triplet_tiles, &[value + 10, value + 20])
    }))
}

fn three_concealed_triplets(c: &PatternCalculator<'_>) -> u32 {
    flag(c.concealed_triplets == 3)
}

fn four_concealed_triplets(c: &PatternCalculator<'_>) -> u32 {
    flag(c.concealed_triplets == 4 && c.wait_pattern == WaitPattern::Shanpon)
}

fn four_concealed_triplets_1_sided_wait(c: &PatternCalculator<'_>) -> u32 {
    flag(c.concealed_triplets == 4 && c.wait_pattern == WaitPattern::Tanki)
}

fn three_quads(c: &PatternCalculator<'_>) -> u32 {
    flag(c.quads == 3)
}

fn four_quads(c: &PatternCalculator<'_>) -> u32 {
    flag(c.quads == 4)
}

// Pairs

fn seven_pairs(c: &PatternCalculator<'_>) -> u32 {
    flag(c.counts.pair_count == 7)
}

/// The pair is a 2, 5 or 8.
fn eyes(c: &PatternCalculator<'_>) -> u32 {
    let pair = c.counts.pair_tile;
    flag(c.counts.pair_count == 1 && is_number(pair) && (pair % 10) % 3 == 2)
}

// Flushes

fn half_flush(c: &PatternCalculator<'_>) -> u32 {
    flag(c.used_suits.len() == 2 && c.used_suits.contains(HONOUR_SUIT))
}

fn full_flush(c: &PatternCalculator<'_>) -> u32 {
    flag(c.used_suits.len() == 1 && c.used_suits.iter().all(is_number))
}

/// The tile left over after removing 1112345678999 from a closed full
/// flush, if the rest of the hand covers it.
fn nine_gates_extra_tile(c: &PatternCalculator<'_>) -> Option<TileValue> {
    if !c.is_closed_hand || full_flush(c) == 0 {
        return None;
    }
    let suit = c.used_suits.iter().next()?;
    let mut leftover = c.hand_tiles.clone();
    let gates = [1, 1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9];
    for number in gates {
        let index = leftover.iter().position(|&value| value == suit + number)?;
        leftover.remove(index);
    }
    leftover.first().copied()
}

fn nine_gates(c: &PatternCalculator<'_>) -> u32 {
    flag(nine_gates_extra_tile(c).is_some_and(|extra| extra != c.winning_tile))
}

fn true_nine_gates(c: &PatternCalculator<'_>) -> u32 {
    flag(nine_gates_extra_tile(c) == Some(c.winning_tile))
}

fn all_greens(c: &PatternCalculator<'_>) -> u32 {
    flag(c.hand_tiles.iter().all(|value| GREEN_TILES.contains(value)))
}

// Terminals

fn all_simples(c: &PatternCalculator<'_>) -> u32 {
    flag(c.hand_tiles
        .iter()
        .all(|&value| is_number(value) && (2..=8).contains(&(value % 10))))
}

/// Every meld holds a terminal or an honour, and both occur.
fn half_outside_hand(c: &PatternCalculator<'_>) -> u32 {
    flag(c.outsidenesses == [false, true, true])
}

/// Every meld holds a terminal.
fn fully_outside_hand(c: &PatternCalculator<'_>) -> u32 {
    flag(c.outsidenesses == [false, false, true])
}

fn all_terminals_and_honours(c: &PatternCalculator<'_>) -> u32 {
    flag(
        c.chii_starts.is_empty()
            && half_outside_hand(c) == 1
            && thirteen_orphans(c) == 0
            && thirteen_orphans_13_sided_wait(c) == 0,
    )
}

fn all_terminals(c: &PatternCalculator<'_>) -> u32 {
    flag(c.hand_tiles.iter().all(|value| TERMINALS.contains(value)))
}

fn thirteen_orphans(c: &PatternCalculator<'_>) -> u32 {
    flag(c.wait_pattern == WaitPattern::Kokushi)
}

fn thirteen_orphans_13_sided_wait(c: &PatternCalculator<'_>) -> u32 {
    flag(c.wait_pattern == WaitPattern::Kokushi13)
}

// Honours

/// Tiles of `values` held, with quads counted as triplets.
fn honour_total(c: &PatternCalculator<'_>, values: &[TileValue]) -> usize {
    values.iter().map(|&value| c.tile_count(value).min(3)).sum()
}

/// Two dragon triplets and a dragon pair.
fn little_three_dragons(c: &PatternCalculator<'_>) -> u32 {
    flag(honour_total(c, &DRAGONS) == 8)
}

fn big_three_dragons(c: &PatternCalculator<'_>) -> u32 {
    flag(contains_all(c.triplet_tiles, &DRAGONS))
}

/// Three wind triplets and a wind pair.
fn four_little_winds(c: &PatternCalculator<'_>) -> u32 {
    flag(honour_total(c, &WINDS) == 11)
}

fn four_big_winds(c: &PatternCalculator<'_>) -> u32 {
    flag(contains_all(c.triplet_tiles, &WINDS))
}

fn all_honours(c: &PatternCalculator<'_>) -> u32 {
    flag(c.used_suits == ValueMask::from_values([HONOUR_SUIT]))
}

// Yakuhai

/// A triplet, quad or other non-pair meld led by `value`.
fn has_set_of(c: &PatternCalculator<'_>, value: TileValue) -> u32 {
    flag(c
        .melds
        .iter()
        .any(|meld| meld.first() == value && meld.meld_type != MeldType::Pair))
}

fn seat_wind_value(c: &PatternCalculator<'_>) -> TileValue {
    EAST_WIND + c.seat as TileValue
}

fn prevalent_wind_value(c: &PatternCalculator<'_>) -> TileValue {
    EAST_WIND + c.win.wind_round as TileValue
}

fn seat_wind(c: &PatternCalculator<'_>) -> u32 {
    has_set_of(c, seat_wind_value(c))
}

fn prevalent_wind(c: &PatternCalculator<'_>) -> u32 {
    has_set_of(c, prevalent_wind_value(c))
}

/// Three-player tables treat north as a value tile.
fn north_wind(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.player_count == 3 && has_set_of(c, NORTH_WIND) == 1)
}

fn white_dragon(c: &PatternCalculator<'_>) -> u32 {
    has_set_of(c, DRAGONS[0])
}

fn green_dragon(c: &PatternCalculator<'_>) -> u32 {
    has_set_of(c, DRAGONS[1])
}

fn red_dragon(c: &PatternCalculator<'_>) -> u32 {
    has_set_of(c, DRAGONS[2])
}

/// Counts once per reason the pair is a value pair, so a double wind pair
/// counts twice.
fn yakuhai_pair(c: &PatternCalculator<'_>) -> u32 {
    if c.counts.pair_count != 1 {
        return 0;
    }
    let pair = c.counts.pair_tile;
    let north = (c.win.player_count == 3).then_some(NORTH_WIND);
    [seat_wind_value(c), prevalent_wind_value(c)]
        .into_iter()
        .chain(DRAGONS)
        .chain(north)
        .filter(|&value| value == pair)
        .count() as u32
}

// No calls

fn no_calls(c: &PatternCalculator<'_>) -> u32 {
    flag(c.counts.pair_count == 1 && c.is_closed_hand)
}

fn no_calls_tsumo(c: &PatternCalculator<'_>) -> u32 {
    flag(c.is_tsumo() && c.is_closed_hand)
}

fn no_calls_ron(c: &PatternCalculator<'_>) -> u32 {
    flag(!c.is_tsumo() && c.is_closed_hand && c.counts.pair_count != 7)
}

// Flowers

const THREE_PLAYER_FLOWER_SETS: [&[TileValue]; 2] = [&[41, 42, 43], &[45, 46, 47]];
const FOUR_PLAYER_FLOWER_SETS: [&[TileValue]; 2] = [&[41, 42, 43, 44], &[45, 46, 47, 48]];

fn no_flowers(c: &PatternCalculator<'_>) -> u32 {
    flag(c.flowers.is_empty())
}

/// One per flower matching the winner's seat.
fn seat_flower(c: &PatternCalculator<'_>) -> u32 {
    c.flowers
        .iter()
        .filter(|&value| usize::from(value - 41) % 4 == c.seat)
        .count() as u32
}

/// Exactly one complete set; both sets score as two sets instead.
fn set_of_flowers(c: &PatternCalculator<'_>) -> u32 {
    let sets = if c.win.player_count == 3 {
        THREE_PLAYER_FLOWER_SETS
    } else {
        FOUR_PLAYER_FLOWER_SETS
    };
    flag(sets.iter().filter(|set| contains_all(c.flowers, set)).count() == 1)
}

fn five_flowers(c: &PatternCalculator<'_>) -> u32 {
    flag(c.win.player_count == 3 && c.flowers.len() == 5)
}

fn seven_flowers(c: &PatternCalculator<'_>) -> u32 {
    flag(c.flowers.len() == 7)
}

fn two_sets_of_flowers(c: &PatternCalculator<'_>) -> u32 {
    let all = if c.win.player_count == 3 { 6 } else { 8 };
    flag(c.flowers.len() == all)
}

// Waits

fn pair_wait(c: &PatternCalculator<'_>) -> u32 {
    flag(c.wait_pattern == WaitPattern::Tanki && c.counts.pair_count == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_names_are_unique() {
        let mut names: Vec<&str> = PATTERNS.iter().map(|def| def.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PATTERNS.len());
    }

    #[test]
    fn test_table_defaults() {
        let find = |name: &str| PATTERNS.iter().find(|def| def.name == name).unwrap();
        assert_eq!(find("BLESSING_OF_HEAVEN").han, 20);
        assert_eq!(find("ORPHAN_CLOSED_QUAD").fu, 32);
        assert_eq!(find("NO_CALLS_RON").fu, 10);
        assert_eq!(find("CLOSED_PINFU").display_name, "Pinfu");
        assert_eq!(PATTERNS.len(), 76);
    }
}
