//! Splitting a complete hand into melds.
//!
//! Decomposition runs on tile values. Each value-level decomposition is
//! then turned into physical melds once per distinct meld that can hold the
//! winning tile (the last tile of the input), since where the winning tile
//! sits changes the wait and therefore the score.

use smallvec::smallvec;

use crate::core::meld::{Meld, MeldTiles, MeldType, TileValueMeld};
use crate::core::tile::{suit_of, value_buckets, Tile, TileValue, HONOUR_SUIT, ORPHANS};

type ValueHand = Vec<TileValueMeld>;

fn pon(value: TileValue) -> TileValueMeld {
    TileValueMeld::new(MeldType::Pon, [value; 3])
}

fn pair(value: TileValue) -> TileValueMeld {
    TileValueMeld::new(MeldType::Pair, [value; 2])
}

fn chi(value: TileValue) -> TileValueMeld {
    TileValueMeld::new(MeldType::Chi, [value, value + 1, value + 2])
}

/// `(value, count)` in ascending value order.
fn counts(values: &[TileValue]) -> Vec<(TileValue, usize)> {
    let mut counts: Vec<(TileValue, usize)> = Vec::new();
    for &value in values {
        match counts.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => counts.push((value, 1)),
        }
    }
    counts
}

fn remove_one(values: &mut Vec<TileValue>, value: TileValue) -> bool {
    match values.iter().position(|&v| v == value) {
        Some(index) => {
            values.remove(index);
            true
        }
        None => false,
    }
}

fn prepend(meld: TileValueMeld, hands: Vec<ValueHand>) -> impl Iterator<Item = ValueHand> {
    hands.into_iter().map(move |mut hand| {
        hand.insert(0, meld.clone());
        hand
    })
}

/// Split a sorted number suit into triplets and runs.
fn split_melds(values: &[TileValue]) -> Vec<ValueHand> {
    debug_assert!(values.len() % 3 == 0);
    let Some(&first) = values.first() else {
        return vec![Vec::new()];
    };

    let mut hands = Vec::new();
    if values.len() >= 3 && values[2] == first {
        hands.extend(prepend(pon(first), split_melds(&values[3..])));
    }

    let mut rest = values[1..].to_vec();
    if remove_one(&mut rest, first + 1) && remove_one(&mut rest, first + 2) {
        hands.extend(prepend(chi(first), split_melds(&rest)));
    }
    hands
}

/// Split a sorted number suit into a pair plus triplets and runs.
fn split_melds_and_pair(values: &[TileValue]) -> Vec<ValueHand> {
    debug_assert!(values.len() % 3 == 2);
    let total: usize = values.iter().map(|&value| value as usize).sum();

    let mut hands = Vec::new();
    let mut start = 0;
    for (value, count) in counts(values) {
        if count >= 2 && (total - 2 * value as usize) % 3 == 0 {
            let mut rest = values.to_vec();
            rest.drain(start..start + 2);
            hands.extend(prepend(pair(value), split_melds(&rest)));
        }
        start += count;
    }
    hands
}

/// Honours only form triplets, plus one pair when `with_pair`.
fn split_pons(values: &[TileValue], with_pair: bool) -> Vec<ValueHand> {
    let counts = counts(values);
    let non_triplets = counts.iter().filter(|&&(_, count)| count != 3).count();
    let expected = usize::from(with_pair);
    if non_triplets != expected {
        return Vec::new();
    }
    if with_pair && !counts.iter().any(|&(_, count)| count == 2) {
        return Vec::new();
    }
    vec![counts
        .into_iter()
        .map(|(value, count)| if count == 3 { pon(value) } else { pair(value) })
        .collect()]
}

fn standard_possibilities(values: &[TileValue]) -> Vec<ValueHand> {
    if values.len() % 3 != 2 {
        return Vec::new();
    }

    let mut suits: [Vec<TileValue>; 4] = Default::default();
    for &value in values {
        let index = (suit_of(value) / 10).min(3) as usize;
        suits[index].push(value);
    }
    if suits.iter().filter(|suit| suit.len() % 3 != 0).count() != 1 {
        return Vec::new();
    }

    let mut hands: Vec<ValueHand> = vec![Vec::new()];
    for (index, suit) in suits.iter().enumerate() {
        if hands.is_empty() {
            break;
        }
        let with_pair = suit.len() % 3 == 2;
        let suit_hands = if index < 3 {
            if with_pair {
                split_melds_and_pair(suit)
            } else {
                split_melds(suit)
            }
        } else {
            split_pons(suit, with_pair)
        };
        hands = hands
            .iter()
            .flat_map(|hand| {
                suit_hands.iter().map(move |suit_hand| {
                    let mut combined = hand.clone();
                    combined.extend(suit_hand.iter().cloned());
                    combined
                })
            })
            .collect();
    }
    hands
}

fn seven_pairs(values: &[TileValue]) -> Option<ValueHand> {
    let counts = counts(values);
    (counts.len() == 7 && counts.iter().all(|&(_, count)| count == 2))
        .then(|| counts.into_iter().map(|(value, _)| pair(value)).collect())
}

fn thirteen_orphans(values: &[TileValue]) -> Option<ValueHand> {
    let mut rest = values.to_vec();
    for orphan in ORPHANS {
        if !remove_one(&mut rest, orphan) {
            return None;
        }
    }
    match rest.as_slice() {
        [extra] if ORPHANS.contains(extra) => Some(vec![TileValueMeld::new(
            MeldType::ThirteenOrphans,
            values.iter().copied(),
        )]),
        _ => None,
    }
}

/// Every value-level decomposition of `values` into four melds and a pair
/// (or seven pairs, or thirteen orphans at 14 tiles). Values must be sorted.
#[must_use]
pub fn value_possibilities(values: &[TileValue]) -> Vec<Vec<TileValueMeld>> {
    debug_assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    if values.iter().any(|&value| suit_of(value) > HONOUR_SUIT) {
        return Vec::new();
    }
    let mut hands = standard_possibilities(values);
    if values.len() == 14 {
        hands.extend(seven_pairs(values));
        hands.extend(thirteen_orphans(values));
    }
    hands
}

/// Turn a value decomposition into physical melds, with the winning tile
/// placed in the meld at `winning_meld`.
fn assign_tiles(
    hand: &[TileValueMeld],
    other_tiles: &[Tile],
    winning_tile: Tile,
    winning_meld: usize,
) -> Vec<Meld> {
    let mut sorted = other_tiles.to_vec();
    sorted.sort();
    let mut buckets = value_buckets(&sorted);
    let winning_value = winning_tile.value();

    hand.iter()
        .enumerate()
        .map(|(index, value_meld)| {
            if value_meld.meld_type == MeldType::ThirteenOrphans {
                let mut tiles: MeldTiles<Tile> = sorted.iter().copied().collect();
                tiles.push(winning_tile);
                tiles.sort();
                let winning_tile_index = tiles.iter().position(|&tile| tile == winning_tile);
                return Meld {
                    meld_type: MeldType::ThirteenOrphans,
                    tiles,
                    winning_tile_index,
                };
            }

            let winning_position = (index == winning_meld)
                .then(|| value_meld.tiles.iter().position(|&value| value == winning_value))
                .flatten();
            let mut tiles: MeldTiles<Tile> = smallvec![];
            for (position, &value) in value_meld.tiles.iter().enumerate() {
                if Some(position) == winning_position {
                    tiles.push(winning_tile);
                } else {
                    let bucket = buckets
                        .get_mut(&value)
                        .filter(|bucket| !bucket.is_empty())
                        .unwrap_or_else(|| panic!("No tile left for value {}", value));
                    tiles.push(bucket.remove(0));
                }
            }
            Meld {
                meld_type: value_meld.meld_type,
                tiles,
                winning_tile_index: winning_position,
            }
        })
        .collect()
}

/// Every way to arrange `tiles` into a complete hand. The last tile is the
/// winning tile; each result marks which meld it completed.
///
/// ```
/// use rust_mahjong::core::{MeldType, Tile};
/// use rust_mahjong::hand::decompose::formed_hand_possibilities;
///
/// // 1-2-3 plus a pair of 5s, won on the 3.
/// let tiles: Vec<Tile> = [10, 20, 50, 51, 30].into_iter().map(Tile::new).collect();
/// let hands = formed_hand_possibilities(&tiles);
/// assert_eq!(hands.len(), 1);
/// let run = hands[0].iter().find(|meld| meld.meld_type == MeldType::Chi).unwrap();
/// assert_eq!(run.winning_tile_index, Some(2));
/// ```
#[must_use]
pub fn formed_hand_possibilities(tiles: &[Tile]) -> Vec<Vec<Meld>> {
    let Some((&winning_tile, other_tiles)) = tiles.split_last() else {
        return Vec::new();
    };
    let mut values: Vec<TileValue> = tiles.iter().map(|tile| tile.value()).collect();
    values.sort_unstable();
    let winning_value = winning_tile.value();

    let mut formed_hands = Vec::new();
    for hand in value_possibilities(&values) {
        let mut seen: Vec<&TileValueMeld> = Vec::new();
        for (index, meld) in hand.iter().enumerate() {
            if !meld.tiles.contains(&winning_value) || seen.contains(&meld) {
                continue;
            }
            seen.push(meld);
            formed_hands.push(assign_tiles(&hand, other_tiles, winning_tile, index));
        }
    }
    formed_hands
}

/// Whether `tiles` form a complete hand.
#[must_use]
pub fn is_winning(tiles: &[Tile]) -> bool {
    let mut values: Vec<TileValue> = tiles.iter().map(|tile| tile.value()).collect();
    values.sort_unstable();
    !value_possibilities(&values).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(ids: &[u16]) -> Vec<Tile> {
        ids.iter().copied().map(Tile::new).collect()
    }

    #[test]
    fn test_wrong_size_hand() {
        assert!(!is_winning(&tiles(&[40, 50, 60, 70])));
    }

    #[test]
    fn test_wrong_size_suits() {
        // 8-9 man with 1-1 pin, 6-6-6-6 man missing a partner.
        assert!(!is_winning(&tiles(&[80, 90, 110, 111, 60, 61, 62, 63])));
    }

    #[test]
    fn test_pairs_win() {
        assert!(is_winning(&tiles(&[20, 21])));
        assert!(is_winning(&tiles(&[310, 311])));
    }

    #[test]
    fn test_unsorted_run() {
        assert!(is_winning(&tiles(&[30, 50, 40, 20, 21])));
        assert!(!is_winning(&tiles(&[10, 20, 21, 30, 40])));
    }

    #[test]
    fn test_honours_do_not_run() {
        assert!(!is_winning(&tiles(&[80, 81, 310, 320, 330])));
    }

    #[test]
    fn test_triple_run_has_two_shapes() {
        // 111 222 333 + 88: three triplets or three runs.
        let hand = tiles(&[10, 11, 12, 20, 21, 22, 30, 31, 32, 80, 81]);
        let mut values: Vec<TileValue> = hand.iter().map(|tile| tile.value()).collect();
        values.sort_unstable();
        assert_eq!(value_possibilities(&values).len(), 2);
    }

    #[test]
    fn test_winning_tile_in_each_distinct_meld() {
        // 1-2-3 1-2-3 + 5-5, won on a 1: both runs are identical.
        let hand = tiles(&[11, 20, 21, 30, 31, 50, 51, 10]);
        let formed = formed_hand_possibilities(&hand);
        assert_eq!(formed.len(), 1);

        // 2-3-4 + 4-4, won on a 4: the run or the pair.
        let hand = tiles(&[20, 30, 41, 42, 40]);
        let formed = formed_hand_possibilities(&hand);
        assert_eq!(formed.len(), 2);
        for melds in &formed {
            let winning: Vec<&Meld> = melds
                .iter()
                .filter(|meld| meld.winning_tile_index.is_some())
                .collect();
            assert_eq!(winning.len(), 1);
            let meld = winning[0];
            assert_eq!(meld.tiles[meld.winning_tile_index.unwrap()], Tile::new(40));
        }
    }

    #[test]
    fn test_every_tile_is_used_once() {
        let hand = tiles(&[10, 20, 30, 11, 21, 31, 150, 151, 152, 350, 351, 352, 90, 91]);
        for melds in formed_hand_possibilities(&hand) {
            let mut used: Vec<Tile> = melds.iter().flat_map(|meld| meld.tiles.clone()).collect();
            used.sort();
            let mut expected = hand.clone();
            expected.sort();
            assert_eq!(used, expected);
        }
    }

    #[test]
    fn test_nine_gates_wins_on_any_tile() {
        let base = [10, 11, 12, 20, 30, 40, 50, 60, 70, 80, 90, 91, 92];
        for value in 1..10u16 {
            let mut hand = tiles(&base);
            hand.push(Tile::new(value * 10 + 3));
            assert!(is_winning(&hand), "nine gates should win on {}", value);
        }
    }

    #[test]
    fn test_seven_pairs() {
        let hand = tiles(&[10, 11, 50, 51, 90, 91, 130, 131, 150, 151, 270, 271, 350, 351]);
        let formed = formed_hand_possibilities(&hand);
        assert_eq!(formed.len(), 1);
        assert_eq!(formed[0].len(), 7);
        assert!(formed[0].iter().all(|meld| meld.meld_type == MeldType::Pair));
    }

    #[test]
    fn test_seven_pairs_need_distinct_values() {
        let hand = tiles(&[10, 11, 50, 51, 90, 91, 130, 131, 132, 133, 270, 271, 350, 351]);
        assert!(!is_winning(&hand));
    }

    #[test]
    fn test_thirteen_orphans() {
        let hand = tiles(&[
            10, 90, 110, 190, 210, 290, 310, 320, 330, 340, 350, 360, 370, 11,
        ]);
        let formed = formed_hand_possibilities(&hand);
        assert_eq!(formed.len(), 1);
        let meld = &formed[0][0];
        assert_eq!(meld.meld_type, MeldType::ThirteenOrphans);
        assert_eq!(meld.tiles.len(), 14);
        assert_eq!(meld.tiles[meld.winning_tile_index.unwrap()], Tile::new(11));
    }

    #[test]
    fn test_twice_pure_double_sequence_prefers_every_shape() {
        // 112233 445566 + 99: runs or pairs.
        let hand = tiles(&[10, 11, 20, 21, 30, 31, 40, 41, 50, 51, 60, 61, 90, 91]);
        let mut values: Vec<TileValue> = hand.iter().map(|tile| tile.value()).collect();
        values.sort_unstable();
        let possibilities = value_possibilities(&values);
        assert!(possibilities.iter().any(|hand| hand.len() == 7));
        assert!(possibilities.iter().any(|hand| hand.len() == 5));
    }
}
