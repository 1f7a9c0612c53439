//! Shanten and waits.
//!
//! Each number suit is solved on its own by a DP over the groups that can
//! be taken from its lowest remaining tile. The result is a table indexed by
//! `2 * melds + has_pair`: for each entry, the most tiles that can be used
//! and the set of tiles that would use one more. Honours only form
//! triplets and pairs, so their table is built greedily. The four tables
//! are then merged by a bounded cross product.
//!
//! ```
//! use rust_mahjong::hand::shanten::{calculate_shanten, get_waits};
//!
//! let (shanten, useful) = calculate_shanten(&[2, 3, 15, 32]);
//! assert_eq!(shanten, 1);
//! assert_eq!(useful.values(), vec![1, 4, 15, 32]);
//!
//! assert_eq!(get_waits(&[4, 5, 31, 31]).values(), vec![3, 6]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::tile::{is_flower, TileValue, MAX_PLAYABLE_VALUE, ORPHANS};

/// Number of entries in a shanten table: up to four melds, with or without
/// a pair.
pub const TABLE_LEN: usize = 10;

const SUIT_FULL: u16 = 0b111_111_111;
const HONOURS_FULL: u16 = 0b1111_111;

/// `(tiles used, useful tiles)` per `2 * melds + has_pair`, with suit-local
/// masks: bit `0b100_000_000 >> t` is the tile at offset `t`.
pub type ShantenData = [(u32, u16); TABLE_LEN];

/// A set of tile values, one bit per value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMask(pub u64);

impl ValueMask {
    pub const EMPTY: ValueMask = ValueMask(0);

    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = TileValue>) -> Self {
        let mut mask = Self::EMPTY;
        for value in values {
            mask.insert(value);
        }
        mask
    }

    #[must_use]
    pub fn contains(self, value: TileValue) -> bool {
        value < 64 && self.0 & (1 << value) != 0
    }

    pub fn insert(&mut self, value: TileValue) {
        debug_assert!(value < 64, "Tile value {} does not fit a mask", value);
        self.0 |= 1 << value;
    }

    pub fn remove(&mut self, value: TileValue) {
        if value < 64 {
            self.0 &= !(1 << value);
        }
    }

    #[must_use]
    pub fn union(self, other: ValueMask) -> ValueMask {
        ValueMask(self.0 | other.0)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Values in ascending order.
    pub fn iter(self) -> impl Iterator<Item = TileValue> {
        (0..64u8).filter(move |&value| self.contains(value))
    }

    #[must_use]
    pub fn values(self) -> Vec<TileValue> {
        self.iter().collect()
    }
}

impl fmt::Debug for ValueMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<TileValue> for ValueMask {
    fn from_iter<I: IntoIterator<Item = TileValue>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

fn update(data: &mut ShantenData, index: usize, used: u32, useful: u16) {
    let entry = &mut data[index];
    if used > entry.0 {
        *entry = (used, useful);
    } else if used == entry.0 {
        entry.1 |= useful;
    }
}

/// Tiles a pair would use from `freqs`, and which tiles would complete it.
fn pair_useful_tiles(freqs: &[u8; 9]) -> (u32, u16) {
    let mut useful = 0;
    for (tile, &freq) in freqs.iter().enumerate() {
        if freq >= 2 {
            return (2, 0);
        }
        if freq == 1 {
            useful |= 0b100_000_000 >> tile;
        }
    }
    if useful != 0 {
        (1, useful)
    } else {
        (0, SUIT_FULL)
    }
}

fn try_group(
    data: &mut ShantenData,
    unmelded: &[u8; 9],
    first_tile: usize,
    meld_count: usize,
    used: u32,
    useful: u16,
) {
    let (pair_used, pair_useful) = pair_useful_tiles(unmelded);
    update(data, meld_count * 2, used, useful);
    update(data, meld_count * 2 + 1, used + pair_used, useful | pair_useful);

    if meld_count >= 4 {
        return;
    }
    for more in meld_count + 1..5 {
        update(data, more * 2, used, SUIT_FULL);
        update(data, more * 2 + 1, used + pair_used, SUIT_FULL);
    }

    // Nothing beats four melds and a pair.
    if data[4 * 2 + 1].0 == 14 {
        return;
    }

    let mut rest = *unmelded;
    for tile in first_tile..9 {
        if unmelded[tile] == 0 {
            continue;
        }
        rest[tile] -= 1;

        if unmelded[tile] >= 3 {
            rest[tile] -= 2;
            try_group(data, &rest, tile, meld_count + 1, used + 3, useful);
            rest[tile] += 2;
        } else if unmelded[tile] == 2 {
            rest[tile] -= 1;
            try_group(
                data,
                &rest,
                tile,
                meld_count + 1,
                used + 2,
                useful | (0b100_000_000 >> tile),
            );
            rest[tile] += 1;
        }

        if tile + 2 < 9 && unmelded[tile + 2] != 0 {
            rest[tile + 2] -= 1;
            if unmelded[tile + 1] != 0 {
                rest[tile + 1] -= 1;
                try_group(data, &rest, tile, meld_count + 1, used + 3, useful);
                rest[tile + 1] += 1;
            } else {
                try_group(
                    data,
                    &rest,
                    tile,
                    meld_count + 1,
                    used + 2,
                    useful | (0b010_000_000 >> tile),
                );
            }
            rest[tile + 2] += 1;
        }

        if tile + 1 < 9 && unmelded[tile + 1] != 0 {
            rest[tile + 1] -= 1;
            try_group(
                data,
                &rest,
                tile,
                meld_count + 1,
                used + 2,
                useful | (0b1_001_000_000 >> tile),
            );
            rest[tile + 1] += 1;
        }

        try_group(
            data,
            &rest,
            tile,
            meld_count + 1,
            used + 1,
            useful | (0b11_111_000_000 >> tile),
        );

        rest[tile] += 1;
    }
}

/// Shanten table of one number suit, from the counts of its nine tiles.
#[must_use]
pub fn suit_shanten_data(freqs: [u8; 9]) -> ShantenData {
    let mut data = [(0, 0); TABLE_LEN];
    try_group(&mut data, &freqs, 0, 0, 0, 0);
    for entry in &mut data {
        entry.1 &= SUIT_FULL;
    }
    data
}

/// Shanten table of the honours, from the counts of the seven honour tiles.
/// Masks are `0b1000_000 >> t` for honour offset `t`.
#[must_use]
pub fn honours_shanten_data(mut freqs: [u8; 7]) -> ShantenData {
    let mut data = [(0, 0); TABLE_LEN];

    let mut triplet_count = 0;
    let mut tile = 0;
    while tile < 7 {
        if freqs[tile] >= 3 {
            triplet_count += 1;
            freqs[tile] -= 3;
        } else {
            tile += 1;
        }
    }

    let (mut single_count, mut single_useful) = (0, 0u16);
    let (mut pair_count, mut pair_useful) = (0, 0u16);
    for (tile, &freq) in freqs.iter().enumerate() {
        if freq == 2 {
            pair_count += 1;
            pair_useful |= 0b1000_000 >> tile;
        } else if freq == 1 {
            single_count += 1;
            single_useful |= 0b1000_000 >> tile;
        }
    }

    let mut meld_count = 0;
    let mut used = 0;
    let mut useful = 0u16;

    while meld_count < triplet_count {
        data[meld_count * 2 + 1] = (used + 2, useful);
        if meld_count >= 4 {
            return data;
        }
        meld_count += 1;
        used += 3;
        data[meld_count * 2] = (used, useful);
    }
    while meld_count < triplet_count + pair_count {
        data[meld_count * 2 + 1] = (used + 2, useful);
        if meld_count >= 4 {
            return data;
        }
        useful = pair_useful;
        meld_count += 1;
        used += 2;
        data[meld_count * 2] = (used, useful);
    }
    useful |= single_useful;
    while meld_count < triplet_count + pair_count + single_count {
        data[meld_count * 2 + 1] = (used + 1, useful);
        if meld_count >= 4 {
            return data;
        }
        meld_count += 1;
        used += 1;
        data[meld_count * 2] = (used, useful);
    }
    useful = HONOURS_FULL;
    loop {
        data[meld_count * 2 + 1] = (used, useful);
        if meld_count >= 4 {
            return data;
        }
        meld_count += 1;
        data[meld_count * 2] = (used, useful);
    }
}

type GlobalData = [(u32, ValueMask); TABLE_LEN];

/// Lift a suit-local table to global value masks. `last_value` is the value
/// of the lowest mask bit.
fn globalize(data: &ShantenData, width: u32, last_value: TileValue) -> GlobalData {
    let mut global = [(0, ValueMask::EMPTY); TABLE_LEN];
    for (index, &(used, local)) in data.iter().enumerate() {
        let mut mask = ValueMask::EMPTY;
        for bit in 0..width {
            if local & (1 << bit) != 0 {
                mask.insert(last_value - bit as TileValue);
            }
        }
        global[index] = (used, mask);
    }
    global
}

fn combine_data(first: &GlobalData, second: &GlobalData) -> GlobalData {
    let mut data = [(0, ValueMask::EMPTY); TABLE_LEN];
    for (k1, &(used1, mask1)) in first.iter().enumerate() {
        for (k2, &(used2, mask2)) in second.iter().enumerate() {
            if k1 % 2 == 1 && k2 % 2 == 1 {
                continue;
            }
            if k1 + k2 >= TABLE_LEN {
                break;
            }
            let used = used1 + used2;
            let mask = mask1.union(mask2);
            let entry = &mut data[k1 + k2];
            if used > entry.0 {
                *entry = (used, mask);
            } else if used == entry.0 {
                entry.1 = entry.1.union(mask);
            }
        }
    }
    data
}

fn slice9(freqs: &[u8; 64], start: usize) -> [u8; 9] {
    let mut suit = [0; 9];
    suit.copy_from_slice(&freqs[start..start + 9]);
    suit
}

fn standard_shanten(freqs: &[u8; 64], meld_count: usize) -> (u32, ValueMask) {
    let suit0 = globalize(&suit_shanten_data(slice9(freqs, 1)), 9, 9);
    let suit1 = globalize(&suit_shanten_data(slice9(freqs, 11)), 9, 19);
    let suit2 = globalize(&suit_shanten_data(slice9(freqs, 21)), 9, 29);

    let mut honours = [0; 7];
    honours.copy_from_slice(&freqs[31..38]);
    let honours = globalize(&honours_shanten_data(honours), 7, 37);

    let data = combine_data(&combine_data(&suit0, &suit1), &combine_data(&suit2, &honours));
    data[meld_count * 2 + 1]
}

fn all_playable_values() -> impl Iterator<Item = TileValue> {
    (1..MAX_PLAYABLE_VALUE).filter(|value| value % 10 != 0)
}

fn seven_pairs_shanten(freqs: &[u8; 64]) -> (u32, ValueMask) {
    let mut pairs = ValueMask::EMPTY;
    let mut singles = ValueMask::EMPTY;
    for (value, &freq) in freqs.iter().enumerate() {
        if freq >= 2 {
            pairs.insert(value as TileValue);
        } else if freq == 1 {
            singles.insert(value as TileValue);
        }
    }

    let pair_count = pairs.len() as u32;
    let single_count = singles.len() as u32;
    if pair_count >= 7 {
        return (14, ValueMask::EMPTY);
    }
    if pair_count + single_count >= 7 {
        return (7 + pair_count, singles);
    }
    (
        pair_count * 2 + single_count,
        all_playable_values()
            .filter(|&value| !pairs.contains(value))
            .collect(),
    )
}

fn thirteen_orphans_shanten(freqs: &[u8; 64]) -> (u32, ValueMask) {
    let mut held = ValueMask::EMPTY;
    let mut has_pair = false;
    for &orphan in &ORPHANS {
        let freq = freqs[orphan as usize];
        if freq >= 1 {
            held.insert(orphan);
        }
        if freq >= 2 {
            has_pair = true;
        }
    }
    let all: ValueMask = ORPHANS.iter().copied().collect();
    if has_pair {
        (
            held.len() as u32 + 1,
            ValueMask(all.0 & !held.0),
        )
    } else {
        (held.len() as u32, all)
    }
}

fn better(first: (u32, ValueMask), second: (u32, ValueMask)) -> (u32, ValueMask) {
    match first.0.cmp(&second.0) {
        std::cmp::Ordering::Greater => first,
        std::cmp::Ordering::Less => second,
        std::cmp::Ordering::Equal => (first.0, first.1.union(second.1)),
    }
}

/// Shanten of a hand and the tiles that lower it.
///
/// The hand size decides the target: `(n - 1) / 3` melds plus a pair.
/// Shanten is -1 for a complete hand, 0 for a ready one. Seven pairs and
/// thirteen orphans are only considered for 13-tile hands. Flowers are
/// ignored.
#[must_use]
pub fn calculate_shanten(values: &[TileValue]) -> (i32, ValueMask) {
    let meld_count = values.len().saturating_sub(1) / 3;

    let mut freqs = [0u8; 64];
    for &value in values {
        if value < MAX_PLAYABLE_VALUE {
            freqs[value as usize] += 1;
        }
    }

    let mut datum = standard_shanten(&freqs, meld_count);
    if values.len() == 13 {
        datum = better(
            datum,
            better(seven_pairs_shanten(&freqs), thirteen_orphans_shanten(&freqs)),
        );
    }

    (meld_count as i32 * 3 + 1 - datum.0 as i32, datum.1)
}

/// The values that complete a ready hand. Empty unless the hand has
/// `3k + 1` tiles, holds no flowers and is at shanten 0.
#[must_use]
pub fn get_waits(values: &[TileValue]) -> ValueMask {
    if values.len() % 3 != 1 || values.iter().any(|&value| is_flower(value)) {
        return ValueMask::EMPTY;
    }
    match calculate_shanten(values) {
        (0, waits) => waits,
        _ => ValueMask::EMPTY,
    }
}
