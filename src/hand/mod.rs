//! A player's hand: concealed tiles, declared calls, flowers and the riichi
//! marker, plus the queries that decide which actions the hand allows.
//!
//! The hand does not own the wall or the river. Operations that draw or
//! discard take the round's `Deck` and `DiscardPool` explicitly.

pub mod decompose;
pub mod shanten;

use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::call::Call;
use crate::core::deck::Deck;
use crate::core::discard::{Discard, DiscardPool, DiscardSource};
use crate::core::player::PlayerId;
use crate::core::tile::{is_number, tile_values, value_counts, Tile, TileValue};

use self::decompose::is_winning;
use self::shanten::{get_waits, ValueMask};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    player: PlayerId,
    tiles: Vec<Tile>,
    calls: Vec<Call>,
    flowers: Vec<Tile>,
    /// Pool index of the riichi discard.
    riichi_discard_index: Option<usize>,
}

impl Hand {
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            tiles: Vec::new(),
            calls: Vec::new(),
            flowers: Vec::new(),
            riichi_discard_index: None,
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Concealed tiles; the last one is the most recent draw until the hand
    /// is sorted again.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn tile_values(&self) -> Vec<TileValue> {
        tile_values(&self.tiles)
    }

    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    #[must_use]
    pub fn call_tiles(&self) -> Vec<Tile> {
        self.calls.iter().flat_map(Call::tiles).collect()
    }

    #[must_use]
    pub fn flowers(&self) -> &[Tile] {
        &self.flowers
    }

    #[must_use]
    pub fn is_riichi(&self) -> bool {
        self.riichi_discard_index.is_some()
    }

    #[must_use]
    pub fn riichi_discard_index(&self) -> Option<usize> {
        self.riichi_discard_index
    }

    /// No open calls; closed kans keep a hand closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.calls.iter().all(Call::is_closed)
    }

    /// Every tile the hand accounts for: concealed, called and flowers.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len() + self.call_tiles().len() + self.flowers.len()
    }

    pub fn sort(&mut self) {
        self.tiles.sort();
    }

    pub fn add_to_hand(&mut self, deck: &mut Deck, count: usize) {
        self.tiles.extend((0..count).map(|_| deck.pop()));
    }

    pub fn draw(&mut self, deck: &mut Deck) {
        self.tiles.push(deck.pop());
    }

    fn draw_from_back(&mut self, deck: &mut Deck) {
        self.tiles.push(deck.pop_back());
    }

    fn remove_tile(&mut self, tile: Tile) {
        let index = self
            .tiles
            .iter()
            .position(|&held| held == tile)
            .unwrap_or_else(|| panic!("{} is not in the hand of {}", tile, self.player));
        self.tiles.remove(index);
    }

    // Discards

    /// Legal discards. In riichi only the drawn tile may go; the last entry
    /// is the drawn tile either way.
    #[must_use]
    pub fn get_discards(&self) -> Vec<Action> {
        if self.is_riichi() {
            return self
                .tiles
                .last()
                .map(|&tile| vec![Action::Discard { tile }])
                .unwrap_or_default();
        }
        self.tiles
            .iter()
            .map(|&tile| Action::Discard { tile })
            .collect()
    }

    pub fn discard(&mut self, tile: Tile, pool: &mut DiscardPool) {
        self.remove_tile(tile);
        pool.append(self.player, tile);
        self.sort();
    }

    /// Discards that leave a closed hand ready.
    #[must_use]
    pub fn get_riichis(&self) -> Vec<Action> {
        if self.is_riichi() || !self.is_closed() {
            return Vec::new();
        }
        (0..self.tiles.len())
            .filter(|&index| {
                let rest: Vec<TileValue> = self
                    .tiles
                    .iter()
                    .enumerate()
                    .filter(|&(other, _)| other != index)
                    .map(|(_, tile)| tile.value())
                    .collect();
                !get_waits(&rest).is_empty()
            })
            .map(|index| Action::Riichi {
                tile: self.tiles[index],
            })
            .collect()
    }

    pub fn riichi(&mut self, tile: Tile, pool: &mut DiscardPool) {
        self.remove_tile(tile);
        pool.append_riichi(self.player, tile);
        self.riichi_discard_index = pool.riichi_index(self.player);
        self.sort();
    }

    // Calls on a discard

    /// Tiles of the hand whose value is `offset` away from `value`, in hand
    /// order, for offsets -2..=2.
    fn nearby_tiles(&self, value: TileValue) -> [Vec<Tile>; 5] {
        let mut nearby: [Vec<Tile>; 5] = Default::default();
        for &tile in &self.tiles {
            let diff = i16::from(tile.value()) - i16::from(value);
            if (-2..=2).contains(&diff) {
                nearby[(diff + 2) as usize].push(tile);
            }
        }
        nearby
    }

    /// Chiis on the last discard, lowest run first.
    #[must_use]
    pub fn get_chiis(&self, pool: &DiscardPool) -> Vec<Action> {
        if self.is_riichi() {
            return Vec::new();
        }
        let Some(discard) = pool.last_discarded_tile() else {
            return Vec::new();
        };
        if !is_number(discard.value()) {
            return Vec::new();
        }

        let nearby = self.nearby_tiles(discard.value());
        let mut actions = Vec::new();
        // Needs the value below, so never offered on a 1.
        if let Some(&below) = nearby[1].first() {
            if let Some(&two_below) = nearby[0].first() {
                actions.push(Action::Chii {
                    other_tiles: [two_below, below],
                });
            }
            if let Some(&above) = nearby[3].first() {
                actions.push(Action::Chii {
                    other_tiles: [below, above],
                });
            }
        }
        if let (Some(&above), Some(&two_above)) = (nearby[3].first(), nearby[4].first()) {
            actions.push(Action::Chii {
                other_tiles: [above, two_above],
            });
        }
        actions
    }

    fn same_value_tiles(&self, pool: &DiscardPool) -> Vec<Tile> {
        match pool.last_discarded_tile() {
            Some(discard) if !self.is_riichi() => self
                .tiles
                .iter()
                .copied()
                .filter(|tile| tile.value() == discard.value())
                .collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn get_pons(&self, pool: &DiscardPool) -> Vec<Action> {
        match self.same_value_tiles(pool).as_slice() {
            [first, second, ..] => vec![Action::Pon {
                other_tiles: [*first, *second],
            }],
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn get_open_kans(&self, pool: &DiscardPool) -> Vec<Action> {
        match self.same_value_tiles(pool).as_slice() {
            [first, second, third, ..] => vec![Action::OpenKan {
                other_tiles: [*first, *second, *third],
            }],
            _ => Vec::new(),
        }
    }

    pub fn chii(&mut self, called_player: PlayerId, other_tiles: [Tile; 2], pool: &mut DiscardPool) {
        other_tiles.iter().for_each(|&tile| self.remove_tile(tile));
        self.calls.push(Call::Chi {
            called_player,
            called_tile: pool.pop(),
            other_tiles,
        });
    }

    pub fn pon(&mut self, called_player: PlayerId, other_tiles: [Tile; 2], pool: &mut DiscardPool) {
        other_tiles.iter().for_each(|&tile| self.remove_tile(tile));
        self.calls.push(Call::Pon {
            called_player,
            called_tile: pool.pop(),
            other_tiles,
        });
    }

    pub fn open_kan(
        &mut self,
        called_player: PlayerId,
        other_tiles: [Tile; 3],
        pool: &mut DiscardPool,
        deck: &mut Deck,
    ) {
        other_tiles.iter().for_each(|&tile| self.remove_tile(tile));
        self.calls.push(Call::OpenKan {
            called_player,
            called_tile: pool.pop(),
            other_tiles,
        });
        self.sort();
        self.draw_from_back(deck);
    }

    // Kans from the hand

    /// Hand tiles that extend an existing pon.
    #[must_use]
    pub fn get_add_kans(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        for &tile in &self.tiles {
            let pon = self.calls.iter().find(|call| {
                matches!(call, Call::Pon { called_tile, .. } if called_tile.value() == tile.value())
            });
            if let Some(pon_call) = pon {
                actions.push(Action::AddKan {
                    tile,
                    pon_call: pon_call.clone(),
                });
            }
        }
        actions
    }

    pub fn add_kan(&mut self, tile: Tile, pon_call: &Call, pool: &mut DiscardPool, deck: &mut Deck) {
        let Call::Pon {
            called_player,
            called_tile,
            other_tiles,
        } = *pon_call
        else {
            panic!("Only a pon can be extended into a kan, got {:?}", pon_call);
        };
        let index = self
            .calls
            .iter()
            .position(|call| call == pon_call)
            .unwrap_or_else(|| panic!("{:?} is not a call of {}", pon_call, self.player));

        self.remove_tile(tile);
        self.calls[index] = Call::AddKan {
            called_player,
            called_tile,
            added_tile: tile,
            other_tiles,
        };
        pool.append_kan(self.player, tile, DiscardSource::AddedKan);
        self.sort();
        self.draw_from_back(deck);
    }

    /// Tiles of each held value, values in order of first appearance.
    fn value_groups(&self) -> Vec<Vec<Tile>> {
        let mut groups: Vec<Vec<Tile>> = Vec::new();
        for &tile in &self.tiles {
            match groups
                .iter_mut()
                .find(|group| group[0].value() == tile.value())
            {
                Some(group) => group.push(tile),
                None => groups.push(vec![tile]),
            }
        }
        groups
    }

    /// Closed kans. In riichi only the drawn tile can be declared, and only
    /// when the kan leaves the waits unchanged.
    #[must_use]
    pub fn get_closed_kans(&self) -> Vec<Action> {
        if self.is_riichi() {
            return self.riichi_closed_kan().into_iter().collect();
        }
        self.value_groups()
            .into_iter()
            .filter(|group| group.len() >= 4)
            .map(|mut group| {
                group.sort();
                Action::ClosedKan {
                    tiles: [group[0], group[1], group[2], group[3]],
                }
            })
            .collect()
    }

    fn riichi_closed_kan(&self) -> Option<Action> {
        let (&drawn, before_draw) = self.tiles.split_last()?;
        let group: Vec<Tile> = self
            .tiles
            .iter()
            .copied()
            .filter(|tile| tile.value() == drawn.value())
            .collect();
        if group.len() < 4 {
            return None;
        }
        let kan = [group[0], group[1], group[2], group[3]];
        let after_kan: Vec<Tile> = self
            .tiles
            .iter()
            .copied()
            .filter(|tile| !kan.contains(tile))
            .collect();
        (self.calculate_waits(before_draw) == self.calculate_waits(&after_kan))
            .then_some(Action::ClosedKan { tiles: kan })
    }

    pub fn closed_kan(&mut self, tiles: [Tile; 4], pool: &mut DiscardPool, deck: &mut Deck) {
        tiles.iter().for_each(|&tile| self.remove_tile(tile));
        self.calls.push(Call::ClosedKan { tiles });
        pool.append_kan(self.player, tiles[0], DiscardSource::ClosedKan);
        self.sort();
        self.draw_from_back(deck);
    }

    // Flowers

    #[must_use]
    pub fn get_flowers(&self) -> Vec<Action> {
        self.tiles
            .iter()
            .filter(|tile| tile.is_flower())
            .map(|&tile| Action::Flower { tile })
            .collect()
    }

    pub fn flower(&mut self, tile: Tile, deck: &mut Deck) {
        self.remove_tile(tile);
        self.flowers.push(tile);
        self.sort();
        self.draw_from_back(deck);
    }

    // Winning

    /// The concealed tiles form a complete hand.
    #[must_use]
    pub fn can_tsumo(&self) -> bool {
        is_winning(&self.tiles)
    }

    /// Values that would complete the hand.
    #[must_use]
    pub fn waits(&self) -> ValueMask {
        self.calculate_waits(&self.tiles)
    }

    /// Waits of `hand_tiles`, without values the hand already holds all
    /// four of (counting calls).
    fn calculate_waits(&self, hand_tiles: &[Tile]) -> ValueMask {
        if hand_tiles.len() % 3 != 1 {
            return ValueMask::EMPTY;
        }
        let mut held: Vec<TileValue> = tile_values(hand_tiles);
        held.extend(self.call_tiles().iter().map(|tile| tile.value()));
        let counts = value_counts(&held);

        let mut waits = get_waits(&tile_values(hand_tiles));
        for value in waits.iter() {
            if counts[value as usize] >= 4 {
                waits.remove(value);
            }
        }
        waits
    }

    // Furiten

    /// Discards another player made that this hand has passed on: settled,
    /// unclaimed and not from a closed kan.
    fn passed_on(&self, discard: &Discard) -> bool {
        discard.player != self.player
            && !discard.is_live
            && !discard.is_called
            && discard.source != DiscardSource::ClosedKan
    }

    /// A wait was passed on since this hand's own last discard.
    #[must_use]
    pub fn is_temporary_furiten(&self, pool: &DiscardPool) -> bool {
        let waits = self.waits();
        if waits.is_empty() {
            return false;
        }
        pool.discards()
            .iter()
            .rev()
            .take_while(|discard| {
                !(discard.player == self.player && discard.source == DiscardSource::Hand)
            })
            .any(|discard| self.passed_on(discard) && waits.contains(discard.tile.value()))
    }

    /// A wait was passed on at any point after declaring riichi.
    #[must_use]
    pub fn is_riichi_furiten(&self, pool: &DiscardPool) -> bool {
        let Some(index) = self.riichi_discard_index else {
            return false;
        };
        let waits = self.waits();
        pool.discards()
            .iter()
            .skip(index + 1)
            .any(|discard| self.passed_on(discard) && waits.contains(discard.tile.value()))
    }

    #[must_use]
    pub fn is_furiten(&self, pool: &DiscardPool) -> bool {
        self.is_temporary_furiten(pool) || self.is_riichi_furiten(pool)
    }
}
