//! The shared river of discarded tiles.
//!
//! Besides real discards the pool records the tiles revealed by added and
//! closed kans, since another player may rob them. Entries are never
//! removed: a discard claimed by a call is only flagged as called.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::tile::Tile;

/// Where a pool entry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscardSource {
    /// A normal discard (including the riichi declaration tile).
    Hand,
    /// The tile added to a pon to upgrade it into a kan.
    AddedKan,
    /// One tile of a closed kan, shown to the table.
    ClosedKan,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    pub player: PlayerId,
    pub tile: Tile,
    /// The discard that declared riichi.
    pub is_riichi: bool,
    /// Claimed by another player's chi, pon or open kan.
    pub is_called: bool,
    pub source: DiscardSource,
    /// Still on offer to the other players (it can be ronned or called).
    pub is_live: bool,
}

impl Discard {
    #[must_use]
    pub fn is_kan(&self) -> bool {
        self.source != DiscardSource::Hand
    }
}

/// Ordered discard history for a round.
///
/// ```
/// use rust_mahjong::core::{DiscardPool, PlayerId, Tile};
///
/// let mut pool = DiscardPool::new();
/// pool.append(PlayerId::new(0), Tile::new(52));
/// assert_eq!(pool.last_discarded_tile(), Some(Tile::new(52)));
///
/// assert_eq!(pool.pop(), Tile::new(52));
/// assert_eq!(pool.last_discarded_tile(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPool {
    discards: Vec<Discard>,
}

impl DiscardPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn discards(&self) -> &[Discard] {
        &self.discards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.discards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discards.is_empty()
    }

    /// The last discarded tile, unless it was claimed (or nothing was
    /// discarded yet).
    #[must_use]
    pub fn last_discarded_tile(&self) -> Option<Tile> {
        self.discards
            .last()
            .filter(|discard| !discard.is_called)
            .map(|discard| discard.tile)
    }

    pub fn append(&mut self, player: PlayerId, tile: Tile) {
        self.push(player, tile, false, DiscardSource::Hand);
    }

    pub fn append_riichi(&mut self, player: PlayerId, tile: Tile) {
        self.push(player, tile, true, DiscardSource::Hand);
    }

    pub fn append_kan(&mut self, player: PlayerId, tile: Tile, source: DiscardSource) {
        assert!(source != DiscardSource::Hand, "Kan entries need a kan source");
        self.push(player, tile, false, source);
    }

    fn push(&mut self, player: PlayerId, tile: Tile, is_riichi: bool, source: DiscardSource) {
        self.settle();
        self.discards.push(Discard {
            player,
            tile,
            is_riichi,
            is_called: false,
            source,
            is_live: true,
        });
    }

    /// Claim the last discard for a call and return its tile.
    pub fn pop(&mut self) -> Tile {
        let last = self
            .discards
            .last_mut()
            .unwrap_or_else(|| panic!("No discard to claim"));
        assert!(!last.is_called, "Discard {} was already claimed", last.tile);
        last.is_called = true;
        last.is_live = false;
        last.tile
    }

    /// The newest entry is no longer on offer.
    pub fn settle(&mut self) {
        if let Some(last) = self.discards.last_mut() {
            last.is_live = false;
        }
    }

    /// Index of the discard with which `player` declared riichi.
    #[must_use]
    pub fn riichi_index(&self, player: PlayerId) -> Option<usize> {
        self.discards
            .iter()
            .position(|discard| discard.player == player && discard.is_riichi)
    }

    /// Discards made by one player, in order.
    pub fn tiles_of(&self, player: PlayerId) -> impl Iterator<Item = Tile> + '_ {
        self.discards
            .iter()
            .filter(move |discard| discard.player == player && !discard.is_kan())
            .map(|discard| discard.tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_has_no_last_tile() {
        let pool = DiscardPool::new();
        assert_eq!(pool.last_discarded_tile(), None);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_append_settles_previous_entry() {
        let mut pool = DiscardPool::new();
        pool.append(PlayerId::new(0), Tile::new(10));
        pool.append(PlayerId::new(1), Tile::new(20));

        let discards = pool.discards();
        assert!(!discards[0].is_live);
        assert!(discards[1].is_live);
    }

    #[test]
    fn test_kan_entries() {
        let mut pool = DiscardPool::new();
        pool.append_kan(PlayerId::new(2), Tile::new(70), DiscardSource::ClosedKan);
        let entry = &pool.discards()[0];
        assert!(entry.is_kan());
        assert_eq!(pool.tiles_of(PlayerId::new(2)).count(), 0);
    }

    #[test]
    fn test_riichi_flag() {
        let mut pool = DiscardPool::new();
        pool.append(PlayerId::new(0), Tile::new(10));
        pool.append_riichi(PlayerId::new(1), Tile::new(33));
        assert!(pool.discards()[1].is_riichi);
        assert_eq!(pool.riichi_index(PlayerId::new(1)), Some(1));
        assert_eq!(pool.riichi_index(PlayerId::new(0)), None);
    }

    #[test]
    #[should_panic(expected = "already claimed")]
    fn test_double_claim_panics() {
        let mut pool = DiscardPool::new();
        pool.append(PlayerId::new(0), Tile::new(10));
        pool.pop();
        pool.pop();
    }
}
