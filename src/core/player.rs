//! Seats at the table and per-seat storage.
//!
//! ## PlayerId
//!
//! A seat index, 0-based. Turn order is increasing index, wrapping at the
//! player count. The dealer of sub-round `k` sits at seat `k`.
//!
//! ## PlayerMap
//!
//! One value per seat, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every seat of a `player_count` table.
    ///
    /// ```
    /// use rust_mahjong::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat that plays after this one.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        self.offset(1, player_count)
    }

    /// The seat that played before this one.
    #[must_use]
    pub fn previous(self, player_count: usize) -> Self {
        self.offset(player_count - 1, player_count)
    }

    /// The seat `steps` places later in turn order.
    #[must_use]
    pub fn offset(self, steps: usize, player_count: usize) -> Self {
        Self(((self.index() + steps) % player_count) as u8)
    }

    /// How many turns after `from` this seat plays, in `0..player_count`.
    ///
    /// ```
    /// use rust_mahjong::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).distance_from(PlayerId::new(3), 4), 2);
    /// assert_eq!(PlayerId::new(3).distance_from(PlayerId::new(3), 4), 0);
    /// ```
    #[must_use]
    pub fn distance_from(self, from: PlayerId, player_count: usize) -> usize {
        (self.index() + player_count - from.index()) % player_count
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat.
///
/// ```
/// use rust_mahjong::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<f64> = PlayerMap::with_value(4, 0.0);
/// scores[PlayerId::new(2)] += 300.0;
/// assert_eq!(scores[PlayerId::new(2)], 300.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build from a factory called once per seat.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Wrap an existing per-seat vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_order_wraps() {
        let p3 = PlayerId::new(3);
        assert_eq!(p3.next(4), PlayerId::new(0));
        assert_eq!(PlayerId::new(0).previous(4), PlayerId::new(3));
        assert_eq!(PlayerId::new(0).previous(3), PlayerId::new(2));
        assert_eq!(PlayerId::new(1).offset(5, 3), PlayerId::new(0));
    }

    #[test]
    fn test_distance_from_current() {
        let current = PlayerId::new(2);
        let distances: Vec<_> = PlayerId::all(4)
            .map(|p| p.distance_from(current, 4))
            .collect();
        assert_eq!(distances, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_player_map_indexing() {
        let mut map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32 * 10);
        assert_eq!(map[PlayerId::new(2)], 20);
        map[PlayerId::new(0)] = 5;
        assert_eq!(map.as_slice(), &[5, 10, 20]);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &0), (PlayerId::new(1), &1)]);
    }

    #[test]
    fn test_player_map_serializes_as_list() {
        let map = PlayerMap::from_vec(vec![1.5, -1.5]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[1.5,-1.5]");
        let restored: PlayerMap<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, restored);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }
}
