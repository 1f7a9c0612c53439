//! The snapshot of a winning hand handed to the scorer.

use serde::{Deserialize, Serialize};

use crate::core::call::Call;
use crate::core::player::PlayerId;
use crate::core::tile::Tile;

/// Everything the scorer needs to know about a win.
///
/// `hand` holds the concealed tiles with the winning tile last; for a ron
/// that is the claimed discard. The flags describe how the win happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    pub win_player: PlayerId,
    /// The discarder for a ron, `None` for a tsumo.
    pub lose_player: Option<PlayerId>,
    pub hand: Vec<Tile>,
    pub calls: Vec<Call>,
    pub flowers: Vec<Tile>,

    pub player_count: usize,
    pub wind_round: usize,
    /// Also the dealer's seat index.
    pub sub_round: usize,
    /// Consecutive drawn rounds before this one.
    pub draw_count: u32,

    /// Flowers revealed right before the winning draw.
    #[serde(default)]
    pub after_flower_count: u32,
    /// Kans declared right before the winning draw.
    #[serde(default)]
    pub after_kan_count: u32,

    #[serde(default)]
    pub is_riichi: bool,
    #[serde(default)]
    pub is_double_riichi: bool,
    #[serde(default)]
    pub is_ippatsu: bool,
    #[serde(default)]
    pub is_chankan: bool,
    #[serde(default)]
    pub is_haitei: bool,
    #[serde(default)]
    pub is_houtei: bool,
    #[serde(default)]
    pub is_tenhou: bool,
    #[serde(default)]
    pub is_chiihou: bool,
}

impl Win {
    /// A win with every situational flag cleared.
    #[must_use]
    pub fn new(
        win_player: PlayerId,
        lose_player: Option<PlayerId>,
        hand: Vec<Tile>,
        player_count: usize,
    ) -> Self {
        Self {
            win_player,
            lose_player,
            hand,
            calls: Vec::new(),
            flowers: Vec::new(),
            player_count,
            wind_round: 0,
            sub_round: 0,
            draw_count: 0,
            after_flower_count: 0,
            after_kan_count: 0,
            is_riichi: false,
            is_double_riichi: false,
            is_ippatsu: false,
            is_chankan: false,
            is_haitei: false,
            is_houtei: false,
            is_tenhou: false,
            is_chiihou: false,
        }
    }

    #[must_use]
    pub fn dealer(&self) -> PlayerId {
        PlayerId::new(self.sub_round as u8)
    }

    /// The winner's seat wind, 0 being east.
    #[must_use]
    pub fn seat(&self) -> usize {
        self.win_player.distance_from(self.dealer(), self.player_count)
    }

    #[must_use]
    pub fn is_tsumo(&self) -> bool {
        self.lose_player.is_none()
    }

    /// The winning tile.
    #[must_use]
    pub fn winning_tile(&self) -> Option<Tile> {
        self.hand.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_counts_from_dealer() {
        let mut win = Win::new(PlayerId::new(1), None, Vec::new(), 4);
        win.sub_round = 2;
        assert_eq!(win.dealer(), PlayerId::new(2));
        assert_eq!(win.seat(), 3);
        assert!(win.is_tsumo());
    }

    #[test]
    fn test_missing_flags_default_to_false() {
        let json = r#"{
            "win_player": 0, "lose_player": 2, "hand": [11, 12],
            "calls": [], "flowers": [], "player_count": 4,
            "wind_round": 0, "sub_round": 0, "draw_count": 0
        }"#;
        let win: Win = serde_json::from_str(json).unwrap();
        assert_eq!(win.lose_player, Some(PlayerId::new(2)));
        assert!(!win.is_riichi);
        assert_eq!(win.after_kan_count, 0);
        assert_eq!(win.winning_tile(), Some(Tile::new(12)));
    }
}
