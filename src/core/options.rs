//! Rule configuration.
//!
//! `GameOptions` is the single record the engine reads its rules from:
//! table size, wall threshold, flower handling, riichi, the minimum value
//! of a win and the whole scoring table. Every field has a default, so a
//! partial JSON document is a valid configuration:
//!
//! ```
//! use rust_mahjong::core::GameOptions;
//!
//! let options: GameOptions = serde_json::from_str(r#"{"player_count": 3, "min_han": 1}"#).unwrap();
//! assert_eq!(options.player_count, 3);
//! assert_eq!(options.end_wall_count, 14);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::scoring::PatternData;

/// A score-limit row: hands with at least `han` han score exactly `score`.
///
/// The smallest `score` in the table also caps the computed score of
/// hands below every threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreLimit {
    pub han: u32,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// 3 or 4.
    pub player_count: usize,
    pub game_length_wind_rounds: u32,
    pub game_length_sub_rounds: u32,

    /// Add the flower tiles to the wall.
    pub use_flowers: bool,
    /// Reveal flowers automatically instead of offering them as actions.
    pub auto_replace_flowers: bool,
    /// Tiles kept back at the end of the wall.
    pub end_wall_count: usize,
    pub allow_riichi: bool,
    /// Minimum han a hand needs to be allowed to win.
    pub min_han: u32,

    /// Client display hint: show a ready hand's waits. The engine
    /// carries it for clients and never reads it.
    pub show_waits: bool,
    /// Client display hint: show shanten and useful tiles.
    pub show_shanten_info: bool,

    pub start_score: f64,
    pub score_dealer_ron_multiplier: f64,
    pub score_dealer_tsumo_multiplier: f64,
    pub score_nondealer_ron_multiplier: f64,
    pub score_nondealer_tsumo_nondealer_multiplier: f64,
    pub score_nondealer_tsumo_dealer_multiplier: f64,

    /// Add pattern fu to `base_fu`; otherwise every hand scores `base_fu`.
    pub calculate_fu: bool,
    pub base_fu: u32,
    /// Round fu up to a multiple of 10.
    pub round_up_fu: bool,
    /// Round every payment up to a multiple of 100.
    pub round_up_points: bool,
    pub base_score_limits: Vec<ScoreLimit>,

    /// Han/fu overrides keyed by pattern name.
    pub pattern_data: FxHashMap<String, PatternData>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::four_player()
    }
}

impl GameOptions {
    /// The standard four-player rules.
    #[must_use]
    pub fn four_player() -> Self {
        Self {
            player_count: 4,
            game_length_wind_rounds: 1,
            game_length_sub_rounds: 0,
            use_flowers: true,
            auto_replace_flowers: true,
            end_wall_count: 14,
            allow_riichi: false,
            min_han: 0,
            show_waits: true,
            show_shanten_info: false,
            start_score: 0.0,
            score_dealer_ron_multiplier: 6.0,
            score_dealer_tsumo_multiplier: 2.0,
            score_nondealer_ron_multiplier: 4.0,
            score_nondealer_tsumo_nondealer_multiplier: 1.0,
            score_nondealer_tsumo_dealer_multiplier: 2.0,
            calculate_fu: false,
            base_fu: 25,
            round_up_fu: false,
            round_up_points: false,
            base_score_limits: Vec::new(),
            pattern_data: FxHashMap::default(),
        }
    }

    /// Three-player rules: tsumo payments are rescaled so a tsumo is worth
    /// the same as in a four-player game.
    #[must_use]
    pub fn three_player() -> Self {
        Self {
            player_count: 3,
            score_dealer_tsumo_multiplier: 3.0,
            score_nondealer_tsumo_nondealer_multiplier: 1.5,
            score_nondealer_tsumo_dealer_multiplier: 2.5,
            ..Self::four_player()
        }
    }

    #[must_use]
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        assert!(
            (3..=4).contains(&player_count),
            "Player count must be 3 or 4"
        );
        self.player_count = player_count;
        self
    }

    #[must_use]
    pub fn with_game_length(mut self, wind_rounds: u32, sub_rounds: u32) -> Self {
        self.game_length_wind_rounds = wind_rounds;
        self.game_length_sub_rounds = sub_rounds;
        self
    }

    #[must_use]
    pub fn with_flowers(mut self, use_flowers: bool) -> Self {
        self.use_flowers = use_flowers;
        self
    }

    #[must_use]
    pub fn with_auto_replace_flowers(mut self, auto_replace_flowers: bool) -> Self {
        self.auto_replace_flowers = auto_replace_flowers;
        self
    }

    #[must_use]
    pub fn with_riichi(mut self, allow_riichi: bool) -> Self {
        self.allow_riichi = allow_riichi;
        self
    }

    #[must_use]
    pub fn with_min_han(mut self, min_han: u32) -> Self {
        self.min_han = min_han;
        self
    }

    #[must_use]
    pub fn with_end_wall_count(mut self, end_wall_count: usize) -> Self {
        self.end_wall_count = end_wall_count;
        self
    }

    #[must_use]
    pub fn with_start_score(mut self, start_score: f64) -> Self {
        self.start_score = start_score;
        self
    }

    #[must_use]
    pub fn with_calculated_fu(mut self, base_fu: u32, round_up_fu: bool) -> Self {
        self.calculate_fu = true;
        self.base_fu = base_fu;
        self.round_up_fu = round_up_fu;
        self
    }

    #[must_use]
    pub fn with_round_up_points(mut self, round_up_points: bool) -> Self {
        self.round_up_points = round_up_points;
        self
    }

    #[must_use]
    pub fn with_score_limit(mut self, han: u32, score: f64) -> Self {
        self.base_score_limits.push(ScoreLimit { han, score });
        self
    }

    /// Override the han and fu of one pattern.
    #[must_use]
    pub fn with_pattern(mut self, name: impl Into<String>, data: PatternData) -> Self {
        self.pattern_data.insert(name.into(), data);
        self
    }

    /// `(wind rounds, sub rounds)` after which the game ends.
    #[must_use]
    pub fn game_length(&self) -> (u32, u32) {
        (self.game_length_wind_rounds, self.game_length_sub_rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_four_player() {
        let options = GameOptions::default();
        assert_eq!(options.player_count, 4);
        assert_eq!(options.base_fu, 25);
        assert_eq!(options.score_dealer_tsumo_multiplier, 2.0);
        assert!(options.base_score_limits.is_empty());
        assert_eq!(options.game_length(), (1, 0));
    }

    #[test]
    fn test_three_player_preset() {
        let options = GameOptions::three_player();
        assert_eq!(options.player_count, 3);
        assert_eq!(options.score_dealer_tsumo_multiplier, 3.0);
        assert_eq!(options.score_dealer_ron_multiplier, 6.0);
    }

    #[test]
    fn test_builder() {
        let options = GameOptions::default()
            .with_riichi(true)
            .with_min_han(2)
            .with_score_limit(5, 2000.0)
            .with_pattern("RIICHI", PatternData::new("Riichi", 2, 0));
        assert!(options.allow_riichi);
        assert_eq!(options.min_han, 2);
        assert_eq!(options.base_score_limits.len(), 1);
        assert_eq!(options.pattern_data["RIICHI"].han, 2);
    }

    #[test]
    #[should_panic(expected = "Player count must be 3 or 4")]
    fn test_invalid_player_count() {
        let _ = GameOptions::default().with_player_count(5);
    }

    #[test]
    fn test_options_json_round_trip() {
        let options = GameOptions::three_player().with_score_limit(13, 8000.0);
        let json = serde_json::to_string(&options).unwrap();
        let restored: GameOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, restored);
    }

    #[test]
    fn test_client_hints_pass_through() {
        let options: GameOptions =
            serde_json::from_str(r#"{"show_waits": false, "show_shanten_info": true}"#).unwrap();
        assert!(!options.show_waits);
        assert!(options.show_shanten_info);
        assert_eq!(options.player_count, GameOptions::default().player_count);
    }
}
