//! Pattern detection and scoring.
//!
//! A `Win` is decomposed into every possible arrangement of melds. Each
//! arrangement is checked against the pattern table, which yields han and
//! fu; those give a base score, and the base score is split into
//! payments according to who won, who paid and who dealt. The arrangement
//! that pays the winner most is the scoring of the win.

pub mod calculator;
pub mod patterns;
pub mod registry;
pub mod scorer;
pub mod wait;
pub mod win;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

pub use calculator::{MeldCounts, PatternCalculator};
pub use patterns::{MultiplicityFn, PatternDef, PATTERNS};
pub use registry::{PatternRegistry, RegisteredPattern};
pub use scorer::Scorer;
pub use wait::{wait_pattern, WaitPattern};
pub use win::Win;

/// A pattern's name for display and its han and fu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternData {
    pub display_name: String,
    pub han: u32,
    pub fu: u32,
}

impl PatternData {
    #[must_use]
    pub fn new(display_name: &str, han: u32, fu: u32) -> Self {
        Self {
            display_name: display_name.to_string(),
            han,
            fu,
        }
    }
}

/// The result of scoring a win.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    pub win_player: PlayerId,
    pub lose_player: Option<PlayerId>,
    /// Patterns that contributed, with han and fu already multiplied.
    pub patterns: BTreeMap<String, PatternData>,
    pub han: u32,
    pub fu: u32,
    /// Score change of every seat.
    pub player_scores: Vec<f64>,
}
