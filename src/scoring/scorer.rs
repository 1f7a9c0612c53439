//! Turning a win into points.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::trace;

use super::calculator::PatternCalculator;
use super::registry::PatternRegistry;
use super::win::Win;
use super::{PatternData, Scoring};
use crate::core::meld::Meld;
use crate::core::options::GameOptions;
use crate::hand::decompose::formed_hand_possibilities;

fn round_up(value: f64, step: f64) -> f64 {
    step * (value / step).ceil()
}

/// Scores wins under one set of rules.
pub struct Scorer<'a> {
    win: &'a Win,
    options: &'a GameOptions,
    registry: PatternRegistry,
    /// Cap on the computed base score of hands below every limit.
    low_han_max_score: Option<f64>,
}

impl<'a> Scorer<'a> {
    #[must_use]
    pub fn new(win: &'a Win, options: &'a GameOptions) -> Self {
        let low_han_max_score = options
            .base_score_limits
            .iter()
            .map(|limit| limit.score)
            .min_by(f64::total_cmp);
        Self {
            win,
            options,
            registry: PatternRegistry::with_overrides(&options.pattern_data),
            low_han_max_score,
        }
    }

    /// Score `win`, picking the decomposition that pays the winner most.
    ///
    /// Panics if the winning hand has no decomposition.
    ///
    /// ```
    /// use rust_mahjong::core::{GameOptions, PlayerId, Tile};
    /// use rust_mahjong::scoring::{Scorer, Win};
    ///
    /// // 123m 456m 789m 234p + 5s pair, drawn by the dealer.
    /// let hand: Vec<Tile> = [10, 20, 30, 40, 50, 60, 70, 80, 90, 120, 130, 140, 250, 251]
    ///     .into_iter()
    ///     .map(Tile::new)
    ///     .collect();
    /// let win = Win::new(PlayerId::new(0), None, hand, 4);
    /// let scoring = Scorer::score(&win, &GameOptions::default());
    /// assert!(scoring.patterns.contains_key("PURE_STRAIGHT"));
    /// assert_eq!(scoring.player_scores.iter().sum::<f64>(), 0.0);
    /// ```
    #[must_use]
    pub fn score(win: &Win, options: &GameOptions) -> Scoring {
        Scorer::new(win, options).best_scoring()
    }

    fn best_scoring(&self) -> Scoring {
        let winner = self.win.win_player.index();
        let mut best: Option<Scoring> = None;
        for formed_hand in formed_hand_possibilities(&self.win.hand) {
            let scoring = self.formed_hand_scoring(&formed_hand);
            let better = match &best {
                None => true,
                Some(current) => {
                    scoring.player_scores[winner]
                        .total_cmp(&current.player_scores[winner])
                        .then(scoring.han.cmp(&current.han))
                        .then(scoring.fu.cmp(&current.fu))
                        == Ordering::Greater
                }
            };
            if better {
                best = Some(scoring);
            }
        }
        best.unwrap_or_else(|| panic!("Winning hand {:?} has no decomposition", self.win.hand))
    }

    fn formed_hand_scoring(&self, formed_hand: &[Meld]) -> Scoring {
        let calculator = PatternCalculator::new(self.win, formed_hand);

        let applied: Vec<(&'static str, PatternData)> = self
            .registry
            .iter()
            .filter_map(|pattern| {
                let times = (pattern.multiplicity())(&calculator);
                (times > 0).then(|| {
                    let data = &pattern.data;
                    (
                        pattern.name,
                        PatternData::new(&data.display_name, data.han * times, data.fu * times),
                    )
                })
            })
            .collect();

        let han: u32 = applied.iter().map(|(_, data)| data.han).sum();
        let mut fu = self.options.base_fu;
        if self.options.calculate_fu {
            fu += applied.iter().map(|(_, data)| data.fu).sum::<u32>();
        }
        if self.options.round_up_fu {
            fu = fu.div_ceil(10) * 10;
        }

        let calculate_fu = self.options.calculate_fu;
        let patterns: BTreeMap<String, PatternData> = applied
            .into_iter()
            .filter(|(_, data)| data.han != 0 || (calculate_fu && data.fu != 0))
            .map(|(name, data)| (name.to_string(), data))
            .collect();
        trace!("Formed hand {:?} scores {} han {} fu", formed_hand, han, fu);

        Scoring {
            win_player: self.win.win_player,
            lose_player: self.win.lose_player,
            patterns,
            han,
            fu,
            player_scores: self.player_scores(han, fu),
        }
    }

    fn base_score(&self, han: u32, fu: u32) -> f64 {
        let limit = self
            .options
            .base_score_limits
            .iter()
            .filter(|limit| limit.han <= han)
            .max_by(|a, b| a.han.cmp(&b.han).then(a.score.total_cmp(&b.score)));
        match limit {
            Some(limit) => limit.score,
            None => {
                let score = f64::from(fu) * 4.0 * 2f64.powi(han as i32);
                self.low_han_max_score.map_or(score, |cap| score.min(cap))
            }
        }
    }

    fn payment(&self, multiplier: f64, base: f64) -> f64 {
        let amount = multiplier * base;
        if self.options.round_up_points {
            round_up(amount, 100.0)
        } else {
            amount
        }
    }

    /// Score change of every player. The deltas sum to zero.
    fn player_scores(&self, han: u32, fu: u32) -> Vec<f64> {
        let options = self.options;
        let player_count = self.win.player_count;
        let winner = self.win.win_player.index();
        let dealer = self.win.dealer().index();
        let base = self.base_score(han, fu);

        match self.win.lose_player {
            None if winner == dealer => {
                let pay = self.payment(options.score_dealer_tsumo_multiplier, base);
                let mut scores = vec![-pay; player_count];
                scores[winner] = pay * (player_count - 1) as f64;
                scores
            }
            None => {
                let pay = self.payment(options.score_nondealer_tsumo_nondealer_multiplier, base);
                let dealer_pay = self.payment(options.score_nondealer_tsumo_dealer_multiplier, base);
                let mut scores = vec![-pay; player_count];
                scores[dealer] = -dealer_pay;
                scores[winner] = (player_count - 2) as f64 * pay + dealer_pay;
                scores
            }
            Some(loser) => {
                let multiplier = if winner == dealer {
                    options.score_dealer_ron_multiplier
                } else {
                    options.score_nondealer_ron_multiplier
                };
                let pay = self.payment(multiplier, base);
                let mut scores = vec![0.0; player_count];
                scores[winner] = pay;
                scores[loser.index()] = -pay;
                scores
            }
        }
    }
}
