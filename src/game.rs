//! A game: rounds in sequence, dealer rotation and the score ledger.
//!
//! The dealer keeps the seat when they win or nobody wins; otherwise the
//! deal passes to the next seat, and after the last seat to the next
//! wind. A round that ends without a win bumps the draw counter.

use im::Vector;
use log::{debug, info};

use crate::core::action::{Action, ActionRecord};
use crate::core::options::GameOptions;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::{GameRng, GameRngState};
use crate::core::tile::Tile;
use crate::errors::{MahjongError, MahjongResult};
use crate::round::{ActionSelector, Round, RoundSetup, RoundStatus};
use crate::scoring::{Scorer, Scoring, Win};

/// Winds a game can cycle through.
const WIND_COUNT: usize = 4;

#[derive(Debug)]
pub struct Game {
    options: GameOptions,
    rng: GameRng,
    wind_round: usize,
    sub_round: usize,
    draw_count: u32,
    player_scores: PlayerMap<f64>,
    selector: ActionSelector<Round>,
    win: Option<Win>,
    scoring: Option<Scoring>,
    /// The current round's result is already in `player_scores`.
    settled: bool,
}

impl Game {
    /// Start a game with a shuffled first round.
    ///
    /// ```
    /// use rust_mahjong::core::GameOptions;
    /// use rust_mahjong::game::Game;
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// assert_eq!((game.wind_round(), game.sub_round()), (0, 0));
    /// assert_eq!(game.player_scores(), &[0.0; 4]);
    /// assert!(!game.can_start_next_round());
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        Self::create(options, seed, None)
    }

    /// Start a game whose first round deals from `tiles` in order.
    #[must_use]
    pub fn with_first_deck(options: GameOptions, seed: u64, tiles: Vec<Tile>) -> Self {
        Self::create(options, seed, Some(tiles))
    }

    fn create(options: GameOptions, seed: u64, tiles: Option<Vec<Tile>>) -> Self {
        let mut rng = GameRng::new(seed);
        let player_scores = PlayerMap::with_value(options.player_count, options.start_score);
        let setup = RoundSetup {
            tiles,
            ..RoundSetup::default()
        };
        let round = Round::new(options.clone(), setup, &mut rng.fork());
        info!(
            "Starting a {} player game, seed {}",
            options.player_count, seed
        );
        let mut game = Self {
            rng,
            wind_round: 0,
            sub_round: 0,
            draw_count: 0,
            player_scores,
            selector: ActionSelector::new(round),
            win: None,
            scoring: None,
            settled: false,
            options,
        };
        game.settle_round();
        game
    }

    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.options.player_count
    }

    /// Wind rounds played so far; not wrapped at four.
    #[must_use]
    pub fn wind_round(&self) -> usize {
        self.wind_round
    }

    #[must_use]
    pub fn sub_round(&self) -> usize {
        self.sub_round
    }

    #[must_use]
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    #[must_use]
    pub fn player_scores(&self) -> &[f64] {
        self.player_scores.as_slice()
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        self.selector.engine()
    }

    /// Position of the game's stream; later rounds shuffle from forks of it.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// The current round's win, once it has ended with one.
    #[must_use]
    pub fn win(&self) -> Option<&Win> {
        self.win.as_ref()
    }

    #[must_use]
    pub fn scoring(&self) -> Option<&Scoring> {
        self.scoring.as_ref()
    }

    /// Submit an action to the current round; see
    /// `ActionSelector::submit_action`.
    pub fn submit_action(
        &mut self,
        player: PlayerId,
        action: Action,
        history_index: usize,
    ) -> Option<Vector<ActionRecord>> {
        let applied = self.selector.submit_action(player, action, history_index);
        self.settle_round();
        applied
    }

    /// Score the round once it has ended. Called after every submission
    /// rather than from `Round::set_end_callback`, which would need the
    /// round to hold a reference back into the game.
    fn settle_round(&mut self) {
        if self.settled || self.round().status() != RoundStatus::End {
            return;
        }
        self.settled = true;
        self.win = self.round().win().cloned();
        let Some(win) = &self.win else {
            debug!("Round {}-{} ended in a draw", self.wind_round, self.sub_round);
            return;
        };

        let scoring = Scorer::score(win, &self.options);
        for (player, score) in self.player_scores.iter_mut() {
            *score += scoring.player_scores[player.index()];
        }
        info!(
            "{} won round {}-{} with {} han {} fu, scores now {:?}",
            win.win_player,
            self.wind_round,
            self.sub_round,
            scoring.han,
            scoring.fu,
            self.player_scores.as_slice()
        );
        self.scoring = Some(scoring);
    }

    /// The round after this one if the deal moves on.
    fn next_round(&self) -> (usize, usize) {
        if self.sub_round + 1 >= self.player_count() {
            (self.wind_round + 1, 0)
        } else {
            (self.wind_round, self.sub_round + 1)
        }
    }

    /// The dealer keeps the deal: nobody won, or the dealer did.
    #[must_use]
    pub fn is_dealer_repeat(&self) -> bool {
        self.win
            .as_ref()
            .map_or(true, |win| win.win_player.index() == self.sub_round)
    }

    /// The current round has ended and was the last one.
    #[must_use]
    pub fn is_game_end(&self) -> bool {
        if self.round().status() != RoundStatus::End {
            return false;
        }
        let (wind_rounds, sub_rounds) = self.options.game_length();
        let length = (wind_rounds as usize, sub_rounds as usize);
        self.next_round() >= length && !self.is_dealer_repeat()
    }

    #[must_use]
    pub fn can_start_next_round(&self) -> bool {
        self.round().status() == RoundStatus::End && !self.is_game_end()
    }

    /// Deal the next round from a shuffled wall.
    pub fn start_next_round(&mut self) -> MahjongResult<()> {
        self.begin_next_round(None)
    }

    /// Deal the next round from `tiles` in order.
    pub fn start_next_round_with_tiles(&mut self, tiles: Vec<Tile>) -> MahjongResult<()> {
        self.begin_next_round(Some(tiles))
    }

    fn begin_next_round(&mut self, tiles: Option<Vec<Tile>>) -> MahjongResult<()> {
        if self.round().status() != RoundStatus::End {
            return Err(MahjongError::invalid_operation("The current round has not ended"));
        }
        if self.is_game_end() {
            return Err(MahjongError::invalid_operation("The game is over"));
        }

        if !self.is_dealer_repeat() {
            (self.wind_round, self.sub_round) = self.next_round();
        }
        self.draw_count = if self.win.is_none() {
            self.draw_count + 1
        } else {
            0
        };

        let setup = RoundSetup {
            wind_round: self.wind_round % WIND_COUNT,
            sub_round: self.sub_round,
            draw_count: self.draw_count,
            tiles,
        };
        let round = Round::new(self.options.clone(), setup, &mut self.rng.fork());
        debug!(
            "Starting round {}-{} with {} draws",
            self.wind_round, self.sub_round, self.draw_count
        );
        self.selector = ActionSelector::new(round);
        self.win = None;
        self.scoring = None;
        self.settled = false;
        self.settle_round();
        Ok(())
    }
}
