//! One hand of Mahjong, from the deal to a win or an exhausted wall.
//!
//! `Round` is a state machine. In every state each player has a list of
//! legal actions; `do_action` applies one of them, appends it to the
//! history and recomputes every list. Which lists a state offers, and
//! what each action does, live in two static tables indexed by
//! `RoundStatus` and `ActionType` (see `allowed` and `handlers`).
//!
//! Choosing between simultaneous claims on the same discard is done by
//! `get_priority_action`, and `ActionSelector` drives a round from
//! per-player submissions.

mod allowed;
pub mod engine;
mod handlers;
pub mod priority;
pub mod selector;
pub mod status;

use im::Vector;
use log::debug;

use crate::core::action::{Action, ActionList, ActionRecord, ActionType};
use crate::core::deck::{
    four_player_flowers, four_player_tiles, three_player_flowers, three_player_tiles, Deck,
};
use crate::core::discard::{Discard, DiscardPool};
use crate::core::options::GameOptions;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::tile::Tile;
use crate::errors::{MahjongError, MahjongResult};
use crate::hand::decompose::is_winning;
use crate::hand::Hand;
use crate::scoring::{Scorer, Win};

pub use engine::{RoundResult, RulesEngine};
pub use selector::ActionSelector;
pub use status::RoundStatus;

/// Tiles dealt to each seat in turn; the dealer then draws one more.
const DEAL_PATTERN: [usize; 4] = [4, 4, 4, 1];

/// Called once when a round reaches `RoundStatus::End`.
pub type RoundEndCallback = Box<dyn FnOnce(&Round)>;

/// Where a round sits in the game, and optionally a fixed wall.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundSetup {
    pub wind_round: usize,
    /// Also the dealer's seat.
    pub sub_round: usize,
    pub draw_count: u32,
    /// Deal from these tiles in order instead of a shuffled set.
    pub tiles: Option<Vec<Tile>>,
}

impl RoundSetup {
    #[must_use]
    pub fn new(wind_round: usize, sub_round: usize, draw_count: u32) -> Self {
        Self {
            wind_round,
            sub_round,
            draw_count,
            tiles: None,
        }
    }

    #[must_use]
    pub fn with_tiles(mut self, tiles: Vec<Tile>) -> Self {
        self.tiles = Some(tiles);
        self
    }
}

pub struct Round {
    options: GameOptions,
    player_count: usize,
    wind_round: usize,
    sub_round: usize,
    draw_count: u32,

    deck: Deck,
    pool: DiscardPool,
    hands: PlayerMap<Hand>,

    current_player: PlayerId,
    status: RoundStatus,
    /// The tile that can currently be claimed or robbed.
    last_tile: Option<Tile>,
    /// Consecutive continues during the flower exchange.
    flower_pass_count: usize,

    history: Vector<ActionRecord>,
    win: Option<Win>,

    allowed_actions: PlayerMap<ActionList>,
    /// Every allowed action, highest priority first.
    ranked_actions: Vec<(PlayerId, Action)>,

    end_callback: Option<RoundEndCallback>,
}

impl Round {
    /// Deal a round.
    ///
    /// `rng` shuffles the wall unless `setup` fixes the tiles. With
    /// `auto_replace_flowers` the flower exchange is played out before
    /// this returns.
    ///
    /// ```
    /// use rust_mahjong::core::{GameOptions, GameRng, PlayerId};
    /// use rust_mahjong::round::{Round, RoundSetup, RoundStatus};
    ///
    /// let mut rng = GameRng::new(7);
    /// let round = Round::new(GameOptions::default(), RoundSetup::default(), &mut rng);
    /// assert_eq!(round.status(), RoundStatus::Play);
    /// assert_eq!(round.current_player(), PlayerId::new(0));
    /// assert_eq!(round.hand(PlayerId::new(0)).tiles().len(), 14);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, setup: RoundSetup, rng: &mut GameRng) -> Self {
        let player_count = options.player_count;
        assert!(
            (3..=4).contains(&player_count),
            "Player count must be 3 or 4"
        );
        assert!(
            setup.sub_round < player_count,
            "Sub round {} has no dealer in a {} player game",
            setup.sub_round,
            player_count
        );

        let deck = match setup.tiles {
            Some(tiles) => {
                assert!(
                    tiles.len() > 13 * player_count,
                    "Need more than {} tiles to deal, got {}",
                    13 * player_count,
                    tiles.len()
                );
                Deck::from_tiles(tiles)
            }
            None => {
                let (mut tiles, flowers) = if player_count == 3 {
                    (three_player_tiles(), three_player_flowers())
                } else {
                    (four_player_tiles(), four_player_flowers())
                };
                if options.use_flowers {
                    tiles.extend(flowers);
                }
                Deck::shuffled(tiles, rng)
            }
        };

        let dealer = PlayerId::new(setup.sub_round as u8);
        let mut round = Self {
            player_count,
            wind_round: setup.wind_round,
            sub_round: setup.sub_round,
            draw_count: setup.draw_count,
            deck,
            pool: DiscardPool::new(),
            hands: PlayerMap::new(player_count, Hand::new),
            current_player: dealer,
            status: RoundStatus::Start,
            last_tile: None,
            flower_pass_count: 0,
            history: Vector::new(),
            win: None,
            allowed_actions: PlayerMap::with_value(player_count, ActionList::new()),
            ranked_actions: Vec::new(),
            end_callback: None,
            options,
        };

        for count in DEAL_PATTERN {
            for seat in 0..player_count {
                let player = dealer.offset(seat, player_count);
                round.hands[player].add_to_hand(&mut round.deck, count);
            }
        }
        round.hands[dealer].draw(&mut round.deck);
        round.hands.iter_mut().for_each(|(_, hand)| hand.sort());
        debug!(
            "Dealt round {}-{} ({} draws), {} tiles left in the wall",
            round.wind_round,
            round.sub_round,
            round.draw_count,
            round.deck.len()
        );

        round.calculate_allowed_actions();
        if round.options.auto_replace_flowers {
            round.exchange_flowers();
        }
        round
    }

    /// Play out the flower exchange: every seat reveals its flowers until
    /// a full lap passes without one.
    fn exchange_flowers(&mut self) {
        while self.status == RoundStatus::Start {
            let player = self.current_player;
            for flower in self.hands[player].get_flowers() {
                self.apply_forced(player, flower);
            }
            self.apply_forced(player, Action::Continue);
        }
    }

    fn apply_forced(&mut self, player: PlayerId, action: Action) {
        if let Err(error) = self.do_action(player, action) {
            panic!("Forced action was rejected: {}", error);
        }
    }

    /// Run `callback` when the round ends.
    pub fn set_end_callback(&mut self, callback: impl FnOnce(&Round) + 'static) {
        self.end_callback = Some(Box::new(callback));
    }

    // Accessors

    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

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
    pub fn dealer(&self) -> PlayerId {
        PlayerId::new(self.sub_round as u8)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    #[must_use]
    pub fn hands(&self) -> &PlayerMap<Hand> {
        &self.hands
    }

    #[must_use]
    pub fn discards(&self) -> &[Discard] {
        self.pool.discards()
    }

    #[must_use]
    pub fn discard_pool(&self) -> &DiscardPool {
        &self.pool
    }

    /// One player's discards, in order.
    #[must_use]
    pub fn discard_tiles(&self, player: PlayerId) -> Vec<Tile> {
        self.pool.tiles_of(player).collect()
    }

    /// The tile that can currently be claimed or robbed.
    #[must_use]
    pub fn last_tile(&self) -> Option<Tile> {
        self.last_tile
    }

    /// Tiles left in the deck, dead wall included.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.deck.len()
    }

    /// Draws left before the wall runs out. Kans can push this below zero.
    #[must_use]
    pub fn tiles_left(&self) -> isize {
        self.deck.len() as isize - self.options.end_wall_count as isize
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn win(&self) -> Option<&Win> {
        self.win.as_ref()
    }

    #[must_use]
    pub fn allowed_actions(&self, player: PlayerId) -> &ActionList {
        &self.allowed_actions[player]
    }

    #[must_use]
    pub fn all_allowed_actions(&self) -> &PlayerMap<ActionList> {
        &self.allowed_actions
    }

    // Applying actions

    /// Apply `action` for `player`.
    ///
    /// Fails without changing anything if the action is not in the
    /// player's allowed list. Passing is only a choice during priority
    /// resolution and is never applied.
    pub fn do_action(&mut self, player: PlayerId, action: Action) -> MahjongResult<()> {
        if action == Action::Pass || !self.allowed_actions[player].contains(&action) {
            return Err(MahjongError::InvalidMove {
                player,
                action,
                allowed: self.allowed_actions[player].actions().to_vec(),
            });
        }

        let before = self.status;
        let handler = handlers::handler_for(action.action_type());
        handler(self, player, &action);
        debug!("Player {} did {:?}", player, action);
        if self.status != before {
            debug!("Round status {:?} -> {:?}", before, self.status);
        }
        self.history.push_back(ActionRecord::new(player, action));
        self.calculate_allowed_actions();

        if self.status == RoundStatus::End {
            debug!("Round ended, win: {:?}", self.win);
            if let Some(callback) = self.end_callback.take() {
                callback(self);
            }
        }
        Ok(())
    }

    fn calculate_allowed_actions(&mut self) {
        let allowed_for = allowed::allowed_actions_for(self.status);
        self.allowed_actions = PlayerMap::new(self.player_count, |player| allowed_for(self, player));
        self.ranked_actions =
            priority::rank_actions(&self.allowed_actions, self.current_player);
    }

    // Wins

    /// Nothing but draws and flower play has happened in `records`, as far
    /// as `player` is concerned: no calls by anyone and no discard by them.
    fn is_instant<'a>(player: PlayerId, records: impl IntoIterator<Item = &'a ActionRecord>) -> bool {
        records.into_iter().all(|record| {
            let action_type = record.action.action_type();
            !action_type.is_call()
                && !(action_type == ActionType::Discard && record.player == player)
        })
    }

    /// `(riichi, double riichi, ippatsu)` for `player`.
    fn riichi_flags(&self, player: PlayerId) -> (bool, bool, bool) {
        let riichi_index = self.history.iter().position(|record| {
            record.player == player && record.action.action_type() == ActionType::Riichi
        });
        match riichi_index {
            Some(index) => (
                true,
                Self::is_instant(player, self.history.iter().take(index)),
                Self::is_instant(player, self.history.iter().skip(index)),
            ),
            None => (false, false, false),
        }
    }

    fn base_win(&self, player: PlayerId, lose_player: Option<PlayerId>, hand: Vec<Tile>) -> Win {
        let (is_riichi, is_double_riichi, is_ippatsu) = self.riichi_flags(player);
        let mut win = Win::new(player, lose_player, hand, self.player_count);
        win.calls = self.hands[player].calls().to_vec();
        win.flowers = self.hands[player].flowers().to_vec();
        win.wind_round = self.wind_round;
        win.sub_round = self.sub_round;
        win.draw_count = self.draw_count;
        win.is_riichi = is_riichi;
        win.is_double_riichi = is_double_riichi;
        win.is_ippatsu = is_ippatsu;
        win
    }

    /// The win `player` would have by claiming the last tile.
    fn ron_win(&self, player: PlayerId) -> Option<Win> {
        let last_tile = self.last_tile?;
        let hand = &self.hands[player];
        if !hand.waits().contains(last_tile.value()) || hand.is_furiten(&self.pool) {
            return None;
        }
        let mut tiles = hand.tiles().to_vec();
        tiles.push(last_tile);
        if !is_winning(&tiles) {
            return None;
        }

        let mut win = self.base_win(player, Some(self.current_player), tiles);
        win.is_chankan = self.status.is_kan_after();
        win.is_houtei = self.status == RoundStatus::LastDiscarded;
        Some(win)
    }

    /// The win `player` would have by declaring tsumo now.
    fn tsumo_win(&self, player: PlayerId) -> Option<Win> {
        let hand = &self.hands[player];
        if !hand.can_tsumo() {
            return None;
        }

        let mut after_flower_count = 0;
        let mut after_kan_count = 0;
        for record in self.history.iter().rev() {
            match record.action.action_type() {
                ActionType::Flower => after_flower_count += 1,
                ActionType::AddKan | ActionType::ClosedKan => after_kan_count += 1,
                ActionType::Continue => {}
                _ => break,
            }
        }

        let mut win = self.base_win(player, None, hand.tiles().to_vec());
        win.after_flower_count = after_flower_count;
        win.after_kan_count = after_kan_count;
        win.is_haitei = self.tiles_left() <= 0;
        if Self::is_instant(player, self.history.iter()) {
            if player == self.dealer() {
                win.is_tenhou = true;
            } else {
                win.is_chiihou = true;
            }
        }
        Some(win)
    }

    fn is_valid_win(&self, win: Option<Win>) -> bool {
        win.is_some_and(|win| {
            self.options.min_han == 0 || Scorer::score(&win, &self.options).han >= self.options.min_han
        })
    }

    fn can_ron(&self, player: PlayerId) -> bool {
        self.is_valid_win(self.ron_win(player))
    }

    fn can_tsumo(&self, player: PlayerId) -> bool {
        self.is_valid_win(self.tsumo_win(player))
    }
}

impl std::fmt::Debug for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Round")
            .field("wind_round", &self.wind_round)
            .field("sub_round", &self.sub_round)
            .field("status", &self.status)
            .field("current_player", &self.current_player)
            .field("tiles_left", &self.tiles_left())
            .field("hands", &self.hands)
            .field("discards", &self.pool)
            .finish_non_exhaustive()
    }
}
