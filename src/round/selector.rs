//! Collecting per-player submissions and applying whatever they decide.
//!
//! Clients submit actions independently and possibly late. Each
//! submission names the history length it was made against; a submission
//! made against an older history is dropped, since the actions it chose
//! from may no longer exist.

use im::Vector;
use log::{debug, trace};

use super::engine::RulesEngine;
use super::Round;
use crate::core::action::{Action, ActionRecord};
use crate::core::player::PlayerId;

/// Drives a rules engine from per-player submissions.
///
/// ```
/// use rust_mahjong::core::{GameOptions, GameRng};
/// use rust_mahjong::round::{ActionSelector, Round, RoundSetup, RulesEngine};
///
/// let round = Round::new(GameOptions::default(), RoundSetup::default(), &mut GameRng::new(2));
/// let mut selector = ActionSelector::new(round);
///
/// let dealer = selector.engine().current_player();
/// let discard = selector.engine().allowed_actions(dealer).default_action();
/// let fence = selector.engine().history_len();
///
/// let applied = selector.submit_action(dealer, discard.clone(), fence).unwrap();
/// assert_eq!(applied[0].action, discard);
///
/// // The history has moved on, so the same fence is now stale.
/// assert!(selector.submit_action(dealer, discard, fence).is_none());
/// ```
#[derive(Debug)]
pub struct ActionSelector<E: RulesEngine = Round> {
    engine: E,
    submitted: Vec<Option<Action>>,
}

impl<E: RulesEngine> ActionSelector<E> {
    /// Wrap `engine`, applying any actions nobody has a choice about.
    pub fn new(engine: E) -> Self {
        let player_count = engine.player_count();
        let mut selector = Self {
            engine,
            submitted: vec![None; player_count],
        };
        selector.resolve();
        selector
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Pending submissions, by seat.
    #[must_use]
    pub fn submitted(&self) -> &[Option<Action>] {
        &self.submitted
    }

    /// Record `player`'s choice and apply every action that can now be
    /// decided.
    ///
    /// `history_index` is the history length the player saw. If it no
    /// longer matches, nothing happens and `None` is returned. Otherwise
    /// returns the records applied by this call, which may be empty.
    pub fn submit_action(
        &mut self,
        player: PlayerId,
        action: Action,
        history_index: usize,
    ) -> Option<Vector<ActionRecord>> {
        let history_len = self.engine.history_len();
        if history_index != history_len {
            debug!(
                "Dropping stale submission from {}: fence {} but history is at {}",
                player, history_index, history_len
            );
            return None;
        }
        trace!("{} submitted {:?}", player, action);
        self.submitted[player.index()] = Some(action);
        Some(self.resolve())
    }

    /// Apply decided actions until one is undetermined or the round ends.
    fn resolve(&mut self) -> Vector<ActionRecord> {
        let start = self.engine.history_len();
        while self.engine.result().is_none() {
            let Some(record) = self.engine.priority_action(&self.submitted) else {
                break;
            };
            debug!("Resolved {:?} by {}", record.action, record.player);
            if let Err(error) = self.engine.apply_action(record.player, &record.action) {
                panic!("Resolved action was rejected: {}", error);
            }
            self.submitted.fill(None);
        }
        self.engine.history().skip(start)
    }
}
