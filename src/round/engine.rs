//! Rules engine trait for driving a round.
//!
//! `ActionSelector` only needs what this trait exposes:
//! - Which actions each player may take
//! - Which submitted action happens next
//! - How to apply it, and whether the round is over

use im::Vector;

use super::{Round, RoundStatus};
use crate::core::action::{Action, ActionList, ActionRecord};
use crate::core::player::PlayerId;
use crate::errors::MahjongResult;

/// Result of a completed round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundResult {
    /// Someone completed a hand; `loser` dealt in, or `None` for a tsumo.
    Won {
        winner: PlayerId,
        loser: Option<PlayerId>,
    },
    /// The wall ran out.
    Drawn,
}

impl RoundResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, RoundResult::Won { winner, .. } if *winner == player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `allowed_actions`: Empty if the player can't act
/// - `priority_action`: `None` while the outcome is still open
/// - `apply_action`: Must reject actions that are not allowed
/// - `result`: `None` while the round continues
pub trait RulesEngine {
    fn player_count(&self) -> usize;

    /// Legal actions of a player, default first.
    fn allowed_actions(&self, player: PlayerId) -> &ActionList;

    /// Every action applied so far.
    fn history(&self) -> &Vector<ActionRecord>;

    /// Check if the round is over.
    fn result(&self) -> Option<RoundResult>;

    /// The action that happens next given the per-player submissions.
    fn priority_action(&self, proposals: &[Option<Action>]) -> Option<ActionRecord>;

    /// Apply an action.
    fn apply_action(&mut self, player: PlayerId, action: &Action) -> MahjongResult<()>;

    // === Convenience Methods ===

    fn history_len(&self) -> usize {
        self.history().len()
    }

    /// Clone of a player's legal actions.
    fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        self.allowed_actions(player).actions().to_vec()
    }
}

impl RulesEngine for Round {
    fn player_count(&self) -> usize {
        self.player_count
    }

    fn allowed_actions(&self, player: PlayerId) -> &ActionList {
        &self.allowed_actions[player]
    }

    fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    fn result(&self) -> Option<RoundResult> {
        if self.status != RoundStatus::End {
            return None;
        }
        Some(match &self.win {
            Some(win) => RoundResult::Won {
                winner: win.win_player,
                loser: win.lose_player,
            },
            None => RoundResult::Drawn,
        })
    }

    fn priority_action(&self, proposals: &[Option<Action>]) -> Option<ActionRecord> {
        self.get_priority_action(proposals)
    }

    fn apply_action(&mut self, player: PlayerId, action: &Action) -> MahjongResult<()> {
        self.do_action(player, action.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_result_is_winner() {
        let result = RoundResult::Won {
            winner: PlayerId::new(1),
            loser: Some(PlayerId::new(0)),
        };
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = RoundResult::Drawn;
        assert!(!draw.is_winner(PlayerId::new(0)));
    }
}
