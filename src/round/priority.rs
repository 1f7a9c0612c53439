//! Choosing which submitted action happens.
//!
//! Every allowed action of every player is ranked: higher `ActionType`
//! first, and among equal types the player closest after the current
//! player first. The first ranked action its player actually chose wins.
//! If the walk reaches a player who has not decided yet, the outcome is
//! still open.

use std::cmp::Reverse;

use super::Round;
use crate::core::action::{Action, ActionList, ActionRecord};
use crate::core::player::{PlayerId, PlayerMap};

/// Flatten the allowed lists into priority order.
pub(super) fn rank_actions(
    allowed: &PlayerMap<ActionList>,
    current_player: PlayerId,
) -> Vec<(PlayerId, Action)> {
    let player_count = allowed.player_count();
    let mut ranked: Vec<(PlayerId, Action)> = allowed
        .iter()
        .flat_map(|(player, list)| list.actions().iter().map(move |action| (player, action.clone())))
        .collect();
    ranked.sort_by_key(|(player, action)| {
        (
            Reverse(action.action_type().rank()),
            player.distance_from(current_player, player_count),
        )
    });
    ranked
}

impl Round {
    /// The action that should happen next, given what each player has
    /// submitted so far (`None` for players who have not).
    ///
    /// An illegal submission counts as the player's default action. A
    /// player with a single legal action counts as having chosen it.
    /// Returns `None` while a player who could still outrank the best
    /// submission has not decided.
    ///
    /// ```
    /// use rust_mahjong::core::{Action, GameOptions, GameRng, PlayerId};
    /// use rust_mahjong::round::{Round, RoundSetup};
    ///
    /// let round = Round::new(GameOptions::default(), RoundSetup::default(), &mut GameRng::new(1));
    /// let dealer = round.current_player();
    /// let discard = round.allowed_actions(dealer).default_action();
    ///
    /// let mut proposals = vec![None; round.player_count()];
    /// assert_eq!(round.get_priority_action(&proposals), None);
    ///
    /// proposals[dealer.index()] = Some(discard.clone());
    /// let record = round.get_priority_action(&proposals).unwrap();
    /// assert_eq!((record.player, record.action), (dealer, discard));
    /// ```
    #[must_use]
    pub fn get_priority_action(&self, proposals: &[Option<Action>]) -> Option<ActionRecord> {
        assert_eq!(
            proposals.len(),
            self.player_count,
            "Need one proposal slot per player"
        );

        let resolved: Vec<Option<Action>> = proposals
            .iter()
            .zip(self.allowed_actions.values())
            .map(|(proposal, allowed)| match proposal {
                None => allowed.auto(),
                Some(action) if allowed.contains(action) => Some(action.clone()),
                Some(_) => Some(allowed.default_action()),
            })
            .collect();

        for (player, action) in &self.ranked_actions {
            match &resolved[player.index()] {
                Some(chosen) if chosen == action => {
                    return Some(ActionRecord::new(*player, action.clone()));
                }
                None => return None,
                Some(_) => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::ActionType;

    fn list(actions: &[Action]) -> ActionList {
        let mut list = ActionList::with_default(actions[0].clone());
        list.add_actions(actions[1..].iter().cloned());
        list
    }

    #[test]
    fn test_rank_orders_by_type_then_seat() {
        let allowed = PlayerMap::from_vec(vec![
            list(&[Action::Ron]),
            ActionList::new(),
            list(&[Action::Draw]),
            list(&[Action::Ron]),
        ]);
        let ranked = rank_actions(&allowed, PlayerId::new(1));
        let order: Vec<(u8, ActionType)> = ranked
            .iter()
            .map(|(player, action)| (player.0, action.action_type()))
            .collect();
        assert_eq!(
            order,
            vec![
                (3, ActionType::Ron),
                (0, ActionType::Ron),
                (2, ActionType::Draw),
                (1, ActionType::Pass)
            ]
        );
    }

    #[test]
    fn test_rank_keeps_list_order_within_a_player() {
        let discard = |id| Action::Discard {
            tile: crate::core::tile::Tile::new(id),
        };
        let allowed = PlayerMap::from_vec(vec![list(&[discard(30), discard(10), discard(20)])]);
        let ranked = rank_actions(&allowed, PlayerId::new(0));
        let tiles: Vec<Action> = ranked.into_iter().map(|(_, action)| action).collect();
        assert_eq!(tiles, vec![discard(30), discard(10), discard(20)]);
    }
}
