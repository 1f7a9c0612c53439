//! Which actions each player may take in each round state.

use super::{Round, RoundStatus};
use crate::core::action::{Action, ActionList, ActionType};
use crate::core::player::PlayerId;

type AllowedFn = fn(&Round, PlayerId) -> ActionList;

/// Indexed by `RoundStatus::index`.
static ALLOWED_ACTIONS: [AllowedFn; RoundStatus::COUNT] = [
    start_actions,
    play_actions,
    called_play_actions,
    kan_after_actions,
    kan_after_actions,
    discarded_actions,
    last_discarded_actions,
    end_actions,
];

pub(super) fn allowed_actions_for(status: RoundStatus) -> AllowedFn {
    ALLOWED_ACTIONS[status.index()]
}

impl Round {
    /// Replacement draws come off the dead wall, so kans and flowers need
    /// a tile left in the deck.
    fn can_replace(&self) -> bool {
        !self.deck.is_empty()
    }

    /// With automatic flower replacement a held flower must go first.
    fn forced_flower(&self, player: PlayerId) -> Option<ActionList> {
        if !self.options.auto_replace_flowers || !self.can_replace() {
            return None;
        }
        self.hands[player]
            .get_flowers()
            .into_iter()
            .next()
            .map(ActionList::with_default)
    }

    /// Discards with the most recent tile as the default.
    fn discard_list(&self, player: PlayerId) -> ActionList {
        let mut discards = self.hands[player].get_discards();
        let mut actions = match discards.pop() {
            Some(last) => ActionList::with_default(last),
            None => ActionList::new(),
        };
        actions.add_actions(discards);
        actions
    }

    fn flower_actions(&self, player: PlayerId) -> Vec<Action> {
        if self.can_replace() {
            self.hands[player].get_flowers()
        } else {
            Vec::new()
        }
    }

    fn ron_actions(&self, player: PlayerId, actions: &mut ActionList) {
        if self.can_ron(player) {
            actions.add_simple_action(ActionType::Ron);
        }
    }
}

fn start_actions(round: &Round, player: PlayerId) -> ActionList {
    if player != round.current_player {
        return ActionList::new();
    }
    let mut actions = ActionList::with_default(Action::Continue);
    actions.add_actions(round.flower_actions(player));
    actions
}

fn play_actions(round: &Round, player: PlayerId) -> ActionList {
    if player != round.current_player {
        return ActionList::new();
    }
    if let Some(flower) = round.forced_flower(player) {
        return flower;
    }

    let hand = &round.hands[player];
    let mut actions = round.discard_list(player);
    if round.options.allow_riichi {
        actions.add_actions(hand.get_riichis());
    }
    if round.can_replace() {
        actions.add_actions(hand.get_add_kans());
        actions.add_actions(hand.get_closed_kans());
    }
    actions.add_actions(round.flower_actions(player));
    if round.can_tsumo(player) {
        actions.add_simple_action(ActionType::Tsumo);
    }
    actions
}

fn called_play_actions(round: &Round, player: PlayerId) -> ActionList {
    if player != round.current_player {
        return ActionList::new();
    }
    if let Some(flower) = round.forced_flower(player) {
        return flower;
    }
    let mut actions = round.discard_list(player);
    actions.add_actions(round.flower_actions(player));
    actions
}

/// An added or closed kan can be robbed before the kan player goes on.
fn kan_after_actions(round: &Round, player: PlayerId) -> ActionList {
    if player == round.current_player {
        return ActionList::with_default(Action::Continue);
    }
    let mut actions = ActionList::new();
    round.ron_actions(player, &mut actions);
    actions
}

fn discarded_actions(round: &Round, player: PlayerId) -> ActionList {
    let discarder = round.current_player;
    if player == discarder {
        return ActionList::new();
    }

    let hand = &round.hands[player];
    let mut actions = if player == discarder.next(round.player_count) {
        let mut actions = ActionList::with_default(Action::Draw);
        actions.add_actions(hand.get_chiis(&round.pool));
        actions
    } else {
        ActionList::new()
    };
    actions.add_actions(hand.get_pons(&round.pool));
    if round.can_replace() {
        actions.add_actions(hand.get_open_kans(&round.pool));
    }
    round.ron_actions(player, &mut actions);
    actions
}

fn last_discarded_actions(round: &Round, player: PlayerId) -> ActionList {
    if player == round.current_player {
        return ActionList::with_default(Action::Continue);
    }
    let mut actions = ActionList::new();
    round.ron_actions(player, &mut actions);
    actions
}

fn end_actions(_round: &Round, _player: PlayerId) -> ActionList {
    ActionList::new()
}
