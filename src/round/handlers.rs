//! How each action changes a round.
//!
//! Handlers assume the action was already checked against the allowed
//! list, so the tiles they name are known to be in the hand.

use super::{Round, RoundStatus};
use crate::core::action::{Action, ActionType};
use crate::core::player::PlayerId;

type HandlerFn = fn(&mut Round, PlayerId, &Action);

/// Indexed by `ActionType::rank`. Rank 5 is unused.
static ACTION_HANDLERS: [HandlerFn; 14] = [
    pass,
    continue_play,
    draw,
    discard,
    discard,
    unused_rank,
    chii,
    pon,
    open_kan,
    add_kan,
    closed_kan,
    flower,
    ron,
    tsumo,
];

pub(super) fn handler_for(action_type: ActionType) -> HandlerFn {
    ACTION_HANDLERS[usize::from(action_type.rank())]
}

fn mismatch(action: &Action) -> ! {
    panic!("Handler called with the wrong action {:?}", action)
}

fn pass(_round: &mut Round, player: PlayerId, _action: &Action) {
    panic!("Pass by {} cannot be applied to a round", player)
}

fn unused_rank(_round: &mut Round, _player: PlayerId, action: &Action) {
    mismatch(action)
}

fn continue_play(round: &mut Round, player: PlayerId, _action: &Action) {
    match round.status {
        RoundStatus::Start => {
            round.hands[player].sort();
            round.flower_pass_count += 1;
            if round.flower_pass_count > round.player_count {
                round.current_player = round.dealer();
                round.status = RoundStatus::Play;
            } else {
                round.current_player = round.current_player.next(round.player_count);
            }
        }
        RoundStatus::AddKanAfter | RoundStatus::ClosedKanAfter => {
            round.status = RoundStatus::Play;
            round.last_tile = None;
            round.pool.settle();
        }
        RoundStatus::LastDiscarded => round.status = RoundStatus::End,
        status => panic!("Continue is not a move in {:?}", status),
    }
}

fn draw(round: &mut Round, player: PlayerId, _action: &Action) {
    round.pool.settle();
    round.hands[player].draw(&mut round.deck);
    round.current_player = player;
    round.status = RoundStatus::Play;
    round.last_tile = None;
}

/// Plain discards and riichi declarations.
fn discard(round: &mut Round, player: PlayerId, action: &Action) {
    let tile = match *action {
        Action::Discard { tile } => {
            round.hands[player].discard(tile, &mut round.pool);
            tile
        }
        Action::Riichi { tile } => {
            round.hands[player].riichi(tile, &mut round.pool);
            tile
        }
        _ => mismatch(action),
    };
    round.status = if round.tiles_left() > 0 {
        RoundStatus::Discarded
    } else {
        RoundStatus::LastDiscarded
    };
    round.last_tile = Some(tile);
}

/// Common tail of the three calls on a discard.
fn claim(round: &mut Round, player: PlayerId) {
    round.current_player = player;
    round.status = RoundStatus::CalledPlay;
    round.last_tile = None;
}

fn chii(round: &mut Round, player: PlayerId, action: &Action) {
    let Action::Chii { other_tiles } = *action else {
        mismatch(action)
    };
    let discarder = round.current_player;
    round.hands[player].chii(discarder, other_tiles, &mut round.pool);
    claim(round, player);
}

fn pon(round: &mut Round, player: PlayerId, action: &Action) {
    let Action::Pon { other_tiles } = *action else {
        mismatch(action)
    };
    let discarder = round.current_player;
    round.hands[player].pon(discarder, other_tiles, &mut round.pool);
    claim(round, player);
}

fn open_kan(round: &mut Round, player: PlayerId, action: &Action) {
    let Action::OpenKan { other_tiles } = *action else {
        mismatch(action)
    };
    let discarder = round.current_player;
    let Round { hands, pool, deck, .. } = round;
    hands[player].open_kan(discarder, other_tiles, pool, deck);
    claim(round, player);
}

fn add_kan(round: &mut Round, player: PlayerId, action: &Action) {
    let Action::AddKan { tile, pon_call } = action else {
        mismatch(action)
    };
    let Round { hands, pool, deck, .. } = round;
    hands[player].add_kan(*tile, pon_call, pool, deck);
    round.status = RoundStatus::AddKanAfter;
    round.last_tile = Some(*tile);
}

fn closed_kan(round: &mut Round, player: PlayerId, action: &Action) {
    let Action::ClosedKan { tiles } = *action else {
        mismatch(action)
    };
    let Round { hands, pool, deck, .. } = round;
    hands[player].closed_kan(tiles, pool, deck);
    round.status = RoundStatus::ClosedKanAfter;
    round.last_tile = Some(tiles[0]);
}

fn flower(round: &mut Round, player: PlayerId, action: &Action) {
    let Action::Flower { tile } = *action else {
        mismatch(action)
    };
    round.hands[player].flower(tile, &mut round.deck);
    round.flower_pass_count = 0;
}

fn ron(round: &mut Round, player: PlayerId, _action: &Action) {
    let win = round
        .ron_win(player)
        .unwrap_or_else(|| panic!("{} declared ron without a winning hand", player));
    round.win = Some(win);
    round.status = RoundStatus::End;
}

fn tsumo(round: &mut Round, player: PlayerId, _action: &Action) {
    let win = round
        .tsumo_win(player)
        .unwrap_or_else(|| panic!("{} declared tsumo without a winning hand", player));
    round.win = Some(win);
    round.status = RoundStatus::End;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rank_has_a_handler() {
        let types = [
            ActionType::Pass,
            ActionType::Continue,
            ActionType::Draw,
            ActionType::Discard,
            ActionType::Riichi,
            ActionType::Chii,
            ActionType::Pon,
            ActionType::OpenKan,
            ActionType::AddKan,
            ActionType::ClosedKan,
            ActionType::Flower,
            ActionType::Ron,
            ActionType::Tsumo,
        ];
        for action_type in types {
            assert!(usize::from(action_type.rank()) < ACTION_HANDLERS.len());
        }
    }
}
