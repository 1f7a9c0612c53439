//! Actions a player can take, and the per-player lists of legal ones.
//!
//! `ActionType` doubles as the priority rank used when several players
//! want to act on the same discard: a larger discriminant wins.
//!
//! ```
//! use rust_mahjong::core::{Action, ActionType};
//!
//! assert!(ActionType::Ron > ActionType::Pon);
//! assert!(ActionType::Pon > ActionType::Chii);
//! assert!(ActionType::Chii > ActionType::Draw);
//! assert_eq!(Action::Ron.action_type(), ActionType::Ron);
//! ```

use serde::{Deserialize, Serialize};

use super::call::Call;
use super::player::PlayerId;
use super::tile::Tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionType {
    Pass = 0,
    Continue = 1,
    Draw = 2,
    Discard = 3,
    Riichi = 4,
    Chii = 6,
    Pon = 7,
    OpenKan = 8,
    AddKan = 9,
    ClosedKan = 10,
    Flower = 11,
    Ron = 12,
    Tsumo = 13,
}

impl ActionType {
    /// Priority rank; higher acts first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Action types that claim or declare a meld.
    #[must_use]
    pub const fn is_call(self) -> bool {
        matches!(
            self,
            ActionType::Chii
                | ActionType::Pon
                | ActionType::OpenKan
                | ActionType::AddKan
                | ActionType::ClosedKan
        )
    }
}

/// A single player action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum Action {
    Pass,
    Continue,
    Draw,
    Discard { tile: Tile },
    Riichi { tile: Tile },
    Chii { other_tiles: [Tile; 2] },
    Pon { other_tiles: [Tile; 2] },
    OpenKan { other_tiles: [Tile; 3] },
    /// Extend `pon_call` with `tile` from the hand.
    AddKan { tile: Tile, pon_call: Call },
    ClosedKan { tiles: [Tile; 4] },
    Flower { tile: Tile },
    Ron,
    Tsumo,
}

impl Action {
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Pass => ActionType::Pass,
            Action::Continue => ActionType::Continue,
            Action::Draw => ActionType::Draw,
            Action::Discard { .. } => ActionType::Discard,
            Action::Riichi { .. } => ActionType::Riichi,
            Action::Chii { .. } => ActionType::Chii,
            Action::Pon { .. } => ActionType::Pon,
            Action::OpenKan { .. } => ActionType::OpenKan,
            Action::AddKan { .. } => ActionType::AddKan,
            Action::ClosedKan { .. } => ActionType::ClosedKan,
            Action::Flower { .. } => ActionType::Flower,
            Action::Ron => ActionType::Ron,
            Action::Tsumo => ActionType::Tsumo,
        }
    }

    /// Build one of the argument-free actions.
    ///
    /// Panics for action types that carry tiles.
    #[must_use]
    pub fn simple(action_type: ActionType) -> Self {
        match action_type {
            ActionType::Pass => Action::Pass,
            ActionType::Continue => Action::Continue,
            ActionType::Draw => Action::Draw,
            ActionType::Ron => Action::Ron,
            ActionType::Tsumo => Action::Tsumo,
            other => panic!("{:?} is not a simple action", other),
        }
    }
}

/// The legal actions of one player, default first.
///
/// The default is what a player is assumed to do when their submission is
/// illegal; `auto` is what they do without submitting anything, which is
/// only defined when there is no choice to make. A list with nothing else
/// on offer holds just `Pass`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionList {
    actions: Vec<Action>,
}

impl Default for ActionList {
    fn default() -> Self {
        Self::with_default(Action::Pass)
    }
}

impl ActionList {
    /// A list whose default is `Pass`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A list whose default is `default`.
    #[must_use]
    pub fn with_default(default: Action) -> Self {
        Self {
            actions: vec![default],
        }
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn contains(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }

    /// Nothing to do but pass.
    #[must_use]
    pub fn is_pass_only(&self) -> bool {
        self.actions == [Action::Pass]
    }

    /// The first action.
    #[must_use]
    pub fn default_action(&self) -> Action {
        self.actions.first().cloned().unwrap_or(Action::Pass)
    }

    /// The only action, when there is exactly one.
    #[must_use]
    pub fn auto(&self) -> Option<Action> {
        match self.actions.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn add_simple_action(&mut self, action_type: ActionType) {
        self.push(Action::simple(action_type));
    }

    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.actions.extend(actions);
    }
}

/// One entry of a round's action history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action) -> Self {
        Self { player, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_is_pass() {
        let list = ActionList::new();
        assert_eq!(list.default_action(), Action::Pass);
        assert_eq!(list.auto(), Some(Action::Pass));
        assert!(list.is_pass_only());
    }

    #[test]
    fn test_ron_next_to_pass_is_a_choice() {
        let mut list = ActionList::new();
        list.add_simple_action(ActionType::Ron);
        assert_eq!(list.auto(), None);
        assert_eq!(list.default_action(), Action::Pass);
        assert!(!list.is_pass_only());
    }

    #[test]
    fn test_single_action_is_auto() {
        let list = ActionList::with_default(Action::Continue);
        assert_eq!(list.auto(), Some(Action::Continue));
        assert_eq!(list.default_action(), Action::Continue);
    }

    #[test]
    fn test_multiple_actions_have_no_auto() {
        let mut list = ActionList::with_default(Action::Draw);
        list.add_simple_action(ActionType::Ron);
        assert_eq!(list.auto(), None);
        assert_eq!(list.default_action(), Action::Draw);
        assert!(list.contains(&Action::Ron));
    }

    #[test]
    fn test_call_types() {
        assert!(ActionType::ClosedKan.is_call());
        assert!(ActionType::Chii.is_call());
        assert!(!ActionType::Riichi.is_call());
        assert!(!ActionType::Flower.is_call());
    }

    #[test]
    #[should_panic(expected = "not a simple action")]
    fn test_simple_rejects_tile_actions() {
        let _ = Action::simple(ActionType::Discard);
    }

    #[test]
    fn test_action_json_is_tagged() {
        let action = Action::Chii {
            other_tiles: [Tile::new(51), Tile::new(61)],
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action_type"], "chii");
        assert_eq!(json["other_tiles"][1], 61);
        let restored: Action = serde_json::from_value(json).unwrap();
        assert_eq!(restored, action);

        let json = serde_json::to_string(&Action::Ron).unwrap();
        assert_eq!(json, r#"{"action_type":"ron"}"#);
    }
}
