//! Error types surfaced to callers of the engine.
//!
//! Only recoverable misuse is reported through `MahjongError`. Broken
//! internal invariants (a decomposition without a winning meld, a kan
//! inside a closed decomposition, ...) panic instead.

use std::fmt;

use crate::core::{Action, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MahjongError {
    /// An action outside the player's current allowed set.
    InvalidMove {
        player: PlayerId,
        action: Action,
        allowed: Vec<Action>,
    },
    /// A structural misuse of the game, e.g. starting a round too early.
    InvalidOperation { message: String },
}

impl MahjongError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        MahjongError::InvalidOperation {
            message: message.into(),
        }
    }
}

impl fmt::Display for MahjongError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MahjongError::InvalidMove {
                player,
                action,
                allowed,
            } => {
                write!(
                    f,
                    "Invalid move by {}: {:?} (allowed: {:?})",
                    player, action, allowed
                )
            }
            MahjongError::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl std::error::Error for MahjongError {}

pub type MahjongResult<T> = Result<T, MahjongError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_operation() {
        let err = MahjongError::invalid_operation("round has not ended");
        assert_eq!(format!("{}", err), "Invalid operation: round has not ended");
    }

    #[test]
    fn test_display_invalid_move() {
        let err = MahjongError::InvalidMove {
            player: PlayerId::new(2),
            action: Action::Pass,
            allowed: vec![Action::Draw],
        };
        let text = format!("{}", err);
        assert!(text.starts_with("Invalid move by Player 2"));
        assert!(text.contains("Draw"));
    }
}
