//! Core table types: tiles, the wall, the river, calls, actions, seats,
//! RNG and rule options.
//!
//! Nothing here knows about round flow. `hand`, `scoring` and `round`
//! build on these types.

pub mod action;
pub mod call;
pub mod deck;
pub mod discard;
pub mod meld;
pub mod options;
pub mod player;
pub mod rng;
pub mod tile;

pub use action::{Action, ActionList, ActionRecord, ActionType};
pub use call::{Call, CallType};
pub use deck::Deck;
pub use discard::{Discard, DiscardPool, DiscardSource};
pub use meld::{Meld, MeldType, TileValueMeld};
pub use options::{GameOptions, ScoreLimit};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use tile::{Tile, TileValue};
