//! # rust-mahjong
//!
//! A rules engine for three- and four-player Mahjong with flowers, riichi
//! and a configurable scoring table.
//!
//! ## Design Principles
//!
//! 1. **Server-Authoritative**: A `Round` owns every tile. Clients only see
//!    what it exposes and only act through its allowed action lists.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    Three-player tables use the same code paths as four-player ones.
//!
//! 3. **Configuration Over Convention**: Table rules, score multipliers,
//!    limits and per-pattern han/fu live in `GameOptions`.
//!
//! ## Architecture
//!
//! - **Table-Driven Rounds**: Allowed actions per state and the effect of
//!   each action are looked up in static tables.
//!
//! - **Priority Resolution**: Simultaneous claims on a discard are settled
//!   by action rank, then seat order after the discarder.
//!
//! - **Persistent History**: The round history is an `im::Vector`, so
//!   handing snapshots to clients is cheap.
//!
//! ## Modules
//!
//! - `core`: Tiles, wall, discard pool, calls, actions, seats, RNG, options
//! - `hand`: Hands, shanten and waits, decomposition into melds
//! - `scoring`: Pattern table, han/fu, payments
//! - `round`: Round state machine, priority resolver, action selector
//! - `game`: Round sequencing and the score ledger

pub mod core;
pub mod errors;
pub mod game;
pub mod hand;
pub mod round;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionList, ActionRecord, ActionType,
    Call, CallType,
    Deck, Discard, DiscardPool, DiscardSource,
    GameOptions, ScoreLimit,
    GameRng, GameRngState,
    Meld, MeldType, TileValueMeld,
    PlayerId, PlayerMap,
    Tile, TileValue,
};

pub use crate::errors::{MahjongError, MahjongResult};

pub use crate::game::Game;

pub use crate::hand::Hand;
pub use crate::hand::shanten::{calculate_shanten, get_waits, ValueMask};
pub use crate::hand::decompose::{formed_hand_possibilities, is_winning};

pub use crate::round::{ActionSelector, Round, RoundResult, RoundSetup, RoundStatus, RulesEngine};

pub use crate::scoring::{PatternData, PatternRegistry, Scorer, Scoring, Win};
