//! Round states.

use serde::{Deserialize, Serialize};

/// Where a round is in its turn cycle. The comment on each state lists the
/// actions on offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum RoundStatus {
    /// Flower exchange before the first discard: continue, flower.
    Start = 0,
    /// The current player holds a drawn tile: discard, riichi, kans,
    /// flower, tsumo.
    Play = 1,
    /// The current player claimed a discard: discard, flower.
    CalledPlay = 2,
    /// An added kan may be robbed: continue, ron.
    AddKanAfter = 3,
    /// A closed kan may be robbed: continue, ron.
    ClosedKanAfter = 4,
    /// A discard is on offer: draw, chii, pon, open kan, ron.
    Discarded = 5,
    /// The final discard is on offer: continue, ron.
    LastDiscarded = 6,
    End = 7,
}

impl RoundStatus {
    pub const COUNT: usize = 8;

    /// Index into per-status tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_kan_after(self) -> bool {
        matches!(self, RoundStatus::AddKanAfter | RoundStatus::ClosedKanAfter)
    }
}
