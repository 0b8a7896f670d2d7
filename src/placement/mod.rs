//! Object placement over a generated cave
//!
//! Crystals decorate wall-adjacent spots; gems are collectibles scattered
//! through open cells next to rock. Both placers run a bounded
//! accept/reject loop per slot. A slot that exhausts its budget stays at
//! its default value and is counted here, never raised as an error.

pub mod crystal;
pub mod gem;

pub use crystal::{Crystal, place_crystals};
pub use gem::{Gem, GemKind, GemTally, collect_gem, place_gems, respawn_gem};

/// Attempt budget per object slot
pub const PLACEMENT_ATTEMPTS: u32 = 100;

/// Outcome counts for one placement run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub requested: usize,
    pub placed: usize,
}

impl PlacementStats {
    /// Slots left at their default value after exhausting the budget
    pub fn failed(&self) -> usize {
        self.requested - self.placed
    }
}
