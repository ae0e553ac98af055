//! A finished cave.

use grotto_core::Point;

use crate::exit::Exit;
use crate::grid::Grid;

/// The result of one generation run: the tile grid plus the exits that
/// were opened on its border.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cave {
    grid: Grid,
    exits: Exit,
    seed: Option<u64>,
}

impl Cave {
    pub(crate) fn new(grid: Grid, exits: Exit, seed: Option<u64>) -> Self {
        Self { grid, exits, seed }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Resolved exits: every side is either disabled or fixed.
    pub fn exits(&self) -> &Exit {
        &self.exits
    }

    /// The numeric seed the run used, `None` for an injected generator.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn size(&self) -> Point {
        self.grid.size()
    }

    pub fn into_parts(self) -> (Grid, Exit) {
        (self.grid, self.exits)
    }
}
