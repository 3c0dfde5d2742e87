#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use grid::*;
pub use solver::*;
pub use store::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod game;
mod generator;
mod grid;
mod solver;
mod store;
mod tile;
mod types;
mod view;

/// Board side length of the standard game.
pub const STANDARD_SIDE: Coord = 10;

/// Mine counts accepted by [`GameConfig::standard`].
pub const STANDARD_MINES: core::ops::RangeInclusive<CellCount> = 10..=20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub safe_zone: SafeZone,
}

impl GameConfig {
    pub const fn new_unchecked(
        width: Coord,
        height: Coord,
        mines: CellCount,
        safe_zone: SafeZone,
    ) -> Self {
        Self {
            width,
            height,
            mines,
            safe_zone,
        }
    }

    /// Validates that the board exists and that `mines` fits wherever the
    /// first reveal lands.
    pub fn new(width: Coord, height: Coord, mines: CellCount, safe_zone: SafeZone) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let config = Self::new_unchecked(width, height, mines, safe_zone);
        let available = config.total_cells() - safe_zone.max_cells(width, height);
        if mines > available {
            return Err(GameError::InsufficientSpace {
                requested: mines,
                available,
            });
        }

        Ok(config)
    }

    /// The canonical 10×10 board with 10 to 20 mines.
    pub fn standard(mines: CellCount, safe_zone: SafeZone) -> Result<Self> {
        if !STANDARD_MINES.contains(&mines) {
            return Err(GameError::MineCountOutOfRange {
                mines,
                min: *STANDARD_MINES.start(),
                max: *STANDARD_MINES.end(),
            });
        }

        Self::new(STANDARD_SIDE, STANDARD_SIDE, mines, safe_zone)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

/// Result of a single [`Grid::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// A safe cell (or its whole empty region) was revealed, or the target was
    /// off the board.
    Safe,
    /// The target was already revealed or is flagged; nothing changed.
    Already,
    /// The target was a mine. Terminal for the owning game.
    Detonated,
}

impl RevealOutcome {
    pub const fn is_detonated(self) -> bool {
        matches!(self, Self::Detonated)
    }
}
