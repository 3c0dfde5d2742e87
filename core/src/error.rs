use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid width and height must both be positive")]
    InvalidDimensions,
    #[error("Cannot place {requested} mines, only {available} cells are eligible")]
    InsufficientSpace {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Mines were already placed on this grid")]
    MinesAlreadyPlaced,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine count {mines} is outside the allowed range {min}..={max}")]
    MineCountOutOfRange {
        mines: CellCount,
        min: CellCount,
        max: CellCount,
    },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("No game with this identifier")]
    UnknownGame,
}

pub type Result<T> = core::result::Result<T, GameError>;
