use alloc::collections::BTreeSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// How much of the board around the first reveal is kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafeZone {
    /// Only the clicked cell.
    Cell,
    /// The clicked cell and its up to eight neighbors.
    #[default]
    WithNeighbors,
}

impl SafeZone {
    /// Positions excluded from mine placement for a first reveal at `start`.
    pub fn forbidden_set(self, grid: &Grid, start: Coord2) -> BTreeSet<Coord2> {
        let mut forbidden = BTreeSet::from([start]);
        if matches!(self, Self::WithNeighbors) {
            forbidden.extend(grid.neighbors(start));
        }
        forbidden
    }

    /// Largest forbidden set this policy can produce on a `width`×`height` grid.
    pub fn max_cells(self, width: Coord, height: Coord) -> CellCount {
        match self {
            Self::Cell => 1,
            Self::WithNeighbors => mult(width.min(3), height.min(3)),
        }
    }
}

/// Lazily populates `grid` for a first reveal at `start`: places `count` mines
/// outside the safe zone and derives the adjacency numbers.
pub fn populate_for_first_reveal<R: Rng + ?Sized>(
    grid: &mut Grid,
    start: Coord2,
    count: CellCount,
    safe_zone: SafeZone,
    rng: &mut R,
) -> Result<()> {
    let forbidden = safe_zone.forbidden_set(grid, start);
    place_mines(grid, count, &forbidden, rng)?;
    compute_numbers(grid);
    Ok(())
}
