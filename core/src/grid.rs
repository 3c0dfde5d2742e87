use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Fixed-size minesweeper grid, stored row-major as `(row, column)`.
///
/// A fresh grid holds only unrevealed `Empty` cells; mines and numbers are
/// filled in exactly once by [`place_mines`] and [`compute_numbers`], after
/// which cells change only through [`Grid::reveal`] and [`Grid::toggle_flag`].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    mines_placed: bool,
}

impl Grid {
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions);
        }

        Ok(Self {
            cells: Array2::default((height, width).to_nd_index()),
            mine_count: 0,
            mines_placed: false,
        })
    }

    /// Builds a populated grid from an explicit mine layout.
    pub fn from_mine_coords(width: Coord, height: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(width, height)?;

        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid[coords].set_kind(CellKind::Mine);
        }

        let count = grid
            .cells
            .iter()
            .filter(|cell| cell.kind().is_mine())
            .count();
        grid.mark_mines_placed(count.try_into().unwrap_or(CellCount::MAX));
        compute_numbers(&mut grid);
        Ok(grid)
    }

    pub fn width(&self) -> Coord {
        self.bounds().1
    }

    pub fn height(&self) -> Coord {
        self.bounds().0
    }

    /// `(rows, columns)`, the exclusive upper bound for positions.
    pub fn bounds(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // Both axes were built from `Coord` values.
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.height(), self.width())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.bounds();
        coords.0 < rows && coords.1 < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self[coords])
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.bounds())
    }

    /// All positions in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.bounds();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// Positions that are neither revealed nor flagged, row-major.
    pub fn undetermined_cells(&self) -> Vec<Coord2> {
        self.iter_coords()
            .filter(|&coords| self[coords].is_undetermined())
            .collect()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_flagged())
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_revealed())
    }

    pub(crate) fn count_neighbors(&self, coords: Coord2, pred: impl Fn(Cell) -> bool) -> u8 {
        // At most eight neighbors.
        self.neighbors(coords)
            .filter(|&pos| pred(self[pos]))
            .count() as u8
    }

    /// Read access to the true mine layout, for the hard solver and the
    /// end-of-game view only.
    pub(crate) fn oracle(&self) -> MineOracle<'_> {
        MineOracle { grid: self }
    }

    pub(crate) fn mark_mines_placed(&mut self, count: CellCount) {
        self.mine_count = count;
        self.mines_placed = true;
    }

    fn count_cells(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| pred(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct MineOracle<'a> {
    grid: &'a Grid,
}

impl MineOracle<'_> {
    pub(crate) fn contains_mine(&self, coords: Coord2) -> bool {
        self.grid[coords].kind().is_mine()
    }

    pub(crate) fn kind_at(&self, coords: Coord2) -> CellKind {
        self.grid[coords].kind()
    }
}
