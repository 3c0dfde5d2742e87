/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional position `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row and column steps to the eight surrounding cells, row-major.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Clipped 8-connected neighborhood of a position, in a fixed row-major order.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offsets: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    /// `bounds` is `(rows, columns)`, exclusive.
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offsets: OFFSETS.iter(),
        }
    }

    fn step(&self, (d_row, d_col): (i8, i8)) -> Option<Coord2> {
        let (row, col) = self.center;
        let (rows, cols) = self.bounds;

        let row = row.checked_add_signed(d_row).filter(|&row| row < rows)?;
        let col = col.checked_add_signed(d_col).filter(|&col| col < cols)?;
        Some((row, col))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = self.offsets.next() {
            if let Some(coords) = self.step(offset) {
                return Some(coords);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}
