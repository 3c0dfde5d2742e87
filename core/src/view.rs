use alloc::vec::Vec;
use core::fmt;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-facing rendering of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellSymbol {
    Hidden,
    Flagged,
    Empty,
    Number(u8),
    Mine,
}

impl CellSymbol {
    pub const fn as_char(self) -> char {
        match self {
            Self::Hidden => '.',
            Self::Flagged => 'F',
            Self::Empty => ' ',
            Self::Number(count) => (b'0' + count) as char,
            Self::Mine => 'B',
        }
    }

    const fn from_kind(kind: CellKind) -> Self {
        match kind {
            CellKind::Empty => Self::Empty,
            CellKind::Numbered(count) => Self::Number(count),
            CellKind::Mine => Self::Mine,
        }
    }
}

impl TryFrom<char> for CellSymbol {
    type Error = char;

    fn try_from(symbol: char) -> core::result::Result<Self, Self::Error> {
        Ok(match symbol {
            '.' => Self::Hidden,
            'F' => Self::Flagged,
            ' ' => Self::Empty,
            'B' => Self::Mine,
            '1'..='8' => Self::Number(symbol as u8 - b'0'),
            _ => return Err(symbol),
        })
    }
}

impl fmt::Display for CellSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char(self.as_char())
    }
}

impl Serialize for CellSymbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

impl<'de> Deserialize<'de> for CellSymbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let symbol = char::deserialize(deserializer)?;
        Self::try_from(symbol)
            .map_err(|bad| de::Error::custom(format_args!("unknown cell symbol {bad:?}")))
    }
}

impl Grid {
    /// Symbol for `coords`, or `None` off the board.
    ///
    /// With `reveal_all` every cell shows its contents, so every mine reads
    /// `B`. Outside the crate only [`Game::board`] decides that flag.
    pub(crate) fn symbol_at(&self, coords: Coord2, reveal_all: bool) -> Option<CellSymbol> {
        let cell = self.cell_at(coords)?;

        Some(if reveal_all || cell.is_revealed() {
            CellSymbol::from_kind(self.oracle().kind_at(coords))
        } else if cell.is_flagged() {
            CellSymbol::Flagged
        } else {
            CellSymbol::Hidden
        })
    }

    /// Symbols row by row.
    pub(crate) fn symbols(&self, reveal_all: bool) -> Vec<Vec<CellSymbol>> {
        let (rows, cols) = self.bounds();
        (0..rows)
            .map(|row| {
                (0..cols)
                    .filter_map(|col| self.symbol_at((row, col), reveal_all))
                    .collect()
            })
            .collect()
    }
}

/// Client-safe, serializable state of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub status: GameStatus,
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub remaining_mines: i32,
    pub board: Vec<Vec<CellSymbol>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn row_string(grid: &Grid, row: Coord, reveal_all: bool) -> String {
        grid.symbols(reveal_all)[usize::from(row)]
            .iter()
            .map(|symbol| symbol.as_char())
            .collect()
    }

    #[test]
    fn hidden_cells_do_not_leak_contents() {
        let mut grid = Grid::from_mine_coords(3, 2, &[(0, 0)]).unwrap();
        grid.toggle_flag((0, 1));

        assert_eq!(row_string(&grid, 0, false), ".F.");
        assert_eq!(row_string(&grid, 1, false), "...");
    }

    #[test]
    fn revealed_cells_show_kind() {
        let mut grid = Grid::from_mine_coords(3, 2, &[(0, 0)]).unwrap();
        grid.reveal((0, 2));

        assert_eq!(row_string(&grid, 0, false), ".1 ");
        assert_eq!(row_string(&grid, 1, false), ".1 ");
    }

    #[test]
    fn reveal_all_shows_every_mine_even_if_flagged() {
        let mut grid = Grid::from_mine_coords(3, 1, &[(0, 0), (0, 2)]).unwrap();
        grid.toggle_flag((0, 0));

        assert_eq!(row_string(&grid, 0, true), "B2B");
    }

    #[test]
    fn symbol_chars_round_trip() {
        for symbol in [
            CellSymbol::Hidden,
            CellSymbol::Flagged,
            CellSymbol::Empty,
            CellSymbol::Number(1),
            CellSymbol::Number(8),
            CellSymbol::Mine,
        ] {
            assert_eq!(CellSymbol::try_from(symbol.as_char()), Ok(symbol));
        }
        assert_eq!(CellSymbol::try_from('9'), Err('9'));
    }

    #[test]
    fn symbols_serialize_as_strings() {
        let json = serde_json::to_string(&[CellSymbol::Flagged, CellSymbol::Number(3)]).unwrap();

        assert_eq!(json, r#"["F","3"]"#);
    }
}
