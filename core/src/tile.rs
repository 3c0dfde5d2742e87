use serde::{Deserialize, Serialize};

/// What a cell holds, fixed once mines are placed and numbers computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Numbered(u8),
    Mine,
}

impl CellKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Classifies a safe cell from its adjacent mine count.
    pub const fn from_adjacent_mines(count: u8) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Numbered(count)
        }
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// Player state of one position plus its hidden contents. Client-facing output
/// goes through [`crate::GameSnapshot`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    kind: CellKind,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Neither revealed nor flagged, i.e. a legal reveal target.
    pub const fn is_undetermined(self) -> bool {
        !self.revealed && !self.flagged
    }

    /// The kind of a cell, but only once the player has uncovered it.
    pub const fn revealed_kind(self) -> Option<CellKind> {
        if self.revealed {
            Some(self.kind)
        } else {
            None
        }
    }

    pub(crate) const fn kind(self) -> CellKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    pub(crate) fn mark_revealed(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.flagged = !self.flagged;
    }
}
