use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

impl Grid {
    /// Reveals the cell at `coords`.
    ///
    /// Out-of-bounds targets are accepted as a no-op and report
    /// [`RevealOutcome::Safe`]. Revealing an `Empty` cell flood-reveals its
    /// connected empty region plus the numbered border; flagged cells are never
    /// revealed by the flood and the flood does not pass through them.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(cell) = self.cell_at(coords) else {
            return RevealOutcome::Safe;
        };

        if !cell.is_undetermined() {
            return RevealOutcome::Already;
        }

        match cell.kind() {
            CellKind::Mine => {
                self[coords].mark_revealed();
                log::debug!("Mine detonated at {:?}", coords);
                RevealOutcome::Detonated
            }
            CellKind::Numbered(_) => {
                self[coords].mark_revealed();
                RevealOutcome::Safe
            }
            CellKind::Empty => {
                self.flood_reveal(coords);
                RevealOutcome::Safe
            }
        }
    }

    /// Flips the flag on an unrevealed cell. Returns `false`, without changing
    /// anything, when `coords` is out of bounds or already revealed.
    pub fn toggle_flag(&mut self, coords: Coord2) -> bool {
        match self.cell_at(coords) {
            Some(cell) if !cell.is_revealed() => {
                self[coords].toggle_flag();
                true
            }
            _ => false,
        }
    }

    /// Whether every non-mine cell is revealed. Flags and mines are ignored.
    pub fn is_win(&self) -> bool {
        self.iter_coords().all(|coords| {
            let cell = self[coords];
            cell.kind().is_mine() || cell.is_revealed()
        })
    }

    fn flood_reveal(&mut self, start: Coord2) {
        let mut visited = BTreeSet::new();
        let mut to_visit = VecDeque::from([start]);
        let mut revealed = 0usize;

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let cell = self[visit_coords];
            if cell.is_flagged() || cell.kind().is_mine() {
                continue;
            }

            if !cell.is_revealed() {
                self[visit_coords].mark_revealed();
                revealed += 1;
            }

            if cell.kind().is_empty() {
                to_visit.extend(
                    self.neighbors(visit_coords)
                        .filter(|&pos| !self[pos].is_revealed())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        log::trace!("Flood from {:?} revealed {} cells", start, revealed);
    }
}
