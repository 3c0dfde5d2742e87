use alloc::vec::Vec;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Random reveals among undetermined cells.
    Easy,
    /// Random until a safe region opens, then flag-count deduction.
    Medium,
    /// Reads the true layout and never picks a mine.
    Hard,
}

/// A single solver move, already applied to the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiMove {
    Revealed(Coord2),
    Detonated(Coord2),
    /// Every cell is revealed or flagged, or (hard tier) only mines remain.
    NoneAvailable,
}

impl AiMove {
    pub const fn coords(self) -> Option<Coord2> {
        match self {
            Self::Revealed(coords) | Self::Detonated(coords) => Some(coords),
            Self::NoneAvailable => None,
        }
    }

    pub const fn is_detonated(self) -> bool {
        matches!(self, Self::Detonated(_))
    }

    pub(crate) fn from_reveal(coords: Coord2, outcome: RevealOutcome) -> Self {
        match outcome {
            RevealOutcome::Detonated => Self::Detonated(coords),
            RevealOutcome::Safe | RevealOutcome::Already => Self::Revealed(coords),
        }
    }
}

/// Picks and plays one move for `difficulty` on a grid whose mines are placed.
///
/// All reveals go through [`Grid::reveal`]. Callers stop driving the solver
/// once it returns [`AiMove::NoneAvailable`] or [`AiMove::Detonated`].
pub fn ai_move<R: Rng + ?Sized>(grid: &mut Grid, difficulty: Difficulty, rng: &mut R) -> AiMove {
    let chosen = match difficulty {
        Difficulty::Easy => easy_move(grid, rng),
        Difficulty::Medium => medium_move(grid, rng),
        Difficulty::Hard => hard_move(grid, rng),
    };
    log::trace!("{:?} solver played {:?}", difficulty, chosen);
    chosen
}

fn easy_move<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> AiMove {
    let candidates = grid.undetermined_cells();
    random_reveal(grid, &candidates, rng)
}

fn medium_move<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> AiMove {
    let candidates = grid.undetermined_cells();

    let has_safe_region = grid
        .iter_coords()
        .any(|coords| grid[coords].revealed_kind() == Some(CellKind::Empty));
    if !has_safe_region {
        return bootstrap(grid, candidates, rng);
    }

    if let Some(deduced) = deduce(grid) {
        return deduced;
    }

    random_reveal(grid, &candidates, rng)
}

fn hard_move<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> AiMove {
    let oracle = grid.oracle();
    let safe: Vec<Coord2> = grid
        .undetermined_cells()
        .into_iter()
        .filter(|&coords| !oracle.contains_mine(coords))
        .collect();

    random_reveal(grid, &safe, rng)
}

/// Reveals shuffled candidates until an empty cell opens up or a mine goes off.
fn bootstrap<R: Rng + ?Sized>(grid: &mut Grid, mut candidates: Vec<Coord2>, rng: &mut R) -> AiMove {
    candidates.shuffle(rng);

    for coords in candidates {
        if grid.reveal(coords) == RevealOutcome::Detonated {
            return AiMove::Detonated(coords);
        }
        if grid[coords].revealed_kind() == Some(CellKind::Empty) {
            return AiMove::Revealed(coords);
        }
    }

    AiMove::NoneAvailable
}

/// Finds the first revealed number, row-major, whose flagged neighbors already
/// account for all of its mines and reveals one of its remaining neighbors.
fn deduce(grid: &mut Grid) -> Option<AiMove> {
    for clue in grid.iter_coords() {
        let Some(CellKind::Numbered(count)) = grid[clue].revealed_kind() else {
            continue;
        };

        if grid.count_neighbors(clue, Cell::is_flagged) != count {
            continue;
        }

        let Some(target) = grid
            .neighbors(clue)
            .find(|&pos| grid[pos].is_undetermined())
        else {
            continue;
        };

        log::trace!("Clue {:?} is satisfied by flags, revealing {:?}", clue, target);
        return Some(AiMove::from_reveal(target, grid.reveal(target)));
    }

    None
}

fn random_reveal<R: Rng + ?Sized>(grid: &mut Grid, candidates: &[Coord2], rng: &mut R) -> AiMove {
    match candidates.choose(rng) {
        Some(&coords) => AiMove::from_reveal(coords, grid.reveal(coords)),
        None => AiMove::NoneAvailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn random_grid(seed: u64, mines: CellCount) -> (Grid, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = Grid::new(10, 10).unwrap();
        place_mines(&mut grid, mines, &BTreeSet::new(), &mut rng).unwrap();
        compute_numbers(&mut grid);
        (grid, rng)
    }

    /// 3x3 with mines across the top-left; the bottom two rows are opened.
    fn opened_corner() -> Grid {
        let mut grid = Grid::from_mine_coords(3, 3, &[(0, 0), (0, 1)]).unwrap();
        assert_eq!(grid.reveal((2, 0)), RevealOutcome::Safe);
        grid
    }

    #[test]
    fn every_tier_reports_exhausted_board() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut rng = SmallRng::seed_from_u64(3);
            let mut grid = Grid::from_mine_coords(2, 1, &[(0, 0)]).unwrap();
            grid.reveal((0, 1));
            grid.toggle_flag((0, 0));

            assert_eq!(ai_move(&mut grid, difficulty, &mut rng), AiMove::NoneAvailable);
        }
    }

    #[test]
    fn easy_reveals_an_undetermined_cell() {
        let (mut grid, mut rng) = random_grid(5, 10);
        grid.toggle_flag((0, 0));
        let before: BTreeSet<_> = grid.undetermined_cells().into_iter().collect();

        let played = ai_move(&mut grid, Difficulty::Easy, &mut rng);

        let coords = played.coords().unwrap();
        assert!(before.contains(&coords));
        assert!(grid[coords].is_revealed());
        assert!(grid[(0, 0)].is_flagged());
    }

    #[test]
    fn medium_reveals_the_only_deducible_neighbor() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut grid = opened_corner();
        grid.toggle_flag((0, 0));
        grid.toggle_flag((0, 1));

        let played = ai_move(&mut grid, Difficulty::Medium, &mut rng);

        assert_eq!(played, AiMove::Revealed((0, 2)));
        assert!(grid.is_win());
    }

    #[test]
    fn medium_deduction_trusts_flags() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut grid = opened_corner();
        grid.toggle_flag((0, 1));
        grid.toggle_flag((0, 2));

        let played = ai_move(&mut grid, Difficulty::Medium, &mut rng);

        assert_eq!(played, AiMove::Detonated((0, 0)));
    }

    #[test]
    fn medium_falls_back_to_random_without_deduction() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut grid = opened_corner();

        let played = ai_move(&mut grid, Difficulty::Medium, &mut rng);

        let coords = played.coords().unwrap();
        assert_eq!(coords.0, 0);
        assert!(grid[coords].is_revealed());
    }

    #[test]
    fn medium_bootstrap_ends_on_empty_cell_or_mine() {
        for seed in 0..32 {
            let (mut grid, mut rng) = random_grid(seed, 12);

            match ai_move(&mut grid, Difficulty::Medium, &mut rng) {
                AiMove::Revealed(coords) => {
                    assert_eq!(grid[coords].revealed_kind(), Some(CellKind::Empty));
                }
                AiMove::Detonated(coords) => {
                    assert!(grid.oracle().contains_mine(coords));
                    assert!(grid[coords].is_revealed());
                }
                AiMove::NoneAvailable => panic!("fresh board cannot be exhausted"),
            }
        }
    }

    #[test]
    fn hard_never_detonates_and_clears_the_board() {
        for seed in 0..8 {
            let (mut grid, mut rng) = random_grid(seed, 20);

            loop {
                match ai_move(&mut grid, Difficulty::Hard, &mut rng) {
                    AiMove::Revealed(coords) => assert!(!grid.oracle().contains_mine(coords)),
                    AiMove::Detonated(coords) => panic!("hard solver hit a mine at {coords:?}"),
                    AiMove::NoneAvailable => break,
                }
            }

            assert!(grid.is_win());
            assert_eq!(grid.undetermined_cells().len(), 20);
        }
    }

    #[test]
    fn same_seed_replays_same_moves() {
        let play = |seed| {
            let (mut grid, mut rng) = random_grid(seed, 15);
            let mut moves = Vec::new();
            for _ in 0..5 {
                let played = ai_move(&mut grid, Difficulty::Easy, &mut rng);
                moves.push(played);
                if played.coords().is_none() || played.is_detonated() {
                    break;
                }
            }
            moves
        };

        assert_eq!(play(42), play(42));
    }
}
