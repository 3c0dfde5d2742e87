use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::Rng;
use rand::seq::index;

use crate::*;

/// Places `count` mines on distinct positions drawn uniformly, without
/// replacement, from every position of `grid` not in `forbidden`.
///
/// Fails with [`GameError::InsufficientSpace`] when fewer than `count` positions
/// are eligible, and with [`GameError::MinesAlreadyPlaced`] on a second call.
/// The grid is left untouched on failure.
pub fn place_mines<R: Rng + ?Sized>(
    grid: &mut Grid,
    count: CellCount,
    forbidden: &BTreeSet<Coord2>,
    rng: &mut R,
) -> Result<()> {
    if grid.mines_placed() {
        log::warn!("Mines already placed, refusing to place {} more", count);
        return Err(GameError::MinesAlreadyPlaced);
    }

    let pool: Vec<Coord2> = grid
        .iter_coords()
        .filter(|coords| !forbidden.contains(coords))
        .collect();

    // A grid never exceeds `Coord::MAX²` cells, which fits `CellCount`.
    let available = pool.len() as CellCount;
    if count > available {
        log::warn!(
            "Cannot place {} mines, only {} of {} cells are eligible",
            count,
            available,
            grid.total_cells()
        );
        return Err(GameError::InsufficientSpace {
            requested: count,
            available,
        });
    }

    for picked in index::sample(rng, pool.len(), count.into()) {
        grid[pool[picked]].set_kind(CellKind::Mine);
    }
    grid.mark_mines_placed(count);

    log::debug!(
        "Placed {} mines on a {}x{} grid ({} cells excluded)",
        count,
        grid.width(),
        grid.height(),
        grid.total_cells() - available
    );
    Ok(())
}

/// Derives `Empty`/`Numbered` for every non-mine cell from its mine neighbors.
pub fn compute_numbers(grid: &mut Grid) {
    for coords in grid.iter_coords() {
        if grid[coords].kind().is_mine() {
            continue;
        }

        let adjacent = grid.count_neighbors(coords, |cell| cell.kind().is_mine());
        grid[coords].set_kind(CellKind::from_adjacent_mines(adjacent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn mine_positions(grid: &Grid) -> BTreeSet<Coord2> {
        let oracle = grid.oracle();
        grid.iter_coords()
            .filter(|&pos| oracle.contains_mine(pos))
            .collect()
    }

    #[test]
    fn places_exact_count_outside_forbidden() {
        let forbidden = BTreeSet::from([(0, 0), (0, 1), (1, 0), (1, 1), (3, 4)]);

        for seed in 0..64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut grid = Grid::new(5, 4).unwrap();

            place_mines(&mut grid, 12, &forbidden, &mut rng).unwrap();

            let mines = mine_positions(&grid);
            assert_eq!(mines.len(), 12);
            assert!(mines.is_disjoint(&forbidden));
            assert_eq!(grid.mine_count(), 12);
            assert!(grid.mines_placed());
        }
    }

    #[test]
    fn fills_every_eligible_cell_when_count_matches() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut grid = Grid::new(3, 3).unwrap();
        let forbidden = BTreeSet::from([(1, 1)]);

        place_mines(&mut grid, 8, &forbidden, &mut rng).unwrap();

        assert_eq!(mine_positions(&grid).len(), 8);
        assert!(!grid.oracle().contains_mine((1, 1)));
    }

    #[test]
    fn rejects_more_mines_than_eligible_cells() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut grid = Grid::new(3, 3).unwrap();
        let forbidden = BTreeSet::from([(0, 0), (1, 1)]);

        let result = place_mines(&mut grid, 8, &forbidden, &mut rng);

        assert_eq!(
            result,
            Err(GameError::InsufficientSpace {
                requested: 8,
                available: 7
            })
        );
        assert!(!grid.mines_placed());
        assert!(mine_positions(&grid).is_empty());
    }

    #[test]
    fn second_placement_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut grid = Grid::new(4, 4).unwrap();

        place_mines(&mut grid, 3, &BTreeSet::new(), &mut rng).unwrap();
        let result = place_mines(&mut grid, 3, &BTreeSet::new(), &mut rng);

        assert_eq!(result, Err(GameError::MinesAlreadyPlaced));
        assert_eq!(mine_positions(&grid).len(), 3);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let layout = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut grid = Grid::new(10, 10).unwrap();
            place_mines(&mut grid, 15, &BTreeSet::new(), &mut rng).unwrap();
            mine_positions(&grid)
        };

        assert_eq!(layout(99), layout(99));
    }

    #[test]
    fn numbers_match_neighbor_mines() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut grid = Grid::new(8, 6).unwrap();
        place_mines(&mut grid, 14, &BTreeSet::new(), &mut rng).unwrap();

        compute_numbers(&mut grid);

        let oracle = grid.oracle();
        for pos in grid.iter_coords() {
            if oracle.contains_mine(pos) {
                continue;
            }
            let adjacent = grid
                .neighbors(pos)
                .filter(|&n| oracle.contains_mine(n))
                .count() as u8;
            match oracle.kind_at(pos) {
                CellKind::Empty => assert_eq!(adjacent, 0),
                CellKind::Numbered(n) => {
                    assert_eq!(n, adjacent);
                    assert!(n > 0);
                }
                CellKind::Mine => unreachable!(),
            }
        }
    }
}
