use alloc::vec::Vec;
use core::fmt;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    #[serde(rename = "Game Over: Loss")]
    Lost,
    #[serde(rename = "Victory")]
    Won,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Lost => "Game Over: Loss",
            Self::Won => "Victory",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One game: a grid, the rules it was created with, and whether it is over.
///
/// Mines are placed on the first reveal, anchored on that position according
/// to the configured [`SafeZone`].
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    status: GameStatus,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self {
            config,
            grid,
            status: GameStatus::Playing,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Configured mines minus placed flags; negative when over-flagged.
    pub fn remaining_mines(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.grid.flagged_count())
    }

    /// Reveals `coords`, placing mines first if this is the opening move.
    ///
    /// Finished games and off-board targets are left untouched.
    pub fn reveal<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R) -> Result<GameStatus> {
        if self.status.is_finished() || !self.grid.contains(coords) {
            return Ok(self.status);
        }

        self.ensure_mines(coords, rng)?;
        let outcome = self.grid.reveal(coords);
        self.update_status(outcome.is_detonated());
        Ok(self.status)
    }

    /// Toggles a flag; `Ok(false)` when the cell cannot be flagged.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        if self.status.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        Ok(self.grid.toggle_flag(coords))
    }

    /// Lets the solver play one move. On an untouched board its opening pick
    /// doubles as the first reveal, so the safe zone applies to it.
    pub fn ai_move<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) -> Result<AiMove> {
        if self.status.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        let played = if self.grid.mines_placed() {
            crate::solver::ai_move(&mut self.grid, difficulty, rng)
        } else {
            let candidates = self.grid.undetermined_cells();
            let Some(&start) = candidates.choose(rng) else {
                return Ok(AiMove::NoneAvailable);
            };
            self.ensure_mines(start, rng)?;
            AiMove::from_reveal(start, self.grid.reveal(start))
        };

        self.update_status(played.is_detonated());
        Ok(played)
    }

    /// Player view row by row. Mines show only once the game is over.
    pub fn board(&self) -> Vec<Vec<CellSymbol>> {
        self.grid.symbols(self.status.is_finished())
    }

    pub fn snapshot(&self, game_id: GameId) -> GameSnapshot {
        GameSnapshot {
            game_id,
            status: self.status,
            width: self.config.width,
            height: self.config.height,
            mines: self.config.mines,
            remaining_mines: self.remaining_mines(),
            board: self.board(),
        }
    }

    fn ensure_mines<R: Rng + ?Sized>(&mut self, start: Coord2, rng: &mut R) -> Result<()> {
        if self.grid.mines_placed() {
            return Ok(());
        }

        populate_for_first_reveal(
            &mut self.grid,
            start,
            self.config.mines,
            self.config.safe_zone,
            rng,
        )?;
        log::debug!("First reveal at {:?}, mines placed", start);
        Ok(())
    }

    fn update_status(&mut self, detonated: bool) {
        if detonated {
            self.status = GameStatus::Lost;
        } else if self.grid.is_win() {
            self.status = GameStatus::Won;
        }

        if self.status.is_finished() {
            log::debug!("Game finished: {}", self.status);
        }
    }
}
