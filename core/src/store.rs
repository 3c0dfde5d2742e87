use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use rand::Rng;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque game identifier, shown as 32 lowercase hex digits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameId(u128);

impl GameId {
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl FromStr for GameId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GameError::UnknownGame);
        }
        u128::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| GameError::UnknownGame)
    }
}

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Owns every live game, keyed by [`GameId`].
///
/// The store's random source mints identifiers and drives mine placement and
/// solver fallbacks for the games it holds.
#[derive(Debug)]
pub struct GameStore<R> {
    games: BTreeMap<GameId, Game>,
    rng: R,
}

impl<R: Rng> GameStore<R> {
    pub fn new(rng: R) -> Self {
        Self {
            games: BTreeMap::new(),
            rng,
        }
    }

    pub fn create(&mut self, config: GameConfig) -> Result<GameId> {
        let game = Game::new(config)?;

        let mut id = GameId::random(&mut self.rng);
        while self.games.contains_key(&id) {
            id = GameId::random(&mut self.rng);
        }

        self.games.insert(id, game);
        log::debug!(
            "Created game {} ({}x{}, {} mines)",
            id,
            config.width,
            config.height,
            config.mines
        );
        Ok(id)
    }

    pub fn get(&self, id: &GameId) -> Result<&Game> {
        self.games.get(id).ok_or(GameError::UnknownGame)
    }

    pub fn get_mut(&mut self, id: &GameId) -> Result<&mut Game> {
        self.games.get_mut(id).ok_or(GameError::UnknownGame)
    }

    pub fn delete(&mut self, id: &GameId) -> Result<Game> {
        let game = self.games.remove(id).ok_or(GameError::UnknownGame)?;
        log::debug!("Deleted game {}", id);
        Ok(game)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = GameId> + '_ {
        self.games.keys().copied()
    }

    pub fn reveal(&mut self, id: &GameId, coords: Coord2) -> Result<GameSnapshot> {
        let game = self.games.get_mut(id).ok_or(GameError::UnknownGame)?;
        game.reveal(coords, &mut self.rng)?;
        Ok(game.snapshot(*id))
    }

    pub fn toggle_flag(&mut self, id: &GameId, coords: Coord2) -> Result<bool> {
        self.get_mut(id)?.toggle_flag(coords)
    }

    pub fn ai_move(&mut self, id: &GameId, difficulty: Difficulty) -> Result<AiMove> {
        let game = self.games.get_mut(id).ok_or(GameError::UnknownGame)?;
        game.ai_move(difficulty, &mut self.rng)
    }

    pub fn snapshot(&self, id: &GameId) -> Result<GameSnapshot> {
        Ok(self.get(id)?.snapshot(*id))
    }
}
