//! The player roster: loading, validation and lookup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{FIRST_DRAWABLE_INDEX, MIN_ROSTER_SIZE};
use crate::error::DataLoadError;

/// A player entry as generated by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedPlayer {
    pub name: &'static str,
    pub image: &'static str,
    pub followers: u64,
}

include!(concat!(env!("OUT_DIR"), "/roster_data.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Path or URL of the player's picture, passed through to the renderer untouched.
    pub image: String,
    pub followers: u64,
}

impl From<&EmbeddedPlayer> for Player {
    fn from(player: &EmbeddedPlayer) -> Self {
        Self {
            name: player.name.to_string(),
            image: player.image.to_string(),
            followers: player.followers,
        }
    }
}

/// Index of a player within its roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

/// An immutable, validated list of players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Wraps a list of players, rejecting rosters too small to fill a four-candidate round.
    pub fn new(players: Vec<Player>) -> Result<Self, DataLoadError> {
        if players.len() < MIN_ROSTER_SIZE {
            return Err(DataLoadError::TooSmall {
                found: players.len(),
                required: MIN_ROSTER_SIZE,
            });
        }
        Ok(Self { players })
    }

    pub fn from_json(json: &str) -> Result<Self, DataLoadError> {
        let players: Vec<Player> = serde_json::from_str(json)?;
        Self::new(players)
    }

    /// Reads and parses a roster file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading roster");
        let json = fs::read_to_string(path)?;
        let roster = Self::from_json(&json)?;
        info!(players = roster.len(), path = %path.display(), "Roster loaded");
        Ok(roster)
    }

    /// The roster compiled into the binary from `assets/players.json`.
    pub fn embedded() -> Result<Self, DataLoadError> {
        Self::new(EMBEDDED_ROSTER.iter().map(Player::from).collect())
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().enumerate().map(|(index, player)| (PlayerId(index), player))
    }

    /// Inclusive bounds of the indices rounds may draw from.
    pub fn drawable_range(&self) -> (usize, usize) {
        (FIRST_DRAWABLE_INDEX, self.players.len().saturating_sub(1))
    }
}
