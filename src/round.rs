use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::constants::MAX_CANDIDATES;
use crate::error::SelectionError;
use crate::roster::{PlayerId, Roster};
use crate::selector::generate_random_numbers;

/// Difficulty, expressed as the number of candidates shown per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, EnumIter, IntoStaticStr)]
pub enum Level {
    /// Two candidates.
    #[default]
    Pair,
    /// Four candidates.
    Quad,
}

impl Level {
    pub fn candidates(self) -> usize {
        match self {
            Level::Pair => 2,
            Level::Quad => 4,
        }
    }

    /// The level a round should be played at after reaching `score`.
    ///
    /// Levels never go down; only a full restart returns to [`Level::Pair`].
    pub fn promote(self, score: u32, threshold: u32, mode: GameMode) -> Level {
        let earned = match mode {
            GameMode::Progressive if score >= threshold => Level::Quad,
            _ => Level::Pair,
        };
        self.max(earned)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.candidates())
    }
}

/// Whether the game grows to four candidates or stays a two-card duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    #[default]
    Progressive,
    Classic,
}

/// Monotonic round number, used to tell a live round's timers from stale ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RoundId(pub u64);

impl RoundId {
    pub fn next(self) -> RoundId {
        RoundId(self.0 + 1)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A player presented in a round, with the follower count captured when the round was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub player: PlayerId,
    pub followers: u64,
}

/// One set of candidates awaiting a single choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: RoundId,
    pub level: Level,
    pub candidates: SmallVec<[Candidate; MAX_CANDIDATES]>,
}

impl Round {
    /// Draws `level.candidates()` distinct players from the drawable part of the roster.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, roster: &Roster, id: RoundId, level: Level) -> Result<Round, SelectionError> {
        let (min, max) = roster.drawable_range();
        let indices = generate_random_numbers(rng, min, max, level.candidates())?;
        Round::with_players(roster, id, level, &indices)
    }

    /// Builds a round from roster indices, copying each player's follower count.
    pub fn with_players(roster: &Roster, id: RoundId, level: Level, indices: &[usize]) -> Result<Round, SelectionError> {
        let candidates = indices
            .iter()
            .map(|&index| {
                let player = PlayerId(index);
                roster
                    .get(player)
                    .map(|p| Candidate {
                        player,
                        followers: p.followers,
                    })
                    .ok_or(SelectionError::OutsideRoster { index, len: roster.len() })
            })
            .collect::<Result<SmallVec<[Candidate; MAX_CANDIDATES]>, _>>()?;

        Ok(Round { id, level, candidates })
    }

    /// The highest follower count among the candidates.
    pub fn best_followers(&self) -> u64 {
        self.candidates.iter().map(|c| c.followers).max().unwrap_or(0)
    }

    /// Whether picking the candidate at `slot` is a correct answer.
    ///
    /// Every candidate sharing the highest count is correct, so ties never penalize.
    pub fn is_correct(&self, slot: usize) -> bool {
        self.candidates
            .get(slot)
            .is_some_and(|candidate| candidate.followers == self.best_followers())
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
