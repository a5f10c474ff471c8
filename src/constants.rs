//! This module contains all the constants used in the game.

use std::time::Duration;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Pause between a choice and the result being shown.
pub const REVEAL_DELAY: Duration = Duration::from_secs(3);
/// Pause between a choice and the next round (or the game-over modal).
pub const ADVANCE_DELAY: Duration = Duration::from_secs(4);
/// Time allotted to answer a single round.
pub const ROUND_TIME_LIMIT: Duration = Duration::from_secs(20);

/// Score at which the game switches from two to four candidates.
pub const LEVEL_UP_SCORE: u32 = 2;

/// Index 0 of the roster is never drawn.
pub const FIRST_DRAWABLE_INDEX: usize = 1;
/// The largest number of candidates a round can hold.
pub const MAX_CANDIDATES: usize = 4;
/// Smallest roster that can always fill a round of the highest level.
pub const MIN_ROSTER_SIZE: usize = FIRST_DRAWABLE_INDEX + MAX_CANDIDATES;

/// Prefix for environment variables read by the config loader.
pub const ENV_PREFIX: &str = "FOLLOWERS_";
