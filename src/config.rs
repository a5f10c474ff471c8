use std::path::PathBuf;
use std::time::Duration;

use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::constants::{ADVANCE_DELAY, ENV_PREFIX, LEVEL_UP_SCORE, REVEAL_DELAY, ROUND_TIME_LIMIT};
use crate::error::ConfigError;
use crate::round::GameMode;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Roster file to load - if None, the roster embedded at build time is used
    pub players_path: Option<PathBuf>,
    pub reveal_delay: Duration,
    pub advance_delay: Duration,
    pub round_time_limit: Duration,
    /// Score at which rounds grow to four candidates
    pub level_up_score: u32,
    pub mode: GameMode,
    /// Fixed RNG seed for reproducible rounds
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players_path: None,
            reveal_delay: REVEAL_DELAY,
            advance_delay: ADVANCE_DELAY,
            round_time_limit: ROUND_TIME_LIMIT,
            level_up_score: LEVEL_UP_SCORE,
            mode: GameMode::default(),
            seed: None,
        }
    }
}

/// Raw configuration loaded directly from the environment and command line.
/// This is an intermediate representation that gets validated and converted to Config
#[derive(Debug, Deserialize)]
struct RawConfig {
    players_path: Option<PathBuf>,
    #[serde(default = "default_reveal_delay_ms")]
    reveal_delay_ms: u64,
    #[serde(default = "default_advance_delay_ms")]
    advance_delay_ms: u64,
    #[serde(default = "default_round_time_limit_ms")]
    round_time_limit_ms: u64,
    #[serde(default = "default_level_up_score")]
    level_up_score: u32,
    #[serde(default)]
    mode: GameMode,
    seed: Option<u64>,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let reveal_delay = Duration::from_millis(raw.reveal_delay_ms);
        let advance_delay = Duration::from_millis(raw.advance_delay_ms);

        // The result must be visible before the round moves on
        if advance_delay <= reveal_delay {
            return Err(ConfigError::InvalidDelays {
                reveal: reveal_delay,
                advance: advance_delay,
            });
        }
        if raw.round_time_limit_ms == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if raw.level_up_score == 0 {
            return Err(ConfigError::ZeroThreshold);
        }

        Ok(Config {
            players_path: raw.players_path,
            reveal_delay,
            advance_delay,
            round_time_limit: Duration::from_millis(raw.round_time_limit_ms),
            level_up_score: raw.level_up_score,
            mode: raw.mode,
            seed: raw.seed,
        })
    }
}

fn default_reveal_delay_ms() -> u64 {
    REVEAL_DELAY.as_millis() as u64
}

fn default_advance_delay_ms() -> u64 {
    ADVANCE_DELAY.as_millis() as u64
}

fn default_round_time_limit_ms() -> u64 {
    ROUND_TIME_LIMIT.as_millis() as u64
}

fn default_level_up_score() -> u32 {
    LEVEL_UP_SCORE
}

/// Environment variables (`FOLLOWERS_*`), overridden by `--players <path>` and `--seed <n>`.
///
/// The first argument is the program name. Flags also accept the `--flag=value` form;
/// anything else on the command line is rejected.
pub fn figment_with_args(args: impl IntoIterator<Item = String>) -> Result<Figment, ConfigError> {
    let mut figment = Figment::new().merge(Env::prefixed(ENV_PREFIX));

    let mut args = args.into_iter();
    args.next();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        let key = match flag.as_str() {
            "--players" | "-p" => "players_path",
            "--seed" | "-s" => "seed",
            _ => return Err(ConfigError::UnknownArgument(flag)),
        };

        // A following flag is never taken as this one's value
        let value = match inline {
            Some(value) => Some(value),
            None => args.next().filter(|value| !value.starts_with("--")),
        }
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;

        figment = if key == "seed" {
            let seed: u64 = value.parse().map_err(|_| ConfigError::InvalidArgument { arg: flag, value })?;
            figment.merge((key, seed))
        } else {
            figment.merge((key, value))
        };
    }

    Ok(figment)
}

pub fn load_config_from(figment: Figment) -> Result<Config, ConfigError> {
    let raw: RawConfig = figment.extract()?;
    Config::try_from(raw)
}
