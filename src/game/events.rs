use crate::round::{Round, RoundId};

/// Input coming from the player, before it is tied to a specific round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Pick the candidate shown at this slot (zero-based).
    Choose(usize),
    Restart,
    TogglePause,
    Exit,
}

impl GameCommand {
    /// Parses a line typed at the terminal. Slots are entered one-based.
    pub fn parse(input: &str) -> Option<GameCommand> {
        match input.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Some(GameCommand::Exit),
            "r" | "restart" => Some(GameCommand::Restart),
            "p" | "pause" => Some(GameCommand::TogglePause),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|&slot| slot >= 1)
                .map(|slot| GameCommand::Choose(slot - 1)),
        }
    }
}

/// Everything the state machine reacts to.
///
/// Timer-driven events carry the [`RoundId`] they were scheduled for, so that a
/// timer outliving its round is recognized and ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    LoadStarted,
    Loaded,
    LoadFailed,
    RoundDrawn(Round),
    Choose { round: RoundId, slot: usize },
    CountdownExpired { round: RoundId },
    RevealElapsed { round: RoundId },
    AdvanceElapsed { round: RoundId },
    Restart,
}

impl GameEvent {
    /// The round this event is bound to, if any.
    pub fn round(&self) -> Option<RoundId> {
        match self {
            GameEvent::Choose { round, .. }
            | GameEvent::CountdownExpired { round }
            | GameEvent::RevealElapsed { round }
            | GameEvent::AdvanceElapsed { round } => Some(*round),
            GameEvent::RoundDrawn(round) => Some(round.id),
            _ => None,
        }
    }
}
