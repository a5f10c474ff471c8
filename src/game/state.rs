use std::time::Duration;

use smallvec::{smallvec, SmallVec};
use strum_macros::{Display, EnumDiscriminants, IntoStaticStr};
use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::constants::{ADVANCE_DELAY, LEVEL_UP_SCORE, REVEAL_DELAY};
use crate::game::events::GameEvent;
use crate::round::{GameMode, Level, Round, RoundId};

/// A choice (or a timeout) made against a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub round: Round,
    /// The chosen slot, or `None` when the countdown ran out.
    pub choice: Option<usize>,
    pub correct: bool,
}

/// The high-level stage of the game.
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(StageKind), derive(Hash, Display, IntoStaticStr))]
pub enum GameStage {
    /// Nothing has happened yet.
    Idle,
    /// Waiting for the roster, and then for the first round. A failed load stays here.
    Loading,
    /// A round is shown and the countdown is running.
    Ready(Round),
    /// The answer is locked in; follower counts are counting up.
    Answering(Answer),
    /// The result is visible and the score has been updated.
    Revealing(Answer),
    /// The previous round was won; waiting for the next one to be drawn.
    RoundWon { previous: RoundId },
    /// A restart was requested from the game-over modal; waiting for a fresh round.
    Restarting,
    /// The round was lost and the game-over modal is open.
    GameOver(Answer),
}

impl GameStage {
    pub fn kind(&self) -> StageKind {
        StageKind::from(self)
    }

    /// The round currently on screen, if any.
    pub fn round(&self) -> Option<&Round> {
        match self {
            GameStage::Ready(round) => Some(round),
            GameStage::Answering(answer) | GameStage::Revealing(answer) | GameStage::GameOver(answer) => Some(&answer.round),
            _ => None,
        }
    }

    pub fn answer(&self) -> Option<&Answer> {
        match self {
            GameStage::Answering(answer) | GameStage::Revealing(answer) | GameStage::GameOver(answer) => Some(answer),
            _ => None,
        }
    }

    fn awaits_round(&self) -> bool {
        matches!(self, GameStage::Loading | GameStage::RoundWon { .. } | GameStage::Restarting)
    }
}

/// Timing and progression parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub reveal_delay: Duration,
    pub advance_delay: Duration,
    pub level_up_score: u32,
    pub mode: GameMode,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            reveal_delay: REVEAL_DELAY,
            advance_delay: ADVANCE_DELAY,
            level_up_score: LEVEL_UP_SCORE,
            mode: GameMode::default(),
        }
    }
}

impl From<&Config> for Rules {
    fn from(config: &Config) -> Self {
        Self {
            reveal_delay: config.reveal_delay,
            advance_delay: config.advance_delay,
            level_up_score: config.level_up_score,
            mode: config.mode,
        }
    }
}

/// Side effects requested by a transition, carried out by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Draw a new round at this level and feed it back as [`GameEvent::RoundDrawn`].
    DrawRound(Level),
    /// Arm the countdown for this round and drop timers of every other round.
    BeginRound(RoundId),
    /// Disarm the countdown without firing it.
    AbandonCountdown,
    /// Deliver `event` once `after` has elapsed.
    Schedule { after: Duration, event: GameEvent },
}

pub type Effects = SmallVec<[Effect; 3]>;

/// The whole mutable state of a game, advanced only through [`GameState::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub stage: GameStage,
    pub score: u32,
    pub level: Level,
    pub rules: Rules,
}

impl GameState {
    pub fn new(rules: Rules) -> Self {
        Self {
            stage: GameStage::Idle,
            score: 0,
            level: Level::Pair,
            rules,
        }
    }

    /// Applies one event and returns the effects the driver must perform.
    ///
    /// Events that do not fit the current stage, or that belong to a round other
    /// than the one on screen, leave the state untouched.
    pub fn update(&mut self, event: GameEvent) -> Effects {
        let stage = std::mem::replace(&mut self.stage, GameStage::Idle);
        let from = stage.kind();
        let (next, effects) = self.transition(stage, event);
        if next.kind() != from {
            debug!(%from, to = %next.kind(), score = self.score, "Stage transition");
        }
        self.stage = next;
        effects
    }

    fn transition(&mut self, stage: GameStage, event: GameEvent) -> (GameStage, Effects) {
        match (stage, event) {
            (GameStage::Idle, GameEvent::LoadStarted) => (GameStage::Loading, smallvec![]),
            (GameStage::Loading, GameEvent::Loaded) => (GameStage::Loading, smallvec![Effect::DrawRound(self.level)]),
            (GameStage::Loading, GameEvent::LoadFailed) => {
                warn!("Roster unavailable, staying in the loading stage");
                (GameStage::Loading, smallvec![])
            }
            (stage, GameEvent::RoundDrawn(round)) if stage.awaits_round() => {
                let id = round.id;
                (GameStage::Ready(round), smallvec![Effect::BeginRound(id)])
            }
            (GameStage::Ready(round), GameEvent::Choose { round: id, slot }) if id == round.id && slot < round.len() => {
                self.answer(round, Some(slot))
            }
            (GameStage::Ready(round), GameEvent::CountdownExpired { round: id }) if id == round.id => {
                info!(round = %id, "Time ran out");
                self.answer(round, None)
            }
            (GameStage::Answering(answer), GameEvent::RevealElapsed { round: id }) if id == answer.round.id => {
                if answer.correct {
                    self.score += 1;
                }
                (GameStage::Revealing(answer), smallvec![])
            }
            (GameStage::Revealing(answer), GameEvent::AdvanceElapsed { round: id }) if id == answer.round.id => {
                if answer.correct {
                    let level = self.level.promote(self.score, self.rules.level_up_score, self.rules.mode);
                    if level != self.level {
                        info!(%level, score = self.score, "Level up");
                    }
                    self.level = level;
                    (GameStage::RoundWon { previous: id }, smallvec![Effect::DrawRound(level)])
                } else {
                    info!(score = self.score, "Game over");
                    (GameStage::GameOver(answer), smallvec![])
                }
            }
            (GameStage::GameOver(_), GameEvent::Restart) => {
                self.score = 0;
                self.level = Level::Pair;
                (GameStage::Restarting, smallvec![Effect::DrawRound(Level::Pair)])
            }
            (stage, event) => {
                trace!(stage = %stage.kind(), ?event, "Ignoring event");
                (stage, smallvec![])
            }
        }
    }

    /// Locks in a choice and schedules both the reveal and the advance from this same instant.
    fn answer(&mut self, round: Round, choice: Option<usize>) -> (GameStage, Effects) {
        let correct = choice.is_some_and(|slot| round.is_correct(slot));
        let id = round.id;
        info!(round = %id, ?choice, correct, "Answer locked in");

        let effects = smallvec![
            Effect::AbandonCountdown,
            Effect::Schedule {
                after: self.rules.reveal_delay,
                event: GameEvent::RevealElapsed { round: id },
            },
            Effect::Schedule {
                after: self.rules.advance_delay,
                event: GameEvent::AdvanceElapsed { round: id },
            },
        ];
        (GameStage::Answering(Answer { round, choice, correct }), effects)
    }

    pub fn is_clicked(&self) -> bool {
        matches!(self.stage, GameStage::Answering(_) | GameStage::Revealing(_))
    }

    pub fn has_result(&self) -> bool {
        matches!(self.stage, GameStage::Revealing(_))
    }

    /// Correctness of the answer, visible only once the result is revealed.
    pub fn is_right(&self) -> Option<bool> {
        match &self.stage {
            GameStage::Revealing(answer) => Some(answer.correct),
            _ => None,
        }
    }

    pub fn is_modal_open(&self) -> bool {
        matches!(self.stage, GameStage::GameOver(_))
    }
}
