//! This module contains the game driver: it owns the roster, randomness and timers,
//! and feeds events through the state machine one at a time.

pub mod events;
pub mod state;
pub mod timer;

use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{DataLoadError, GameError, GameResult};
use crate::formatter;
use crate::game::events::{GameCommand, GameEvent};
use crate::game::state::{Effect, GameStage, GameState, Rules};
use crate::game::timer::{Countdown, Scheduler};
use crate::roster::Roster;
use crate::round::{Round, RoundId};
use crate::view::View;

/// Runs a single game session.
///
/// Events are processed from a single queue in arrival order; an event produced while
/// handling another (a freshly drawn round, say) is queued behind it rather than
/// handled re-entrantly. Timers only advance through [`Game::tick`].
pub struct Game {
    state: GameState,
    roster: Option<Roster>,
    rng: SmallRng,
    countdown: Countdown,
    scheduler: Scheduler,
    last_round: RoundId,
    queue: VecDeque<GameEvent>,
}

impl Game {
    /// Creates a game in the idle stage, seeding the RNG from the config when a seed is set.
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &Config, rng: SmallRng) -> Self {
        Self {
            state: GameState::new(Rules::from(config)),
            roster: None,
            rng,
            countdown: Countdown::new(config.round_time_limit),
            scheduler: Scheduler::new(),
            last_round: RoundId::default(),
            queue: VecDeque::new(),
        }
    }

    /// Moves the game into the loading stage.
    pub fn begin_loading(&mut self) -> GameResult<()> {
        self.dispatch(GameEvent::LoadStarted)
    }

    /// Hands the outcome of the roster load to the game.
    ///
    /// A failed load is logged and leaves the game loading indefinitely; there is no retry.
    pub fn finish_loading(&mut self, result: Result<Roster, DataLoadError>) -> GameResult<()> {
        match result {
            Ok(roster) => {
                info!(players = roster.len(), "Roster ready");
                self.roster = Some(roster);
                self.dispatch(GameEvent::Loaded)
            }
            Err(e) => {
                error!("Failed to load roster: {e}");
                self.dispatch(GameEvent::LoadFailed)
            }
        }
    }

    /// Applies a player command to the round currently on screen.
    pub fn command(&mut self, command: GameCommand) -> GameResult<()> {
        match command {
            GameCommand::Choose(slot) => match self.state.stage.round() {
                Some(round) => {
                    let round = round.id;
                    self.dispatch(GameEvent::Choose { round, slot })
                }
                None => {
                    debug!(slot, "No round on screen, ignoring choice");
                    Ok(())
                }
            },
            GameCommand::Restart => self.dispatch(GameEvent::Restart),
            // Pausing and exiting belong to the app loop
            GameCommand::TogglePause | GameCommand::Exit => Ok(()),
        }
    }

    /// Advances the countdown and the delay scheduler by `dt`, handling whatever fires.
    pub fn tick(&mut self, dt: Duration) -> GameResult<()> {
        let mut fired = Vec::new();
        if let Some(expired) = self.countdown.tick(dt) {
            fired.push(expired);
        }
        fired.extend(self.scheduler.advance(dt));

        for event in fired {
            self.dispatch(event)?;
        }
        Ok(())
    }

    /// Queues an event and drains the queue, performing every effect along the way.
    pub fn dispatch(&mut self, event: GameEvent) -> GameResult<()> {
        self.queue.push_back(event);
        while let Some(event) = self.queue.pop_front() {
            for effect in self.state.update(event) {
                if let Err(e) = self.perform(effect) {
                    self.queue.clear();
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn perform(&mut self, effect: Effect) -> GameResult<()> {
        match effect {
            Effect::DrawRound(level) => {
                let roster = self
                    .roster
                    .as_ref()
                    .ok_or_else(|| GameError::InvalidState("cannot draw a round without a roster".to_string()))?;
                let id = self.last_round.next();
                let round = Round::draw(&mut self.rng, roster, id, level)?;
                debug!(round = %id, %level, "Drew round");
                self.last_round = id;
                self.queue.push_back(GameEvent::RoundDrawn(round));
            }
            Effect::BeginRound(id) => {
                self.scheduler.retain_round(id);
                self.countdown.start(id);
                formatter::set_current_round(id.0);
            }
            Effect::AbandonCountdown => self.countdown.abandon(),
            Effect::Schedule { after, event } => self.scheduler.schedule(after, event),
        }
        Ok(())
    }

    /// Fraction of the reveal delay elapsed since the answer, from 0.0 to 1.0.
    pub fn reveal_progress(&self) -> f64 {
        match &self.state.stage {
            GameStage::Answering(answer) => {
                let id = answer.round.id;
                let total = self.state.rules.reveal_delay.as_secs_f64();
                let remaining = self
                    .scheduler
                    .time_until(|e| *e == GameEvent::RevealElapsed { round: id })
                    .unwrap_or_default();
                if total <= 0.0 {
                    1.0
                } else {
                    (1.0 - remaining.as_secs_f64() / total).clamp(0.0, 1.0)
                }
            }
            GameStage::Revealing(_) | GameStage::GameOver(_) => 1.0,
            _ => 0.0,
        }
    }

    pub fn view(&self) -> View {
        View::capture(self)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
