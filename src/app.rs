use std::collections::VecDeque;
use std::fmt::Write as _;
use std::io::{self, BufRead, Stdout, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use thousands::Separable;
use tracing::{debug, error, event, info, warn};

use crate::config::Config;
use crate::constants::LOOP_TIME;
use crate::game::events::GameCommand;
use crate::game::state::StageKind;
use crate::game::Game;
use crate::roster::Roster;
use crate::view::{Renderer, View};

/// Seconds left at which the terminal starts nagging about the countdown.
const HURRY_THRESHOLD_SECS: u64 = 5;

/// Renders the game as plain text frames, printing only when the frame changes.
pub struct TerminalRenderer<W: Write> {
    out: W,
    last_frame: Option<String>,
    last_hurry: Option<u64>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_frame: None,
            last_hurry: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &View) -> io::Result<()> {
        let frame = frame(view);
        if self.last_frame.as_deref() != Some(frame.as_str()) {
            if !frame.is_empty() {
                writeln!(self.out, "{frame}")?;
            }
            self.last_frame = Some(frame);
            self.last_hurry = None;
        }

        if let Some(left) = view.time_left {
            let secs = left.as_secs_f64().ceil() as u64;
            if secs <= HURRY_THRESHOLD_SECS && self.last_hurry != Some(secs) {
                writeln!(self.out, "  {secs}s left!")?;
                self.last_hurry = Some(secs);
            }
        }

        self.out.flush()
    }
}

/// Builds the text for one frame. Follower counts are printed once the result is in.
pub fn frame(view: &View) -> String {
    let mut text = String::new();
    match view.stage {
        StageKind::Idle => {}
        StageKind::Loading => text.push_str("Loading..."),
        StageKind::RoundWon | StageKind::Restarting => text.push_str("Next round..."),
        StageKind::GameOver => {
            let _ = write!(text, "Game over! Score: {}\nType r to play again, q to quit.", view.score);
        }
        StageKind::Ready | StageKind::Answering | StageKind::Revealing => {
            let _ = writeln!(text, "Who has more followers? ({}, score {})", view.level, view.score);
            for (slot, candidate) in view.candidates.iter().enumerate() {
                let marker = if candidate.chosen { '>' } else { ' ' };
                let _ = write!(text, "{marker} {}) {}", slot + 1, candidate.name);
                if view.has_result {
                    if let Some(followers) = candidate.followers {
                        let _ = write!(text, ": {}", followers.separate_with_commas());
                    }
                }
                text.push('\n');
            }
            match (view.stage, view.is_right) {
                (StageKind::Ready, _) => text.push_str(&format!("Pick 1-{}", view.candidates.len())),
                (StageKind::Answering, _) => text.push_str("Counting followers..."),
                (_, Some(true)) => text.push_str("Correct!"),
                (_, _) => text.push_str("Wrong!"),
            }
        }
    }
    text
}

/// Reads commands from stdin on a helper thread. Sends [`GameCommand::Exit`] once stdin closes.
fn spawn_input_reader() -> Receiver<GameCommand> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match GameCommand::parse(&line) {
                Some(command) => {
                    if tx.send(command).is_err() {
                        return;
                    }
                }
                None => warn!(input = line.trim(), "Unrecognized input"),
            }
        }
        let _ = tx.send(GameCommand::Exit);
    });
    rx
}

/// Holds game commands typed while paused and releases them, in order, on unpause.
#[derive(Debug, Default)]
pub struct PauseGate {
    paused: bool,
    held: VecDeque<GameCommand>,
}

impl PauseGate {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the commands the game should apply now.
    pub fn route(&mut self, command: GameCommand) -> Vec<GameCommand> {
        match command {
            GameCommand::TogglePause => {
                self.paused = !self.paused;
                info!("{}", if self.paused { "Paused" } else { "Unpaused" });
                if self.paused {
                    Vec::new()
                } else {
                    self.held.drain(..).collect()
                }
            }
            command if self.paused => {
                debug!(?command, held = self.held.len() + 1, "Holding command until unpaused");
                self.held.push_back(command);
                Vec::new()
            }
            command => vec![command],
        }
    }
}

pub struct App {
    game: Game,
    renderer: TerminalRenderer<Stdout>,
    commands: Receiver<GameCommand>,
    gate: PauseGate,
    last_tick: Instant,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let mut game = Game::new(&config);
        let mut renderer = TerminalRenderer::new(io::stdout());

        game.begin_loading()?;
        renderer.render(&game.view())?;

        let roster = match &config.players_path {
            Some(path) => Roster::load(path),
            None => Roster::embedded(),
        };
        game.finish_loading(roster)?;
        renderer.render(&game.view())?;

        Ok(Self {
            game,
            renderer,
            commands: spawn_input_reader(),
            gate: PauseGate::default(),
            last_tick: Instant::now(),
        })
    }

    /// Runs one iteration of the loop. Returns `false` once the player asked to quit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        loop {
            match self.commands.try_recv() {
                Ok(GameCommand::Exit) | Err(TryRecvError::Disconnected) => {
                    info!("Exit requested. Exiting...");
                    return false;
                }
                Ok(command) => {
                    for command in self.gate.route(command) {
                        if let Err(e) = self.game.command(command) {
                            error!("Failed to apply {command:?}: {e}");
                        }
                    }
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        let dt = self.last_tick.elapsed();
        self.last_tick = Instant::now();

        if !self.gate.is_paused() {
            if let Err(e) = self.game.tick(dt) {
                error!("Failed to advance game: {e}");
            }
            if let Err(e) = self.renderer.render(&self.game.view()) {
                error!("Failed to render frame: {e}");
            }
        }

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        } else {
            event!(
                tracing::Level::WARN,
                "Game loop behind schedule by: {:?}",
                start.elapsed() - LOOP_TIME
            );
        }

        true
    }
}
