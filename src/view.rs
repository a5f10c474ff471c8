//! Read-only snapshots of the game for whatever draws it.

use std::io;
use std::time::Duration;

use crate::game::state::StageKind;
use crate::game::Game;
use crate::round::Level;

/// A candidate as the renderer should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateView {
    pub name: String,
    pub image: String,
    /// Hidden until an answer is locked in, then counts up to the real value.
    pub followers: Option<u64>,
    pub chosen: bool,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub stage: StageKind,
    pub candidates: Vec<CandidateView>,
    pub is_clicked: bool,
    pub is_right: Option<bool>,
    pub has_result: bool,
    pub score: u32,
    pub level: Level,
    pub is_modal_open: bool,
    /// Time left on the countdown while a round awaits an answer.
    pub time_left: Option<Duration>,
}

impl View {
    pub fn capture(game: &Game) -> View {
        let state = game.state();
        let progress = game.reveal_progress();
        let answer = state.stage.answer();

        let candidates = match (state.stage.round(), game.roster()) {
            (Some(round), Some(roster)) => round
                .candidates
                .iter()
                .enumerate()
                .filter_map(|(slot, candidate)| {
                    let player = roster.get(candidate.player)?;
                    Some(CandidateView {
                        name: player.name.clone(),
                        image: player.image.clone(),
                        followers: state.is_clicked().then(|| count_up(candidate.followers, progress)),
                        chosen: answer.is_some_and(|a| a.choice == Some(slot)),
                    })
                })
                .collect(),
            _ => Vec::new(),
        };

        View {
            stage: state.stage.kind(),
            candidates,
            is_clicked: state.is_clicked(),
            is_right: state.is_right(),
            has_result: state.has_result(),
            score: state.score,
            level: state.level,
            is_modal_open: state.is_modal_open(),
            time_left: game.countdown().remaining(),
        }
    }
}

/// Linear count-up from zero, reaching `target` exactly at full progress.
pub fn count_up(target: u64, progress: f64) -> u64 {
    if progress >= 1.0 {
        return target;
    }
    (target as f64 * progress.max(0.0)).round() as u64
}

/// The rendering collaborator.
pub trait Renderer {
    fn render(&mut self, view: &View) -> io::Result<()>;
}
