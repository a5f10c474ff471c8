use std::time::Duration;

use follower_duel::config::Config;
use follower_duel::error::{DataLoadError, GameError};
use follower_duel::game::events::{GameCommand, GameEvent};
use follower_duel::game::state::StageKind;
use follower_duel::game::Game;
use follower_duel::round::{GameMode, Level, RoundId};
use pretty_assertions::assert_eq;
use rand::{rngs::SmallRng, SeedableRng};
use speculoos::prelude::*;

mod common;
use common::{correct_slot, current_round, loaded_game, loaded_game_with, wrong_slot};

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

fn stage(game: &Game) -> StageKind {
    game.state().stage.kind()
}

fn win_round(game: &mut Game) {
    let slot = correct_slot(game);
    game.command(GameCommand::Choose(slot)).unwrap();
    game.tick(secs(4)).unwrap();
}

#[test]
fn test_loading_leads_to_first_round() {
    let mut game = Game::with_rng(&Config::default(), SmallRng::seed_from_u64(1));
    assert_eq!(stage(&game), StageKind::Idle);

    game.begin_loading().unwrap();
    assert_eq!(stage(&game), StageKind::Loading);
    assert_eq!(game.view().stage, StageKind::Loading);

    game.finish_loading(Ok(common::sample_roster())).unwrap();
    assert_eq!(stage(&game), StageKind::Ready);

    let round = current_round(&game);
    assert_eq!(round.id, RoundId(1));
    assert_eq!(round.level, Level::Pair);
    assert_eq!(game.countdown().remaining(), Some(secs(20)));
}

#[test]
fn test_failed_load_keeps_loading_forever() {
    let mut game = Game::with_rng(&Config::default(), SmallRng::seed_from_u64(1));
    game.begin_loading().unwrap();
    let error = DataLoadError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "players.json"));
    game.finish_loading(Err(error)).unwrap();

    game.tick(secs(600)).unwrap();
    game.command(GameCommand::Choose(0)).unwrap();
    game.command(GameCommand::Restart).unwrap();

    assert_eq!(stage(&game), StageKind::Loading);
    assert!(game.roster().is_none());
    assert!(game.view().candidates.is_empty());
}

#[test]
fn test_drawing_without_roster_is_invalid_state() {
    let mut game = Game::with_rng(&Config::default(), SmallRng::seed_from_u64(1));
    game.dispatch(GameEvent::LoadStarted).unwrap();
    let result = game.dispatch(GameEvent::Loaded);
    assert!(matches!(result, Err(GameError::InvalidState(_))));
}

#[test]
fn test_correct_pick_scores_after_reveal_delay() {
    let mut game = loaded_game(42);
    let slot = correct_slot(&game);

    game.command(GameCommand::Choose(slot)).unwrap();
    assert_eq!(stage(&game), StageKind::Answering);
    assert_eq!(game.countdown().remaining(), None);

    game.tick(secs(2)).unwrap();
    assert_eq!(game.state().score, 0);
    assert_eq!(game.view().is_right, None);

    game.tick(secs(1)).unwrap();
    assert_eq!(stage(&game), StageKind::Revealing);
    assert_eq!(game.state().score, 1);
    assert_eq!(game.view().is_right, Some(true));

    game.tick(secs(1)).unwrap();
    assert_eq!(stage(&game), StageKind::Ready);
    assert_eq!(current_round(&game).id, RoundId(2));
    assert_eq!(game.countdown().remaining(), Some(secs(20)));
}

#[test]
fn test_wrong_pick_opens_modal_and_keeps_score() {
    let mut game = loaded_game(42);
    win_round(&mut game);
    assert_eq!(game.state().score, 1);

    let slot = wrong_slot(&game);
    game.command(GameCommand::Choose(slot)).unwrap();
    game.tick(secs(4)).unwrap();

    let view = game.view();
    assert_eq!(view.stage, StageKind::GameOver);
    assert!(view.is_modal_open);
    assert_eq!(view.score, 1);
    assert_eq!(game.countdown().remaining(), None);
}

#[test]
fn test_restart_resets_score_and_level() {
    let mut game = loaded_game(9);
    win_round(&mut game);
    win_round(&mut game);
    assert_eq!(game.state().level, Level::Quad);

    let slot = wrong_slot(&game);
    game.command(GameCommand::Choose(slot)).unwrap();
    game.tick(secs(4)).unwrap();
    assert_eq!(stage(&game), StageKind::GameOver);

    game.command(GameCommand::Restart).unwrap();
    assert_eq!(stage(&game), StageKind::Ready);
    assert_eq!(game.state().score, 0);
    assert_eq!(game.state().level, Level::Pair);
    assert_that(&current_round(&game).len()).is_equal_to(2);
}

#[test]
fn test_rounds_grow_to_four_after_two_wins() {
    let mut game = loaded_game(123);

    win_round(&mut game);
    assert_that(&current_round(&game).len()).is_equal_to(2);

    win_round(&mut game);
    assert_eq!(game.state().score, 2);
    assert_that(&current_round(&game).len()).is_equal_to(4);
    assert_eq!(game.view().candidates.len(), 4);
}

#[test]
fn test_classic_mode_keeps_two_candidates() {
    let config = Config {
        mode: GameMode::Classic,
        ..Config::default()
    };
    let mut game = loaded_game_with(&config, 5);
    for _ in 0..4 {
        win_round(&mut game);
    }
    assert_eq!(game.state().score, 4);
    assert_that(&current_round(&game).len()).is_equal_to(2);
}

#[test]
fn test_countdown_expiry_loses_round() {
    let mut game = loaded_game(7);

    game.tick(secs(19)).unwrap();
    assert_eq!(stage(&game), StageKind::Ready);

    game.tick(secs(1)).unwrap();
    assert_eq!(stage(&game), StageKind::Answering);
    assert_eq!(game.state().stage.answer().and_then(|a| a.choice), None);

    // Too late: the round has already been resolved by the timeout
    let slot = correct_slot(&game);
    game.command(GameCommand::Choose(slot)).unwrap();

    game.tick(secs(4)).unwrap();
    assert_eq!(stage(&game), StageKind::GameOver);
    assert_eq!(game.state().score, 0);
}

#[test]
fn test_answer_before_expiry_disarms_countdown() {
    let mut game = loaded_game(7);
    game.tick(secs(18)).unwrap();

    let slot = correct_slot(&game);
    game.command(GameCommand::Choose(slot)).unwrap();
    game.tick(secs(3)).unwrap();

    assert_eq!(stage(&game), StageKind::Revealing);
    assert_eq!(game.state().score, 1);
}

#[test]
fn test_stale_timers_do_not_touch_new_round() {
    let mut game = loaded_game(31);
    win_round(&mut game);
    let before = game.state().clone();

    game.dispatch(GameEvent::CountdownExpired { round: RoundId(1) }).unwrap();
    game.dispatch(GameEvent::RevealElapsed { round: RoundId(1) }).unwrap();
    game.dispatch(GameEvent::AdvanceElapsed { round: RoundId(1) }).unwrap();

    assert_eq!(game.state(), &before);
    assert!(game.scheduler().is_empty());
}

#[test]
fn test_follower_counts_count_up_while_answering() {
    let mut game = loaded_game(77);
    assert!(game.view().candidates.iter().all(|c| c.followers.is_none()));

    let slot = correct_slot(&game);
    let target = current_round(&game).candidates[slot].followers;
    game.command(GameCommand::Choose(slot)).unwrap();
    game.tick(Duration::from_millis(1500)).unwrap();

    let view = game.view();
    let shown = view.candidates[slot].followers.unwrap();
    assert!(shown > 0 && shown < target, "{shown} should be between 0 and {target}");
    assert!(view.candidates[slot].chosen);
    assert!((game.reveal_progress() - 0.5).abs() < 1e-9);

    game.tick(Duration::from_millis(1500)).unwrap();
    assert_eq!(game.view().candidates[slot].followers, Some(target));
}

#[test]
fn test_choice_without_round_is_ignored() {
    let mut game = Game::with_rng(&Config::default(), SmallRng::seed_from_u64(1));
    game.command(GameCommand::Choose(0)).unwrap();
    assert_eq!(stage(&game), StageKind::Idle);
}

#[test]
fn test_same_seed_same_rounds() {
    let config = Config {
        seed: Some(2024),
        ..Config::default()
    };
    let a = {
        let mut game = Game::new(&config);
        game.begin_loading().unwrap();
        game.finish_loading(Ok(common::sample_roster())).unwrap();
        current_round(&game).clone()
    };
    let b = {
        let mut game = Game::new(&config);
        game.begin_loading().unwrap();
        game.finish_loading(Ok(common::sample_roster())).unwrap();
        current_round(&game).clone()
    };
    assert_eq!(a, b);
}
