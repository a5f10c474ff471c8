#![allow(dead_code)]

use follower_duel::{
    config::Config,
    game::Game,
    roster::{Player, PlayerId, Roster},
    round::{Candidate, Level, Round, RoundId},
};
use rand::{rngs::SmallRng, SeedableRng};

pub fn player(name: &str, followers: u64) -> Player {
    Player {
        name: name.to_string(),
        image: format!("/public/{}.jpg", name.to_lowercase().replace(' ', "_")),
        followers,
    }
}

/// The thirteen-player sample roster shipped in `assets/players.json`.
pub fn sample_players() -> Vec<Player> {
    [
        ("Morato", "morato", 141_000),
        ("Beste", "beste", 31_900),
        ("Jurasek", "jurasek", 49_200),
        ("Florentino", "florentino", 293_000),
        ("João Neves", "joao_neves", 418_000),
        ("João Mário", "joao_mario", 681_000),
        ("Trubin", "trubin", 237_000),
        ("Samuel Soares", "samuel_soares", 71_100),
        ("André Gomes", "andre_gomes", 50_500),
        ("Carreras", "carreras", 167_000),
        ("Otamendi", "otamendi", 9_000_000),
        ("António Silva", "antonio_silva", 356_000),
        ("Tomás Araújo", "tomas_araujo", 36_100),
    ]
    .into_iter()
    .map(|(name, image, followers)| Player {
        name: name.to_string(),
        image: format!("/public/{image}.jpg"),
        followers,
    })
    .collect()
}

pub fn sample_roster() -> Roster {
    Roster::new(sample_players()).unwrap()
}

pub const FLORENTINO: PlayerId = PlayerId(3);
pub const TRUBIN: PlayerId = PlayerId(6);

/// Builds a round from `(roster index, followers)` pairs.
pub fn round_of(id: u64, level: Level, candidates: &[(usize, u64)]) -> Round {
    Round {
        id: RoundId(id),
        level,
        candidates: candidates
            .iter()
            .map(|&(index, followers)| Candidate {
                player: PlayerId(index),
                followers,
            })
            .collect(),
    }
}

/// Florentino (293,000) against Trubin (237,000).
pub fn florentino_vs_trubin(id: u64) -> Round {
    round_of(id, Level::Pair, &[(FLORENTINO.0, 293_000), (TRUBIN.0, 237_000)])
}

/// A game with the sample roster loaded and its first round on screen.
pub fn loaded_game(seed: u64) -> Game {
    loaded_game_with(&Config::default(), seed)
}

pub fn loaded_game_with(config: &Config, seed: u64) -> Game {
    let mut game = Game::with_rng(config, SmallRng::seed_from_u64(seed));
    game.begin_loading().unwrap();
    game.finish_loading(Ok(sample_roster())).unwrap();
    game
}

pub fn current_round(game: &Game) -> &Round {
    game.state().stage.round().expect("a round should be on screen")
}

pub fn correct_slot(game: &Game) -> usize {
    let round = current_round(game);
    (0..round.len()).find(|&slot| round.is_correct(slot)).unwrap()
}

pub fn wrong_slot(game: &Game) -> usize {
    let round = current_round(game);
    (0..round.len()).find(|&slot| !round.is_correct(slot)).unwrap()
}
