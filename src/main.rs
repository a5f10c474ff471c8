use std::env;

use anyhow::Context;
use follower_duel::{app::App, config, constants::LOOP_TIME, logging};
use tracing::info;

/// The main entry point of the application.
///
/// Loads the config from the environment and command line, loads the roster, and then
/// enters the main game loop.
pub fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let figment = config::figment_with_args(env::args())?;
    let config = config::load_config_from(figment).context("Could not load config")?;
    info!(mode = <&'static str>::from(config.mode), seed = ?config.seed, "Config loaded");

    let mut app = App::new(config).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    println!("Type the number of your pick, r to restart, p to pause, q to quit.");

    loop {
        if !app.run() {
            break;
        }
    }

    Ok(())
}
