use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PlayerRecord {
    name: String,
    image: String,
    followers: u64,
}

fn main() {
    let path = Path::new(&env::var("OUT_DIR").unwrap()).join("roster_data.rs");
    let mut file = BufWriter::new(File::create(&path).unwrap());

    let players_json = include_str!("./assets/players.json");
    let players: Vec<PlayerRecord> = serde_json::from_str(players_json).unwrap();

    writeln!(&mut file, "/// The roster bundled into the binary at build time.").unwrap();
    writeln!(&mut file, "pub static EMBEDDED_ROSTER: &[EmbeddedPlayer] = &[").unwrap();

    for player in players {
        // Debug formatting of a str produces a valid Rust string literal
        writeln!(
            &mut file,
            "    EmbeddedPlayer {{ name: {:?}, image: {:?}, followers: {} }},",
            player.name, player.image, player.followers
        )
        .unwrap();
    }

    writeln!(&mut file, "];").unwrap();
    println!("cargo:rerun-if-changed=assets/players.json");
}
