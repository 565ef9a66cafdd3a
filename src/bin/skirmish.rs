//! Headless skirmish runner
//!
//! Plays a full AI-vs-AI campaign and prints a summary, for tuning
//! difficulty profiles and checking balance across seeds.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use rise_of_nation::core::types::{Difficulty, Faction, GameStatus};
use rise_of_nation::core::Result;
use rise_of_nation::economy::AiProfile;
use rise_of_nation::session::GameSession;

#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run an AI vs AI War of 1812 campaign and report the outcome")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// AI difficulty: easy, medium, or hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Custom AI profile TOML; overrides --difficulty
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Rounds to play (the war ends after 12 regardless)
    #[arg(long, default_value_t = 12)]
    rounds: u32,

    /// Faction whose seat the runner takes over
    #[arg(long, default_value = "us")]
    faction: String,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    profile: String,
    rounds_played: u32,
    game_over: bool,
    message: String,
    scores: BTreeMap<String, i64>,
    territories: BTreeMap<String, usize>,
    nationalism_meter: u32,
    winner: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let profile = match &args.profile {
        Some(path) => AiProfile::load_from_file(path)?,
        None => AiProfile::for_difficulty(args.difficulty),
    };
    let profile_name = profile.name.clone();

    let faction = match args.faction.as_str() {
        "us" => Faction::Us,
        "british" => Faction::British,
        "native" => Faction::Native,
        other => {
            eprintln!("Unknown faction '{other}', defaulting to us");
            Faction::Us
        }
    };

    let mut session = GameSession::with_profile(seed, profile);
    session.start_game(faction, "Skirmish", "");

    let mut rounds_played = 0;
    for _ in 0..args.rounds {
        if session.state.game.status != GameStatus::InProgress {
            break;
        }
        session.play_round()?;
        rounds_played += 1;
    }

    let state = &session.state;
    let mut scores = BTreeMap::new();
    let mut territories = BTreeMap::new();
    for f in Faction::PLAYABLE {
        scores.insert(f.display_name().to_string(), state.score.score(f));
        territories.insert(f.display_name().to_string(), state.map.owned_count(f));
    }
    let winner = Faction::PLAYABLE
        .iter()
        .max_by_key(|f| state.score.score(**f))
        .map(|f| f.display_name().to_string())
        .unwrap_or_default();

    let summary = Summary {
        seed,
        profile: profile_name,
        rounds_played,
        game_over: state.game.status == GameStatus::GameOver,
        message: state.game.message.clone(),
        scores,
        territories,
        nationalism_meter: state.score.nationalism_meter,
        winner,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Skirmish complete (seed {seed}, profile {})", summary.profile);
        println!("  {} rounds played, over: {}", summary.rounds_played, summary.game_over);
        println!("  {}", summary.message);
        for (name, score) in &summary.scores {
            println!("  {name}: {score} points, {} territories", summary.territories[name]);
        }
        println!("  Winner: {}", summary.winner);
    }
    Ok(())
}
