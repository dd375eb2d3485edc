use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simulator::{play_game, Config, GameConfig, GameSummary, Recorder, Resolution};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the game description JSON file
    game_config: PathBuf,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// How many programming/activation rounds each game lasts
    #[arg(long, default_value_t = 5)]
    rounds: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Resolve registers one player at a time instead of running whole programs
    #[arg(long, default_value_t = false)]
    step_mode: bool,

    /// Draw the board after every round
    #[arg(long, default_value_t = false)]
    show_board: bool,

    /// Record a snapshot of the board for every resolved step as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn print_summary(game_idx: usize, summary: &GameSummary) {
    eprintln!(
        "Game {} after {} rounds ({} changes):",
        game_idx, summary.rounds, summary.notifications
    );
    for player in &summary.final_state.players {
        let position = match player.position {
            Some(pos) => pos.to_string(),
            None => String::from("off the board"),
        };
        eprintln!("- {} at {} facing {}", player.name, position, player.heading);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let game = GameConfig::load(&args.game_config)?;
    debug!(players = game.players.len(), "Loaded game config");

    let mut config = Config {
        rng: StdRng::seed_from_u64(seed),
        recorder,
        rounds: args.rounds,
        resolution: if args.step_mode {
            Resolution::Steps
        } else {
            Resolution::Programs
        },
        show_board: args.show_board,
    };

    for game_idx in 0..args.num_games {
        let summary = play_game(&game, &mut config)?;
        print_summary(game_idx, &summary);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
