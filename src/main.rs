//! deskchess: play against the engine on the terminal

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use deskchess::{Board, Console, GameSession, PlayerColor, SessionConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deskchess", version, about = "Play chess against a small alpha-beta engine")]
struct Args {
    /// TOML file with session settings
    #[arg(long, value_name = "path")]
    config: Option<PathBuf>,

    /// Engine difficulty, 1 (easy) to 5 (master)
    #[arg(long)]
    difficulty: Option<u8>,

    /// Pause before the engine starts thinking, in milliseconds
    #[arg(long, value_name = "ms")]
    delay_ms: Option<u64>,

    /// Play the black pieces
    #[arg(long)]
    black: bool,

    /// Start from this position instead of the initial one
    #[arg(long)]
    fen: Option<String>,

    /// Log filter, e.g. `info` or `deskchess=debug` (defaults to RUST_LOG, then `warn`)
    #[arg(long, value_name = "filter")]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match &args.log {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(level) = args.difficulty {
        config.difficulty = level;
    }
    if let Some(ms) = args.delay_ms {
        config.engine_delay_ms = ms;
    }
    if args.black {
        config.player_color = PlayerColor::Black;
    }

    let board = match &args.fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::new(),
    };

    println!("deskchess {}", env!("CARGO_PKG_VERSION"));
    let session = GameSession::with_board(board, config);
    let mut console = Console::new(session, io::stdout());
    console.run(io::stdin().lock())?;
    Ok(())
}
