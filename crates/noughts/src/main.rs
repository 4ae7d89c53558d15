//! Noughts - terminal tic-tac-toe

#![warn(missing_docs)]

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use noughts::{
    Cli, Command, ConfigOverrides, Event, GameConfig, HELP, Orchestrator, PlayArgs,
    PlayerCommand, SuggestArgs, TerminalDisplay, spawn_input_reader,
};
use noughts_core::{Board, MoveSelector, TurnController, cell_label};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Suggest(args) => run_suggest(args),
    }
}

/// Logs go to a file when one is given, otherwise to stderr at `warn`
/// so they stay out of the board.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("warn"))
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;
        }
    }
    Ok(())
}

/// Run an interactive game on stdin and stdout
async fn run_play(args: PlayArgs) -> Result<()> {
    init_tracing(args.log_file.as_deref())?;

    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    config.apply(ConfigOverrides::from(&args));

    info!(?config, "Starting noughts");

    let rng = match config.seed() {
        Some(seed) => ChaCha8Rng::seed_from_u64(*seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let selector = MoveSelector::with_blend(rng, *config.blend());

    let mut display = TerminalDisplay::new(std::io::stdout());
    display.notice(HELP);
    let controller = TurnController::new(display, selector);
    let mut orchestrator = Orchestrator::new(controller, config.setup(), config.think_delay());

    let tx = orchestrator.sender();
    tx.send(Event::Input(PlayerCommand::NewGame))?;
    // Detached: the reader may still be blocked on stdin after `quit`.
    let _reader = spawn_input_reader(BufReader::new(std::io::stdin()), tx);

    orchestrator.run().await
}

/// Print the computer's move for a board
#[instrument(skip(args), fields(board = %args.board, difficulty = %args.difficulty))]
fn run_suggest(args: SuggestArgs) -> Result<()> {
    init_tracing(None)?;

    let board = Board::parse(&args.board)?;
    let mut selector = match args.seed {
        Some(seed) => MoveSelector::seeded(seed),
        None => MoveSelector::from_entropy(),
    };
    let index = selector.select_move(board.cells(), args.difficulty, args.marker)?;

    info!(index, "Suggested move");
    println!("{} ({})", index + 1, cell_label(index));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_tracing_init_is_reported() {
        init_tracing(None).unwrap();
        let err = init_tracing(None).unwrap_err();
        assert!(err.to_string().contains("Failed to install tracing subscriber"), "{err}");
    }
}
