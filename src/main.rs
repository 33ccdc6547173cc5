use std::fs::File;
use std::io::{sink, stderr};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use wrapsnake::config::{Args, LogTarget};
use wrapsnake::game::SnakeGame;
use wrapsnake::term::TermManager;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut term = TermManager::new(args.fps).context("failed to set up the terminal")?;
    info!(fps = args.fps, seed = ?args.seed, "terminal ready");

    let mut game = SnakeGame::new(rng);
    // On error the terminal is restored when `term` drops, before anyhow prints
    game.run(&mut term).context("game loop failed")?;
    term.restore().context("failed to restore the terminal")?;

    info!(score = game.score(), length = game.snake().tail_len(), "bye");
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let target = LogTarget::choose(args.log_file.as_deref(), stderr().is_tty());
    let ansi = target == LogTarget::Stderr;
    let writer = match target {
        LogTarget::File(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        LogTarget::Stderr => BoxMakeWriter::new(stderr),
        LogTarget::Discard => BoxMakeWriter::new(sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(ansi)
        .with_writer(writer)
        .init();

    Ok(())
}
