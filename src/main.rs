//! mystic - Legends of the Mystic Lands

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mystic::{Config, ConsoleInput, ConsoleNarrator, Narrator, Session};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Legends of the Mystic Lands
#[derive(Parser, Debug)]
#[command(name = "mystic", version, about = "A turn-based text adventure")]
struct Args {
    /// TOML config file (defaults to mystic.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save file path (overrides config)
    #[arg(short, long)]
    save_file: Option<PathBuf>,

    /// RNG seed for a reproducible run (overrides config)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the game text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mystic=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(path) = args.save_file {
        config = config.with_save_path(path);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut narrator = ConsoleNarrator::new(io::stdout());
    narrator.line("Welcome to Legends of the Mystic Lands!");

    let input = ConsoleInput::new(io::stdin().lock(), io::stdout());
    let Some(mut session) = Session::start(&config, input, narrator)? else {
        return Ok(());
    };

    let end = session.run()?;
    info!("Session ended: {:?}", end);

    Ok(())
}
