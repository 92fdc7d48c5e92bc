use std::fs::OpenOptions;
use std::path::Path;

use clap::Parser;
use tabstrip::cli::commands::Cli;
use tabstrip::cli::handlers;
use tabstrip::io::config_io;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Send diagnostics to `path`. The terminal belongs to the TUI (or to the
/// command's output), so nothing is logged without a file.
fn init_logging(path: &Path) -> Result<(), std::io::Error> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log
        && let Err(e) = init_logging(path)
    {
        eprintln!("error: cannot open log file {}: {}", path.display(), e);
        std::process::exit(1);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = match config_io::load_config(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            // No subcommand → launch the demo TUI
            if let Err(e) = tabstrip::tui::run(config) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli, &config) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
