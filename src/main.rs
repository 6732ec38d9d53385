use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdesk::app::AppContext;
use newsdesk::cli::{commands, Cli, Commands};
use newsdesk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so its logs go to a file.
    if matches!(command, Commands::Tui) {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(AppContext::log_path()?)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
            .with(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(page_size) = cli.page_size {
        config.api.page_size = page_size;
    }

    let ctx = AppContext::new(config)?;

    match command {
        Commands::Headlines { pages } => {
            commands::headlines(&ctx, pages).await?;
        }
        Commands::Search { query, pages } => {
            commands::search(&ctx, &query, pages).await?;
        }
        Commands::Tui => {
            newsdesk::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
