pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Headlines, search and endless scrolling over NewsAPI", long_about = None)]
pub struct Cli {
    /// Alternate config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Articles requested per page
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the headline and the default feed
    Headlines {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Search articles
    Search {
        /// Free-text query
        query: String,
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Launch the TUI (default)
    Tui,
}
