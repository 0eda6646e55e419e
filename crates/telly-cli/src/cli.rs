use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "telly", version, about = "Browse TV shows and episodes from TVMaze")]
pub struct Args {
    /// Config file to use instead of the per-user one
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List shows sorted by name, optionally filtered
    Shows {
        /// Match against name, summary and genres
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// List the episodes of one show
    Episodes {
        show_id: u64,
        /// Match against episode name and summary
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Interactive session that keeps an HTML page up to date
    Browse {
        /// Page to write (defaults to `display.output`)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Print only the per-user config file location
        #[arg(long)]
        path: bool,
    },
}
