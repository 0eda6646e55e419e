mod browse;
mod cli;
mod error;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use telly_api::{ShowSource, TvMazeClient};
use telly_core::config::AppConfig;
use telly_core::dropdown::episode_label;
use telly_core::filter::{filter_episodes, Query};
use telly_core::render::Rendered;
use telly_core::view::{count_message, ViewKind};
use telly_runtime::Session;

use crate::cli::{Args, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("telly: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = logging::init(&config.logging.level);

    match run(args.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("telly: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, CliError> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

async fn run(command: Command, config: AppConfig) -> Result<(), CliError> {
    match command {
        Command::Shows { query } => list_shows(&config, &query).await,
        Command::Episodes { show_id, query } => list_episodes(&config, show_id, &query).await,
        Command::Browse { out } => {
            let client = TvMazeClient::from_config(&config.api)?;
            let out = out.unwrap_or_else(|| config.display.output.clone());
            browse::run(client, config.render_options(), out).await
        }
        Command::Config { path } => {
            if path {
                println!("{}", AppConfig::config_path().display());
            } else {
                let text = toml::to_string_pretty(&config)
                    .map_err(|e| CliError::Status(format!("cannot serialize config: {e}")))?;
                print!("{text}");
            }
            Ok(())
        }
    }
}

async fn list_shows(config: &AppConfig, query: &str) -> Result<(), CliError> {
    let mut session = Session::new(TvMazeClient::from_config(&config.api)?);
    let frame = session.start().await;
    if let Some(status) = frame.status {
        return Err(CliError::Status(status));
    }

    let frame = session.search(query);
    if let Rendered::Shows(shows) = &frame.rendered {
        for show in shows {
            println!("{:>7}  {}  [{}]", show.id, show.name, show.genres.join(", "));
        }
    }
    if let Some(message) = frame.count_message {
        println!("{message}");
    }
    Ok(())
}

async fn list_episodes(config: &AppConfig, show_id: u64, query: &str) -> Result<(), CliError> {
    let client = TvMazeClient::from_config(&config.api)?;
    let episodes = client.fetch_episodes(show_id).await?;
    let matches = filter_episodes(&episodes, query);
    for episode in &matches {
        println!("{}", episode_label(episode));
    }
    let total = episodes.len();
    if let Some(message) = count_message(ViewKind::Episodes, matches.len(), total, &Query::new(query)) {
        println!("{message}");
    }
    Ok(())
}
