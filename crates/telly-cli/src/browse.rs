//! Interactive browse session.
//!
//! Each input line is one UI event: typing in the search box, changing a
//! dropdown or pressing "All shows". Episode fetches run in the background
//! while input keeps being read; the page file is rewritten whenever what is
//! on screen changes.

use std::io::Write as _;
use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use telly_api::TvMazeClient;
use telly_core::render::{render_page, Frame, RenderOptions};
use telly_runtime::{Completion, EpisodeFetch, Session};

use crate::error::CliError;

const HELP: &str = "\
commands:
  search <text>      filter what is on screen (empty text clears)
  show <id|all>      pick a show from the show dropdown
  episode <key|all>  pick an episode, e.g. `episode 82:1:1`
  all                back to all shows
  options            list both dropdowns
  status             last status message
  help               this text
  quit               leave";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Search(String),
    Show(String),
    Episode(String),
    All,
    Options,
    Status,
    Help,
    Quit,
}

/// Split off the command word. Search text keeps everything after the single
/// separator character, so leading and trailing spaces stay part of the query.
fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim_start().trim_end_matches(['\r', '\n']);
    let (word, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = raw.trim();
    let dropdown_value = |rest: &str| {
        if rest.eq_ignore_ascii_case("all") {
            String::new()
        } else {
            rest.to_string()
        }
    };
    match word.to_ascii_lowercase().as_str() {
        "search" | "/" => Ok(Input::Search(raw.to_string())),
        "show" if !rest.is_empty() => Ok(Input::Show(dropdown_value(rest))),
        "episode" if !rest.is_empty() => Ok(Input::Episode(dropdown_value(rest))),
        "all" => Ok(Input::All),
        "options" => Ok(Input::Options),
        "status" => Ok(Input::Status),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command `{other}`, try `help`")),
    }
}

struct Page {
    out: PathBuf,
    render: RenderOptions,
}

impl Page {
    async fn show(&self, frame: &Frame) -> Result<(), CliError> {
        tokio::fs::write(&self.out, render_page(frame, &self.render)).await?;
        println!(
            "{} {} on screen ({})",
            frame.rendered.len(),
            frame.rendered.kind(),
            self.out.display()
        );
        if let Some(message) = &frame.count_message {
            println!("{message}");
        }
        if let Some(status) = &frame.status {
            println!("! {status}");
        }
        Ok(())
    }
}

pub async fn run(client: TvMazeClient, render: RenderOptions, out: PathBuf) -> Result<(), CliError> {
    let page = Page { out, render };
    let mut session = Session::new(client);
    page.show(&session.start().await).await?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut fetches: JoinSet<EpisodeFetch> = JoinSet::new();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = match parse(&line) {
                    Ok(input) => input,
                    Err(message) => {
                        if !message.is_empty() {
                            println!("{message}");
                        }
                        continue;
                    }
                };
                match handle(&mut session, &mut fetches, input) {
                    Ok(Step::Redraw(frame)) => page.show(&frame).await?,
                    Ok(Step::Wait) => println!("loading episodes..."),
                    Ok(Step::Quiet) => {}
                    Ok(Step::Quit) => break,
                    Err(e) => println!("error: {e}"),
                }
            }
            Some(joined) = fetches.join_next() => {
                let (request, result) = match joined {
                    Ok(fetch) => fetch,
                    Err(e) => {
                        tracing::warn!(error = %e, "Episode fetch task failed");
                        continue;
                    }
                };
                // Keep the prompt line clean for the redraw output.
                println!();
                match session.complete(request, result) {
                    Completion::Stale => {}
                    Completion::Applied | Completion::Failed => page.show(&session.frame()).await?,
                }
            }
        }
    }

    fetches.abort_all();
    Ok(())
}

enum Step {
    Redraw(Frame),
    Wait,
    Quiet,
    Quit,
}

fn handle(
    session: &mut Session<TvMazeClient>,
    fetches: &mut JoinSet<EpisodeFetch>,
    input: Input,
) -> Result<Step, CliError> {
    let step = match input {
        Input::Search(text) => Step::Redraw(session.search(&text)),
        Input::Show(value) => match session.select_show_detached(&value)? {
            Some(fetch) => {
                fetches.spawn(fetch);
                Step::Wait
            }
            None => Step::Redraw(session.frame()),
        },
        Input::Episode(value) => Step::Redraw(session.select_episode(&value)?),
        Input::All => Step::Redraw(session.show_all()),
        Input::Options => {
            let frame = session.frame();
            println!("shows:");
            for option in &frame.show_options {
                let marker = if option.value == frame.selected_show { "*" } else { " " };
                println!(" {marker} {:<8} {}", option.value, option.label);
            }
            println!("episodes:");
            for option in &frame.episode_options {
                let marker = if option.value == frame.selected_episode { "*" } else { " " };
                println!(" {marker} {:<10} {}", option.value, option.label);
            }
            Step::Quiet
        }
        Input::Status => {
            match session.browser().status() {
                Some(status) => println!("[{}] {}", status.at.format("%H:%M:%S"), status.message),
                None => println!("no status"),
            }
            Step::Quiet
        }
        Input::Help => {
            println!("{HELP}");
            Step::Quiet
        }
        Input::Quit => Step::Quit,
    };
    Ok(step)
}
