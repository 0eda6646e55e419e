mod browser;
mod session;

pub use browser::{Browser, Completion, EpisodeRequest, StatusLine};
pub use session::{EpisodeFetch, Session};

use telly_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The data source failed to deliver a fetch.
    #[error("{0}")]
    Fetch(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}
