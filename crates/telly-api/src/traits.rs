//! Data source abstraction.
//!
//! The runtime only talks to a [`ShowSource`], so the TVMaze client can be
//! swapped for an in-memory source in tests.

use std::future::Future;

use telly_core::models::{Episode, Show, ShowId};

/// Where show and episode records come from.
pub trait ShowSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the full show list, in source order.
    fn fetch_shows(&self) -> impl Future<Output = Result<Vec<Show>, Self::Error>> + Send;

    /// Fetch every episode of one show.
    fn fetch_episodes(
        &self,
        show_id: ShowId,
    ) -> impl Future<Output = Result<Vec<Episode>, Self::Error>> + Send;
}
