use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogStore;
use crate::error::CoreError;
use crate::filter::{filter, Query};
use crate::models::{Episode, Show};

/// Which entity kind is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Shows,
    Episodes,
}

impl ViewKind {
    /// Plural noun used in count messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Shows => "shows",
            Self::Episodes => "episodes",
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

impl FromStr for ViewKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "show" | "shows" => Ok(Self::Shows),
            "episode" | "episodes" => Ok(Self::Episodes),
            other => Err(CoreError::InvalidSelection(format!("unknown view kind: {other}"))),
        }
    }
}

/// Records matching a query, typed by the view they came from.
#[derive(Debug)]
pub enum Listing<'a> {
    Shows(Vec<&'a Show>),
    Episodes(Vec<&'a Episode>),
}

impl Listing<'_> {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Shows(_) => ViewKind::Shows,
            Self::Episodes(_) => ViewKind::Episodes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Shows(s) => s.len(),
            Self::Episodes(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Route `query` to the filter for the active view kind.
pub fn search<'a>(catalog: &'a CatalogStore, query: &Query) -> Listing<'a> {
    tracing::debug!(view = %catalog.view(), query = query.as_str(), "Routing search");
    match catalog.view() {
        ViewKind::Shows => Listing::Shows(filter(catalog.shows(), query)),
        ViewKind::Episodes => Listing::Episodes(filter(catalog.episodes(), query)),
    }
}

/// Total number of records in the active view, before filtering.
pub fn total(catalog: &CatalogStore) -> usize {
    match catalog.view() {
        ViewKind::Shows => catalog.shows().len(),
        ViewKind::Episodes => catalog.episodes().len(),
    }
}

/// "Displaying : 3 / 73 episodes", or nothing when the query is empty.
pub fn count_message(kind: ViewKind, shown: usize, total: usize, query: &Query) -> Option<String> {
    if query.is_empty() {
        None
    } else {
        Some(format!("Displaying : {shown} / {total} {kind}"))
    }
}
