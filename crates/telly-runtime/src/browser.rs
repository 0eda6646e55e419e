use chrono::{DateTime, Utc};

use telly_core::catalog::CatalogStore;
use telly_core::dropdown::{EpisodeChoice, EpisodeDropdown, ShowChoice, ShowDropdown};
use telly_core::filter::Query;
use telly_core::models::{Episode, Show, ShowId};
use telly_core::render::{Frame, Rendered};
use telly_core::view::{self, Listing, ViewKind};

use crate::RuntimeError;

/// An episode fetch that has been asked for but not applied yet.
///
/// Only the most recently issued request is ever applied; see
/// [`Browser::complete_episodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeRequest {
    pub token: u64,
    pub show_id: ShowId,
}

/// What happened to a finished episode fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Episodes replaced the catalog and are on screen.
    Applied,
    /// A newer selection superseded the request; the response was dropped.
    Stale,
    /// The fetch failed; the previous view is kept.
    Failed,
}

/// A user-visible status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Command handlers for the show browser.
///
/// Owns the catalog, the search text and both dropdowns, and keeps them
/// consistent: after every command the search box, the dropdown selections
/// and the rendered list describe the same thing. The search box is cleared
/// by every dropdown change, so a stale query never sits next to an
/// unfiltered list.
#[derive(Debug, Default)]
pub struct Browser {
    catalog: CatalogStore,
    query: Query,
    show_dropdown: ShowDropdown,
    episode_dropdown: EpisodeDropdown,
    next_token: u64,
    pending: Option<EpisodeRequest>,
    status: Option<StatusLine>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Commands ──────────────────────────────────────────────────

    /// Install the startup show list and draw it.
    pub fn load_shows(&mut self, shows: Vec<Show>) -> Frame {
        self.catalog.set_shows(shows);
        self.catalog.clear_episodes();
        self.show_dropdown.populate(self.catalog.shows());
        self.episode_dropdown.reset();
        self.query = Query::default();
        self.pending = None;
        self.status = None;
        self.frame()
    }

    /// Live search: filter whatever kind is on screen.
    pub fn search(&mut self, text: &str) -> Frame {
        self.query = Query::new(text);
        // A single selected episode would hide the filtered list.
        self.episode_dropdown.select_all();
        self.frame()
    }

    /// Handle a show dropdown change.
    ///
    /// Choosing a show returns the request to fetch its episodes; the view is
    /// untouched until [`Browser::complete_episodes`] applies the response.
    /// Choosing the sentinel goes back to all shows immediately.
    pub fn select_show(&mut self, value: &str) -> Result<Option<EpisodeRequest>, RuntimeError> {
        match self.show_dropdown.select(value)? {
            ShowChoice::All => {
                self.show_all();
                Ok(None)
            }
            ShowChoice::Show(show_id) => {
                self.next_token += 1;
                let request = EpisodeRequest {
                    token: self.next_token,
                    show_id,
                };
                tracing::debug!(show_id, token = request.token, "Requesting episodes");
                self.pending = Some(request);
                Ok(Some(request))
            }
        }
    }

    /// Apply the outcome of an episode fetch issued by [`Browser::select_show`].
    pub fn complete_episodes(
        &mut self,
        request: EpisodeRequest,
        result: Result<Vec<Episode>, RuntimeError>,
    ) -> Completion {
        if self.pending != Some(request) {
            tracing::debug!(
                show_id = request.show_id,
                token = request.token,
                "Discarding stale episode response"
            );
            return Completion::Stale;
        }
        self.pending = None;

        match result {
            Ok(episodes) => {
                self.catalog.set_episodes(request.show_id, episodes);
                self.episode_dropdown
                    .populate(request.show_id, self.catalog.episodes());
                self.query = Query::default();
                self.status = None;
                Completion::Applied
            }
            Err(e) => {
                tracing::warn!(show_id = request.show_id, error = %e, "Failed to load episodes");
                let previous = match self.catalog.current_show() {
                    Some(id) => ShowChoice::Show(id),
                    None => ShowChoice::All,
                };
                self.show_dropdown.restore(previous);
                let name = self
                    .catalog
                    .show(request.show_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or("this show");
                let status = format!("Could not load episodes for {name}: {e}");
                self.set_status(status);
                Completion::Failed
            }
        }
    }

    /// The "all shows" control and the show dropdown sentinel.
    pub fn show_all(&mut self) -> Frame {
        if let Some(request) = self.pending.take() {
            tracing::debug!(token = request.token, "Cancelled pending episode request");
        }
        self.catalog.clear_episodes();
        self.show_dropdown.reset();
        self.episode_dropdown.reset();
        self.query = Query::default();
        self.frame()
    }

    /// Handle an episode dropdown change.
    pub fn select_episode(&mut self, value: &str) -> Result<Frame, RuntimeError> {
        self.episode_dropdown.select(value)?;
        self.query = Query::default();
        Ok(self.frame())
    }

    /// Record that the startup show fetch failed.
    pub fn shows_failed(&mut self, message: &str) -> Frame {
        tracing::warn!(error = %message, "Failed to load shows");
        self.set_status(format!("Could not load shows: {message}"));
        self.frame()
    }

    // ── Queries ───────────────────────────────────────────────────

    /// Snapshot of everything on screen.
    pub fn frame(&self) -> Frame {
        let (rendered, count_message) = match self.episode_dropdown.selected() {
            EpisodeChoice::Episode(key) if self.catalog.view() == ViewKind::Episodes => {
                let single = self.catalog.episode(&key).cloned().into_iter().collect();
                (Rendered::Episodes(single), None)
            }
            _ => {
                let listing = view::search(&self.catalog, &self.query);
                let count = view::count_message(
                    listing.kind(),
                    listing.len(),
                    view::total(&self.catalog),
                    &self.query,
                );
                (to_rendered(listing), count)
            }
        };

        Frame {
            rendered,
            query: self.query.as_str().to_string(),
            count_message,
            show_options: self.show_dropdown.options().to_vec(),
            selected_show: self.show_dropdown.selected().value(),
            episode_options: self.episode_dropdown.options().to_vec(),
            selected_episode: self.episode_dropdown.selected().value(),
            status: self.status.as_ref().map(|s| s.message.clone()),
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn view(&self) -> ViewKind {
        self.catalog.view()
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn pending(&self) -> Option<EpisodeRequest> {
        self.pending
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(StatusLine {
            at: Utc::now(),
            message,
        });
    }
}

fn to_rendered(listing: Listing<'_>) -> Rendered {
    match listing {
        Listing::Shows(shows) => Rendered::Shows(shows.into_iter().cloned().collect()),
        Listing::Episodes(eps) => Rendered::Episodes(eps.into_iter().cloned().collect()),
    }
}
