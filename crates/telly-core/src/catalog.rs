use crate::dropdown::{episode_keys, EpisodeKey};
use crate::models::{Episode, Show, ShowId};
use crate::view::ViewKind;

/// Authoritative in-memory copy of the shows and the loaded show's episodes.
///
/// The active [`ViewKind`] lives here so that it can never disagree with the
/// episode list: the kind is `Episodes` exactly when a show's episodes have
/// been stored and not cleared since.
#[derive(Debug, Default)]
pub struct CatalogStore {
    shows: Vec<Show>,
    episodes: Vec<Episode>,
    current_show: Option<ShowId>,
    view: ViewKind,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the show list, sorted by name.
    pub fn set_shows(&mut self, mut shows: Vec<Show>) {
        sort_by_name(&mut shows);
        tracing::debug!(count = shows.len(), "Stored show list");
        self.shows = shows;
    }

    /// Replace the episode list wholesale with the episodes of `show_id`.
    pub fn set_episodes(&mut self, show_id: ShowId, episodes: Vec<Episode>) {
        tracing::debug!(show_id, count = episodes.len(), "Stored episode list");
        self.episodes = episodes;
        self.current_show = Some(show_id);
        self.view = ViewKind::Episodes;
    }

    /// Drop the loaded episodes and return to the shows view.
    pub fn clear_episodes(&mut self) {
        self.episodes.clear();
        self.current_show = None;
        self.view = ViewKind::Shows;
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    /// The show whose episodes are loaded, if any.
    pub fn current_show(&self) -> Option<ShowId> {
        self.current_show
    }

    pub fn show(&self, id: ShowId) -> Option<&Show> {
        self.shows.iter().find(|s| s.id == id)
    }

    /// The loaded episode with the given key, as keyed by the episode dropdown.
    pub fn episode(&self, key: &EpisodeKey) -> Option<&Episode> {
        let show_id = self.current_show?;
        if show_id != key.show_id {
            return None;
        }
        episode_keys(show_id, &self.episodes)
            .iter()
            .position(|k| k == key)
            .map(|i| &self.episodes[i])
    }
}

/// Stable sort by upper-cased name. Equal names keep their original order.
pub fn sort_by_name(shows: &mut [Show]) {
    shows.sort_by_cached_key(|s| s.name.to_uppercase());
}
