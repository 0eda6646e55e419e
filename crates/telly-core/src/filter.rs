//! Query matching for shows and episodes.
//!
//! Matching is case-insensitive literal substring containment. Filters never
//! reorder their input and never touch the lists they borrow.

use crate::models::{Episode, Show};

/// A free-text search query with its case-folded form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    needle: String,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = fold(&raw);
        Self { raw, needle }
    }

    /// The text as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The case-folded text used for comparison.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// An empty query means "no filter".
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Something a [`Query`] can be matched against.
pub trait Searchable {
    /// Whether the already case-folded `needle` occurs in this record.
    fn matches(&self, needle: &str) -> bool;
}

impl Searchable for Episode {
    fn matches(&self, needle: &str) -> bool {
        fold(&self.name).contains(needle) || fold(self.summary_text()).contains(needle)
    }
}

impl Searchable for Show {
    fn matches(&self, needle: &str) -> bool {
        fold(&self.name).contains(needle)
            || fold(self.summary_text()).contains(needle)
            || self.genres.iter().any(|g| fold(g).contains(needle))
    }
}

/// Stable filter over any searchable list.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &Query) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| item.matches(query.needle()))
        .collect()
}

/// Shows whose name, summary or one of whose genres contains `query`.
pub fn filter_shows<'a>(shows: &'a [Show], query: &str) -> Vec<&'a Show> {
    filter(shows, &Query::new(query))
}

/// Episodes whose name or summary contains `query`.
pub fn filter_episodes<'a>(episodes: &'a [Episode], query: &str) -> Vec<&'a Episode> {
    filter(episodes, &Query::new(query))
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episodes() -> Vec<Episode> {
        let mut pilot = Episode::new(1, 1, "Pilot");
        pilot.summary = Some("<p>A plane crashes on an island.</p>".into());
        let mut second = Episode::new(1, 2, "Tabula Rasa");
        second.summary = None;
        let mut third = Episode::new(1, 3, "Walkabout");
        third.summary = Some("<p>Locke goes hunting.</p>".into());
        vec![pilot, second, third]
    }

    fn shows() -> Vec<Show> {
        let mut lost = Show::new(1, "Lost");
        lost.genres = vec!["Drama".into(), "Adventure".into()];
        lost.summary = Some("<p>Survivors of a plane crash.</p>".into());
        let mut walking = Show::new(2, "The Walking Dead");
        walking.genres = vec!["Horror".into()];
        let mut office = Show::new(3, "The Office");
        office.genres = vec!["Comedy".into()];
        office.summary = Some("<p>A mockumentary about office life.</p>".into());
        vec![lost, walking, office]
    }

    fn episode_names<'a>(items: &[&'a Episode]) -> Vec<&'a str> {
        items.iter().map(|e| e.name.as_str()).collect()
    }

    fn show_names<'a>(items: &[&'a Show]) -> Vec<&'a str> {
        items.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let eps = episodes();
        let result = filter_episodes(&eps, "");
        assert_eq!(result.len(), 3);
        assert_eq!(episode_names(&result), ["Pilot", "Tabula Rasa", "Walkabout"]);

        let shows = shows();
        let result = filter_shows(&shows, "");
        assert_eq!(show_names(&result), ["Lost", "The Walking Dead", "The Office"]);
    }

    #[test]
    fn test_empty_lists() {
        assert!(filter_episodes(&[], "pilot").is_empty());
        assert!(filter_shows(&[], "").is_empty());
    }

    #[test]
    fn test_episode_name_match_is_case_insensitive() {
        let eps = episodes();
        let result = filter_episodes(&eps, "PILOT");
        assert_eq!(episode_names(&result), ["Pilot"]);
    }

    #[test]
    fn test_episode_summary_match() {
        let eps = episodes();
        let result = filter_episodes(&eps, "locke");
        assert_eq!(episode_names(&result), ["Walkabout"]);
    }

    #[test]
    fn test_episode_missing_summary_contributes_nothing() {
        let eps = episodes();
        let result = filter_episodes(&eps, "rasa");
        assert_eq!(episode_names(&result), ["Tabula Rasa"]);
        assert!(filter_episodes(&eps, "nowhere to be found").is_empty());
    }

    #[test]
    fn test_show_genre_match() {
        let shows = shows();
        let result = filter_shows(&shows, "horror");
        assert_eq!(show_names(&result), ["The Walking Dead"]);
    }

    #[test]
    fn test_show_partial_genre_match() {
        let shows = shows();
        let result = filter_shows(&shows, "advent");
        assert_eq!(show_names(&result), ["Lost"]);
    }

    #[test]
    fn test_show_match_preserves_order() {
        let shows = shows();
        let result = filter_shows(&shows, "the");
        assert_eq!(show_names(&result), ["The Walking Dead", "The Office"]);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let mut eps = episodes();
        eps.push(Episode::new(2, 1, "Man of Science (Part 1)"));
        assert!(filter_episodes(&eps, ".*").is_empty());
        let result = filter_episodes(&eps, "(part 1)");
        assert_eq!(episode_names(&result), ["Man of Science (Part 1)"]);
    }

    #[test]
    fn test_zombie_matches_nothing() {
        let shows = shows();
        assert!(filter_shows(&shows, "zombie").is_empty());
    }

    #[test]
    fn test_query_keeps_raw_text() {
        let q = Query::new("Walking DEAD");
        assert_eq!(q.as_str(), "Walking DEAD");
        assert_eq!(q.needle(), "walking dead");
        assert!(!q.is_empty());
        assert!(Query::default().is_empty());
    }
}
