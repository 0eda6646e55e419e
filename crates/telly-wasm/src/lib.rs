//! Browser bindings for the catalog core.
//!
//! Records cross the boundary as JSON strings in the `telly_core::models`
//! shape. Malformed input yields `"[]"` for list results and an empty string
//! for text results.

use wasm_bindgen::prelude::*;

use telly_core::catalog::sort_by_name;
use telly_core::dropdown;
use telly_core::filter::{self, Query};
use telly_core::models::{Episode, Show};
use telly_core::render::{render_list, RenderOptions, Rendered};
use telly_core::view::{self, ViewKind};

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Option<T> {
    serde_json::from_str(json).ok()
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen]
pub fn filter_shows(shows_json: &str, query: &str) -> String {
    match parse::<Vec<Show>>(shows_json) {
        Some(shows) => to_json(&filter::filter_shows(&shows, query)),
        None => "[]".to_string(),
    }
}

#[wasm_bindgen]
pub fn filter_episodes(episodes_json: &str, query: &str) -> String {
    match parse::<Vec<Episode>>(episodes_json) {
        Some(episodes) => to_json(&filter::filter_episodes(&episodes, query)),
        None => "[]".to_string(),
    }
}

/// Case-insensitive stable sort by show name.
#[wasm_bindgen]
pub fn sort_shows(shows_json: &str) -> String {
    match parse::<Vec<Show>>(shows_json) {
        Some(mut shows) => {
            sort_by_name(&mut shows);
            to_json(&shows)
        }
        None => "[]".to_string(),
    }
}

#[wasm_bindgen]
pub fn zero_pad(num: u32, places: u32) -> String {
    dropdown::zero_pad(u64::from(num), places as usize)
}

#[wasm_bindgen]
pub fn episode_label(episode_json: &str) -> String {
    parse::<Episode>(episode_json)
        .map(|episode| dropdown::episode_label(&episode))
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn render_shows(shows_json: &str) -> String {
    parse::<Vec<Show>>(shows_json)
        .map(|shows| render_list(&Rendered::Shows(shows), &RenderOptions::default()))
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn render_episodes(episodes_json: &str) -> String {
    parse::<Vec<Episode>>(episodes_json)
        .map(|episodes| render_list(&Rendered::Episodes(episodes), &RenderOptions::default()))
        .unwrap_or_default()
}

/// `kind` is "shows" or "episodes". Empty when the query is empty or the
/// kind is unknown.
#[wasm_bindgen]
pub fn count_message(kind: &str, shown: u32, total: u32, query: &str) -> String {
    let Ok(kind) = kind.parse::<ViewKind>() else {
        return String::new();
    };
    view::count_message(kind, shown as usize, total as usize, &Query::new(query))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOWS: &str = r#"[
        {"id":1,"name":"Lost","genres":["Drama"],"summary":"<p>Island.</p>"},
        {"id":2,"name":"alias","genres":["Action"]}
    ]"#;

    const EPISODES: &str = r#"[
        {"season":1,"number":1,"name":"Pilot","summary":"<p>Crash.</p>"},
        {"season":1,"number":2,"name":"Tabula Rasa"}
    ]"#;

    fn names(json: &str) -> Vec<String> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json).unwrap();
        values
            .iter()
            .map(|v| v["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_filter_shows() {
        assert_eq!(names(&filter_shows(SHOWS, "")), ["Lost", "alias"]);
        assert_eq!(names(&filter_shows(SHOWS, "ISLAND")), ["Lost"]);
        assert_eq!(names(&filter_shows(SHOWS, "action")), ["alias"]);
        assert_eq!(filter_shows("not json", "x"), "[]");
    }

    #[test]
    fn test_filter_episodes() {
        assert_eq!(names(&filter_episodes(EPISODES, "rasa")), ["Tabula Rasa"]);
        assert_eq!(names(&filter_episodes(EPISODES, "crash")), ["Pilot"]);
        assert_eq!(filter_episodes("{", ""), "[]");
    }

    #[test]
    fn test_sort_shows() {
        assert_eq!(names(&sort_shows(SHOWS)), ["alias", "Lost"]);
        assert_eq!(sort_shows("null"), "[]");
    }

    #[test]
    fn test_zero_pad_and_label() {
        assert_eq!(zero_pad(5, 2), "05");
        assert_eq!(zero_pad(12, 2), "012");
        assert_eq!(zero_pad(100, 2), "100");
        assert_eq!(
            episode_label(r#"{"season":1,"number":1,"name":"Pilot"}"#),
            "S01E01 - Pilot"
        );
        assert_eq!(episode_label("[]"), "");
    }

    #[test]
    fn test_render() {
        let html = render_shows(SHOWS);
        assert!(html.contains("Lost"));
        assert!(html.contains("Check again later for latest updates!"));
        assert!(render_episodes(EPISODES).contains("S01E02"));
        assert_eq!(render_shows("oops"), "");
    }

    #[test]
    fn test_count_message() {
        assert_eq!(count_message("shows", 0, 2, "zombie"), "Displaying : 0 / 2 shows");
        assert_eq!(count_message("episodes", 3, 73, "a"), "Displaying : 3 / 73 episodes");
        assert_eq!(count_message("shows", 2, 2, ""), "");
        assert_eq!(count_message("movies", 1, 1, "a"), "");
    }
}
