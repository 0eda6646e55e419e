//! HTML presentation of shows, episodes and the whole browser page.
//!
//! Names, labels and URLs are escaped. Summaries come from the data source as
//! HTML fragments and are inserted as-is.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::dropdown::{episode_code, DropdownOption};
use crate::models::{Episode, Show};
use crate::view::ViewKind;

/// Image shown when a record has none.
pub const PLACEHOLDER_IMAGE: &str = "resources/old-tv-static.jpg";
/// Summary shown when a record's summary is missing or empty.
pub const FALLBACK_SUMMARY: &str = "Check again later for latest updates!";

/// Fallback values used while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub placeholder_image: String,
    pub fallback_summary: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            fallback_summary: FALLBACK_SUMMARY.to_string(),
        }
    }
}

/// The records currently drawn in the root container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum Rendered {
    Shows(Vec<Show>),
    Episodes(Vec<Episode>),
}

impl Default for Rendered {
    fn default() -> Self {
        Self::Shows(Vec::new())
    }
}

impl Rendered {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Shows(_) => ViewKind::Shows,
            Self::Episodes(_) => ViewKind::Episodes,
        }
    }

    /// Number of blocks drawn.
    pub fn len(&self) -> usize {
        match self {
            Self::Shows(s) => s.len(),
            Self::Episodes(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Block headings in display order.
    pub fn titles(&self) -> Vec<String> {
        match self {
            Self::Shows(shows) => shows.iter().map(|s| s.name.clone()).collect(),
            Self::Episodes(eps) => eps.iter().map(crate::dropdown::episode_label).collect(),
        }
    }
}

/// Everything the page shows after one user action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub rendered: Rendered,
    /// Text of the search box.
    pub query: String,
    /// "Displaying : n / m shows" while a query is active.
    pub count_message: Option<String>,
    pub show_options: Vec<DropdownOption>,
    pub selected_show: String,
    pub episode_options: Vec<DropdownOption>,
    pub selected_episode: String,
    /// User-visible status, e.g. a failed fetch.
    pub status: Option<String>,
}

// ── Blocks ────────────────────────────────────────────────────────

/// Card for a single show.
pub fn show_block(show: &Show, opts: &RenderOptions) -> String {
    let image = show.image.as_deref().unwrap_or(&opts.placeholder_image);
    let rating = show
        .rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".into());
    let runtime = show
        .runtime
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".into());
    let status = if show.status.is_empty() {
        "N/A"
    } else {
        show.status.as_str()
    };

    let mut html = String::new();
    let _ = write!(
        html,
        "<div class=\"showBlock\">\
         <h2 class=\"showTitle\">{name}</h2><hr>\
         <img src=\"{image}\">\
         <div class=\"summary\">\
         <h3 class=\"summaryTitle\">Summary:</h3>\
         <div class=\"summaryText\">{summary}</div>",
        name = escape(&show.name),
        image = escape(image),
        summary = summary_or(show.summary.as_deref(), opts),
    );
    if let Some(url) = &show.url {
        let _ = write!(
            html,
            "<a class=\"showLink\" href=\"{}\" target=\"_blank\">More...</a>",
            escape(url)
        );
    }
    let _ = write!(
        html,
        "</div>\
         <div class=\"info\"><ul class=\"infoList\">\
         <li>Rating : {rating}</li>\
         <li>Genre : {genres}</li>\
         <li>Status : {status}</li>\
         <li>Runtime : {runtime}</li>\
         </ul></div></div>",
        genres = escape(&show.genres.join(", ")),
        status = escape(status),
    );
    html
}

/// Card for a single episode.
pub fn episode_block(episode: &Episode, opts: &RenderOptions) -> String {
    let image = episode.image.as_deref().unwrap_or(&opts.placeholder_image);
    format!(
        "<div class=\"episodeBlock\">\
         <h2 class=\"episodeTitle\">{code} - {name}</h2><hr>\
         <img src=\"{image}\">\
         <h3 class=\"summaryTitle\">Summary:</h3>\
         <div class=\"summaryText\">{summary}</div>\
         <a class=\"episodeLink\" href=\"{url}\" target=\"_blank\">More...</a>\
         </div>",
        code = episode_code(episode),
        name = escape(&episode.name),
        image = escape(image),
        summary = summary_or(episode.summary.as_deref(), opts),
        url = escape(&episode.url),
    )
}

/// Contents of the root container: one block per record.
pub fn render_list(rendered: &Rendered, opts: &RenderOptions) -> String {
    match rendered {
        Rendered::Shows(shows) => shows.iter().map(|s| show_block(s, opts)).collect(),
        Rendered::Episodes(eps) => eps.iter().map(|e| episode_block(e, opts)).collect(),
    }
}

// ── Page ──────────────────────────────────────────────────────────

/// A complete standalone HTML document for `frame`.
pub fn render_page(frame: &Frame, opts: &RenderOptions) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>TV Shows</title>\n<link rel=\"stylesheet\" href=\"style.css\">\n</head>\n<body>\n",
    );
    html.push_str("<header class=\"controls\">\n");
    html.push_str("<button class=\"allShows\">All shows</button>\n");
    push_select(&mut html, "showDropdown", &frame.show_options, &frame.selected_show);
    push_select(
        &mut html,
        "episodeDropdown",
        &frame.episode_options,
        &frame.selected_episode,
    );
    let _ = writeln!(
        html,
        "<input class=\"searchBar\" type=\"search\" placeholder=\"Search\" value=\"{}\">",
        escape(&frame.query)
    );
    let _ = writeln!(
        html,
        "<p id=\"numOfEpisodes\">{}</p>",
        escape(frame.count_message.as_deref().unwrap_or_default())
    );
    if let Some(status) = &frame.status {
        let _ = writeln!(html, "<p class=\"status\">{}</p>", escape(status));
    }
    html.push_str("</header>\n<div id=\"root\">");
    html.push_str(&render_list(&frame.rendered, opts));
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn push_select(html: &mut String, id: &str, options: &[DropdownOption], selected: &str) {
    let _ = writeln!(html, "<select id=\"{id}\">");
    for option in options {
        let marker = if option.value == selected { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{marker}>{}</option>",
            escape(&option.value),
            escape(&option.label)
        );
    }
    html.push_str("</select>\n");
}

fn summary_or<'a>(summary: Option<&'a str>, opts: &'a RenderOptions) -> &'a str {
    match summary {
        Some(s) if !s.trim().is_empty() => s,
        _ => &opts.fallback_summary,
    }
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_episode_block_fallbacks() {
        let mut ep = Episode::new(1, 1, "Pilot");
        ep.summary = Some(String::new());
        let html = episode_block(&ep, &RenderOptions::default());
        assert!(html.contains("S01E01 - Pilot"));
        assert!(html.contains(PLACEHOLDER_IMAGE));
        assert!(html.contains(FALLBACK_SUMMARY));
    }

    #[test]
    fn test_episode_block_keeps_summary_markup() {
        let mut ep = Episode::new(2, 10, "Tom & Jerry");
        ep.summary = Some("<p>Chase <b>scene</b></p>".into());
        ep.image = Some("https://img.example/ep.jpg".into());
        let html = episode_block(&ep, &RenderOptions::default());
        assert!(html.contains("<p>Chase <b>scene</b></p>"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("https://img.example/ep.jpg"));
        assert!(!html.contains(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_show_block_info() {
        let mut show = Show::new(1, "Lost");
        show.genres = vec!["Drama".into(), "Adventure".into()];
        show.status = "Ended".into();
        show.runtime = Some(60);
        show.rating = Some(8.5);
        let html = show_block(&show, &RenderOptions::default());
        assert!(html.contains("<li>Genre : Drama, Adventure</li>"));
        assert!(html.contains("<li>Rating : 8.5</li>"));
        assert!(html.contains("<li>Runtime : 60</li>"));
        assert!(html.contains("<li>Status : Ended</li>"));
        assert!(html.contains(FALLBACK_SUMMARY));
        assert!(!html.contains("showLink"));
    }

    #[test]
    fn test_show_block_missing_numbers() {
        let html = show_block(&Show::new(1, "Lost"), &RenderOptions::default());
        assert!(html.contains("<li>Rating : N/A</li>"));
        assert!(html.contains("<li>Runtime : N/A</li>"));
    }

    #[test]
    fn test_custom_fallbacks() {
        let opts = RenderOptions {
            placeholder_image: "static.png".into(),
            fallback_summary: "Nothing yet".into(),
        };
        let html = episode_block(&Episode::new(1, 1, "Pilot"), &opts);
        assert!(html.contains("static.png"));
        assert!(html.contains("Nothing yet"));
    }

    #[test]
    fn test_render_list_one_block_per_record() {
        let rendered = Rendered::Shows(vec![Show::new(2, "Alias"), Show::new(1, "Lost")]);
        let html = render_list(&rendered, &RenderOptions::default());
        assert_eq!(count(&html, "class=\"showBlock\""), 2);
        assert!(html.find("Alias").unwrap() < html.find("Lost").unwrap());
        assert_eq!(rendered.titles(), ["Alias", "Lost"]);
    }

    #[test]
    fn test_render_page_marks_selection() {
        let frame = Frame {
            rendered: Rendered::Episodes(vec![Episode::new(1, 1, "Pilot")]),
            query: "pil".into(),
            count_message: Some("Displaying : 1 / 1 episodes".into()),
            show_options: vec![
                DropdownOption {
                    label: "Select a show".into(),
                    value: String::new(),
                },
                DropdownOption {
                    label: "Alias".into(),
                    value: "2".into(),
                },
            ],
            selected_show: "2".into(),
            episode_options: Vec::new(),
            selected_episode: String::new(),
            status: Some("Failed to load episodes".into()),
        };
        let html = render_page(&frame, &RenderOptions::default());
        assert!(html.contains("<option value=\"2\" selected>Alias</option>"));
        assert!(html.contains("value=\"pil\""));
        assert!(html.contains("Displaying : 1 / 1 episodes"));
        assert!(html.contains("<p class=\"status\">Failed to load episodes</p>"));
        assert_eq!(count(&html, "class=\"episodeBlock\""), 1);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
