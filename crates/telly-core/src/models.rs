use serde::{Deserialize, Serialize};

/// Source-assigned show identifier.
pub type ShowId = u64;

/// A television series as returned by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    /// Poster URL (medium size when available).
    pub image: Option<String>,
    /// HTML-bearing summary text.
    pub summary: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: String,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Average rating.
    pub rating: Option<f32>,
    /// Detail page on the source site.
    pub url: Option<String>,
}

impl Show {
    pub fn new(id: ShowId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
            summary: None,
            genres: Vec::new(),
            status: String::new(),
            runtime: None,
            rating: None,
            url: None,
        }
    }

    /// Summary text, or an empty string when absent.
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }
}

/// A single episode of the currently loaded show.
///
/// The owning show is not stored here; the catalog records which show the
/// loaded episode list belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    /// Episode number within the season. Unnumbered specials use 0.
    #[serde(default)]
    pub number: u32,
    pub name: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub url: String,
}

impl Episode {
    pub fn new(season: u32, number: u32, name: impl Into<String>) -> Self {
        Self {
            season,
            number,
            name: name.into(),
            image: None,
            summary: None,
            url: String::new(),
        }
    }

    /// Summary text, or an empty string when absent.
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }
}
