use serde::Deserialize;

use telly_core::models::{Episode, Show};

// ── Shows ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TvMazeShow {
    pub id: u64,
    pub name: String,
    pub url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub runtime: Option<u32>,
    pub rating: Option<TvMazeRating>,
    pub image: Option<TvMazeImage>,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TvMazeRating {
    pub average: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct TvMazeImage {
    pub medium: Option<String>,
    pub original: Option<String>,
}

impl TvMazeImage {
    fn best(self) -> Option<String> {
        self.medium.or(self.original)
    }
}

impl TvMazeShow {
    pub fn into_show(self) -> Show {
        Show {
            id: self.id,
            name: self.name,
            image: self.image.and_then(TvMazeImage::best),
            summary: self.summary,
            genres: self.genres,
            status: self.status.unwrap_or_default(),
            runtime: self.runtime,
            rating: self.rating.and_then(|r| r.average),
            url: self.url,
        }
    }
}

// ── Episodes ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TvMazeEpisode {
    pub url: Option<String>,
    pub name: String,
    pub season: u32,
    /// `null` for specials.
    pub number: Option<u32>,
    pub image: Option<TvMazeImage>,
    pub summary: Option<String>,
}

impl TvMazeEpisode {
    pub fn into_episode(self) -> Episode {
        Episode {
            season: self.season,
            number: self.number.unwrap_or(0),
            name: self.name,
            image: self.image.and_then(TvMazeImage::best),
            summary: self.summary,
            url: self.url.unwrap_or_default(),
        }
    }
}
