//! Show and episode selection widgets.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{Episode, Show, ShowId};

/// Label of the show dropdown's "no show" entry.
pub const SHOW_SENTINEL: &str = "Select a show";
/// Label of the episode dropdown's "every episode" entry.
pub const EPISODE_SENTINEL: &str = "All episodes";
/// Value carried by both sentinel entries.
pub const SENTINEL_VALUE: &str = "";

/// A single `<option>` of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    fn sentinel(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: SENTINEL_VALUE.to_string(),
        }
    }
}

// ── Keys & choices ────────────────────────────────────────────────

/// Identifies an episode within the loaded show.
///
/// Serialized as `show:season:number` for use as a dropdown value. Episodes
/// that share a season and number (unnumbered specials) are told apart by
/// `occurrence`, their position among those duplicates, which is appended
/// as a fourth field when non-zero: `show:season:number:occurrence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeKey {
    pub show_id: ShowId,
    pub season: u32,
    pub number: u32,
    #[serde(default)]
    pub occurrence: u32,
}

impl EpisodeKey {
    pub fn new(show_id: ShowId, season: u32, number: u32) -> Self {
        Self {
            show_id,
            season,
            number,
            occurrence: 0,
        }
    }
}

impl std::fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.show_id, self.season, self.number)?;
        if self.occurrence > 0 {
            write!(f, ":{}", self.occurrence)?;
        }
        Ok(())
    }
}

impl FromStr for EpisodeKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidSelection(format!("not an episode key: {s:?}"));
        let parts: Vec<&str> = s.split(':').collect();
        let (show, season, number, occurrence) = match parts.as_slice() {
            [show, season, number] => (show, season, number, "0"),
            [show, season, number, occurrence] => (show, season, number, *occurrence),
            _ => return Err(invalid()),
        };
        Ok(Self {
            show_id: show.parse().map_err(|_| invalid())?,
            season: season.parse().map_err(|_| invalid())?,
            number: number.parse().map_err(|_| invalid())?,
            occurrence: occurrence.parse().map_err(|_| invalid())?,
        })
    }
}

/// Keys for `episodes` of `show_id`, in list order. Every key is unique
/// within the list.
pub fn episode_keys(show_id: ShowId, episodes: &[Episode]) -> Vec<EpisodeKey> {
    let mut seen: HashMap<(u32, u32), u32> = HashMap::new();
    episodes
        .iter()
        .map(|episode| {
            let count = seen.entry((episode.season, episode.number)).or_insert(0);
            let key = EpisodeKey {
                occurrence: *count,
                ..EpisodeKey::new(show_id, episode.season, episode.number)
            };
            *count += 1;
            key
        })
        .collect()
}

/// Current value of the show dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowChoice {
    #[default]
    All,
    Show(ShowId),
}

impl ShowChoice {
    pub fn value(self) -> String {
        match self {
            Self::All => SENTINEL_VALUE.to_string(),
            Self::Show(id) => id.to_string(),
        }
    }
}

/// Current value of the episode dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodeChoice {
    #[default]
    All,
    Episode(EpisodeKey),
}

impl EpisodeChoice {
    pub fn value(self) -> String {
        match self {
            Self::All => SENTINEL_VALUE.to_string(),
            Self::Episode(key) => key.to_string(),
        }
    }
}

// ── Show dropdown ─────────────────────────────────────────────────

/// One option per show plus the "Select a show" sentinel.
#[derive(Debug, Clone)]
pub struct ShowDropdown {
    options: Vec<DropdownOption>,
    selected: ShowChoice,
}

impl Default for ShowDropdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowDropdown {
    pub fn new() -> Self {
        Self {
            options: vec![DropdownOption::sentinel(SHOW_SENTINEL)],
            selected: ShowChoice::All,
        }
    }

    /// Rebuild the options from `shows` and select the sentinel.
    pub fn populate(&mut self, shows: &[Show]) {
        self.options = std::iter::once(DropdownOption::sentinel(SHOW_SENTINEL))
            .chain(shows.iter().map(|show| DropdownOption {
                label: show.name.clone(),
                value: show.id.to_string(),
            }))
            .collect();
        self.selected = ShowChoice::All;
    }

    /// Parse a dropdown value and make it the selection.
    ///
    /// Values that are not among the options are rejected and the previous
    /// selection is kept.
    pub fn select(&mut self, value: &str) -> Result<ShowChoice, CoreError> {
        let choice = if value == SENTINEL_VALUE {
            ShowChoice::All
        } else {
            let id: ShowId = value
                .trim()
                .parse()
                .map_err(|_| CoreError::InvalidSelection(format!("not a show id: {value:?}")))?;
            if !self.options.iter().any(|o| o.value == id.to_string()) {
                return Err(CoreError::InvalidSelection(format!("unknown show id: {id}")));
            }
            ShowChoice::Show(id)
        };
        self.selected = choice;
        Ok(choice)
    }

    /// Return to the sentinel without touching the options.
    pub fn reset(&mut self) {
        self.selected = ShowChoice::All;
    }

    /// Put back a previously valid selection, e.g. after a failed fetch.
    pub fn restore(&mut self, choice: ShowChoice) {
        self.selected = choice;
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn selected(&self) -> ShowChoice {
        self.selected
    }
}

// ── Episode dropdown ──────────────────────────────────────────────

/// One option per loaded episode plus the "All episodes" sentinel.
#[derive(Debug, Clone)]
pub struct EpisodeDropdown {
    options: Vec<DropdownOption>,
    selected: EpisodeChoice,
}

impl Default for EpisodeDropdown {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeDropdown {
    pub fn new() -> Self {
        Self {
            options: vec![DropdownOption::sentinel(EPISODE_SENTINEL)],
            selected: EpisodeChoice::All,
        }
    }

    /// Rebuild the options from the episodes of `show_id`: one per episode.
    pub fn populate(&mut self, show_id: ShowId, episodes: &[Episode]) {
        let mut options = vec![DropdownOption::sentinel(EPISODE_SENTINEL)];
        options.extend(
            episode_keys(show_id, episodes)
                .into_iter()
                .zip(episodes)
                .map(|(key, episode)| DropdownOption {
                    label: episode_label(episode),
                    value: key.to_string(),
                }),
        );
        tracing::debug!(show_id, count = options.len() - 1, "Populated episode dropdown");
        self.options = options;
        self.selected = EpisodeChoice::All;
    }

    /// Back to the empty state: sentinel only.
    pub fn reset(&mut self) {
        self.options = vec![DropdownOption::sentinel(EPISODE_SENTINEL)];
        self.selected = EpisodeChoice::All;
    }

    /// Select the sentinel, keeping the options.
    pub fn select_all(&mut self) {
        self.selected = EpisodeChoice::All;
    }

    /// Parse a dropdown value and make it the selection.
    pub fn select(&mut self, value: &str) -> Result<EpisodeChoice, CoreError> {
        let choice = if value == SENTINEL_VALUE {
            EpisodeChoice::All
        } else {
            let key: EpisodeKey = value.trim().parse()?;
            if !self.options.iter().any(|o| o.value == key.to_string()) {
                return Err(CoreError::InvalidSelection(format!("unknown episode: {key}")));
            }
            EpisodeChoice::Episode(key)
        };
        self.selected = choice;
        Ok(choice)
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn selected(&self) -> EpisodeChoice {
        self.selected
    }
}

// ── Labels ────────────────────────────────────────────────────────

/// Left-pad `num` with zeros, following the legacy episode-code helper.
///
/// Numbers shorter than `places` are padded to `places` digits and numbers
/// longer than `places` are left alone, but a number exactly `places` digits
/// long gains one extra zero (`zero_pad(12, 2) == "012"`). That off-by-one is
/// legacy behaviour. Episode labels use [`episode_code`], which treats the
/// width as a plain minimum.
pub fn zero_pad(num: u64, places: usize) -> String {
    let digits = num.to_string();
    let pad = match digits.len().cmp(&places) {
        std::cmp::Ordering::Less => places - digits.len(),
        std::cmp::Ordering::Equal => 1,
        std::cmp::Ordering::Greater => 0,
    };
    format!("{}{digits}", "0".repeat(pad))
}

/// `S05E12`-style code with two-digit minimum fields.
pub fn episode_code(episode: &Episode) -> String {
    format!("S{:02}E{:02}", episode.season, episode.number)
}

/// `S01E01 - Pilot`.
pub fn episode_label(episode: &Episode) -> String {
    format!("{} - {}", episode_code(episode), episode.name)
}
