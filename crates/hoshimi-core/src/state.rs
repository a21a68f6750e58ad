use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Anime, AnimeDetails, AnimeId, GenreId, Release, VideoLinkSet};
use crate::seed::StaffPick;

/// Player window presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    #[default]
    Normal,
    Mini,
    Fullscreen,
}

impl WindowMode {
    pub const ALL: &[WindowMode] = &[Self::Normal, Self::Mini, Self::Fullscreen];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Mini => "mini",
            Self::Fullscreen => "fullscreen",
        }
    }
}

impl std::fmt::Display for WindowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WindowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown window mode: {s}"))
    }
}

/// The whole client state tree. Persisted as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    /// Browse results; `None` until the first catalog fetch.
    pub animes: Option<Vec<Anime>>,
    pub last_releases: Option<Vec<Release>>,
    pub current_anime: Option<AnimeDetails>,
    pub staff_picks: Vec<StaffPick>,
    pub current_anime_video_links: Option<VideoLinkSet>,
    pub animes_w_details: BTreeMap<AnimeId, AnimeDetails>,
    pub preferred_genres: Vec<GenreId>,
    pub favorite_animes: Vec<AnimeDetails>,
    pub watching_animes: BTreeMap<AnimeId, AnimeDetails>,
    pub searched_animes: Vec<Anime>,
    pub search_query: Option<String>,
    pub window_mode: WindowMode,
}

impl State {
    pub fn new(staff_picks: Vec<StaffPick>) -> Self {
        Self {
            staff_picks,
            ..Default::default()
        }
    }

    pub fn is_favorite(&self, anime_id: AnimeId) -> bool {
        self.favorite_animes.iter().any(|a| a.id() == anime_id)
    }

    pub fn is_watching(&self, anime_id: AnimeId) -> bool {
        self.watching_animes.contains_key(&anime_id)
    }
}
