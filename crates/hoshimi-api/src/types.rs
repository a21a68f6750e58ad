use serde::{Deserialize, Serialize};

pub type AnimeId = u64;
pub type GenreId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

// ── Catalog ─────────────────────────────────────────────────────

/// Poster object attached to catalog entries. Only `file` is used to build URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: AnimeId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(default, rename = "type")]
    pub kind: Option<u8>,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub started_airing_date: Option<String>,
    #[serde(default)]
    pub finished_airing_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub poster: PosterFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub data: Vec<CatalogEntry>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
}

// ── Releases ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAnime {
    pub id: AnimeId,
    pub title: String,
    pub slug: String,
    /// Bare poster file name, not an object.
    pub poster: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEvent {
    pub anime: ReleaseAnime,
    pub created_at: String,
    pub episode: u32,
}

// ── Details ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeInfo {
    pub id: AnimeId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(default, rename = "type")]
    pub kind: Option<u8>,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub episode_length: Option<u32>,
    #[serde(default)]
    pub started_airing_date: Option<String>,
    #[serde(default)]
    pub finished_airing_date: Option<String>,
    #[serde(default)]
    pub age_rating: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub id: u64,
    pub episode: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub aired: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub info: EpisodeInfo,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Playback position in seconds. Never sent by the API; tracked client-side.
    #[serde(default)]
    pub current_time: Option<f64>,
}

/// Extended per-anime record returned by the details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetails {
    pub info: AnimeInfo,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Bare poster file name.
    pub poster: String,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl AnimeDetails {
    pub fn id(&self) -> AnimeId {
        self.info.id
    }
}

// ── Video links ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorHost {
    pub name: String,
    pub embed_prefix: String,
    #[serde(default)]
    pub embed_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub id: u64,
    pub host_id: u64,
    pub embed_id: String,
    pub quality: u32,
    pub host: MirrorHost,
}

impl Mirror {
    /// Full embed URL for this mirror.
    pub fn embed_url(&self) -> String {
        format!(
            "{}{}{}",
            self.host.embed_prefix,
            self.embed_id,
            self.host.embed_suffix.as_deref().unwrap_or_default()
        )
    }
}

pub type VideoLinkSet = Vec<Mirror>;
