use serde::{Deserialize, Serialize};

use super::{AnimeDetails, AnimeId, Genre};
use crate::cdn::Cdn;

/// Render shape for favorites and the watching list: the anime's info
/// fields plus its genres and a resolved poster URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeView {
    pub id: AnimeId,
    pub title: String,
    pub slug: String,
    pub synopsis: Option<String>,
    pub status: Option<u8>,
    #[serde(rename = "type")]
    pub kind: Option<u8>,
    pub score: Option<f32>,
    pub episode_count: Option<u32>,
    pub episode_length: Option<u32>,
    pub started_airing_date: Option<String>,
    pub finished_airing_date: Option<String>,
    pub age_rating: Option<String>,
    pub genres: Vec<Genre>,
    pub poster: String,
}

impl AnimeView {
    pub fn from_details(details: &AnimeDetails, cdn: &Cdn) -> Self {
        let info = &details.info;
        Self {
            id: info.id,
            title: info.title.clone(),
            slug: info.slug.clone(),
            synopsis: info.synopsis.clone(),
            status: info.status,
            kind: info.kind,
            score: info.score,
            episode_count: info.episode_count,
            episode_length: info.episode_length,
            started_airing_date: info.started_airing_date.clone(),
            finished_airing_date: info.finished_airing_date.clone(),
            age_rating: info.age_rating.clone(),
            genres: details.genres.clone(),
            poster: cdn.poster_url(&details.poster),
        }
    }
}
