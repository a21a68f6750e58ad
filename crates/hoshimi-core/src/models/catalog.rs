use hoshimi_api::types::{CatalogEntry, ReleaseEvent};
use serde::{Deserialize, Serialize};

use super::{AnimeId, Genre};
use crate::cdn::Cdn;

/// A catalog entry as held in the store: the API record with its poster
/// object replaced by a fully-qualified URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub id: AnimeId,
    pub title: String,
    pub slug: String,
    pub status: Option<u8>,
    #[serde(rename = "type")]
    pub kind: Option<u8>,
    pub score: Option<f32>,
    pub episode_count: Option<u32>,
    pub started_airing_date: Option<String>,
    pub finished_airing_date: Option<String>,
    pub genres: Vec<Genre>,
    pub poster: String,
}

impl Anime {
    pub fn from_entry(entry: CatalogEntry, cdn: &Cdn) -> Self {
        Self {
            poster: cdn.poster_url(&entry.poster.file),
            id: entry.id,
            title: entry.title,
            slug: entry.slug,
            status: entry.status,
            kind: entry.kind,
            score: entry.score,
            episode_count: entry.episode_count,
            started_airing_date: entry.started_airing_date,
            finished_airing_date: entry.finished_airing_date,
            genres: entry.genres,
        }
    }
}

/// A recent episode release, flattened from the release event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: AnimeId,
    pub title: String,
    pub slug: String,
    pub poster: String,
    pub released_at: String,
    pub episode_number: u32,
}

impl Release {
    pub fn from_event(event: ReleaseEvent, cdn: &Cdn) -> Self {
        Self {
            poster: cdn.poster_url(&event.anime.poster),
            id: event.anime.id,
            title: event.anime.title,
            slug: event.anime.slug,
            released_at: event.created_at,
            episode_number: event.episode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_anime_from_entry_uses_poster_file() {
        let anime = Anime::from_entry(testing::catalog_entry(7, "Mushishi"), &Cdn::default());
        assert_eq!(anime.id, 7);
        assert_eq!(anime.poster, "https://cdn.masterani.me/poster/1/poster-7.jpg");
    }

    #[test]
    fn test_release_from_event() {
        let release = Release::from_event(testing::release_event(7, 12), &Cdn::default());
        assert_eq!(release.id, 7);
        assert_eq!(release.episode_number, 12);
        assert_eq!(release.released_at, "2024-01-12 17:04:11");
        assert_eq!(release.poster, "https://cdn.masterani.me/poster/1/release-7.jpg");
    }
}
