//! Fixtures and a fake catalog API shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use hoshimi_api::traits::{CatalogApi, CatalogQuery};
use hoshimi_api::types::{
    AnimeInfo, CatalogEntry, CatalogPage, EpisodeInfo, MirrorHost, PosterFile, ReleaseAnime,
    ReleaseEvent,
};

use crate::cdn::Cdn;
use crate::models::{Anime, AnimeDetails, AnimeId, Episode, Genre, Mirror, VideoLinkSet};

pub fn catalog_entry(id: AnimeId, title: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        title: title.into(),
        slug: format!("{id}-{}", title.to_lowercase().replace(' ', "-")),
        status: Some(0),
        kind: Some(0),
        score: Some(4.5),
        episode_count: Some(12),
        started_airing_date: Some("2005-10-22".into()),
        finished_airing_date: None,
        genres: vec![Genre {
            id: 4,
            name: "Drama".into(),
        }],
        poster: PosterFile {
            id: None,
            path: Some("poster".into()),
            extension: Some("jpg".into()),
            file: format!("poster-{id}.jpg"),
        },
    }
}

pub fn anime(id: AnimeId, title: &str) -> Anime {
    Anime::from_entry(catalog_entry(id, title), &Cdn::default())
}

pub fn release_event(id: AnimeId, episode: u32) -> ReleaseEvent {
    ReleaseEvent {
        anime: ReleaseAnime {
            id,
            title: format!("Anime {id}"),
            slug: format!("{id}-anime"),
            poster: format!("release-{id}.jpg"),
        },
        created_at: "2024-01-12 17:04:11".into(),
        episode,
    }
}

pub fn details(id: AnimeId, title: &str, episodes: u32) -> AnimeDetails {
    AnimeDetails {
        info: AnimeInfo {
            id,
            title: title.into(),
            slug: format!("{id}-{}", title.to_lowercase().replace(' ', "-")),
            synopsis: None,
            status: Some(1),
            kind: Some(0),
            score: Some(4.2),
            episode_count: Some(episodes),
            episode_length: Some(24),
            started_airing_date: None,
            finished_airing_date: None,
            age_rating: Some("PG-13".into()),
        },
        synonyms: vec![],
        genres: vec![Genre {
            id: 4,
            name: "Drama".into(),
        }],
        poster: format!("poster-{id}.jpg"),
        episodes: (1..=episodes)
            .map(|n| Episode {
                info: EpisodeInfo {
                    id: id * 1000 + n as u64,
                    episode: n.to_string(),
                    title: None,
                    aired: None,
                    duration: Some(24),
                    description: None,
                },
                thumbnail: None,
                current_time: None,
            })
            .collect(),
    }
}

pub fn mirror(id: u64) -> Mirror {
    Mirror {
        id,
        host_id: 1,
        embed_id: format!("embed{id}"),
        quality: 720,
        host: MirrorHost {
            name: "Stream".into(),
            embed_prefix: "https://stream.example/e/".into(),
            embed_suffix: None,
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FakeError {
    #[error("service unavailable")]
    Unavailable,
    #[error("anime {0} not found")]
    NotFound(AnimeId),
}

/// In-memory [`CatalogApi`] that records every catalog query it receives.
#[derive(Default)]
pub struct FakeApi {
    catalog: Vec<CatalogEntry>,
    details: HashMap<AnimeId, AnimeDetails>,
    fail: bool,
    queries: Mutex<Vec<CatalogQuery>>,
}

impl FakeApi {
    pub fn with_catalog(catalog: Vec<CatalogEntry>) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    pub fn failing(self) -> Self {
        Self { fail: true, ..self }
    }

    pub fn insert_details(&mut self, details: AnimeDetails) {
        self.details.insert(details.id(), details);
    }

    pub fn queries(&self) -> Vec<CatalogQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), FakeError> {
        if self.fail {
            Err(FakeError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl CatalogApi for FakeApi {
    type Error = FakeError;

    async fn animes(&self, query: &CatalogQuery) -> Result<CatalogPage, FakeError> {
        self.queries.lock().unwrap().push(query.clone());
        self.check()?;
        Ok(CatalogPage {
            data: self.catalog.clone(),
            current_page: Some(query.page),
            last_page: Some(query.page),
            total: Some(self.catalog.len() as u32),
        })
    }

    async fn releases(&self) -> Result<Vec<ReleaseEvent>, FakeError> {
        self.check()?;
        Ok(vec![release_event(1, 12)])
    }

    async fn anime_details(&self, anime_id: AnimeId) -> Result<AnimeDetails, FakeError> {
        self.check()?;
        self.details
            .get(&anime_id)
            .cloned()
            .ok_or(FakeError::NotFound(anime_id))
    }

    async fn video_links(&self, _slug: &str, _episode: u32) -> Result<VideoLinkSet, FakeError> {
        self.check()?;
        Ok(vec![mirror(1)])
    }
}
