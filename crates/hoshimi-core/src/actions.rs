//! Asynchronous actions: one API call each, followed by commits.
//!
//! API failures are returned to the caller unchanged. Nothing is committed
//! for a failed call.

use hoshimi_api::traits::{CatalogApi, CatalogQuery, SortOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{Anime, AnimeDetails, AnimeId, GenreId, Release, VideoLinkSet};
use crate::mutation::Mutation;
use crate::store::Store;

/// Caller-supplied catalog parameters, merged over the defaults
/// (`order = score_desc`, `page = 1`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogParams {
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub genres: Option<Vec<GenreId>>,
    pub search: Option<String>,
}

impl CatalogParams {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn into_query(self) -> CatalogQuery {
        let defaults = CatalogQuery::default();
        CatalogQuery {
            order: self.order.unwrap_or(defaults.order),
            page: self.page.unwrap_or(defaults.page),
            genres: self.genres,
            search: self.search,
        }
    }
}

impl Store {
    /// Fetch a catalog page.
    ///
    /// Preferred genres are added as a filter unless a search term is present,
    /// either in `params` or in the store's search query. An empty search
    /// query counts as absent. Search results land
    /// in `searched_animes`, browse results in `animes`. The search query is
    /// cleared afterwards.
    pub async fn get_animes<A: CatalogApi>(
        &self,
        api: &A,
        params: CatalogParams,
    ) -> Result<Vec<Anime>, A::Error> {
        let mut query = params.into_query();
        let (preferred, query_pending) = self
            .read(|s| {
                let pending = s.search_query.as_deref().is_some_and(|q| !q.is_empty());
                (s.preferred_genres.clone(), pending)
            })
            .await;
        if !preferred.is_empty() && !query.is_search() && !query_pending {
            query.genres = Some(preferred);
        }
        debug!(?query, "fetching catalog");

        let page = api.animes(&query).await?;
        let animes: Vec<Anime> = page
            .data
            .into_iter()
            .map(|entry| Anime::from_entry(entry, self.cdn()))
            .collect();

        if query.is_search() {
            self.commit(Mutation::SetSearchedAnimes(animes.clone())).await;
        } else {
            self.commit(Mutation::SetAnimes(animes.clone())).await;
        }
        self.commit(Mutation::UpdateSearchQuery(None)).await;

        info!(count = animes.len(), search = query.is_search(), "catalog loaded");
        Ok(animes)
    }

    /// Fetch the latest releases into `last_releases`.
    ///
    /// Success carries no value; read the releases from state.
    pub async fn get_last_releases<A: CatalogApi>(&self, api: &A) -> Result<(), A::Error> {
        let events = api.releases().await?;
        let releases: Vec<Release> = events
            .into_iter()
            .map(|event| Release::from_event(event, self.cdn()))
            .collect();
        info!(count = releases.len(), "releases loaded");
        self.commit(Mutation::SetLastReleases(releases)).await;
        Ok(())
    }

    /// Fetch an anime's detail record, store it and make it the current anime.
    ///
    /// Watch times already recorded for this anime survive the refresh, and
    /// the returned record includes them.
    pub async fn get_anime_details<A: CatalogApi>(
        &self,
        api: &A,
        anime_id: AnimeId,
    ) -> Result<AnimeDetails, A::Error> {
        let mut details = api.anime_details(anime_id).await?;
        for episode in &mut details.episodes {
            episode.current_time = None;
        }
        debug!(anime_id, episodes = details.episodes.len(), "anime details fetched");

        self.commit(Mutation::AddAnimeDetails {
            id: anime_id,
            data: details.clone(),
        })
        .await;
        let merged = self
            .read(|s| s.animes_w_details.get(&anime_id).cloned())
            .await
            .unwrap_or(details);
        self.commit(Mutation::SetCurrentAnime(Some(merged.clone())))
            .await;
        Ok(merged)
    }

    /// Fetch the mirrors for one episode. Nothing is committed.
    pub async fn get_video_links<A: CatalogApi>(
        &self,
        api: &A,
        slug: &str,
        episode: u32,
    ) -> Result<VideoLinkSet, A::Error> {
        api.video_links(slug, episode).await
    }

    /// Fetch the mirrors for one episode and make them the current link set.
    pub async fn load_video_links<A: CatalogApi>(
        &self,
        api: &A,
        slug: &str,
        episode: u32,
    ) -> Result<VideoLinkSet, A::Error> {
        let links = self.get_video_links(api, slug, episode).await?;
        self.commit(Mutation::SetCurrentVideoLinks(Some(links.clone())))
            .await;
        Ok(links)
    }
}
