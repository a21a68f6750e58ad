//! The catalog API interface.
//!
//! The store only talks to the remote catalog through [`CatalogApi`], so the
//! HTTP client can be swapped for a fake in tests or another backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::types::{AnimeDetails, AnimeId, CatalogPage, GenreId, ReleaseEvent, VideoLinkSet};

/// A remote anime catalog.
pub trait CatalogApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one page of the catalog, filtered and ordered by `query`.
    fn animes(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<CatalogPage, Self::Error>> + Send;

    /// Fetch the most recent episode releases.
    fn releases(&self) -> impl Future<Output = Result<Vec<ReleaseEvent>, Self::Error>> + Send;

    /// Fetch the extended record (info, genres, episodes) for one anime.
    fn anime_details(
        &self,
        anime_id: AnimeId,
    ) -> impl Future<Output = Result<AnimeDetails, Self::Error>> + Send;

    /// Fetch the streaming mirrors for one episode.
    fn video_links(
        &self,
        slug: &str,
        episode: u32,
    ) -> impl Future<Output = Result<VideoLinkSet, Self::Error>> + Send;
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    ScoreDesc,
    Score,
    Title,
    TitleDesc,
}

impl SortOrder {
    pub const ALL: &[SortOrder] = &[Self::ScoreDesc, Self::Score, Self::Title, Self::TitleDesc];

    /// Wire representation used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScoreDesc => "score_desc",
            Self::Score => "score",
            Self::Title => "title",
            Self::TitleDesc => "title_desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| format!("unknown sort order: {s}"))
    }
}

/// Outgoing parameters of a catalog request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub order: SortOrder,
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<GenreId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            order: SortOrder::ScoreDesc,
            page: 1,
            genres: None,
            search: None,
        }
    }
}

impl CatalogQuery {
    /// Whether this request is a title search rather than a browse.
    pub fn is_search(&self) -> bool {
        self.search.is_some()
    }

    /// Query string pairs. Genres are sent comma-joined; absent fields are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("order", self.order.as_str().to_string()),
            ("page", self.page.to_string()),
        ];
        if let Some(ref genres) = self.genres {
            let joined = genres
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("genres", joined));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}
