use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::traits::{CatalogApi, CatalogQuery};
use crate::types::{AnimeDetails, AnimeId, CatalogPage, ReleaseEvent, VideoLinkSet};

pub const DEFAULT_BASE_URL: &str = "https://www.masterani.me/api/";

/// HTTP client for the Masterani JSON API.
pub struct MasteraniClient {
    base: Url,
    http: Client,
}

impl MasteraniClient {
    /// Build a client against `base_url`. A trailing slash is added if missing
    /// so relative endpoint paths resolve beneath it.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "catalog API error");
            Err(ApiError::Api {
                status,
                message: body,
            })
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, ?query, "GET");
        let resp = self.http.get(url).query(query).send().await?;
        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl CatalogApi for MasteraniClient {
    type Error = ApiError;

    async fn animes(&self, query: &CatalogQuery) -> Result<CatalogPage, ApiError> {
        let url = self.endpoint("anime/filter")?;
        self.get_json(url, &query.to_query_pairs()).await
    }

    async fn releases(&self) -> Result<Vec<ReleaseEvent>, ApiError> {
        let url = self.endpoint("releases")?;
        self.get_json(url, &[]).await
    }

    async fn anime_details(&self, anime_id: AnimeId) -> Result<AnimeDetails, ApiError> {
        let url = self.endpoint(&format!("anime/{anime_id}/detailed"))?;
        self.get_json(url, &[]).await
    }

    async fn video_links(&self, slug: &str, episode: u32) -> Result<VideoLinkSet, ApiError> {
        let url = self.endpoint(&format!("anime/{slug}/{episode}/mirrors"))?;
        self.get_json(url, &[]).await
    }
}
