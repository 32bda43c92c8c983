//! HTTP client for the TMDB catalog API.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CarteleraError, Result};
use crate::types::ListCategory;

use super::config::CatalogConfig;
use super::payload::{DetailPayload, ImagesPayload, ListPayload};

/// Thin client over the three catalog endpoints.
///
/// Composes URLs, performs a single request per call, and maps failures
/// to typed errors. No retries and no response shaping here; projection
/// is a separate, pure step (see [`project`](super::project)).
pub struct TmdbClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl TmdbClient {
    /// Create a client from a config.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// The config this client was built with.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Fetch page `page` of a category list.
    pub async fn list(&self, category: ListCategory, page: u32) -> Result<ListPayload> {
        let key = self.require_api_key()?;
        let url = format!("{}/movie/{}", self.config.base_url, category.as_str());
        self.fetch_json(
            &url,
            &[
                ("language", self.config.language.as_str()),
                ("region", self.config.region.as_str()),
                ("page", &page.to_string()),
                ("api_key", key),
            ],
        )
        .await
    }

    /// Fetch the detail payload for one movie.
    pub async fn detail(&self, id: u64) -> Result<DetailPayload> {
        let key = self.require_api_key()?;
        let url = format!("{}/movie/{id}", self.config.base_url);
        self.fetch_json(
            &url,
            &[
                ("language", self.config.language.as_str()),
                ("api_key", key),
            ],
        )
        .await
    }

    /// Fetch the image inventory for one movie.
    pub async fn images(&self, id: u64) -> Result<ImagesPayload> {
        let key = self.require_api_key()?;
        let url = format!("{}/movie/{id}/images", self.config.base_url);
        self.fetch_json(
            &url,
            &[
                ("include_image_language", "es,en,null"),
                ("api_key", key),
            ],
        )
        .await
    }

    /// The credential, or a configuration error when absent/empty.
    fn require_api_key(&self) -> Result<&str> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(CarteleraError::Configuration(
                "TMDB API key is not set".to_string(),
            )),
        }
    }

    /// Perform one GET request and parse the JSON body.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!(url, "fetching from catalog API");
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| CarteleraError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CarteleraError::Remote {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CarteleraError::Network(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
