//! Catalog client configuration.

use std::fmt;

/// Default TMDB API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default TMDB image host base URL.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Environment variable holding the TMDB API credential.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Image width tokens accepted by the TMDB image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageWidth {
    /// List posters.
    W342,
    /// Detail posters and the poster gallery fallback.
    W500,
    /// Backdrop gallery entries.
    W780,
}

impl ImageWidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageWidth::W342 => "w342",
            ImageWidth::W500 => "w500",
            ImageWidth::W780 => "w780",
        }
    }
}

impl fmt::Display for ImageWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for [`TmdbClient`](super::TmdbClient).
///
/// The base URLs are overridable so tests can point the client at a
/// local mock server.
///
/// ```rust
/// # use cartelera::catalog::CatalogConfig;
/// let config = CatalogConfig::new()
///     .api_key("tmdb-key")
///     .language("en-US")
///     .region("US");
/// ```
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// TMDB API credential. `None` or empty fails every request with a
    /// configuration error before any network call.
    pub api_key: Option<String>,
    /// BCP 47 language tag sent on list and detail calls. Default: `es-ES`.
    pub language: String,
    /// Release-region code sent on list calls. Default: `AR`.
    pub region: String,
    /// API base URL. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Image host base URL. Default: [`DEFAULT_IMAGE_BASE_URL`].
    pub image_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language: "es-ES".to_string(),
            region: "AR".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Create a config with defaults and no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config reading the credential from `TMDB_API_KEY`.
    ///
    /// A missing variable is not an error here; it becomes a
    /// configuration error on the first request.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Self::default()
        }
    }

    /// Set the API credential.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the language tag.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the release-region code.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Override the API base URL (tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the image host base URL.
    pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    /// Build a full image URL from a width token and an API-returned
    /// path (which starts with `/`).
    pub fn image_url(&self, width: ImageWidth, path: &str) -> String {
        format!("{}/{}{}", self.image_base_url, width, path)
    }
}
