//! High-level facade wiring client, projectors, cache and selection.

use std::sync::Arc;

use crate::catalog::project::{project_detail, project_images, project_list};
use crate::catalog::{CatalogConfig, TmdbClient};
use crate::query::{QueryCache, QueryCacheConfig, QueryData, QueryHandle, QueryKey};
use crate::selection::Selection;
use crate::types::ListCategory;

/// Screens only ever show page 1.
const FIRST_PAGE: u32 = 1;

/// Both handles a detail screen needs.
///
/// The two fetches run concurrently and fail independently, so a detail
/// that loads next to a gallery that errors is representable as-is
/// rather than collapsing into one failure.
#[derive(Debug)]
pub struct MoviePage {
    pub detail: QueryHandle,
    pub images: QueryHandle,
}

/// Main entry point: the movie catalog as cached, observable queries.
///
/// ```rust,no_run
/// use cartelera::{Cartelera, ListCategory};
///
/// #[tokio::main]
/// async fn main() {
///     let catalog = Cartelera::builder().api_key("tmdb-key").build();
///
///     let mut movies = catalog.movies(ListCategory::Popular);
///     let snapshot = movies.settled().await;
///     for movie in snapshot.list().unwrap_or_default() {
///         println!("{} -> {}", movie.title, movie.poster_url);
///     }
/// }
/// ```
pub struct Cartelera {
    client: Arc<TmdbClient>,
    cache: QueryCache,
    selection: Selection,
}

impl Cartelera {
    /// Create a builder for configuring the catalog.
    pub fn builder() -> CarteleraBuilder {
        CarteleraBuilder::new()
    }

    /// Create a catalog reading the credential from `TMDB_API_KEY`.
    pub fn from_env() -> Self {
        CarteleraBuilder {
            catalog: CatalogConfig::from_env(),
            cache: QueryCacheConfig::default(),
        }
        .build()
    }

    /// Page 1 of a category list, cached per category.
    pub fn movies(&self, category: ListCategory) -> QueryHandle {
        let key = QueryKey::list(category, FIRST_PAGE);
        let client = Arc::clone(&self.client);
        self.cache.ensure(key, move || async move {
            let payload = client.list(category, FIRST_PAGE).await?;
            Ok(QueryData::List(project_list(&payload, client.config())))
        })
    }

    /// The list for the currently selected category.
    pub fn selected_movies(&self) -> QueryHandle {
        self.movies(self.selection.get())
    }

    /// One movie's projected detail.
    pub fn movie_detail(&self, id: u64) -> QueryHandle {
        let key = QueryKey::detail(id);
        let client = Arc::clone(&self.client);
        self.cache.ensure(key, move || async move {
            let payload = client.detail(id).await?;
            Ok(QueryData::Detail(project_detail(payload, client.config())))
        })
    }

    /// One movie's gallery URLs.
    pub fn movie_images(&self, id: u64) -> QueryHandle {
        let key = QueryKey::images(id);
        let client = Arc::clone(&self.client);
        self.cache.ensure(key, move || async move {
            let payload = client.images(id).await?;
            Ok(QueryData::Gallery(project_images(
                &payload,
                client.config(),
            )))
        })
    }

    /// Detail and gallery for one movie, fetched concurrently.
    pub fn movie_page(&self, id: u64) -> MoviePage {
        MoviePage {
            detail: self.movie_detail(id),
            images: self.movie_images(id),
        }
    }

    /// One handle per category, in overview section order.
    ///
    /// Each category fetches independently; one failing never aborts
    /// the siblings.
    pub fn overview(&self) -> Vec<(ListCategory, QueryHandle)> {
        ListCategory::ALL
            .into_iter()
            .map(|category| (category, self.movies(category)))
            .collect()
    }

    /// The active-category selection shared with the UI.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The underlying query cache (snapshots, invalidation).
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}

/// Builder for [`Cartelera`] instances.
pub struct CarteleraBuilder {
    catalog: CatalogConfig,
    cache: QueryCacheConfig,
}

impl CarteleraBuilder {
    pub fn new() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            cache: QueryCacheConfig::default(),
        }
    }

    /// Set the TMDB API credential.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.catalog = self.catalog.api_key(key);
        self
    }

    /// Set the language tag sent on list and detail calls.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.catalog = self.catalog.language(language);
        self
    }

    /// Set the release-region code sent on list calls.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.catalog = self.catalog.region(region);
        self
    }

    /// Override the API base URL (tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.catalog = self.catalog.base_url(url);
        self
    }

    /// Override the image host base URL.
    pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
        self.catalog = self.catalog.image_base_url(url);
        self
    }

    /// Replace the whole catalog config.
    pub fn catalog_config(mut self, config: CatalogConfig) -> Self {
        self.catalog = config;
        self
    }

    /// Replace the query-cache config (staleness window, capacity).
    pub fn cache_config(mut self, config: QueryCacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Build the catalog.
    pub fn build(self) -> Cartelera {
        Cartelera {
            client: Arc::new(TmdbClient::new(self.catalog)),
            cache: QueryCache::new(&self.cache),
            selection: Selection::new(),
        }
    }
}

impl Default for CarteleraBuilder {
    fn default() -> Self {
        Self::new()
    }
}
