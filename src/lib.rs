//! Cartelera - TMDB movie catalog client with query caching
//!
//! This crate mediates between movie-browsing UIs and the TMDB catalog
//! API: it composes requests, projects raw payloads into the shapes
//! screens render, and caches every query behind a deterministic
//! [`QueryKey`] with request de-duplication and stale-result
//! suppression. Screens observe each query as a live
//! `Loading -> Success | Error` state machine instead of performing
//! their own fetches.
//!
//! # Example
//!
//! ```rust,no_run
//! use cartelera::{Cartelera, ListCategory, QueryStatus};
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = Cartelera::builder().api_key("tmdb-key").build();
//!
//!     // Home screen: the selected category's list.
//!     catalog.selection().set(ListCategory::TopRated);
//!     let mut movies = catalog.selected_movies();
//!     let snapshot = movies.settled().await;
//!     match snapshot.status {
//!         QueryStatus::Success => {
//!             for movie in snapshot.list().unwrap_or_default() {
//!                 println!("{}", movie.title);
//!             }
//!         }
//!         _ => eprintln!("{}", snapshot.error_message().unwrap_or_default()),
//!     }
//!
//!     // Detail screen: two independent queries, fetched concurrently.
//!     let mut page = catalog.movie_page(603);
//!     let (detail, gallery) = tokio::join!(page.detail.settled(), page.images.settled());
//!     if let Some(detail) = detail.detail() {
//!         println!("{} ({})", detail.title, detail.rating_label());
//!     }
//!     println!("{} gallery images", gallery.gallery().map_or(0, |g| g.len()));
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod query;
pub mod selection;
pub mod service;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use catalog::{CatalogConfig, ImageWidth, TmdbClient};
pub use error::{CarteleraError, Result};
pub use query::{
    QueryCache, QueryCacheConfig, QueryData, QueryHandle, QueryKey, QuerySnapshot, QueryStatus,
};
pub use selection::Selection;
pub use service::{Cartelera, CarteleraBuilder, MoviePage};
pub use types::{ListCategory, MovieDetail, MovieSummary};
