//! Remote catalog access: configuration, HTTP client, raw payloads and
//! the pure projections that shape them for UI consumption.
//!
//! The split mirrors the data flow: [`TmdbClient`] returns payloads
//! unmodified, [`project`] turns them into [`crate::types`] shapes, and
//! the query layer (see [`crate::query`]) caches the projected result.

mod client;
mod config;
pub mod payload;
pub mod project;

pub use client::TmdbClient;
pub use config::{
    API_KEY_ENV, CatalogConfig, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL, ImageWidth,
};
