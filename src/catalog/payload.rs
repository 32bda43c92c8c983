//! Raw TMDB response payloads.
//!
//! These mirror the documented subset of the API responses and are
//! deserialized unmodified by [`TmdbClient`](super::TmdbClient); shaping
//! for the UI happens in [`project`](super::project).

use serde::Deserialize;

/// `/movie/{category}` list response.
#[derive(Debug, Deserialize)]
pub struct ListPayload {
    #[serde(default)]
    pub results: Vec<ListEntry>,
}

/// One entry of a list response.
///
/// TV-style entries carry `name` instead of `title`; both are kept and
/// reconciled during projection.
#[derive(Debug, Deserialize)]
pub struct ListEntry {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// `/movie/{id}` detail response.
#[derive(Debug, Deserialize)]
pub struct DetailPayload {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<GenreEntry>,
    #[serde(default)]
    pub budget: Option<u64>,
}

/// One genre of a detail response. Only the name is read.
#[derive(Debug, Deserialize)]
pub struct GenreEntry {
    pub name: String,
}

/// `/movie/{id}/images` response.
#[derive(Debug, Deserialize)]
pub struct ImagesPayload {
    #[serde(default)]
    pub backdrops: Vec<ImageEntry>,
    #[serde(default)]
    pub posters: Vec<ImageEntry>,
}

/// One image of an images response.
#[derive(Debug, Deserialize)]
pub struct ImageEntry {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
}
