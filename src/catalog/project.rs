//! Pure projections from raw payloads to UI shapes.

use crate::types::{MovieDetail, MovieSummary};

use super::config::{CatalogConfig, ImageWidth};
use super::payload::{DetailPayload, ImagesPayload, ListPayload};

/// Maximum gallery entries taken from the backdrop inventory.
const MAX_BACKDROPS: usize = 8;

/// Maximum gallery entries taken from the poster fallback.
const MAX_POSTERS: usize = 6;

/// Project a list payload into summaries.
///
/// Entries without a poster path are dropped entirely (no placeholder);
/// the order of survivors matches the payload. The title falls back to
/// `name` for TV-style entries.
pub fn project_list(payload: &ListPayload, config: &CatalogConfig) -> Vec<MovieSummary> {
    payload
        .results
        .iter()
        .filter_map(|entry| {
            let poster_path = entry.poster_path.as_deref().filter(|p| !p.is_empty())?;
            let title = entry
                .title
                .clone()
                .or_else(|| entry.name.clone())
                .unwrap_or_default();
            Some(MovieSummary {
                id: entry.id,
                title,
                poster_url: config.image_url(ImageWidth::W342, poster_path),
            })
        })
        .collect()
}

/// Project a detail payload one-to-one.
///
/// Absent numeric fields stay `None`; display fallbacks live on
/// [`MovieDetail`]'s label helpers.
pub fn project_detail(payload: DetailPayload, config: &CatalogConfig) -> MovieDetail {
    MovieDetail {
        id: payload.id,
        title: payload.title,
        original_title: payload.original_title,
        overview: payload.overview,
        poster_url: payload
            .poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| config.image_url(ImageWidth::W500, p)),
        vote_average: payload.vote_average,
        genres: payload.genres.into_iter().map(|g| g.name).collect(),
        budget: payload.budget,
    }
}

/// Project an images payload into the gallery URL sequence.
///
/// Backdrops win: widest first (missing width sorts last), capped at 8,
/// rendered at `w780`. Only when zero backdrops survive the filter does
/// the gallery fall back to posters in payload order, capped at 6, at
/// `w500`.
pub fn project_images(payload: &ImagesPayload, config: &CatalogConfig) -> Vec<String> {
    let mut backdrops: Vec<(&str, u32)> = payload
        .backdrops
        .iter()
        .filter_map(|image| {
            let path = image.file_path.as_deref().filter(|p| !p.is_empty())?;
            Some((path, image.width.unwrap_or(0)))
        })
        .collect();
    backdrops.sort_by(|a, b| b.1.cmp(&a.1));

    if !backdrops.is_empty() {
        return backdrops
            .into_iter()
            .take(MAX_BACKDROPS)
            .map(|(path, _)| config.image_url(ImageWidth::W780, path))
            .collect();
    }

    payload
        .posters
        .iter()
        .filter_map(|image| image.file_path.as_deref().filter(|p| !p.is_empty()))
        .take(MAX_POSTERS)
        .map(|path| config.image_url(ImageWidth::W500, path))
        .collect()
}
