//! Movie list categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CarteleraError;

/// The four TMDB list endpoints the catalog exposes.
///
/// Exactly one category is active at a time in [`Selection`](crate::Selection);
/// the wire form (`popular`, `top_rated`, ...) doubles as the URL path
/// segment of the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListCategory {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
}

impl ListCategory {
    /// All categories, in the section order of the overview screen.
    pub const ALL: [ListCategory; 4] = [
        ListCategory::NowPlaying,
        ListCategory::Popular,
        ListCategory::TopRated,
        ListCategory::Upcoming,
    ];

    /// Wire name, as used in the list endpoint path.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListCategory::Popular => "popular",
            ListCategory::TopRated => "top_rated",
            ListCategory::Upcoming => "upcoming",
            ListCategory::NowPlaying => "now_playing",
        }
    }

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            ListCategory::Popular => "Populares",
            ListCategory::TopRated => "Mejores calificadas",
            ListCategory::Upcoming => "Próximamente en cines",
            ListCategory::NowPlaying => "Ahora en cines",
        }
    }
}

impl fmt::Display for ListCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListCategory {
    type Err = CarteleraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(ListCategory::Popular),
            "top_rated" => Ok(ListCategory::TopRated),
            "upcoming" => Ok(ListCategory::Upcoming),
            "now_playing" => Ok(ListCategory::NowPlaying),
            other => Err(CarteleraError::InvalidInput(format!(
                "unknown list category: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for category in ListCategory::ALL {
            assert_eq!(category.as_str().parse::<ListCategory>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_name_is_invalid_input() {
        let err = "trending".parse::<ListCategory>().unwrap_err();
        assert!(matches!(err, CarteleraError::InvalidInput(_)));
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(ListCategory::TopRated.to_string(), "top_rated");
    }

    #[test]
    fn section_order_starts_with_now_playing() {
        assert_eq!(ListCategory::ALL[0], ListCategory::NowPlaying);
    }
}
