//! Projected movie shapes consumed by UI layers.

use serde::Serialize;

/// One entry in a category list or grid row.
///
/// Items without a usable poster never become a `MovieSummary`; the
/// list projector drops them instead of substituting a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    /// Full `w342` poster URL, ready for an image renderer.
    pub poster_url: String,
}

/// Full detail-screen shape, one-to-one with a raw detail payload.
///
/// Numeric fields that TMDB may omit stay `None` here; the `*_label`
/// helpers apply the display fallbacks every UI layer must honor
/// identically (`"-"` for a missing rating, a zero currency string for
/// a missing budget).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    /// Full `w500` poster URL, absent when TMDB has no poster.
    pub poster_url: Option<String>,
    pub vote_average: Option<f64>,
    pub genres: Vec<String>,
    pub budget: Option<u64>,
}

impl MovieDetail {
    /// Rating with three decimals, or `"-"` when absent.
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(v) => format!("{v:.3}"),
            None => "-".to_string(),
        }
    }

    /// Comma-joined genre names, or `"-"` when there are none.
    pub fn genres_label(&self) -> String {
        if self.genres.is_empty() {
            "-".to_string()
        } else {
            self.genres.join(", ")
        }
    }

    /// Overview text, or `"-"` when empty.
    pub fn overview_label(&self) -> &str {
        if self.overview.is_empty() {
            "-"
        } else {
            &self.overview
        }
    }

    /// Budget as a grouped USD string, or `"US$0.00"` when absent.
    pub fn budget_label(&self) -> String {
        match self.budget {
            Some(n) => format_usd(n),
            None => "US$0.00".to_string(),
        }
    }
}

/// Format a whole-dollar amount as `$1,234,567.00`.
fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${grouped}.00")
}
