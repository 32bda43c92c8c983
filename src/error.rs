//! Cartelera error types

/// Cartelera error types
#[derive(Debug, thiserror::Error)]
pub enum CarteleraError {
    /// The TMDB API credential is missing or empty.
    ///
    /// Surfaced before any network call is attempted; a first-class
    /// condition, not a generic request failure.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The catalog API answered with a non-success HTTP status.
    #[error("TMDB responded with HTTP {status}")]
    Remote { status: u16 },

    /// Transport-level failure (DNS, connect, TLS, body read).
    ///
    /// Display-equivalent to [`Remote`](Self::Remote) for consumers;
    /// kept distinct so callers can tell "server said no" from "never
    /// reached the server".
    #[error("network error: {0}")]
    Network(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Cartelera operations
pub type Result<T> = std::result::Result<T, CarteleraError>;
