//! Error types for the auth gateway

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reported by the Supabase backend. Displays as the backend's own
    /// message so handlers can pass it through unchanged.
    #[error("{0}")]
    Backend(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
