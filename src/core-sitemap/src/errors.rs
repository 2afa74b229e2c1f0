//! Error types for sitemap generation.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for sitemap generation operations.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The base URL was never supplied, or is only whitespace
    #[error("Base URL is required and must not be blank")]
    MissingBaseUrl,

    /// A configured priority lies outside of [0, 1]
    #[error("Priority must be between 0.0 and 1.0, got: {0}")]
    InvalidPriority(f64),

    /// An exclusion pattern could not be compiled
    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Unknown change frequency name
    #[error("Invalid change frequency: '{0}'")]
    InvalidChangeFrequency(String),

    /// The manual routes provider failed
    #[error("Manual routes provider failed: {0}")]
    ManualRoutes(String),

    /// Writing the XML document failed
    #[error("Sitemap rendering failed: {0}")]
    Render(String),

    /// Sitemap parsing failed
    #[error("Sitemap parsing failed: {0}")]
    SitemapParse(String),

    /// No route tree at any of the conventional locations
    #[error("No route tree found, looked in: {0:?}")]
    RouteTreeNotFound(Vec<PathBuf>),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with SitemapError
pub type Result<T> = std::result::Result<T, SitemapError>;
