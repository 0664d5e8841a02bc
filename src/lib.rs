//! backlog-postman: API reference pages to a Postman collection
//!
//! This crate crawls the Backlog developer documentation (an index page and
//! the endpoint pages it links to), extracts each endpoint's method, URL,
//! parameters and description from the page markup, and assembles the
//! results into a Postman v2.1 collection.

pub mod collection;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for collection runs
///
/// The stage variants (`Setup`, `IndexFetch`, `EndpointFetch`, `Write`)
/// name the part of the run that failed.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Setup failed: {0}")]
    Setup(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch index page {url}: {reason}")]
    IndexFetch { url: String, reason: String },

    #[error("Failed to fetch endpoint page {url}: {reason}")]
    EndpointFetch { url: String, reason: String },

    #[error("Endpoint task did not finish: {0}")]
    Task(String),

    #[error("Failed to write collection to {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::PageState,
        to: state::PageState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for collection runs
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use collection::{Collection, CollectionStore, EndpointRecord, Parameter};
pub use config::{Config, Locale, SelectorSet, SiteProfile};
pub use state::PageState;
pub use crate::url::{extract_domain, is_allowed, matches_wildcard, normalize_url, split_path};
