//! Configuration module for backlog-postman
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and resolving the locale-dependent site profile.
//!
//! # Example
//!
//! ```no_run
//! use backlog_postman::config::{load_config, SiteProfile};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("backlog-postman.toml")).unwrap();
//! if let Some(locale) = config.language {
//!     let profile = SiteProfile::for_locale(locale).with_overrides(&config.site);
//!     println!("Index page: {}", profile.root_url);
//! }
//! ```

mod locale;
mod parser;
mod types;
mod validation;

pub use locale::{
    resolve_locale, Locale, SelectorSet, SiteProfile, CONTENT_SELECTORS, URL_ANCHOR,
};
pub use types::{
    Config, CrawlerConfig, EndpointErrorPolicy, ItemOrder, OutputConfig, SiteOverrides,
    UserAgentConfig,
};

pub use parser::{config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
