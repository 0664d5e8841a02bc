//! URL handling module for backlog-postman
//!
//! This module provides link normalization, domain extraction, and the
//! allowed-domain check that keeps the crawl on the documentation site.

mod domain;
mod normalize;

pub use domain::{extract_domain, is_allowed, matches_wildcard};
pub use normalize::{normalize_url, split_path};
