//! Crawler module for page fetching and collection runs
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching restricted to the allowed domain
//! - Endpoint link discovery on the index page
//! - Concurrent fetch-and-extract of endpoint pages
//!
//! [`run_crawl`] is the entry point for a complete run.

mod coordinator;
mod discovery;
mod fetcher;

pub use coordinator::{process_endpoint, run_crawl, Coordinator, CrawlOutput, PageOutcome};
pub use discovery::{discover_endpoints, DiscoveredLink, DiscoveryOptions};
pub use fetcher::{build_http_client, describe_status, fetch_url, FetchResult};
