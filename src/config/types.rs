use crate::config::locale::Locale;
use serde::Deserialize;

/// Main configuration structure for backlog-postman
///
/// Every section is optional; a missing file is equivalent to
/// `Config::default()`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation language; the CLI `--language` flag takes precedence
    pub language: Option<Locale>,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub site: SiteOverrides,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Domain pattern endpoint links must match (e.g. "developer.nulab.com" or "*.nulab.com")
    #[serde(rename = "allowed-domain")]
    pub allowed_domain: String,

    /// Maximum number of endpoint pages fetched at the same time
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// What to do when an endpoint page cannot be fetched
    #[serde(rename = "on-endpoint-error")]
    pub on_endpoint_error: EndpointErrorPolicy,

    /// Collapse endpoint links that resolve to the same page
    pub deduplicate: bool,

    /// Order of items in the finished collection
    pub order: ItemOrder,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            allowed_domain: "developer.nulab.com".to_string(),
            max_concurrent_fetches: 8,
            request_timeout: 30,
            on_endpoint_error: EndpointErrorPolicy::Skip,
            deduplicate: false,
            order: ItemOrder::Discovery,
        }
    }
}

/// Policy for endpoint page fetch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointErrorPolicy {
    /// Log a warning and leave the page out of the collection
    Skip,
    /// Fail the whole run; no collection is written
    Abort,
}

/// Ordering of collection items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemOrder {
    /// Same order as the links on the index page
    Discovery,
    /// Order in which endpoint pages finished processing
    Completion,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the collection JSON file
    pub path: String,

    /// `info.name` of the generated collection
    #[serde(rename = "collection-name")]
    pub collection_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "backlog_api_postman_collection.json".to_string(),
            collection_name: "Backlog API".to_string(),
        }
    }
}

/// Optional overrides of the locale's site profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteOverrides {
    /// Index page URL
    #[serde(rename = "root-url")]
    pub root_url: Option<String>,

    /// CSS selector for endpoint links on the index page
    #[serde(rename = "link-selector")]
    pub link_selector: Option<String>,
}
