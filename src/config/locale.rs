//! Locale-dependent site profiles
//!
//! The documentation exists in two languages. Both share the page layout but
//! differ in their root URL, the path prefix of endpoint links, and the
//! heading ids that anchor each section (the Japanese ids are written in
//! Japanese). A [`SiteProfile`] bundles all of it and is resolved once per run.

use crate::config::types::SiteOverrides;
use crate::CollectorError;
use serde::Deserialize;
use std::fmt;

/// Selector for the heading that precedes the URL code block (same in every locale)
pub const URL_ANCHOR: &str = "#url";

/// Containers that hold the endpoint documentation, tried in order
pub const CONTENT_SELECTORS: &[&str] = &["div.content", ":root"];

/// Documentation language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[serde(alias = "en")]
    #[value(alias = "en")]
    English,

    #[serde(alias = "ja")]
    #[value(alias = "ja")]
    Japanese,
}

impl Locale {
    /// Index page of the documentation in this language
    pub fn root_url(&self) -> &'static str {
        match self {
            Self::English => "https://developer.nulab.com/docs/backlog",
            Self::Japanese => "https://developer.nulab.com/ja/docs/backlog",
        }
    }

    /// Selector matching links to endpoint pages on the index page
    pub fn link_selector(&self) -> &'static str {
        match self {
            Self::English => "a[href^='/docs/backlog/api/2/']",
            Self::Japanese => "a[href^='/ja/docs/backlog/api/2/']",
        }
    }

    /// Heading anchors for this language
    pub fn selector_set(&self) -> SelectorSet {
        match self {
            Self::English => SelectorSet {
                method: "#method".to_string(),
                query_parameter: "#query-parameters".to_string(),
                request_parameter: "#form-parameters".to_string(),
                url_parameter: "#url-parameters".to_string(),
            },
            Self::Japanese => SelectorSet {
                method: "#メソッド".to_string(),
                query_parameter: "#クエリパラメーター".to_string(),
                request_parameter: "#リクエストパラメーター".to_string(),
                url_parameter: "#url-パラメーター".to_string(),
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "English"),
            Self::Japanese => write!(f, "Japanese"),
        }
    }
}

/// Anchor selectors for the headings that precede each section of an endpoint page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSet {
    /// Heading followed by the HTTP method code block
    pub method: String,

    /// Heading followed by the query parameter table
    pub query_parameter: String,

    /// Heading followed by a sample payload and the form parameter table
    pub request_parameter: String,

    /// Heading followed by the URL (path) parameter table
    pub url_parameter: String,
}

/// Everything the crawler needs to know about the target site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    /// Index page URL
    pub root_url: String,

    /// Selector for endpoint links on the index page
    pub link_selector: String,

    /// Endpoint content containers, first match wins
    pub content_selectors: Vec<String>,

    /// Section anchors
    pub selectors: SelectorSet,
}

impl SiteProfile {
    /// Builds the profile for a locale with no overrides applied
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            root_url: locale.root_url().to_string(),
            link_selector: locale.link_selector().to_string(),
            content_selectors: CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            selectors: locale.selector_set(),
        }
    }

    /// Replaces the root URL and link selector where the config sets them
    pub fn with_overrides(mut self, overrides: &SiteOverrides) -> Self {
        if let Some(root_url) = &overrides.root_url {
            self.root_url = root_url.clone();
        }
        if let Some(link_selector) = &overrides.link_selector {
            self.link_selector = link_selector.clone();
        }
        self
    }
}

/// Picks the documentation language; the command line wins over the config file
///
/// # Errors
///
/// Returns `CollectorError::Setup` when neither names a language.
pub fn resolve_locale(
    from_cli: Option<Locale>,
    from_config: Option<Locale>,
) -> Result<Locale, CollectorError> {
    from_cli.or(from_config).ok_or_else(|| {
        CollectorError::Setup(
            "no language selected; pass --language or set `language` in the config".to_string(),
        )
    })
}
