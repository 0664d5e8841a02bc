//! Field extraction from a single endpoint page
//!
//! Endpoint pages follow a loose convention: an `h1` title followed by a
//! summary paragraph, then sections introduced by headings with stable ids.
//! The method and URL sit in `pre` blocks right after their headings;
//! parameter tables sit right after theirs. Form parameter sections show a
//! sample payload (`pre`) between the heading and the table.
//!
//! Nothing here fails: a missing heading, block or table leaves the field
//! empty and the rest of the page is still read.

use crate::collection::Parameter;
use crate::config::{SelectorSet, SiteProfile, URL_ANCHOR};
use crate::extract::strategy::{element_text, first_non_empty, parse_selector, select_scope, select_text};
use crate::extract::table::build_parameters;
use scraper::{ElementRef, Html};

/// Title lookups, in order
///
/// Some pages have no `h1` (the title was rendered as an `h2`).
pub const NAME_STRATEGIES: &[&str] = &["h1", "h2"];

/// Summary lookups, in order
pub const DESCRIPTION_STRATEGIES: &[&str] = &["h1 + p", "h2 + p"];

/// HTTP methods recognised in the single-block `"<METHOD> <URL>"` layout
const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Everything read from one endpoint page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    pub name: String,
    pub description: String,
    pub method: String,
    pub url: String,
    pub query_params: Vec<Parameter>,
    pub path_params: Vec<Parameter>,
    pub body_params: Vec<Parameter>,
}

/// Reads endpoint fields from pages using one site profile's selectors
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    selectors: SelectorSet,
    content_selectors: Vec<String>,
}

impl FieldExtractor {
    /// Creates an extractor for the given site profile
    pub fn new(profile: &SiteProfile) -> Self {
        Self {
            selectors: profile.selectors.clone(),
            content_selectors: profile.content_selectors.clone(),
        }
    }

    /// Parses `html` and extracts its fields
    ///
    /// # Example
    ///
    /// ```
    /// use backlog_postman::config::{Locale, SiteProfile};
    /// use backlog_postman::extract::FieldExtractor;
    ///
    /// let extractor = FieldExtractor::new(&SiteProfile::for_locale(Locale::English));
    /// let fields = extractor.extract(r#"
    ///     <div class="content">
    ///       <h1>Get Space</h1><p>Returns information about your space.</p>
    ///       <h2 id="method">Method</h2><pre>GET</pre>
    ///       <h2 id="url">URL</h2><pre>/api/v2/space</pre>
    ///     </div>"#);
    ///
    /// assert_eq!(fields.name, "Get Space");
    /// assert_eq!(fields.method, "GET");
    /// assert_eq!(fields.url, "/api/v2/space");
    /// ```
    pub fn extract(&self, html: &str) -> PageFields {
        let document = Html::parse_document(html);
        self.extract_document(&document)
    }

    /// Extracts fields from an already parsed document
    pub fn extract_document(&self, document: &Html) -> PageFields {
        let scope = select_scope(document, &self.content_selectors);

        let (method, url) = self.find_method_and_url(scope);

        PageFields {
            name: find_name(scope),
            description: find_description(scope),
            method,
            url,
            query_params: self.find_query(scope),
            path_params: self.find_variables(scope),
            body_params: self.find_body(scope),
        }
    }

    /// Method and URL from their anchored code blocks
    ///
    /// When neither anchor is present, the first code block is read as
    /// `"<METHOD> <URL>"` instead.
    fn find_method_and_url(&self, scope: ElementRef<'_>) -> (String, String) {
        let method = select_text(scope, &format!("{} + pre", self.selectors.method));
        let url = select_text(scope, &format!("{} + pre", URL_ANCHOR));

        if !method.is_empty() || !url.is_empty() {
            return (method, url);
        }

        split_request_line(&select_text(scope, "pre")).unwrap_or_default()
    }

    fn find_query(&self, scope: ElementRef<'_>) -> Vec<Parameter> {
        table_parameters(scope, &format!("{} + table tbody tr", self.selectors.query_parameter))
    }

    fn find_variables(&self, scope: ElementRef<'_>) -> Vec<Parameter> {
        table_parameters(scope, &format!("{} + table tbody tr", self.selectors.url_parameter))
    }

    fn find_body(&self, scope: ElementRef<'_>) -> Vec<Parameter> {
        table_parameters(
            scope,
            &format!("{} + pre + table tbody tr", self.selectors.request_parameter),
        )
    }
}

/// Page title: the first `h1`, else the first `h2`
pub fn find_name(scope: ElementRef<'_>) -> String {
    first_non_empty(NAME_STRATEGIES, |css| select_text(scope, css))
}

/// Page summary: the paragraph after the `h1`, else after the first `h2`
pub fn find_description(scope: ElementRef<'_>) -> String {
    first_non_empty(DESCRIPTION_STRATEGIES, |css| select_text(scope, css))
}

/// Splits `"GET /api/v2/space"` into method and URL on the first space
///
/// Returns `None` unless the first word is an HTTP method.
pub fn split_request_line(line: &str) -> Option<(String, String)> {
    let (method, url) = line.trim().split_once(' ')?;
    if !HTTP_METHODS.contains(&method) {
        return None;
    }
    Some((method.to_string(), url.trim().to_string()))
}

/// Cell texts of every row matched by `row_selector`
fn table_rows(scope: ElementRef<'_>, row_selector: &str) -> Vec<Vec<String>> {
    let (Some(rows), Some(cells)) = (parse_selector(row_selector), parse_selector("td")) else {
        return Vec::new();
    };

    scope
        .select(&rows)
        .map(|row| row.select(&cells).map(element_text).collect())
        .collect()
}

fn table_parameters(scope: ElementRef<'_>, row_selector: &str) -> Vec<Parameter> {
    build_parameters(table_rows(scope, row_selector))
}
