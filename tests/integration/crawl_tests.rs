//! Integration tests for the crawler
//!
//! These tests use wiremock to serve an index page and endpoint pages and
//! run the full collection cycle end-to-end.

use backlog_postman::collection::PostmanCollection;
use backlog_postman::config::{
    load_config, Config, EndpointErrorPolicy, ItemOrder, Locale, SiteProfile,
};
use backlog_postman::crawler::run_crawl;
use backlog_postman::output::write_collection;
use backlog_postman::{Collection, CollectorError};
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration restricted to the mock server's host
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.allowed_domain = "127.0.0.1".to_string();
    config.crawler.max_concurrent_fetches = 4;
    config.crawler.request_timeout = 5;
    config
}

/// English profile pointed at the mock server
fn create_test_profile(server: &MockServer) -> SiteProfile {
    let mut profile = SiteProfile::for_locale(Locale::English);
    profile.root_url = format!("{}/docs", server.uri());
    profile.link_selector = "a[href^='/api/v2/']".to_string();
    profile
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    let body: String = body.into();
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

fn index_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{}">{}</a></li>"#, href, href))
        .collect();
    format!(
        r#"<html><body><nav><ul>{}</ul></nav><a href="/docs/about">About</a></body></html>"#,
        links
    )
}

fn endpoint_page(name: &str, http_method: &str, url: &str) -> String {
    format!(
        r#"<html><body><div class="content">
        <h1>{}</h1><p>{} description.</p>
        <h2 id="method">Method</h2><pre>{}</pre>
        <h2 id="url">URL</h2><pre>{}</pre>
        </div></body></html>"#,
        name, name, http_method, url
    )
}

async fn mount_index(server: &MockServer, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(html(index_page(hrefs)))
        .mount(server)
        .await;
}

async fn mount_endpoint(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn item_names(collection: &Collection) -> Vec<String> {
    collection.items.iter().map(|item| item.name.clone()).collect()
}

#[tokio::test]
async fn test_get_issue_end_to_end() {
    let server = MockServer::start().await;

    mount_index(&server, &["/api/v2/get-issue"]).await;
    mount_endpoint(
        &server,
        "/api/v2/get-issue",
        r#"<html><body><div class="content">
        <h1>Get Issue</h1>
        <p>Returns issue detail.</p>
        <h2 id="method">Method</h2>
        <pre>GET</pre>
        <h2 id="url">URL</h2>
        <pre>/api/v2/issues/:issueIdOrKey</pre>
        <h2 id="query-parameters">Query Parameters</h2>
        <table>
          <thead><tr><th>Parameter Name</th><th>Type</th><th>Description</th></tr></thead>
          <tbody><tr><td>count (optional)</td><td>number</td><td>Max results</td></tr></tbody>
        </table>
        </div></body></html>"#
            .to_string(),
    )
    .await;

    let output = run_crawl(create_test_config(), create_test_profile(&server))
        .await
        .expect("Crawl failed");

    let collection = output.collection;
    assert_eq!(collection.name, "Backlog API");
    assert_eq!(collection.items.len(), 1);

    let item = &collection.items[0];
    assert_eq!(item.name, "Get Issue");
    assert_eq!(item.description, "Returns issue detail.");
    assert_eq!(item.method, "GET");
    assert_eq!(item.url, "/api/v2/issues/:issueIdOrKey");
    assert_eq!(item.path, vec!["api", "v2", "issues", ":issueIdOrKey"]);
    assert_eq!(item.query_params.len(), 1);
    assert_eq!(item.query_params[0].key, "count");
    assert_eq!(item.query_params[0].type_annotation, "<number>");
    assert_eq!(item.query_params[0].description, "Max results (optional)");
    assert!(item.path_params.is_empty());
    assert!(item.body_params.is_empty());

    assert_eq!(output.report.discovered, 1);
    assert_eq!(output.report.extracted, 1);
    assert_eq!(output.report.skipped, 0);
    assert_eq!(output.report.incomplete, 0);
}

#[tokio::test]
async fn test_written_collection_reads_back() {
    let server = MockServer::start().await;

    mount_index(&server, &["/api/v2/get-space"]).await;
    mount_endpoint(
        &server,
        "/api/v2/get-space",
        endpoint_page("Get Space", "GET", "/api/v2/space"),
    )
    .await;

    let output = run_crawl(create_test_config(), create_test_profile(&server))
        .await
        .expect("Crawl failed");

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("backlog_api_postman_collection.json");
    write_collection(&output.collection, &out_path).unwrap();

    let text = std::fs::read_to_string(&out_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value["info"]["schema"],
        "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
    );
    assert_eq!(value["auth"]["type"], "apikey");
    assert_eq!(value["item"][0]["request"]["url"]["host"][0], "{{base_url}}");
    assert_eq!(value["item"][0]["request"]["body"]["mode"], "urlencoded");

    let parsed: PostmanCollection = serde_json::from_str(&text).unwrap();
    assert_eq!(Collection::from(&parsed), output.collection);
}

#[tokio::test]
async fn test_every_link_becomes_an_item() {
    let server = MockServer::start().await;

    let hrefs = [
        "/api/v2/one",
        "/api/v2/two",
        "/api/v2/three",
        "/api/v2/four",
        "/api/v2/five",
    ];
    mount_index(&server, &hrefs).await;

    // Earlier links answer slower, so completion order is reversed.
    for (i, href) in hrefs.iter().enumerate() {
        let name = format!("Endpoint {}", i);
        Mock::given(method("GET"))
            .and(path(*href))
            .respond_with(
                html(endpoint_page(&name, "GET", href))
                    .set_delay(Duration::from_millis(50 * (hrefs.len() - i) as u64)),
            )
            .mount(&server)
            .await;
    }

    let output = run_crawl(create_test_config(), create_test_profile(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(
        item_names(&output.collection),
        vec!["Endpoint 0", "Endpoint 1", "Endpoint 2", "Endpoint 3", "Endpoint 4"]
    );
    assert_eq!(output.report.extracted, 5);
}

#[tokio::test]
async fn test_completion_order_keeps_every_item() {
    let server = MockServer::start().await;

    let hrefs = ["/api/v2/a", "/api/v2/b", "/api/v2/c"];
    mount_index(&server, &hrefs).await;
    for href in hrefs {
        mount_endpoint(&server, href, endpoint_page(href, "GET", href)).await;
    }

    let mut config = create_test_config();
    config.crawler.order = ItemOrder::Completion;

    let output = run_crawl(config, create_test_profile(&server))
        .await
        .expect("Crawl failed");

    let mut names = item_names(&output.collection);
    names.sort();
    assert_eq!(names, vec!["/api/v2/a", "/api/v2/b", "/api/v2/c"]);
}

#[tokio::test]
async fn test_failed_endpoint_is_skipped_by_default() {
    let server = MockServer::start().await;

    mount_index(&server, &["/api/v2/ok", "/api/v2/missing", "/api/v2/also-ok"]).await;
    mount_endpoint(&server, "/api/v2/ok", endpoint_page("Ok", "GET", "/api/v2/ok")).await;
    mount_endpoint(
        &server,
        "/api/v2/also-ok",
        endpoint_page("Also Ok", "POST", "/api/v2/also-ok"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let output = run_crawl(create_test_config(), create_test_profile(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(item_names(&output.collection), vec!["Ok", "Also Ok"]);
    assert_eq!(output.report.discovered, 3);
    assert_eq!(output.report.extracted, 2);
    assert_eq!(output.report.skipped, 1);
}

#[tokio::test]
async fn test_failed_endpoint_aborts_when_configured() {
    let server = MockServer::start().await;

    mount_index(&server, &["/api/v2/ok", "/api/v2/missing"]).await;
    mount_endpoint(&server, "/api/v2/ok", endpoint_page("Ok", "GET", "/api/v2/ok")).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut config = create_test_config();
    config.crawler.on_endpoint_error = EndpointErrorPolicy::Abort;

    let result = run_crawl(config, create_test_profile(&server)).await;
    match result {
        Err(CollectorError::EndpointFetch { url, reason }) => {
            assert!(url.ends_with("/api/v2/missing"));
            assert!(reason.contains("404"));
        }
        other => panic!("expected EndpointFetch error, got {:?}", other.map(|o| o.report)),
    }
}

#[tokio::test]
async fn test_index_failure_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = run_crawl(create_test_config(), create_test_profile(&server)).await;
    match result {
        Err(CollectorError::IndexFetch { url, reason }) => {
            assert!(url.ends_with("/docs"));
            assert_eq!(reason, "HTTP 500 (server error)");
        }
        other => panic!("expected IndexFetch error, got {:?}", other.map(|o| o.report)),
    }
}

#[tokio::test]
async fn test_index_not_html_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let result = run_crawl(create_test_config(), create_test_profile(&server)).await;
    assert!(matches!(result, Err(CollectorError::IndexFetch { .. })));
}

#[tokio::test]
async fn test_repeated_links() {
    let server = MockServer::start().await;

    mount_index(
        &server,
        &["/api/v2/get-space", "/api/v2/get-space#response"],
    )
    .await;
    mount_endpoint(
        &server,
        "/api/v2/get-space",
        endpoint_page("Get Space", "GET", "/api/v2/space"),
    )
    .await;

    let output = run_crawl(create_test_config(), create_test_profile(&server))
        .await
        .expect("Crawl failed");
    assert_eq!(output.collection.items.len(), 2);

    let mut config = create_test_config();
    config.crawler.deduplicate = true;
    let output = run_crawl(config, create_test_profile(&server))
        .await
        .expect("Crawl failed");
    assert_eq!(output.collection.items.len(), 1);
    assert_eq!(output.report.discovered, 1);
}

#[tokio::test]
async fn test_off_domain_links_not_fetched() {
    let server = MockServer::start().await;

    let foreign = server.uri().replace("127.0.0.1", "localhost");
    let foreign_link = format!("{}/api/v2/elsewhere", foreign);
    mount_index(&server, &["/api/v2/get-space", &foreign_link]).await;
    mount_endpoint(
        &server,
        "/api/v2/get-space",
        endpoint_page("Get Space", "GET", "/api/v2/space"),
    )
    .await;
    mount_endpoint(
        &server,
        "/api/v2/elsewhere",
        endpoint_page("Elsewhere", "GET", "/api/v2/elsewhere"),
    )
    .await;

    let mut profile = create_test_profile(&server);
    profile.link_selector = "nav a".to_string();

    let output = run_crawl(create_test_config(), profile)
        .await
        .expect("Crawl failed");
    assert_eq!(item_names(&output.collection), vec!["Get Space"]);
}

#[tokio::test]
async fn test_incomplete_page_still_listed() {
    let server = MockServer::start().await;

    mount_index(&server, &["/api/v2/overview"]).await;
    mount_endpoint(
        &server,
        "/api/v2/overview",
        r#"<html><body><h2>Overview</h2><p>No request here.</p></body></html>"#.to_string(),
    )
    .await;

    let output = run_crawl(create_test_config(), create_test_profile(&server))
        .await
        .expect("Crawl failed");

    assert_eq!(output.collection.items.len(), 1);
    let item = &output.collection.items[0];
    assert_eq!(item.name, "Overview");
    assert_eq!(item.description, "No request here.");
    assert_eq!(item.method, "");
    assert!(item.path.is_empty());
    assert_eq!(output.report.incomplete, 1);
}

#[tokio::test]
async fn test_japanese_profile() {
    let server = MockServer::start().await;

    mount_index(&server, &["/api/v2/add-issue"]).await;
    mount_endpoint(
        &server,
        "/api/v2/add-issue",
        r#"<html><body><div class="content">
        <h1>課題の追加</h1><p>課題を追加します。</p>
        <h2 id="メソッド">メソッド</h2><pre>POST</pre>
        <h2 id="url">URL</h2><pre>/api/v2/issues</pre>
        <h2 id="リクエストパラメーター">リクエストパラメーター</h2>
        <pre>Content-Type:application/x-www-form-urlencoded</pre>
        <table>
          <thead><tr><th>パラメーター名</th><th>型</th><th>内容</th></tr></thead>
          <tbody><tr><td>projectId (必須)</td><td>数値</td><td>課題を登録するプロジェクトのID</td></tr></tbody>
        </table>
        </div></body></html>"#
            .to_string(),
    )
    .await;

    let mut profile = SiteProfile::for_locale(Locale::Japanese);
    profile.root_url = format!("{}/docs", server.uri());
    profile.link_selector = "a[href^='/api/v2/']".to_string();

    let output = run_crawl(create_test_config(), profile)
        .await
        .expect("Crawl failed");

    let item = &output.collection.items[0];
    assert_eq!(item.name, "課題の追加");
    assert_eq!(item.method, "POST");
    assert_eq!(item.body_params.len(), 1);
    assert_eq!(item.body_params[0].key, "projectId");
    assert_eq!(item.body_params[0].type_annotation, "<数値>");
    assert_eq!(
        item.body_params[0].description,
        "課題を登録するプロジェクトのID (必須)"
    );
}

#[tokio::test]
async fn test_config_file_drives_run() {
    let server = MockServer::start().await;

    mount_index(&server, &["/api/v2/get-space"]).await;
    mount_endpoint(
        &server,
        "/api/v2/get-space",
        endpoint_page("Get Space", "GET", "/api/v2/space"),
    )
    .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
language = "english"

[crawler]
allowed-domain = "127.0.0.1"
max-concurrent-fetches = 2
request-timeout = 5

[output]
collection-name = "Mock API"

[site]
root-url = "{}/docs"
link-selector = "a[href^='/api/v2/']"
"#,
        server.uri()
    )
    .unwrap();

    let config = load_config(file.path()).expect("Failed to load config");
    let locale = config.language.expect("language set in config");
    let profile = SiteProfile::for_locale(locale).with_overrides(&config.site);

    let output = run_crawl(config, profile).await.expect("Crawl failed");
    assert_eq!(output.collection.name, "Mock API");
    assert_eq!(item_names(&output.collection), vec!["Get Space"]);
}

/// A second server reachable only under a host name other than the allowed one
async fn start_foreign_server() -> (MockServer, String) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(endpoint_page("Off Domain", "GET", "/api/v2/evil")))
        .mount(&server)
        .await;
    let base = server.uri().replace("127.0.0.1", "localhost");
    (server, base)
}

#[tokio::test]
async fn test_endpoint_redirect_off_domain_not_followed() {
    let server = MockServer::start().await;
    let (foreign, foreign_base) = start_foreign_server().await;

    mount_index(&server, &["/api/v2/get-space"]).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/get-space"))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "location",
            format!("{}/evil", foreign_base).as_str(),
        ))
        .mount(&server)
        .await;

    let output = run_crawl(create_test_config(), create_test_profile(&server))
        .await
        .expect("Crawl failed");

    assert!(output.collection.items.is_empty());
    assert_eq!(output.report.skipped, 1);
    assert!(foreign.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_endpoint_redirect_off_domain_aborts_when_configured() {
    let server = MockServer::start().await;
    let (foreign, foreign_base) = start_foreign_server().await;

    mount_index(&server, &["/api/v2/get-space"]).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/get-space"))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "location",
            format!("{}/evil", foreign_base).as_str(),
        ))
        .mount(&server)
        .await;

    let mut config = create_test_config();
    config.crawler.on_endpoint_error = EndpointErrorPolicy::Abort;

    let result = run_crawl(config, create_test_profile(&server)).await;
    match result {
        Err(CollectorError::EndpointFetch { reason, .. }) => {
            assert!(reason.contains("leaves the allowed domain"));
        }
        other => panic!("expected EndpointFetch error, got {:?}", other.map(|o| o.report)),
    }
    assert!(foreign.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_index_redirect_off_domain_is_fatal() {
    let server = MockServer::start().await;
    let (foreign, foreign_base) = start_foreign_server().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(301).insert_header(
            "location",
            format!("{}/docs", foreign_base).as_str(),
        ))
        .mount(&server)
        .await;

    let result = run_crawl(create_test_config(), create_test_profile(&server)).await;
    assert!(matches!(result, Err(CollectorError::IndexFetch { .. })));
    assert!(foreign.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_endpoint_redirect_on_domain_followed() {
    let server = MockServer::start().await;

    mount_index(&server, &["/api/v2/get-space"]).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/get-space"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/api/v2/space-info"))
        .mount(&server)
        .await;
    mount_endpoint(
        &server,
        "/api/v2/space-info",
        endpoint_page("Get Space", "GET", "/api/v2/space"),
    )
    .await;

    let output = run_crawl(create_test_config(), create_test_profile(&server))
        .await
        .expect("Crawl failed");
    assert_eq!(item_names(&output.collection), vec!["Get Space"]);
}

#[tokio::test]
async fn test_invalid_config_rejected_before_fetching() {
    let server = MockServer::start().await;
    mount_index(&server, &["/api/v2/get-space"]).await;

    let mut config = create_test_config();
    config.crawler.max_concurrent_fetches = 0;

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run_crawl(config, create_test_profile(&server)),
    )
    .await
    .expect("run did not finish");

    assert!(matches!(result, Err(CollectorError::Config(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
