//! Crawl coordinator - two-phase collection run
//!
//! Phase one fetches the index page and returns the finite list of endpoint
//! links found on it. Phase two fans out one fetch-and-extract task per link,
//! bounded by a semaphore, and gathers the results over a channel:
//! - Tasks never touch the collection; the coordinator loop is the only writer
//! - The collection is finalized only after the channel closes and every
//!   task has been joined
//! - A failed endpoint page is skipped or aborts the run, per configuration

use crate::collection::{assemble_endpoint, Collection, CollectionStore, EndpointRecord};
use crate::config::{validate, Config, EndpointErrorPolicy, SiteProfile};
use crate::crawler::discovery::{discover_endpoints, DiscoveredLink, DiscoveryOptions};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::extract::FieldExtractor;
use crate::output::CrawlReport;
use crate::state::{PageKind, PageState};
use crate::url::normalize_url;
use crate::CollectorError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use url::Url;

/// What became of one endpoint page
#[derive(Debug)]
pub struct PageOutcome {
    /// Position of the link on the index page
    pub index: usize,

    /// Endpoint page URL
    pub url: Url,

    /// Terminal state of the page
    pub state: PageState,

    /// The assembled record, or why the page could not be read
    pub result: Result<EndpointRecord, String>,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct CrawlOutput {
    pub collection: Collection,
    pub report: CrawlReport,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    profile: SiteProfile,
    client: Client,
    extractor: Arc<FieldExtractor>,
}

impl Coordinator {
    /// Creates a coordinator for one site profile
    ///
    /// # Errors
    ///
    /// Returns `CollectorError::Config` if the configuration does not
    /// validate, or `CollectorError::Reqwest` if the HTTP client cannot be
    /// built.
    pub fn new(config: Config, profile: SiteProfile) -> Result<Self, CollectorError> {
        validate(&config)?;

        let timeout = Duration::from_secs(config.crawler.request_timeout);
        let client = build_http_client(
            &config.user_agent,
            &config.crawler.allowed_domain,
            timeout,
        )?;
        let extractor = Arc::new(FieldExtractor::new(&profile));

        Ok(Self {
            config: Arc::new(config),
            profile,
            client,
            extractor,
        })
    }

    /// Runs both phases and returns the finished collection
    pub async fn run(&self) -> Result<CrawlOutput, CollectorError> {
        let mut report = CrawlReport::start();

        tracing::info!("Fetching {} page {}", PageKind::Index, self.profile.root_url);
        let links = self.discover().await?;
        report.discovered = links.len();

        if links.is_empty() {
            tracing::warn!(
                "No endpoint links matched '{}' on {}",
                self.profile.link_selector,
                self.profile.root_url
            );
        } else {
            tracing::info!("Discovered {} endpoint pages", links.len());
        }

        let collection = self.collect(links, &mut report).await?;
        report.finish();

        Ok(CrawlOutput { collection, report })
    }

    /// Phase one: fetch the index page and list its endpoint links
    ///
    /// Any failure here is fatal and reported as `IndexFetch`.
    async fn discover(&self) -> Result<Vec<DiscoveredLink>, CollectorError> {
        let root = normalize_url(&self.profile.root_url)?;
        let index_error = |reason: String| CollectorError::IndexFetch {
            url: root.to_string(),
            reason,
        };

        let (base_url, body) = match fetch_url(&self.client, root.as_str()).await {
            FetchResult::Success {
                final_url, body, ..
            } => (Url::parse(&final_url)?, body),
            other => {
                let reason = other.into_body().err().unwrap_or_default();
                tracing::error!("{} page {} failed: {}", PageKind::Index, root, reason);
                return Err(index_error(reason));
            }
        };

        discover_endpoints(
            &body,
            &base_url,
            &DiscoveryOptions {
                link_selector: &self.profile.link_selector,
                allowed_domain: &self.config.crawler.allowed_domain,
                deduplicate: self.config.crawler.deduplicate,
            },
        )
    }

    /// Phase two: fetch and extract every endpoint page
    async fn collect(
        &self,
        links: Vec<DiscoveredLink>,
        report: &mut CrawlReport,
    ) -> Result<Collection, CollectorError> {
        let crawler = &self.config.crawler;
        let semaphore = Arc::new(Semaphore::new(crawler.max_concurrent_fetches as usize));
        let (tx, mut rx) = mpsc::channel::<PageOutcome>(links.len().max(1));
        let mut tasks = JoinSet::new();

        for link in links {
            let client = self.client.clone();
            let extractor = Arc::clone(&self.extractor);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let policy = crawler.on_endpoint_error;

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| CollectorError::Task(e.to_string()))?;

                let outcome = process_endpoint(&client, &extractor, link, policy).await?;

                // The receiver only goes away after an abort.
                let _ = tx.send(outcome).await;
                Ok::<(), CollectorError>(())
            });
        }

        // Only task senders remain, so the channel closes when the last task ends.
        drop(tx);

        let store = CollectionStore::new();

        while let Some(outcome) = rx.recv().await {
            match (outcome.state, outcome.result) {
                (PageState::Extracted, Ok(record)) => {
                    if !record.is_complete() {
                        tracing::warn!("{} has no method or URL", outcome.url);
                        report.incomplete += 1;
                    }
                    report.extracted += 1;
                    store.append(outcome.index, record);
                }
                (PageState::Failed, Err(reason)) => {
                    tracing::error!("Endpoint page {} failed: {}", outcome.url, reason);
                    tasks.abort_all();
                    return Err(CollectorError::EndpointFetch {
                        url: outcome.url.to_string(),
                        reason,
                    });
                }
                (_, Err(reason)) => {
                    tracing::warn!("Skipping {}: {}", outcome.url, reason);
                    report.skipped += 1;
                }
                (state, Ok(_)) => {
                    tracing::debug!("Ignoring record for {} in state {}", outcome.url, state);
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e),
                Err(e) => return Err(CollectorError::Task(e.to_string())),
            }
        }

        Ok(store.finalize(&self.config.output.collection_name, crawler.order))
    }
}

/// Fetches one endpoint page and extracts its record
///
/// The page moves `Discovered -> Fetching` and then to `Extracted`, or to
/// `Skipped`/`Failed` depending on `policy` when the fetch fails. The HTML
/// document is parsed and dropped before returning.
pub async fn process_endpoint(
    client: &Client,
    extractor: &FieldExtractor,
    link: DiscoveredLink,
    policy: EndpointErrorPolicy,
) -> Result<PageOutcome, CollectorError> {
    let state = PageState::Discovered.transition(PageState::Fetching)?;
    tracing::debug!("Fetching {} page {}", PageKind::Endpoint, link.url);

    let (state, result) = match fetch_url(client, link.url.as_str()).await.into_body() {
        Ok(body) => {
            let fields = extractor.extract(&body);
            (
                state.transition(PageState::Extracted)?,
                Ok(assemble_endpoint(fields)),
            )
        }
        Err(reason) => {
            let next = match policy {
                EndpointErrorPolicy::Skip => PageState::Skipped,
                EndpointErrorPolicy::Abort => PageState::Failed,
            };
            (state.transition(next)?, Err(reason))
        }
    };

    Ok(PageOutcome {
        index: link.index,
        url: link.url,
        state,
        result,
    })
}

/// Runs a complete collection with the given configuration and profile
///
/// # Example
///
/// ```no_run
/// use backlog_postman::config::{Config, Locale, SiteProfile};
/// use backlog_postman::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let output = run_crawl(Config::default(), SiteProfile::for_locale(Locale::English)).await?;
/// println!("{} endpoints", output.collection.items.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, profile: SiteProfile) -> Result<CrawlOutput, CollectorError> {
    let coordinator = Coordinator::new(config, profile)?;
    coordinator.run().await
}
