//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that drives the frontier:
//! - Claiming pending URLs from the registry in discovery order
//! - Probing content types and extracting links from HTML pages
//! - Folding discovered in-scope links back into the registry
//! - Assembling and writing the sitemap once the frontier is exhausted
//!
//! The loop is the only writer of [`CrawlState`]. Probe/extract steps run as
//! tasks and hand their results back; registry mutations happen here, one
//! result at a time.

use crate::config::{validate, CrawlerConfig, RelativeBase};
use crate::crawler::fetcher::{
    build_http_client, ContentTypeProber, HttpProber, ProbeError, HTML_MIME,
};
use crate::crawler::parser::{ExtractError, HttpLinkExtractor, LinkExtractor};
use crate::output::{assemble, write_sitemap, CrawlReport};
use crate::state::{CrawlPhase, CrawlState};
use crate::url::{canonicalize, classify, parse_root, resolve, LinkScope, RootContext};
use crate::CrawlError;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{self, JoinSet};
use url::Url;

/// Intermediate notifications emitted while a crawl runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlProgress {
    /// A URL was claimed from the frontier
    Started { index: usize, url: String },

    /// A URL's step finished and its results were folded into the registry
    Visited { url: String, outcome: StepOutcome },

    /// The frontier is exhausted
    Finished { urls: usize },
}

/// What happened to one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Probe failed; the URL stays listed but was not examined further
    ProbeFailed(String),

    /// Probe succeeded with a MIME type other than HTML
    NotHtml(String),

    /// HTML page whose link extraction failed
    ExtractFailed(String),

    /// HTML page; `discovered` new registry keys came from it
    Html { discovered: usize },
}

/// Result of probing and (maybe) extracting one page, produced off the loop
#[derive(Debug)]
struct PageVisit {
    key: String,
    page: Option<Url>,
    result: VisitResult,
}

#[derive(Debug)]
enum VisitResult {
    ProbeFailed(ProbeError),
    NotHtml(String),
    ExtractFailed(ExtractError),
    Links(Vec<String>),
}

/// Everything a visit task needs, cloned into each task
#[derive(Clone)]
struct VisitContext {
    prober: Arc<dyn ContentTypeProber>,
    extractor: Arc<dyn LinkExtractor>,
    user_agent: Option<String>,
    probe_timeout: Duration,
    render_timeout: Duration,
}

/// Single-host crawl engine
pub struct Crawler {
    root: RootContext,
    config: CrawlerConfig,
    state: CrawlState,
    prober: Arc<dyn ContentTypeProber>,
    extractor: Arc<dyn LinkExtractor>,
    progress: Option<mpsc::UnboundedSender<CrawlProgress>>,
}

impl Crawler {
    /// Creates a crawler using the built-in HTTP prober and link extractor
    ///
    /// # Arguments
    ///
    /// * `root` - Absolute starting URL (scheme and host required)
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl; the root is registered as pending
    /// * `Err(CrawlError)` - The root URL is malformed, the configuration is
    ///   invalid, or the HTTP client could not be built
    pub fn new(root: &str, config: CrawlerConfig) -> Result<Self, CrawlError> {
        validate(&config)?;
        let client = build_http_client(&config)?;
        let prober = Arc::new(HttpProber::new(client.clone()));
        let extractor = Arc::new(HttpLinkExtractor::new(client));
        Self::with_collaborators(root, config, prober, extractor)
    }

    /// Creates a crawler with caller-supplied probing and extraction
    pub fn with_collaborators(
        root: &str,
        config: CrawlerConfig,
        prober: Arc<dyn ContentTypeProber>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Result<Self, CrawlError> {
        validate(&config)?;
        let root = parse_root(root)?;
        let state = CrawlState::seeded(root.key());

        Ok(Self {
            root,
            config,
            state,
            prober,
            extractor,
            progress: None,
        })
    }

    /// Subscribes to progress notifications
    ///
    /// Only the most recent subscriber receives events.
    pub fn progress(&mut self) -> mpsc::UnboundedReceiver<CrawlProgress> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.progress = Some(tx);
        rx
    }

    pub fn root(&self) -> &RootContext {
        &self.root
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn phase(&self) -> CrawlPhase {
        self.state.phase()
    }

    /// Runs the crawl until every discovered URL has been processed
    ///
    /// Per-URL failures are logged and absorbed. When the sitemap is enabled
    /// it is assembled from the final registry and written; a write failure is
    /// logged and leaves `sitemap` unset in the report.
    ///
    /// Calling this again continues from the current cursor.
    pub async fn crawl(&mut self) -> CrawlReport {
        let started_at = Utc::now();
        let limit = self.config.max_concurrency.max(1);
        let context = VisitContext {
            prober: Arc::clone(&self.prober),
            extractor: Arc::clone(&self.extractor),
            user_agent: self.config.user_agent.clone(),
            probe_timeout: self.config.probe_timeout(),
            render_timeout: self.config.render_timeout(),
        };
        let mut in_flight = JoinSet::new();
        let mut claimed: HashMap<task::Id, String> = HashMap::new();

        loop {
            while in_flight.len() < limit {
                let Some((index, key)) = self.state.next_pending() else {
                    break;
                };
                if self.config.verbose {
                    tracing::info!("> checking... [{}] {}", index, key);
                } else {
                    tracing::debug!("Processing URL [{}]: {}", index, key);
                }
                self.emit(CrawlProgress::Started {
                    index,
                    url: key.clone(),
                });
                let handle = in_flight.spawn(visit_page(key.clone(), context.clone()));
                claimed.insert(handle.id(), key);
            }

            let Some(joined) = in_flight.join_next_with_id().await else {
                break;
            };

            match joined {
                Ok((id, visit)) => {
                    claimed.remove(&id);
                    let key = visit.key.clone();
                    let outcome =
                        apply_visit(&mut self.state, &self.root, self.config.relative_base, visit);
                    self.log_outcome(&key, &outcome);
                    self.emit(CrawlProgress::Visited { url: key, outcome });
                }
                Err(e) => {
                    let Some(key) = claimed.remove(&e.id()) else {
                        tracing::error!("Crawl step aborted: {}", e);
                        continue;
                    };
                    tracing::error!("Crawl step for {} aborted: {}", key, e);
                    self.state.registry_mut().mark_visited(&key);
                    let outcome = StepOutcome::ExtractFailed(format!("step aborted: {}", e));
                    self.emit(CrawlProgress::Visited { url: key, outcome });
                }
            }
        }

        let urls = self.state.cursor();
        tracing::info!(
            "Crawl finished: {} URLs processed ({} in registry)",
            urls,
            self.state.registry().len()
        );
        self.emit(CrawlProgress::Finished { urls });

        let sitemap = self.write_sitemap();

        CrawlReport {
            urls,
            sitemap,
            started_at,
            finished_at: Utc::now(),
        }
    }

    fn write_sitemap(&self) -> Option<usize> {
        let path = self.config.sitemap.path()?;
        if self.config.verbose {
            tracing::info!("> generating {}...", path.display());
        }

        let document = assemble(self.state.registry(), &self.root);
        match write_sitemap(&document, path) {
            Ok(count) => {
                tracing::info!("Sitemap written to {} ({} entries)", path.display(), count);
                Some(count)
            }
            Err(e) => {
                tracing::warn!("Failed to write sitemap {}: {}", path.display(), e);
                None
            }
        }
    }

    fn log_outcome(&self, key: &str, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::ProbeFailed(reason) => {
                tracing::warn!("Probe failed for {}: {}", key, reason)
            }
            StepOutcome::ExtractFailed(reason) => {
                tracing::warn!("Link extraction failed for {}: {}", key, reason)
            }
            StepOutcome::NotHtml(mime) => tracing::debug!("Skipping {} ({})", key, mime),
            StepOutcome::Html { discovered } => {
                if self.config.verbose {
                    tracing::info!("done. {} new URLs from {}", discovered, key);
                } else {
                    tracing::debug!("{} new URLs from {}", discovered, key);
                }
            }
        }
    }

    fn emit(&self, event: CrawlProgress) {
        if let Some(tx) = &self.progress {
            // A dropped receiver only means nobody is listening
            let _ = tx.send(event);
        }
    }
}

/// Probes a page and, for HTML, extracts its links
///
/// Timeouts are reported exactly like the corresponding failure.
async fn visit_page(key: String, context: VisitContext) -> PageVisit {
    let page = match Url::parse(&key) {
        Ok(page) => page,
        Err(e) => {
            return PageVisit {
                key,
                page: None,
                result: VisitResult::ProbeFailed(ProbeError::Unreachable(e.to_string())),
            }
        }
    };

    let probed = tokio::time::timeout(context.probe_timeout, context.prober.probe(&page)).await;
    let mime = match probed {
        Ok(Ok(mime)) => mime,
        Ok(Err(e)) => return visit(key, page, VisitResult::ProbeFailed(e)),
        Err(_) => return visit(key, page, VisitResult::ProbeFailed(ProbeError::Timeout)),
    };

    if mime != HTML_MIME {
        return visit(key, page, VisitResult::NotHtml(mime));
    }

    let extracted = tokio::time::timeout(
        context.render_timeout,
        context
            .extractor
            .extract_links(&page, context.user_agent.as_deref()),
    )
    .await;

    let result = match extracted {
        Ok(Ok(links)) => VisitResult::Links(links),
        Ok(Err(e)) => VisitResult::ExtractFailed(e),
        Err(_) => VisitResult::ExtractFailed(ExtractError::Timeout),
    };
    visit(key, page, result)
}

fn visit(key: String, page: Url, result: VisitResult) -> PageVisit {
    PageVisit {
        key,
        page: Some(page),
        result,
    }
}

/// Commits one page's results to the crawl state
///
/// The page is marked visited first; for HTML pages each link is then
/// classified and, when in scope, inserted as pending unless already known.
fn apply_visit(
    state: &mut CrawlState,
    root: &RootContext,
    relative_base: RelativeBase,
    visit: PageVisit,
) -> StepOutcome {
    state.registry_mut().mark_visited(&visit.key);

    match visit.result {
        VisitResult::ProbeFailed(e) => StepOutcome::ProbeFailed(e.to_string()),
        VisitResult::NotHtml(mime) => StepOutcome::NotHtml(mime),
        VisitResult::ExtractFailed(e) => StepOutcome::ExtractFailed(e.to_string()),
        VisitResult::Links(links) => {
            let base = match (relative_base, visit.page.as_ref()) {
                (RelativeBase::Page, Some(page)) => page,
                _ => root.url(),
            };
            let discovered = fold_links(state, root, base, &links);
            StepOutcome::Html { discovered }
        }
    }
}

/// Inserts in-scope links as pending registry keys, in the order given
///
/// Returns how many keys were new.
fn fold_links(state: &mut CrawlState, root: &RootContext, base: &Url, links: &[String]) -> usize {
    let mut discovered = 0;

    for link in links {
        let absolute = match classify(link, root) {
            LinkScope::SameHost(url) => url,
            LinkScope::Relative(relative) => match resolve(&relative, base) {
                Some(url) => url,
                None => {
                    tracing::debug!("Failed to resolve {} against {}", relative, base);
                    continue;
                }
            },
            LinkScope::External => {
                tracing::trace!("Dropping out-of-scope link {}", link);
                continue;
            }
        };

        if state.registry_mut().insert_pending(canonicalize(&absolute)) {
            discovered += 1;
        }
    }

    discovered
}
