use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default sitemap file name
pub const DEFAULT_SITEMAP_PATH: &str = "sitemap.xml";

/// Default user agent string sent by the HTTP client
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Unknown; Linux i686) AppleWebKit/538.1 (KHTML, like Gecko) PhantomJS/2.1.1 Safari/538.1";

/// Main configuration structure for Site-Sitemap
///
/// Every key is optional; a missing file section falls back to [`Default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Where to write the sitemap, or `false` to skip it
    pub sitemap: SitemapOutput,

    /// User agent override passed to the link extractor and HTTP client
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,

    /// Step-by-step progress reporting
    pub verbose: bool,

    /// Maximum number of URLs probed/extracted at the same time
    #[serde(rename = "max-concurrency")]
    pub max_concurrency: usize,

    /// Upper bound on a single content-type probe (milliseconds)
    #[serde(rename = "probe-timeout-ms")]
    pub probe_timeout_ms: u64,

    /// Upper bound on fetching and extracting links from one page (milliseconds)
    #[serde(rename = "render-timeout-ms")]
    pub render_timeout_ms: u64,

    /// Base URL for resolving relative links
    #[serde(rename = "relative-base")]
    pub relative_base: RelativeBase,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            sitemap: SitemapOutput::default(),
            user_agent: None,
            verbose: false,
            max_concurrency: 1,
            probe_timeout_ms: 10_000,
            render_timeout_ms: 30_000,
            relative_base: RelativeBase::default(),
        }
    }
}

impl CrawlerConfig {
    /// User agent actually sent on the wire
    pub fn effective_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }
}

/// Sitemap output setting
///
/// In TOML this is either a path string or a boolean: `false` disables the
/// sitemap, `true` selects the default file name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSitemapSetting")]
pub enum SitemapOutput {
    Path(PathBuf),
    Disabled,
}

impl SitemapOutput {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Path(path) => Some(path),
            Self::Disabled => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Path(_))
    }
}

impl Default for SitemapOutput {
    fn default() -> Self {
        Self::Path(PathBuf::from(DEFAULT_SITEMAP_PATH))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSitemapSetting {
    Flag(bool),
    Path(PathBuf),
}

impl From<RawSitemapSetting> for SitemapOutput {
    fn from(raw: RawSitemapSetting) -> Self {
        match raw {
            RawSitemapSetting::Flag(true) => Self::default(),
            RawSitemapSetting::Flag(false) => Self::Disabled,
            RawSitemapSetting::Path(path) => Self::Path(path),
        }
    }
}

/// Which URL relative links are resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeBase {
    /// Always the crawl root, whatever page the link came from
    #[default]
    Root,
    /// The page the link was found on
    Page,
}
