use crate::config::types::{CrawlerConfig, SitemapOutput};
use crate::ConfigError;

/// Largest accepted `max-concurrency`
pub const MAX_CONCURRENCY: usize = 64;

/// Smallest accepted probe/render timeout (milliseconds)
pub const MIN_TIMEOUT_MS: u64 = 100;

/// Validates the entire configuration
pub fn validate(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_sitemap(&config.sitemap)?;
    validate_user_agent(config.user_agent.as_deref())?;
    validate_limits(config)?;
    Ok(())
}

fn validate_sitemap(sitemap: &SitemapOutput) -> Result<(), ConfigError> {
    if let SitemapOutput::Path(path) = sitemap {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sitemap path cannot be empty (use sitemap = false to disable)".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_user_agent(user_agent: Option<&str>) -> Result<(), ConfigError> {
    let Some(user_agent) = user_agent else {
        return Ok(());
    };

    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    // Must be a legal header value
    if user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent must not contain control characters, got '{}'",
            user_agent.escape_debug()
        )));
    }

    Ok(())
}

fn validate_limits(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrency < 1 || config.max_concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "max-concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.max_concurrency
        )));
    }

    if config.probe_timeout_ms < MIN_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "probe-timeout-ms must be >= {}ms, got {}ms",
            MIN_TIMEOUT_MS, config.probe_timeout_ms
        )));
    }

    if config.render_timeout_ms < MIN_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "render-timeout-ms must be >= {}ms, got {}ms",
            MIN_TIMEOUT_MS, config.render_timeout_ms
        )));
    }

    Ok(())
}
