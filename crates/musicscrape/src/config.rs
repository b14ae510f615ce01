//! Runtime configuration.
//!
//! Everything has a default; environment variables override the defaults and
//! command-line flags override the environment.

use crate::diagnostics::{Diagnostics, Silent, TracingDiagnostics};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("musicscrape/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Settings shared by the fetch client and the extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Report skipped items through `tracing`.
    pub log_diagnostics: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            log_diagnostics: true,
        }
    }
}

impl ScrapeConfig {
    /// Defaults overridden by `MUSICSCRAPE_USER_AGENT`, `MUSICSCRAPE_TIMEOUT_MS`
    /// and `MUSICSCRAPE_QUIET` (quiet only for `1`, `true`, `yes` or `on`).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(agent) = lookup("MUSICSCRAPE_USER_AGENT").filter(|a| !a.trim().is_empty()) {
            config.user_agent = agent;
        }
        if let Some(ms) = lookup("MUSICSCRAPE_TIMEOUT_MS").and_then(|v| v.trim().parse::<u64>().ok()) {
            config.timeout = Duration::from_millis(ms);
        }
        if lookup("MUSICSCRAPE_QUIET").is_some_and(|v| is_truthy(&v)) {
            config.log_diagnostics = false;
        }

        config
    }

    /// The diagnostics sink extraction calls should report to.
    pub fn diagnostics(&self) -> Arc<dyn Diagnostics> {
        if self.log_diagnostics {
            Arc::new(TracingDiagnostics)
        } else {
            Arc::new(Silent)
        }
    }
}

/// `1`, `true`, `yes` and `on`, in any case.
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
