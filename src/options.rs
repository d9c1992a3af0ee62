//! Configuration for fetching and output.
//!
//! The extraction engine itself is deterministic with fixed thresholds, so
//! `Options` only carries the fetcher and output knobs. An `Options` value is
//! passed explicitly into each call; there is no process-wide state.

use std::time::Duration;

/// Default user-agent pool, rotated per request.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.86 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
];

/// Configuration options for page fetching and JSON output.
///
/// Use `Default::default()` for standard settings:
///
/// ```rust
/// use pressclip::Options;
///
/// let options = Options {
///     timeout: std::time::Duration::from_secs(30),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// HTTP request timeout.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,

    /// User-agent pool to rotate between requests.
    ///
    /// Empty entries are ignored; an empty pool falls back to
    /// [`DEFAULT_USER_AGENTS`].
    pub user_agents: Vec<String>,

    /// Pretty-print JSON output.
    ///
    /// Default: `true`
    pub pretty_json: bool,
}

impl Options {
    /// Build options with a caller-supplied user agent, falling back to the
    /// default pool when `user_agent` is empty or absent.
    #[must_use]
    pub fn with_user_agent(user_agent: Option<&str>) -> Self {
        let user_agents = match user_agent.map(str::trim) {
            Some(ua) if !ua.is_empty() => vec![ua.to_string()],
            _ => DEFAULT_USER_AGENTS.iter().map(ToString::to_string).collect(),
        };
        Self {
            user_agents,
            ..Self::default()
        }
    }

    /// The effective user-agent pool (never empty).
    #[must_use]
    pub fn user_agent_pool(&self) -> Vec<String> {
        let pool: Vec<String> = self
            .user_agents
            .iter()
            .map(|ua| ua.trim().to_string())
            .filter(|ua| !ua.is_empty())
            .collect();
        if pool.is_empty() {
            DEFAULT_USER_AGENTS.iter().map(ToString::to_string).collect()
        } else {
            pool
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agents: DEFAULT_USER_AGENTS.iter().map(ToString::to_string).collect(),
            pretty_json: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = Options::default();
        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.user_agents.len(), DEFAULT_USER_AGENTS.len());
        assert!(opts.pretty_json);
    }

    #[test]
    fn custom_user_agent_replaces_pool() {
        let opts = Options::with_user_agent(Some("TestBot/1.0"));
        assert_eq!(opts.user_agent_pool(), vec!["TestBot/1.0".to_string()]);
    }

    #[test]
    fn blank_user_agent_falls_back_to_defaults() {
        let opts = Options::with_user_agent(Some("   "));
        assert_eq!(opts.user_agent_pool().len(), DEFAULT_USER_AGENTS.len());
    }

    #[test]
    fn empty_pool_never_returned() {
        let opts = Options {
            user_agents: vec![String::new()],
            ..Options::default()
        };
        assert!(!opts.user_agent_pool().is_empty());
    }
}
