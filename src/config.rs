use std::env;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("judge-scraper/", env!("CARGO_PKG_VERSION"));

/// HTTP settings for the page fetcher, read from `OJS_*` variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig { user_agent: DEFAULT_USER_AGENT.to_string(), timeout: None }
    }
}

impl FetchConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("OJS_USER_AGENT").ok().as_deref(),
            env::var("OJS_HTTP_TIMEOUT_SECS").ok().as_deref(),
        )
    }

    fn from_vars(user_agent: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let user_agent = match user_agent.map(str::trim) {
            Some(ua) if !ua.is_empty() => ua.to_string(),
            _ => DEFAULT_USER_AGENT.to_string(),
        };
        // unparsable or zero means no timeout
        let timeout = timeout_secs
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);
        FetchConfig { user_agent, timeout }
    }
}
