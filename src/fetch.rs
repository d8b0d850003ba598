use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::config::FetchConfig;

/// Raw HTTP response as seen by the scrapers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub reason: Option<String>,
    pub body: String,
}

impl Page {
    pub fn ok(body: impl Into<String>) -> Self {
        Page { status: 200, reason: Some("OK".to_string()), body: body.into() }
    }

    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// Single GET with no retry. Transport failures are returned as errors;
/// non-success statuses come back as a `Page` so callers can report them.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<Page>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(t) = cfg.timeout { builder = builder.timeout(t); }
        Ok(HttpFetcher { client: builder.build()? })
    }

    pub fn from_env() -> Result<Self> { Self::new(&FetchConfig::from_env()) }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Page> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let reason = status.canonical_reason().map(|s| s.to_string());
        let body = resp.text().await?;
        Ok(Page { status: status.as_u16(), reason, body })
    }
}
