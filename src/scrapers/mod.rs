use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::ScraperError;
use crate::problem::Problem;

pub mod codeforces;
pub mod markup;
pub mod pattern;

pub use codeforces::{CodeforcesScraper, CodeforcesUrl};

/// Per-judge capability set. `get_params` and `extract_data` are pure;
/// `get_problem` is the only operation that touches the network.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Display name used in errors and logs.
    const JUDGE: &'static str;

    type Params: Serialize + Send;

    fn get_params(&self, url: &str) -> Option<Self::Params>;

    fn can_handle(&self, url: &str) -> bool { self.get_params(url).is_some() }

    async fn get_problem(&self, url: &str) -> Result<Problem, ScraperError>;

    fn extract_data(&self, html: &str) -> Result<Problem, ScraperError>;
}

/// Object-safe view of a [`Scraper`], used by the registry.
#[async_trait]
pub trait Judge: Send + Sync {
    fn name(&self) -> &'static str;
    fn can_handle(&self, url: &str) -> bool;
    fn params_json(&self, url: &str) -> Option<Value>;
    async fn get_problem(&self, url: &str) -> Result<Problem, ScraperError>;
}

#[async_trait]
impl<S: Scraper> Judge for S {
    fn name(&self) -> &'static str { S::JUDGE }

    fn can_handle(&self, url: &str) -> bool { Scraper::can_handle(self, url) }

    fn params_json(&self, url: &str) -> Option<Value> {
        self.get_params(url).and_then(|p| serde_json::to_value(p).ok())
    }

    async fn get_problem(&self, url: &str) -> Result<Problem, ScraperError> {
        Scraper::get_problem(self, url).await
    }
}
