use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::Instrument;

use crate::error::ScraperError;
use crate::fetch::Fetch;
use crate::problem::Problem;
use crate::scrapers::Scraper;
use crate::telemetry::{self};
use crate::telemetry::ops::problem::Phase as ProblemPhase;

mod extract;
mod urls;

pub use urls::{parse_url, CodeforcesUrl};

pub const HOST: &str = "codeforces.com";
pub(crate) const JUDGE: &str = "Codeforces";

pub struct CodeforcesScraper {
    fetcher: Arc<dyn Fetch>,
}

impl CodeforcesScraper {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        CodeforcesScraper { fetcher }
    }
}

#[async_trait]
impl Scraper for CodeforcesScraper {
    const JUDGE: &'static str = JUDGE;

    type Params = CodeforcesUrl;

    fn get_params(&self, url: &str) -> Option<CodeforcesUrl> {
        parse_url(url).ok()
    }

    async fn get_problem(&self, url: &str) -> Result<Problem, ScraperError> {
        let log = telemetry::problem();
        let params = parse_url(url)?;

        let page = self
            .fetcher
            .get(url)
            .instrument(log.span_kv(&ProblemPhase::Fetch, [("url", url.to_string())]))
            .await
            .map_err(|e| ScraperError::network(JUDGE, format!("Failed to fetch problem page: {e}")))?;
        if !page.is_success() {
            let reason = page.reason.as_deref().unwrap_or("");
            return Err(ScraperError::network(
                JUDGE,
                format!("Failed to fetch problem page: {} {}", page.status, reason).trim_end().to_string(),
            ));
        }
        if page.body.is_empty() {
            return Err(ScraperError::network(JUDGE, "Received empty HTML from server"));
        }
        log.debug_kv("fetched", [("status", page.status.to_string()), ("bytes", page.body.len().to_string())]);

        let mut problem = {
            let _s = log.span(&ProblemPhase::Extract).entered();
            self.extract_data(&page.body)?
        };
        params.annotate(&mut problem.metadata);
        problem.metadata.insert("url".into(), Value::from(url));
        log.extracted(JUDGE, &problem.name, problem.sample_test_cases.len(), problem.tags.len());
        Ok(problem)
    }

    fn extract_data(&self, html: &str) -> Result<Problem, ScraperError> {
        extract::extract(html)
    }
}
