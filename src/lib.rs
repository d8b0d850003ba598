//! Extract structured problem data (statement, limits, tags, samples) from
//! online judge problem pages.
//!
//! ```no_run
//! # async fn demo() -> Result<(), judge_scraper::GetProblemError> {
//! let problem = judge_scraper::get_problem("https://codeforces.com/problemset/problem/1/A").await?;
//! assert_eq!(problem.name, "A. Theatre Square");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod problem;
pub mod registry;
pub mod scrapers;
pub mod telemetry;

pub use error::{ErrorKind, GetProblemError, ScraperError};
pub use problem::{Problem, TestCase};
pub use registry::Registry;

/// Fetch and extract the problem at `url` using every built-in judge and an
/// HTTP client configured from the environment.
pub async fn get_problem(url: &str) -> Result<Problem, GetProblemError> {
    let fetcher = fetch::HttpFetcher::from_env()
        .map_err(|e| GetProblemError::Client(e.to_string()))?;
    Registry::with_defaults(Arc::new(fetcher)).get_problem(url).await
}
