use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use url::Url;

use crate::error::GetProblemError;
use crate::fetch::Fetch;
use crate::problem::Problem;
use crate::scrapers::{codeforces, CodeforcesScraper, Judge};
use crate::telemetry::{self};
use crate::telemetry::ops::params::Phase as ParamsPhase;
use crate::telemetry::ops::problem::Phase as ProblemPhase;

/// Hostname → scraper table. Built once, read-only afterwards.
pub struct Registry {
    scrapers: HashMap<String, Box<dyn Judge>>,
}

#[derive(Default)]
pub struct RegistryBuilder {
    scrapers: HashMap<String, Box<dyn Judge>>,
}

impl RegistryBuilder {
    /// Later registrations for the same hostname replace earlier ones.
    pub fn register(mut self, domain: impl Into<String>, judge: impl Judge + 'static) -> Self {
        self.scrapers.insert(domain.into().to_ascii_lowercase(), Box::new(judge));
        self
    }

    pub fn build(self) -> Registry {
        Registry { scrapers: self.scrapers }
    }
}

/// A URL resolved to its judge without fetching anything.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved {
    pub domain: String,
    pub judge: &'static str,
    pub params: Value,
}

impl Registry {
    pub fn builder() -> RegistryBuilder { RegistryBuilder::default() }

    /// Every supported judge, sharing one fetcher.
    pub fn with_defaults(fetcher: Arc<dyn Fetch>) -> Self {
        Self::builder()
            .register(codeforces::HOST, CodeforcesScraper::new(fetcher))
            .build()
    }

    /// `(hostname, judge name)` pairs sorted by hostname.
    pub fn judges(&self) -> Vec<(&str, &'static str)> {
        let mut out: Vec<(&str, &'static str)> = self.scrapers.iter().map(|(d, j)| (d.as_str(), j.name())).collect();
        out.sort();
        out
    }

    /// Hostname lookup plus the shape check, shared by `params` and `get_problem`.
    fn resolve(&self, url: &str) -> Result<(String, &dyn Judge), GetProblemError> {
        let domain = extract_domain(url)?;
        let judge = self
            .scrapers
            .get(&domain)
            .ok_or_else(|| GetProblemError::UnsupportedDomain(domain.clone()))?;
        if !judge.can_handle(url) {
            return Err(GetProblemError::UnsupportedUrl { domain, url: url.to_string() });
        }
        Ok((domain, judge.as_ref()))
    }

    pub fn params(&self, url: &str) -> Result<Resolved, GetProblemError> {
        let log = telemetry::params();
        let _g = log.root_span_kv([("url", url.to_string())]).entered();
        let _s = log.span(&ParamsPhase::Match).entered();
        let (domain, judge) = self.resolve(url)?;
        let params = judge.params_json(url).unwrap_or(Value::Null);
        Ok(Resolved { domain, judge: judge.name(), params })
    }

    pub async fn get_problem(&self, url: &str) -> Result<Problem, GetProblemError> {
        let log = telemetry::problem();
        let (domain, judge) = {
            let _s = log.span_kv(&ProblemPhase::Resolve, [("url", url.to_string())]).entered();
            self.resolve(url)?
        };
        log.debug_kv("dispatch", [("domain", domain), ("judge", judge.name().to_string())]);
        let problem = judge.get_problem(url).instrument(log.root_span()).await?;
        Ok(problem)
    }
}

fn extract_domain(url: &str) -> Result<String, GetProblemError> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().filter(|h| !h.is_empty()).map(|h| h.to_string()))
        .ok_or_else(|| GetProblemError::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ScraperError};
    use crate::fetch::Page;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PAGE_1A: &str = include_str!("../tests/fixtures/codeforces_1a.html");

    #[derive(Default)]
    struct Counting { calls: AtomicUsize, body: String }

    #[async_trait]
    impl Fetch for Counting {
        async fn get(&self, _url: &str) -> Result<Page> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Page::ok(self.body.clone()))
        }
    }

    fn registry(body: &str) -> (Registry, Arc<Counting>) {
        let fetcher = Arc::new(Counting { calls: AtomicUsize::new(0), body: body.to_string() });
        (Registry::with_defaults(fetcher.clone()), fetcher)
    }

    #[test]
    fn domain_of_valid_and_invalid_urls() {
        assert_eq!(extract_domain("https://CODEFORCES.com/contest/1/problem/A").unwrap(), "codeforces.com");
        let e = extract_domain("not-a-url").unwrap_err();
        assert_eq!(e.to_string(), "Failed to get problem: Invalid URL: not-a-url");
        assert!(matches!(extract_domain("mailto:someone@example.com"), Err(GetProblemError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn dispatches_to_codeforces() {
        let (reg, fetcher) = registry(PAGE_1A);
        let p = reg.get_problem("https://codeforces.com/contest/1/problem/A").await.unwrap();
        assert_eq!(p.name, "A. Theatre Square");
        assert_eq!(p.difficulty.as_deref(), Some("*1000"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unsupported_domain_is_named() {
        let (reg, fetcher) = registry(PAGE_1A);
        let e = reg.get_problem("https://unsupported-judge.com/problem/123").await.unwrap_err();
        assert!(e.to_string().contains("No scraper found for domain unsupported-judge.com"));
        assert!(e.to_string().starts_with("Failed to get problem: "));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_url_is_named() {
        let (reg, _) = registry(PAGE_1A);
        let e = reg.get_problem("not-a-url").await.unwrap_err();
        assert!(e.to_string().contains("Invalid URL: not-a-url"));
        assert_eq!(e.kind(), Some(ErrorKind::InvalidUrl));
    }

    #[tokio::test]
    async fn unsupported_shape_on_known_domain() {
        let (reg, fetcher) = registry(PAGE_1A);
        let url = "https://codeforces.com/blog/entry/1";
        let e = reg.get_problem(url).await.unwrap_err();
        assert_eq!(
            e.to_string(),
            format!("Failed to get problem: The codeforces.com scraper does not support this specific URL format: {url}")
        );
        assert_eq!(e.kind(), Some(ErrorKind::InvalidUrl));
        assert_eq!(reg.params(url).unwrap_err().kind(), Some(ErrorKind::InvalidUrl));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn scraper_errors_keep_their_message() {
        let (reg, _) = registry("<html><body></body></html>");
        let e = reg.get_problem("https://codeforces.com/contest/1/problem/A").await.unwrap_err();
        assert_eq!(e.to_string(), "Failed to get problem: [Codeforces] Parsing error: Problem statement not found");
        match e {
            GetProblemError::Scraper(ScraperError { kind, .. }) => assert_eq!(kind, ErrorKind::Parsing),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn params_without_fetching() {
        let (reg, fetcher) = registry("");
        let r = reg.params("https://codeforces.com/group/9Ei3G8AUCY/contest/599780/problem/A").unwrap();
        assert_eq!(r.domain, "codeforces.com");
        assert_eq!(r.judge, "Codeforces");
        assert_eq!(r.params, json!({ "type": "group_url", "groupId": "9Ei3G8AUCY", "contestId": "599780", "problemId": "A" }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn lists_judges_and_custom_registration() {
        let (reg, _) = registry("");
        assert_eq!(reg.judges(), vec![("codeforces.com", "Codeforces")]);

        let fetcher: Arc<dyn Fetch> = Arc::new(Counting::default());
        let reg = Registry::builder()
            .register("Mirror.Codeforces.COM", CodeforcesScraper::new(fetcher.clone()))
            .register("codeforces.com", CodeforcesScraper::new(fetcher))
            .build();
        assert_eq!(reg.judges(), vec![("codeforces.com", "Codeforces"), ("mirror.codeforces.com", "Codeforces")]);
        // the mirror host is registered but its URLs never match the codeforces patterns
        assert!(matches!(
            reg.params("https://mirror.codeforces.com/contest/1/problem/A"),
            Err(GetProblemError::UnsupportedUrl { .. })
        ));
    }
}
