use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ScraperError;
use crate::scrapers::pattern::{group, PatternTable};

use super::{HOST, JUDGE};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Shape { Contest, Problemset, Gym, Group }

/// Identifiers encoded in a Codeforces problem URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CodeforcesUrl {
    #[serde(rename = "contest_url", rename_all = "camelCase")]
    Contest { contest_id: String, problem_id: String },
    #[serde(rename = "problemset_url", rename_all = "camelCase")]
    Problemset { contest_id: String, problem_id: String },
    #[serde(rename = "gym_url", rename_all = "camelCase")]
    Gym { contest_id: String, problem_id: String },
    #[serde(rename = "group_url", rename_all = "camelCase")]
    Group { group_id: String, contest_id: String, problem_id: String },
}

fn patterns() -> &'static PatternTable<Shape> {
    static TABLE: OnceLock<PatternTable<Shape>> = OnceLock::new();
    TABLE.get_or_init(|| {
        PatternTable::new(HOST, &[
            (Shape::Contest, r"/contest/([0-9]+)/problem/([A-Z][0-9]*)"),
            (Shape::Problemset, r"/problemset/problem/([0-9]+)/([A-Z][0-9]*)"),
            (Shape::Gym, r"/gym/([0-9]+)/problem/([A-Z][0-9]*)"),
            (Shape::Group, r"/group/([a-zA-Z0-9]+)/contest/([0-9]+)/problem/([A-Z][0-9]*)"),
        ])
        .expect("codeforces url patterns are valid")
    })
}

/// Strict form of URL matching: an unrecognized URL is `InvalidUrl`, a
/// recognized one missing an identifier is `Validation`.
pub fn parse_url(url: &str) -> Result<CodeforcesUrl, ScraperError> {
    let (shape, caps) = patterns()
        .find(url)
        .ok_or_else(|| ScraperError::invalid_url(JUDGE, format!("Unrecognized problem URL: {url}")))?;
    let need = |i: usize, what: &str| {
        group(&caps, i).ok_or_else(|| ScraperError::validation(JUDGE, format!("Missing {what} in {url}")))
    };
    Ok(match shape {
        Shape::Contest => CodeforcesUrl::Contest { contest_id: need(1, "contest id")?, problem_id: need(2, "problem id")? },
        Shape::Problemset => CodeforcesUrl::Problemset { contest_id: need(1, "contest id")?, problem_id: need(2, "problem id")? },
        Shape::Gym => CodeforcesUrl::Gym { contest_id: need(1, "contest id")?, problem_id: need(2, "problem id")? },
        Shape::Group => CodeforcesUrl::Group {
            group_id: need(1, "group id")?,
            contest_id: need(2, "contest id")?,
            problem_id: need(3, "problem id")?,
        },
    })
}

impl CodeforcesUrl {
    pub fn kind(&self) -> &'static str {
        match self {
            CodeforcesUrl::Contest { .. } => "contest_url",
            CodeforcesUrl::Problemset { .. } => "problemset_url",
            CodeforcesUrl::Gym { .. } => "gym_url",
            CodeforcesUrl::Group { .. } => "group_url",
        }
    }

    pub fn contest_id(&self) -> &str {
        match self {
            CodeforcesUrl::Contest { contest_id, .. }
            | CodeforcesUrl::Problemset { contest_id, .. }
            | CodeforcesUrl::Gym { contest_id, .. }
            | CodeforcesUrl::Group { contest_id, .. } => contest_id,
        }
    }

    pub fn problem_id(&self) -> &str {
        match self {
            CodeforcesUrl::Contest { problem_id, .. }
            | CodeforcesUrl::Problemset { problem_id, .. }
            | CodeforcesUrl::Gym { problem_id, .. }
            | CodeforcesUrl::Group { problem_id, .. } => problem_id,
        }
    }

    pub fn group_id(&self) -> Option<&str> {
        match self {
            CodeforcesUrl::Group { group_id, .. } => Some(group_id),
            _ => None,
        }
    }

    /// Copy the identifiers into a problem's metadata map.
    pub fn annotate(&self, metadata: &mut Map<String, Value>) {
        metadata.insert("urlType".into(), Value::from(self.kind()));
        metadata.insert("contestId".into(), Value::from(self.contest_id()));
        metadata.insert("problemId".into(), Value::from(self.problem_id()));
        if let Some(g) = self.group_id() {
            metadata.insert("groupId".into(), Value::from(g));
        }
    }
}
