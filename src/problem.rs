use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized problem record produced by every scraper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub name: String,
    /// HTML fragment of the full statement.
    pub description: String,
    pub plain_text_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub sample_test_cases: Vec<TestCase>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl TestCase {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        TestCase { input: input.into(), output: output.into(), explanation: None }
    }
}

/// Compose the plain-text rendering: body text, then the labelled input and
/// output sections, separated by blank lines.
pub fn compose_plain_text(body: &str, input_format: &str, output_format: &str) -> String {
    [body.trim(), "Input", input_format, "Output", output_format].join("\n\n")
}
