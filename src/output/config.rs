use std::env;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format: {other} (expected text, json or html)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl OutputConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("OJS_OUTPUT_FORMAT").ok().as_deref(),
            env::var("OJS_OUTPUT_PRETTY").ok().as_deref(),
        )
    }

    fn from_vars(format: Option<&str>, pretty: Option<&str>) -> Self {
        let format = format.and_then(|f| f.parse().ok()).unwrap_or(OutputFormat::Text);
        let pretty = match pretty {
            Some(v) if v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => true,
            _ => false,
        };
        OutputConfig { format, pretty }
    }

    /// CLI flags win over the environment.
    pub fn with_overrides(mut self, format: Option<OutputFormat>, pretty: bool) -> Self {
        if let Some(f) = format { self.format = f; }
        self.pretty |= pretty;
        self
    }
}
