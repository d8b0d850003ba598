use std::io::{self, Write};

use super::config::{OutputConfig, OutputFormat};
use super::types::{Envelope, Meta};
use crate::problem::Problem;
use crate::registry::Resolved;

/// Renders results for the terminal. Consumes finished records only.
pub trait Presenter: Send + Sync {
    fn problem(&self, problem: &Problem, meta: Meta, w: &mut dyn Write) -> io::Result<()>;

    fn params(&self, resolved: &Resolved, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{} ({})", resolved.judge, resolved.domain)?;
        if let Some(obj) = resolved.params.as_object() {
            for (k, v) in obj {
                writeln!(w, "  {}: {}", k, v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))?;
            }
        }
        Ok(())
    }

    fn judges(&self, judges: &[(&str, &str)], w: &mut dyn Write) -> io::Result<()> {
        for (domain, name) in judges { writeln!(w, "{domain}\t{name}")?; }
        Ok(())
    }
}

pub struct JsonPresenter { pub pretty: bool }

impl JsonPresenter {
    fn envelope<T: serde::Serialize>(&self, op: &'static str, result: &T, meta: Option<Meta>, w: &mut dyn Write) -> io::Result<()> {
        let env = Envelope::result(op, result, meta)?;
        if self.pretty { serde_json::to_writer_pretty(&mut *w, &env)? } else { serde_json::to_writer(&mut *w, &env)? }
        writeln!(w)
    }
}

impl Presenter for JsonPresenter {
    fn problem(&self, problem: &Problem, meta: Meta, w: &mut dyn Write) -> io::Result<()> {
        self.envelope("problem", problem, Some(meta), w)
    }

    fn params(&self, resolved: &Resolved, w: &mut dyn Write) -> io::Result<()> {
        self.envelope("params", resolved, None, w)
    }

    fn judges(&self, judges: &[(&str, &str)], w: &mut dyn Write) -> io::Result<()> {
        let list: Vec<serde_json::Value> = judges
            .iter()
            .map(|(domain, name)| serde_json::json!({ "domain": domain, "judge": name }))
            .collect();
        self.envelope("judges", &list, None, w)
    }
}

pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn problem(&self, p: &Problem, _meta: Meta, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", p.name)?;
        writeln!(w, "{}", "=".repeat(p.name.chars().count()))?;
        if let Some(t) = &p.time_limit { writeln!(w, "Time limit:   {t}")?; }
        if let Some(m) = &p.memory_limit { writeln!(w, "Memory limit: {m}")?; }
        if let Some(d) = &p.difficulty { writeln!(w, "Difficulty:   {d}")?; }
        if !p.tags.is_empty() { writeln!(w, "Tags:         {}", p.tags.join(", "))?; }
        writeln!(w)?;
        writeln!(w, "{}", p.plain_text_description)?;
        for (i, tc) in p.sample_test_cases.iter().enumerate() {
            writeln!(w)?;
            writeln!(w, "--- Sample {} input ---", i + 1)?;
            writeln!(w, "{}", tc.input)?;
            writeln!(w, "--- Sample {} output ---", i + 1)?;
            writeln!(w, "{}", tc.output)?;
            if let Some(e) = &tc.explanation { writeln!(w, "({e})")?; }
        }
        Ok(())
    }
}

pub struct HtmlPresenter;

impl Presenter for HtmlPresenter {
    fn problem(&self, p: &Problem, _meta: Meta, w: &mut dyn Write) -> io::Result<()> {
        let title = escape_html(&p.name);
        writeln!(w, "<!DOCTYPE html>")?;
        writeln!(w, "<html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>")?;
        writeln!(w, "<h1>{title}</h1>")?;
        let limits: Vec<String> = [p.time_limit.as_deref(), p.memory_limit.as_deref()]
            .into_iter()
            .flatten()
            .map(escape_html)
            .collect();
        if !limits.is_empty() { writeln!(w, "<p class=\"limits\">{}</p>", limits.join(" · "))?; }
        if !p.tags.is_empty() || p.difficulty.is_some() {
            write!(w, "<p class=\"tags\">")?;
            for t in p.tags.iter().chain(p.difficulty.iter()) { write!(w, "<span class=\"tag\">{}</span> ", escape_html(t))?; }
            writeln!(w, "</p>")?;
        }
        writeln!(w, "<section class=\"statement\">{}</section>", p.description)?;
        writeln!(w, "<section class=\"samples\">")?;
        for tc in &p.sample_test_cases {
            writeln!(w, "<pre class=\"input\">{}</pre>", escape_html(&tc.input))?;
            writeln!(w, "<pre class=\"output\">{}</pre>", escape_html(&tc.output))?;
        }
        writeln!(w, "</section>")?;
        writeln!(w, "</body></html>")
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Html => Box::new(HtmlPresenter),
            OutputFormat::Text => Box::new(TextPresenter),
        };
        Emitter { presenter }
    }

    pub fn problem(&self, problem: &Problem, meta: Meta) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.presenter.problem(problem, meta, &mut out)?;
        out.flush()
    }

    pub fn params(&self, resolved: &Resolved) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.presenter.params(resolved, &mut out)?;
        out.flush()
    }

    pub fn judges(&self, judges: &[(&str, &str)]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.presenter.judges(judges, &mut out)?;
        out.flush()
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::TestCase;
    use serde_json::{json, Map};

    fn problem() -> Problem {
        Problem {
            name: "A. Theatre Square".into(),
            description: "<div><p>Pave it.</p></div>".into(),
            plain_text_description: "Pave it.\n\nInput\n\nn m a\n\nOutput\n\ncount".into(),
            time_limit: Some("1 second".into()),
            memory_limit: Some("256 megabytes".into()),
            tags: vec!["math".into()],
            difficulty: Some("*1000".into()),
            sample_test_cases: vec![TestCase::new("6 6 4", "4")],
            metadata: Map::new(),
        }
    }

    fn render(p: &dyn Presenter) -> String {
        let mut buf = Vec::new();
        p.problem(&problem(), Meta::default(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn json_wraps_problem_in_envelope() {
        let s = render(&JsonPresenter { pretty: false });
        let v: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
        assert_eq!(v["op"], json!("problem"));
        assert_eq!(v["result"]["name"], json!("A. Theatre Square"));
        assert_eq!(v["result"]["sampleTestCases"][0]["input"], json!("6 6 4"));
    }

    #[test]
    fn text_shows_limits_tags_and_samples() {
        let s = render(&TextPresenter);
        assert!(s.starts_with("A. Theatre Square\n=================\n"));
        assert!(s.contains("Time limit:   1 second"));
        assert!(s.contains("Tags:         math"));
        assert!(s.contains("Difficulty:   *1000"));
        assert!(s.contains("--- Sample 1 input ---\n6 6 4\n"));
    }

    #[test]
    fn html_embeds_description_and_escapes_samples() {
        let mut p = problem();
        p.sample_test_cases = vec![TestCase::new("a<b", "x&y")];
        let mut buf = Vec::new();
        HtmlPresenter.problem(&p, Meta::default(), &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("<section class=\"statement\"><div><p>Pave it.</p></div></section>"));
        assert!(s.contains("<pre class=\"input\">a&lt;b</pre>"));
        assert!(s.contains("<pre class=\"output\">x&amp;y</pre>"));
        assert!(s.contains("1 second · 256 megabytes"));
    }

    #[test]
    fn text_params_and_judges() {
        let resolved = Resolved {
            domain: "codeforces.com".into(),
            judge: "Codeforces",
            params: json!({ "type": "contest_url", "contestId": "1", "problemId": "A" }),
        };
        let mut buf = Vec::new();
        TextPresenter.params(&resolved, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("Codeforces (codeforces.com)\n"));
        assert!(s.contains("  contestId: 1\n"));

        let mut buf = Vec::new();
        TextPresenter.judges(&[("codeforces.com", "Codeforces")], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "codeforces.com\tCodeforces\n");
    }
}
