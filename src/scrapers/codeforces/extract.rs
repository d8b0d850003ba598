use scraper::{ElementRef, Html};
use serde_json::{Map, Value};

use crate::error::ScraperError;
use crate::problem::{compose_plain_text, Problem, TestCase};
use crate::scrapers::markup::{
    child_text_without, collapse_whitespace, has_class, own_text_without, preformatted_text,
    select_all, select_doc, select_first, text_of,
};

use super::JUDGE;

const TIME_LIMIT_LABEL: &str = "time limit per test";
const MEMORY_LIMIT_LABEL: &str = "memory limit per test";
const DIFFICULTY_SENTINEL: char = '*';

// statement sections that end the free-form body
const BODY_TERMINATORS: [&str; 4] = ["input-specification", "output-specification", "sample-tests", "note"];

fn missing(what: &str) -> ScraperError {
    ScraperError::parsing(JUDGE, format!("{what} not found"))
}

/// Build a [`Problem`] from a rendered Codeforces problem page.
pub fn extract(html: &str) -> Result<Problem, ScraperError> {
    let doc = Html::parse_document(html);

    let statement = select_first(doc.root_element(), ".problem-statement")
        .ok_or_else(|| missing("Problem statement"))?;

    let name = select_first(statement, ".header .title")
        .map(|el| text_of(el).trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing("Problem name"))?;

    let time_limit = header_limit(statement, ".header .time-limit", TIME_LIMIT_LABEL)
        .ok_or_else(|| missing("Time limit"))?;
    let memory_limit = header_limit(statement, ".header .memory-limit", MEMORY_LIMIT_LABEL)
        .ok_or_else(|| missing("Memory limit"))?;

    let header = select_first(statement, ".header").ok_or_else(|| missing("Problem header"))?;
    let (body_html, body_text) = statement_body(header);

    let input_spec = select_first(statement, ".input-specification");
    let output_spec = select_first(statement, ".output-specification");

    let mut description = body_html;
    if let Some(el) = input_spec { description.push_str(&el.inner_html()); }
    if let Some(el) = output_spec { description.push_str(&el.inner_html()); }

    let input_format = section_text(input_spec);
    let output_format = section_text(output_spec);

    let sample_test_cases = samples(statement)?;
    let (tags, difficulty) = tags_and_difficulty(&doc);

    let mut metadata = Map::new();
    let note = section_text(select_first(statement, ".note"));
    if !note.is_empty() { metadata.insert("note".into(), Value::from(note)); }
    for (sel, key) in [(".header .input-file", "inputFile"), (".header .output-file", "outputFile")] {
        if let Some(el) = select_first(statement, sel) {
            let v = own_text_without(el, "property-title").trim().to_string();
            if !v.is_empty() { metadata.insert(key.into(), Value::from(v)); }
        }
    }

    Ok(Problem {
        name,
        description,
        plain_text_description: compose_plain_text(&body_text, &input_format, &output_format),
        time_limit: Some(time_limit),
        memory_limit: Some(memory_limit),
        tags,
        difficulty,
        sample_test_cases,
        metadata,
    })
}

fn header_limit(statement: ElementRef<'_>, sel: &str, label: &str) -> Option<String> {
    let el = select_first(statement, sel)?;
    let s = text_of(el).replacen(label, "", 1).trim().to_string();
    if s.is_empty() { None } else { Some(s) }
}

/// Element siblings after the header up to the first specification block,
/// as (outer HTML, text).
fn statement_body(header: ElementRef<'_>) -> (String, String) {
    let mut html = String::new();
    let mut text = String::new();
    for el in header.next_siblings().filter_map(ElementRef::wrap) {
        if BODY_TERMINATORS.iter().any(|c| has_class(&el, c)) { break; }
        html.push_str(&el.html());
        text.push_str(&text_of(el));
    }
    (html, text)
}

fn section_text(section: Option<ElementRef<'_>>) -> String {
    section
        .map(|el| child_text_without(el, "section-title").trim().to_string())
        .unwrap_or_default()
}

fn samples(statement: ElementRef<'_>) -> Result<Vec<TestCase>, ScraperError> {
    let mut out = Vec::new();
    for block in select_all(statement, ".sample-test") {
        let inputs: Vec<String> = select_all(block, ".input pre").into_iter().map(preformatted_text).collect();
        let outputs: Vec<String> = select_all(block, ".output pre").into_iter().map(preformatted_text).collect();
        if inputs.len() != outputs.len() {
            return Err(ScraperError::parsing(
                JUDGE,
                format!("Sample block has {} inputs but {} outputs", inputs.len(), outputs.len()),
            ));
        }
        out.extend(inputs.into_iter().zip(outputs).map(|(i, o)| TestCase::new(i, o)));
    }
    if out.is_empty() { return Err(ScraperError::parsing(JUDGE, "No sample test cases found")); }
    Ok(out)
}

/// Tag boxes anywhere on the page. The last entry starting with the
/// difficulty sentinel wins; the rest keep document order without repeats.
fn tags_and_difficulty(doc: &Html) -> (Vec<String>, Option<String>) {
    let mut tags: Vec<String> = Vec::new();
    let mut difficulty = None;
    for el in select_doc(doc, ".tag-box") {
        let t = collapse_whitespace(&text_of(el));
        if t.starts_with(DIFFICULTY_SENTINEL) {
            difficulty = Some(t);
        } else if !t.is_empty() && !tags.contains(&t) {
            tags.push(t);
        }
    }
    (tags, difficulty)
}
