//! Small helpers over `scraper` shared by the per-judge extractors.

use scraper::{ElementRef, Html, Node, Selector};

pub fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn select_first<'a>(root: ElementRef<'a>, sel_str: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(sel_str).ok()?;
    root.select(&sel).next()
}

pub fn select_all<'a>(root: ElementRef<'a>, sel_str: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(sel_str) {
        Ok(sel) => root.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

pub fn select_doc<'a>(doc: &'a Html, sel_str: &str) -> Vec<ElementRef<'a>> {
    select_all(doc.root_element(), sel_str)
}

pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Text of the element children, skipping any child carrying `skip_class`.
/// Bare text nodes directly under `el` are ignored.
pub fn child_text_without(el: ElementRef<'_>, skip_class: &str) -> String {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| !has_class(c, skip_class))
        .map(text_of)
        .collect::<String>()
}

/// Text of every child node except those carrying `skip_class`, bare text
/// nodes included. Used for `<div><div class="label">..</div>value</div>`.
pub fn own_text_without(el: ElementRef<'_>, skip_class: &str) -> String {
    let mut out = String::new();
    for child in el.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(_) => {
                if let Some(c) = ElementRef::wrap(child) {
                    if !has_class(&c, skip_class) { out.push_str(&text_of(c)); }
                }
            }
            _ => {}
        }
    }
    out
}

/// Text of a `<pre>` block keeping its line structure: `<br>` and
/// per-line `div`s both end a line.
pub fn preformatted_text(pre: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_lines(pre, &mut out);
    out.replace("\r\n", "\n").trim().to_string()
}

fn push_lines(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.name() == "br" => out.push('\n'),
            Node::Element(e) => {
                let block = e.name() == "div";
                if let Some(c) = ElementRef::wrap(child) { push_lines(c, out); }
                if block && !out.ends_with('\n') { out.push('\n'); }
            }
            _ => {}
        }
    }
}

/// Runs of whitespace become one space; no leading or trailing space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
