use regex::{Captures, Regex};

/// Ordered `(kind, regex)` table for one judge. Every pattern is anchored to
/// the whole URL, matched ASCII case-insensitively, and tolerates a trailing
/// query string and fragment.
pub struct PatternTable<K: Copy> {
    entries: Vec<(K, Regex)>,
}

impl<K: Copy> PatternTable<K> {
    /// `paths` are regex fragments for everything after the host.
    pub fn new(host: &str, paths: &[(K, &str)]) -> Result<Self, regex::Error> {
        let mut entries = Vec::with_capacity(paths.len());
        for (kind, path) in paths {
            // case folding stays ASCII so look-alikes such as U+212A never match `K`
            let full = format!(r"^(?i-u:https?://{}{})(?:\?[^#]*)?(?:#.*)?$", regex::escape(host), path);
            entries.push((*kind, Regex::new(&full)?));
        }
        Ok(PatternTable { entries })
    }

    /// First matching entry in declaration order.
    pub fn find<'u>(&self, url: &'u str) -> Option<(K, Captures<'u>)> {
        self.entries
            .iter()
            .find_map(|(kind, re)| re.captures(url).map(|caps| (*kind, caps)))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// Captured group `i` as an owned string, `None` when absent or empty.
pub fn group(caps: &Captures<'_>, i: usize) -> Option<String> {
    caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Kind { Item, Any }

    fn table() -> PatternTable<Kind> {
        PatternTable::new("judge.test", &[
            (Kind::Item, r"/item/([0-9]+)"),
            (Kind::Any, r"/item/(.*)"),
        ]).unwrap()
    }

    #[test]
    fn first_declared_match_wins() {
        let t = table();
        let (k, caps) = t.find("https://judge.test/item/42").unwrap();
        assert_eq!(k, Kind::Item);
        assert_eq!(group(&caps, 1).as_deref(), Some("42"));
        let (k, _) = t.find("https://judge.test/item/x").unwrap();
        assert_eq!(k, Kind::Any);
    }

    #[test]
    fn anchored_on_both_ends() {
        let t = table();
        assert!(t.find("xhttps://judge.test/item/42").is_none());
        assert!(t.find("https://judge.test.evil/item/42").is_none());
        assert!(t.find("https://judge.test/other/42").is_none());
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        let t = PatternTable::new("judge.test", &[(Kind::Item, r"/item/([0-9]+)")]).unwrap();
        assert!(t.find("https://judge.test/item/42?lang=en").is_some());
        assert!(t.find("https://judge.test/item/42#top").is_some());
        assert!(t.find("https://judge.test/item/42?lang=en#top").is_some());
        assert!(t.find("https://judge.test/item/42/").is_none());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn case_folding_is_ascii_only() {
        let t = PatternTable::new("judge.test", &[(Kind::Item, r"/item/([A-Z][0-9]*)")]).unwrap();
        let (_, caps) = t.find("HTTPS://JUDGE.TEST/ITEM/k1").unwrap();
        assert_eq!(group(&caps, 1).as_deref(), Some("k1"));
        assert!(t.find("https://judge.test/item/\u{212A}").is_none());
        assert!(t.find("https://judge.te\u{17F}t/item/K").is_none());
        assert!(t.find("https://judge.test/item/K?q=\u{212A}").is_some());
    }

    #[test]
    fn empty_capture_is_missing() {
        let t = PatternTable::new("judge.test", &[(Kind::Any, r"/item/([a-z]*)")]).unwrap();
        let (_, caps) = t.find("https://judge.test/item/").unwrap();
        assert_eq!(group(&caps, 1), None);
        assert_eq!(group(&caps, 7), None);
    }
}
