pub mod citation;
pub mod description;
pub mod license;
pub mod markup;
pub mod tags;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::entry::Entry;

/// How a rule recognises its label element on the page.
#[derive(Debug, Clone, Copy)]
pub enum Locator {
    /// Element `tag` whose trimmed text equals `text`.
    Exact { tag: &'static str, text: &'static str },
    /// Element `tag` whose trimmed text matches `pattern`.
    Pattern {
        tag: &'static str,
        pattern: &'static LazyLock<Regex>,
    },
}

impl Locator {
    pub fn find<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        match *self {
            Locator::Exact { tag, text } => markup::find_by_text(doc, tag, |t| t == text),
            Locator::Pattern { tag, pattern } => {
                markup::find_by_text(doc, tag, |t| pattern.is_match(t))
            }
        }
    }
}

/// A label to look for and the element after it that carries the value.
/// `kind` says what to do with a hit.
#[derive(Debug, Clone, Copy)]
pub struct Rule<K> {
    pub locator: Locator,
    pub follow: &'static str,
    pub kind: K,
}

/// A rule whose label was found. `target` is the `follow` element after the
/// label, if the page has one.
pub struct Hit<'a, K> {
    pub kind: K,
    pub target: Option<ElementRef<'a>>,
}

/// Evaluate `rules` in order; the first whose label exists wins, whether or
/// not a `follow` element comes after it. Later rules are never consulted
/// once a label matched.
pub fn first_match<'a, K: Copy>(doc: &'a Html, rules: &[Rule<K>]) -> Option<Hit<'a, K>> {
    rules.iter().find_map(|rule| {
        let label = rule.locator.find(doc)?;
        Some(Hit {
            kind: rule.kind,
            target: markup::find_next(doc, label, rule.follow),
        })
    })
}

/// Run the four detail-page extractors on `entry`, in order.
pub fn extract_all(entry: &mut Entry, doc: &Html, base: &Url) {
    description::extract(entry, doc);
    tags::extract(entry, doc);
    license::extract(entry, doc, base);
    citation::extract(entry, doc);
    debug!(
        "Extracted {}: {} tags, license {:?}, {} chars of description",
        entry.id,
        entry.tags.len(),
        entry.license,
        entry.description.len()
    );
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    static CITE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^cite").unwrap());

    static RULES: &[Rule<u8>] = &[
        Rule {
            locator: Locator::Exact { tag: "h3", text: "First" },
            follow: "p",
            kind: 1,
        },
        Rule {
            locator: Locator::Pattern { tag: "strong", pattern: &CITE_RE },
            follow: "span",
            kind: 2,
        },
    ];

    #[test]
    fn earlier_rule_wins() {
        let doc = Html::parse_document(
            "<strong>Cite this</strong><span>s</span><h3>First</h3><p>p</p>",
        );
        let hit = first_match(&doc, RULES).unwrap();
        assert_eq!(hit.kind, 1);
        assert_eq!(markup::text_of(hit.target.unwrap()), "p");
    }

    #[test]
    fn label_without_follower_still_wins() {
        let doc = Html::parse_document("<strong>CITE me</strong><span>t</span><h3>First</h3>");
        let hit = first_match(&doc, RULES).unwrap();
        assert_eq!(hit.kind, 1);
        assert!(hit.target.is_none());
    }

    #[test]
    fn later_rule_when_earlier_label_absent() {
        let doc = Html::parse_document("<span>s</span><strong>CITE me</strong><span>t</span>");
        let hit = first_match(&doc, RULES).unwrap();
        assert_eq!(hit.kind, 2);
        assert_eq!(markup::text_of(hit.target.unwrap()), "t");
    }

    #[test]
    fn nothing_matches() {
        let doc = Html::parse_document("<p>plain</p>");
        assert!(first_match(&doc, RULES).is_none());
    }

    #[test]
    fn extract_all_keeps_baseline_tags() {
        let doc = Html::parse_document("<html><body><p>empty page</p></body></html>");
        let base = Url::parse("https://physionet.org").unwrap();
        let mut entry = Entry::new("x", "https://physionet.org/content/x/1.0.0/", "X", "x");
        extract_all(&mut entry, &doc, &base);
        assert!(entry.tags.len() >= 2);
        assert_eq!(entry.description, "No description provided.");
        assert!(entry.license.is_empty());
    }
}
