use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use super::markup;
use super::{first_match, Locator, Rule};
use crate::config::STANDARD_CITATION;
use crate::entry::Entry;

static CITATION_ALERT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.alert.alert-secondary").unwrap());
static PLEASE_CITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*When using this resource, please cite").unwrap());

const ORIGINAL_PUBLICATION_LABEL: &str =
    "When using this resource, please cite the original publication:";
const ORIGINAL_PUBLICATION_LEAD: &str =
    " When using this resource, please cite the original publication: ";
const PLEASE_CITE_LEAD: &str = " When using this resource, please cite: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Citation {
    /// Label followed by a paragraph with the original paper.
    OriginalPublication,
    /// Looser label followed by a span with the reference.
    PleaseCite,
}

static CITATIONS: &[Rule<Citation>] = &[
    Rule {
        locator: Locator::Exact {
            tag: "strong",
            text: ORIGINAL_PUBLICATION_LABEL,
        },
        follow: "p",
        kind: Citation::OriginalPublication,
    },
    Rule {
        locator: Locator::Pattern {
            tag: "strong",
            pattern: &PLEASE_CITE_RE,
        },
        follow: "span",
        kind: Citation::PleaseCite,
    },
];

/// Append citation guidance to the description. Pages without the citation
/// alert box are left untouched; pages with one get the cited publication if
/// a known label is found, otherwise the standard PhysioNet citation.
///
/// A label with nothing citable after it appends nothing.
pub fn extract(entry: &mut Entry, doc: &Html) {
    if doc.select(&CITATION_ALERT).next().is_none() {
        return;
    }

    let Some(hit) = first_match(doc, CITATIONS) else {
        entry.description.push_str(STANDARD_CITATION);
        return;
    };
    let Some(target) = hit.target else {
        debug!("Citation label {:?} has no reference after it", hit.kind);
        return;
    };

    match hit.kind {
        Citation::OriginalPublication => {
            entry.description.push_str(ORIGINAL_PUBLICATION_LEAD);
            entry.description.push_str(&markup::to_markdown(target));
        }
        Citation::PleaseCite => {
            entry.description.push_str(PLEASE_CITE_LEAD);
            entry.description.push_str(&markup::inner_to_markdown(target));
        }
    }
}
