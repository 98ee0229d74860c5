use scraper::Html;

use super::markup;
use super::{first_match, Locator, Rule};
use crate::config::DEFAULT_DESCRIPTION;
use crate::entry::Entry;

const fn heading(tag: &'static str, text: &'static str) -> Rule<()> {
    Rule {
        locator: Locator::Exact { tag, text },
        follow: "p",
        kind: (),
    }
}

/// Section headings that introduce a usable summary paragraph, best first.
static HEADINGS: &[Rule<()>] = &[
    heading("h3", "Abstract"),
    heading("h2", "Abstract"),
    heading("h3", "Introduction"),
    heading("h3", "Data Description"),
    heading("h3", "Data Collection"),
];

/// Replace the description with the paragraph under the best known heading.
/// The best heading present decides; if no paragraph follows it the default
/// text is used rather than a lesser heading's paragraph.
pub fn extract(entry: &mut Entry, doc: &Html) {
    entry.description = first_match(doc, HEADINGS)
        .and_then(|hit| hit.target)
        .map(markup::to_markdown)
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
}
