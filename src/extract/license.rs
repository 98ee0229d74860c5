use scraper::Html;
use url::Url;

use super::{first_match, Locator, Rule};
use crate::config::site_url;
use crate::entry::Entry;

static LICENSE: &[Rule<()>] = &[Rule {
    locator: Locator::Exact {
        tag: "strong",
        text: "License (for files):",
    },
    follow: "a",
    kind: (),
}];

/// Set the license to the link following the "License (for files):" label,
/// resolved against the site root. Left empty when the label is missing.
pub fn extract(entry: &mut Entry, doc: &Html, base: &Url) {
    let href = first_match(doc, LICENSE)
        .and_then(|hit| hit.target)
        .and_then(|a| a.value().attr("href"));
    if let Some(url) = href.and_then(|h| site_url(base, h).ok()) {
        entry.license = url.to_string();
    }
}
