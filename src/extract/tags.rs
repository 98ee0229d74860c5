use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::markup::text_of;
use crate::entry::Entry;

static BADGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.badge.badge-pn").unwrap());

/// Append every topic badge to the entry's tags. Baseline tags stay, and a
/// badge that repeats one of them is appended anyway.
pub fn extract(entry: &mut Entry, doc: &Html) {
    entry.tags.extend(
        doc.select(&BADGE)
            .map(|el| text_of(el).trim().to_string())
            .filter(|t| !t.is_empty()),
    );
}
