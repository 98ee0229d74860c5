//! Tree search and markup conversion shared by the extractors and the
//! catalog lister.

use scraper::{ElementRef, Html};

/// All text under `el`, concatenated.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// First element named `tag` that comes after `from` in document order.
/// Descendants of `from` count as "after", the same way a reader scanning
/// the page top to bottom would meet them.
pub fn find_next<'a>(doc: &'a Html, from: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    let start = (*from).id();
    doc.tree
        .root()
        .descendants()
        .skip_while(|node| node.id() != start)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
}

/// First element named `tag` whose trimmed text satisfies `matches`.
pub fn find_by_text<'a>(
    doc: &'a Html,
    tag: &str,
    matches: impl Fn(&str) -> bool,
) -> Option<ElementRef<'a>> {
    doc.tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == tag)
        .find(|el| matches(text_of(*el).trim()))
}

/// Render an element (tags included) as Markdown.
pub fn to_markdown(el: ElementRef<'_>) -> String {
    convert(&el.html(), el)
}

/// Render only the contents of an element as Markdown, dropping its own tags.
pub fn inner_to_markdown(el: ElementRef<'_>) -> String {
    convert(&el.inner_html(), el)
}

fn convert(html: &str, el: ElementRef<'_>) -> String {
    htmd::convert(html)
        .unwrap_or_else(|_| text_of(el))
        .trim()
        .to_string()
}
