use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::info;
use url::Url;

use crate::config::{site_url, Category};
use crate::entry::Entry;
use crate::error::{Result, ScrapeError};
use crate::extract::markup::text_of;

static HEADINGS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// List the datasets under the `category` heading of the database index.
///
/// The index is expected to look like
///
/// ```html
/// <h2 id="open">Open Access</h2>
/// <ul>
///   <li><a href="/content/mitdb/1.0.0/">MIT-BIH Arrhythmia Database</a>: ECG recordings.</li>
/// </ul>
/// ```
///
/// Dataset ids are read positionally from hrefs of the form
/// `/content/<id>/<version>/`.
pub fn list_entries(doc: &Html, category: Category, base: &Url) -> Result<Vec<Entry>> {
    let heading_id = category.heading_id();
    let heading = doc
        .select(&HEADINGS)
        .find(|h| h.value().id() == Some(heading_id))
        .ok_or_else(|| {
            ScrapeError::CatalogStructure(format!("no heading with id {:?}", heading_id))
        })?;

    let list = heading
        .next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "ul" | "ol"))
        .ok_or_else(|| {
            ScrapeError::CatalogStructure(format!("heading {:?} is not followed by a list", heading_id))
        })?;

    let entries = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
        .map(|item| parse_item(item, base))
        .collect::<Result<Vec<_>>>()?;

    info!("Found {} {} datasets", entries.len(), category);
    Ok(entries)
}

fn parse_item(item: ElementRef<'_>, base: &Url) -> Result<Entry> {
    let anchor = item.select(&ANCHOR).next().ok_or_else(|| {
        ScrapeError::CatalogStructure(format!("list item without a link: {:?}", text_of(item).trim()))
    })?;
    let href = anchor.value().attr("href").unwrap_or_default();

    let id = dataset_id(href).ok_or_else(|| {
        ScrapeError::CatalogStructure(format!("cannot read a dataset id from href {:?}", href))
    })?;
    let url = site_url(base, href)
        .map_err(|e| ScrapeError::CatalogStructure(format!("bad href {:?}: {}", href, e)))?;

    let name = text_of(anchor);
    let summary = short_description(&trailing_text(anchor));

    Ok(Entry::new(id, url.as_str(), &name, &summary))
}

/// Third `/`-separated segment: `/content/<id>/...` → `<id>`.
fn dataset_id(href: &str) -> Option<&str> {
    href.split('/').nth(2).filter(|id| !id.is_empty())
}

/// Text that follows the link inside its list item.
fn trailing_text(anchor: ElementRef<'_>) -> String {
    anchor
        .next_siblings()
        .map(|node| match ElementRef::wrap(node) {
            Some(el) => text_of(el),
            None => node
                .value()
                .as_text()
                .map(|t| String::from(&**t))
                .unwrap_or_default(),
        })
        .collect()
}

/// `": ECG recordings.\n"` → `"ECG recordings"`. Only the separator colon
/// right after the link is dropped; colons inside the summary stay.
fn short_description(raw: &str) -> String {
    let cleaned = raw.replace('\n', "");
    let trimmed = cleaned.trim();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed).trim();
    trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://physionet.org").unwrap()
    }

    fn list(html: &str, category: Category) -> Result<Vec<Entry>> {
        let doc = Html::parse_document(html);
        list_entries(&doc, category, &base())
    }

    #[test]
    fn single_item() {
        let html = r#"<h2 id="open">Open</h2>
            <ul><li><a href="/content/abc123/1.0.0/">Demo DB</a>: a demo.</li></ul>"#;
        let entries = list(html, Category::Open).unwrap();
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.id, "abc123");
        assert_eq!(e.name, "Demo DB");
        assert_eq!(e.short_description, "a demo");
        assert_eq!(e.url, "https://physionet.org/content/abc123/1.0.0/");
        assert_eq!(e.documentation, e.url);
        assert_eq!(e.resources[0].arn, "arn:aws:s3:::physionet-pds/abc123");
    }

    #[test]
    fn picks_requested_category_in_order() {
        let html = r#"
            <h2 id="open">Open</h2>
            <ul><li><a href="/content/a/1/">A</a>: first</li></ul>
            <h2 id="credentialed">Credentialed</h2>
            <ul>
              <li><a href="/content/c1/1/">C1</a>: one
              </li>
              <li><a href="/content/c2/2.1/">C2</a>: two, with a comma</li>
            </ul>"#;
        let entries = list(html, Category::Credentialed).unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        assert_eq!(entries[0].short_description, "one");
        assert_eq!(entries[1].short_description, "two, with a comma");
    }

    #[test]
    fn missing_heading() {
        let html = r#"<h2 id="open">Open</h2><ul></ul>"#;
        assert!(matches!(
            list(html, Category::Restricted),
            Err(ScrapeError::CatalogStructure(_))
        ));
    }

    #[test]
    fn heading_not_followed_by_list() {
        let html = r#"<h2 id="open">Open</h2><p>moved</p><ul><li><a href="/content/a/1/">A</a></li></ul>"#;
        assert!(matches!(
            list(html, Category::Open),
            Err(ScrapeError::CatalogStructure(_))
        ));
    }

    #[test]
    fn unexpected_href_shape() {
        let html = r#"<h2 id="open">Open</h2><ul><li><a href="mitdb">A</a>: x</li></ul>"#;
        assert!(matches!(
            list(html, Category::Open),
            Err(ScrapeError::CatalogStructure(_))
        ));
    }

    #[test]
    fn trailing_markup_is_flattened() {
        let html = r#"<h2 id="open">Open</h2>
            <ul><li><a href="/content/x/1/">X</a>: uses <em>EEG</em> data</li></ul>"#;
        let entries = list(html, Category::Open).unwrap();
        assert_eq!(entries[0].short_description, "uses EEG data");
    }

    #[test]
    fn inner_colons_survive() {
        let html = r#"<h2 id="open">Open</h2>
            <ul><li><a href="/content/x/1/">A</a>: ECG: lead II, 10:30 recordings.</li></ul>"#;
        let entries = list(html, Category::Open).unwrap();
        assert_eq!(entries[0].short_description, "ECG: lead II, 10:30 recordings");
    }

    #[test]
    fn mirror_base_keeps_prefix() {
        let html = r#"<h2 id="open">Open</h2>
            <ul><li><a href="/content/x/1.0.0/">X</a>: x</li></ul>"#;
        let doc = Html::parse_document(html);
        let mirror = Url::parse("https://mirror.example.org/physionet").unwrap();
        let entries = list_entries(&doc, Category::Open, &mirror).unwrap();
        assert_eq!(entries[0].url, "https://mirror.example.org/physionet/content/x/1.0.0/");
        assert_eq!(entries[0].id, "x");
    }

    #[test]
    fn dataset_id_positions() {
        assert_eq!(dataset_id("/content/mitdb/1.0.0/"), Some("mitdb"));
        assert_eq!(dataset_id("/content/"), None);
        assert_eq!(dataset_id("content"), None);
    }
}
