use std::collections::HashSet;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use crate::catalog;
use crate::config::{site_url, OutputFormat, RunConfig, LISTING_PATH};
use crate::entry::Entry;
use crate::error::{Result, ScrapeError};
use crate::extract;
use crate::fetch::PageSource;
use crate::output;
use crate::roda::AggregateRecord;

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Datasets found under the category heading.
    pub listed: usize,
    /// Datasets fetched and written (the configured slice).
    pub processed: usize,
    pub files: Vec<PathBuf>,
}

/// List → fetch → extract → write, one dataset at a time.
///
/// Files are written as soon as they are complete, so a failure part way
/// through leaves the earlier ones on disk.
pub async fn run<S: PageSource + ?Sized>(config: &RunConfig, source: &S) -> Result<RunSummary> {
    let format = config.output_format()?;
    let base = config.base()?;

    let listing_url = join(&base, LISTING_PATH)?;
    info!("Fetching database listing: {}", listing_url);
    let index = source.fetch(&listing_url).await?;
    let entries = catalog::list_entries(&Html::parse_document(&index), config.category, &base)?;
    let listed = entries.len();

    let range = config.range(listed);
    if range.is_empty() {
        warn!(
            "Nothing to do: range {}..{} selects no datasets out of {}",
            config.start, config.end, listed
        );
    }
    let mut selected: Vec<Entry> = entries.into_iter().skip(range.start).take(range.len()).collect();

    output::ensure_directory(&config.output_dir)?;
    let mut files = Vec::new();
    let mut aggregate = AggregateRecord::new();
    let mut seen_ids = HashSet::new();

    let pb = progress_bar(selected.len());
    for entry in selected.iter_mut() {
        if !seen_ids.insert(entry.id.clone()) {
            warn!("Duplicate dataset id {}; its output will be overwritten", entry.id);
        }

        let url = Url::parse(&entry.url)
            .map_err(|e| ScrapeError::CatalogStructure(format!("bad dataset url {:?}: {}", entry.url, e)))?;
        let page = source.fetch(&url).await?;
        enrich(entry, &page, &base);
        debug!("{}", entry);

        match format {
            OutputFormat::Separate => files.push(output::write_separate(&config.output_dir, entry)?),
            OutputFormat::Aggregate => aggregate.push(entry),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if format == OutputFormat::Aggregate {
        files.push(output::write_aggregate(&config.output_dir, &aggregate)?);
    }

    if config.csv {
        files.push(output::write_csv(&config.output_dir, &selected)?);
    }

    info!(
        "Processed {} of {} datasets, wrote {} files",
        selected.len(),
        listed,
        files.len()
    );

    Ok(RunSummary {
        listed,
        processed: selected.len(),
        files,
    })
}

/// Parse a detail page and run every extractor over it.
fn enrich(entry: &mut Entry, page: &str, base: &Url) {
    let doc = Html::parse_document(page);
    extract::extract_all(entry, &doc, base);
}

fn join(base: &Url, path: &str) -> Result<Url> {
    site_url(base, path)
        .map_err(|e| ScrapeError::Configuration(format!("cannot join {:?} onto {}: {}", path, base, e)))
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

// ── Tests ──
