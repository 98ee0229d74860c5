use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::error::ScrapeError;

pub const DEFAULT_BASE_URL: &str = "https://physionet.org";
pub const LISTING_PATH: &str = "/about/database/";

pub const CONTACT_URL: &str = "https://physionet.org/about/#contact";
pub const UPDATE_FREQUENCY: &str = "Not updated";
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const DEFAULT_MANAGED_BY: &str =
    "[MIT Laboratory for Computational Physiology](http://lcp.mit.edu/)";
pub const DEFAULT_S3_BUCKET: &str = "physionet-pds";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_RESOURCE_TYPE: &str = "S3 Bucket";
pub const DEFAULT_RESOURCE_DESCRIPTION: &str = "Project data files";
pub const BASELINE_TAGS: [&str; 2] = ["aws-pds", "life sciences"];

// Header of the single combined registry file.
pub const AGGREGATE_NAME: &str = "PhysioNet Open Datasets";
pub const AGGREGATE_DESCRIPTION: &str = "A collection of datasets provided by the \
     [MIT Laboratory for Computational Physiology](http://lcp.mit.edu/)";
pub const AGGREGATE_DOCUMENTATION: &str = "https://physionet.org/about/database/";
pub const AGGREGATE_LICENSE: &str = "https://physionet.org/content/adfecgdb/view-license/1.0.0/";

pub const STANDARD_CITATION: &str = " Please include the standard citation for PhysioNet: \
     Goldberger, A., Amaral, L., Glass, L., Hausdorff, J., Ivanov, P. C., \
     Mark, R., ... & Stanley, H. E. (2000). PhysioBank, PhysioToolkit, \
     and PhysioNet: Components of a new research resource for complex \
     physiologic signals. Circulation [Online]. 101 (23), pp. e215–e220.";

pub const YAML_EXT: &str = "yaml";
pub const AGGREGATE_FILE: &str = "aggregate.yaml";
pub const CSV_FILE: &str = "databases.csv";

/// Resolve a link found on the site against the base address. Root-relative
/// paths keep any path prefix of the base, so a mirror at
/// `https://host/physionet` serves `/content/x/` from
/// `https://host/physionet/content/x/`.
pub fn site_url(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    if href.starts_with('/') && !href.starts_with("//") {
        let mut root = base.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        root.join(href.trim_start_matches('/'))
    } else {
        base.join(href)
    }
}

/// Access level heading on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Category {
    Open,
    Restricted,
    Credentialed,
}

impl Category {
    /// The `id` attribute of the listing heading for this category.
    pub fn heading_id(self) -> &'static str {
        match self {
            Category::Open => "open",
            Category::Restricted => "restricted",
            Category::Credentialed => "credentialed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One registry file per dataset.
    Separate,
    /// One registry file with every dataset as a resource.
    Aggregate,
}

impl FromStr for OutputFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "separate" => Ok(OutputFormat::Separate),
            "aggregate" | "single" => Ok(OutputFormat::Aggregate),
            other => Err(ScrapeError::Configuration(format!(
                "unknown output format {:?} (expected \"separate\" or \"aggregate\")",
                other
            ))),
        }
    }
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub category: Category,
    /// Unvalidated; the pipeline rejects unknown values before touching disk.
    pub format: String,
    pub start: usize,
    /// Exclusive; 0 means "to the end".
    pub end: usize,
    pub output_dir: PathBuf,
    pub csv: bool,
}

impl RunConfig {
    pub fn output_format(&self) -> Result<OutputFormat, ScrapeError> {
        self.format.parse()
    }

    pub fn base(&self) -> Result<Url, ScrapeError> {
        Url::parse(&self.base_url).map_err(|e| {
            ScrapeError::Configuration(format!("invalid base url {:?}: {}", self.base_url, e))
        })
    }

    /// Clamp `[start, end)` to a list of `len` items.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let end = if self.end == 0 { len } else { self.end.min(len) };
        let start = self.start.min(end);
        start..end
    }
}
