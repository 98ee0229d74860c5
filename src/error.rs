use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a scrape run. Missing fields on a detail page are not
/// errors; the extractors fall back to defaults instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected catalog structure: {0}")]
    CatalogStructure(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
