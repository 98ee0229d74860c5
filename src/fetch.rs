use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{Result, ScrapeError};

const USER_AGENT: &str = concat!("physionet_roda/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// Source of raw HTML pages.
#[async_trait]
pub trait PageSource {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Plain HTTP(S) GET via reqwest, following redirects.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ScrapeError::Configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let start = Instant::now();
        let network = |source: reqwest::Error| ScrapeError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(network)?;
        debug!(
            "Fetched {} ({} bytes) in {}ms",
            url,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}
