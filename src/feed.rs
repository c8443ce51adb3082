//! Price feed clients.
//!
//! Responsibilities:
//! • Fetch the public price list once and decode it into `PriceEntry`s.
//! • Build token icon URLs from the configured base.

use crate::errors::Result;
use crate::models::{PriceEntry, PriceTable};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_PRICES_URL: &str = "https://interview.switcheo.com/prices.json";
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/";

/// Anything that can produce the raw price list.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_entries(&self) -> Result<Vec<PriceEntry>>;

    /// Fetches and folds into a `PriceTable`.
    async fn fetch_table(&self) -> Result<PriceTable> {
        let entries = self.fetch_entries().await?;
        let table = PriceTable::from_entries(&entries);
        info!(
            entries = entries.len(),
            tokens = table.len(),
            "[FEED] price table built"
        );
        Ok(table)
    }
}

/// HTTP GET against a JSON endpoint returning `[{currency, price, date?}]`.
pub struct HttpPriceFeed {
    client: Client,
    url: Url,
}

impl HttpPriceFeed {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Uses a preconfigured client (proxy, timeouts, TLS settings).
    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PriceSource for HttpPriceFeed {
    async fn fetch_entries(&self) -> Result<Vec<PriceEntry>> {
        debug!(url = %self.url, "[FEED] requesting prices");
        let resp = self
            .client
            .get(self.url.clone())
            .header("accept", "application/json")
            .send()
            .await?
            .error_for_status()?;
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Reads the same JSON shape from a local file.
pub struct FilePriceSource {
    path: PathBuf,
}

impl FilePriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PriceSource for FilePriceSource {
    async fn fetch_entries(&self) -> Result<Vec<PriceEntry>> {
        debug!(path = %self.path.display(), "[FEED] reading prices file");
        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

/// Fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    entries: Vec<PriceEntry>,
}

impl StaticPriceSource {
    pub fn new(entries: Vec<PriceEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn fetch_entries(&self) -> Result<Vec<PriceEntry>> {
        Ok(self.entries.clone())
    }
}

/// Icon location for `symbol` under `base`. Missing icons are not detected.
pub fn token_icon_url(base: &Url, symbol: &str) -> String {
    match base.join(&format!("{symbol}.svg")) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}{symbol}.svg", base.as_str()),
    }
}
