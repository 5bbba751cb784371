//! Rate sources - the fetch boundary and its HTTP implementation.

use std::future::Future;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::config::RatesConfig;

/// Currency code → rate, as returned by a source.
pub type RateTable = FxHashMap<String, f64>;

/// Rate fetch failure.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("rate request failed")]
    Http(#[from] reqwest::Error),

    #[error("rate source failed: {0}")]
    Source(String),
}

/// Remote currency rate source.
///
/// Eventually consistent and allowed to fail or time out; the caller keeps
/// its previous snapshot on any error.
pub trait RateSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<RateTable, RateError>> + Send;
}

/// One entry of the daily-rates payload. Fields other than `rate` (code,
/// name, date, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RateEntry {
    rate: f64,
}

/// HTTP JSON rate source.
///
/// Expects a floatrates-style payload: an object keyed by currency code,
/// each entry carrying at least a `rate` field.
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &RatesConfig) -> Result<Self, RateError> {
        Self::new(config.url.clone(), config.timeout())
    }
}

impl RateSource for HttpRateSource {
    async fn fetch(&self) -> Result<RateTable, RateError> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let entries: FxHashMap<String, RateEntry> = response.json().await?;

        Ok(entries
            .into_iter()
            .map(|(code, entry)| (code, entry.rate))
            .collect())
    }
}
