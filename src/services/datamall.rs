// src/services/datamall.rs

//! DataMall page fetcher.
//!
//! Issues one authenticated GET per offset against a single resource endpoint
//! and decodes the `value` array from the response envelope. There is no
//! retry: a transport or decode failure propagates to the caller, which
//! aborts the run and leaves the partial checkpoint on disk.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ApiConfig;
use crate::error::Result;
use crate::models::{Page, PageEnvelope};

/// Source of record pages, keyed by offset.
///
/// Implemented by [`DataMallClient`] for the real API; tests drive the
/// pagination loop with in-memory fakes.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page of records starting at `offset`.
    async fn fetch_page(&self, offset: u64) -> Result<Page>;
}

/// HTTP client for one DataMall resource endpoint.
pub struct DataMallClient {
    http: Client,
    endpoint: String,
    account_key: String,
}

impl DataMallClient {
    /// Create a client for the given resource endpoint.
    pub fn new(
        api: &ApiConfig,
        endpoint: impl Into<String>,
        account_key: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&api.user_agent)
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            account_key: account_key.into(),
        })
    }

    fn page_url(&self, offset: u64) -> String {
        format!("{}?$skip={}", self.endpoint, offset)
    }
}

#[async_trait]
impl PageSource for DataMallClient {
    async fn fetch_page(&self, offset: u64) -> Result<Page> {
        let envelope: PageEnvelope = self
            .http
            .get(self.page_url(offset))
            .header("AccountKey", &self.account_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Page {
            offset,
            records: envelope.value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_appends_skip() {
        let client = DataMallClient::new(
            &ApiConfig::default(),
            "http://example.com/BusStops",
            "key",
        )
        .unwrap();
        assert_eq!(
            client.page_url(500),
            "http://example.com/BusStops?$skip=500"
        );
    }
}
