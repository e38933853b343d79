use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::data::errors::StoreError;
use crate::data::records::{ColorMatch, EnrichedColor};
use crate::traits::ColorStore;

/// Configuration for the REST color store client
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Base URL of the store service
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token
    pub api_key: String,
    /// Table holding the color records
    pub table: String,
    /// Stored procedure performing the nearest-neighbor search
    pub search_fn: String,
    /// Timeout in seconds for HTTP requests
    pub timeout_secs: u64,
}

impl Default for RestStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: String::new(),
            table: "colors".to_string(),
            search_fn: "match_colors".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client for a PostgREST-style color store over HTTP.
///
/// Upserts go to `/rest/v1/{table}?on_conflict=name` with
/// `Prefer: resolution=merge-duplicates`, so repeated writes of the same
/// record merge instead of duplicating. Search calls the `{search_fn}`
/// stored procedure via `/rest/v1/rpc/`.
#[derive(Debug, Clone)]
pub struct RestColorStore {
    config: RestStoreConfig,
    client: Client,
}

/// Request payload for the nearest-neighbor search procedure
#[derive(Debug, Serialize)]
struct NearestColorsRequest<'a> {
    query_embedding: &'a str,
    match_count: usize,
}

impl RestColorStore {
    /// Creates a new RestColorStore with the provided configuration
    pub fn new(config: RestStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Connection(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Maps an HTTP transport error to a StoreError
    fn map_http_error(&self, error: reqwest::Error) -> StoreError {
        if error.is_timeout() {
            StoreError::Timeout(format!("request timeout: {}", error))
        } else if error.is_connect() {
            StoreError::Connection(format!("connection error: {}", error))
        } else {
            StoreError::Response(format!("HTTP error: {}", error))
        }
    }
}

#[async_trait]
impl ColorStore for RestColorStore {
    #[instrument(skip(self, record), fields(name = %record.name))]
    async fn upsert_color(&self, record: &EnrichedColor) -> Result<(), StoreError> {
        debug!("Upserting color record");

        let url = format!(
            "{}/rest/v1/{}?on_conflict=name",
            self.config.base_url, self.config.table
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[record])
            .send()
            .await
            .map_err(|e| self.map_http_error(e))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("HTTP error: {}", status));
                Err(StoreError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    #[instrument(skip(self, query_embedding), fields(match_count = match_count))]
    async fn nearest_colors(
        &self,
        query_embedding: &str,
        match_count: usize,
    ) -> Result<Vec<ColorMatch>, StoreError> {
        debug!("Searching nearest colors");

        let url = format!(
            "{}/rest/v1/rpc/{}",
            self.config.base_url, self.config.search_fn
        );
        let request = NearestColorsRequest {
            query_embedding,
            match_count,
        };

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_http_error(e))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Vec<ColorMatch>>()
                .await
                .map_err(|e| StoreError::Response(format!("failed to parse response: {}", e))),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("HTTP error: {}", status));
                Err(StoreError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
