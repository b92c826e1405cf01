//! uWave HTTP client.
//!
//! Provides async methods for fetching stop and line documents from the
//! uWave tracking API. Handles timeouts, bounding of in-flight requests,
//! and decoding into domain types.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Line, LineId, Stop, StopId};

use super::decode::DecodeMode;
use super::error::UwaveError;
use super::provider::TransitProvider;
use super::types::{BusLineDto, BusStopDto};

/// Default base URL for the uWave API.
pub const DEFAULT_BASE_URL: &str = "https://dummy.uwave.sg";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the uWave client.
#[derive(Debug, Clone)]
pub struct UwaveConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// How malformed documents are handled
    pub decode_mode: DecodeMode,
}

impl UwaveConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            decode_mode: DecodeMode::default(),
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the decoding mode.
    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }
}

impl Default for UwaveConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// uWave API client.
///
/// Cheap to clone; clones share the connection pool and the semaphore
/// limiting concurrent requests.
#[derive(Debug, Clone)]
pub struct UwaveClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
    decode_mode: DecodeMode,
}

impl UwaveClient {
    /// Create a new uWave client with the given configuration.
    pub fn new(config: UwaveConfig) -> Result<Self, UwaveError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            decode_mode: config.decode_mode,
        })
    }

    /// The decoding mode in use.
    pub fn decode_mode(&self) -> DecodeMode {
        self.decode_mode
    }

    /// Fetch a resource body, applying the status policy of the decode mode.
    async fn get_body(&self, resource: &str) -> Result<String, UwaveError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| UwaveError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, resource);
        debug!(%url, "fetching upstream document");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        self.decode_mode
            .check_status(resource, status.as_u16(), &body)?;

        Ok(body)
    }
}

impl TransitProvider for UwaveClient {
    async fn fetch_stop(&self, id: &StopId) -> Result<Stop, UwaveError> {
        let resource = format!("busstop/{id}");
        let body = self.get_body(&resource).await?;
        let dto: BusStopDto = self.decode_mode.decode(&resource, &body)?;
        Ok(dto.into())
    }

    async fn fetch_line(&self, id: &LineId) -> Result<Line, UwaveError> {
        let resource = format!("busline/{id}");
        let body = self.get_body(&resource).await?;
        let dto: BusLineDto = self.decode_mode.decode(&resource, &body)?;
        Ok(dto.into())
    }

    async fn fetch_stop_raw(&self, id: &StopId) -> Result<String, UwaveError> {
        self.get_body(&format!("busstop/{id}")).await
    }
}
