//! High-level client — `MeshgenClient` with nested sub-client accessors.
//!
//! Each endpoint family has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods. All sub-clients
//! share one executor, so one rate window governs the whole client.

use crate::domain::animation::client::Animations;
use crate::domain::generation::client::Generations;
use crate::domain::retexture::client::Retextures;
use crate::domain::rigging::client::Riggings;
use crate::error::SdkError;
use crate::http::retry::{RetryConfig, RetryObserver};
use crate::http::MeshgenHttp;
use crate::task::PollConfig;

use std::time::Duration;

/// Default requests-per-second ceiling (the base plan tier).
const DEFAULT_REQUESTS_PER_SECOND: usize = 5;

/// The primary entry point for the MeshGen SDK.
///
/// Provides nested sub-client accessors per endpoint family:
/// `client.generations()`, `client.riggings()`, etc.
#[derive(Clone)]
pub struct MeshgenClient {
    pub(crate) http: MeshgenHttp,
    pub(crate) poll: PollConfig,
}

impl std::fmt::Debug for MeshgenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshgenClient").finish_non_exhaustive()
    }
}

impl MeshgenClient {
    pub fn builder() -> MeshgenClientBuilder {
        MeshgenClientBuilder::default()
    }

    /// Build a client from `MESHGEN_API_KEY` (required) and
    /// `MESHGEN_API_URL` (optional override).
    pub fn from_env() -> Result<Self, SdkError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var("MESHGEN_API_URL") {
            builder = builder.base_url(&url);
        }
        let key = std::env::var("MESHGEN_API_KEY")
            .map_err(|_| SdkError::Config("MESHGEN_API_KEY is not set".to_string()))?;
        builder.api_key(&key).build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn generations(&self) -> Generations<'_> {
        Generations { client: self }
    }

    pub fn riggings(&self) -> Riggings<'_> {
        Riggings { client: self }
    }

    pub fn retextures(&self) -> Retextures<'_> {
        Retextures { client: self }
    }

    pub fn animations(&self) -> Animations<'_> {
        Animations { client: self }
    }

    /// The poll bounds applied by every `wait`/`create_and_wait`.
    pub fn poll_config(&self) -> &PollConfig {
        &self.poll
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MeshgenClientBuilder {
    base_url: String,
    api_key: Option<String>,
    retry: RetryConfig,
    requests_per_second: usize,
    poll: PollConfig,
    observer: Option<RetryObserver>,
}

impl Default for MeshgenClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            api_key: None,
            retry: RetryConfig::default(),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            poll: PollConfig::default(),
            observer: None,
        }
    }
}

impl MeshgenClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Bearer credential sent on every call. Required.
    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    pub fn base_delay(mut self, base_delay: Duration) -> Self {
        self.retry.base_delay = base_delay;
        self
    }

    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.retry.max_delay = max_delay;
        self
    }

    /// Status codes the executor may retry (besides transport failures).
    pub fn retryable_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.retry.retryable_statuses = statuses;
        self
    }

    /// Replace the whole retry config (e.g. to pin the jitter source).
    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Rate ceiling for the plan tier this key belongs to. The tier is
    /// fixed for the client's lifetime.
    pub fn requests_per_second(mut self, requests_per_second: usize) -> Self {
        self.requests_per_second = requests_per_second.max(1);
        self
    }

    pub fn poll_max_attempts(mut self, max_attempts: u32) -> Self {
        self.poll.max_attempts = max_attempts;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll.interval = interval;
        self
    }

    /// Structured callback invoked on every scheduled retry, in addition
    /// to the `tracing` output.
    pub fn retry_observer(mut self, observer: RetryObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<MeshgenClient, SdkError> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SdkError::Config("an API key is required".to_string()))?;

        Ok(MeshgenClient {
            http: MeshgenHttp::new(
                &self.base_url,
                api_key,
                self.retry,
                self.requests_per_second,
                self.observer,
            ),
            poll: self.poll,
        })
    }
}
