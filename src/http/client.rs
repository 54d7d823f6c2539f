//! Low-level HTTP executor — `MeshgenHttp`.
//!
//! One resilient request path shared by every endpoint family: rate-gate
//! admission, send with bearer auth, error classification, retry with
//! backoff, JSON decode. Internal to the SDK — the domain sub-clients
//! wrap this.

use crate::error::ApiError;
use crate::http::rate::RateGate;
use crate::http::retry::{RetryConfig, RetryEvent, RetryObserver};

use futures_timer::Delay;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Resilient HTTP executor for the MeshGen REST API.
pub struct MeshgenHttp {
    base_url: String,
    client: Client,
    /// Static bearer credential, supplied once at construction.
    api_key: String,
    rate: Arc<RateGate>,
    retry: RetryConfig,
    observer: Option<RetryObserver>,
}

impl MeshgenHttp {
    pub(crate) fn new(
        base_url: &str,
        api_key: String,
        retry: RetryConfig,
        requests_per_second: usize,
        observer: Option<RetryObserver>,
    ) -> Self {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            api_key,
            rate: Arc::new(RateGate::new(requests_per_second)),
            retry,
            observer,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The shared rate gate — one window per client instance.
    pub(crate) fn rate(&self) -> &RateGate {
        &self.rate
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.execute(Method::GET, path, None::<&()>).await?;
        resp.json::<T>().await.map_err(ApiError::from)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.execute(Method::POST, path, Some(body)).await?;
        resp.json::<T>().await.map_err(ApiError::from)
    }

    /// DELETE with an empty success body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// One logical call: admission is checked before every attempt, but the
    /// window entry is recorded only once, on eventual success. After the
    /// retry budget runs out the *last classified error* is returned, so
    /// callers can still distinguish the final cause.
    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0u32;

        loop {
            self.rate.admit().await;

            let mut req = self
                .client
                .request(method.clone(), url.as_str())
                .header("Authorization", format!("Bearer {}", self.api_key));
            if let Some(b) = body {
                req = req.json(b);
            }

            let error = match req.send().await {
                Ok(resp) if resp.status().is_success() => {
                    self.rate.record().await;
                    return Ok(resp);
                }
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let body_text = resp.text().await.unwrap_or_default();
                    ApiError::classify(status, &body_text)
                }
                Err(e) => ApiError::from(e),
            };

            if !self.retry.should_retry(&error, attempt) {
                return Err(error);
            }

            let delay = self.retry.delay_for_attempt(attempt);
            tracing::debug!(
                attempt = attempt + 1,
                max = self.retry.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Retrying request to {}: {}",
                url,
                error
            );
            if let Some(observer) = self.observer.as_deref() {
                observer(&RetryEvent {
                    attempt,
                    max_retries: self.retry.max_retries,
                    delay,
                    cause: error.to_string(),
                });
            }
            Delay::new(delay).await;
            attempt += 1;
        }
    }
}

impl Clone for MeshgenHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            rate: self.rate.clone(),
            retry: self.retry.clone(),
            observer: self.observer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::retry::FixedJitter;
    use std::sync::atomic::{AtomicU32, Ordering};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_retry(max_retries: u32) -> RetryConfig {
        let mut retry = RetryConfig::default().with_jitter_source(Arc::new(FixedJitter(0.0)));
        retry.max_retries = max_retries;
        retry.base_delay = Duration::from_millis(10);
        retry.max_delay = Duration::from_millis(50);
        retry
    }

    fn http_for(server: &MockServer, retry: RetryConfig, observer: Option<RetryObserver>) -> MeshgenHttp {
        MeshgenHttp::new(&server.uri(), "test-key".to_string(), retry, 100, observer)
    }

    #[tokio::test]
    async fn retries_rate_limit_then_succeeds_recording_one_slot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ping"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "t1"})))
            .expect(1)
            .mount(&server)
            .await;

        let http = http_for(&server, fast_retry(3), None);
        let resp: serde_json::Value = http.get("/v1/ping").await.unwrap();
        assert_eq!(resp["id"], "t1");
        // Three attempts, one logical call: exactly one window entry.
        assert_eq!(http.rate().in_window().await, 1);
    }

    #[tokio::test]
    async fn terminal_4xx_fails_after_a_single_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/secret"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"message": "invalid api key"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let http = http_for(&server, fast_retry(3), None);
        let err = http.get::<serde_json::Value>("/v1/secret").await.unwrap_err();
        match err {
            ApiError::Unauthorized { message, .. } => assert_eq!(message, "invalid api key"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
        assert_eq!(http.rate().in_window().await, 0);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_the_last_classified_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let http = http_for(&server, fast_retry(2), None);
        let err = http.get::<serde_json::Value>("/v1/flaky").await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError { status: 503, .. }));
    }

    #[tokio::test]
    async fn bearer_credential_is_sent_on_every_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/echo"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let http = http_for(&server, fast_retry(0), None);
        let resp: serde_json::Value = http
            .post("/v1/echo", &serde_json::json!({"probe": true}))
            .await
            .unwrap();
        assert_eq!(resp["id"], "x");
    }

    #[tokio::test]
    async fn delete_accepts_an_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/things/t1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let http = http_for(&server, fast_retry(0), None);
        http.delete("/v1/things/t1").await.unwrap();
    }

    #[tokio::test]
    async fn observer_sees_each_scheduled_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ping"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let seen = Arc::new(AtomicU32::new(0));
        let counter = seen.clone();
        let observer: RetryObserver = Arc::new(move |event: &RetryEvent| {
            assert!(event.cause.contains("rate limited"));
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let http = http_for(&server, fast_retry(3), Some(observer));
        let _: serde_json::Value = http.get("/v1/ping").await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
