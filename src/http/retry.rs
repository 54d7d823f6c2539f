//! Retry policy for HTTP requests — bounded exponential backoff with jitter.

use crate::error::ApiError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Jitter fraction applied symmetrically around the exponential delay.
const JITTER_FRACTION: f64 = 0.3;

/// Exponent cap so the pre-clamp delay stays finite.
const MAX_EXPONENT: u32 = 20;

/// Source of jitter samples.
///
/// Injectable so tests can pin the sample and assert exact delays.
pub trait JitterSource: Send + Sync {
    /// Uniform sample in `[-1.0, 1.0]`.
    fn sample(&self) -> f64;
}

/// Default jitter source backed by the thread RNG.
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn sample(&self) -> f64 {
        rand::random::<f64>() * 2.0 - 1.0
    }
}

/// Fixed jitter sample, for deterministic delay assertions.
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&self) -> f64 {
        self.0
    }
}

/// Configuration for retry behavior.
#[derive(Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Delay before the first retry; lower bound for every delay.
    pub base_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
    /// HTTP status codes that permit a retry. Transport failures and
    /// timeouts are always retryable within the attempt budget.
    pub retryable_statuses: Vec<u16>,
    jitter: Arc<dyn JitterSource>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            retryable_statuses: vec![429, 500, 502, 503, 504],
            jitter: Arc::new(RandomJitter),
        }
    }
}

impl fmt::Debug for RetryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfig")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("retryable_statuses", &self.retryable_statuses)
            .finish_non_exhaustive()
    }
}

impl RetryConfig {
    /// Replace the jitter source (tests pin it with [`FixedJitter`]).
    pub fn with_jitter_source(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Whether another attempt is permitted after `error` on 0-based
    /// `attempt`.
    ///
    /// Transport failures and timeouts retry within the budget; otherwise
    /// only statuses in `retryable_statuses`. Every other 4xx is terminal
    /// no matter how much budget remains.
    pub fn should_retry(&self, error: &ApiError, attempt: u32) -> bool {
        if attempt >= self.max_retries {
            return false;
        }
        if error.is_transport() {
            return true;
        }
        error
            .status()
            .is_some_and(|s| self.retryable_statuses.contains(&s))
    }

    /// Backoff delay for a 0-based attempt index.
    ///
    /// `base_delay * 2^attempt`, perturbed by up to ±30% jitter, clamped to
    /// `[base_delay, max_delay]`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponential =
            self.base_delay.as_secs_f64() * 2f64.powi(attempt.min(MAX_EXPONENT) as i32);
        let jittered = exponential + self.jitter.sample() * JITTER_FRACTION * exponential;
        let clamped = jittered.clamp(self.base_delay.as_secs_f64(), self.max_delay.as_secs_f64());
        Duration::from_secs_f64(clamped)
    }
}

/// One scheduled retry, reported to the optional observer callback.
#[derive(Debug, Clone)]
pub struct RetryEvent {
    /// 0-based index of the attempt that just failed.
    pub attempt: u32,
    pub max_retries: u32,
    /// Backoff delay before the next attempt.
    pub delay: Duration,
    /// Display form of the triggering error.
    pub cause: String,
}

/// Callback invoked whenever the executor schedules a retry.
pub type RetryObserver = Arc<dyn Fn(&RetryEvent) + Send + Sync>;
