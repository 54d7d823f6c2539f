//! HTTP layer — rate-gated, retrying executor shared by all endpoint
//! families.

pub mod client;
pub mod rate;
pub mod retry;

pub use client::MeshgenHttp;
pub use rate::RateGate;
pub use retry::{FixedJitter, JitterSource, RandomJitter, RetryConfig, RetryEvent, RetryObserver};
