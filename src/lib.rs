//! # MeshGen SDK
//!
//! An asynchronous Rust client for the MeshGen 3D asset generation API:
//! submit long-running tasks (model generation, rigging, retexturing,
//! animation), receive opaque handles, and poll them to completion.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — shared task model, error taxonomy
//! 2. **HTTP** — `MeshgenHttp`: rate-gated, retrying request executor
//! 3. **Polling** — generic drive-to-terminal loop over any task handle
//! 4. **Domains** — one vertical slice per endpoint family
//! 5. **High-Level Client** — `MeshgenClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use meshgen_sdk::prelude::*;
//!
//! let client = MeshgenClient::builder()
//!     .api_key("mg-...")
//!     .build()?;
//!
//! let request = GenerationRequest::new("a weathered bronze statue of a fox");
//! let task = client.generations().create_and_wait(&request).await?;
//! println!("model manifest: {:?}", task.result);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared task model: handles, statuses, the polled representation.
pub mod task;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// Rate-gated, retrying HTTP executor.
pub mod http;

// ── Layer 3: Domains ─────────────────────────────────────────────────────────

/// Endpoint families (vertical slices): wire types + sub-clients.
pub mod domain;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `MeshgenClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Task model
    pub use crate::task::{poll_until_terminal, PollConfig, SubmitResponse, Task, TaskId, TaskStatus};

    // Domain types
    pub use crate::domain::animation::AnimationRequest;
    pub use crate::domain::generation::{ArtStyle, GenerationRequest, Topology};
    pub use crate::domain::retexture::RetextureRequest;
    pub use crate::domain::rigging::RiggingRequest;

    // Errors
    pub use crate::error::{ApiError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Client + sub-clients
    pub use crate::client::{MeshgenClient, MeshgenClientBuilder};
    pub use crate::domain::animation::client::Animations;
    pub use crate::domain::generation::client::Generations;
    pub use crate::domain::retexture::client::Retextures;
    pub use crate::domain::rigging::client::Riggings;

    // Retry + rate configuration
    pub use crate::http::retry::{
        FixedJitter, JitterSource, RandomJitter, RetryConfig, RetryEvent, RetryObserver,
    };
}
