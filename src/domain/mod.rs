//! Endpoint families organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — domain enums + re-exports
//! - `wire.rs` — raw serde request structs matching the REST API
//! - `client.rs` — sub-client borrowing the shared executor and poller
//!
//! The families differ only in resource path and payload shape; task
//! creation, polling, and failure handling are the shared core.

pub mod animation;
pub mod generation;
pub mod retexture;
pub mod rigging;
