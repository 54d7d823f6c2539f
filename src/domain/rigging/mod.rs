//! Rigging domain — skeleton binding for a generated model.

pub mod client;
pub mod wire;

pub use client::Riggings;
pub use wire::RiggingRequest;
