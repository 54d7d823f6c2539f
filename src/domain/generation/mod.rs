//! Model-generation domain — text-to-model tasks.

pub mod client;
pub mod wire;

pub use client::Generations;
pub use wire::GenerationRequest;

use serde::{Deserialize, Serialize};

/// Visual style applied during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtStyle {
    Realistic,
    Sculpture,
    Cartoon,
}

/// Mesh topology of the generated model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Quad,
    Triangle,
}
