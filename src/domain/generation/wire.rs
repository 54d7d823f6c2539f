//! Wire types for model-generation requests (REST).

use crate::domain::generation::{ArtStyle, Topology};
use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/model-generations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art_style: Option<ArtStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_polycount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology: Option<Topology>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_pbr: Option<bool>,
}

impl GenerationRequest {
    /// Request with only the prompt set; fill the rest via struct update.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: None,
            art_style: None,
            target_polycount: None,
            topology: None,
            seed: None,
            enable_pbr: None,
        }
    }
}
