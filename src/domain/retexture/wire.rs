//! Wire types for retexture requests (REST).

use crate::task::TaskId;
use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/retextures`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetextureRequest {
    /// Succeeded model-generation task to retexture.
    pub model_task_id: TaskId,
    pub style_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Keep the source model's UV layout instead of re-unwrapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_original_uv: Option<bool>,
}

impl RetextureRequest {
    pub fn new(model_task_id: impl Into<TaskId>, style_prompt: impl Into<String>) -> Self {
        Self {
            model_task_id: model_task_id.into(),
            style_prompt: style_prompt.into(),
            negative_prompt: None,
            enable_original_uv: None,
        }
    }
}
