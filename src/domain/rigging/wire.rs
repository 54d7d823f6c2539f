//! Wire types for rigging requests (REST).

use crate::task::TaskId;
use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/riggings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiggingRequest {
    /// Succeeded model-generation task to rig.
    pub model_task_id: TaskId,
    /// Character height hint used to scale the skeleton.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_meters: Option<f64>,
}

impl RiggingRequest {
    pub fn new(model_task_id: impl Into<TaskId>) -> Self {
        Self {
            model_task_id: model_task_id.into(),
            height_meters: None,
        }
    }
}
