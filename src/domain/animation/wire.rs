//! Wire types for animation requests (REST).

use crate::task::TaskId;
use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/animations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationRequest {
    /// Succeeded rigging task to animate.
    pub model_task_id: TaskId,
    /// Free-form action description, e.g. `"walk"` or `"wave both arms"`.
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u16>,
}

impl AnimationRequest {
    pub fn new(model_task_id: impl Into<TaskId>, action: impl Into<String>) -> Self {
        Self {
            model_task_id: model_task_id.into(),
            action: action.into(),
            fps: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_omitted_when_unset() {
        let request = AnimationRequest::new("rig-task-1", "walk");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model_task_id"], "rig-task-1");
        assert_eq!(json["action"], "walk");
        assert!(json.get("fps").is_none());
    }
}
