//! Animation sub-client.

use crate::client::MeshgenClient;
use crate::domain::animation::wire::AnimationRequest;
use crate::error::SdkError;
use crate::task::{poll_until_terminal, SubmitResponse, Task, TaskId};

const RESOURCE: &str = "/v1/animations";

/// Sub-client for animation tasks.
pub struct Animations<'a> {
    pub(crate) client: &'a MeshgenClient,
}

impl<'a> Animations<'a> {
    /// Submit an animation task. Returns the handle, not the finished task.
    pub async fn create(&self, request: &AnimationRequest) -> Result<TaskId, SdkError> {
        let ack: SubmitResponse = self.client.http.post(RESOURCE, request).await?;
        Ok(ack.id)
    }

    /// Fetch the current task state.
    pub async fn get(&self, id: &TaskId) -> Result<Task, SdkError> {
        Ok(self.client.http.get(&format!("{RESOURCE}/{id}")).await?)
    }

    /// Delete a task record.
    pub async fn delete(&self, id: &TaskId) -> Result<(), SdkError> {
        Ok(self.client.http.delete(&format!("{RESOURCE}/{id}")).await?)
    }

    /// Submit and block until the task reaches a terminal status.
    pub async fn create_and_wait(&self, request: &AnimationRequest) -> Result<Task, SdkError> {
        let id = self.create(request).await?;
        self.wait(&id).await
    }

    /// Poll an existing task to completion under the client's poll bounds.
    pub async fn wait(&self, id: &TaskId) -> Result<Task, SdkError> {
        let http = &self.client.http;
        poll_until_terminal(
            move |task_id| async move { http.get::<Task>(&format!("{RESOURCE}/{task_id}")).await },
            id,
            &self.client.poll,
        )
        .await
    }
}
