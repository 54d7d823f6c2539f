//! Model-generation sub-client — create, poll, list.

use crate::client::MeshgenClient;
use crate::domain::generation::wire::GenerationRequest;
use crate::error::SdkError;
use crate::task::{poll_until_terminal, SubmitResponse, Task, TaskId};

const RESOURCE: &str = "/v1/model-generations";

/// Sub-client for model-generation tasks.
pub struct Generations<'a> {
    pub(crate) client: &'a MeshgenClient,
}

impl<'a> Generations<'a> {
    /// Submit a generation task. Returns the handle, not the finished task.
    pub async fn create(&self, request: &GenerationRequest) -> Result<TaskId, SdkError> {
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

    /// Page through generation tasks, newest first.
    pub async fn list(
        &self,
        page_num: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Vec<Task>, SdkError> {
        let mut url = String::from(RESOURCE);
        let mut params = Vec::new();
        if let Some(p) = page_num {
            params.push(format!("page_num={}", p));
        }
        if let Some(s) = page_size {
            params.push(format!("page_size={}", s));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        Ok(self.client.http.get(&url).await?)
    }

    /// Submit and block until the task reaches a terminal status.
    pub async fn create_and_wait(&self, request: &GenerationRequest) -> Result<Task, SdkError> {
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
