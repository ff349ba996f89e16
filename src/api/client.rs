use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::base::ApiEndpoints;
use crate::config::ClientSettings;
use crate::todos::{NewTodo, Todo, TodoId, TodoPatch};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    HttpStatus { status: StatusCode, body: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(error) => error.status(),
            Self::HttpStatus { status, .. } => Some(*status),
        }
    }
}

/// Thin client over the backend's machine-info and todos routes.
///
/// No timeout and no retry are applied; every call waits on the transport.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    endpoints: ApiEndpoints,
}

impl ApiClient {
    pub fn new(endpoints: ApiEndpoints) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoints,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(ApiEndpoints::new(
            settings.api_url.as_deref(),
            &settings.page_origin,
            &settings.internal_api_host,
        ))
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    pub async fn fetch_machine_info(&self) -> Result<Value, ApiError> {
        let url = self.endpoints.absolute(&self.endpoints.machine_info_path());
        debug!(url = %url, "fetching machine info");

        let response = self.http_client.get(&url).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let url = self.endpoints.absolute(&self.endpoints.todos_path());
        debug!(url = %url, "fetching todos");

        let response = self.http_client.get(&url).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    pub async fn create_todo(&self, todo: &NewTodo) -> Result<(), ApiError> {
        let url = self.endpoints.absolute(&self.endpoints.todos_path());
        debug!(url = %url, title = %todo.title, "creating todo");

        self.send_json(self.http_client.post(&url), todo).await
    }

    pub async fn update_todo(&self, id: &TodoId, patch: &TodoPatch) -> Result<(), ApiError> {
        let url = self.endpoints.absolute(&self.endpoints.todo_path(id));
        debug!(url = %url, todo_id = %id, "updating todo");

        self.send_json(self.http_client.patch(&url), patch).await
    }

    pub async fn delete_todo(&self, id: &TodoId) -> Result<(), ApiError> {
        let url = self.endpoints.absolute(&self.endpoints.todo_path(id));
        debug!(url = %url, todo_id = %id, "deleting todo");

        let response = self.http_client.delete(&url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn send_json<T: Serialize>(
        &self,
        request: reqwest::RequestBuilder,
        body: &T,
    ) -> Result<(), ApiError> {
        let response = request.json(body).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error response body>".to_owned());
    debug!(status = status.as_u16(), body = %body, "backend returned an error status");
    Err(ApiError::HttpStatus { status, body })
}
