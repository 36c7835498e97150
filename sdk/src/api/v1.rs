//! Official OAuth (V1) API client
//!
//! The narrower generation: Bearer-token auth, per-project task addressing,
//! and full entities echoed back from mutations (no `id2etag` maps). Used as
//! the fallback when no session credentials are configured.

use reqwest::Client;
use serde_json::Value;

use super::check_status;
use crate::error::Result;
use crate::models::{ProjectV1, TaskV1};

const DEFAULT_BASE_URL: &str = "https://api.ticktick.com/open/v1";
const USER_AGENT: &str = "ticktick-sdk/0.1";

/// V1 OAuth API client
#[derive(Debug, Clone)]
pub struct V1Client {
    http: Client,
    base_url: String,
    access_token: String,
}

impl V1Client {
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(access_token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(V1Client {
            http,
            base_url: base_url.into(),
            access_token: access_token.into(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_projects(&self) -> Result<Vec<ProjectV1>> {
        self.get_json("/project").await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<ProjectV1> {
        self.get_json(&format!("/project/{}", project_id)).await
    }

    /// Single-task fetch; V1 scopes tasks per project.
    pub async fn get_task(&self, project_id: &str, task_id: &str) -> Result<TaskV1> {
        self.get_json(&format!("/project/{}/task/{}", project_id, task_id))
            .await
    }

    /// V1 echoes the full created task, not an id map.
    pub async fn create_task(&self, payload: &Value) -> Result<TaskV1> {
        self.post_json("/task", payload).await
    }
}
