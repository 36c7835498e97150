//! Session-based (V2) API client
//!
//! The richer, unofficial generation. Authentication is a `signon` call
//! returning a session token carried on every request; most reads come from
//! the full-state sync document, most writes go through `batch/*` endpoints
//! returning [`BatchResponse`] maps.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{check_status, BatchResponse};
use crate::error::{Result, TickTickError};
use crate::models::{
    ColumnWire, FocusDistWire, FocusHeatmapWire, HabitCheckinWire, HabitWire, ProjectGroupWire,
    ProjectV2, TagWire, TaskV2, UserProfileWire, UserStatisticsWire, UserStatusWire,
};
use crate::session::SessionToken;

const DEFAULT_BASE_URL: &str = "https://api.ticktick.com/api/v2";
const USER_AGENT: &str = "ticktick-sdk/0.1";

/// Full-state sync document: the active working set.
///
/// Only active-status tasks appear in `sync_task_bean`; closed tasks live
/// behind their own endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncDocument {
    #[serde(default)]
    pub project_profiles: Vec<ProjectV2>,
    #[serde(default)]
    pub project_groups: Vec<ProjectGroupWire>,
    #[serde(default)]
    pub tags: Vec<TagWire>,
    #[serde(default)]
    pub sync_task_bean: SyncTaskBean,
    #[serde(default)]
    pub inbox_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncTaskBean {
    #[serde(default)]
    pub update: Vec<TaskV2>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignonWire {
    token: String,
    inbox_id: String,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrashPageWire {
    #[serde(default)]
    tasks: Vec<TaskV2>,
}

#[derive(Debug, Deserialize)]
struct CheckinQueryWire {
    #[serde(default)]
    checkins: std::collections::HashMap<String, Vec<HabitCheckinWire>>,
}

/// V2 session API client
#[derive(Debug, Clone)]
pub struct V2Client {
    http: Client,
    base_url: String,
    session: Option<SessionToken>,
}

impl V2Client {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(V2Client {
            http,
            base_url: base_url.into(),
            session: None,
        })
    }

    pub fn set_session(&mut self, session: SessionToken) {
        self.session = Some(session);
    }

    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    /// Exchange username/password for a session token.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<SessionToken> {
        let url = format!("{}/user/signon?wc=true&remember=true", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({"username": username, "password": password}))
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        let wire: SignonWire = serde_json::from_str(&body)?;
        let session = SessionToken {
            token: wire.token,
            inbox_id: wire.inbox_id,
            user_id: wire.user_id,
        };
        self.session = Some(session.clone());
        Ok(session)
    }

    fn cookie(&self) -> Result<String> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| TickTickError::Authentication("no active session".to_string()))?;
        Ok(format!("t={}", session.token))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::COOKIE, self.cookie()?)
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        // Shape mismatches surface as typed errors, not optimistic field access
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &Value,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, %method, "request");
        let response = self
            .http
            .request(method, &url)
            .header(reqwest::header::COOKIE, self.cookie()?)
            .json(body)
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fire a mutating call whose response body is irrelevant (often empty).
    async fn send_ignore(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, %method, "request");
        let mut req = self
            .http
            .request(method, &url)
            .header(reqwest::header::COOKIE, self.cookie()?);
        if let Some(body) = body {
            req = req.json(body);
        }
        check_status(req.send().await?).await?;
        Ok(())
    }

    // ========================================================================
    // Sync & tasks
    // ========================================================================

    /// Fetch the full working set in one call.
    pub async fn sync(&self) -> Result<SyncDocument> {
        self.get_json("/batch/check/0").await
    }

    pub async fn get_task(&self, task_id: &str) -> Result<TaskV2> {
        self.get_json(&format!("/task/{}", task_id)).await
    }

    /// Batch task mutation. Any of the three lists may be empty.
    pub async fn batch_tasks(
        &self,
        add: Vec<Value>,
        update: Vec<Value>,
        delete: Vec<Value>,
    ) -> Result<BatchResponse> {
        let body = json!({"add": add, "update": update, "delete": delete});
        self.send_json(reqwest::Method::POST, "/batch/task", &body)
            .await
    }

    /// Completed or abandoned tasks within a closed-day range.
    pub async fn get_closed_tasks(
        &self,
        status: &str,
        from: &str,
        to: &str,
        limit: usize,
    ) -> Result<Vec<TaskV2>> {
        self.get_json(&format!(
            "/project/all/closed?from={}&to={}&status={}&limit={}",
            from, to, status, limit
        ))
        .await
    }

    pub async fn get_trash_tasks(&self, limit: usize) -> Result<Vec<TaskV2>> {
        let page: TrashPageWire = self
            .get_json(&format!(
                "/project/all/trash/pagination?start=0&limit={}",
                limit
            ))
            .await?;
        Ok(page.tasks)
    }

    pub async fn move_tasks(&self, moves: &[(String, String, String)]) -> Result<()> {
        let body: Value = moves
            .iter()
            .map(|(task_id, from, to)| {
                json!({"taskId": task_id, "fromProjectId": from, "toProjectId": to})
            })
            .collect();
        self.send_ignore(reqwest::Method::POST, "/batch/taskProject", Some(&body))
            .await
    }

    pub async fn set_task_parent(
        &self,
        task_id: &str,
        project_id: &str,
        parent_id: &str,
    ) -> Result<()> {
        let body = json!([{"taskId": task_id, "projectId": project_id, "parentId": parent_id}]);
        self.send_ignore(reqwest::Method::POST, "/batch/taskParent", Some(&body))
            .await
    }

    pub async fn unset_task_parent(
        &self,
        task_id: &str,
        project_id: &str,
        old_parent_id: &str,
    ) -> Result<()> {
        let body =
            json!([{"taskId": task_id, "projectId": project_id, "oldParentId": old_parent_id}]);
        self.send_ignore(reqwest::Method::POST, "/batch/taskParent", Some(&body))
            .await
    }

    // ========================================================================
    // Projects & folders
    // ========================================================================

    pub async fn batch_projects(
        &self,
        add: Vec<Value>,
        update: Vec<Value>,
        delete: Vec<Value>,
    ) -> Result<BatchResponse> {
        let body = json!({"add": add, "update": update, "delete": delete});
        self.send_json(reqwest::Method::POST, "/batch/project", &body)
            .await
    }

    pub async fn batch_folders(
        &self,
        add: Vec<Value>,
        update: Vec<Value>,
        delete: Vec<Value>,
    ) -> Result<BatchResponse> {
        let body = json!({"add": add, "update": update, "delete": delete});
        self.send_json(reqwest::Method::POST, "/batch/projectGroup", &body)
            .await
    }

    // ========================================================================
    // Tags
    // ========================================================================

    pub async fn batch_tags(&self, add: Vec<Value>, update: Vec<Value>) -> Result<BatchResponse> {
        let body = json!({"add": add, "update": update});
        self.send_json(reqwest::Method::POST, "/batch/tag", &body)
            .await
    }

    pub async fn delete_tag(&self, name: &str) -> Result<()> {
        let body = json!({"name": name});
        self.send_ignore(reqwest::Method::DELETE, "/tag", Some(&body))
            .await
    }

    pub async fn rename_tag(&self, name: &str, new_name: &str) -> Result<()> {
        let body = json!({"name": name, "newName": new_name});
        self.send_ignore(reqwest::Method::PUT, "/tag/rename", Some(&body))
            .await
    }

    /// Merge `source` into `target`; the source tag ceases to exist.
    pub async fn merge_tags(&self, source: &str, target: &str) -> Result<()> {
        let body = json!({"name": source, "newName": target});
        self.send_ignore(reqwest::Method::PUT, "/tag/merge", Some(&body))
            .await
    }

    // ========================================================================
    // Columns
    // ========================================================================

    pub async fn get_columns(&self, project_id: &str) -> Result<Vec<ColumnWire>> {
        self.get_json(&format!("/column/project/{}", project_id))
            .await
    }

    pub async fn batch_columns(
        &self,
        add: Vec<Value>,
        update: Vec<Value>,
        delete: Vec<Value>,
    ) -> Result<BatchResponse> {
        let body = json!({"add": add, "update": update, "delete": delete});
        self.send_json(reqwest::Method::POST, "/batch/column", &body)
            .await
    }

    // ========================================================================
    // Habits
    // ========================================================================

    pub async fn get_habits(&self) -> Result<Vec<HabitWire>> {
        self.get_json("/habits").await
    }

    pub async fn batch_habits(
        &self,
        add: Vec<Value>,
        update: Vec<Value>,
        delete: Vec<Value>,
    ) -> Result<BatchResponse> {
        let body = json!({"add": add, "update": update, "delete": delete});
        self.send_json(reqwest::Method::POST, "/habits/batch", &body)
            .await
    }

    pub async fn query_checkins(
        &self,
        habit_ids: &[String],
        after_stamp: i64,
    ) -> Result<std::collections::HashMap<String, Vec<HabitCheckinWire>>> {
        let body = json!({"habitIds": habit_ids, "afterStamp": after_stamp});
        let wire: CheckinQueryWire = self
            .send_json(reqwest::Method::POST, "/habitCheckins/query", &body)
            .await?;
        Ok(wire.checkins)
    }

    pub async fn batch_checkins(&self, add: Vec<Value>) -> Result<()> {
        let body = json!({"add": add});
        self.send_ignore(reqwest::Method::POST, "/habitCheckins/batch", Some(&body))
            .await
    }

    // ========================================================================
    // Focus & user
    // ========================================================================

    /// Focus minutes per day, date keys in `yyyymmdd`.
    pub async fn focus_heatmap(&self, start: &str, end: &str) -> Result<Vec<FocusHeatmapWire>> {
        self.get_json(&format!(
            "/pomodoros/statistics/heatmap/{}/{}",
            start, end
        ))
        .await
    }

    pub async fn focus_dist(&self, start: &str, end: &str) -> Result<FocusDistWire> {
        self.get_json(&format!("/pomodoros/statistics/dist/{}/{}", start, end))
            .await
    }

    pub async fn user_profile(&self) -> Result<UserProfileWire> {
        self.get_json("/user/profile").await
    }

    pub async fn user_status(&self) -> Result<UserStatusWire> {
        self.get_json("/user/status").await
    }

    pub async fn user_statistics(&self) -> Result<UserStatisticsWire> {
        self.get_json("/statistics/general").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sync_document_tolerates_missing_sections() {
        let doc: SyncDocument = serde_json::from_value(json!({
            "inboxId": "inbox12345",
            "syncTaskBean": {"update": []}
        }))
        .unwrap();
        assert!(doc.project_profiles.is_empty());
        assert!(doc.tags.is_empty());
        assert_eq!(doc.inbox_id.as_deref(), Some("inbox12345"));
    }

    #[test]
    fn requests_without_session_fail_with_auth_error() {
        let client = V2Client::with_base_url("http://127.0.0.1:1").unwrap();
        assert!(matches!(
            client.cookie(),
            Err(TickTickError::Authentication(_))
        ));
    }

    #[test]
    fn checkin_query_shape() {
        let wire: CheckinQueryWire = serde_json::from_value(json!({
            "checkins": {
                "h1": [{"habitId": "h1", "checkinStamp": 20260110, "value": 1.0}]
            }
        }))
        .unwrap();
        assert_eq!(wire.checkins["h1"].len(), 1);
    }
}
