//! Unified access facade
//!
//! One method per domain verb. Every verb is a short saga: ensure a session,
//! issue one or more upstream calls, convert the payloads, return canonical
//! records or a typed error. Dispatch between the two API generations is
//! capability-keyed: the session (V2) backend is preferred whenever it can be
//! brought up, the OAuth (V1) backend covers its narrower verb set otherwise.
//!
//! Batch verbs loop sequentially and never roll back: a failure on item k
//! leaves items 1..k-1 applied. This is the documented contract, not an
//! accident; the upstream has no cross-item transactions to offer.

use chrono::{Local, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use crate::api::{V1Client, V2Client};
use crate::constants::{TaskKind, TaskPriority, TaskStatus, ViewMode};
use crate::error::{Result, TickTickError};
use crate::filter::TaskFilter;
use crate::models::{
    format_v2_datetime, Column, FocusHeatmapEntry, FocusTagStat, Habit, HabitCheckin, Project,
    ProjectGroup, Tag, Task, User, UserStatistics, UserStatus,
};
use crate::session::{SessionCache, SessionState, SessionToken};
use crate::settings::Settings;

/// Fields accepted when creating a task. Only `title` is required.
#[derive(Debug, Clone, Default)]
pub struct TaskSpec {
    pub title: String,
    pub project_id: Option<String>,
    pub content: Option<String>,
    pub kind: Option<TaskKind>,
    pub priority: Option<TaskPriority>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub time_zone: Option<String>,
    pub tags: Option<Vec<String>>,
    pub reminders: Option<Vec<String>>,
    /// RRULE string; requires a start date upstream
    pub recurrence: Option<String>,
    pub parent_id: Option<String>,
}

impl TaskSpec {
    pub fn titled(title: impl Into<String>) -> Self {
        TaskSpec {
            title: title.into(),
            ..Default::default()
        }
    }

    fn into_payload(self, project_id: Option<&str>) -> Value {
        let mut map = Map::new();
        map.insert("title".into(), json!(self.title));
        if let Some(project_id) = project_id {
            map.insert("projectId".into(), json!(project_id));
        }
        if let Some(content) = self.content {
            map.insert("content".into(), json!(content));
        }
        if let Some(kind) = self.kind {
            map.insert("kind".into(), json!(kind.as_wire()));
        }
        if let Some(priority) = self.priority {
            map.insert("priority".into(), json!(priority.to_wire()));
        }
        if let Some(start) = self.start_date {
            map.insert("startDate".into(), json!(start));
        }
        if let Some(due) = self.due_date {
            map.insert("dueDate".into(), json!(due));
        }
        if let Some(tz) = self.time_zone {
            map.insert("timeZone".into(), json!(tz));
        }
        if let Some(tags) = self.tags {
            map.insert("tags".into(), json!(tags));
        }
        if let Some(reminders) = self.reminders {
            let reminders: Vec<Value> = reminders
                .into_iter()
                .map(|trigger| json!({"trigger": trigger}))
                .collect();
            map.insert("reminders".into(), json!(reminders));
        }
        if let Some(rule) = self.recurrence {
            map.insert("repeatFlag".into(), json!(rule));
        }
        if let Some(parent) = self.parent_id {
            map.insert("parentId".into(), json!(parent));
        }
        Value::Object(map)
    }
}

/// Partial task update. Unset fields are left untouched upstream.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub kind: Option<TaskKind>,
    pub priority: Option<TaskPriority>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub time_zone: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TaskChanges {
    fn apply_to(self, payload: &mut Map<String, Value>) {
        if let Some(title) = self.title {
            payload.insert("title".into(), json!(title));
        }
        if let Some(content) = self.content {
            payload.insert("content".into(), json!(content));
        }
        if let Some(kind) = self.kind {
            payload.insert("kind".into(), json!(kind.as_wire()));
        }
        if let Some(priority) = self.priority {
            payload.insert("priority".into(), json!(priority.to_wire()));
        }
        if let Some(start) = self.start_date {
            payload.insert("startDate".into(), json!(start));
        }
        if let Some(due) = self.due_date {
            payload.insert("dueDate".into(), json!(due));
        }
        if let Some(tz) = self.time_zone {
            payload.insert("timeZone".into(), json!(tz));
        }
        if let Some(tags) = self.tags {
            payload.insert("tags".into(), json!(tags));
        }
    }
}

/// Fields accepted when creating or updating a project
#[derive(Debug, Clone, Default)]
pub struct ProjectSpec {
    pub name: Option<String>,
    pub color: Option<String>,
    pub kind: Option<String>,
    pub view_mode: Option<ViewMode>,
    /// `Some(None)` removes the project from its folder
    pub folder_id: Option<Option<String>>,
}

/// Fields accepted when creating or updating a habit
#[derive(Debug, Clone, Default)]
pub struct HabitSpec {
    pub name: Option<String>,
    pub habit_type: Option<String>,
    pub goal: Option<f64>,
    pub step: Option<f64>,
    pub unit: Option<String>,
    pub color: Option<String>,
    pub section_id: Option<String>,
    pub repeat_rule: Option<String>,
    pub reminders: Option<Vec<String>>,
    pub target_days: Option<i64>,
    pub encouragement: Option<String>,
    pub archived: Option<bool>,
}

impl HabitSpec {
    fn apply_to(self, payload: &mut Map<String, Value>) {
        if let Some(name) = self.name {
            payload.insert("name".into(), json!(name));
        }
        if let Some(habit_type) = self.habit_type {
            payload.insert("type".into(), json!(habit_type));
        }
        if let Some(goal) = self.goal {
            payload.insert("goal".into(), json!(goal));
        }
        if let Some(step) = self.step {
            payload.insert("step".into(), json!(step));
        }
        if let Some(unit) = self.unit {
            payload.insert("unit".into(), json!(unit));
        }
        if let Some(color) = self.color {
            payload.insert("color".into(), json!(color));
        }
        if let Some(section) = self.section_id {
            payload.insert("sectionId".into(), json!(section));
        }
        if let Some(rule) = self.repeat_rule {
            payload.insert("repeatRule".into(), json!(rule));
        }
        if let Some(reminders) = self.reminders {
            payload.insert("reminders".into(), json!(reminders));
        }
        if let Some(days) = self.target_days {
            payload.insert("targetDays".into(), json!(days));
        }
        if let Some(text) = self.encouragement {
            payload.insert("encouragement".into(), json!(text));
        }
        if let Some(archived) = self.archived {
            payload.insert("status".into(), json!(if archived { 1 } else { 0 }));
        }
    }
}

/// One habit check-in to record
#[derive(Debug, Clone)]
pub struct CheckinSpec {
    pub habit_id: String,
    /// Date key in `yyyymmdd` form
    pub stamp: i64,
    pub value: f64,
}

/// The unified TickTick client
pub struct TickTickClient {
    settings: Settings,
    cache: SessionCache,
    v2_base: V2Client,
    v1: Option<V1Client>,
    state: Mutex<SessionState>,
}

impl TickTickClient {
    /// Build from environment variables and the default cache location.
    pub fn from_settings() -> Result<Self> {
        Self::new(Settings::from_env(), SessionCache::new())
    }

    pub fn new(settings: Settings, cache: SessionCache) -> Result<Self> {
        let v1 = match settings.access_token.as_deref() {
            Some(token) => Some(V1Client::new(token)?),
            None => None,
        };
        Ok(TickTickClient {
            v2_base: V2Client::new()?,
            v1,
            settings,
            cache,
            state: Mutex::new(SessionState::Unauthenticated),
        })
    }

    /// Construction hook for tests and alternate deployments.
    pub fn with_clients(
        settings: Settings,
        cache: SessionCache,
        v2_base: V2Client,
        v1: Option<V1Client>,
    ) -> Self {
        TickTickClient {
            settings,
            cache,
            v2_base,
            v1,
            state: Mutex::new(SessionState::Unauthenticated),
        }
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Acquire (or reuse) a session token: Active state, else cache, else a
    /// fresh login. The state mutex serializes concurrent acquisitions.
    async fn ensure_session(&self) -> Result<SessionToken> {
        let mut state = self.state.lock().await;
        if let SessionState::Active(token) = &*state {
            return Ok(token.clone());
        }

        *state = SessionState::Authenticating;

        if let Some(token) = self.cache.load() {
            tracing::debug!("reusing cached session");
            *state = SessionState::Active(token.clone());
            return Ok(token);
        }

        let (username, password) = match self.settings.v2_credentials() {
            Some(creds) => creds,
            None => {
                *state = SessionState::Unauthenticated;
                return Err(TickTickError::Configuration(
                    "no cached session and no credentials; set TICKTICK_USERNAME and TICKTICK_PASSWORD"
                        .to_string(),
                ));
            }
        };

        tracing::info!("logging in to acquire a fresh session");
        let mut login_client = self.v2_base.clone();
        match login_client.authenticate(username, password).await {
            Ok(token) => {
                if let Err(e) = self.cache.store(&token) {
                    tracing::warn!("session obtained but cache write failed: {}", e);
                }
                *state = SessionState::Active(token.clone());
                Ok(token)
            }
            Err(e) => {
                *state = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Drop the in-memory session and delete the cache file.
    pub async fn invalidate_session(&self) -> Result<()> {
        *self.state.lock().await = SessionState::Expired;
        self.cache.clear()
    }

    /// A V2 client carrying an active session.
    async fn v2(&self) -> Result<V2Client> {
        let token = self.ensure_session().await?;
        let mut client = self.v2_base.clone();
        client.set_session(token);
        Ok(client)
    }

    /// Whether the session backend can be brought up without failing.
    async fn v2_available(&self) -> bool {
        if matches!(*self.state.lock().await, SessionState::Active(_)) {
            return true;
        }
        self.settings.v2_credentials().is_some() || self.cache.load().is_some()
    }

    fn v1(&self) -> Result<&V1Client> {
        self.v1.as_ref().ok_or_else(|| {
            TickTickError::Configuration(
                "no usable backend; set TICKTICK_USERNAME/TICKTICK_PASSWORD or TICKTICK_ACCESS_TOKEN"
                    .to_string(),
            )
        })
    }

    /// The account's implicit default project.
    pub async fn inbox_id(&self) -> Result<String> {
        Ok(self.ensure_session().await?.inbox_id)
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// The entire active working set, unfiltered.
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let v2 = self.v2().await?;
        let doc = v2.sync().await?;
        doc.sync_task_bean
            .update
            .into_iter()
            .map(Task::from_v2)
            .collect()
    }

    /// Active tasks, client-side filtered. Completed / abandoned / deleted
    /// listings go through [`Self::get_completed_tasks`] and friends instead:
    /// the sync payload only carries active-state tasks.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        Ok(filter.apply(self.get_all_tasks().await?))
    }

    pub async fn get_completed_tasks(&self, days: u64, limit: usize) -> Result<Vec<Task>> {
        self.get_closed_tasks("Completed", days, limit).await
    }

    pub async fn get_abandoned_tasks(&self, days: u64, limit: usize) -> Result<Vec<Task>> {
        self.get_closed_tasks("Abandoned", days, limit).await
    }

    async fn get_closed_tasks(&self, status: &str, days: u64, limit: usize) -> Result<Vec<Task>> {
        let v2 = self.v2().await?;
        let today = Local::now().date_naive();
        let from = crate::filter::lookback_from_date(days, today);
        let to = today.format("%Y-%m-%d").to_string();
        let wires = v2.get_closed_tasks(status, &from, &to, limit).await?;
        wires.into_iter().map(Task::from_v2).collect()
    }

    pub async fn get_deleted_tasks(&self, limit: usize) -> Result<Vec<Task>> {
        let v2 = self.v2().await?;
        let wires = v2.get_trash_tasks(limit).await?;
        wires.into_iter().map(Task::from_v2).collect()
    }

    /// Fetch a task by id. `project_id` is only needed on the V1 fallback
    /// path, whose single-task endpoint is scoped per project.
    pub async fn get_task(&self, task_id: &str, project_id: Option<&str>) -> Result<Task> {
        if self.v2_available().await {
            let v2 = self.v2().await?;
            return Task::from_v2(v2.get_task(task_id).await?);
        }
        let v1 = self.v1()?;
        let project_id = project_id.ok_or_else(|| {
            TickTickError::Validation(
                "project_id is required to fetch a task through the OAuth API".to_string(),
            )
        })?;
        Task::from_v1(v1.get_task(project_id, task_id).await?)
    }

    pub async fn create_task(&self, spec: TaskSpec) -> Result<Task> {
        let mut created = self.create_tasks(vec![spec]).await?;
        created
            .pop()
            .ok_or_else(|| TickTickError::NotFound("created task did not resolve".to_string()))
    }

    /// Create tasks one at a time, preserving input order. No rollback: a
    /// failure mid-batch leaves earlier tasks created.
    pub async fn create_tasks(&self, specs: Vec<TaskSpec>) -> Result<Vec<Task>> {
        if self.v2_available().await {
            let v2 = self.v2().await?;
            let inbox = self.inbox_id().await?;
            let mut created = Vec::with_capacity(specs.len());
            for spec in specs {
                let project_id = spec.project_id.clone().unwrap_or_else(|| inbox.clone());
                let payload = spec.into_payload(Some(&project_id));
                let response = v2.batch_tasks(vec![payload], Vec::new(), Vec::new()).await?;
                // The mutation response only carries the new id; refetch for
                // the authoritative entity.
                let task_id = response.first_id().ok_or_else(|| {
                    TickTickError::NotFound("create reported success but returned no id".to_string())
                })?;
                created.push(Task::from_v2(v2.get_task(task_id).await?)?);
            }
            return Ok(created);
        }

        // V1 echoes the created entity directly; omitting projectId lands
        // the task in the inbox.
        let v1 = self.v1()?;
        let mut created = Vec::with_capacity(specs.len());
        for spec in specs {
            let project_id = spec.project_id.clone();
            let payload = spec.into_payload(project_id.as_deref());
            created.push(Task::from_v1(v1.create_task(&payload).await?)?);
        }
        Ok(created)
    }

    /// True partial update: fetch, merge the caller's fields over the
    /// authoritative id/project pair, one-element batch update, refetch.
    pub async fn update_task(&self, task_id: &str, changes: TaskChanges) -> Result<Task> {
        if self.v2_available().await {
            let v2 = self.v2().await?;
            let current = Task::from_v2(v2.get_task(task_id).await?)?;
            let mut payload = Map::new();
            payload.insert("id".into(), json!(current.id));
            payload.insert("projectId".into(), json!(current.project_id));
            changes.apply_to(&mut payload);
            v2.batch_tasks(Vec::new(), vec![Value::Object(payload)], Vec::new())
                .await?;
            return Task::from_v2(v2.get_task(task_id).await?);
        }

        // The OAuth generation scopes fetches per project, so a fetch-merge
        // cycle from a bare task id is not expressible there.
        self.v1()?;
        Err(TickTickError::Configuration(format!(
            "partial update of task {} requires session credentials; set TICKTICK_USERNAME and TICKTICK_PASSWORD",
            task_id
        )))
    }

    pub async fn complete_tasks(&self, task_ids: &[String]) -> Result<()> {
        self.close_tasks(task_ids, TaskStatus::Completed).await
    }

    pub async fn abandon_tasks(&self, task_ids: &[String]) -> Result<()> {
        self.close_tasks(task_ids, TaskStatus::Abandoned).await
    }

    /// Fetch each task to discover its project, then close them all in a
    /// single batch-update round trip.
    async fn close_tasks(&self, task_ids: &[String], status: TaskStatus) -> Result<()> {
        let v2 = self.v2().await?;
        let stamp = format_v2_datetime(Utc::now());
        let mut updates = Vec::with_capacity(task_ids.len());
        for task_id in task_ids {
            let task = Task::from_v2(v2.get_task(task_id).await?)?;
            updates.push(json!({
                "id": task_id,
                "projectId": task.project_id,
                "status": status.to_wire(),
                "completedTime": stamp,
            }));
        }
        v2.batch_tasks(Vec::new(), updates, Vec::new()).await?;
        Ok(())
    }

    /// Sequential per-id deletes; each needs the owning project, discovered
    /// by a preceding fetch.
    pub async fn delete_tasks(&self, task_ids: &[String]) -> Result<()> {
        let v2 = self.v2().await?;
        for task_id in task_ids {
            let task = Task::from_v2(v2.get_task(task_id).await?)?;
            v2.batch_tasks(
                Vec::new(),
                Vec::new(),
                vec![json!({"taskId": task_id, "projectId": task.project_id})],
            )
            .await?;
        }
        Ok(())
    }

    /// Move tasks to another project. The source project is resolved by
    /// fetch; callers may hold stale location info.
    pub async fn move_tasks(&self, task_ids: &[String], to_project_id: &str) -> Result<()> {
        let v2 = self.v2().await?;
        for task_id in task_ids {
            let task = Task::from_v2(v2.get_task(task_id).await?)?;
            v2.move_tasks(&[(
                task_id.clone(),
                task.project_id,
                to_project_id.to_string(),
            )])
            .await?;
        }
        Ok(())
    }

    /// Pin or unpin tasks, returning the refreshed entities.
    pub async fn pin_tasks(&self, task_ids: &[String], pin: bool) -> Result<Vec<Task>> {
        let v2 = self.v2().await?;
        let mut results = Vec::with_capacity(task_ids.len());
        for task_id in task_ids {
            let task = Task::from_v2(v2.get_task(task_id).await?)?;
            let pinned_time = if pin {
                json!(format_v2_datetime(Utc::now()))
            } else {
                json!("")
            };
            v2.batch_tasks(
                Vec::new(),
                vec![json!({
                    "id": task_id,
                    "projectId": task.project_id,
                    "pinnedTime": pinned_time,
                })],
                Vec::new(),
            )
            .await?;
            results.push(Task::from_v2(v2.get_task(task_id).await?)?);
        }
        Ok(results)
    }

    /// Case-insensitive substring search over title and content, evaluated
    /// client-side against the full active working set.
    pub async fn search_tasks(&self, query: &str) -> Result<Vec<Task>> {
        let needle = query.to_lowercase();
        let tasks = self.get_all_tasks().await?;
        Ok(tasks
            .into_iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.content
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect())
    }

    pub async fn set_task_parents(&self, pairs: &[(String, String)]) -> Result<()> {
        let v2 = self.v2().await?;
        for (task_id, parent_id) in pairs {
            let task = Task::from_v2(v2.get_task(task_id).await?)?;
            v2.set_task_parent(task_id, &task.project_id, parent_id)
                .await?;
        }
        Ok(())
    }

    /// Detach tasks from their parents. A task that has no parent is a
    /// caller error, caught before any upstream call for that item.
    pub async fn unset_task_parents(&self, task_ids: &[String]) -> Result<()> {
        let v2 = self.v2().await?;
        for task_id in task_ids {
            let task = Task::from_v2(v2.get_task(task_id).await?)?;
            let parent_id = task.parent_id.ok_or_else(|| {
                TickTickError::Validation(format!("task {} has no parent", task_id))
            })?;
            v2.unset_task_parent(task_id, &task.project_id, &parent_id)
                .await?;
        }
        Ok(())
    }

    // ========================================================================
    // Projects
    // ========================================================================

    pub async fn get_all_projects(&self) -> Result<Vec<Project>> {
        if self.v2_available().await {
            let v2 = self.v2().await?;
            let doc = v2.sync().await?;
            return Ok(doc
                .project_profiles
                .into_iter()
                .map(Project::from_v2)
                .collect());
        }
        let v1 = self.v1()?;
        Ok(v1
            .get_projects()
            .await?
            .into_iter()
            .map(Project::from_v1)
            .collect())
    }

    /// There is no V2 fetch-by-id for projects; re-list and match.
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        if !self.v2_available().await {
            let v1 = self.v1()?;
            return Ok(Project::from_v1(v1.get_project(project_id).await?));
        }
        self.get_all_projects()
            .await?
            .into_iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| TickTickError::NotFound(format!("project {}", project_id)))
    }

    pub async fn create_project(&self, name: &str, spec: ProjectSpec) -> Result<Project> {
        let v2 = self.v2().await?;
        let mut payload = Map::new();
        payload.insert("name".into(), json!(name));
        payload.insert(
            "kind".into(),
            json!(spec.kind.as_deref().unwrap_or("TASK")),
        );
        payload.insert(
            "viewMode".into(),
            json!(spec.view_mode.unwrap_or(ViewMode::List).as_wire()),
        );
        if let Some(color) = spec.color {
            payload.insert("color".into(), json!(color));
        }
        if let Some(Some(folder)) = spec.folder_id {
            payload.insert("groupId".into(), json!(folder));
        }
        let response = v2
            .batch_projects(vec![Value::Object(payload)], Vec::new(), Vec::new())
            .await?;
        let project_id = response
            .first_id()
            .ok_or_else(|| {
                TickTickError::NotFound("create reported success but returned no id".to_string())
            })?
            .to_string();
        self.get_project(&project_id).await
    }

    pub async fn update_project(&self, project_id: &str, spec: ProjectSpec) -> Result<Project> {
        let v2 = self.v2().await?;
        let existing = self.get_project(project_id).await?;
        let mut payload = Map::new();
        payload.insert("id".into(), json!(existing.id));
        payload.insert(
            "name".into(),
            json!(spec.name.unwrap_or_else(|| existing.name.clone())),
        );
        if let Some(color) = spec.color {
            payload.insert("color".into(), json!(color));
        }
        if let Some(kind) = spec.kind {
            payload.insert("kind".into(), json!(kind));
        }
        if let Some(view_mode) = spec.view_mode {
            payload.insert("viewMode".into(), json!(view_mode.as_wire()));
        }
        if let Some(folder) = spec.folder_id {
            // None clears folder membership
            payload.insert("groupId".into(), json!(folder));
        }
        v2.batch_projects(Vec::new(), vec![Value::Object(payload)], Vec::new())
            .await?;
        self.get_project(project_id).await
    }

    /// Deleting a project deletes its tasks upstream. The preceding fetch
    /// turns an unknown id into `NotFound` instead of a silent no-op.
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        let v2 = self.v2().await?;
        self.get_project(project_id).await?;
        v2.batch_projects(Vec::new(), Vec::new(), vec![json!(project_id)])
            .await?;
        Ok(())
    }

    // ========================================================================
    // Tags
    // ========================================================================

    pub async fn get_all_tags(&self) -> Result<Vec<Tag>> {
        let v2 = self.v2().await?;
        let doc = v2.sync().await?;
        Ok(doc.tags.into_iter().map(Tag::from_v2).collect())
    }

    /// Tags have no id; the follow-up match is by name.
    pub async fn create_tag(
        &self,
        name: &str,
        color: Option<&str>,
        parent: Option<&str>,
    ) -> Result<Tag> {
        let v2 = self.v2().await?;
        let mut payload = Map::new();
        payload.insert("name".into(), json!(name));
        payload.insert("label".into(), json!(name));
        if let Some(color) = color {
            payload.insert("color".into(), json!(color));
        }
        if let Some(parent) = parent {
            payload.insert("parent".into(), json!(parent));
        }
        v2.batch_tags(vec![Value::Object(payload)], Vec::new())
            .await?;
        self.find_tag(name).await
    }

    pub async fn update_tag(
        &self,
        name: &str,
        color: Option<&str>,
        parent: Option<&str>,
    ) -> Result<Tag> {
        let v2 = self.v2().await?;
        let mut payload = Map::new();
        payload.insert("name".into(), json!(name));
        if let Some(color) = color {
            payload.insert("color".into(), json!(color));
        }
        if let Some(parent) = parent {
            // Empty string detaches the tag from its parent
            payload.insert("parent".into(), json!(parent));
        }
        v2.batch_tags(Vec::new(), vec![Value::Object(payload)])
            .await?;
        self.find_tag(name).await
    }

    /// Renaming changes the tag's key; the refreshed entity is looked up
    /// under the new name.
    pub async fn rename_tag(&self, name: &str, new_name: &str) -> Result<Tag> {
        let v2 = self.v2().await?;
        v2.rename_tag(name, new_name).await?;
        self.find_tag(new_name).await
    }

    pub async fn delete_tag(&self, name: &str) -> Result<()> {
        let v2 = self.v2().await?;
        v2.delete_tag(name).await
    }

    /// Merge `source` into `target`. Afterwards the source tag is gone and
    /// its task associations carry the target.
    pub async fn merge_tags(&self, source: &str, target: &str) -> Result<()> {
        let v2 = self.v2().await?;
        v2.merge_tags(source, target).await
    }

    async fn find_tag(&self, name: &str) -> Result<Tag> {
        self.get_all_tags()
            .await?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| TickTickError::NotFound(format!("tag {}", name)))
    }

    // ========================================================================
    // Folders
    // ========================================================================

    pub async fn get_all_folders(&self) -> Result<Vec<ProjectGroup>> {
        let v2 = self.v2().await?;
        let doc = v2.sync().await?;
        Ok(doc
            .project_groups
            .into_iter()
            .map(ProjectGroup::from_v2)
            .collect())
    }

    pub async fn create_folder(&self, name: &str) -> Result<ProjectGroup> {
        let v2 = self.v2().await?;
        let response = v2
            .batch_folders(
                vec![json!({"name": name, "listType": "group"})],
                Vec::new(),
                Vec::new(),
            )
            .await?;
        let folder_id = response
            .first_id()
            .ok_or_else(|| {
                TickTickError::NotFound("create reported success but returned no id".to_string())
            })?
            .to_string();
        self.find_folder(&folder_id).await
    }

    pub async fn rename_folder(&self, folder_id: &str, name: &str) -> Result<ProjectGroup> {
        let v2 = self.v2().await?;
        v2.batch_folders(
            Vec::new(),
            vec![json!({"id": folder_id, "name": name})],
            Vec::new(),
        )
        .await?;
        self.find_folder(folder_id).await
    }

    /// Deleting a folder ungroups its projects; it never deletes them.
    pub async fn delete_folder(&self, folder_id: &str) -> Result<()> {
        let v2 = self.v2().await?;
        v2.batch_folders(Vec::new(), Vec::new(), vec![json!(folder_id)])
            .await?;
        Ok(())
    }

    async fn find_folder(&self, folder_id: &str) -> Result<ProjectGroup> {
        self.get_all_folders()
            .await?
            .into_iter()
            .find(|f| f.id == folder_id)
            .ok_or_else(|| TickTickError::NotFound(format!("folder {}", folder_id)))
    }

    // ========================================================================
    // Columns
    // ========================================================================

    pub async fn get_columns(&self, project_id: &str) -> Result<Vec<Column>> {
        let v2 = self.v2().await?;
        let wires = v2.get_columns(project_id).await?;
        Ok(wires.into_iter().map(Column::from_v2).collect())
    }

    pub async fn create_column(
        &self,
        project_id: &str,
        name: &str,
        sort_order: Option<i64>,
    ) -> Result<Column> {
        let v2 = self.v2().await?;
        let mut payload = Map::new();
        payload.insert("projectId".into(), json!(project_id));
        payload.insert("name".into(), json!(name));
        if let Some(sort) = sort_order {
            payload.insert("sortOrder".into(), json!(sort));
        }
        let response = v2
            .batch_columns(vec![Value::Object(payload)], Vec::new(), Vec::new())
            .await?;
        let column_id = response
            .first_id()
            .ok_or_else(|| {
                TickTickError::NotFound("create reported success but returned no id".to_string())
            })?
            .to_string();
        self.find_column(project_id, &column_id).await
    }

    pub async fn update_column(
        &self,
        column_id: &str,
        project_id: &str,
        name: Option<&str>,
        sort_order: Option<i64>,
    ) -> Result<Column> {
        let v2 = self.v2().await?;
        let mut payload = Map::new();
        payload.insert("id".into(), json!(column_id));
        payload.insert("projectId".into(), json!(project_id));
        if let Some(name) = name {
            payload.insert("name".into(), json!(name));
        }
        if let Some(sort) = sort_order {
            payload.insert("sortOrder".into(), json!(sort));
        }
        v2.batch_columns(Vec::new(), vec![Value::Object(payload)], Vec::new())
            .await?;
        self.find_column(project_id, column_id).await
    }

    pub async fn delete_column(&self, column_id: &str, project_id: &str) -> Result<()> {
        let v2 = self.v2().await?;
        v2.batch_columns(
            Vec::new(),
            Vec::new(),
            vec![json!({"id": column_id, "projectId": project_id})],
        )
        .await?;
        Ok(())
    }

    async fn find_column(&self, project_id: &str, column_id: &str) -> Result<Column> {
        self.get_columns(project_id)
            .await?
            .into_iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| TickTickError::NotFound(format!("column {}", column_id)))
    }

    // ========================================================================
    // Habits
    // ========================================================================

    pub async fn get_all_habits(&self, include_archived: bool) -> Result<Vec<Habit>> {
        let v2 = self.v2().await?;
        let habits: Vec<Habit> = v2
            .get_habits()
            .await?
            .into_iter()
            .map(Habit::from_v2)
            .collect();
        Ok(if include_archived {
            habits
        } else {
            habits.into_iter().filter(|h| !h.archived).collect()
        })
    }

    pub async fn get_habit(&self, habit_id: &str) -> Result<Habit> {
        self.get_all_habits(true)
            .await?
            .into_iter()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| TickTickError::NotFound(format!("habit {}", habit_id)))
    }

    pub async fn create_habit(&self, name: &str, spec: HabitSpec) -> Result<Habit> {
        let v2 = self.v2().await?;
        let mut payload = Map::new();
        payload.insert("name".into(), json!(name));
        payload.insert(
            "type".into(),
            json!(spec.habit_type.as_deref().unwrap_or("Boolean")),
        );
        payload.insert("goal".into(), json!(spec.goal.unwrap_or(1.0)));
        payload.insert("step".into(), json!(spec.step.unwrap_or(1.0)));
        let spec = HabitSpec {
            name: None,
            habit_type: None,
            goal: None,
            step: None,
            ..spec
        };
        spec.apply_to(&mut payload);
        let response = v2
            .batch_habits(vec![Value::Object(payload)], Vec::new(), Vec::new())
            .await?;
        let habit_id = response
            .first_id()
            .ok_or_else(|| {
                TickTickError::NotFound("create reported success but returned no id".to_string())
            })?
            .to_string();
        self.get_habit(&habit_id).await
    }

    pub async fn update_habit(&self, habit_id: &str, spec: HabitSpec) -> Result<Habit> {
        let v2 = self.v2().await?;
        let existing = self.get_habit(habit_id).await?;
        let mut payload = Map::new();
        payload.insert("id".into(), json!(existing.id));
        payload.insert("name".into(), json!(existing.name));
        payload.insert("type".into(), json!(existing.habit_type.as_wire()));
        payload.insert("goal".into(), json!(existing.goal));
        payload.insert("step".into(), json!(existing.step));
        spec.apply_to(&mut payload);
        v2.batch_habits(Vec::new(), vec![Value::Object(payload)], Vec::new())
            .await?;
        self.get_habit(habit_id).await
    }

    pub async fn delete_habit(&self, habit_id: &str) -> Result<()> {
        let v2 = self.v2().await?;
        self.get_habit(habit_id).await?;
        v2.batch_habits(Vec::new(), Vec::new(), vec![json!(habit_id)])
            .await?;
        Ok(())
    }

    /// Record check-ins. Each one carries the goal in force at check-in
    /// time, read from the habit itself.
    pub async fn checkin_habits(&self, checkins: Vec<CheckinSpec>) -> Result<()> {
        let v2 = self.v2().await?;
        let mut adds = Vec::with_capacity(checkins.len());
        for spec in checkins {
            let habit = self.get_habit(&spec.habit_id).await?;
            let status = if spec.value >= habit.goal { 2 } else { 0 };
            adds.push(json!({
                "habitId": spec.habit_id,
                "checkinStamp": spec.stamp,
                "value": spec.value,
                "goal": habit.goal,
                "status": status,
            }));
        }
        v2.batch_checkins(adds).await
    }

    pub async fn get_habit_checkins(
        &self,
        habit_ids: &[String],
        after_stamp: i64,
    ) -> Result<Vec<HabitCheckin>> {
        let v2 = self.v2().await?;
        let map = v2.query_checkins(habit_ids, after_stamp).await?;
        let mut checkins: Vec<HabitCheckin> = map
            .into_values()
            .flatten()
            .map(HabitCheckin::from_v2)
            .collect();
        checkins.sort_by(|a, b| {
            (a.habit_id.as_str(), a.checkin_stamp).cmp(&(b.habit_id.as_str(), b.checkin_stamp))
        });
        Ok(checkins)
    }

    // ========================================================================
    // Focus & user
    // ========================================================================

    pub async fn get_focus_heatmap(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FocusHeatmapEntry>> {
        let v2 = self.v2().await?;
        let wires = v2
            .focus_heatmap(&stamp(start), &stamp(end))
            .await?;
        Ok(wires.into_iter().map(FocusHeatmapEntry::from_v2).collect())
    }

    pub async fn get_focus_by_tag(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FocusTagStat>> {
        let v2 = self.v2().await?;
        let wire = v2.focus_dist(&stamp(start), &stamp(end)).await?;
        Ok(wire.into_tag_stats())
    }

    pub async fn get_user_profile(&self) -> Result<User> {
        let v2 = self.v2().await?;
        Ok(User::from_v2(v2.user_profile().await?))
    }

    pub async fn get_user_status(&self) -> Result<UserStatus> {
        let v2 = self.v2().await?;
        Ok(UserStatus::from_v2(v2.user_status().await?))
    }

    pub async fn get_user_statistics(&self) -> Result<UserStatistics> {
        let v2 = self.v2().await?;
        Ok(UserStatistics::from_v2(v2.user_statistics().await?))
    }
}

fn stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SESSION_TTL_SECS;

    fn client_with_cache(cache: SessionCache) -> TickTickClient {
        TickTickClient::with_clients(
            Settings::default(),
            cache,
            V2Client::with_base_url("http://127.0.0.1:1").unwrap(),
            None,
        )
    }

    #[tokio::test]
    async fn cached_session_is_reused_without_login() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::at_path(dir.path().join("auth_cache.json"));
        cache
            .store(&SessionToken {
                token: "cached".to_string(),
                inbox_id: "inbox42".to_string(),
                user_id: None,
            })
            .unwrap();

        // No credentials configured: the only way this succeeds is the cache.
        let client = client_with_cache(cache);
        let token = client.ensure_session().await.unwrap();
        assert_eq!(token.token, "cached");
        assert_eq!(client.inbox_id().await.unwrap(), "inbox42");
        assert!(matches!(
            *client.state.lock().await,
            SessionState::Active(_)
        ));
    }

    #[tokio::test]
    async fn stale_cache_and_no_credentials_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::at_path(dir.path().join("auth_cache.json"));
        let doc = serde_json::json!({
            "v2_session": {"token": "old", "inbox_id": "inbox42"},
            "cached_at": std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs() - SESSION_TTL_SECS - 60,
        });
        std::fs::write(cache.path(), doc.to_string()).unwrap();

        let client = client_with_cache(cache);
        let err = client.ensure_session().await.unwrap_err();
        assert!(matches!(err, TickTickError::Configuration(_)));
    }

    #[tokio::test]
    async fn invalidate_session_clears_state_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::at_path(dir.path().join("auth_cache.json"));
        cache
            .store(&SessionToken {
                token: "cached".to_string(),
                inbox_id: "inbox42".to_string(),
                user_id: None,
            })
            .unwrap();
        let client = client_with_cache(cache.clone());
        client.ensure_session().await.unwrap();
        client.invalidate_session().await.unwrap();
        assert!(cache.load().is_none());
        assert!(matches!(*client.state.lock().await, SessionState::Expired));
    }

    #[tokio::test]
    async fn v1_fallback_requires_project_id_for_task_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::at_path(dir.path().join("auth_cache.json"));
        let client = TickTickClient::with_clients(
            Settings {
                access_token: Some("oauth-token".to_string()),
                ..Default::default()
            },
            cache,
            V2Client::with_base_url("http://127.0.0.1:1").unwrap(),
            Some(V1Client::with_base_url("oauth-token", "http://127.0.0.1:1").unwrap()),
        );
        let err = client.get_task("abc", None).await.unwrap_err();
        assert!(matches!(err, TickTickError::Validation(_)));
    }

    #[test]
    fn task_spec_payload_shape() {
        let spec = TaskSpec {
            title: "Standup".to_string(),
            content: Some("daily".to_string()),
            priority: Some(TaskPriority::High),
            due_date: Some("2026-01-20".to_string()),
            tags: Some(vec!["work".to_string()]),
            recurrence: Some("RRULE:FREQ=DAILY".to_string()),
            reminders: Some(vec!["TRIGGER:-PT30M".to_string()]),
            ..Default::default()
        };
        let payload = spec.into_payload(Some("p1"));
        assert_eq!(payload["projectId"], "p1");
        assert_eq!(payload["priority"], 5);
        assert_eq!(payload["repeatFlag"], "RRULE:FREQ=DAILY");
        assert_eq!(payload["reminders"][0]["trigger"], "TRIGGER:-PT30M");
        assert!(payload.get("startDate").is_none());
    }

    #[test]
    fn task_changes_only_touch_supplied_fields() {
        let mut payload = Map::new();
        payload.insert("id".into(), json!("t1"));
        payload.insert("projectId".into(), json!("p1"));
        TaskChanges {
            priority: Some(TaskPriority::Low),
            ..Default::default()
        }
        .apply_to(&mut payload);
        assert_eq!(payload.len(), 3);
        assert_eq!(payload["priority"], 1);
        assert!(payload.get("title").is_none());
    }
}
