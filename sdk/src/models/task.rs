//! Task model and wire conversions

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::parse_opt_datetime;
use crate::constants::{TaskKind, TaskPriority, TaskStatus};
use crate::error::{Result, TickTickError};

/// One entry of a checklist-kind task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// A reminder trigger attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReminder {
    pub id: Option<String>,
    /// iCalendar trigger string, e.g. `TRIGGER:-PT30M`
    pub trigger: String,
}

/// Canonical task snapshot.
///
/// Immutable value fetched fresh per call; a task belongs to exactly one
/// project, and parent links form a forest scoped within that project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub content: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub kind: TaskKind,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub time_zone: Option<String>,
    pub tags: Vec<String>,
    pub parent_id: Option<String>,
    pub column_id: Option<String>,
    pub items: Vec<ChecklistItem>,
    pub reminders: Vec<TaskReminder>,
    pub is_pinned: bool,
    pub created_time: Option<DateTime<FixedOffset>>,
    pub modified_time: Option<DateTime<FixedOffset>>,
    pub completed_time: Option<DateTime<FixedOffset>>,
    pub etag: Option<String>,
    pub sort_order: Option<i64>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Convert a V2 (session API) task payload.
    pub fn from_v2(wire: TaskV2) -> Result<Self> {
        let status = TaskStatus::from_wire(wire.status.unwrap_or(0)).ok_or_else(|| {
            TickTickError::Api(format!(
                "unexpected task status {:?} for task {}",
                wire.status, wire.id
            ))
        })?;
        Ok(Task {
            status,
            priority: TaskPriority::from_wire(wire.priority.unwrap_or(0)),
            kind: TaskKind::from_wire(wire.kind.as_deref().unwrap_or("TEXT")),
            start_date: parse_opt_datetime(&wire.start_date),
            due_date: parse_opt_datetime(&wire.due_date),
            time_zone: wire.time_zone,
            tags: wire.tags.unwrap_or_default(),
            parent_id: none_if_empty(wire.parent_id),
            column_id: none_if_empty(wire.column_id),
            items: wire
                .items
                .unwrap_or_default()
                .into_iter()
                .map(ChecklistItem::from_v2)
                .collect(),
            reminders: wire
                .reminders
                .unwrap_or_default()
                .into_iter()
                .map(|r| TaskReminder {
                    id: r.id,
                    trigger: r.trigger.unwrap_or_default(),
                })
                .collect(),
            is_pinned: is_pinned_time(wire.pinned_time.as_deref()),
            created_time: parse_opt_datetime(&wire.created_time),
            modified_time: parse_opt_datetime(&wire.modified_time),
            completed_time: parse_opt_datetime(&wire.completed_time),
            etag: wire.etag,
            sort_order: wire.sort_order,
            content: none_if_empty(wire.content),
            title: wire.title.unwrap_or_default(),
            project_id: wire.project_id,
            id: wire.id,
        })
    }

    /// Convert a V1 (OAuth API) task payload.
    ///
    /// V1 does not expose kanban columns, parents, pinning, or created /
    /// modified times; those fields come back empty.
    pub fn from_v1(wire: TaskV1) -> Result<Self> {
        let status = TaskStatus::from_wire(wire.status.unwrap_or(0)).ok_or_else(|| {
            TickTickError::Api(format!(
                "unexpected task status {:?} for task {}",
                wire.status, wire.id
            ))
        })?;
        Ok(Task {
            status,
            priority: TaskPriority::from_wire(wire.priority.unwrap_or(0)),
            kind: TaskKind::from_wire(wire.kind.as_deref().unwrap_or("TEXT")),
            start_date: parse_opt_datetime(&wire.start_date),
            due_date: parse_opt_datetime(&wire.due_date),
            time_zone: wire.time_zone,
            tags: wire.tags.unwrap_or_default(),
            parent_id: None,
            column_id: None,
            items: wire
                .items
                .unwrap_or_default()
                .into_iter()
                .map(ChecklistItem::from_v1)
                .collect(),
            reminders: wire
                .reminders
                .unwrap_or_default()
                .into_iter()
                .map(|trigger| TaskReminder { id: None, trigger })
                .collect(),
            is_pinned: false,
            created_time: None,
            modified_time: None,
            completed_time: parse_opt_datetime(&wire.completed_time),
            etag: wire.etag,
            sort_order: wire.sort_order,
            content: none_if_empty(wire.content),
            title: wire.title.unwrap_or_default(),
            project_id: wire.project_id,
            id: wire.id,
        })
    }
}

impl ChecklistItem {
    fn from_v2(wire: ChecklistItemV2) -> Self {
        ChecklistItem {
            id: wire.id,
            title: wire.title.unwrap_or_default(),
            completed: wire.status.unwrap_or(0) != 0,
        }
    }

    fn from_v1(wire: ChecklistItemV1) -> Self {
        ChecklistItem {
            id: wire.id,
            title: wire.title.unwrap_or_default(),
            completed: wire.status.unwrap_or(0) != 0,
        }
    }
}

/// The upstream uses an empty or sentinel `pinnedTime` to mean "not pinned".
fn is_pinned_time(raw: Option<&str>) -> bool {
    matches!(raw, Some(s) if !s.is_empty() && s != "-1")
}

fn none_if_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

// ============================================================================
// Wire shapes
// ============================================================================

/// Task as returned by the V2 session API (sync document and single fetch)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskV2 {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub column_id: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ChecklistItemV2>>,
    #[serde(default)]
    pub reminders: Option<Vec<ReminderV2>>,
    #[serde(default)]
    pub pinned_time: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub completed_time: Option<String>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemV2 {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderV2 {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub trigger: Option<String>,
}

/// Task as returned by the V1 OAuth API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskV1 {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub items: Option<Vec<ChecklistItemV1>>,
    /// V1 reminders are bare trigger strings
    #[serde(default)]
    pub reminders: Option<Vec<String>>,
    #[serde(default)]
    pub completed_time: Option<String>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemV1 {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v2_fixture() -> TaskV2 {
        serde_json::from_value(json!({
            "id": "6863f1a2b4c5d6e7f8091a2b",
            "projectId": "inbox12345",
            "title": "Buy groceries",
            "content": "milk, eggs",
            "status": 0,
            "priority": 5,
            "kind": "CHECKLIST",
            "dueDate": "2026-01-20T17:00:00.000+0000",
            "timeZone": "America/New_York",
            "tags": ["errand", "Home"],
            "parentId": "",
            "columnId": "6863f1a2b4c5d6e7f8091a2c",
            "items": [
                {"id": "i1", "title": "milk", "status": 1},
                {"id": "i2", "title": "eggs", "status": 0}
            ],
            "pinnedTime": "2026-01-15T09:00:00.000+0000",
            "createdTime": "2026-01-10T08:30:00.000+0000",
            "modifiedTime": "2026-01-15T09:00:00.000+0000",
            "etag": "a1b2c3d4",
            "sortOrder": -1099511627776i64
        }))
        .unwrap()
    }

    #[test]
    fn v2_conversion() {
        let task = Task::from_v2(v2_fixture()).unwrap();
        assert_eq!(task.id, "6863f1a2b4c5d6e7f8091a2b");
        assert_eq!(task.project_id, "inbox12345");
        assert_eq!(task.status, TaskStatus::Active);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.kind, TaskKind::Checklist);
        assert_eq!(task.tags, vec!["errand", "Home"]);
        assert_eq!(task.parent_id, None); // empty string normalizes away
        assert!(task.column_id.is_some());
        assert!(task.is_pinned);
        assert_eq!(task.items.len(), 2);
        assert!(task.items[0].completed);
        assert!(!task.items[1].completed);
        assert!(task.due_date.is_some());
    }

    #[test]
    fn v2_unknown_status_fails_fast() {
        let mut wire = v2_fixture();
        wire.status = Some(9);
        assert!(matches!(
            Task::from_v2(wire),
            Err(crate::error::TickTickError::Api(_))
        ));
    }

    #[test]
    fn v2_unpinned_sentinels() {
        let mut wire = v2_fixture();
        wire.pinned_time = Some("-1".to_string());
        assert!(!Task::from_v2(wire).unwrap().is_pinned);
        let mut wire = v2_fixture();
        wire.pinned_time = None;
        assert!(!Task::from_v2(wire).unwrap().is_pinned);
    }

    #[test]
    fn v1_conversion() {
        let wire: TaskV1 = serde_json::from_value(json!({
            "id": "6863f1a2b4c5d6e7f8091a2b",
            "projectId": "6863f1a2b4c5d6e7f8091a00",
            "title": "Write report",
            "status": 2,
            "priority": 3,
            "dueDate": "2026-02-01T09:00:00+0000",
            "completedTime": "2026-01-31T20:00:00+0000",
            "reminders": ["TRIGGER:-PT30M"]
        }))
        .unwrap();
        let task = Task::from_v1(wire).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.completed_time.is_some());
        assert_eq!(task.reminders[0].trigger, "TRIGGER:-PT30M");
        assert_eq!(task.parent_id, None);
        assert!(!task.is_pinned);
    }

    #[test]
    fn missing_id_is_a_deserialization_error() {
        let res: std::result::Result<TaskV2, _> =
            serde_json::from_value(json!({"projectId": "p1", "title": "no id"}));
        assert!(res.is_err());
    }
}
