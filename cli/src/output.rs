//! Single-line JSON output
//!
//! Every command prints exactly one JSON line to stdout. Rows carry minimal
//! fields; detail views add body text and dates. Zero-valued fields are
//! omitted to keep lines short.

use serde_json::{json, Map, Value};
use ticktick_sdk::{Column, Project, ProjectGroup, Tag, Task, ViewMode};

pub fn print_line(value: &Value) {
    println!("{}", value);
}

/// Print `{"error": msg}`; the caller sets the non-zero exit code.
pub fn print_error(msg: &str) {
    println!("{}", json!({"error": msg}));
}

/// Minimal per-row shape for list output
pub fn task_row(task: &Task) -> Value {
    let mut row = Map::new();
    row.insert("id".into(), json!(task.id));
    row.insert("title".into(), json!(task.title));
    if !task.project_id.is_empty() {
        row.insert("project_id".into(), json!(task.project_id));
    }
    if task.priority.to_wire() > 0 {
        row.insert("priority".into(), json!(task.priority.to_wire()));
    }
    if let Some(due) = task.due_date {
        row.insert("due".into(), json!(due.format("%Y-%m-%d").to_string()));
    }
    if !task.tags.is_empty() {
        row.insert("tags".into(), json!(task.tags));
    }
    Value::Object(row)
}

/// Full single-task shape
pub fn task_detail(task: &Task) -> Value {
    let mut detail = Map::new();
    detail.insert("id".into(), json!(task.id));
    detail.insert("title".into(), json!(task.title));
    detail.insert("project_id".into(), json!(task.project_id));
    if task.priority.to_wire() > 0 {
        detail.insert("priority".into(), json!(task.priority.to_wire()));
    }
    if let Some(ref content) = task.content {
        detail.insert("content".into(), json!(content));
    }
    if let Some(due) = task.due_date {
        detail.insert("due".into(), json!(due.to_rfc3339()));
    }
    if let Some(start) = task.start_date {
        detail.insert("start".into(), json!(start.to_rfc3339()));
    }
    if !task.tags.is_empty() {
        detail.insert("tags".into(), json!(task.tags));
    }
    Value::Object(detail)
}

pub fn project_row(project: &Project) -> Value {
    let mut row = Map::new();
    row.insert("id".into(), json!(project.id));
    row.insert("name".into(), json!(project.name));
    if project.view_mode != ViewMode::List {
        row.insert("view".into(), json!(project.view_mode.as_wire()));
    }
    Value::Object(row)
}

pub fn tag_row(tag: &Tag) -> Value {
    let mut row = Map::new();
    row.insert("name".into(), json!(tag.name));
    if let Some(ref color) = tag.color {
        row.insert("color".into(), json!(color));
    }
    if let Some(ref parent) = tag.parent {
        row.insert("parent".into(), json!(parent));
    }
    Value::Object(row)
}

pub fn folder_row(folder: &ProjectGroup) -> Value {
    json!({"id": folder.id, "name": folder.name})
}

pub fn column_row(column: &Column) -> Value {
    json!({"id": column.id, "name": column.name, "sort": column.sort_order})
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticktick_sdk::{TaskKind, TaskPriority, TaskStatus};

    fn sample_task() -> Task {
        Task {
            id: "t1".to_string(),
            project_id: "p1".to_string(),
            title: "Sample".to_string(),
            content: Some("body".to_string()),
            status: TaskStatus::Active,
            priority: TaskPriority::None,
            kind: TaskKind::Text,
            start_date: None,
            due_date: chrono::DateTime::parse_from_rfc3339("2026-01-20T17:00:00+00:00").ok(),
            time_zone: None,
            tags: vec![],
            parent_id: None,
            column_id: None,
            items: vec![],
            reminders: vec![],
            is_pinned: false,
            created_time: None,
            modified_time: None,
            completed_time: None,
            etag: None,
            sort_order: None,
        }
    }

    #[test]
    fn row_omits_zero_fields() {
        let row = task_row(&sample_task());
        assert!(row.get("priority").is_none());
        assert!(row.get("tags").is_none());
        assert_eq!(row["due"], "2026-01-20");
    }

    #[test]
    fn detail_includes_content() {
        let detail = task_detail(&sample_task());
        assert_eq!(detail["content"], "body");
        assert!(detail["due"].as_str().unwrap().starts_with("2026-01-20T17"));
    }
}
