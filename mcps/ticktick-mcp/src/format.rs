//! Response rendering and size governance
//!
//! Every entity renders to Markdown (for humans and LLMs) or JSON (for
//! machines). Detail views carry body text and checklist items; list views
//! deliberately omit content to keep payloads small. Oversized responses are
//! cut at a paragraph boundary and terminated with a visible notice.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde_json::{json, Map, Value};
use ticktick_sdk::{
    Column, FocusHeatmapEntry, FocusTagStat, Habit, HabitCheckin, HabitType, Project,
    ProjectGroup, ProjectKind, Tag, Task, TaskKind, User, UserStatistics, UserStatus, ViewMode,
};

/// Maximum response size in characters
pub const CHARACTER_LIMIT: usize = 25_000;

/// Safety margin reserved for the truncation notice
const TRUNCATE_MARGIN: usize = 500;

const TRUNCATION_NOTICE: &str = "\n\n---\n⚠️ **Response truncated** (exceeded 25,000 characters)";

/// Cut an oversized response at the last paragraph break before the margin,
/// falling back to the last line break, falling back to a hard cut. The
/// returned string is always within the budget and always signals that a cut
/// happened.
pub fn truncate_response(result: String) -> String {
    if result.len() <= CHARACTER_LIMIT {
        return result;
    }
    let cut = floor_char_boundary(&result, CHARACTER_LIMIT - TRUNCATE_MARGIN);
    let head = &result[..cut];
    let point = head.rfind("\n\n").or_else(|| head.rfind('\n')).unwrap_or(cut);
    format!("{}{}", &result[..point], TRUNCATION_NOTICE)
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

pub fn format_datetime(dt: Option<DateTime<FixedOffset>>) -> String {
    match dt {
        None => "Not set".to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M %z").to_string(),
    }
}

pub fn format_date(dt: Option<DateTime<FixedOffset>>) -> String {
    match dt {
        None => "Not set".to_string(),
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
    }
}

pub fn success_message(message: &str) -> String {
    format!("**Success**: {}", message)
}

pub fn error_message(error: &str, suggestion: &str) -> String {
    if suggestion.is_empty() {
        format!("**Error**: {}", error)
    } else {
        format!("**Error**: {}\n\n*Suggestion*: {}", error, suggestion)
    }
}

pub fn to_json_string(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// ============================================================================
// Tasks
// ============================================================================

pub fn task_markdown(task: &Task) -> String {
    let mut lines = Vec::new();
    let title = if task.title.is_empty() {
        "(No title)"
    } else {
        &task.title
    };

    lines.push(format!("## {}", title));
    lines.push(String::new());
    lines.push(format!("- **ID**: `{}`", task.id));
    lines.push(format!("- **Project**: `{}`", task.project_id));
    lines.push(format!("- **Status**: {}", status_label(task)));
    lines.push(format!("- **Priority**: {}", task.priority.label()));

    if task.kind != TaskKind::Text {
        lines.push(format!("- **Type**: {}", task.kind.as_wire()));
    }
    if task.start_date.is_some() {
        lines.push(format!("- **Start**: {}", format_datetime(task.start_date)));
    }
    if task.due_date.is_some() {
        lines.push(format!("- **Due**: {}", format_datetime(task.due_date)));
    }
    if task.is_pinned {
        lines.push("- **Pinned**: yes".to_string());
    }
    if let Some(ref parent) = task.parent_id {
        lines.push(format!("- **Parent**: `{}`", parent));
    }
    if !task.tags.is_empty() {
        let tags: Vec<String> = task.tags.iter().map(|t| format!("`{}`", t)).collect();
        lines.push(format!("- **Tags**: {}", tags.join(", ")));
    }

    if let Some(ref content) = task.content {
        lines.push(String::new());
        lines.push("### Notes".to_string());
        lines.push(content.clone());
    }

    if !task.items.is_empty() {
        lines.push(String::new());
        lines.push("### Checklist".to_string());
        for item in &task.items {
            let checkbox = if item.completed { "[x]" } else { "[ ]" };
            let item_title = if item.title.is_empty() {
                "(No title)"
            } else {
                &item.title
            };
            lines.push(format!("- {} {}", checkbox, item_title));
        }
    }

    lines.join("\n")
}

fn status_label(task: &Task) -> &'static str {
    match task.status {
        ticktick_sdk::TaskStatus::Active => "Active",
        ticktick_sdk::TaskStatus::Completed => "Completed",
        ticktick_sdk::TaskStatus::Abandoned => "Abandoned",
    }
}

pub fn task_json(task: &Task, include_content: bool) -> Value {
    let mut result = Map::new();
    result.insert("id".into(), json!(task.id));
    result.insert("project_id".into(), json!(task.project_id));
    result.insert("title".into(), json!(task.title));
    result.insert("status".into(), json!(task.status.as_str()));
    result.insert("priority".into(), json!(task.priority.to_wire()));
    if include_content {
        if let Some(ref content) = task.content {
            result.insert("content".into(), json!(content));
        }
    }
    if task.kind != TaskKind::Text {
        result.insert("kind".into(), json!(task.kind.as_wire()));
    }
    if let Some(start) = task.start_date {
        result.insert("start_date".into(), json!(start.to_rfc3339()));
    }
    if let Some(due) = task.due_date {
        result.insert("due_date".into(), json!(due.to_rfc3339()));
    }
    if !task.tags.is_empty() {
        result.insert("tags".into(), json!(task.tags));
    }
    if let Some(ref parent) = task.parent_id {
        result.insert("parent_id".into(), json!(parent));
    }
    if task.is_pinned {
        result.insert("is_pinned".into(), json!(true));
    }
    if include_content && !task.items.is_empty() {
        let items: Vec<Value> = task
            .items
            .iter()
            .map(|i| json!({"id": i.id, "title": i.title, "completed": i.completed}))
            .collect();
        result.insert("items".into(), json!(items));
    }
    Value::Object(result)
}

pub fn tasks_markdown(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("# {}\n\nNo tasks found.", title);
    }

    let mut lines = vec![
        format!("# {}", title),
        String::new(),
        format!("Found {} task(s):", tasks.len()),
        String::new(),
    ];

    for task in tasks {
        let task_title = if task.title.is_empty() {
            "(No title)"
        } else {
            &task.title
        };
        let mut parts = vec![format!("**{}** (`{}`)", task_title, task.id)];
        if task.priority.to_wire() > 0 {
            parts.push(task.priority.label().to_string());
        }
        if task.due_date.is_some() {
            parts.push(format!("Due: {}", format_date(task.due_date)));
        }
        if !task.tags.is_empty() {
            parts.push(format!("Tags: {}", task.tags.join(", ")));
        }
        lines.push(format!("- {}", parts.join(" | ")));
    }

    lines.join("\n")
}

pub fn tasks_json(tasks: &[Task]) -> Value {
    json!({
        "count": tasks.len(),
        "tasks": tasks.iter().map(|t| task_json(t, false)).collect::<Vec<_>>(),
    })
}

// ============================================================================
// Projects
// ============================================================================

pub fn project_markdown(project: &Project) -> String {
    let mut lines = Vec::new();
    lines.push(format!("## {}", project.name));
    lines.push(String::new());
    lines.push(format!("- **ID**: `{}`", project.id));

    if project.kind != ProjectKind::Task {
        lines.push(format!("- **Kind**: {}", project.kind.as_wire()));
    }
    if project.view_mode != ViewMode::List {
        lines.push(format!("- **View Mode**: {}", project.view_mode.as_wire()));
    }
    if let Some(ref color) = project.color {
        lines.push(format!("- **Color**: {}", color));
    }
    if let Some(ref group) = project.group_id {
        lines.push(format!("- **Folder**: `{}`", group));
    }
    if project.closed {
        lines.push("- **Status**: Archived".to_string());
    }

    lines.join("\n")
}

pub fn project_json(project: &Project) -> Value {
    let mut result = Map::new();
    result.insert("id".into(), json!(project.id));
    result.insert("name".into(), json!(project.name));
    if project.kind != ProjectKind::Task {
        result.insert("kind".into(), json!(project.kind.as_wire()));
    }
    if project.view_mode != ViewMode::List {
        result.insert("view_mode".into(), json!(project.view_mode.as_wire()));
    }
    if let Some(ref color) = project.color {
        result.insert("color".into(), json!(color));
    }
    if let Some(ref group) = project.group_id {
        result.insert("folder_id".into(), json!(group));
    }
    Value::Object(result)
}

pub fn projects_markdown(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "# Projects\n\nNo projects found.".to_string();
    }

    let mut lines = vec![
        "# Projects".to_string(),
        String::new(),
        format!("Found {} project(s):", projects.len()),
        String::new(),
    ];
    for project in projects {
        let mut parts = vec![format!("**{}** (`{}`)", project.name, project.id)];
        if project.view_mode != ViewMode::List {
            parts.push(project.view_mode.as_wire().to_string());
        }
        if let Some(ref color) = project.color {
            parts.push(color.clone());
        }
        lines.push(format!("- {}", parts.join(" | ")));
    }
    lines.join("\n")
}

pub fn projects_json(projects: &[Project]) -> Value {
    json!({
        "count": projects.len(),
        "projects": projects.iter().map(project_json).collect::<Vec<_>>(),
    })
}

// ============================================================================
// Tags
// ============================================================================

pub fn tag_markdown(tag: &Tag) -> String {
    let mut lines = Vec::new();
    lines.push(format!("## {}", tag.label));
    lines.push(String::new());
    lines.push(format!("- **Name**: `{}`", tag.name));
    if let Some(ref color) = tag.color {
        lines.push(format!("- **Color**: {}", color));
    }
    if let Some(ref parent) = tag.parent {
        lines.push(format!("- **Parent**: `{}`", parent));
    }
    lines.join("\n")
}

pub fn tag_json(tag: &Tag) -> Value {
    let mut result = Map::new();
    result.insert("name".into(), json!(tag.name));
    result.insert("label".into(), json!(tag.label));
    if let Some(ref color) = tag.color {
        result.insert("color".into(), json!(color));
    }
    if let Some(ref parent) = tag.parent {
        result.insert("parent".into(), json!(parent));
    }
    Value::Object(result)
}

pub fn tags_markdown(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "# Tags\n\nNo tags found.".to_string();
    }

    let mut lines = vec![
        "# Tags".to_string(),
        String::new(),
        format!("Found {} tag(s):", tags.len()),
        String::new(),
    ];
    for tag in tags {
        let mut parts = vec![format!("**{}** (`{}`)", tag.label, tag.name)];
        if let Some(ref color) = tag.color {
            parts.push(color.clone());
        }
        if let Some(ref parent) = tag.parent {
            parts.push(format!("in {}", parent));
        }
        lines.push(format!("- {}", parts.join(" | ")));
    }
    lines.join("\n")
}

pub fn tags_json(tags: &[Tag]) -> Value {
    json!({
        "count": tags.len(),
        "tags": tags.iter().map(tag_json).collect::<Vec<_>>(),
    })
}

// ============================================================================
// Folders
// ============================================================================

pub fn folder_markdown(folder: &ProjectGroup) -> String {
    format!("- **{}** (`{}`)", folder.name, folder.id)
}

pub fn folders_markdown(folders: &[ProjectGroup]) -> String {
    if folders.is_empty() {
        return "# Folders\n\nNo folders found.".to_string();
    }
    let mut lines = vec![
        "# Folders".to_string(),
        String::new(),
        format!("Found {} folder(s):", folders.len()),
        String::new(),
    ];
    for folder in folders {
        lines.push(folder_markdown(folder));
    }
    lines.join("\n")
}

pub fn folders_json(folders: &[ProjectGroup]) -> Value {
    json!({
        "count": folders.len(),
        "folders": folders
            .iter()
            .map(|f| json!({"id": f.id, "name": f.name}))
            .collect::<Vec<_>>(),
    })
}

// ============================================================================
// Columns
// ============================================================================

pub fn column_markdown(column: &Column) -> String {
    format!("- **{}** (`{}`)", column.name, column.id)
}

pub fn column_json(column: &Column) -> Value {
    json!({
        "id": column.id,
        "project_id": column.project_id,
        "name": column.name,
        "sort_order": column.sort_order,
    })
}

pub fn columns_markdown(columns: &[Column]) -> String {
    if columns.is_empty() {
        return "# Kanban Columns\n\nNo columns found.".to_string();
    }
    let mut lines = vec![
        "# Kanban Columns".to_string(),
        String::new(),
        format!("Found {} column(s):", columns.len()),
        String::new(),
    ];
    let mut sorted: Vec<&Column> = columns.iter().collect();
    sorted.sort_by_key(|c| c.sort_order);
    for column in sorted {
        lines.push(column_markdown(column));
    }
    lines.join("\n")
}

pub fn columns_json(columns: &[Column]) -> Value {
    json!({
        "count": columns.len(),
        "columns": columns.iter().map(column_json).collect::<Vec<_>>(),
    })
}

// ============================================================================
// Habits
// ============================================================================

pub fn habit_markdown(habit: &Habit) -> String {
    let mut lines = Vec::new();
    lines.push(format!("## {}", habit.name));
    lines.push(String::new());
    lines.push(format!("- **ID**: `{}`", habit.id));
    lines.push(format!("- **Type**: {}", habit.habit_type.as_wire()));
    if habit.habit_type == HabitType::Real {
        let unit = habit.unit.as_deref().unwrap_or("times");
        lines.push(format!("- **Goal**: {} {}", habit.goal, unit));
    }
    if let Some(streak) = habit.current_streak {
        lines.push(format!("- **Current Streak**: {}", streak));
    }
    lines.push(format!("- **Total Check-ins**: {}", habit.total_checkins));
    if habit.archived {
        lines.push("- **Status**: Archived".to_string());
    }
    lines.join("\n")
}

pub fn habit_json(habit: &Habit) -> Value {
    let mut result = Map::new();
    result.insert("id".into(), json!(habit.id));
    result.insert("name".into(), json!(habit.name));
    result.insert("type".into(), json!(habit.habit_type.as_wire()));
    result.insert("goal".into(), json!(habit.goal));
    if let Some(ref unit) = habit.unit {
        result.insert("unit".into(), json!(unit));
    }
    if let Some(streak) = habit.current_streak {
        result.insert("current_streak".into(), json!(streak));
    }
    result.insert("total_checkins".into(), json!(habit.total_checkins));
    if habit.archived {
        result.insert("archived".into(), json!(true));
    }
    Value::Object(result)
}

pub fn habits_markdown(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return "# Habits\n\nNo habits found.".to_string();
    }
    let mut lines = vec![
        "# Habits".to_string(),
        String::new(),
        format!("Found {} habit(s):", habits.len()),
        String::new(),
    ];
    for habit in habits {
        let mut parts = vec![format!("**{}** (`{}`)", habit.name, habit.id)];
        if habit.habit_type == HabitType::Real {
            parts.push(format!(
                "{} {}",
                habit.goal,
                habit.unit.as_deref().unwrap_or("times")
            ));
        }
        if habit.archived {
            parts.push("archived".to_string());
        }
        lines.push(format!("- {}", parts.join(" | ")));
    }
    lines.join("\n")
}

pub fn habits_json(habits: &[Habit]) -> Value {
    json!({
        "count": habits.len(),
        "habits": habits.iter().map(habit_json).collect::<Vec<_>>(),
    })
}

pub fn checkins_markdown(checkins: &[HabitCheckin]) -> String {
    if checkins.is_empty() {
        return "# Habit Check-ins\n\nNo check-ins found.".to_string();
    }
    let mut lines = vec![
        "# Habit Check-ins".to_string(),
        String::new(),
        format!("Found {} check-in(s):", checkins.len()),
        String::new(),
    ];
    for checkin in checkins {
        lines.push(format!(
            "- `{}` {} — {}/{}",
            checkin.habit_id, checkin.checkin_stamp, checkin.value, checkin.goal
        ));
    }
    lines.join("\n")
}

pub fn checkins_json(checkins: &[HabitCheckin]) -> Value {
    json!({
        "count": checkins.len(),
        "checkins": checkins
            .iter()
            .map(|c| json!({
                "habit_id": c.habit_id,
                "stamp": c.checkin_stamp,
                "value": c.value,
                "goal": c.goal,
                "status": c.status,
            }))
            .collect::<Vec<_>>(),
    })
}

// ============================================================================
// User & focus
// ============================================================================

pub fn user_markdown(user: &User) -> String {
    let mut lines = Vec::new();
    lines.push("## User Profile".to_string());
    lines.push(String::new());
    lines.push(format!("- **Username**: {}", user.username));
    if let Some(ref name) = user.name {
        lines.push(format!("- **Name**: {}", name));
    }
    if let Some(ref email) = user.email {
        lines.push(format!("- **Email**: {}", email));
    }
    if let Some(ref locale) = user.locale {
        lines.push(format!("- **Locale**: {}", locale));
    }
    lines.join("\n")
}

pub fn user_json(user: &User) -> Value {
    let mut result = Map::new();
    result.insert("username".into(), json!(user.username));
    if let Some(ref name) = user.name {
        result.insert("name".into(), json!(name));
    }
    if let Some(ref email) = user.email {
        result.insert("email".into(), json!(email));
    }
    Value::Object(result)
}

pub fn user_status_markdown(status: &UserStatus) -> String {
    let mut lines = Vec::new();
    lines.push("## Account Status".to_string());
    lines.push(String::new());
    lines.push(format!("- **User ID**: `{}`", status.user_id));
    lines.push(format!("- **Inbox**: `{}`", status.inbox_id));
    lines.push(format!(
        "- **Subscription**: {}",
        if status.pro { "Pro" } else { "Free" }
    ));
    if let Some(ref tz) = status.time_zone {
        lines.push(format!("- **Timezone**: {}", tz));
    }
    lines.join("\n")
}

pub fn user_status_json(status: &UserStatus) -> Value {
    json!({
        "user_id": status.user_id,
        "inbox_id": status.inbox_id,
        "pro": status.pro,
        "time_zone": status.time_zone,
    })
}

pub fn user_statistics_markdown(stats: &UserStatistics) -> String {
    [
        "## Statistics".to_string(),
        String::new(),
        format!("- **Score**: {} (level {})", stats.score, stats.level),
        format!("- **Completed Today**: {}", stats.today_completed),
        format!("- **Completed Yesterday**: {}", stats.yesterday_completed),
        format!("- **Completed Total**: {}", stats.total_completed),
    ]
    .join("\n")
}

pub fn user_statistics_json(stats: &UserStatistics) -> Value {
    json!({
        "score": stats.score,
        "level": stats.level,
        "today_completed": stats.today_completed,
        "yesterday_completed": stats.yesterday_completed,
        "total_completed": stats.total_completed,
    })
}

pub fn focus_heatmap_markdown(entries: &[FocusHeatmapEntry]) -> String {
    if entries.is_empty() {
        return "# Focus Heatmap\n\nNo focus time recorded.".to_string();
    }
    let total: i64 = entries.iter().map(|e| e.duration).sum();
    let mut lines = vec![
        "# Focus Heatmap".to_string(),
        String::new(),
        format!("{} minute(s) across {} day(s):", total, entries.len()),
        String::new(),
    ];
    for entry in entries {
        lines.push(format!("- {}: {} min", entry.day, entry.duration));
    }
    lines.join("\n")
}

pub fn focus_heatmap_json(entries: &[FocusHeatmapEntry]) -> Value {
    json!({
        "total_minutes": entries.iter().map(|e| e.duration).sum::<i64>(),
        "days": entries
            .iter()
            .map(|e| json!({"day": e.day, "minutes": e.duration}))
            .collect::<Vec<_>>(),
    })
}

pub fn focus_by_tag_markdown(stats: &[FocusTagStat]) -> String {
    if stats.is_empty() {
        return "# Focus by Tag\n\nNo focus time recorded.".to_string();
    }
    let mut lines = vec!["# Focus by Tag".to_string(), String::new()];
    let mut sorted: Vec<&FocusTagStat> = stats.iter().collect();
    sorted.sort_by(|a, b| b.duration.cmp(&a.duration));
    for stat in sorted {
        lines.push(format!("- **{}**: {} min", stat.tag, stat.duration));
    }
    lines.join("\n")
}

pub fn focus_by_tag_json(stats: &[FocusTagStat]) -> Value {
    json!({
        "tags": stats
            .iter()
            .map(|s| json!({"tag": s.tag, "minutes": s.duration}))
            .collect::<Vec<_>>(),
    })
}

// ============================================================================
// Batch summaries
// ============================================================================

/// Per-id batch update summary: successes and failures side by side, no
/// failure hiding a success.
pub fn batch_update_markdown(updated: &[String], errors: &BTreeMap<String, String>) -> String {
    let mut lines = vec![format!("# {} Task(s) Updated", updated.len()), String::new()];

    if !errors.is_empty() {
        lines.push("## Errors".to_string());
        for (task_id, error) in errors {
            lines.push(format!("- `{}`: {}", task_id, error));
        }
        lines.push(String::new());
    }

    if !updated.is_empty() {
        lines.push("## Updated Tasks".to_string());
        for task_id in updated {
            lines.push(format!("- `{}` updated successfully", task_id));
        }
    }

    lines.join("\n")
}

pub fn batch_update_json(updated: &[String], errors: &BTreeMap<String, String>) -> Value {
    json!({
        "success": errors.is_empty(),
        "count": updated.len(),
        "updated_ids": updated,
        "errors": errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticktick_sdk::{ChecklistItem, TaskPriority, TaskStatus};

    fn sample_task() -> Task {
        Task {
            id: "6863f1a2b4c5d6e7f8091a2b".to_string(),
            project_id: "inbox12345".to_string(),
            title: "Buy groceries".to_string(),
            content: Some("milk and eggs".to_string()),
            status: TaskStatus::Active,
            priority: TaskPriority::High,
            kind: TaskKind::Checklist,
            start_date: None,
            due_date: chrono::DateTime::parse_from_rfc3339("2026-01-20T17:00:00+00:00").ok(),
            time_zone: None,
            tags: vec!["errand".to_string()],
            parent_id: None,
            column_id: None,
            items: vec![ChecklistItem {
                id: "i1".to_string(),
                title: "milk".to_string(),
                completed: true,
            }],
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
    fn task_detail_includes_content_and_checklist() {
        let md = task_markdown(&sample_task());
        assert!(md.contains("## Buy groceries"));
        assert!(md.contains("### Notes"));
        assert!(md.contains("milk and eggs"));
        assert!(md.contains("- [x] milk"));
        assert!(md.contains("**Priority**: High"));
    }

    #[test]
    fn list_view_omits_content() {
        let json_value = tasks_json(&[sample_task()]);
        assert!(json_value["tasks"][0].get("content").is_none());
        assert!(json_value["tasks"][0].get("items").is_none());
        // detail view keeps it
        let detail = task_json(&sample_task(), true);
        assert_eq!(detail["content"], "milk and eggs");
    }

    #[test]
    fn rendering_is_idempotent() {
        let task = sample_task();
        assert_eq!(task_markdown(&task), task_markdown(&task));
        assert_eq!(
            to_json_string(&task_json(&task, true)),
            to_json_string(&task_json(&task, true))
        );
    }

    #[test]
    fn empty_lists_say_so() {
        assert!(tasks_markdown(&[], "Active Tasks").contains("No tasks found."));
        assert!(projects_markdown(&[]).contains("No projects found."));
        assert!(tags_markdown(&[]).contains("No tags found."));
    }

    #[test]
    fn columns_render_in_sort_order() {
        let columns = vec![
            Column {
                id: "c2".to_string(),
                project_id: "p1".to_string(),
                name: "Doing".to_string(),
                sort_order: 200,
            },
            Column {
                id: "c1".to_string(),
                project_id: "p1".to_string(),
                name: "Todo".to_string(),
                sort_order: 100,
            },
        ];
        let md = columns_markdown(&columns);
        let todo = md.find("Todo").unwrap();
        let doing = md.find("Doing").unwrap();
        assert!(todo < doing);
    }

    #[test]
    fn truncation_properties() {
        let paragraph = "A paragraph of filler text that repeats.\n\n";
        let original: String = paragraph.repeat(1000);
        assert!(original.len() > CHARACTER_LIMIT);

        let truncated = truncate_response(original.clone());
        assert!(truncated.len() <= CHARACTER_LIMIT);
        assert!(truncated.ends_with(TRUNCATION_NOTICE));

        // The body is a prefix of the original up to the cut point
        let body = &truncated[..truncated.len() - TRUNCATION_NOTICE.len()];
        assert!(original.starts_with(body));
        // Cut landed on a paragraph boundary
        assert!(original[body.len()..].starts_with("\n\n"));
    }

    #[test]
    fn truncation_falls_back_to_line_break() {
        let line = "line of text without paragraph breaks anywhere at all\n";
        let original: String = line.repeat(800);
        let truncated = truncate_response(original.clone());
        assert!(truncated.len() <= CHARACTER_LIMIT);
        let body = &truncated[..truncated.len() - TRUNCATION_NOTICE.len()];
        assert!(original[body.len()..].starts_with('\n'));
    }

    #[test]
    fn truncation_hard_cut_without_breaks() {
        let original = "x".repeat(CHARACTER_LIMIT * 2);
        let truncated = truncate_response(original);
        assert!(truncated.len() <= CHARACTER_LIMIT);
        assert!(truncated.ends_with(TRUNCATION_NOTICE));
    }

    #[test]
    fn short_responses_pass_through() {
        let original = "short".to_string();
        assert_eq!(truncate_response(original.clone()), original);
    }

    #[test]
    fn multibyte_text_never_splits_a_char() {
        let original = "ü".repeat(CHARACTER_LIMIT);
        let truncated = truncate_response(original);
        assert!(truncated.len() <= CHARACTER_LIMIT);
    }

    #[test]
    fn batch_update_summary_reports_both_sides() {
        let mut errors = BTreeMap::new();
        errors.insert("t2".to_string(), "not found".to_string());
        let updated = vec!["t1".to_string(), "t3".to_string()];

        let md = batch_update_markdown(&updated, &errors);
        assert!(md.contains("`t1` updated successfully"));
        assert!(md.contains("`t2`: not found"));
        assert!(md.contains("`t3` updated successfully"));

        let json_value = batch_update_json(&updated, &errors);
        assert_eq!(json_value["success"], false);
        assert_eq!(json_value["updated_ids"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn messages() {
        assert_eq!(success_message("2 task(s) updated."), "**Success**: 2 task(s) updated.");
        let err = error_message("Not found: t1", "Verify the ID exists.");
        assert!(err.contains("**Error**"));
        assert!(err.contains("*Suggestion*"));
    }
}
