//! Tool parameter types
//!
//! Consolidated action-routed inputs: one parameter object per tool with an
//! `action` discriminator plus action-specific optional fields. Unknown
//! actions are reported by the handlers, not rejected by the schema, so the
//! caller gets an actionable message instead of a protocol error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Markdown,
    Json,
}

// ============================================================================
// Tasks
// ============================================================================

/// One task spec for create, or one update/ref item for the other actions
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TaskItem {
    #[schemars(description = "Task title (create)")]
    pub title: Option<String>,

    #[schemars(description = "Task ID (get/update/complete/delete/pin/set_parents/unparent)")]
    pub task_id: Option<String>,

    #[schemars(description = "Project ID; defaults to the inbox on create")]
    pub project_id: Option<String>,

    #[schemars(description = "Body text")]
    pub content: Option<String>,

    #[schemars(description = "Task kind: 'TEXT', 'CHECKLIST', or 'NOTE'")]
    pub kind: Option<String>,

    #[schemars(description = "Priority: 'none', 'low', 'medium', or 'high'")]
    pub priority: Option<String>,

    #[schemars(description = "Start date (ISO); required for recurrence")]
    pub start_date: Option<String>,

    #[schemars(description = "Due date (ISO)")]
    pub due_date: Option<String>,

    #[schemars(description = "Tag names")]
    pub tags: Option<Vec<String>>,

    #[schemars(description = "Reminder triggers, e.g. 'TRIGGER:-PT30M'")]
    pub reminders: Option<Vec<String>>,

    #[schemars(description = "RRULE recurrence, e.g. 'RRULE:FREQ=DAILY'")]
    pub recurrence: Option<String>,

    #[schemars(description = "Parent task ID (create/set_parents)")]
    pub parent_id: Option<String>,

    #[schemars(description = "Pin (true, default) or unpin (false) for the pin action")]
    pub pin: Option<bool>,
}

/// One move instruction
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MoveItem {
    #[schemars(description = "Task ID to move")]
    pub task_id: String,

    #[schemars(description = "Current project ID (informational; re-resolved by fetch)")]
    pub from_project_id: Option<String>,

    #[schemars(description = "Destination project ID")]
    pub to_project_id: String,
}

/// Parameters for the tasks tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TasksParams {
    #[schemars(
        description = "One of: create, get, list, update, complete, delete, move, pin, search, set_parents, unparent"
    )]
    pub action: String,

    #[serde(default)]
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub response_format: ResponseFormat,

    #[schemars(description = "Task specs (create/update/complete/delete/pin/set_parents/unparent)")]
    pub tasks: Option<Vec<TaskItem>>,

    #[schemars(description = "Task ID (get)")]
    pub task_id: Option<String>,

    #[schemars(description = "Project ID; get fallback and list filter")]
    pub project_id: Option<String>,

    #[schemars(description = "List status: 'active' (default), 'completed', 'abandoned', 'deleted'")]
    pub status: Option<String>,

    #[schemars(description = "Kanban column filter (list)")]
    pub column_id: Option<String>,

    #[schemars(description = "Tag filter, case-insensitive (list)")]
    pub tag: Option<String>,

    #[schemars(description = "Priority filter: 'none', 'low', 'medium', 'high' (list)")]
    pub priority: Option<String>,

    #[schemars(description = "Only tasks due today (list)")]
    pub due_today: Option<bool>,

    #[schemars(description = "Only overdue tasks (list)")]
    pub overdue: Option<bool>,

    #[schemars(description = "From date YYYY-MM-DD (list)")]
    pub from_date: Option<String>,

    #[schemars(description = "To date YYYY-MM-DD (list)")]
    pub to_date: Option<String>,

    #[schemars(description = "Lookback days for completed/abandoned (default 7)")]
    pub days: Option<u64>,

    #[schemars(description = "Max results (default 50)")]
    pub limit: Option<usize>,

    #[schemars(description = "Search text (search)")]
    pub query: Option<String>,

    #[schemars(description = "Move instructions (move)")]
    pub moves: Option<Vec<MoveItem>>,
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProjectsParams {
    #[schemars(description = "One of: list, get, create, update, delete")]
    pub action: String,

    #[serde(default)]
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub response_format: ResponseFormat,

    #[schemars(description = "Project ID (get/update/delete)")]
    pub project_id: Option<String>,

    #[schemars(description = "Also list the project's tasks (get)")]
    pub include_tasks: Option<bool>,

    #[schemars(description = "Project name (create/update)")]
    pub name: Option<String>,

    #[schemars(description = "Hex color, e.g. '#FF5733'")]
    pub color: Option<String>,

    #[schemars(description = "'TASK' (default) or 'NOTE' (create)")]
    pub kind: Option<String>,

    #[schemars(description = "'list' (default), 'kanban', or 'timeline'")]
    pub view_mode: Option<String>,

    #[schemars(description = "Parent folder ID; 'NONE' removes folder membership (update)")]
    pub folder_id: Option<String>,
}

// ============================================================================
// Folders
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FoldersParams {
    #[schemars(description = "One of: list, create, rename, delete")]
    pub action: String,

    #[serde(default)]
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub response_format: ResponseFormat,

    #[schemars(description = "Folder ID (rename/delete)")]
    pub folder_id: Option<String>,

    #[schemars(description = "Folder name (create/rename)")]
    pub name: Option<String>,
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TagsParams {
    #[schemars(description = "One of: list, create, update, delete, merge")]
    pub action: String,

    #[serde(default)]
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub response_format: ResponseFormat,

    #[schemars(description = "Tag name (create/update/delete)")]
    pub name: Option<String>,

    #[schemars(description = "Hex color")]
    pub color: Option<String>,

    #[schemars(description = "Parent tag name; '' removes the parent")]
    pub parent: Option<String>,

    #[schemars(description = "New name, i.e. rename (update)")]
    pub label: Option<String>,

    #[schemars(description = "Tag to merge away (merge)")]
    pub source: Option<String>,

    #[schemars(description = "Tag to merge into (merge)")]
    pub target: Option<String>,
}

// ============================================================================
// Columns
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ColumnsParams {
    #[schemars(description = "One of: list, create, update, delete")]
    pub action: String,

    #[serde(default)]
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub response_format: ResponseFormat,

    #[schemars(description = "Project ID (all actions)")]
    pub project_id: Option<String>,

    #[schemars(description = "Column ID (update/delete)")]
    pub column_id: Option<String>,

    #[schemars(description = "Column name (create/update)")]
    pub name: Option<String>,

    #[schemars(description = "Left-to-right sort order")]
    pub sort_order: Option<i64>,
}

// ============================================================================
// Habits
// ============================================================================

/// One check-in to record
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckinItem {
    #[schemars(description = "Habit ID")]
    pub habit_id: String,

    #[schemars(description = "Check-in date YYYY-MM-DD (default today)")]
    pub checkin_date: Option<String>,

    #[schemars(description = "Value to record (default 1)")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HabitsParams {
    #[schemars(description = "One of: list, get, create, update, delete, checkin, checkins")]
    pub action: String,

    #[serde(default)]
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub response_format: ResponseFormat,

    #[schemars(description = "Habit ID (get/update/delete)")]
    pub habit_id: Option<String>,

    #[schemars(description = "Include archived habits (list)")]
    pub include_archived: Option<bool>,

    #[schemars(description = "Habit name (create/update)")]
    pub name: Option<String>,

    #[schemars(description = "'Boolean' (default) or 'Real' (numeric goal)")]
    pub habit_type: Option<String>,

    #[schemars(description = "Daily goal (Real habits)")]
    pub goal: Option<f64>,

    #[schemars(description = "Increment per check-in (Real habits)")]
    pub step: Option<f64>,

    #[schemars(description = "Unit label, e.g. 'glasses'")]
    pub unit: Option<String>,

    #[schemars(description = "Hex color")]
    pub color: Option<String>,

    #[schemars(description = "Habit section ID")]
    pub section_id: Option<String>,

    #[schemars(description = "RRULE repeat rule")]
    pub repeat_rule: Option<String>,

    #[schemars(description = "Reminder times, e.g. '08:00'")]
    pub reminders: Option<Vec<String>>,

    #[schemars(description = "Target streak days")]
    pub target_days: Option<i64>,

    #[schemars(description = "Encouragement text")]
    pub encouragement: Option<String>,

    #[schemars(description = "Archive or unarchive (update)")]
    pub archived: Option<bool>,

    #[schemars(description = "Check-ins to record (checkin)")]
    pub checkins: Option<Vec<CheckinItem>>,

    #[schemars(description = "Habit IDs for history (checkins)")]
    pub habit_ids: Option<Vec<String>>,

    #[schemars(description = "Only check-ins after this yyyymmdd stamp (checkins)")]
    pub after_stamp: Option<i64>,
}

// ============================================================================
// User & focus
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct UserParams {
    #[schemars(description = "One of: profile, status, statistics")]
    pub action: String,

    #[serde(default)]
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FocusParams {
    #[schemars(description = "One of: heatmap, by_tag")]
    pub action: String,

    #[serde(default)]
    #[schemars(description = "Output format: 'markdown' (default) or 'json'")]
    pub response_format: ResponseFormat,

    #[schemars(description = "Range start YYYY-MM-DD")]
    pub start_date: Option<String>,

    #[schemars(description = "Range end YYYY-MM-DD (default today)")]
    pub end_date: Option<String>,

    #[schemars(description = "Lookback days when no start date (default 30)")]
    pub days: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HelpParams {
    #[schemars(description = "Tool name, e.g. 'tasks' (omit for the overview)")]
    pub tool: Option<String>,
}
