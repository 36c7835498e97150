//! Tool documentation served by `ticktick_help`

/// Look up documentation for one tool, or render the overview.
pub fn get_help(tool: Option<&str>) -> String {
    let Some(raw) = tool else {
        return overview();
    };

    let mut name = raw.trim().to_lowercase();
    if !name.starts_with("ticktick_") {
        name = format!("ticktick_{}", name);
    }

    match doc_for(&name) {
        Some(doc) => doc.to_string(),
        None => {
            let matches: Vec<&str> = TOOL_NAMES
                .iter()
                .copied()
                .filter(|t| t.contains(&name) || name.contains(t))
                .collect();
            if matches.is_empty() {
                format!(
                    "Tool '{}' not found. Use ticktick_help to see available tools.",
                    raw
                )
            } else {
                format!("Tool '{}' not found. Did you mean: {}?", raw, matches.join(", "))
            }
        }
    }
}

const TOOL_NAMES: &[&str] = &[
    "ticktick_tasks",
    "ticktick_projects",
    "ticktick_folders",
    "ticktick_tags",
    "ticktick_columns",
    "ticktick_habits",
    "ticktick_user",
    "ticktick_focus",
    "ticktick_help",
];

fn overview() -> String {
    [
        "# TickTick MCP Tools",
        "",
        "Use `ticktick_help` with a `tool` parameter for detailed docs.",
        "",
        "## Available Tools",
        "",
        "| Tool | Actions |",
        "|------|---------|",
        "| `ticktick_tasks` | create, get, list, update, complete, delete, move, pin, search, set_parents, unparent |",
        "| `ticktick_projects` | list, get, create, update, delete |",
        "| `ticktick_folders` | list, create, rename, delete |",
        "| `ticktick_tags` | list, create, update, delete, merge |",
        "| `ticktick_columns` | list, create, update, delete |",
        "| `ticktick_habits` | list, get, create, update, delete, checkin, checkins |",
        "| `ticktick_user` | profile, status, statistics |",
        "| `ticktick_focus` | heatmap, by_tag |",
        "| `ticktick_help` | Get documentation |",
    ]
    .join("\n")
}

fn doc_for(name: &str) -> Option<&'static str> {
    match name {
        "ticktick_tasks" => Some(TASKS_DOC),
        "ticktick_projects" => Some(PROJECTS_DOC),
        "ticktick_folders" => Some(FOLDERS_DOC),
        "ticktick_tags" => Some(TAGS_DOC),
        "ticktick_columns" => Some(COLUMNS_DOC),
        "ticktick_habits" => Some(HABITS_DOC),
        "ticktick_user" => Some(USER_DOC),
        "ticktick_focus" => Some(FOCUS_DOC),
        "ticktick_help" => Some(HELP_DOC),
        _ => None,
    }
}

const TASKS_DOC: &str = r#"## ticktick_tasks

Task operations: create, get, list, update, complete, delete, move, pin, search, set_parents, unparent.

### Parameters
- **action** (str, required): One of the actions below
- **response_format** (str): 'markdown' (default) or 'json'

### Actions

#### create
Create tasks in batch.
- **tasks** (list): Task specs with title (required), project_id, content, kind, priority, start_date, due_date, tags, reminders, recurrence, parent_id

```json
{"action": "create", "tasks": [{"title": "Buy groceries"}]}
{"action": "create", "tasks": [{"title": "Daily standup", "start_date": "2026-01-20", "recurrence": "RRULE:FREQ=DAILY"}]}
```
**Note:** Recurrence requires start_date!

#### get
Get task by ID.
- **task_id** (str, required): 24-char hex ID
- **project_id** (str): Only needed with an OAuth-only setup

```json
{"action": "get", "task_id": "abc123def456..."}
```

#### list
List tasks with filtering.
- **status** (str): 'active' (default), 'completed', 'abandoned', 'deleted'
- **project_id**, **column_id**, **tag**, **priority**: Filters
- **due_today**, **overdue** (bool): Date filters
- **from_date**, **to_date** (str): YYYY-MM-DD creation-date bounds
- **days** (int): Lookback days for completed/abandoned (default 7)
- **limit** (int): Max results (default 50)

```json
{"action": "list", "status": "active", "project_id": "abc123"}
{"action": "list", "status": "completed", "days": 14}
```

#### update
Update task properties. Failures are reported per task id.
- **tasks** (list): Updates with task_id (required) plus fields to change

```json
{"action": "update", "tasks": [{"task_id": "abc", "priority": "high"}]}
```

#### complete
Mark tasks complete.
- **tasks** (list): [{task_id}, ...]

```json
{"action": "complete", "tasks": [{"task_id": "abc"}]}
```

#### delete
Delete tasks (move to trash).
- **tasks** (list): [{task_id}, ...]

#### move
Move tasks between projects.
- **moves** (list): [{task_id, to_project_id}, ...]

```json
{"action": "move", "moves": [{"task_id": "abc", "to_project_id": "p2"}]}
```

#### pin
Pin/unpin tasks.
- **tasks** (list): [{task_id, pin: true/false}, ...]

#### search
Search tasks by title or body text.
- **query** (str, required): Search text
- **limit** (int): Max results (default 20)

```json
{"action": "search", "query": "meeting"}
```

#### set_parents
Make tasks into subtasks.
- **tasks** (list): [{task_id, parent_id}, ...]

#### unparent
Remove tasks from parents. Fails per task if it has no parent.
- **tasks** (list): [{task_id}, ...]
"#;

const PROJECTS_DOC: &str = r##"## ticktick_projects

Project operations: list, get, create, update, delete.

### Parameters
- **action** (str, required): One of the actions below
- **response_format** (str): 'markdown' (default) or 'json'

### Actions

#### list
List all projects.

```json
{"action": "list"}
```

#### get
Get project details.
- **project_id** (str, required)
- **include_tasks** (bool): Include the project's active tasks

```json
{"action": "get", "project_id": "abc123", "include_tasks": true}
```

#### create
Create a project.
- **name** (str, required)
- **kind** (str): 'TASK' (default) or 'NOTE'
- **view_mode** (str): 'list' (default), 'kanban', 'timeline'
- **color** (str): Hex color
- **folder_id** (str): Parent folder

```json
{"action": "create", "name": "Sprint Board", "view_mode": "kanban"}
```

#### update
Update project properties.
- **project_id** (str, required)
- **name**, **color**, **folder_id** (use 'NONE' to remove from folder)

```json
{"action": "update", "project_id": "abc123", "color": "#FF5733"}
```

#### delete
Delete project and all tasks.
- **project_id** (str, required)

**Warning:** This permanently deletes all tasks!
"##;

const FOLDERS_DOC: &str = r#"## ticktick_folders

Folder operations: list, create, rename, delete.

### Parameters
- **action** (str, required): One of the actions below
- **response_format** (str): 'markdown' (default) or 'json'

### Actions

#### list
List all folders.

```json
{"action": "list"}
```

#### create
Create a folder.
- **name** (str, required)

```json
{"action": "create", "name": "Work Projects"}
```

#### rename
Rename a folder.
- **folder_id** (str, required)
- **name** (str, required)

```json
{"action": "rename", "folder_id": "abc123", "name": "New Name"}
```

#### delete
Delete a folder (projects become ungrouped).
- **folder_id** (str, required)

```json
{"action": "delete", "folder_id": "abc123"}
```
"#;

const TAGS_DOC: &str = r##"## ticktick_tags

Tag operations: list, create, update, delete, merge.

### Parameters
- **action** (str, required): One of the actions below
- **response_format** (str): 'markdown' (default) or 'json'

### Actions

#### list
List all tags.

```json
{"action": "list"}
```

#### create
Create a tag.
- **name** (str, required)
- **color** (str): Hex color
- **parent** (str): Parent tag name for nesting

```json
{"action": "create", "name": "urgent", "color": "#FF0000"}
```

#### update
Update tag properties.
- **name** (str, required): Current tag name
- **color** (str): New color
- **parent** (str): New parent ('' to remove)
- **label** (str): New name (rename)

```json
{"action": "update", "name": "old-tag", "label": "new-tag"}
```

#### delete
Delete a tag.
- **name** (str, required)

```json
{"action": "delete", "name": "unused-tag"}
```

#### merge
Merge source tag into target. The source tag ceases to exist.
- **source** (str, required): Tag to delete
- **target** (str, required): Tag to keep

```json
{"action": "merge", "source": "work", "target": "professional"}
```
"##;

const COLUMNS_DOC: &str = r#"## ticktick_columns

Kanban column operations: list, create, update, delete.

### Parameters
- **action** (str, required): One of the actions below
- **response_format** (str): 'markdown' (default) or 'json'

### Actions

#### list
List columns for a project.
- **project_id** (str, required)

```json
{"action": "list", "project_id": "abc123"}
```

#### create
Create a column.
- **project_id** (str, required)
- **name** (str, required)
- **sort_order** (int): Display order

```json
{"action": "create", "project_id": "abc123", "name": "In Progress"}
```

#### update
Update a column.
- **column_id** (str, required)
- **project_id** (str, required)
- **name** (str): New name
- **sort_order** (int): New order

```json
{"action": "update", "column_id": "col123", "project_id": "proj1", "name": "Done"}
```

#### delete
Delete a column (tasks become unassigned).
- **column_id** (str, required)
- **project_id** (str, required)

```json
{"action": "delete", "column_id": "col123", "project_id": "proj1"}
```
"#;

const HABITS_DOC: &str = r#"## ticktick_habits

Habit operations: list, get, create, update, delete, checkin, checkins.

### Parameters
- **action** (str, required): One of the actions below
- **response_format** (str): 'markdown' (default) or 'json'

### Actions

#### list
List habits.
- **include_archived** (bool): Also list archived habits

```json
{"action": "list"}
```

#### get
Get habit details.
- **habit_id** (str, required)

#### create
Create a habit.
- **name** (str, required)
- **habit_type** (str): 'Boolean' (default) or 'Real'
- **goal**, **step** (number): Daily goal and increment (Real habits)
- **unit** (str): e.g. 'glasses'
- **color**, **repeat_rule**, **reminders**, **target_days**, **encouragement**

```json
{"action": "create", "name": "Drink water", "habit_type": "Real", "goal": 8, "unit": "glasses"}
```

#### update
Update habit properties; set archived true/false to archive.
- **habit_id** (str, required)

#### delete
Delete a habit and its history.
- **habit_id** (str, required)

#### checkin
Record check-ins.
- **checkins** (list): [{habit_id, checkin_date (YYYY-MM-DD, default today), value (default 1)}, ...]

```json
{"action": "checkin", "checkins": [{"habit_id": "abc", "value": 2}]}
```

#### checkins
Check-in history.
- **habit_ids** (list, required)
- **after_stamp** (int): Only entries after this yyyymmdd stamp
"#;

const USER_DOC: &str = r#"## ticktick_user

User/account operations: profile, status, statistics.

### Parameters
- **action** (str, required): 'profile', 'status', or 'statistics'
- **response_format** (str): 'markdown' (default) or 'json'

```json
{"action": "status"}
```

`status` includes the inbox project id; `statistics` carries completion
counters and the gamification score.
"#;

const FOCUS_DOC: &str = r#"## ticktick_focus

Focus/pomodoro statistics: heatmap, by_tag.

### Parameters
- **action** (str, required): 'heatmap' or 'by_tag'
- **response_format** (str): 'markdown' (default) or 'json'
- **start_date**, **end_date** (str): YYYY-MM-DD range
- **days** (int): Lookback when no start_date (default 30)

```json
{"action": "heatmap", "days": 7}
{"action": "by_tag", "start_date": "2026-01-01", "end_date": "2026-01-31"}
```
"#;

const HELP_DOC: &str = r#"## ticktick_help

Get documentation for TickTick tools.

### Parameters
- **tool** (str): Tool name (or omit for overview)

### Examples
```json
{"tool": "tasks"}
{"tool": "habits"}
```
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_every_tool() {
        let text = get_help(None);
        for name in TOOL_NAMES {
            assert!(text.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn bare_names_get_prefixed() {
        let text = get_help(Some("tasks"));
        assert!(text.contains("## ticktick_tasks"));
    }

    #[test]
    fn unknown_tools_suggest_alternatives() {
        let text = get_help(Some("task"));
        assert!(text.contains("Did you mean"));
        let text = get_help(Some("zzz"));
        assert!(text.contains("not found"));
    }
}
