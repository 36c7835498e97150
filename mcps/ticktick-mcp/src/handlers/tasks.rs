//! Task tool handler

use std::collections::BTreeMap;

use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde_json::json;
use ticktick_sdk::{
    Result as SdkResult, TaskChanges, TaskFilter, TaskKind, TaskPriority, TaskSpec,
    TickTickClient, TickTickError,
};

use super::{failure_message, render, text, unknown_action};
use crate::format;
use crate::params::{TaskItem, TasksParams};

const DEFAULT_LIST_LIMIT: usize = 50;
const DEFAULT_SEARCH_LIMIT: usize = 20;
const DEFAULT_LOOKBACK_DAYS: u64 = 7;

pub async fn run(client: &TickTickClient, params: TasksParams) -> Result<CallToolResult, McpError> {
    let operation = format!("tasks.{}", params.action);
    let body = match dispatch(client, params).await {
        Ok(body) => body,
        Err(e) => failure_message(&e, &operation),
    };
    Ok(text(body))
}

async fn dispatch(client: &TickTickClient, params: TasksParams) -> SdkResult<String> {
    let format = params.response_format;
    match params.action.as_str() {
        "create" => {
            let items = require_items(&params, "create")?;
            let mut specs = Vec::with_capacity(items.len());
            for item in items {
                specs.push(to_spec(item)?);
            }
            let created = client.create_tasks(specs).await?;
            Ok(render(
                format,
                || {
                    if created.len() == 1 {
                        format!("# Task Created\n\n{}", format::task_markdown(&created[0]))
                    } else {
                        format!(
                            "# {} Tasks Created\n\n{}",
                            created.len(),
                            format::tasks_markdown(&created, "Created")
                        )
                    }
                },
                || {
                    json!({
                        "success": true,
                        "count": created.len(),
                        "tasks": created.iter().map(|t| format::task_json(t, true)).collect::<Vec<_>>(),
                    })
                },
            ))
        }

        "get" => {
            let task_id = params
                .task_id
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("get requires task_id".to_string()))?;
            let task = client.get_task(task_id, params.project_id.as_deref()).await?;
            Ok(render(
                format,
                || format::task_markdown(&task),
                || format::task_json(&task, true),
            ))
        }

        "list" => {
            let status = params.status.as_deref().unwrap_or("active");
            let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
            let days = params.days.unwrap_or(DEFAULT_LOOKBACK_DAYS);

            let tasks = match status {
                "active" => {
                    let filter = TaskFilter {
                        project_id: params.project_id.clone(),
                        column_id: params.column_id.clone(),
                        tag: params.tag.clone(),
                        priority: parse_priority(params.priority.as_deref())?,
                        due_today: params.due_today.unwrap_or(false),
                        overdue: params.overdue.unwrap_or(false),
                        from_date: params.from_date.clone(),
                        to_date: params.to_date.clone(),
                        limit: Some(limit),
                    };
                    client.list_tasks(&filter).await?
                }
                "completed" => client.get_completed_tasks(days, limit).await?,
                "abandoned" => client.get_abandoned_tasks(days, limit).await?,
                "deleted" => client.get_deleted_tasks(limit).await?,
                other => {
                    return Err(TickTickError::Validation(format!(
                        "unknown status filter: {}",
                        other
                    )))
                }
            };

            let title = format!("{} Tasks", capitalize(status));
            Ok(render(
                format,
                || format::tasks_markdown(&tasks, &title),
                || format::tasks_json(&tasks),
            ))
        }

        "update" => {
            let items = require_items(&params, "update")?;
            let mut updated = Vec::new();
            let mut errors = BTreeMap::new();
            for item in items {
                let task_id = match item.task_id.clone() {
                    Some(id) => id,
                    None => {
                        errors.insert(
                            "(missing task_id)".to_string(),
                            "update items need a task_id".to_string(),
                        );
                        continue;
                    }
                };
                let changes = to_changes(item)?;
                // One item's failure must not block the rest.
                match client.update_task(&task_id, changes).await {
                    Ok(_) => updated.push(task_id),
                    Err(e) => {
                        errors.insert(task_id, e.to_string());
                    }
                }
            }
            Ok(render(
                format,
                || format::batch_update_markdown(&updated, &errors),
                || format::batch_update_json(&updated, &errors),
            ))
        }

        "complete" => {
            let ids = require_ids(&params, "complete")?;
            client.complete_tasks(&ids).await?;
            Ok(format::success_message(&format!(
                "{} task(s) completed.",
                ids.len()
            )))
        }

        "delete" => {
            let ids = require_ids(&params, "delete")?;
            client.delete_tasks(&ids).await?;
            Ok(format::success_message(&format!(
                "{} task(s) deleted.",
                ids.len()
            )))
        }

        "move" => {
            let moves = params.moves.clone().unwrap_or_default();
            if moves.is_empty() {
                return Err(TickTickError::Validation("move requires moves".to_string()));
            }
            for item in &moves {
                client
                    .move_tasks(std::slice::from_ref(&item.task_id), &item.to_project_id)
                    .await?;
            }
            Ok(format::success_message(&format!(
                "{} task(s) moved.",
                moves.len()
            )))
        }

        "pin" => {
            let items = require_items(&params, "pin")?;
            let mut count = 0;
            for item in items {
                let task_id = item.task_id.clone().ok_or_else(|| {
                    TickTickError::Validation("pin items need a task_id".to_string())
                })?;
                let pin = item.pin.unwrap_or(true);
                client.pin_tasks(std::slice::from_ref(&task_id), pin).await?;
                count += 1;
            }
            Ok(format::success_message(&format!(
                "{} task(s) pin status updated.",
                count
            )))
        }

        "search" => {
            let query = params
                .query
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("search requires query".to_string()))?;
            let mut tasks = client.search_tasks(query).await?;
            tasks.truncate(params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT));
            let title = format!("Search: {}", query);
            Ok(render(
                format,
                || format::tasks_markdown(&tasks, &title),
                || format::tasks_json(&tasks),
            ))
        }

        "set_parents" => {
            let items = require_items(&params, "set_parents")?;
            let mut pairs = Vec::with_capacity(items.len());
            for item in items {
                let task_id = item.task_id.clone().ok_or_else(|| {
                    TickTickError::Validation("set_parents items need a task_id".to_string())
                })?;
                let parent_id = item.parent_id.clone().ok_or_else(|| {
                    TickTickError::Validation("set_parents items need a parent_id".to_string())
                })?;
                pairs.push((task_id, parent_id));
            }
            client.set_task_parents(&pairs).await?;
            Ok(format::success_message(&format!(
                "{} task(s) made subtasks.",
                pairs.len()
            )))
        }

        "unparent" => {
            let ids = require_ids(&params, "unparent")?;
            client.unset_task_parents(&ids).await?;
            Ok(format::success_message(&format!(
                "{} task(s) unparented.",
                ids.len()
            )))
        }

        other => Ok(unknown_action(other)),
    }
}

fn require_items(params: &TasksParams, action: &str) -> SdkResult<Vec<TaskItem>> {
    match params.tasks.clone() {
        Some(items) if !items.is_empty() => Ok(items),
        _ => Err(TickTickError::Validation(format!(
            "{} requires tasks",
            action
        ))),
    }
}

fn require_ids(params: &TasksParams, action: &str) -> SdkResult<Vec<String>> {
    let items = require_items(params, action)?;
    items
        .into_iter()
        .map(|item| {
            item.task_id.ok_or_else(|| {
                TickTickError::Validation(format!("{} items need a task_id", action))
            })
        })
        .collect()
}

fn to_spec(item: TaskItem) -> SdkResult<TaskSpec> {
    let title = item
        .title
        .ok_or_else(|| TickTickError::Validation("create items need a title".to_string()))?;
    Ok(TaskSpec {
        title,
        project_id: item.project_id,
        content: item.content,
        kind: item.kind.as_deref().map(TaskKind::from_wire),
        priority: parse_priority(item.priority.as_deref())?,
        start_date: item.start_date,
        due_date: item.due_date,
        time_zone: None,
        tags: item.tags,
        reminders: item.reminders,
        recurrence: item.recurrence,
        parent_id: item.parent_id,
    })
}

fn to_changes(item: TaskItem) -> SdkResult<TaskChanges> {
    Ok(TaskChanges {
        title: item.title,
        content: item.content,
        kind: item.kind.as_deref().map(TaskKind::from_wire),
        priority: parse_priority(item.priority.as_deref())?,
        start_date: item.start_date,
        due_date: item.due_date,
        time_zone: None,
        tags: item.tags,
    })
}

fn parse_priority(raw: Option<&str>) -> SdkResult<Option<TaskPriority>> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| TickTickError::Validation(format!("unknown priority: {}", s))),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_conversion_requires_title() {
        let item = TaskItem {
            project_id: Some("p1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            to_spec(item),
            Err(TickTickError::Validation(_))
        ));
    }

    #[test]
    fn spec_conversion_maps_priority_labels() {
        let item = TaskItem {
            title: Some("x".to_string()),
            priority: Some("high".to_string()),
            ..Default::default()
        };
        let spec = to_spec(item).unwrap();
        assert_eq!(spec.priority, Some(TaskPriority::High));
    }

    #[test]
    fn bad_priority_is_a_validation_error() {
        assert!(matches!(
            parse_priority(Some("urgent")),
            Err(TickTickError::Validation(_))
        ));
    }

    #[test]
    fn capitalize_status_titles() {
        assert_eq!(capitalize("active"), "Active");
        assert_eq!(capitalize(""), "");
    }
}
