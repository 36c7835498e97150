//! Task command handlers

use anyhow::Result;
use serde_json::json;
use ticktick_sdk::{TaskChanges, TaskFilter, TaskPriority, TaskSpec, TickTickClient};

use crate::args::TasksAction;
use crate::dates::parse_natural_date;
use crate::output::{print_line, task_detail, task_row};

pub async fn run(action: TasksAction) -> Result<()> {
    let client = TickTickClient::from_settings()?;
    match action {
        TasksAction::List {
            project,
            column,
            tag,
            priority,
            today,
            overdue,
            from_date,
            to_date,
            days,
            limit,
        } => {
            let from_date = match (from_date, days) {
                (Some(from), _) => Some(from),
                (None, Some(days)) => Some(ticktick_sdk::filter::lookback_from_date(
                    days,
                    chrono::Local::now().date_naive(),
                )),
                (None, None) => None,
            };
            let filter = TaskFilter {
                project_id: project,
                column_id: column,
                tag,
                priority: parse_priority(priority.as_deref())?,
                due_today: today,
                overdue,
                from_date,
                to_date,
                limit,
            };
            let tasks = client.list_tasks(&filter).await?;
            print_line(&tasks.iter().map(task_row).collect());
        }

        TasksAction::Get { id, project } => {
            let task = client.get_task(&id, project.as_deref()).await?;
            print_line(&task_detail(&task));
        }

        TasksAction::Add {
            titles,
            project,
            content,
            due,
            priority,
            tags,
        } => {
            let priority = parse_priority(priority.as_deref())?;
            let tags = tags.map(|t| t.split(',').map(str::to_string).collect::<Vec<_>>());
            let due = due.map(|d| parse_natural_date(&d));
            let specs: Vec<TaskSpec> = titles
                .into_iter()
                .map(|title| TaskSpec {
                    title,
                    project_id: project.clone(),
                    content: content.clone(),
                    priority,
                    due_date: due.clone(),
                    tags: tags.clone(),
                    ..Default::default()
                })
                .collect();
            let tasks = client.create_tasks(specs).await?;
            if tasks.len() == 1 {
                print_line(&task_detail(&tasks[0]));
            } else {
                print_line(&tasks.iter().map(task_row).collect());
            }
        }

        TasksAction::Edit {
            id,
            title,
            content,
            due,
            priority,
            tags,
        } => {
            let changes = TaskChanges {
                title,
                content,
                priority: parse_priority(priority.as_deref())?,
                due_date: due.map(|d| parse_natural_date(&d)),
                tags: tags.map(|t| t.split(',').map(str::to_string).collect()),
                ..Default::default()
            };
            let task = client.update_task(&id, changes).await?;
            print_line(&task_detail(&task));
        }

        TasksAction::Done { ids } => {
            client.complete_tasks(&ids).await?;
            print_line(&json!({"ok": true, "ids": ids}));
        }

        TasksAction::Abandon { ids } => {
            client.abandon_tasks(&ids).await?;
            print_line(&json!({"ok": true, "ids": ids}));
        }

        TasksAction::Rm { ids } => {
            client.delete_tasks(&ids).await?;
            print_line(&json!({"ok": true, "ids": ids}));
        }

        TasksAction::Move { ids, to } => {
            client.move_tasks(&ids, &to).await?;
            print_line(&json!({"ok": true, "ids": ids, "to": to}));
        }

        TasksAction::Pin { ids, unpin } => {
            client.pin_tasks(&ids, !unpin).await?;
            print_line(&json!({"ok": true, "ids": ids, "pinned": !unpin}));
        }

        TasksAction::Search { query } => {
            let tasks = client.search_tasks(&query).await?;
            print_line(&tasks.iter().map(task_row).collect());
        }

        TasksAction::Parent { ids, parent } => {
            let pairs: Vec<(String, String)> =
                ids.iter().map(|id| (id.clone(), parent.clone())).collect();
            client.set_task_parents(&pairs).await?;
            print_line(&json!({"ok": true, "ids": ids, "parent": parent}));
        }

        TasksAction::Unparent { ids } => {
            client.unset_task_parents(&ids).await?;
            print_line(&json!({"ok": true, "ids": ids}));
        }
    }
    Ok(())
}

fn parse_priority(raw: Option<&str>) -> Result<Option<TaskPriority>> {
    match raw {
        None => Ok(None),
        Some(s) => Ok(Some(s.parse().map_err(anyhow::Error::msg)?)),
    }
}
