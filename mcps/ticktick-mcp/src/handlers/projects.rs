//! Project tool handler

use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde_json::json;
use ticktick_sdk::{
    ProjectSpec, Result as SdkResult, TickTickClient, TickTickError, ViewMode,
};

use super::{failure_message, render, text, unknown_action};
use crate::format;
use crate::params::ProjectsParams;

pub async fn run(
    client: &TickTickClient,
    params: ProjectsParams,
) -> Result<CallToolResult, McpError> {
    let operation = format!("projects.{}", params.action);
    let body = match dispatch(client, params).await {
        Ok(body) => body,
        Err(e) => failure_message(&e, &operation),
    };
    Ok(text(body))
}

async fn dispatch(client: &TickTickClient, params: ProjectsParams) -> SdkResult<String> {
    let format = params.response_format;
    match params.action.as_str() {
        "list" => {
            let projects = client.get_all_projects().await?;
            Ok(render(
                format,
                || format::projects_markdown(&projects),
                || format::projects_json(&projects),
            ))
        }

        "get" => {
            let project_id = require_project_id(&params, "get")?;
            let project = client.get_project(project_id).await?;
            let tasks = if params.include_tasks.unwrap_or(false) {
                let all = client.get_all_tasks().await?;
                all.into_iter()
                    .filter(|t| t.project_id == project_id)
                    .collect()
            } else {
                Vec::new()
            };
            Ok(render(
                format,
                || {
                    let mut result = format::project_markdown(&project);
                    if !tasks.is_empty() {
                        result.push_str("\n\n");
                        result.push_str(&format::tasks_markdown(&tasks, "Tasks"));
                    }
                    result
                },
                || {
                    let mut data = format::project_json(&project);
                    if !tasks.is_empty() {
                        data["tasks"] = json!(tasks
                            .iter()
                            .map(|t| format::task_json(t, false))
                            .collect::<Vec<_>>());
                    }
                    data
                },
            ))
        }

        "create" => {
            let name = params
                .name
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("create requires name".to_string()))?;
            let spec = ProjectSpec {
                color: params.color.clone(),
                kind: params.kind.clone(),
                view_mode: params.view_mode.as_deref().map(ViewMode::from_wire),
                folder_id: params.folder_id.clone().map(Some),
                ..Default::default()
            };
            let project = client.create_project(name, spec).await?;
            Ok(render(
                format,
                || format!("# Project Created\n\n{}", format::project_markdown(&project)),
                || json!({"success": true, "project": format::project_json(&project)}),
            ))
        }

        "update" => {
            let project_id = require_project_id(&params, "update")?;
            // 'NONE' clears folder membership
            let folder_id = params.folder_id.clone().map(|f| {
                if f == "NONE" {
                    None
                } else {
                    Some(f)
                }
            });
            let spec = ProjectSpec {
                name: params.name.clone(),
                color: params.color.clone(),
                kind: params.kind.clone(),
                view_mode: params.view_mode.as_deref().map(ViewMode::from_wire),
                folder_id,
            };
            let project = client.update_project(project_id, spec).await?;
            Ok(render(
                format,
                || format!("# Project Updated\n\n{}", format::project_markdown(&project)),
                || json!({"success": true, "project": format::project_json(&project)}),
            ))
        }

        "delete" => {
            let project_id = require_project_id(&params, "delete")?;
            client.delete_project(project_id).await?;
            Ok(format::success_message(&format!(
                "Project `{}` deleted.",
                project_id
            )))
        }

        other => Ok(unknown_action(other)),
    }
}

fn require_project_id<'a>(params: &'a ProjectsParams, action: &str) -> SdkResult<&'a str> {
    params.project_id.as_deref().ok_or_else(|| {
        TickTickError::Validation(format!("{} requires project_id", action))
    })
}
