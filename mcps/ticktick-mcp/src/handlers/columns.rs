//! Kanban column tool handler

use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde_json::json;
use ticktick_sdk::{Result as SdkResult, TickTickClient, TickTickError};

use super::{failure_message, render, text, unknown_action};
use crate::format;
use crate::params::ColumnsParams;

pub async fn run(
    client: &TickTickClient,
    params: ColumnsParams,
) -> Result<CallToolResult, McpError> {
    let operation = format!("columns.{}", params.action);
    let body = match dispatch(client, params).await {
        Ok(body) => body,
        Err(e) => failure_message(&e, &operation),
    };
    Ok(text(body))
}

async fn dispatch(client: &TickTickClient, params: ColumnsParams) -> SdkResult<String> {
    let format = params.response_format;
    let project_id = params.project_id.as_deref().ok_or_else(|| {
        TickTickError::Validation(format!("{} requires project_id", params.action))
    })?;

    match params.action.as_str() {
        "list" => {
            let columns = client.get_columns(project_id).await?;
            Ok(render(
                format,
                || format::columns_markdown(&columns),
                || format::columns_json(&columns),
            ))
        }

        "create" => {
            let name = params
                .name
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("create requires name".to_string()))?;
            let column = client
                .create_column(project_id, name, params.sort_order)
                .await?;
            Ok(render(
                format,
                || format!("# Column Created\n\n{}", format::column_markdown(&column)),
                || json!({"success": true, "column": format::column_json(&column)}),
            ))
        }

        "update" => {
            let column_id = params.column_id.as_deref().ok_or_else(|| {
                TickTickError::Validation("update requires column_id".to_string())
            })?;
            let column = client
                .update_column(column_id, project_id, params.name.as_deref(), params.sort_order)
                .await?;
            Ok(render(
                format,
                || format!("# Column Updated\n\n{}", format::column_markdown(&column)),
                || json!({"success": true, "column": format::column_json(&column)}),
            ))
        }

        "delete" => {
            let column_id = params.column_id.as_deref().ok_or_else(|| {
                TickTickError::Validation("delete requires column_id".to_string())
            })?;
            client.delete_column(column_id, project_id).await?;
            Ok(format::success_message(&format!(
                "Column `{}` deleted.",
                column_id
            )))
        }

        other => Ok(unknown_action(other)),
    }
}
