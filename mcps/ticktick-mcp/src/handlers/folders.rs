//! Folder tool handler

use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde_json::json;
use ticktick_sdk::{Result as SdkResult, TickTickClient, TickTickError};

use super::{failure_message, render, text, unknown_action};
use crate::format;
use crate::params::FoldersParams;

pub async fn run(
    client: &TickTickClient,
    params: FoldersParams,
) -> Result<CallToolResult, McpError> {
    let operation = format!("folders.{}", params.action);
    let body = match dispatch(client, params).await {
        Ok(body) => body,
        Err(e) => failure_message(&e, &operation),
    };
    Ok(text(body))
}

async fn dispatch(client: &TickTickClient, params: FoldersParams) -> SdkResult<String> {
    let format = params.response_format;
    match params.action.as_str() {
        "list" => {
            let folders = client.get_all_folders().await?;
            Ok(render(
                format,
                || format::folders_markdown(&folders),
                || format::folders_json(&folders),
            ))
        }

        "create" => {
            let name = params
                .name
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("create requires name".to_string()))?;
            let folder = client.create_folder(name).await?;
            Ok(render(
                format,
                || {
                    format!(
                        "# Folder Created\n\n- **Name**: {}\n- **ID**: `{}`",
                        folder.name, folder.id
                    )
                },
                || json!({"success": true, "folder": {"id": folder.id, "name": folder.name}}),
            ))
        }

        "rename" => {
            let folder_id = params.folder_id.as_deref().ok_or_else(|| {
                TickTickError::Validation("rename requires folder_id".to_string())
            })?;
            let name = params
                .name
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("rename requires name".to_string()))?;
            let folder = client.rename_folder(folder_id, name).await?;
            Ok(render(
                format,
                || {
                    format!(
                        "# Folder Renamed\n\n- **Name**: {}\n- **ID**: `{}`",
                        folder.name, folder.id
                    )
                },
                || json!({"success": true, "folder": {"id": folder.id, "name": folder.name}}),
            ))
        }

        "delete" => {
            let folder_id = params.folder_id.as_deref().ok_or_else(|| {
                TickTickError::Validation("delete requires folder_id".to_string())
            })?;
            client.delete_folder(folder_id).await?;
            Ok(format::success_message(&format!(
                "Folder `{}` deleted.",
                folder_id
            )))
        }

        other => Ok(unknown_action(other)),
    }
}
