//! Tag tool handler

use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde_json::json;
use ticktick_sdk::{Result as SdkResult, TickTickClient, TickTickError};

use super::{failure_message, render, text, unknown_action};
use crate::format;
use crate::params::TagsParams;

pub async fn run(client: &TickTickClient, params: TagsParams) -> Result<CallToolResult, McpError> {
    let operation = format!("tags.{}", params.action);
    let body = match dispatch(client, params).await {
        Ok(body) => body,
        Err(e) => failure_message(&e, &operation),
    };
    Ok(text(body))
}

async fn dispatch(client: &TickTickClient, params: TagsParams) -> SdkResult<String> {
    let format = params.response_format;
    match params.action.as_str() {
        "list" => {
            let tags = client.get_all_tags().await?;
            Ok(render(
                format,
                || format::tags_markdown(&tags),
                || format::tags_json(&tags),
            ))
        }

        "create" => {
            let name = require_name(&params, "create")?;
            let tag = client
                .create_tag(name, params.color.as_deref(), params.parent.as_deref())
                .await?;
            Ok(render(
                format,
                || format!("# Tag Created\n\n{}", format::tag_markdown(&tag)),
                || json!({"success": true, "tag": format::tag_json(&tag)}),
            ))
        }

        "update" => {
            let name = require_name(&params, "update")?;
            // A rename changes the key; later lookups use the new name.
            let name = match params.label.as_deref() {
                Some(label) => {
                    client.rename_tag(name, label).await?;
                    label
                }
                None => name,
            };
            let tag = client
                .update_tag(name, params.color.as_deref(), params.parent.as_deref())
                .await?;
            Ok(render(
                format,
                || format!("# Tag Updated\n\n{}", format::tag_markdown(&tag)),
                || json!({"success": true, "tag": format::tag_json(&tag)}),
            ))
        }

        "delete" => {
            let name = require_name(&params, "delete")?;
            client.delete_tag(name).await?;
            Ok(format::success_message(&format!("Tag `{}` deleted.", name)))
        }

        "merge" => {
            let source = params
                .source
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("merge requires source".to_string()))?;
            let target = params
                .target
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("merge requires target".to_string()))?;
            client.merge_tags(source, target).await?;
            Ok(format::success_message(&format!(
                "Tag `{}` merged into `{}`.",
                source, target
            )))
        }

        other => Ok(unknown_action(other)),
    }
}

fn require_name<'a>(params: &'a TagsParams, action: &str) -> SdkResult<&'a str> {
    params
        .name
        .as_deref()
        .ok_or_else(|| TickTickError::Validation(format!("{} requires name", action)))
}
