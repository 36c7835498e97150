//! User/account tool handler

use rmcp::{model::CallToolResult, ErrorData as McpError};
use ticktick_sdk::{Result as SdkResult, TickTickClient};

use super::{failure_message, render, text, unknown_action};
use crate::format;
use crate::params::UserParams;

pub async fn run(client: &TickTickClient, params: UserParams) -> Result<CallToolResult, McpError> {
    let operation = format!("user.{}", params.action);
    let body = match dispatch(client, params).await {
        Ok(body) => body,
        Err(e) => failure_message(&e, &operation),
    };
    Ok(text(body))
}

async fn dispatch(client: &TickTickClient, params: UserParams) -> SdkResult<String> {
    let format = params.response_format;
    match params.action.as_str() {
        "profile" => {
            let user = client.get_user_profile().await?;
            Ok(render(
                format,
                || format::user_markdown(&user),
                || format::user_json(&user),
            ))
        }

        "status" => {
            let status = client.get_user_status().await?;
            Ok(render(
                format,
                || format::user_status_markdown(&status),
                || format::user_status_json(&status),
            ))
        }

        "statistics" => {
            let stats = client.get_user_statistics().await?;
            Ok(render(
                format,
                || format::user_statistics_markdown(&stats),
                || format::user_statistics_json(&stats),
            ))
        }

        other => Ok(unknown_action(other)),
    }
}
