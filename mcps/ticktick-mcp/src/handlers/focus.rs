//! Focus/pomodoro tool handler

use chrono::{Days, Local, NaiveDate};
use rmcp::{model::CallToolResult, ErrorData as McpError};
use ticktick_sdk::{Result as SdkResult, TickTickClient, TickTickError};

use super::{failure_message, render, text, unknown_action};
use crate::format;
use crate::params::FocusParams;

const DEFAULT_LOOKBACK_DAYS: u64 = 30;

pub async fn run(client: &TickTickClient, params: FocusParams) -> Result<CallToolResult, McpError> {
    let operation = format!("focus.{}", params.action);
    let body = match dispatch(client, params).await {
        Ok(body) => body,
        Err(e) => failure_message(&e, &operation),
    };
    Ok(text(body))
}

async fn dispatch(client: &TickTickClient, params: FocusParams) -> SdkResult<String> {
    let format = params.response_format;
    let (start, end) = resolve_range(&params)?;

    match params.action.as_str() {
        "heatmap" => {
            let entries = client.get_focus_heatmap(start, end).await?;
            Ok(render(
                format,
                || format::focus_heatmap_markdown(&entries),
                || format::focus_heatmap_json(&entries),
            ))
        }

        "by_tag" => {
            let stats = client.get_focus_by_tag(start, end).await?;
            Ok(render(
                format,
                || format::focus_by_tag_markdown(&stats),
                || format::focus_by_tag_json(&stats),
            ))
        }

        other => Ok(unknown_action(other)),
    }
}

fn resolve_range(params: &FocusParams) -> SdkResult<(NaiveDate, NaiveDate)> {
    let end = match params.end_date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let start = match params.start_date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => end
            .checked_sub_days(Days::new(params.days.unwrap_or(DEFAULT_LOOKBACK_DAYS)))
            .unwrap_or(end),
    };
    if start > end {
        return Err(TickTickError::Validation(format!(
            "start_date {} is after end_date {}",
            start, end
        )));
    }
    Ok((start, end))
}

fn parse_date(raw: &str) -> SdkResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TickTickError::Validation(format!("bad date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FocusParams;

    #[test]
    fn explicit_range_is_validated() {
        let params = FocusParams {
            action: "heatmap".to_string(),
            start_date: Some("2026-02-01".to_string()),
            end_date: Some("2026-01-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve_range(&params),
            Err(TickTickError::Validation(_))
        ));
    }

    #[test]
    fn days_lookback_from_explicit_end() {
        let params = FocusParams {
            action: "heatmap".to_string(),
            end_date: Some("2026-01-31".to_string()),
            days: Some(30),
            ..Default::default()
        };
        let (start, end) = resolve_range(&params).unwrap();
        assert_eq!(end.to_string(), "2026-01-31");
        assert_eq!(start.to_string(), "2026-01-01");
    }
}
