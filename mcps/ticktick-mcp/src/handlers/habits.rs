//! Habit tool handler

use chrono::{Local, NaiveDate};
use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde_json::json;
use ticktick_sdk::{
    CheckinSpec, HabitSpec, Result as SdkResult, TickTickClient, TickTickError,
};

use super::{failure_message, render, text, unknown_action};
use crate::format;
use crate::params::HabitsParams;

pub async fn run(
    client: &TickTickClient,
    params: HabitsParams,
) -> Result<CallToolResult, McpError> {
    let operation = format!("habits.{}", params.action);
    let body = match dispatch(client, params).await {
        Ok(body) => body,
        Err(e) => failure_message(&e, &operation),
    };
    Ok(text(body))
}

async fn dispatch(client: &TickTickClient, params: HabitsParams) -> SdkResult<String> {
    let format = params.response_format;
    match params.action.as_str() {
        "list" => {
            let habits = client
                .get_all_habits(params.include_archived.unwrap_or(false))
                .await?;
            Ok(render(
                format,
                || format::habits_markdown(&habits),
                || format::habits_json(&habits),
            ))
        }

        "get" => {
            let habit_id = require_habit_id(&params, "get")?;
            let habit = client.get_habit(habit_id).await?;
            Ok(render(
                format,
                || format::habit_markdown(&habit),
                || format::habit_json(&habit),
            ))
        }

        "create" => {
            let name = params
                .name
                .as_deref()
                .ok_or_else(|| TickTickError::Validation("create requires name".to_string()))?;
            let habit = client.create_habit(name, to_spec(&params)).await?;
            Ok(render(
                format,
                || format!("# Habit Created\n\n{}", format::habit_markdown(&habit)),
                || json!({"success": true, "habit": format::habit_json(&habit)}),
            ))
        }

        "update" => {
            let habit_id = require_habit_id(&params, "update")?;
            let mut spec = to_spec(&params);
            spec.name = params.name.clone();
            let habit = client.update_habit(habit_id, spec).await?;
            Ok(render(
                format,
                || format!("# Habit Updated\n\n{}", format::habit_markdown(&habit)),
                || json!({"success": true, "habit": format::habit_json(&habit)}),
            ))
        }

        "delete" => {
            let habit_id = require_habit_id(&params, "delete")?;
            client.delete_habit(habit_id).await?;
            Ok(format::success_message(&format!(
                "Habit `{}` deleted.",
                habit_id
            )))
        }

        "checkin" => {
            let items = params.checkins.clone().unwrap_or_default();
            if items.is_empty() {
                return Err(TickTickError::Validation(
                    "checkin requires checkins".to_string(),
                ));
            }
            let mut specs = Vec::with_capacity(items.len());
            for item in items {
                let stamp = match item.checkin_date.as_deref() {
                    Some(date) => date_to_stamp(date)?,
                    None => date_to_stamp(&Local::now().date_naive().format("%Y-%m-%d").to_string())?,
                };
                specs.push(CheckinSpec {
                    habit_id: item.habit_id,
                    stamp,
                    value: item.value.unwrap_or(1.0),
                });
            }
            let count = specs.len();
            client.checkin_habits(specs).await?;
            Ok(format::success_message(&format!(
                "{} check-in(s) recorded.",
                count
            )))
        }

        "checkins" => {
            let habit_ids = params.habit_ids.clone().unwrap_or_default();
            if habit_ids.is_empty() {
                return Err(TickTickError::Validation(
                    "checkins requires habit_ids".to_string(),
                ));
            }
            let after = params.after_stamp.unwrap_or(0);
            let checkins = client.get_habit_checkins(&habit_ids, after).await?;
            Ok(render(
                format,
                || format::checkins_markdown(&checkins),
                || format::checkins_json(&checkins),
            ))
        }

        other => Ok(unknown_action(other)),
    }
}

fn to_spec(params: &HabitsParams) -> HabitSpec {
    HabitSpec {
        name: None,
        habit_type: params.habit_type.clone(),
        goal: params.goal,
        step: params.step,
        unit: params.unit.clone(),
        color: params.color.clone(),
        section_id: params.section_id.clone(),
        repeat_rule: params.repeat_rule.clone(),
        reminders: params.reminders.clone(),
        target_days: params.target_days,
        encouragement: params.encouragement.clone(),
        archived: params.archived,
    }
}

fn require_habit_id<'a>(params: &'a HabitsParams, action: &str) -> SdkResult<&'a str> {
    params
        .habit_id
        .as_deref()
        .ok_or_else(|| TickTickError::Validation(format!("{} requires habit_id", action)))
}

/// `YYYY-MM-DD` → `yyyymmdd` stamp
fn date_to_stamp(date: &str) -> SdkResult<i64> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| TickTickError::Validation(format!("bad checkin_date: {}", date)))?;
    parsed
        .format("%Y%m%d")
        .to_string()
        .parse()
        .map_err(|_| TickTickError::Validation(format!("bad checkin_date: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_from_iso_dates() {
        assert_eq!(date_to_stamp("2026-01-15").unwrap(), 20260115);
        assert!(date_to_stamp("01/15/2026").is_err());
    }
}
