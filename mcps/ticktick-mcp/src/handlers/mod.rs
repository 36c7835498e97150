//! Tool handlers
//!
//! Each handler dispatches on the `action` discriminator, calls the facade,
//! and renders a string. Domain failures never surface as protocol errors:
//! they render as a uniform failure message with the error category and an
//! actionable hint, so the calling model can correct itself.

pub mod columns;
pub mod focus;
pub mod folders;
pub mod habits;
pub mod projects;
pub mod tags;
pub mod tasks;
pub mod user;

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use ticktick_sdk::TickTickError;

use crate::format::{error_message, to_json_string, truncate_response};
use crate::params::ResponseFormat;

/// Wrap a rendered body as a tool result, applying the size governor.
pub(crate) fn text(body: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(truncate_response(body))])
}

/// Render a domain failure with a hint matched to the error category.
pub(crate) fn failure_message(e: &TickTickError, operation: &str) -> String {
    tracing::error!(operation, error = %e, "tool call failed");
    match e {
        TickTickError::Authentication(_) => error_message(
            "Authentication failed",
            "Check TICKTICK_* environment variables.",
        ),
        TickTickError::NotFound(what) => {
            error_message(&format!("Not found: {}", what), "Verify the ID exists.")
        }
        TickTickError::Validation(what) => {
            error_message(&format!("Invalid input: {}", what), "Check parameters.")
        }
        TickTickError::RateLimit(_) => error_message("Rate limited", "Wait and retry."),
        TickTickError::Forbidden(_) => error_message(
            "Forbidden",
            "This feature may need a higher subscription tier.",
        ),
        TickTickError::Configuration(what) => error_message(
            &format!("Configuration: {}", what),
            "Check TICKTICK_* environment variables.",
        ),
        other => error_message(
            &format!("Error: {}", other),
            &format!("Type: {}", other.category()),
        ),
    }
}

pub(crate) fn unknown_action(action: &str) -> String {
    error_message(&format!("Unknown action: {}", action), "")
}

/// Pick the rendering for the requested format.
pub(crate) fn render(
    format: ResponseFormat,
    markdown: impl FnOnce() -> String,
    json: impl FnOnce() -> Value,
) -> String {
    match format {
        ResponseFormat::Markdown => markdown(),
        ResponseFormat::Json => to_json_string(&json()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_carry_hints() {
        let msg = failure_message(
            &TickTickError::NotFound("task abc".to_string()),
            "tasks.get",
        );
        assert!(msg.contains("Not found: task abc"));
        assert!(msg.contains("Verify the ID exists."));

        let msg = failure_message(
            &TickTickError::Authentication("401".to_string()),
            "tasks.list",
        );
        assert!(msg.contains("Check TICKTICK_*"));
    }

    #[test]
    fn unknown_action_has_no_suggestion() {
        let msg = unknown_action("fly");
        assert!(msg.contains("Unknown action: fly"));
        assert!(!msg.contains("Suggestion"));
    }
}
