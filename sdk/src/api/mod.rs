//! Upstream API clients
//!
//! Two structurally different generations sit behind the facade: the official
//! OAuth API (`v1`) and the richer session API (`v2`). Both are thin reqwest
//! wrappers returning typed wire shapes; conversion to canonical records
//! happens in `models`, dispatch between generations in the client facade.

pub mod v1;
pub mod v2;

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::error::{Result, TickTickError};

pub use v1::V1Client;
pub use v2::V2Client;

/// Mutation result map shared by the batch endpoints.
///
/// Creation responses carry the newly assigned id as a key of `id2etag`; the
/// etag value is only used to learn that id, never for optimistic
/// concurrency. Batch updates report per-item failures in `id2error` without
/// failing the items that succeeded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    #[serde(default)]
    pub id2etag: HashMap<String, String>,
    #[serde(default)]
    pub id2error: HashMap<String, serde_json::Value>,
}

impl BatchResponse {
    /// The single new id from a one-element create call.
    pub fn first_id(&self) -> Option<&str> {
        self.id2etag.keys().next().map(String::as_str)
    }

    /// Ids that succeeded, in stable order.
    pub fn succeeded_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.id2etag.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Per-id failure messages, in stable order.
    pub fn error_messages(&self) -> BTreeMap<String, String> {
        self.id2error
            .iter()
            .map(|(id, v)| {
                let msg = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (id.clone(), msg)
            })
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.id2error.is_empty()
    }
}

/// Resolve a response into `Ok` or the typed error taxonomy.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TickTickError::from_status(status.as_u16(), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batch_response_parses_both_maps() {
        let resp: BatchResponse = serde_json::from_value(json!({
            "id2etag": {"aaa": "e1", "bbb": "e2"},
            "id2error": {"ccc": "not found"}
        }))
        .unwrap();
        assert_eq!(resp.succeeded_ids(), vec!["aaa", "bbb"]);
        assert!(resp.has_errors());
        assert_eq!(resp.error_messages()["ccc"], "not found");
    }

    #[test]
    fn partial_failure_does_not_block_successes() {
        // Items 1 and 3 succeed while item 2 fails; all three are visible.
        let resp: BatchResponse = serde_json::from_value(json!({
            "id2etag": {"t1": "e1", "t3": "e3"},
            "id2error": {"t2": {"code": "task_not_found"}}
        }))
        .unwrap();
        assert_eq!(resp.succeeded_ids(), vec!["t1", "t3"]);
        let errors = resp.error_messages();
        assert_eq!(errors.len(), 1);
        assert!(errors["t2"].contains("task_not_found"));
    }

    #[test]
    fn empty_body_defaults() {
        let resp: BatchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.first_id().is_none());
        assert!(!resp.has_errors());
    }
}
