//! Auth cache commands
//!
//! These work directly against the session cache file; no upstream calls.

use anyhow::Result;
use serde_json::json;
use ticktick_sdk::SessionCache;

use crate::args::AuthAction;
use crate::output::print_line;

pub fn run(action: AuthAction) -> Result<()> {
    let cache = SessionCache::new();
    match action {
        AuthAction::Status => match (cache.load(), cache.age_secs()) {
            (Some(_), Some(age)) => print_line(&json!({"ok": true, "age_seconds": age})),
            _ => print_line(&json!({"ok": false})),
        },
        AuthAction::Clear => {
            cache.clear()?;
            print_line(&json!({"ok": true}));
        }
    }
    Ok(())
}
