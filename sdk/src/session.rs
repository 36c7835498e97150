//! Session token lifecycle and on-disk cache
//!
//! A fresh login is expensive, so the session token and the account's inbox
//! id are persisted to `~/.ticktick/auth_cache.json` with a recorded
//! timestamp. A cached session older than [`SESSION_TTL_SECS`] is treated as
//! absent; the cache cannot tell "expired" from "revoked" and does not try.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TickTickError};

/// Cached sessions are valid for 24 hours.
pub const SESSION_TTL_SECS: u64 = 86_400;

const CACHE_DIR_NAME: &str = ".ticktick";
const CACHE_FILE_NAME: &str = "auth_cache.json";

/// An authenticated V2 session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub inbox_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Explicit session lifecycle.
///
/// Held behind a mutex in the facade; `Authenticating` is observable only by
/// other tasks while a login is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Active(SessionToken),
    Expired,
}

impl SessionState {
    pub fn token(&self) -> Option<&SessionToken> {
        match self {
            SessionState::Active(token) => Some(token),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheDocument {
    v2_session: SessionToken,
    cached_at: u64,
}

/// Persisted session cache with a fixed TTL
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// Cache in the default per-user directory.
    pub fn new() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        SessionCache {
            path: base.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME),
        }
    }

    /// Cache at an explicit path (tests, alternate homes).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        SessionCache { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached session, treating stale, missing, or malformed files
    /// as absent.
    pub fn load(&self) -> Option<SessionToken> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let doc: CacheDocument = serde_json::from_str(&raw).ok()?;
        let now = epoch_secs();
        if now.saturating_sub(doc.cached_at) > SESSION_TTL_SECS {
            tracing::debug!(age = now.saturating_sub(doc.cached_at), "session cache stale");
            return None;
        }
        Some(doc.v2_session)
    }

    /// Persist a session with the current timestamp and owner-only
    /// permissions.
    pub fn store(&self, session: &SessionToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| TickTickError::Configuration(format!("cache dir: {}", e)))?;
        }
        let doc = CacheDocument {
            v2_session: session.clone(),
            cached_at: epoch_secs(),
        };
        let body = serde_json::to_string(&doc)?;
        fs::write(&self.path, body)
            .map_err(|e| TickTickError::Configuration(format!("cache write: {}", e)))?;
        restrict_permissions(&self.path);
        Ok(())
    }

    /// Delete the cache file. Missing files are fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TickTickError::Configuration(format!("cache clear: {}", e))),
        }
    }

    /// Age of the cache file in seconds, if one exists and parses.
    pub fn age_secs(&self) -> Option<u64> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let doc: CacheDocument = serde_json::from_str(&raw).ok()?;
        Some(epoch_secs().saturating_sub(doc.cached_at))
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("could not restrict cache permissions: {}", e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache() -> (tempfile::TempDir, SessionCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::at_path(dir.path().join("auth_cache.json"));
        (dir, cache)
    }

    fn sample_token() -> SessionToken {
        SessionToken {
            token: "t0ken".to_string(),
            inbox_id: "inbox12345".to_string(),
            user_id: Some("u1".to_string()),
        }
    }

    #[test]
    fn store_then_load_roundtrip() {
        let (_dir, cache) = temp_cache();
        cache.store(&sample_token()).unwrap();
        let loaded = cache.load().unwrap();
        assert_eq!(loaded, sample_token());
        assert!(cache.age_secs().unwrap() < 5);
    }

    #[test]
    fn missing_file_is_absent() {
        let (_dir, cache) = temp_cache();
        assert!(cache.load().is_none());
    }

    #[test]
    fn malformed_file_is_absent() {
        let (_dir, cache) = temp_cache();
        fs::write(cache.path(), "{not json").unwrap();
        assert!(cache.load().is_none());
    }

    #[test]
    fn stale_cache_is_absent() {
        let (_dir, cache) = temp_cache();
        let doc = CacheDocument {
            v2_session: sample_token(),
            cached_at: epoch_secs() - SESSION_TTL_SECS - 10,
        };
        fs::write(cache.path(), serde_json::to_string(&doc).unwrap()).unwrap();
        assert!(cache.load().is_none());
        // age is still reported for diagnostics
        assert!(cache.age_secs().unwrap() > SESSION_TTL_SECS);
    }

    #[test]
    fn within_ttl_is_reused() {
        let (_dir, cache) = temp_cache();
        let doc = CacheDocument {
            v2_session: sample_token(),
            cached_at: epoch_secs() - SESSION_TTL_SECS / 2,
        };
        fs::write(cache.path(), serde_json::to_string(&doc).unwrap()).unwrap();
        assert!(cache.load().is_some());
    }

    #[test]
    fn clear_removes_file_and_tolerates_absence() {
        let (_dir, cache) = temp_cache();
        cache.store(&sample_token()).unwrap();
        cache.clear().unwrap();
        assert!(cache.load().is_none());
        cache.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn cache_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let (_dir, cache) = temp_cache();
        cache.store(&sample_token()).unwrap();
        let mode = fs::metadata(cache.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
