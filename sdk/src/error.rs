//! Error types for TickTick API operations

use thiserror::Error;

/// Errors surfaced by the unified client
#[derive(Error, Debug)]
pub enum TickTickError {
    /// Credentials rejected or session expired upstream
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// An id (or name) did not resolve to an entity
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller violated a precondition before any upstream call was made
    #[error("invalid input: {0}")]
    Validation(String),

    /// Upstream throttled the request
    #[error("rate limited: {0}")]
    RateLimit(String),

    /// Authenticated but not allowed (e.g. feature requires a paid tier)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Upstream 5xx-equivalent failure
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        message: String,
    },

    /// Missing or unusable environment configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Any other upstream failure, including unexpected response shapes
    #[error("API error: {0}")]
    Api(String),

    /// Transport-level failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TickTickError {
    /// Map an HTTP status + body to the error taxonomy.
    ///
    /// Only called for non-success statuses.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = if body.len() > 500 {
            let mut cut = 500;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}...", &body[..cut])
        } else {
            body
        };
        match status {
            401 => TickTickError::Authentication(message),
            403 => TickTickError::Forbidden(message),
            404 => TickTickError::NotFound(message),
            429 => TickTickError::RateLimit(message),
            500..=599 => TickTickError::Server { status, message },
            _ => TickTickError::Api(format!("status {}: {}", status, message)),
        }
    }

    /// Short category name, used by the surface adapters for hints.
    pub fn category(&self) -> &'static str {
        match self {
            TickTickError::Authentication(_) => "authentication",
            TickTickError::NotFound(_) => "not_found",
            TickTickError::Validation(_) => "validation",
            TickTickError::RateLimit(_) => "rate_limit",
            TickTickError::Forbidden(_) => "forbidden",
            TickTickError::Server { .. } => "server",
            TickTickError::Configuration(_) => "configuration",
            TickTickError::Api(_) => "api",
            TickTickError::Http(_) => "http",
        }
    }
}

impl From<serde_json::Error> for TickTickError {
    fn from(e: serde_json::Error) -> Self {
        TickTickError::Api(format!("unexpected response shape: {}", e))
    }
}

/// Result type alias for TickTick operations
pub type Result<T> = std::result::Result<T, TickTickError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            TickTickError::from_status(401, "bad token".into()),
            TickTickError::Authentication(_)
        ));
        assert!(matches!(
            TickTickError::from_status(403, String::new()),
            TickTickError::Forbidden(_)
        ));
        assert!(matches!(
            TickTickError::from_status(404, String::new()),
            TickTickError::NotFound(_)
        ));
        assert!(matches!(
            TickTickError::from_status(429, String::new()),
            TickTickError::RateLimit(_)
        ));
        assert!(matches!(
            TickTickError::from_status(503, String::new()),
            TickTickError::Server { status: 503, .. }
        ));
        assert!(matches!(
            TickTickError::from_status(418, String::new()),
            TickTickError::Api(_)
        ));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(2000);
        if let TickTickError::Server { message, .. } = TickTickError::from_status(500, body) {
            assert!(message.len() < 600);
            assert!(message.ends_with("..."));
        } else {
            panic!("expected server error");
        }
    }
}
