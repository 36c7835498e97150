//! Environment-driven configuration
//!
//! Credentials decide which API generations are reachable: a username and
//! password enable the session (V2) backend, an OAuth access token enables
//! the official (V1) backend. Either alone is workable; V2 unlocks the full
//! feature set.

/// Recognized environment variables
pub const ENV_CLIENT_ID: &str = "TICKTICK_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "TICKTICK_CLIENT_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "TICKTICK_ACCESS_TOKEN";
pub const ENV_USERNAME: &str = "TICKTICK_USERNAME";
pub const ENV_PASSWORD: &str = "TICKTICK_PASSWORD";

/// Credentials snapshot read from the environment
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Settings {
    /// Read all recognized variables. Empty strings count as unset.
    pub fn from_env() -> Self {
        Settings {
            client_id: env_var(ENV_CLIENT_ID),
            client_secret: env_var(ENV_CLIENT_SECRET),
            access_token: env_var(ENV_ACCESS_TOKEN),
            username: env_var(ENV_USERNAME),
            password: env_var(ENV_PASSWORD),
        }
    }

    /// Username/password pair for a fresh V2 login, if both are present.
    pub fn v2_credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) => Some((u, p)),
            _ => None,
        }
    }

    /// Whether the V1 OAuth backend is configured.
    pub fn has_v1(&self) -> bool {
        self.access_token.is_some()
    }

    /// Whether any backend could possibly be brought up.
    pub fn has_any_credentials(&self) -> bool {
        self.has_v1() || self.v2_credentials().is_some()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v2_credentials_need_both_halves() {
        let mut settings = Settings {
            username: Some("user@example.com".to_string()),
            ..Default::default()
        };
        assert!(settings.v2_credentials().is_none());
        settings.password = Some("hunter2".to_string());
        assert_eq!(
            settings.v2_credentials(),
            Some(("user@example.com", "hunter2"))
        );
    }

    #[test]
    fn empty_settings_have_no_backend() {
        let settings = Settings::default();
        assert!(!settings.has_any_credentials());
    }
}
