//! User profile, account status, and aggregate statistics

use serde::{Deserialize, Serialize};

/// Account profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub locale: Option<String>,
}

impl User {
    pub fn from_v2(wire: UserProfileWire) -> Self {
        User {
            username: wire.username,
            name: wire.name.filter(|n| !n.is_empty()),
            email: wire.email.filter(|e| !e.is_empty()),
            picture: wire.picture.filter(|p| !p.is_empty()),
            locale: wire.locale.filter(|l| !l.is_empty()),
        }
    }
}

/// Account status, including the implicit inbox project id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatus {
    pub user_id: String,
    pub inbox_id: String,
    pub username: Option<String>,
    pub pro: bool,
    pub time_zone: Option<String>,
    pub pro_end_date: Option<String>,
}

impl UserStatus {
    pub fn from_v2(wire: UserStatusWire) -> Self {
        UserStatus {
            user_id: wire.user_id,
            inbox_id: wire.inbox_id,
            username: wire.username.filter(|u| !u.is_empty()),
            pro: wire.pro.unwrap_or(false),
            time_zone: wire.time_zone.filter(|t| !t.is_empty()),
            pro_end_date: wire.pro_end_date.filter(|d| !d.is_empty()),
        }
    }
}

/// Aggregate completion counters and gamification score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub score: i64,
    pub level: i64,
    pub today_completed: i64,
    pub yesterday_completed: i64,
    pub total_completed: i64,
}

impl UserStatistics {
    pub fn from_v2(wire: UserStatisticsWire) -> Self {
        UserStatistics {
            score: wire.score.unwrap_or(0),
            level: wire.level.unwrap_or(0),
            today_completed: wire.today_completed.unwrap_or(0),
            yesterday_completed: wire.yesterday_completed.unwrap_or(0),
            total_completed: wire.total_completed.unwrap_or(0),
        }
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileWire {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusWire {
    pub user_id: String,
    pub inbox_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub pro: Option<bool>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub pro_end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatisticsWire {
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub today_completed: Option<i64>,
    #[serde(default)]
    pub yesterday_completed: Option<i64>,
    #[serde(default)]
    pub total_completed: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_conversion() {
        let wire: UserStatusWire = serde_json::from_value(json!({
            "userId": "u123",
            "inboxId": "inbox12345",
            "username": "someone@example.com",
            "pro": true,
            "timeZone": "Europe/Berlin"
        }))
        .unwrap();
        let status = UserStatus::from_v2(wire);
        assert_eq!(status.inbox_id, "inbox12345");
        assert!(status.pro);
    }

    #[test]
    fn statistics_default_to_zero() {
        let wire: UserStatisticsWire = serde_json::from_value(json!({"score": 120})).unwrap();
        let stats = UserStatistics::from_v2(wire);
        assert_eq!(stats.score, 120);
        assert_eq!(stats.total_completed, 0);
    }
}
