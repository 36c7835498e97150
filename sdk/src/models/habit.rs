//! Habit and habit check-in models

use serde::{Deserialize, Serialize};

use crate::constants::HabitType;

/// Canonical habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub habit_type: HabitType,
    /// Daily goal; 1.0 for boolean habits
    pub goal: f64,
    /// Increment per check-in for numeric habits
    pub step: f64,
    pub unit: Option<String>,
    pub color: Option<String>,
    pub section_id: Option<String>,
    pub repeat_rule: Option<String>,
    pub reminders: Vec<String>,
    pub encouragement: Option<String>,
    pub target_days: Option<i64>,
    pub current_streak: Option<i64>,
    pub total_checkins: i64,
    pub archived: bool,
}

impl Habit {
    pub fn from_v2(wire: HabitWire) -> Self {
        Habit {
            habit_type: HabitType::from_wire(wire.habit_type.as_deref().unwrap_or("Boolean")),
            goal: wire.goal.unwrap_or(1.0),
            step: wire.step.unwrap_or(1.0),
            unit: wire.unit.filter(|u| !u.is_empty()),
            color: wire.color.filter(|c| !c.is_empty()),
            section_id: wire.section_id.filter(|s| !s.is_empty()),
            repeat_rule: wire.repeat_rule.filter(|r| !r.is_empty()),
            reminders: wire.reminders.unwrap_or_default(),
            encouragement: wire.encouragement.filter(|e| !e.is_empty()),
            target_days: wire.target_days,
            current_streak: wire.current_streak,
            total_checkins: wire.total_check_ins.unwrap_or(0),
            archived: wire.status.unwrap_or(0) != 0,
            name: wire.name,
            id: wire.id,
        }
    }
}

/// One day's check-in record for a habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCheckin {
    pub id: Option<String>,
    pub habit_id: String,
    /// Date key in `yyyymmdd` form
    pub checkin_stamp: i64,
    pub value: f64,
    /// Goal at check-in time
    pub goal: f64,
    /// 0 = in progress, 2 = completed (upstream codes preserved)
    pub status: i64,
}

impl HabitCheckin {
    pub fn from_v2(wire: HabitCheckinWire) -> Self {
        HabitCheckin {
            id: wire.id,
            habit_id: wire.habit_id,
            checkin_stamp: wire.checkin_stamp,
            value: wire.value.unwrap_or(0.0),
            goal: wire.goal.unwrap_or(0.0),
            status: wire.status.unwrap_or(0),
        }
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitWire {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub habit_type: Option<String>,
    #[serde(default)]
    pub goal: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub repeat_rule: Option<String>,
    #[serde(default)]
    pub reminders: Option<Vec<String>>,
    #[serde(default)]
    pub encouragement: Option<String>,
    #[serde(default)]
    pub target_days: Option<i64>,
    #[serde(default)]
    pub current_streak: Option<i64>,
    #[serde(default)]
    pub total_check_ins: Option<i64>,
    /// 0 = active, nonzero = archived
    #[serde(default)]
    pub status: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCheckinWire {
    #[serde(default)]
    pub id: Option<String>,
    pub habit_id: String,
    pub checkin_stamp: i64,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub goal: Option<f64>,
    #[serde(default)]
    pub status: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn habit_conversion() {
        let wire: HabitWire = serde_json::from_value(json!({
            "id": "6863f1a2b4c5d6e7f8091b00",
            "name": "Drink water",
            "type": "Real",
            "goal": 8.0,
            "step": 1.0,
            "unit": "glasses",
            "status": 0,
            "totalCheckIns": 42
        }))
        .unwrap();
        let habit = Habit::from_v2(wire);
        assert_eq!(habit.habit_type, HabitType::Real);
        assert_eq!(habit.goal, 8.0);
        assert!(!habit.archived);
        assert_eq!(habit.total_checkins, 42);
    }

    #[test]
    fn archived_status() {
        let wire: HabitWire =
            serde_json::from_value(json!({"id": "h1", "name": "Old", "status": 1})).unwrap();
        assert!(Habit::from_v2(wire).archived);
    }

    #[test]
    fn checkin_conversion() {
        let wire: HabitCheckinWire = serde_json::from_value(json!({
            "habitId": "h1", "checkinStamp": 20260115, "value": 3.0, "goal": 8.0, "status": 0
        }))
        .unwrap();
        let checkin = HabitCheckin::from_v2(wire);
        assert_eq!(checkin.checkin_stamp, 20260115);
        assert_eq!(checkin.value, 3.0);
    }
}
