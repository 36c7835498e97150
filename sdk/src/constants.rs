//! Enums shared across the domain model and both API generations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task status as stored upstream.
///
/// The wire value 1 is also emitted for completed tasks by some endpoints;
/// both 1 and 2 map to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Completed,
    Abandoned,
}

impl TaskStatus {
    pub fn from_wire(code: i64) -> Option<Self> {
        match code {
            0 => Some(TaskStatus::Active),
            1 | 2 => Some(TaskStatus::Completed),
            -1 => Some(TaskStatus::Abandoned),
            _ => None,
        }
    }

    pub fn to_wire(self) -> i64 {
        match self {
            TaskStatus::Active => 0,
            TaskStatus::Completed => 2,
            TaskStatus::Abandoned => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
            TaskStatus::Abandoned => "abandoned",
        }
    }
}

/// Task priority. Ordinal, non-contiguous values preserved from upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    None,
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn from_wire(code: i64) -> Self {
        match code {
            5 => TaskPriority::High,
            3 => TaskPriority::Medium,
            1 => TaskPriority::Low,
            _ => TaskPriority::None,
        }
    }

    pub fn to_wire(self) -> i64 {
        match self {
            TaskPriority::None => 0,
            TaskPriority::Low => 1,
            TaskPriority::Medium => 3,
            TaskPriority::High => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::None => "None",
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

/// Error type for parsing TaskPriority from string
#[derive(Debug, Clone)]
pub struct ParsePriorityError(String);

impl fmt::Display for ParsePriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid priority: {}", self.0)
    }
}

impl std::error::Error for ParsePriorityError {}

impl FromStr for TaskPriority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(TaskPriority::None),
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// Task kind. Unknown wire values pass through as `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskKind {
    Text,
    Checklist,
    Note,
}

impl TaskKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "CHECKLIST" => TaskKind::Checklist,
            "NOTE" => TaskKind::Note,
            _ => TaskKind::Text,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            TaskKind::Text => "TEXT",
            TaskKind::Checklist => "CHECKLIST",
            TaskKind::Note => "NOTE",
        }
    }
}

/// Project kind: task list vs note list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectKind {
    Task,
    Note,
}

impl ProjectKind {
    pub fn from_wire(s: &str) -> Self {
        if s == "NOTE" {
            ProjectKind::Note
        } else {
            ProjectKind::Task
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            ProjectKind::Task => "TASK",
            ProjectKind::Note => "NOTE",
        }
    }
}

/// Project view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Kanban,
    Timeline,
}

impl ViewMode {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "kanban" => ViewMode::Kanban,
            "timeline" => ViewMode::Timeline,
            _ => ViewMode::List,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Kanban => "kanban",
            ViewMode::Timeline => "timeline",
        }
    }
}

/// Habit goal type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitType {
    Boolean,
    Real,
}

impl HabitType {
    pub fn from_wire(s: &str) -> Self {
        if s == "Real" {
            HabitType::Real
        } else {
            HabitType::Boolean
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            HabitType::Boolean => "Boolean",
            HabitType::Real => "Real",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_roundtrip() {
        assert_eq!(TaskStatus::from_wire(0), Some(TaskStatus::Active));
        assert_eq!(TaskStatus::from_wire(1), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_wire(2), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_wire(-1), Some(TaskStatus::Abandoned));
        assert_eq!(TaskStatus::from_wire(7), None);
        assert_eq!(TaskStatus::Completed.to_wire(), 2);
    }

    #[test]
    fn priority_ordinal_scale() {
        assert_eq!(TaskPriority::from_wire(5), TaskPriority::High);
        assert_eq!(TaskPriority::from_wire(3), TaskPriority::Medium);
        assert_eq!(TaskPriority::from_wire(1), TaskPriority::Low);
        // Unknown ordinals collapse to None
        assert_eq!(TaskPriority::from_wire(2), TaskPriority::None);
        assert_eq!(TaskPriority::High.to_wire(), 5);
        assert!(TaskPriority::High > TaskPriority::Medium);
    }

    #[test]
    fn priority_from_str() {
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn kind_passthrough() {
        assert_eq!(TaskKind::from_wire("CHECKLIST"), TaskKind::Checklist);
        assert_eq!(TaskKind::from_wire("SOMETHING_NEW"), TaskKind::Text);
    }
}
