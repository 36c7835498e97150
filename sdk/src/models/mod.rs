//! Canonical domain records and per-generation wire converters
//!
//! Each canonical type carries pure `from_v1` / `from_v2` constructors taking
//! the matching wire shape. Conversion never depends on which backend issued
//! the call; the wire structs are explicit so unexpected payloads fail at
//! deserialization instead of at field access.

mod focus;
mod habit;
mod project;
mod tag;
mod task;
mod user;

pub use focus::{FocusDistWire, FocusHeatmapEntry, FocusHeatmapWire, FocusTagStat};
pub use habit::{Habit, HabitCheckin, HabitCheckinWire, HabitWire};
pub use project::{Column, ColumnWire, Project, ProjectGroup, ProjectGroupWire, ProjectV1, ProjectV2};
pub use tag::{Tag, TagWire};
pub use task::{
    ChecklistItem, ChecklistItemV1, ChecklistItemV2, ReminderV2, Task, TaskReminder, TaskV1,
    TaskV2,
};
pub use user::{User, UserProfileWire, UserStatistics, UserStatisticsWire, UserStatus, UserStatusWire};

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Datetime serialization used by the V2 batch endpoints.
pub const V2_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339 as well as the upstream `+0000`-suffixed form and bare
/// naive datetimes (assumed UTC). Returns `None` on anything else: timestamps
/// are advisory fields, ids are not.
pub fn parse_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, V2_DATETIME_FORMAT) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3f") {
        return Some(naive.and_utc().fixed_offset());
    }
    None
}

/// Serialize a timestamp the way the V2 batch endpoints expect it.
pub fn format_v2_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3f+0000").to_string()
}

pub(crate) fn parse_opt_datetime(raw: &Option<String>) -> Option<DateTime<FixedOffset>> {
    raw.as_deref().and_then(parse_datetime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_datetime("2026-01-20T17:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 17);
        assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn parses_v2_offset_form() {
        let dt = parse_datetime("2026-01-20T17:00:00.000+0000").unwrap();
        assert_eq!(dt.hour(), 17);
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn parses_naive_as_utc() {
        let dt = parse_datetime("2026-01-20T17:00:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("not a date").is_none());
    }

    #[test]
    fn v2_serialization_shape() {
        let dt = chrono::DateTime::parse_from_rfc3339("2026-01-20T17:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_v2_datetime(dt), "2026-01-20T17:00:00.000+0000");
    }
}
