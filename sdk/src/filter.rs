//! Client-side task filtering
//!
//! The sync payload returns the entire active working set, so all of these
//! predicates run in memory. Predicates are AND-combined; the limit is a
//! plain head-truncation applied after filtering.

use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate};

use crate::constants::TaskPriority;
use crate::models::Task;

/// Filter over a fetched collection of tasks. Pure and stateless.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub project_id: Option<String>,
    pub column_id: Option<String>,
    /// Case-insensitive exact match against any of the task's tags
    pub tag: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_today: bool,
    pub overdue: bool,
    /// Inclusive ISO date bound compared lexicographically (see below)
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub limit: Option<usize>,
}

impl TaskFilter {
    /// Apply against the current instant in the local timezone.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        self.apply_at(tasks, Local::now().fixed_offset())
    }

    /// Apply against an explicit evaluation instant.
    pub fn apply_at(&self, tasks: Vec<Task>, now: DateTime<FixedOffset>) -> Vec<Task> {
        let mut out: Vec<Task> = tasks
            .into_iter()
            .filter(|t| self.matches_at(t, now))
            .collect();
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }

    fn matches_at(&self, task: &Task, now: DateTime<FixedOffset>) -> bool {
        if let Some(ref project_id) = self.project_id {
            if &task.project_id != project_id {
                return false;
            }
        }

        if let Some(ref column_id) = self.column_id {
            if task.column_id.as_deref() != Some(column_id.as_str()) {
                return false;
            }
        }

        if let Some(ref tag) = self.tag {
            if !task.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }

        if self.due_today {
            match task.due_date {
                Some(due) if due.date_naive() == now.date_naive() => {}
                _ => return false,
            }
        }

        if self.overdue {
            match task.due_date {
                Some(due) if due < now && !task.is_completed() => {}
                _ => return false,
            }
        }

        // Date-range bounds compare the ISO date prefix of the creation (or,
        // failing that, modification) time as plain strings. Lexicographic,
        // not calendar, semantics: callers sending unpadded dates get
        // surprising results near month boundaries. Kept as-is on purpose;
        // fixing it would silently change observable filtering.
        if self.from_date.is_some() || self.to_date.is_some() {
            if let Some(stamp) = task_date_prefix(task) {
                if let Some(ref from) = self.from_date {
                    if stamp.as_str() < from.as_str() {
                        return false;
                    }
                }
                if let Some(ref to) = self.to_date {
                    if stamp.as_str() > to.as_str() {
                        return false;
                    }
                }
            }
        }

        true
    }
}

fn task_date_prefix(task: &Task) -> Option<String> {
    let stamp = task.created_time.or(task.modified_time)?;
    Some(stamp.to_rfc3339().chars().take(10).collect())
}

/// `--days N` lookback: the inclusive from-date N days before `today`.
pub fn lookback_from_date(days: u64, today: NaiveDate) -> String {
    today
        .checked_sub_days(Days::new(days))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{TaskKind, TaskStatus};

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            project_id: "p1".to_string(),
            title: format!("task {}", id),
            content: None,
            status: TaskStatus::Active,
            priority: TaskPriority::None,
            kind: TaskKind::Text,
            start_date: None,
            due_date: None,
            time_zone: None,
            tags: Vec::new(),
            parent_id: None,
            column_id: None,
            items: Vec::new(),
            reminders: Vec::new(),
            is_pinned: false,
            created_time: None,
            modified_time: None,
            completed_time: None,
            etag: None,
            sort_order: None,
        }
    }

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn project_and_column_membership() {
        let mut a = task("a");
        a.column_id = Some("col1".to_string());
        let mut b = task("b");
        b.project_id = "p2".to_string();

        let filter = TaskFilter {
            project_id: Some("p1".to_string()),
            ..Default::default()
        };
        let out = filter.apply_at(vec![a.clone(), b], at("2026-01-15T12:00:00Z"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");

        let filter = TaskFilter {
            column_id: Some("col1".to_string()),
            ..Default::default()
        };
        let out = filter.apply_at(vec![a, task("c")], at("2026-01-15T12:00:00Z"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn tag_match_is_case_insensitive() {
        let mut a = task("a");
        a.tags = vec!["Errand".to_string()];
        let filter = TaskFilter {
            tag: Some("errand".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filter
                .apply_at(vec![a, task("b")], at("2026-01-15T12:00:00Z"))
                .len(),
            1
        );
    }

    #[test]
    fn due_today_compares_calendar_dates() {
        let now = at("2026-01-15T22:00:00+00:00");
        let mut today = task("today");
        today.due_date = Some(at("2026-01-15T09:00:00+00:00"));
        let mut tomorrow = task("tomorrow");
        tomorrow.due_date = Some(at("2026-01-16T09:00:00+00:00"));
        let none = task("none");

        let filter = TaskFilter {
            due_today: true,
            ..Default::default()
        };
        let out = filter.apply_at(vec![today, tomorrow, none], now);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "today");
    }

    #[test]
    fn overdue_is_a_strict_instant_compare() {
        let now = at("2026-01-15T12:00:00+00:00");
        let mut past = task("past");
        past.due_date = Some(at("2026-01-15T11:59:00+00:00"));
        let mut future = task("future");
        future.due_date = Some(at("2026-01-15T12:01:00+00:00"));
        let mut done = task("done");
        done.due_date = Some(at("2026-01-01T00:00:00+00:00"));
        done.status = TaskStatus::Completed;

        let filter = TaskFilter {
            overdue: true,
            ..Default::default()
        };
        let out = filter.apply_at(vec![past, future, done], now);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "past");
    }

    #[test]
    fn overdue_respects_due_date_zone() {
        // 09:00+02:00 is 07:00Z, already past at 08:00Z
        let now = at("2026-01-15T08:00:00+00:00");
        let mut zoned = task("zoned");
        zoned.due_date = Some(at("2026-01-15T09:00:00+02:00"));
        let filter = TaskFilter {
            overdue: true,
            ..Default::default()
        };
        assert_eq!(filter.apply_at(vec![zoned], now).len(), 1);
    }

    #[test]
    fn priority_equality_on_the_ordinal_scale() {
        let mut high = task("high");
        high.priority = TaskPriority::High;
        let mut medium = task("medium");
        medium.priority = TaskPriority::Medium;

        let filter = TaskFilter {
            priority: Some(TaskPriority::High),
            ..Default::default()
        };
        let out = filter.apply_at(vec![high, medium], at("2026-01-15T12:00:00Z"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "high");
    }

    #[test]
    fn date_range_is_lexicographic_on_the_iso_prefix() {
        let mut early = task("early");
        early.created_time = Some(at("2026-01-05T10:00:00+00:00"));
        let mut late = task("late");
        late.created_time = Some(at("2026-02-20T10:00:00+00:00"));
        let mut undated = task("undated");
        undated.created_time = None;

        let filter = TaskFilter {
            from_date: Some("2026-01-10".to_string()),
            to_date: Some("2026-03-01".to_string()),
            ..Default::default()
        };
        let out = filter.apply_at(vec![early, late, undated], at("2026-03-15T12:00:00Z"));
        // "early" is below the from bound; undated tasks pass through
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|t| t.id == "late"));
        assert!(out.iter().any(|t| t.id == "undated"));
    }

    #[test]
    fn modified_time_backs_up_created_time() {
        let mut t = task("m");
        t.modified_time = Some(at("2026-01-20T10:00:00+00:00"));
        let filter = TaskFilter {
            from_date: Some("2026-01-15".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply_at(vec![t], at("2026-02-01T12:00:00Z")).len(), 1);
    }

    #[test]
    fn limit_is_head_truncation_applied_last() {
        let mut tasks: Vec<Task> = (0..10).map(|i| task(&format!("t{}", i))).collect();
        tasks[0].project_id = "other".to_string();
        let filter = TaskFilter {
            project_id: Some("p1".to_string()),
            limit: Some(3),
            ..Default::default()
        };
        let out = filter.apply_at(tasks, at("2026-01-15T12:00:00Z"));
        assert_eq!(out.len(), 3);
        // first matching tasks, in input order
        assert_eq!(out[0].id, "t1");
        assert_eq!(out[2].id, "t3");
    }

    #[test]
    fn lookback_maths() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(lookback_from_date(7, today), "2026-01-08");
        assert_eq!(lookback_from_date(0, today), "2026-01-15");
    }
}
