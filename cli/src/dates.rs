//! Natural-language due dates
//!
//! `today`, `tomorrow`, `yesterday`, `in N days/weeks`, `next <weekday>`,
//! and `YYYY-MM-DD` passthrough. Anything else passes through untouched for
//! the upstream API to accept or reject.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Resolve a natural-language date against today's local date.
pub fn parse_natural_date(input: &str) -> String {
    parse_natural_date_at(input, Local::now().date_naive())
}

/// Resolve against an explicit reference date.
pub fn parse_natural_date_at(input: &str, today: NaiveDate) -> String {
    let text = input.trim().to_lowercase();

    // YYYY-MM-DD (optionally with a time suffix): keep the date part
    if is_iso_date_prefix(&text) {
        return text[..10].to_string();
    }

    match text.as_str() {
        "today" => return fmt(today),
        "tomorrow" => return fmt(today + Days::new(1)),
        "yesterday" => return fmt(today - Days::new(1)),
        _ => {}
    }

    if let Some(days) = parse_in_n(&text) {
        return fmt(today + Days::new(days));
    }

    if let Some(weekday) = parse_next_weekday(&text) {
        let current = today.weekday().num_days_from_monday() as i64;
        let target = weekday.num_days_from_monday() as i64;
        let mut ahead = target - current;
        if ahead <= 0 {
            ahead += 7;
        }
        return fmt(today + Days::new(ahead as u64));
    }

    input.to_string()
}

fn fmt(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn is_iso_date_prefix(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
}

/// `in N days` / `in N weeks`
fn parse_in_n(text: &str) -> Option<u64> {
    let rest = text.strip_prefix("in ")?;
    let mut parts = rest.split_whitespace();
    let n: u64 = parts.next()?.parse().ok()?;
    let unit = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    match unit {
        "day" | "days" => Some(n),
        "week" | "weeks" => Some(n * 7),
        _ => None,
    }
}

/// `next monday` .. `next sunday`
fn parse_next_weekday(text: &str) -> Option<Weekday> {
    let day = text.strip_prefix("next ")?;
    match day.trim() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wednesday() -> NaiveDate {
        // 2026-01-14 is a Wednesday
        NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()
    }

    #[test]
    fn keywords() {
        assert_eq!(parse_natural_date_at("today", wednesday()), "2026-01-14");
        assert_eq!(parse_natural_date_at("Tomorrow", wednesday()), "2026-01-15");
        assert_eq!(parse_natural_date_at("yesterday", wednesday()), "2026-01-13");
    }

    #[test]
    fn iso_passthrough_keeps_date_part() {
        assert_eq!(
            parse_natural_date_at("2026-03-01", wednesday()),
            "2026-03-01"
        );
        assert_eq!(
            parse_natural_date_at("2026-03-01T17:00:00", wednesday()),
            "2026-03-01"
        );
    }

    #[test]
    fn in_n_units() {
        assert_eq!(parse_natural_date_at("in 3 days", wednesday()), "2026-01-17");
        assert_eq!(parse_natural_date_at("in 1 day", wednesday()), "2026-01-15");
        assert_eq!(
            parse_natural_date_at("in 2 weeks", wednesday()),
            "2026-01-28"
        );
    }

    #[test]
    fn next_weekday_always_lands_in_the_future() {
        // next wednesday from a Wednesday is a week out, not today
        assert_eq!(
            parse_natural_date_at("next wednesday", wednesday()),
            "2026-01-21"
        );
        assert_eq!(
            parse_natural_date_at("next friday", wednesday()),
            "2026-01-16"
        );
        assert_eq!(
            parse_natural_date_at("next monday", wednesday()),
            "2026-01-19"
        );
    }

    #[test]
    fn unknown_strings_pass_through() {
        assert_eq!(
            parse_natural_date_at("someday soon", wednesday()),
            "someday soon"
        );
        assert_eq!(parse_natural_date_at("in a bit", wednesday()), "in a bit");
    }
}
