use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, Result};

/// Inclusive range of calendar days.
///
/// A single-day window is valid; the application uses one to compute the
/// balance of "today" without a surrounding grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(CalendarError::InvalidInput(
                "window end must not be before its start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates every day of the window in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// The visible window for a month view: the focused month padded with lead
/// and trail days so every rendered week runs Monday through Sunday.
pub fn month_grid_window(year: i32, month: u32) -> Result<DateWindow> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CalendarError::InvalidInput(format!("invalid month {year}-{month:02}"))
    })?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .unwrap_or(first);
    let lead = first - Duration::days(first.weekday().num_days_from_monday() as i64);
    let trail = last + Duration::days((6 - last.weekday().num_days_from_monday()) as i64);
    DateWindow::new(lead, trail)
}

/// Formats a day as its canonical `YYYY-MM-DD` key.
pub fn date_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` key back into a day.
pub fn parse_date_key(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Midnight UTC of the given calendar day.
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_hms_opt(0, 0, 0).unwrap();
    DateTime::from_naive_utc_and_offset(midnight, Utc)
}

/// Accepts the date encodings seen on the wire: RFC 3339 timestamps,
/// `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` day.
pub fn parse_iso_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
    }
    parse_date_key(trimmed).map(day_start)
}

/// Advances by whole calendar months, clipping the day-of-month to the
/// length of the target month.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_rejects_reversed_bounds() {
        let err = DateWindow::new(day(2024, 2, 1), day(2024, 1, 1));
        assert!(err.is_err());
    }

    #[test]
    fn single_day_window_is_valid() {
        let window = DateWindow::single(day(2024, 1, 5));
        assert!(window.contains(day(2024, 1, 5)));
        assert_eq!(window.days().count(), 1);
    }

    #[test]
    fn add_months_clips_to_month_length() {
        assert_eq!(add_months(day(2024, 1, 31), 1), day(2024, 2, 29));
        assert_eq!(add_months(day(2023, 1, 31), 1), day(2023, 2, 28));
        assert_eq!(add_months(day(2024, 11, 30), 3), day(2025, 2, 28));
        assert_eq!(add_months(day(2024, 3, 31), -1), day(2024, 2, 29));
    }

    #[test]
    fn month_grid_window_runs_monday_through_sunday() {
        // January 2024 starts on a Monday and ends on a Wednesday.
        let window = month_grid_window(2024, 1).unwrap();
        assert_eq!(window.start, day(2024, 1, 1));
        assert_eq!(window.end, day(2024, 2, 4));
        assert_eq!(window.days().count() % 7, 0);

        // June 2024 starts on a Saturday.
        let window = month_grid_window(2024, 6).unwrap();
        assert_eq!(window.start, day(2024, 5, 27));
        assert_eq!(window.end, day(2024, 6, 30));
    }

    #[test]
    fn iso_parsing_accepts_wire_variants() {
        let expected = day_start(day(2024, 1, 5));
        assert_eq!(parse_iso_datetime("2024-01-05T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_iso_datetime("2024-01-05T00:00:00"), Some(expected));
        assert_eq!(parse_iso_datetime("2024-01-05"), Some(expected));
        assert_eq!(parse_iso_datetime("not a date"), None);
    }

    #[test]
    fn date_keys_roundtrip() {
        let original = day(2024, 12, 3);
        assert_eq!(date_key(original), "2024-12-03");
        assert_eq!(parse_date_key("2024-12-03"), Some(original));
        assert_eq!(parse_date_key("2024-13-03"), None);
    }
}
