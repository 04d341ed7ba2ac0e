use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ViewMode;

/// Visible date range of the timeline for a view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub unit: ViewMode,
}

impl TimelineWindow {
    /// Length of the window in days, never less than one
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the inclusive range `[start, end]` intersects the window
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }

    /// Fractional position of `at` inside the window (0.0 at start, 1.0 at end).
    ///
    /// Values outside the window fall outside `[0, 1]`; callers clip as needed.
    pub fn position_of(&self, at: DateTime<Utc>) -> f64 {
        let origin = self.start.and_time(chrono::NaiveTime::MIN).and_utc();
        let span_ms = self.span_days() as f64 * 86_400_000.0;
        (at - origin).num_milliseconds() as f64 / span_ms
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

fn month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let month_start = first_of_month(today);
    let start = month_start
        .checked_sub_months(Months::new(3))
        .unwrap_or(month_start);
    let end = month_start
        .checked_add_months(Months::new(4))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    (start, end)
}

/// Compute the visible window for `today` at the given zoom level.
///
/// Only the calendar day matters, so any two calls on the same day agree.
pub fn scale(today: NaiveDate, mode: ViewMode) -> TimelineWindow {
    let (start, end) = match mode {
        ViewMode::Day => (today - Duration::days(7), today + Duration::days(7)),
        ViewMode::Week => (today - Duration::days(28), today + Duration::days(28)),
        ViewMode::Month => month_window(today),
        ViewMode::Quarter => year_bounds(today.year()).unwrap_or_else(|| month_window(today)),
        ViewMode::Year => match (year_bounds(today.year() - 1), year_bounds(today.year() + 2)) {
            (Some((start, _)), Some((_, end))) => (start, end),
            _ => month_window(today),
        },
    };

    TimelineWindow {
        start,
        end,
        unit: mode,
    }
}

/// Same as [`scale`], taking a timestamp and a raw mode name
pub fn scale_at(now: DateTime<Utc>, mode: &str) -> TimelineWindow {
    scale(now.date_naive(), ViewMode::parse_or_default(mode))
}
