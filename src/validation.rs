//! Parsing of user-supplied option strings
//!
//! The core accepts typed values only; this module turns command-line text
//! into those values with messages that list the accepted choices.

use chrono::NaiveDate;

use crate::config::{CriticalPathMode, GroupBy, ViewMode};
use crate::error::{Result, TimelineError};
use crate::model::{Priority, parse_timestamp};

/// Parse a date argument (YYYY-MM-DD or RFC 3339)
///
/// # Examples
/// ```
/// # use timeline_core::validation::parse_date_arg;
/// let date = parse_date_arg("2025-03-15").unwrap();
/// assert_eq!(date.to_string(), "2025-03-15");
/// ```
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    parse_timestamp(raw)
        .map(|timestamp| timestamp.date_naive())
        .ok_or_else(|| TimelineError::InvalidDate(raw.to_string()))
}

/// Parse a view mode strictly; unlike the core, typos are reported
pub fn parse_view_mode(raw: &str) -> Result<ViewMode> {
    raw.parse().map_err(|_| TimelineError::InvalidOption {
        kind: "view mode",
        value: raw.to_string(),
        expected: "day, week, month, quarter, year",
    })
}

pub fn parse_group_by(raw: &str) -> Result<GroupBy> {
    raw.parse().map_err(|_| TimelineError::InvalidOption {
        kind: "group-by",
        value: raw.to_string(),
        expected: "none, project, assignee, priority, status",
    })
}

pub fn parse_critical_path_mode(raw: &str) -> Result<CriticalPathMode> {
    raw.parse().map_err(|_| TimelineError::InvalidOption {
        kind: "critical path mode",
        value: raw.to_string(),
        expected: "disabled, longest-child, dependency",
    })
}

/// Parse a comma-separated priority list such as "high,medium"
pub fn parse_priority_list(raw: &str) -> Result<Vec<Priority>> {
    split_list(raw)
        .into_iter()
        .map(|item| {
            item.parse().map_err(|_| TimelineError::InvalidOption {
                kind: "priority",
                value: item,
                expected: "low, medium, high",
            })
        })
        .collect()
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
