use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a recurring event repeats
///
/// Unknown strings are kept as `Unrecognized` instead of failing the whole
/// record, so a bad rule degrades the event to a one-off occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Unrecognized(String),
}

impl From<String> for Frequency {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            "yearly" => Frequency::Yearly,
            _ => Frequency::Unrecognized(raw),
        }
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        frequency.to_string()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => f.write_str("daily"),
            Frequency::Weekly => f.write_str("weekly"),
            Frequency::Monthly => f.write_str("monthly"),
            Frequency::Yearly => f.write_str("yearly"),
            Frequency::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

fn default_interval() -> i64 {
    1
}

/// Recurrence rule attached to a calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Number of frequency units between occurrences; must be positive
    #[serde(default = "default_interval")]
    pub interval: i64,
    /// Last moment an occurrence may start
    #[serde(
        default,
        with = "super::dates::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    /// Total number of occurrences, seed included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, interval: i64) -> Self {
        Self {
            frequency,
            interval,
            end_date: None,
            count: None,
        }
    }

    /// A rule is usable when its interval is positive and its frequency known
    pub fn is_well_formed(&self) -> bool {
        self.interval > 0 && !matches!(self.frequency, Frequency::Unrecognized(_))
    }
}

/// A calendar event as stored by the calendar-event store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(with = "super::dates::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(
        default,
        with = "super::dates::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<RecurrenceRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub all_day: bool,
}

impl CalendarEvent {
    /// A one-off event with no end date and no display extras
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date,
            end_date: None,
            recurring: None,
            description: None,
            location: None,
            color: None,
            all_day: false,
        }
    }
}
