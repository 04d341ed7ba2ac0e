//! View configuration passed by value into the timeline functions
//!
//! Nothing in the core reads ambient settings. Callers build a `ViewOptions`
//! (from the snapshot's `[view]` table, from command-line flags, or by hand)
//! and hand it to each computation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Zoom level of the timeline, which also names the window's unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl ViewMode {
    /// Parse a mode name, falling back to `Month` for anything unknown
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
            ViewMode::Quarter => "quarter",
            ViewMode::Year => "year",
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            "quarter" => Ok(ViewMode::Quarter),
            "year" => Ok(ViewMode::Year),
            _ => Err(format!(
                "Invalid view mode '{}'. Valid options are: day, week, month, quarter, year",
                s
            )),
        }
    }
}

impl From<String> for ViewMode {
    fn from(raw: String) -> Self {
        ViewMode::parse_or_default(&raw)
    }
}

impl From<ViewMode> for String {
    fn from(mode: ViewMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key used to bucket timeline nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    None,
    Project,
    Assignee,
    Priority,
    Status,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(GroupBy::None),
            "project" => Ok(GroupBy::Project),
            "assignee" => Ok(GroupBy::Assignee),
            "priority" => Ok(GroupBy::Priority),
            "status" => Ok(GroupBy::Status),
            _ => Err(format!(
                "Invalid group-by '{}'. Valid options are: none, project, assignee, priority, status",
                s
            )),
        }
    }
}

/// How critical nodes are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriticalPathMode {
    /// No highlighting
    Disabled,
    /// Longest direct child of each project
    #[default]
    LongestChild,
    /// Zero-slack nodes of the task dependency graph
    Dependency,
}

impl FromStr for CriticalPathMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" => Ok(CriticalPathMode::Disabled),
            "longest-child" => Ok(CriticalPathMode::LongestChild),
            "dependency" => Ok(CriticalPathMode::Dependency),
            _ => Err(format!(
                "Invalid critical path mode '{}'. Valid options are: disabled, longest-child, dependency",
                s
            )),
        }
    }
}

fn default_horizon_days() -> i64 {
    90
}

/// Immutable view options for one rendering of the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub view_mode: ViewMode,
    pub group_by: GroupBy,
    pub critical_path: CriticalPathMode,
    /// How far past "today" recurring events are expanded
    #[serde(default = "default_horizon_days")]
    pub recurrence_horizon_days: i64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            group_by: GroupBy::default(),
            critical_path: CriticalPathMode::default(),
            recurrence_horizon_days: default_horizon_days(),
        }
    }
}

impl ViewOptions {
    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_critical_path(mut self, critical_path: CriticalPathMode) -> Self {
        self.critical_path = critical_path;
        self
    }
}
