use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::parse_optional;

/// A project as returned by the project/task store
///
/// Dates are kept as the raw strings the store produced. They are parsed
/// lazily and an unparseable value is treated the same as a missing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Status string (e.g., "active", "on-hold", "completed")
    pub status: String,
    /// Optional due date (RFC 3339 or YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Creation timestamp (RFC 3339 or YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Stored progress percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Member user ids
    pub members: Vec<String>,
}

impl ProjectRecord {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.created_at.as_deref())
    }

    pub fn due(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.due_date.as_deref())
    }
}

/// A task as returned by the project/task store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    /// Unique identifier
    pub id: String,
    /// Optional parent project ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Title describing the task
    pub title: String,
    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Status string (e.g., "todo", "in-progress", "done")
    pub status: String,
    /// Priority string ("low", "medium", "high")
    pub priority: String,
    /// Optional assignee user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Optional due date; tasks without one never reach the timeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Explicit progress percentage, overriding the status-derived value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// IDs of tasks that must finish before this one starts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependency_ids: Vec<String>,
    /// Render as a milestone instead of a bar
    pub milestone: bool,
}

impl TaskRecord {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.created_at.as_deref())
    }

    pub fn due(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.due_date.as_deref())
    }

    /// Start and end of the task bar, if the task has a usable due date.
    ///
    /// The bar starts at creation. A missing creation date, or one after the
    /// due date, collapses the bar onto the due date.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let due = self.due()?;
        let start = match self.created() {
            Some(created) if created <= due => created,
            _ => due,
        };
        Some((start, due))
    }
}

/// A record from the project/task store, before conversion into a schedule node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkItem {
    Project(ProjectRecord),
    Task(TaskRecord),
}

impl WorkItem {
    /// Split a mixed record list into projects and tasks, preserving order
    pub fn partition(
        items: impl IntoIterator<Item = WorkItem>,
    ) -> (Vec<ProjectRecord>, Vec<TaskRecord>) {
        let mut projects = Vec::new();
        let mut tasks = Vec::new();
        for item in items {
            match item {
                WorkItem::Project(project) => projects.push(project),
                WorkItem::Task(task) => tasks.push(task),
            }
        }
        (projects, tasks)
    }
}
