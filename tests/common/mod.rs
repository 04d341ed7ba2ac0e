//! Common fixtures for integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use timeline_core::{CalendarEvent, Frequency, ProjectRecord, RecurrenceRule, TaskRecord};

/// Midnight UTC on the given day
pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Create a project with a creation and due date
pub fn create_project(id: &str, created_at: &str, due_date: Option<&str>) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        name: format!("Project {}", id),
        status: "active".to_string(),
        created_at: Some(created_at.to_string()),
        due_date: due_date.map(str::to_string),
        ..Default::default()
    }
}

/// Create a task belonging to `project_id`
pub fn create_task(
    id: &str,
    project_id: &str,
    created_at: &str,
    due_date: Option<&str>,
) -> TaskRecord {
    TaskRecord {
        id: id.to_string(),
        project_id: Some(project_id.to_string()),
        title: format!("Task {}", id),
        status: "todo".to_string(),
        priority: "medium".to_string(),
        created_at: Some(created_at.to_string()),
        due_date: due_date.map(str::to_string),
        ..Default::default()
    }
}

/// Create a recurring event starting at midnight UTC on `start`
pub fn create_recurring_event(
    id: &str,
    start: DateTime<Utc>,
    frequency: Frequency,
    interval: i64,
) -> CalendarEvent {
    let mut event = CalendarEvent::new(id, format!("Event {}", id), start);
    event.recurring = Some(RecurrenceRule::new(frequency, interval));
    event
}
