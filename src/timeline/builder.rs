//! Conversion of project and task records into the Gantt forest

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::model::{
    GanttNode, NodeType, Priority, ProjectRecord, TaskRecord, WorkItem, duration_days,
};

const DEFAULT_COLOR: &str = "#6b7280";

/// A task with a usable due date, paired with its bar span
type DatedTask<'a> = (&'a TaskRecord, DateTime<Utc>, DateTime<Utc>);

const PROJECT_STATUS_COLORS: &[(&str, &str)] = &[
    ("planning", "#8b5cf6"),
    ("active", "#3b82f6"),
    ("on-hold", "#f59e0b"),
    ("completed", "#10b981"),
    ("cancelled", "#ef4444"),
];

const TASK_STATUS_COLORS: &[(&str, &str)] = &[
    ("done", "#10b981"),
    ("in-progress", "#3b82f6"),
    ("blocked", "#ef4444"),
];

const TASK_PRIORITY_COLORS: &[(&str, &str)] = &[
    ("high", "#f97316"),
    ("medium", "#eab308"),
    ("low", "#94a3b8"),
];

/// Inclusive calendar range used by the `date_range` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `[start, end]` shares at least one calendar day with the range
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start.date_naive() <= self.end && end.date_naive() >= self.start
    }
}

/// Filters applied while building the forest
///
/// Empty lists mean "no filter". Each list matches any of its values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineFilters {
    /// Keep only these projects
    pub project_ids: Vec<String>,
    /// Keep only tasks assigned to one of these users
    pub assignees: Vec<String>,
    /// Keep only tasks with one of these priorities
    pub priority: Vec<Priority>,
    /// Keep only tasks with one of these status strings
    pub status: Vec<String>,
    /// Keep only projects and tasks overlapping this range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl TimelineFilters {
    fn admits_project(
        &self,
        project: &ProjectRecord,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        if !self.project_ids.is_empty() && !self.project_ids.contains(&project.id) {
            return false;
        }
        self.date_range.is_none_or(|range| range.overlaps(start, end))
    }

    fn admits_task(&self, task: &TaskRecord, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if !self.assignees.is_empty()
            && !task
                .assignee_id
                .as_ref()
                .is_some_and(|assignee| self.assignees.contains(assignee))
        {
            return false;
        }
        if !self.priority.is_empty()
            && !self.priority.contains(&Priority::from_record(&task.priority))
        {
            return false;
        }
        if !self.status.is_empty() && !self.status.contains(&task.status) {
            return false;
        }
        self.date_range.is_none_or(|range| range.overlaps(start, end))
    }
}

/// Counts of records that did not make it into the forest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub projects_emitted: usize,
    pub tasks_emitted: usize,
    /// Tasks without a usable due date
    pub tasks_without_due_date: usize,
    /// Dated tasks whose project is missing or unknown
    pub orphaned_tasks: usize,
    /// Dated tasks rejected by a filter, directly or with their project
    pub tasks_filtered_out: usize,
    /// Projects from which no dates could be derived
    pub projects_without_dates: usize,
}

fn status_key(status: &str) -> String {
    status.trim().to_ascii_lowercase().replace('_', "-")
}

fn lookup_color(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, color)| *color)
}

fn project_color(status: &str) -> String {
    lookup_color(PROJECT_STATUS_COLORS, &status_key(status))
        .unwrap_or(DEFAULT_COLOR)
        .to_string()
}

fn task_color(status: &str, priority: &str) -> String {
    lookup_color(TASK_STATUS_COLORS, &status_key(status))
        .or_else(|| lookup_color(TASK_PRIORITY_COLORS, &priority.trim().to_ascii_lowercase()))
        .unwrap_or(DEFAULT_COLOR)
        .to_string()
}

fn clamp_progress(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

fn task_progress(task: &TaskRecord) -> u8 {
    match task.progress {
        Some(value) if value.is_finite() => clamp_progress(value),
        _ => match status_key(&task.status).as_str() {
            "done" => 100,
            "in-progress" => 50,
            _ => 0,
        },
    }
}

/// Derive a project's span from its dated tasks, falling back to its own dates
fn project_span(
    project: &ProjectRecord,
    dated: &[DatedTask<'_>],
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let init: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    let from_tasks = dated.iter().fold(init, |acc, &(_, start, end)| {
        Some(match acc {
            Some((lo, hi)) => (lo.min(start), hi.max(end)),
            None => (start, end),
        })
    });
    if from_tasks.is_some() {
        return from_tasks;
    }

    match (project.created(), project.due()) {
        (Some(created), Some(due)) => Some((created.min(due), due.max(created))),
        (Some(only), None) | (None, Some(only)) => Some((only, only)),
        (None, None) => None,
    }
}

fn task_node(
    task: &TaskRecord,
    project_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> GanttNode {
    GanttNode {
        id: task.id.clone(),
        name: task.title.clone(),
        start_date: start,
        end_date: end,
        duration_days: duration_days(start, end),
        progress: task_progress(task),
        node_type: if task.milestone {
            NodeType::Milestone
        } else {
            NodeType::Task
        },
        parent_id: Some(project_id.to_string()),
        dependency_ids: task.dependency_ids.clone(),
        assignee_ids: task.assignee_id.iter().cloned().collect(),
        priority: Priority::from_record(&task.priority),
        status: task.status.clone(),
        description: task.description.clone(),
        color: task_color(&task.status, &task.priority),
        children: Vec::new(),
    }
}

/// Build the forest and report what was dropped along the way.
///
/// Projects keep input order and children keep task scan order. A project
/// that passes the project-level filters is emitted even when every one of
/// its tasks is filtered out.
pub fn build_with_report(
    projects: &[ProjectRecord],
    tasks: &[TaskRecord],
    filters: &TimelineFilters,
) -> (Vec<GanttNode>, BuildReport) {
    let mut report = BuildReport::default();
    let known_projects: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();

    let mut dated_by_project: HashMap<&str, Vec<DatedTask<'_>>> = HashMap::new();
    for task in tasks {
        let Some((start, end)) = task.span() else {
            report.tasks_without_due_date += 1;
            continue;
        };
        match task.project_id.as_deref() {
            Some(project_id) if known_projects.contains(project_id) => {
                dated_by_project
                    .entry(project_id)
                    .or_default()
                    .push((task, start, end));
            }
            _ => report.orphaned_tasks += 1,
        }
    }

    let mut forest = Vec::new();
    for project in projects {
        let dated = dated_by_project
            .get(project.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let Some((start, end)) = project_span(project, dated) else {
            tracing::debug!(project = %project.id, "skipping project with no derivable dates");
            report.projects_without_dates += 1;
            continue;
        };

        if !filters.admits_project(project, start, end) {
            report.tasks_filtered_out += dated.len();
            continue;
        }

        let mut children = Vec::with_capacity(dated.len());
        for (task, task_start, task_end) in dated {
            if filters.admits_task(task, *task_start, *task_end) {
                children.push(task_node(task, &project.id, *task_start, *task_end));
            } else {
                report.tasks_filtered_out += 1;
            }
        }
        report.tasks_emitted += children.len();
        report.projects_emitted += 1;

        forest.push(GanttNode {
            id: project.id.clone(),
            name: project.name.clone(),
            start_date: start,
            end_date: end,
            duration_days: duration_days(start, end),
            progress: clamp_progress(project.progress.unwrap_or(0.0)),
            node_type: NodeType::Project,
            parent_id: None,
            dependency_ids: Vec::new(),
            assignee_ids: project.members.clone(),
            priority: Priority::Medium,
            status: project.status.clone(),
            description: project.description.clone(),
            color: project_color(&project.status),
            children,
        });
    }

    tracing::debug!(
        projects = report.projects_emitted,
        tasks = report.tasks_emitted,
        without_due_date = report.tasks_without_due_date,
        orphaned = report.orphaned_tasks,
        filtered = report.tasks_filtered_out,
        undated_projects = report.projects_without_dates,
        "built gantt forest"
    );

    (forest, report)
}

/// Build the forest from project and task records
pub fn build(
    projects: &[ProjectRecord],
    tasks: &[TaskRecord],
    filters: &TimelineFilters,
) -> Vec<GanttNode> {
    build_with_report(projects, tasks, filters).0
}

/// Build the forest from a mixed list of work items
pub fn build_from_items(
    items: impl IntoIterator<Item = WorkItem>,
    filters: &TimelineFilters,
) -> (Vec<GanttNode>, BuildReport) {
    let (projects, tasks) = WorkItem::partition(items);
    build_with_report(&projects, &tasks, filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: &str, priority: &str) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            status: status.to_string(),
            priority: priority.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_task_progress_from_status() {
        assert_eq!(task_progress(&task("a", "done", "low")), 100);
        assert_eq!(task_progress(&task("a", "in-progress", "low")), 50);
        assert_eq!(task_progress(&task("a", "in_progress", "low")), 50);
        assert_eq!(task_progress(&task("a", "todo", "low")), 0);

        let explicit = TaskRecord {
            progress: Some(37.6),
            ..task("a", "done", "low")
        };
        assert_eq!(task_progress(&explicit), 38);
        let overflow = TaskRecord {
            progress: Some(180.0),
            ..task("a", "todo", "low")
        };
        assert_eq!(task_progress(&overflow), 100);
    }

    #[test]
    fn test_color_lookup_prefers_status_then_priority() {
        assert_eq!(task_color("done", "high"), "#10b981");
        assert_eq!(task_color("todo", "high"), "#f97316");
        assert_eq!(task_color("todo", "whenever"), DEFAULT_COLOR);
        assert_eq!(project_color("Active"), "#3b82f6");
        assert_eq!(project_color("archived"), DEFAULT_COLOR);
    }

    #[test]
    fn test_project_span_fallbacks() {
        let mut project = ProjectRecord {
            id: "p".to_string(),
            created_at: Some("2024-01-01".to_string()),
            due_date: Some("not a date".to_string()),
            ..Default::default()
        };
        let (start, end) = project_span(&project, &[]).unwrap();
        assert_eq!(start, end);

        project.created_at = None;
        assert!(project_span(&project, &[]).is_none());
    }

    #[test]
    fn test_date_range_overlap_is_inclusive() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        );
        let jan31 = crate::model::parse_timestamp("2024-01-31T23:00:00Z").unwrap();
        let feb1 = crate::model::parse_timestamp("2024-02-01").unwrap();
        let mar1 = crate::model::parse_timestamp("2024-03-01").unwrap();
        assert!(range.overlaps(jan31, feb1));
        assert!(!range.overlaps(jan31, jan31));
        assert!(!range.overlaps(mar1, mar1));
    }
}
