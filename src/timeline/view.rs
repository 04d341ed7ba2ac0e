use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

use super::{
    BuildReport, TaskGroups, TimelineFilters, TimelineWindow, analyze, build_with_report, group,
    scale,
};
use crate::config::ViewOptions;
use crate::model::{GanttNode, ProjectRecord, TaskRecord};

/// Everything a renderer needs for one pass over the timeline
#[derive(Debug, Clone, Serialize)]
pub struct TimelineView {
    pub forest: Vec<GanttNode>,
    pub report: BuildReport,
    pub window: TimelineWindow,
    pub critical: HashSet<String>,
    pub groups: TaskGroups,
}

/// Run the builder and derive the window, critical set and groups from one snapshot
pub fn compose(
    projects: &[ProjectRecord],
    tasks: &[TaskRecord],
    filters: &TimelineFilters,
    options: &ViewOptions,
    today: NaiveDate,
) -> TimelineView {
    let (forest, report) = build_with_report(projects, tasks, filters);
    let window = scale(today, options.view_mode);
    let critical = analyze(&forest, options.critical_path);
    let groups = group(&forest, options.group_by);
    TimelineView {
        forest,
        report,
        window,
        critical,
        groups,
    }
}
