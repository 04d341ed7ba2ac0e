//! Plain-text rendering of timeline artefacts
//!
//! Used by the command-line host; the core itself never formats output.

use std::collections::HashSet;

use crate::model::{CalendarEvent, GanttNode};
use crate::timeline::{BuildReport, TaskGroups, TimelineWindow};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_window(window: &TimelineWindow) -> String {
    format!(
        "Window ({}): {} .. {} ({} days)\n",
        window.unit,
        window.start,
        window.end,
        window.span_days()
    )
}

fn push_node(result: &mut String, node: &GanttNode, depth: usize, critical: &HashSet<String>) {
    let marker = if critical.contains(&node.id) {
        " *critical*"
    } else {
        ""
    };
    result.push_str(&format!(
        "{}- [{}] {} ({}, {} .. {}, {}d, {}%, {}){}\n",
        "  ".repeat(depth),
        node.id,
        node.name,
        node.node_type,
        node.start_date.format(DATE_FORMAT),
        node.end_date.format(DATE_FORMAT),
        node.duration_days,
        node.progress,
        node.status,
        marker
    ));
    for child in &node.children {
        push_node(result, child, depth + 1, critical);
    }
}

/// Indented outline of the forest, marking critical nodes
pub fn format_forest(forest: &[GanttNode], critical: &HashSet<String>) -> String {
    if forest.is_empty() {
        return "No projects found\n".to_string();
    }

    let mut result = format!("Found {} project(s):\n\n", forest.len());
    for node in forest {
        push_node(&mut result, node, 0, critical);
    }
    result
}

pub fn format_groups(groups: &TaskGroups) -> String {
    let mut result = String::new();
    for (label, nodes) in groups {
        result.push_str(&format!("{} ({})\n", label, nodes.len()));
        for node in nodes {
            result.push_str(&format!("  - [{}] {}\n", node.id, node.name));
        }
    }
    result
}

/// One line per dropped-record counter that is non-zero
pub fn format_report(report: &BuildReport) -> String {
    let lines = [
        (report.tasks_without_due_date, "task(s) skipped: no due date"),
        (report.orphaned_tasks, "task(s) skipped: unknown project"),
        (report.tasks_filtered_out, "task(s) hidden by filters"),
        (report.projects_without_dates, "project(s) skipped: no dates"),
    ];
    lines
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, text)| format!("{} {}\n", count, text))
        .collect()
}

pub fn format_events(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No events found\n".to_string();
    }

    let mut result = format!("Found {} event(s):\n\n", events.len());
    for event in events {
        result.push_str(&format!(
            "- [{}] {} at {}",
            event.id,
            event.title,
            event.start_date.format("%Y-%m-%d %H:%M")
        ));
        if let Some(end) = event.end_date {
            result.push_str(&format!(" until {}", end.format("%Y-%m-%d %H:%M")));
        }
        if let Some(rule) = &event.recurring {
            result.push_str(&format!(" (repeats {} every {})", rule.frequency, rule.interval));
        }
        result.push('\n');
    }
    result
}
