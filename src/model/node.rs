use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates::duration_days;

/// Kind of entry on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Project,
    Task,
    Milestone,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeType::Project => "project",
            NodeType::Task => "task",
            NodeType::Milestone => "milestone",
        };
        f.write_str(label)
    }
}

/// Schedule priority of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Lenient conversion used for store records: unknown values become `Medium`
    pub fn from_record(raw: &str) -> Self {
        raw.parse().unwrap_or(Priority::Medium)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: low, medium, high",
                s
            )),
        }
    }
}

/// A derived schedule entry on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttNode {
    pub id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// `max(1, ceil(days between start and end))`
    pub duration_days: i64,
    /// Completion percentage, 0 to 100
    pub progress: u8,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub dependency_ids: Vec<String>,
    pub assignee_ids: Vec<String>,
    pub priority: Priority,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    pub children: Vec<GanttNode>,
}

/// Result of an optimistic in-place update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The node was found and its value changed
    Applied,
    /// The node already held the requested value
    Unchanged,
    /// No node carries the requested id
    NotFound,
}

impl GanttNode {
    pub fn is_project(&self) -> bool {
        self.node_type == NodeType::Project
    }

    /// Set the node's span, keeping `end >= start` and `duration_days` in sync.
    ///
    /// Returns `false` when the node already had exactly this span.
    pub fn set_dates(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let end = end.max(start);
        if self.start_date == start && self.end_date == end {
            return false;
        }
        self.start_date = start;
        self.end_date = end;
        self.duration_days = duration_days(start, end);
        true
    }

    /// Set progress, clamped to 100. Returns `false` when nothing changed.
    pub fn set_progress(&mut self, progress: u8) -> bool {
        let progress = progress.min(100);
        if self.progress == progress {
            return false;
        }
        self.progress = progress;
        true
    }

    /// Depth-first search of this node and its descendants
    pub fn find(&self, id: &str) -> Option<&GanttNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut GanttNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }
}

/// Locate a node by id anywhere in a forest
pub fn find_node<'a>(forest: &'a [GanttNode], id: &str) -> Option<&'a GanttNode> {
    forest.iter().find_map(|node| node.find(id))
}

pub fn find_node_mut<'a>(forest: &'a mut [GanttNode], id: &str) -> Option<&'a mut GanttNode> {
    forest.iter_mut().find_map(|node| node.find_mut(id))
}

/// Optimistically update a node's progress in a nested forest
pub fn update_node_progress(forest: &mut [GanttNode], id: &str, progress: u8) -> UpdateOutcome {
    match find_node_mut(forest, id) {
        Some(node) => {
            if node.set_progress(progress) {
                UpdateOutcome::Applied
            } else {
                UpdateOutcome::Unchanged
            }
        }
        None => UpdateOutcome::NotFound,
    }
}

/// Optimistically update a node's dates in a nested forest
pub fn update_node_dates(
    forest: &mut [GanttNode],
    id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> UpdateOutcome {
    match find_node_mut(forest, id) {
        Some(node) => {
            if node.set_dates(start, end) {
                UpdateOutcome::Applied
            } else {
                UpdateOutcome::Unchanged
            }
        }
        None => UpdateOutcome::NotFound,
    }
}

/// Pre-order walk over every node in the forest
pub fn flatten(forest: &[GanttNode]) -> Vec<&GanttNode> {
    fn walk<'a>(node: &'a GanttNode, out: &mut Vec<&'a GanttNode>) {
        out.push(node);
        for child in &node.children {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    for node in forest {
        walk(node, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn node(id: &str, children: Vec<GanttNode>) -> GanttNode {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        GanttNode {
            id: id.to_string(),
            name: id.to_string(),
            start_date: start,
            end_date: start + Duration::days(2),
            duration_days: 2,
            progress: 0,
            node_type: if children.is_empty() {
                NodeType::Task
            } else {
                NodeType::Project
            },
            parent_id: None,
            dependency_ids: Vec::new(),
            assignee_ids: Vec::new(),
            priority: Priority::Medium,
            status: "todo".to_string(),
            description: None,
            color: "#6b7280".to_string(),
            children,
        }
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::from_record("urgent"), Priority::Medium);
        assert_eq!(Priority::from_record(" low "), Priority::Low);
    }

    #[test]
    fn test_update_progress_finds_children_and_is_idempotent() {
        let mut forest = vec![
            node("p1", vec![node("t1", vec![]), node("t2", vec![])]),
            node("p2", vec![]),
        ];

        assert_eq!(update_node_progress(&mut forest, "t2", 40), UpdateOutcome::Applied);
        assert_eq!(update_node_progress(&mut forest, "t2", 40), UpdateOutcome::Unchanged);
        assert_eq!(find_node(&forest, "t2").unwrap().progress, 40);
        assert_eq!(update_node_progress(&mut forest, "p2", 250), UpdateOutcome::Applied);
        assert_eq!(find_node(&forest, "p2").unwrap().progress, 100);
        assert_eq!(update_node_progress(&mut forest, "missing", 10), UpdateOutcome::NotFound);
    }

    #[test]
    fn test_update_dates_recomputes_duration_and_clamps() {
        let mut forest = vec![node("p1", vec![node("t1", vec![])])];
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        assert_eq!(
            update_node_dates(&mut forest, "t1", start, start + Duration::hours(30)),
            UpdateOutcome::Applied
        );
        assert_eq!(find_node(&forest, "t1").unwrap().duration_days, 2);

        // End before start collapses onto start
        update_node_dates(&mut forest, "t1", start, start - Duration::days(5));
        let t1 = find_node(&forest, "t1").unwrap();
        assert_eq!(t1.end_date, start);
        assert_eq!(t1.duration_days, 1);
        assert_eq!(update_node_dates(&mut forest, "t1", start, start), UpdateOutcome::Unchanged);
    }

    #[test]
    fn test_flatten_is_preorder() {
        let forest = vec![
            node("p1", vec![node("t1", vec![]), node("t2", vec![])]),
            node("p2", vec![]),
        ];
        let ids: Vec<&str> = flatten(&forest).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "t1", "t2", "p2"]);
    }
}
