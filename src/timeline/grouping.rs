use indexmap::IndexMap;
use std::collections::HashMap;

use crate::config::GroupBy;
use crate::model::GanttNode;

pub const ALL_TASKS_LABEL: &str = "All Tasks";
pub const UNKNOWN_PROJECT_LABEL: &str = "Unknown Project";
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Buckets keyed by label, in first-seen order
pub type TaskGroups = IndexMap<String, Vec<GanttNode>>;

/// Collect `project id -> project name` for every project node reachable from `nodes`
fn project_names(nodes: &[GanttNode]) -> HashMap<&str, &str> {
    let mut names = HashMap::new();
    let mut stack: Vec<&GanttNode> = nodes.iter().collect();
    while let Some(node) = stack.pop() {
        if node.is_project() {
            names.insert(node.id.as_str(), node.name.as_str());
        }
        stack.extend(node.children.iter());
    }
    names
}

/// Partition nodes into labelled buckets.
///
/// With `GroupBy::Project`, a project node is labelled with its own name and
/// any other node with the name of its parent project, provided that project
/// is among the inputs (directly or as an ancestor). Nodes whose parent
/// cannot be resolved go under "Unknown Project".
pub fn group(nodes: &[GanttNode], group_by: GroupBy) -> TaskGroups {
    let mut groups = TaskGroups::new();

    if group_by == GroupBy::None {
        groups.insert(ALL_TASKS_LABEL.to_string(), nodes.to_vec());
        return groups;
    }

    let names = if group_by == GroupBy::Project {
        project_names(nodes)
    } else {
        HashMap::new()
    };

    for node in nodes {
        let label = match group_by {
            GroupBy::None => ALL_TASKS_LABEL.to_string(),
            GroupBy::Project if node.is_project() => node.name.clone(),
            GroupBy::Project => node
                .parent_id
                .as_deref()
                .and_then(|parent| names.get(parent))
                .map(|name| name.to_string())
                .unwrap_or_else(|| UNKNOWN_PROJECT_LABEL.to_string()),
            GroupBy::Assignee => node
                .assignee_ids
                .first()
                .cloned()
                .unwrap_or_else(|| UNASSIGNED_LABEL.to_string()),
            GroupBy::Priority => node.priority.to_string(),
            GroupBy::Status => node.status.clone(),
        };
        groups.entry(label).or_default().push(node.clone());
    }

    groups
}
