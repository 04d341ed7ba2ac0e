//! Critical-path highlighting
//!
//! The default rule is a visual cue, not a scheduling computation: the
//! longest direct child of each project is marked. The `Dependency` mode
//! runs a forward/backward pass over the task dependency graph and marks
//! every zero-slack node.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::CriticalPathMode;
use crate::model::{GanttNode, flatten};

/// Select critical node ids according to `mode`
pub fn analyze(forest: &[GanttNode], mode: CriticalPathMode) -> HashSet<String> {
    match mode {
        CriticalPathMode::Disabled => HashSet::new(),
        CriticalPathMode::LongestChild => longest_child_per_project(forest),
        CriticalPathMode::Dependency => zero_slack_nodes(forest),
    }
}

/// For each project, the direct child with the largest duration (first wins ties)
pub fn longest_child_per_project(forest: &[GanttNode]) -> HashSet<String> {
    forest
        .iter()
        .filter(|node| node.is_project())
        .filter_map(|project| {
            project
                .children
                .iter()
                .fold(None, |best: Option<&GanttNode>, child| match best {
                    Some(current) if current.duration_days >= child.duration_days => Some(current),
                    _ => Some(child),
                })
        })
        .map(|child| child.id.clone())
        .collect()
}

/// Classic critical-path method over the non-project nodes.
///
/// Edges come from `dependency_ids`; references to unknown ids are ignored.
/// A cyclic graph has no meaningful critical path and yields an empty set.
pub fn zero_slack_nodes(forest: &[GanttNode]) -> HashSet<String> {
    let nodes: Vec<&GanttNode> = flatten(forest)
        .into_iter()
        .filter(|node| !node.is_project())
        .collect();
    if nodes.is_empty() {
        return HashSet::new();
    }

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        for dep in &node.dependency_ids {
            if let Some(&p) = index.get(dep.as_str())
                && p != i
                && !predecessors[i].contains(&p)
            {
                predecessors[i].push(p);
                successors[p].push(i);
            }
        }
    }

    // Kahn's algorithm, seeded in input order so results are deterministic
    let mut in_degree: Vec<usize> = predecessors.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());
    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &s in &successors[i] {
            in_degree[s] -= 1;
            if in_degree[s] == 0 {
                queue.push_back(s);
            }
        }
    }
    if order.len() != nodes.len() {
        tracing::warn!(
            nodes = nodes.len(),
            ordered = order.len(),
            "dependency graph contains a cycle; no critical path computed"
        );
        return HashSet::new();
    }

    let duration: Vec<i64> = nodes.iter().map(|node| node.duration_days).collect();

    let mut earliest_finish = vec![0i64; nodes.len()];
    for &i in &order {
        let earliest_start = predecessors[i]
            .iter()
            .map(|&p| earliest_finish[p])
            .max()
            .unwrap_or(0);
        earliest_finish[i] = earliest_start + duration[i];
    }
    let project_finish = earliest_finish.iter().copied().max().unwrap_or(0);

    let mut latest_start = vec![0i64; nodes.len()];
    for &i in order.iter().rev() {
        let latest_finish = successors[i]
            .iter()
            .map(|&s| latest_start[s])
            .min()
            .unwrap_or(project_finish);
        latest_start[i] = latest_finish - duration[i];
    }

    order
        .iter()
        .filter(|&&i| latest_start[i] == earliest_finish[i] - duration[i])
        .map(|&i| nodes[i].id.clone())
        .collect()
}
