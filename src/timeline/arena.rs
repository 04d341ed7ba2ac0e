use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::model::{GanttNode, UpdateOutcome};

/// Flat, id-keyed store of schedule nodes
///
/// Nodes are held without their `children`; the parent -> children index
/// keeps the tree shape. Optimistic updates are a single map lookup and
/// `to_forest` rebuilds the nested view in the original order.
#[derive(Debug, Clone, Default)]
pub struct ScheduleArena {
    nodes: HashMap<String, GanttNode>,
    roots: Vec<String>,
    children: HashMap<String, Vec<String>>,
}

impl ScheduleArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a forest. Later duplicates of an id are dropped.
    pub fn from_forest(forest: Vec<GanttNode>) -> Self {
        let mut arena = Self::new();
        for node in forest {
            if let Some(id) = arena.insert(node) {
                arena.roots.push(id);
            }
        }
        arena
    }

    fn insert(&mut self, mut node: GanttNode) -> Option<String> {
        if self.nodes.contains_key(&node.id) {
            tracing::warn!(id = %node.id, "duplicate node id ignored");
            return None;
        }

        let id = node.id.clone();
        let children = std::mem::take(&mut node.children);
        self.nodes.insert(id.clone(), node);

        let child_ids: Vec<String> = children
            .into_iter()
            .filter_map(|child| self.insert(child))
            .collect();
        if !child_ids.is_empty() {
            self.children.insert(id.clone(), child_ids);
        }
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node with this id, without its children
    pub fn get(&self, id: &str) -> Option<&GanttNode> {
        self.nodes.get(id)
    }

    pub fn root_ids(&self) -> &[String] {
        &self.roots
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn update_progress(&mut self, id: &str, progress: u8) -> UpdateOutcome {
        match self.nodes.get_mut(id) {
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

    pub fn update_dates(
        &mut self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> UpdateOutcome {
        match self.nodes.get_mut(id) {
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

    fn assemble(&self, id: &str) -> Option<GanttNode> {
        let mut node = self.nodes.get(id)?.clone();
        node.children = self
            .children_of(id)
            .iter()
            .filter_map(|child| self.assemble(child))
            .collect();
        Some(node)
    }

    /// Rebuild the nested forest, preserving root and child order
    pub fn to_forest(&self) -> Vec<GanttNode> {
        self.roots.iter().filter_map(|id| self.assemble(id)).collect()
    }
}
