//! Timeline engine
//!
//! This module turns store records into the Gantt view model and derives the
//! display artefacts from it:
//! - `builder`: records -> two-level forest of schedule nodes, with filters
//! - `critical_path`: ids of nodes to highlight
//! - `grouping`: labelled buckets for the side panel
//! - `scale`: visible date window per zoom level
//! - `arena`: flat node store backing optimistic updates
//! - `generation`: ordering of concurrent rebuilds
//! - `view`: one-call composition of the above for a renderer

mod arena;
mod builder;
mod critical_path;
mod generation;
mod grouping;
mod scale;
mod view;

pub use arena::ScheduleArena;
pub use builder::{
    BuildReport, DateRange, TimelineFilters, build, build_from_items, build_with_report,
};
pub use critical_path::{analyze, longest_child_per_project, zero_slack_nodes};
pub use generation::{Generation, RebuildSequencer};
pub use grouping::{ALL_TASKS_LABEL, TaskGroups, UNASSIGNED_LABEL, UNKNOWN_PROJECT_LABEL, group};
pub use scale::{TimelineWindow, scale, scale_at};
pub use view::{TimelineView, compose};
