//! Timeline Core Library
//!
//! The scheduling engine behind a team project-management timeline. It turns
//! project and task records into a hierarchical Gantt model, highlights a
//! critical path, groups and windows the schedule for display, and expands
//! recurring calendar events into concrete occurrences.
//!
//! # Architecture
//!
//! - **Domain Layer**: `model` - records, schedule nodes, calendar events
//! - **Engine Layer**: `timeline` and `recurrence` - pure, synchronous transformations
//! - **Edge Layer**: `config`, `validation`, `storage`, `formatting` - options,
//!   argument parsing, TOML snapshots and text output for the command-line host
//!
//! Every engine function takes its configuration as an explicit value and
//! never fails on malformed records; bad input degrades to a smaller result.
//!
//! # Example
//!
//! ```
//! use timeline_core::{ProjectRecord, TaskRecord, TimelineFilters, build};
//!
//! let projects = vec![ProjectRecord {
//!     id: "web".to_string(),
//!     name: "Website".to_string(),
//!     created_at: Some("2024-01-01".to_string()),
//!     ..Default::default()
//! }];
//! let tasks = vec![TaskRecord {
//!     id: "design".to_string(),
//!     project_id: Some("web".to_string()),
//!     created_at: Some("2024-01-02".to_string()),
//!     due_date: Some("2024-01-09".to_string()),
//!     ..Default::default()
//! }];
//!
//! let forest = build(&projects, &tasks, &TimelineFilters::default());
//! assert_eq!(forest[0].children[0].duration_days, 7);
//! ```

pub mod config;
pub mod error;
pub mod formatting;
pub mod model;
pub mod recurrence;
pub mod storage;
pub mod timeline;
pub mod validation;

// Re-export commonly used types
pub use config::{CriticalPathMode, GroupBy, ViewMode, ViewOptions};
pub use error::{Result, TimelineError};
pub use model::{
    CalendarEvent, Frequency, GanttNode, NodeType, Priority, ProjectRecord, RecurrenceRule,
    TaskRecord, UpdateOutcome, WorkItem,
};
pub use recurrence::{RemoteExpander, expand, expand_all, expand_with_fallback};
pub use storage::{Snapshot, Storage};
pub use timeline::{
    BuildReport, DateRange, RebuildSequencer, ScheduleArena, TaskGroups, TimelineFilters,
    TimelineView, TimelineWindow, analyze, build, build_with_report, compose, group, scale,
};
