//! Timeline domain models
//!
//! - `records`: project and task records as produced by the record store
//! - `node`: derived schedule nodes and in-place update helpers
//! - `calendar`: calendar events and recurrence rules
//! - `dates`: lenient timestamp parsing and day arithmetic

mod calendar;
mod dates;
mod node;
mod records;

pub use calendar::{CalendarEvent, Frequency, RecurrenceRule};
pub use dates::{duration_days, local_date_today, parse_optional, parse_timestamp, start_of_day};
pub use node::{
    GanttNode, NodeType, Priority, UpdateOutcome, find_node, find_node_mut, flatten,
    update_node_dates, update_node_progress,
};
pub use records::{ProjectRecord, TaskRecord, WorkItem};
