use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ViewOptions;
use crate::error::{Result, TimelineError};
use crate::model::{CalendarEvent, ProjectRecord, TaskRecord};
use crate::timeline::TimelineFilters;

/// A point-in-time copy of the records the timeline is built from
///
/// TOML layout: an optional `[view]` and `[filters]` table followed by
/// `[[projects]]`, `[[tasks]]` and `[[events]]` arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub view: ViewOptions,
    pub filters: TimelineFilters,
    pub projects: Vec<ProjectRecord>,
    pub tasks: Vec<TaskRecord>,
    pub events: Vec<CalendarEvent>,
}

impl Snapshot {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the snapshot; a missing file is an I/O error
    pub fn load(&self) -> Result<Snapshot> {
        let content = fs::read_to_string(&self.file_path).map_err(|source| self.io_error(source))?;
        let snapshot = Snapshot::from_toml_str(&content)?;
        tracing::debug!(
            projects = snapshot.projects.len(),
            tasks = snapshot.tasks.len(),
            events = snapshot.events.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let content = snapshot.to_toml_string()?;
        fs::write(&self.file_path, content).map_err(|source| self.io_error(source))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> TimelineError {
        TimelineError::Io {
            path: self.file_path.display().to_string(),
            source,
        }
    }
}
