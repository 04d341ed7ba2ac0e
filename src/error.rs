//! Error types for the edges of the timeline core
//!
//! The scheduling computations themselves never fail: malformed records
//! degrade to a smaller result. Errors only surface when loading snapshot
//! or configuration files and when parsing option strings supplied by a user.

use thiserror::Error;

/// Errors raised while loading or interpreting external input.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// The snapshot or configuration file could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot or configuration file is not valid TOML for the expected shape
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] toml::de::Error),

    /// A snapshot could not be serialized
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A date argument was not in a recognised format
    #[error("Invalid date '{0}'. Use YYYY-MM-DD (e.g., '2025-03-15') or an RFC 3339 timestamp")]
    InvalidDate(String),

    /// An option value was not one of the accepted choices
    #[error("Invalid {kind} '{value}'. Valid options are: {expected}")]
    InvalidOption {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A remote recurrence expansion failed
    #[error("Remote expansion failed: {0}")]
    Remote(String),
}

/// Result alias used by the fallible parts of the crate.
pub type Result<T> = std::result::Result<T, TimelineError>;
