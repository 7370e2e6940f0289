//! Error types for pathbench
//!
//! Planning failure is not an error: planners report it through an
//! unsuccessful [`Path`](crate::Path). Errors are reserved for
//! malformed serialized input and bad configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed serialized environment or benchmark config.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Parsed structure is shape-invalid (wrong row lengths, too few
    /// polygon vertices, ...).
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
    /// Benchmark config names a planner this crate does not provide.
    #[error("unknown planner: {0}")]
    UnknownPlanner(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidEnvironment("occupancy row 3 has width 5, expected 10".into());
        assert_eq!(
            format!("{}", err),
            "invalid environment: occupancy row 3 has width 5, expected 10"
        );
    }

    #[test]
    fn test_parse_error_from_serde() {
        let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: Error = bad.unwrap_err().into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
