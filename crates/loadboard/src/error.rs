//! Error types for the loadboard crate.

use thiserror::Error;

/// Errors that can occur when loading, configuring or querying a dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A test record lacks a field needed by the active sort or filter key.
    ///
    /// Engines log and skip these rather than aborting the projection.
    #[error("test #{index} of api '{api}' is missing or has an unparseable '{field}'")]
    MalformedRecord {
        api: String,
        index: usize,
        field: &'static str,
    },

    /// The input document is not a valid result collection.
    #[error("invalid result document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The YAML configuration could not be read.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Sort label not recognized.
    #[error("unknown sort key '{0}'")]
    InvalidSortKey(String),

    /// Status label not recognized.
    #[error("unknown status '{0}' (expected pass, fail or flaky)")]
    InvalidStatus(String),

    /// Page size must be at least one.
    #[error("page size must be a positive integer")]
    InvalidPageSize,
}

/// Result type for loadboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_record_message_names_the_field() {
        let err = DashboardError::MalformedRecord {
            api: "Login".into(),
            index: 2,
            field: "duration.avg",
        };
        assert_eq!(
            err.to_string(),
            "test #2 of api 'Login' is missing or has an unparseable 'duration.avg'"
        );
    }

    #[test]
    fn parse_error_converts() {
        let raw = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DashboardError = raw.into();
        assert!(matches!(err, DashboardError::Parse(_)));
    }
}
