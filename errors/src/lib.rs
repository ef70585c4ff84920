//! # Empty-Category Errors
//!
//! Error types shared by the loader and the storage backends.
//!
//! Resolution itself never fails: absent configuration, the depth bound,
//! dangling side-data references and malformed field values all degrade to
//! defaults. The only failures that surface come from the batch-fetch
//! collaborators and are passed through to the caller unchanged.

use thiserror::Error;

/// Boxed collaborator error carried as a `source`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Chain loading errors
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Fetching {} ancestor node(s) failed: {source}", .requested.len())]
    NodeFetch {
        requested: Vec<String>,
        #[source]
        source: BoxError
    },

    #[error("Fetching {} side-data record(s) failed: {source}", .requested.len())]
    SideDataFetch {
        requested: Vec<String>,
        #[source]
        source: BoxError
    }
}

impl LoaderError {
    pub fn node_fetch(requested: &[String], source: impl Into<BoxError>) -> Self {
        Self::NodeFetch {
            requested: requested.to_vec(),
            source: source.into()
        }
    }

    pub fn side_data_fetch(requested: &[String], source: impl Into<BoxError>) -> Self {
        Self::SideDataFetch {
            requested: requested.to_vec(),
            source: source.into()
        }
    }
}

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Connection to {backend} failed: {reason}")]
    ConnectionError { backend: String, reason: String },

    #[error("Query on {backend} failed: {reason}")]
    QueryError { backend: String, reason: String },

    #[error("Serialization error: {error_type} - {reason}")]
    SerializationError { error_type: String, reason: String },

    #[error("Unsupported storage backend: {backend}")]
    UnsupportedBackend { backend: String }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_loader_error_display_and_source() {
        let ids = ["a".to_string(), "b".to_string(), "c".to_string()];
        let err = LoaderError::node_fetch(&ids, StorageError::ConnectionError {
            backend: "postgres".to_string(),
            reason: "refused".to_string()
        });

        assert_eq!(
            err.to_string(),
            "Fetching 3 ancestor node(s) failed: Connection to postgres failed: refused"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_side_data_fetch_from_string() {
        let err = LoaderError::side_data_fetch(&["img".to_string()], "timeout");
        assert!(err.to_string().contains("side-data"));
        assert!(err.to_string().ends_with("timeout"));
        assert!(matches!(
            err,
            LoaderError::SideDataFetch { ref requested, .. } if requested == &["img".to_string()]
        ));
    }
}
