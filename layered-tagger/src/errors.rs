//! Error types for the merge engine.
//!
//! Only document-level failures are errors. Problems with a single record
//! are reported as [`MergeWarning`](crate::MergeWarning)s and never abort a
//! merge.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort the merge of one document.
///
/// When a merge returns one of these, the document's annotation index has
/// not been modified.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The payload does not have the expected shape.
    #[error("malformed tagger payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// A batched response does not have one sentence per document sentence.
    #[error("response {response} has {found} sentences but the document has {expected}")]
    SentenceCountMismatch {
        response: usize,
        expected: usize,
        found: usize,
    },

    /// A mapping table could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors loading configuration or mapping tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown built-in mapping table: {0}")]
    UnknownTable(String),
}

/// A tag the configured table cannot resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("tag {tag:?} is not mapped by table {table:?}")]
    Unmapped { tag: String, table: String },
}

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MergeError::SentenceCountMismatch {
            response: 1,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "response 1 has 2 sentences but the document has 3"
        );

        let err = MappingError::Unmapped {
            tag: "XY".to_string(),
            table: "stts".to_string(),
        };
        assert_eq!(err.to_string(), "tag \"XY\" is not mapped by table \"stts\"");
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: MergeError = json_err.into();
        assert!(matches!(err, MergeError::MalformedPayload(_)));
        assert!(err.to_string().starts_with("malformed tagger payload"));
    }
}
