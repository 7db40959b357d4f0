//! Error types for blocksplit.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while splitting a source into blocks.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The split configuration is unusable (e.g. a zero block size).
    ///
    /// Always reported before any byte is read from the source.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The source became unreadable while a block was being filled.
    #[error("io error reading block {ordinal} of {source_name:?}: {source}")]
    Io {
        /// Name of the source being split.
        source_name: String,
        /// Ordinal of the block that was being filled.
        ordinal: u64,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file could not be opened or inspected before splitting.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    pub(crate) fn invalid(message: &'static str) -> Self {
        SplitError::InvalidConfiguration { message }
    }

    /// Returns true if this error came from the byte source rather than
    /// from configuration.
    pub fn is_io(&self) -> bool {
        matches!(self, SplitError::Io { .. } | SplitError::Open { .. })
    }
}

/// Errors returned when a string is not a well-formed block id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBlockIdError {
    /// The id does not start with `/`.
    #[error("block id must start with '/'")]
    MissingPrefix,

    /// The id has no `-` separating the source name from the ordinal.
    #[error("block id has no '-' before the ordinal")]
    MissingSeparator,

    /// Nothing between the leading `/` and the ordinal separator.
    #[error("block id has an empty source name")]
    EmptySourceName,

    /// The ordinal is not a non-negative decimal integer.
    #[error("invalid block ordinal: {0:?}")]
    InvalidOrdinal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_keeps_source() {
        let err = SplitError::Io {
            source_name: "a.txt".into(),
            ordinal: 3,
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "gone"),
        };
        assert!(err.is_io());
        assert!(err.source().is_some());
        let msg = err.to_string();
        assert!(msg.contains("block 3"));
        assert!(msg.contains("\"a.txt\""));
    }

    #[test]
    fn test_display() {
        let err = SplitError::invalid("block size must be non-zero");
        assert_eq!(
            err.to_string(),
            "invalid configuration: block size must be non-zero"
        );
        assert!(!err.is_io());
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseBlockIdError::InvalidOrdinal("x1".into());
        assert_eq!(err.to_string(), "invalid block ordinal: \"x1\"");
    }
}
