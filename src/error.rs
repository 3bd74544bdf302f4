// Error types for connection table reads
//
// Three classes of failure exist:
// - file-level I/O (missing table, permission denied)
// - internal decode failures (a field the line matcher accepted but the
//   numeric decoder rejected)
// - protocol names that have no kernel table
//
// Malformed lines are not errors: the scanner skips them with a warning.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for procnet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a connection table.
#[derive(Debug, Error)]
pub enum Error {
    /// The table file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path of the table file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A field accepted by the line matcher could not be decoded.
    #[error("internal decode error for {field} {value:?}: {reason}")]
    Decode {
        /// Name of the field being decoded.
        field: &'static str,
        /// Raw text of the field.
        value: String,
        /// Decoder failure description.
        reason: String,
    },

    /// No kernel connection table exists for this protocol name.
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),
}

impl Error {
    pub(crate) fn decode(field: &'static str, value: &str, reason: impl ToString) -> Self {
        Error::Decode {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for decode failures, which indicate the kernel format drifted
    /// from what the line matcher expects rather than an ordinary I/O problem.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}
