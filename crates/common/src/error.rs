//! Error types shared across SwipeDeck crates.

use std::path::PathBuf;

/// Top-level error type for SwipeDeck operations.
///
/// The gesture pipeline itself is infallible; these errors only arise at
/// the edges (config files, deck files, touch traces, the decision log).
#[derive(Debug, thiserror::Error)]
pub enum SwipedeckError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Deck error: {message}")]
    Deck { message: String },

    #[error("Trace error on line {line}: {message}")]
    Trace { line: usize, message: String },

    #[error("Decision log error: {message}")]
    DecisionLog { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SwipedeckError.
pub type SwipedeckResult<T> = Result<T, SwipedeckError>;

impl SwipedeckError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn deck(msg: impl Into<String>) -> Self {
        Self::Deck {
            message: msg.into(),
        }
    }

    pub fn trace(line: usize, msg: impl Into<String>) -> Self {
        Self::Trace {
            line,
            message: msg.into(),
        }
    }

    pub fn decision_log(msg: impl Into<String>) -> Self {
        Self::DecisionLog {
            message: msg.into(),
        }
    }

    /// Map an I/O error on `path` to `FileNotFound` when appropriate.
    pub fn from_io_at(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_error_mentions_line() {
        let err = SwipedeckError::trace(7, "unknown event");
        assert_eq!(err.to_string(), "Trace error on line 7: unknown event");
    }

    #[test]
    fn test_missing_file_maps_to_file_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SwipedeckError::from_io_at(io, "/tmp/deck.json");
        assert!(matches!(err, SwipedeckError::FileNotFound { .. }));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = SwipedeckError::from_io_at(io, "/tmp/deck.json");
        assert!(matches!(err, SwipedeckError::Io(_)));
    }
}
