//! Error types and handling for copybench
//!
//! Every failure in the benchmark is fatal: a partial benchmark with a
//! silently skipped strategy would produce misleading comparative results,
//! so errors propagate to the top level and terminate the process.

use std::path::PathBuf;

/// Main error type for copybench operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A byte-size string did not match the expected shape
    #[error("could not parse bytes from '{input}': expected a value like '2.3 kB' (supported units: kB, MB, GB)")]
    Parse {
        /// The offending input string
        input: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// Source path does not exist or is not readable
    #[error("source not found: {path}")]
    SourceNotFound {
        /// Path that could not be read
        path: PathBuf,
    },

    /// Destination folder already exists and `--force` was not given
    #[error("destination '{path}' already exists")]
    DestinationExists {
        /// The pre-existing destination path
        path: PathBuf,
    },

    /// A copy strategy failed mid-run
    #[error("copy failed: {message}")]
    Copy {
        /// Error message describing the copy failure
        message: String,
    },

    /// Invalid configuration or arguments
    #[error("configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed byte-size string or arguments
    Parse,
    /// I/O related errors
    Io,
    /// Copy strategy failures
    Copy,
    /// Configuration errors
    Config,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Io { .. } | Self::SourceNotFound { .. } | Self::DestinationExists { .. } => {
                ErrorKind::Io
            }
            Self::Copy { .. } => ErrorKind::Copy,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a new copy error
    pub fn copy<S: Into<String>>(message: S) -> Self {
        Self::Copy {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
