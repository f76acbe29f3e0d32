//! Error types for DevGate core.

use std::{error::Error, fmt, io};

/// Error type for DevGate core operations.
#[derive(Debug)]
pub enum DevGateError {
    /// An underlying I/O error.
    Io(io::Error),
    /// Input did not have the expected structure (e.g. a malformed coverage report).
    Parse(String),
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for DevGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Parse(message) => write!(f, "parse error: {message}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for DevGateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(_) | Self::Other(_) => None,
        }
    }
}

impl From<io::Error> for DevGateError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Convenience result type for DevGate core.
pub type Result<T> = std::result::Result<T, DevGateError>;
