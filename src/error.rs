//! Crate-level error types.
//!
//! Gesture handling itself never fails: unusable input degrades to a no-op.
//! These errors cover the edges of the crate that touch the outside world
//! (preset files and the standalone viewer).

use std::fmt;

/// Errors produced by the grip crate.
#[derive(Debug)]
pub enum GripError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for GripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for GripError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GripError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
