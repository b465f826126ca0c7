//! Crate-level error types.
//!
//! The animation itself never fails; these cover the platform boundary
//! (browser objects, timers) and configuration parsing.

use std::fmt;

/// Errors produced while setting up or driving the stage.
#[derive(Debug)]
pub enum StageError {
    /// A required browser object (window, document, body) is missing.
    MissingBrowserObject(&'static str),
    /// The canvas element or its 2D context could not be obtained.
    Canvas(String),
    /// The platform refused to schedule a periodic timer.
    Timer(String),
    /// Configuration JSON failed to parse.
    ConfigParse(serde_json::Error),
    /// Configuration parsed but holds unusable values.
    InvalidConfig(String),
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBrowserObject(what) => write!(f, "no {what} available"),
            Self::Canvas(msg) => write!(f, "canvas error: {msg}"),
            Self::Timer(msg) => write!(f, "timer error: {msg}"),
            Self::ConfigParse(e) => write!(f, "config parse error: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for StageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StageError {
    fn from(e: serde_json::Error) -> Self {
        Self::ConfigParse(e)
    }
}
