//! Crate-level error types.

use std::fmt;

/// Errors produced by the motorcade crate.
#[derive(Debug)]
pub enum MotorcadeError {
    /// Route construction received fewer than three distinct control points.
    InvalidPath {
        /// Number of distinct control points that were supplied.
        distinct: usize,
    },
    /// An actor node's name matched no correction-table prefix.
    UnmatchedActor(String),
    /// Camera framing could not derive a horizontal approach direction
    /// (camera directly above or below the scene center).
    DegenerateDirection,
    /// A curve was sampled outside its [0,1) parameter domain.
    Domain(f32),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for MotorcadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath { distinct } => write!(
                f,
                "closed path needs at least 3 distinct control points, got {distinct}"
            ),
            Self::UnmatchedActor(name) => {
                write!(f, "actor {name:?} matches no correction-table prefix")
            }
            Self::DegenerateDirection => {
                write!(f, "no horizontal approach direction for camera framing")
            }
            Self::Domain(u) => {
                write!(f, "curve parameter {u} outside [0,1)")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for MotorcadeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MotorcadeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
