use crate::graph::EdgeId;
use crate::wave::Direction;
use std::fmt;

/// Everything the wave engine can report
#[derive(Debug, Clone, PartialEq)]
pub enum WaveError {
    /// Empty or malformed graph/catalog; nothing was built
    Config(String),
    /// Rejected argument (non-positive duration, bad config value); nothing was mutated
    InvalidArgument(String),
    /// A level barrier timed out with `pending` animations still running
    StuckAnimation {
        direction: Direction,
        level: usize,
        pending: usize,
    },
    /// A second launch for an edge that is already animating
    DuplicateClaim(EdgeId),
}

impl fmt::Display for WaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveError::Config(reason) => write!(f, "Invalid graph configuration: {}", reason),
            WaveError::InvalidArgument(reason) => write!(f, "Invalid argument: {}", reason),
            WaveError::StuckAnimation {
                direction,
                level,
                pending,
            } => write!(
                f,
                "{:?} level {} timed out with {} animation(s) still running",
                direction, level, pending
            ),
            WaveError::DuplicateClaim(edge) => {
                write!(f, "Edge {} was claimed while already animating", edge)
            }
        }
    }
}

impl std::error::Error for WaveError {}
