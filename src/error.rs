use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeaderboardError {
    /// A value outside the recognised domain (unknown view name, negative count).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("student {0} not found")]
    NotFound(u32),

    #[error("no students to aggregate")]
    EmptyInput,

    /// Loaded data breaks a roster invariant.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),
}

impl LeaderboardError {
    /// Whether an interactive session can keep going after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LeaderboardError::InvalidRoster(_))
    }
}
