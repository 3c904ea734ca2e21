use thiserror::Error;

/// Taxonomy shared across the workspace. Each variant corresponds to one
/// of the error kinds enumerated for the system: illegal input that
/// leaves state untouched, a participant going silent, a transport
/// hiccup, a settlement flush that exhausted its retries, or an
/// internal invariant breach that is fatal to the table that raised it.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("validation failed: {0}")]
    ValidationFailure(String),

    #[error("turn timed out for {who}")]
    TurnTimeout { who: String },

    #[error("transport error talking to {agent}: {reason}")]
    TransportError { agent: String, reason: String },

    #[error("settlement failed for room {room}: {reason}")]
    SettlementError { room: String, reason: String },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl ArenaError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailure(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// `InvariantViolation` is the only kind that is fatal to the owning
    /// table; all others are recovered locally per the error design.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

pub type ArenaResult<T> = Result<T, ArenaError>;
