//! Error types for payoff computation.

use thiserror::Error;

/// Errors raised by payoff operations.
#[derive(Debug, Error)]
pub enum PayoffError {
    /// A position or one of its legs violates its invariants.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// A price range or sample count is malformed.
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

/// Result type alias for payoff operations.
pub type Result<T> = std::result::Result<T, PayoffError>;
