//! Error types for the rewrite stage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The parsed statement broke an invariant the rewrite relies on.
    /// Signals a bug upstream; the statement must not be sent to any shard.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
