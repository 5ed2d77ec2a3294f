use crate::traits::ClientId;
use thiserror::Error;

/// Errors surfaced by the simulation.
///
/// Both variants are contract violations: bad input rejected before any
/// state exists, or a broken engine invariant that ends the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Input rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The tick loop reached a state it must never reach.
    #[error("invariant violated at tick {tick} by client {client}: {reason}")]
    InvariantViolation {
        tick: u64,
        client: ClientId,
        reason: String,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::InvalidConfiguration(err.to_string())
    }
}
