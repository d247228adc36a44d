//! The shared error taxonomy for Pact core operations.

use crate::actor::UserId;
use crate::contract::ContractStatus;
use crate::moderation::SubmissionId;

/// Errors that can occur in Pact core operations.
///
/// Every exposed operation returns one of these as a typed failure. The
/// core performs no automatic retry or recovery; callers own retry policy.
#[derive(Debug, thiserror::Error)]
pub enum PactError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("revenue allocation must sum to 100, got {sum}")]
    Allocation { sum: i64 },

    #[error("invalid transition: contract is {current}, attempted {attempted}")]
    InvalidTransition {
        current: ContractStatus,
        attempted: ContractStatus,
    },

    #[error("party {0} has already signed")]
    AlreadySigned(UserId),

    #[error("submission {0} is already decided")]
    AlreadyDecided(SubmissionId),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("permission denied for {actor}: {required}")]
    PermissionDenied { actor: UserId, required: String },

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("lock poisoned: {0}")]
    Lock(String),
}

/// Result type alias for Pact core operations.
pub type PactResult<T> = Result<T, PactError>;
