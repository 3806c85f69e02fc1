//! Error taxonomy for the vote core.

use crate::broker::traits::BrokerError;
use crate::storage::traits::StorageError;

/// Result type for vote core operations.
pub type VoteResult<T> = Result<T, VoteError>;

/// Vote core errors. Every failure is terminal for the current operation or
/// stream tick; nothing is retried internally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VoteError {
    /// No agenda matches the given id or select option.
    #[error("Agenda not found")]
    AgendaNotFound,

    /// The caller's apartment code does not match the agenda's scope.
    #[error("No right to act on this agenda")]
    NotAuthorized,

    /// Submission attempted after the agenda's end date.
    #[error("Voting has ended for this agenda")]
    VotingClosed,

    /// Live count requested while a secret agenda is still open.
    #[error("Count of an ongoing secret vote is not visible")]
    SecretCountForbidden,

    /// Roster requested for a secret agenda, open or closed.
    #[error("Voter roster of a secret vote is not visible")]
    SecretRosterForbidden,

    /// History requested for a user/agenda pair with no recorded vote.
    #[error("No vote recorded for this agenda")]
    NoVoteFound,

    /// Broker delivery failure; the upstream cause is preserved.
    #[error("Vote event publish failed")]
    PublishFailed(#[source] BrokerError),

    /// Storage collaborator failure.
    #[error("Storage error")]
    Storage(#[from] StorageError),
}
