//! Trait abstractions for vote storage collaborators.
//!
//! The core never owns persistence. Agendas, in-progress votes, and archived
//! tallies live behind these seams so transports can wire real repositories
//! and tests can wire [`MockVoteStore`](crate::storage::mock::MockVoteStore).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Agenda identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgendaId(pub u64);

/// Identifier of one votable choice under an agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOptionId(pub u64);

/// User identifier, as issued by the authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for AgendaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SelectOptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A votable item: scoped to one apartment code, open until `end_date`
/// (inclusive), optionally secret.
///
/// Immutable once created; this core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    pub id: AgendaId,
    pub apartment_code: String,
    /// Last calendar day on which votes are accepted.
    pub end_date: NaiveDate,
    /// Suppresses in-progress counts, and rosters in any state.
    pub secret: bool,
}

/// A past submission by one user on one agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteHistory {
    pub user_id: UserId,
    pub agenda_id: AgendaId,
    pub select_option_id: SelectOptionId,
    pub cast_at: DateTime<Utc>,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage collaborator errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),
}

/// Agenda lookup seam.
#[async_trait]
pub trait AgendaStore: Send + Sync {
    /// Resolve an agenda by its own id.
    async fn find_by_agenda_id(&self, id: AgendaId) -> StorageResult<Option<Agenda>>;

    /// Resolve the agenda owning a select option.
    async fn find_by_select_option_id(
        &self,
        id: SelectOptionId,
    ) -> StorageResult<Option<Agenda>>;
}

/// Votes-in-progress seam: the authoritative source while an agenda is open,
/// and the fallback when archival rows are absent after it closes.
#[async_trait]
pub trait LiveVoteStore: Send + Sync {
    /// Current vote count for a select option. `None` when no rows exist.
    async fn count_for_select_option(
        &self,
        id: SelectOptionId,
    ) -> StorageResult<Option<u64>>;

    /// Ids of users who voted for a select option. Empty when none.
    async fn voter_ids_for_select_option(
        &self,
        id: SelectOptionId,
    ) -> StorageResult<Vec<UserId>>;

    /// The caller's own past submission on an agenda, if any.
    async fn vote_history(
        &self,
        user_id: UserId,
        agenda_id: AgendaId,
    ) -> StorageResult<Option<VoteHistory>>;
}

/// Finalized tallies, persisted once an agenda closes.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// Archived count for a select option. `None` when archival never ran.
    async fn archived_count(&self, id: SelectOptionId) -> StorageResult<Option<u64>>;

    /// Archived voter roster. Empty when archival never ran.
    async fn archived_voter_ids(&self, id: SelectOptionId) -> StorageResult<Vec<UserId>>;
}
