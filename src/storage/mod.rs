//! Storage collaborator seams and their in-memory test double.

pub mod mock;
pub mod traits;

pub use traits::{
    Agenda, AgendaId, AgendaStore, ArchiveStore, LiveVoteStore, SelectOptionId,
    StorageError, StorageResult, UserId, VoteHistory,
};
