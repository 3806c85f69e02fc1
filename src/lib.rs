//! Tally - Agenda Vote Core
//!
//! Library core for community agenda voting: a vote becomes a published
//! event, and tallies are observed live (polling) or finalized (archived)
//! depending on the agenda's open/closed state.
//!
//! Key principles:
//! - Storage and broker are trait seams; this core owns no persistence
//! - Caller identity is an explicit argument, never ambient state
//! - Open vs closed is a fresh calendar comparison at every decision point
//! - Secret agendas hide in-progress counts, and rosters in any state

pub mod broker;
pub mod config;
pub mod context;
pub mod storage;
pub mod vote;

pub use context::{Address, UserInfo};
pub use vote::error::{VoteError, VoteResult};
pub use vote::stream::TallyStream;
pub use vote::{VoteCore, VoteCreationRequest};
