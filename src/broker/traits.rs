//! Trait abstraction for the vote-event publish sink.
//!
//! The broker is a narrow collaborator: one async `publish` per accepted
//! vote, returning a delivery acknowledgment. Topic and partition strategy
//! belong to the producer implementation, not to this core.

use crate::storage::traits::{SelectOptionId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The immutable fact that a vote was cast. Exactly one event is published
/// per accepted submission; the consumer side turns events into vote rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEvent {
    pub select_option_id: SelectOptionId,
    pub user_id: UserId,
    pub cast_at: DateTime<Utc>,
}

/// Delivery acknowledgment from the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishAck {
    /// Broker-assigned offset or sequence number, when the producer reports one.
    pub offset: Option<u64>,
}

/// Result type for broker operations.
pub type BrokerResult<T> = Result<T, BrokerError>;

/// Broker producer errors. Delivery can fail independently of validation;
/// the upstream cause is preserved as text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Producer unavailable: {0}")]
    Unavailable(String),
}

/// Publish sink abstraction.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one vote event, awaiting the delivery acknowledgment.
    async fn publish(&self, event: VoteEvent) -> BrokerResult<PublishAck>;
}
