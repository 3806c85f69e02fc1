//! Vote-event publish sink seam and its test double.

pub mod mock;
pub mod traits;

pub use traits::{BrokerError, BrokerResult, EventPublisher, PublishAck, VoteEvent};
