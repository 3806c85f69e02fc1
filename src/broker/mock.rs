//! Mock publisher for testing.

use super::traits::*;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory publisher that records every event. Clones share state.
#[derive(Clone, Default)]
pub struct MockPublisher {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    published: Vec<VoteEvent>,
    fail_with: Option<BrokerError>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent publish fail.
    pub fn fail_with(&self, error: BrokerError) {
        self.state.lock().unwrap().fail_with = Some(error);
    }

    /// Events published so far, for assertions.
    pub fn published(&self) -> Vec<VoteEvent> {
        self.state.lock().unwrap().published.clone()
    }

    /// Published events rendered as JSON, the shape a transport would emit.
    pub fn published_json(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .published
            .iter()
            .map(|event| serde_json::to_string(event).expect("vote event serializes"))
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MockPublisher {
    async fn publish(&self, event: VoteEvent) -> BrokerResult<PublishAck> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = &state.fail_with {
            return Err(error.clone());
        }
        state.published.push(event);
        Ok(PublishAck {
            offset: Some(state.published.len() as u64 - 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::{SelectOptionId, UserId};
    use chrono::Utc;

    fn event(user: u64) -> VoteEvent {
        VoteEvent {
            select_option_id: SelectOptionId(10),
            user_id: UserId(user),
            cast_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn records_published_events_in_order() {
        let publisher = MockPublisher::new();
        let first = publisher.publish(event(1)).await.unwrap();
        let second = publisher.publish(event(2)).await.unwrap();

        assert_eq!(first.offset, Some(0));
        assert_eq!(second.offset, Some(1));
        assert_eq!(publisher.published().len(), 2);
    }

    #[tokio::test]
    async fn injected_failure_rejects_publish() {
        let publisher = MockPublisher::new();
        publisher.fail_with(BrokerError::Delivery("broker down".to_string()));

        assert!(publisher.publish(event(1)).await.is_err());
        assert!(publisher.published().is_empty());
    }
}
