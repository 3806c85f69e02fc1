//! Hybrid tally stream: one finalized value, or live values on a ticker.
//!
//! Both shapes are exposed through one [`futures::Stream`] so transports
//! handle closed and open agendas uniformly. The live shape owns a spawned
//! ticker task; dropping the stream aborts it, so no tick fires after the
//! subscriber detaches.

use crate::vote::error::VoteResult;
use futures::Stream;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// A sequence of tally values.
///
/// - Closed agendas: exactly one `Ok` item, then the stream ends.
/// - Open agendas: one freshly read item every tick until the subscriber
///   drops the stream. A failed tick yields its `Err` and ends the stream.
pub struct TallyStream<T> {
    receiver: mpsc::Receiver<VoteResult<T>>,
    ticker: Option<JoinHandle<()>>,
}

impl<T> TallyStream<T> {
    /// Finite stream holding one already-computed value.
    pub fn once(value: T) -> Self {
        let (sender, receiver) = mpsc::channel(1);
        // Capacity 1 and the sender is dropped right away, so this cannot fail.
        let _ = sender.try_send(Ok(value));
        Self {
            receiver,
            ticker: None,
        }
    }

    /// Infinite stream reading a fresh value every `delay`.
    ///
    /// Ticks are strictly sequential: a slow read delays the next tick
    /// rather than letting reads pile up. The first item arrives one full
    /// `delay` after subscription.
    pub fn live<F, Fut>(delay: Duration, mut read: F) -> Self
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = VoteResult<T>> + Send,
    {
        let (sender, receiver) = mpsc::channel(1);
        let ticker = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + delay, delay);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let item = read().await;
                let failed = item.is_err();
                if sender.send(item).await.is_err() {
                    // Subscriber detached between ticks.
                    break;
                }
                if failed {
                    break;
                }
            }
        });
        Self {
            receiver,
            ticker: Some(ticker),
        }
    }

    /// Whether this stream is backed by a live ticker.
    pub fn is_live(&self) -> bool {
        self.ticker.is_some()
    }
}

impl<T> Stream for TallyStream<T> {
    type Item = VoteResult<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl<T> Drop for TallyStream<T> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}
