//! Price fan-out — an in-process publish/subscribe registry.
//!
//! Models the live-price distribution layer without any transport: callers
//! subscribe for a receiver, publishers broadcast, and delivery is
//! best-effort — a subscriber whose receiver is gone is pruned on the next
//! broadcast and never blocks or fails delivery to the others.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};
use tracing::debug;

/// One price tick pushed to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: u64,
}

/// Handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// The fan-out registry. Not thread-safe by itself; wrap in a mutex if
/// publishers and subscribers live on different threads.
#[derive(Default)]
pub struct PriceFeed {
    next_id: u64,
    subscribers: Vec<(u64, Sender<PriceUpdate>)>,
}

impl PriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber and hand back its receiving end.
    pub fn subscribe(&mut self) -> (SubscriberId, Receiver<PriceUpdate>) {
        let id = self.next_id;
        self.next_id += 1;
        let (tx, rx) = channel();
        self.subscribers.push((id, tx));
        debug!(id, "subscriber connected");
        (SubscriberId(id), rx)
    }

    /// Remove a subscriber explicitly. Returns false if it was not present.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id.0);
        let removed = self.subscribers.len() < before;
        if removed {
            debug!(id = id.0, "subscriber disconnected");
        }
        removed
    }

    /// Deliver `update` to every live subscriber.
    ///
    /// Subscribers whose receiver has been dropped are pruned here; the
    /// return value is the number of successful deliveries.
    pub fn broadcast(&mut self, update: &PriceUpdate) -> usize {
        let mut delivered = 0;
        self.subscribers.retain(|(id, tx)| match tx.send(update.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => {
                debug!(id, "pruning dead subscriber");
                false
            }
        });
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
