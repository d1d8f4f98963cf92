//! Subscriber registry for broadcasting samples.

use crossbeam_channel::{bounded, Sender, TrySendError};
use std::collections::HashMap;

use super::types::{DropReason, SubscriptionHandle, SubscriptionId};

/// Internal subscription state.
struct Subscription {
    sender: Sender<i64>,
    capacity: usize,
}

/// Registry of live subscribers.
///
/// Holds no lock of its own; the owning series serializes access. Removing
/// an entry drops its sender, which closes the subscriber's channel.
pub struct SubscriberRegistry {
    subscriptions: HashMap<SubscriptionId, Subscription>,
    next_id: u64,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a new subscriber with a channel of `capacity` slots (at least one).
    pub fn subscribe(&mut self, capacity: usize) -> SubscriptionHandle {
        let capacity = capacity.max(1);
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = bounded(capacity);
        self.subscriptions
            .insert(id, Subscription { sender, capacity });
        tracing::debug!(subscription = id.0, capacity, "subscribed");

        SubscriptionHandle { id, receiver }
    }

    /// Remove and close a subscription. Unknown ids are ignored.
    ///
    /// Returns whether the id was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscriptions.remove(&id).is_some();
        if removed {
            tracing::debug!(subscription = id.0, reason = ?DropReason::Unsubscribed, "unsubscribed");
        }
        removed
    }

    /// Get subscription count.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Send `value` to every subscriber without blocking.
    ///
    /// Subscribers whose channel is full, or whose receiver is gone, are
    /// removed and their channel closed. The dropped ids are returned.
    pub fn broadcast(&mut self, value: i64) -> Vec<(SubscriptionId, DropReason)> {
        let mut dropped = Vec::new();

        for (id, sub) in &self.subscriptions {
            match sub.sender.try_send(value) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        subscription = id.0,
                        capacity = sub.capacity,
                        "unsubscribing full channel"
                    );
                    dropped.push((*id, DropReason::BufferFull));
                }
                Err(TrySendError::Disconnected(_)) => {
                    tracing::debug!(subscription = id.0, "receiver gone, unsubscribing");
                    dropped.push((*id, DropReason::Disconnected));
                }
            }
        }

        for (id, _) in &dropped {
            self.subscriptions.remove(id);
        }
        dropped
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}
