//! Subscription types for live sample broadcast.

use std::fmt;

/// Channel depth used by [`subscribe`](crate::BoundedSeries::subscribe).
///
/// A subscriber may lag this many samples behind the producer before it is
/// dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 36;

/// Unique identifier for a subscription. Never reused within a series.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a subscription left the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// Channel was full when a sample was broadcast (slow consumer).
    BufferFull,
    /// The receiving side was dropped.
    Disconnected,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Receiving end of a subscription.
///
/// The channel closes when the subscription is unsubscribed, when it is
/// dropped for falling behind, or when the series itself is dropped. Samples
/// already buffered are still delivered before the close is observed.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive samples.
    pub receiver: crossbeam_channel::Receiver<i64>,
}

impl SubscriptionHandle {
    /// Receive the next sample (blocking).
    pub fn recv(&self) -> Result<i64, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a sample (non-blocking).
    pub fn try_recv(&self) -> Result<i64, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<i64, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Blocking iterator that ends when the channel closes.
    pub fn iter(&self) -> crossbeam_channel::Iter<'_, i64> {
        self.receiver.iter()
    }

    /// Split into the id and the raw receiver.
    pub fn into_parts(self) -> (SubscriptionId, crossbeam_channel::Receiver<i64>) {
        (self.id, self.receiver)
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .field("pending", &self.receiver.len())
            .finish()
    }
}
