//! Thread-safe bounded series with live subscribers.

use crate::buffer::SampleBuffer;
use crate::duration::Interval;
use crate::error::{Result, SeriesError};
use crate::subscriptions::{
    SubscriberRegistry, SubscriptionHandle, SubscriptionId, DEFAULT_CHANNEL_CAPACITY,
};
use crate::types::{SeriesSnapshot, Timestamp};
use parking_lot::RwLock;

/// State guarded by the series lock.
struct SeriesState {
    buffer: SampleBuffer,
    subscribers: SubscriberRegistry,
}

/// A capacity-limited sequence of integer samples with a nominal time span.
///
/// Appends evict the oldest sample once the capacity is reached and are
/// broadcast to every subscriber. A capacity of zero means unbounded.
///
/// One reader/writer lock guards both the samples and the subscriber
/// registry, so subscribers observe samples in append order. Share the
/// series between threads with an `Arc`.
///
/// # Example
///
/// ```
/// use bounded_series::{BoundedSeries, Interval};
///
/// let series = BoundedSeries::new(3, Interval::from_secs(1));
/// for v in 0..5 {
///     series.add(v);
/// }
/// assert_eq!(series.data(), vec![2, 3, 4]);
/// ```
pub struct BoundedSeries {
    state: RwLock<SeriesState>,
}

fn checked_capacity(capacity: i64) -> Result<usize> {
    usize::try_from(capacity).map_err(|_| SeriesError::NegativeCapacity(capacity))
}

impl BoundedSeries {
    /// Create an empty series with `start` and `end` set to now.
    pub fn new(capacity: usize, interval: Interval) -> Self {
        Self {
            state: RwLock::new(SeriesState {
                buffer: SampleBuffer::new(capacity, interval, Timestamp::now()),
                subscribers: SubscriberRegistry::new(),
            }),
        }
    }

    /// Like [`new`](Self::new), for a capacity from signed input.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NegativeCapacity`] if `capacity < 0`.
    pub fn try_new(capacity: i64, interval: Interval) -> Result<Self> {
        Ok(Self::new(checked_capacity(capacity)?, interval))
    }

    /// Append a sample and broadcast it to subscribers.
    ///
    /// When the series is full the oldest sample is evicted and `start`
    /// advances by one interval. `end` is stamped with the current time.
    /// Never blocks on subscribers: full ones are dropped.
    pub fn add(&self, value: i64) {
        let mut state = self.state.write();
        state.buffer.push(value, Timestamp::now());
        let dropped = state.subscribers.broadcast(value);
        if !dropped.is_empty() {
            tracing::debug!(
                dropped = dropped.len(),
                remaining = state.subscribers.len(),
                "broadcast shed subscribers"
            );
        }
    }

    /// Exactly `capacity` samples, left-padded with the oldest one (or zero).
    pub fn padded(&self) -> Vec<i64> {
        self.state.read().buffer.padded()
    }

    /// Change the capacity, dropping the oldest samples that no longer fit.
    ///
    /// `start` advances one interval per dropped sample. Zero drops every
    /// sample, then removes the bound for later appends.
    pub fn set_max_length(&self, capacity: usize) {
        let dropped = self.state.write().buffer.set_capacity(capacity);
        if dropped > 0 {
            tracing::debug!(capacity, dropped, "series truncated");
        }
    }

    /// Like [`set_max_length`](Self::set_max_length), for signed input.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NegativeCapacity`] if `capacity < 0`; the
    /// series is left untouched.
    pub fn try_set_max_length(&self, capacity: i64) -> Result<()> {
        self.set_max_length(checked_capacity(capacity)?);
        Ok(())
    }

    /// Re-anchor `start` to `now - len * interval`.
    pub fn reset_start_time(&self) {
        self.state.write().buffer.reset_start(Timestamp::now());
    }

    /// Subscribe with the default channel depth.
    pub fn subscribe(&self) -> SubscriptionHandle {
        self.subscribe_with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Subscribe with a channel of `capacity` slots (at least one).
    pub fn subscribe_with_capacity(&self, capacity: usize) -> SubscriptionHandle {
        self.state.write().subscribers.subscribe(capacity)
    }

    /// Close and forget a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state.write().subscribers.unsubscribe(id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.read().subscribers.len()
    }

    pub fn start(&self) -> Timestamp {
        self.state.read().buffer.start()
    }

    pub fn end(&self) -> Timestamp {
        self.state.read().buffer.end()
    }

    pub fn interval(&self) -> Interval {
        self.state.read().buffer.interval()
    }

    pub fn capacity(&self) -> usize {
        self.state.read().buffer.capacity()
    }

    pub fn len(&self) -> usize {
        self.state.read().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().buffer.is_empty()
    }

    /// Retained samples, oldest first.
    pub fn data(&self) -> Vec<i64> {
        self.state.read().buffer.values()
    }

    /// Consistent copy of the samples and time span.
    pub fn snapshot(&self) -> SeriesSnapshot {
        self.state.read().buffer.snapshot()
    }
}

impl std::fmt::Debug for BoundedSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("BoundedSeries")
            .field("capacity", &state.buffer.capacity())
            .field("len", &state.buffer.len())
            .field("interval", &state.buffer.interval())
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::TryRecvError;

    #[test]
    fn test_add_then_evict() {
        let series = BoundedSeries::new(5, Interval::from_secs(1));
        let t0 = series.start();

        series.add(0);
        assert_eq!(series.data(), vec![0]);

        for i in 1..5 {
            series.add(i);
        }
        assert_eq!(series.data(), vec![0, 1, 2, 3, 4]);
        assert_eq!(series.start(), t0);

        series.add(5);
        assert_eq!(series.data(), vec![1, 2, 3, 4, 5]);
        assert_eq!(series.start().since(t0), Interval::from_secs(1));
    }

    #[test]
    fn test_end_follows_add() {
        let series = BoundedSeries::new(2, Interval::from_secs(1));
        let created = series.end();
        series.add(1);
        assert!(series.end() >= created);
        assert!(series.start() <= series.end());
    }

    #[test]
    fn test_padded() {
        let series = BoundedSeries::new(5, Interval::from_secs(1));
        assert_eq!(series.padded(), vec![0; 5]);

        series.add(1);
        assert_eq!(series.padded(), vec![1; 5]);

        series.add(2);
        assert_eq!(series.padded(), vec![1, 1, 1, 1, 2]);
        assert_eq!(series.padded(), series.padded());
    }

    #[test]
    fn test_set_max_length() {
        let series = BoundedSeries::new(2, Interval::from_secs(1));
        let t0 = series.start();
        series.add(1);
        series.add(2);

        series.set_max_length(1);
        assert_eq!(series.data(), vec![2]);
        assert_eq!(series.capacity(), 1);
        assert_eq!(series.start().since(t0), Interval::from_secs(1));
    }

    #[test]
    fn test_negative_capacity_is_rejected() {
        assert!(matches!(
            BoundedSeries::try_new(-1, Interval::from_secs(1)),
            Err(SeriesError::NegativeCapacity(-1))
        ));

        let series = BoundedSeries::try_new(3, Interval::from_secs(1)).unwrap();
        series.add(9);
        assert!(matches!(
            series.try_set_max_length(-4),
            Err(SeriesError::NegativeCapacity(-4))
        ));
        assert_eq!(series.capacity(), 3);
        assert_eq!(series.data(), vec![9]);
    }

    #[test]
    fn test_reset_start_time() {
        let series = BoundedSeries::new(10, Interval::from_secs(1));
        for v in 0..4 {
            series.add(v);
        }
        let end = series.end();

        let before = Timestamp::now();
        series.reset_start_time();
        let after = Timestamp::now();

        let start = series.start();
        assert!(start >= before.shifted(Interval::from_secs(-4)));
        assert!(start <= after.shifted(Interval::from_secs(-4)));
        assert_eq!(series.end(), end);
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_subscribe_receives_adds() {
        let series = BoundedSeries::new(2, Interval::from_secs(1));
        let handle = series.subscribe();

        series.add(1);
        series.add(2);
        series.unsubscribe(handle.id);

        let received: Vec<i64> = handle.iter().collect();
        assert_eq!(received, vec![1, 2]);
        assert_eq!(series.data(), received);
    }

    #[test]
    fn test_repeated_unsubscribe() {
        let series = BoundedSeries::new(2, Interval::from_secs(1));
        let handle = series.subscribe();

        series.unsubscribe(handle.id);
        series.unsubscribe(handle.id);
        series.unsubscribe(SubscriptionId(1234));
        assert_eq!(series.subscriber_count(), 0);
    }

    #[test]
    fn test_full_subscriber_is_dropped() {
        let series = BoundedSeries::new(0, Interval::from_secs(1));
        let handle = series.subscribe_with_capacity(3);

        for v in 0..5 {
            series.add(v);
        }
        assert_eq!(series.subscriber_count(), 0);
        assert_eq!(series.len(), 5);

        for expected in 0..3 {
            assert_eq!(handle.try_recv(), Ok(expected));
        }
        assert_eq!(handle.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[test]
    fn test_dropping_series_closes_channels() {
        let series = BoundedSeries::new(2, Interval::from_secs(1));
        let handle = series.subscribe();
        series.add(3);
        drop(series);

        assert_eq!(handle.recv(), Ok(3));
        assert!(handle.recv().is_err());
    }

    #[test]
    fn test_snapshot_matches_accessors() {
        let series = BoundedSeries::new(4, Interval::from_millis(500));
        series.add(10);
        series.add(20);

        let snapshot = series.snapshot();
        assert_eq!(snapshot.data, vec![10, 20]);
        assert_eq!(snapshot.start, series.start());
        assert_eq!(snapshot.end, series.end());
        assert_eq!(snapshot.interval, Interval::from_millis(500));
    }
}
