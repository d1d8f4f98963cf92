//! Error handling and edge case tests.

use bounded_series::{BoundedSeries, Interval, SeriesError, SubscriptionId};

// --- Capacity Contract ---

#[test]
fn test_negative_capacity_at_construction() {
    let result = BoundedSeries::try_new(-5, Interval::from_secs(1));
    assert!(matches!(result, Err(SeriesError::NegativeCapacity(-5))));
}

#[test]
fn test_negative_resize_leaves_series_untouched() {
    let series = BoundedSeries::try_new(2, Interval::from_secs(1)).unwrap();
    let start = series.start();
    series.add(1);
    series.add(2);

    let result = series.try_set_max_length(-1);
    assert!(matches!(result, Err(SeriesError::NegativeCapacity(-1))));

    assert_eq!(series.capacity(), 2);
    assert_eq!(series.data(), vec![1, 2]);
    assert_eq!(series.start(), start);
}

#[test]
fn test_checked_resize_accepts_zero_and_positive() {
    let series = BoundedSeries::try_new(0, Interval::from_secs(1)).unwrap();
    for v in 0..4 {
        series.add(v);
    }

    series.try_set_max_length(2).unwrap();
    assert_eq!(series.data(), vec![2, 3]);

    series.try_set_max_length(0).unwrap();
    assert!(series.is_empty());
    assert_eq!(series.capacity(), 0);
}

#[test]
fn test_resize_to_zero_drops_everything_then_unbounds() {
    let series = BoundedSeries::new(2, Interval::from_secs(1));
    let t0 = series.start();
    series.add(1);
    series.add(2);

    series.set_max_length(0);
    assert!(series.data().is_empty());
    assert_eq!(series.start().since(t0), Interval::from_secs(2));

    for v in 3..7 {
        series.add(v);
    }
    assert_eq!(series.data(), vec![3, 4, 5, 6]);
    assert_eq!(series.start().since(t0), Interval::from_secs(2));
}

// --- Unbounded Capacity ---

#[test]
fn test_unbounded_padded_is_empty() {
    let series = BoundedSeries::new(0, Interval::from_secs(1));
    assert!(series.padded().is_empty());

    series.add(1);
    series.add(2);
    assert!(series.padded().is_empty());
    assert_eq!(series.data(), vec![1, 2]);
}

// --- Subscription Edge Cases ---

#[test]
fn test_unsubscribe_unknown_id_is_noop() {
    let series = BoundedSeries::new(2, Interval::from_secs(1));
    series.unsubscribe(SubscriptionId(42));

    let handle = series.subscribe();
    series.unsubscribe(handle.id);
    series.unsubscribe(handle.id);
    assert_eq!(series.subscriber_count(), 0);
}

#[test]
fn test_dropped_receiver_is_cleaned_up_on_next_add() {
    let series = BoundedSeries::new(2, Interval::from_secs(1));
    let handle = series.subscribe();
    drop(handle);
    assert_eq!(series.subscriber_count(), 1);

    series.add(1);
    assert_eq!(series.subscriber_count(), 0);
}

#[test]
fn test_force_dropped_id_is_not_reissued() {
    let series = BoundedSeries::new(0, Interval::from_secs(1));
    let slow = series.subscribe_with_capacity(1);
    series.add(1);
    series.add(2);
    assert_eq!(series.subscriber_count(), 0);

    let next = series.subscribe();
    assert!(next.id > slow.id);

    // Unsubscribing the dropped id must not touch the new subscriber.
    series.unsubscribe(slow.id);
    assert_eq!(series.subscriber_count(), 1);
}

// --- Interval Edge Cases ---

#[test]
fn test_zero_interval_never_moves_start() {
    let series = BoundedSeries::new(1, Interval::ZERO);
    let start = series.start();
    for v in 0..10 {
        series.add(v);
    }
    series.set_max_length(1);
    assert_eq!(series.start(), start);
}

#[test]
fn test_invalid_interval_text() {
    let err = "ten seconds".parse::<Interval>().unwrap_err();
    assert!(matches!(err, SeriesError::InvalidInterval { .. }));
    assert!(err.to_string().contains("ten seconds"));
}

#[test]
fn test_truncated_interval_bytes() {
    let bytes = Interval::from_secs(3).to_bytes();
    let err = Interval::from_bytes(&bytes[..5]).unwrap_err();
    assert!(matches!(err, SeriesError::IntervalDecode(_)));
}
