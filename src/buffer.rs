//! Plain sample storage with capacity bookkeeping.
//!
//! [`SampleBuffer`] holds no locks; [`BoundedSeries`](crate::BoundedSeries)
//! wraps it. Every eviction advances `start` by the nominal interval instead
//! of looking at the clock, so `start` only stays accurate if samples really
//! arrive once per interval. [`SampleBuffer::reset_start`] re-anchors it.

use crate::duration::Interval;
use crate::types::{SeriesSnapshot, Timestamp};
use std::collections::VecDeque;

/// Upper bound on samples reserved up front; larger series grow on demand.
const PREALLOCATE_LIMIT: usize = 4096;

/// Retained samples plus their nominal time span.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    start: Timestamp,
    end: Timestamp,
    interval: Interval,
    data: VecDeque<i64>,
    /// Zero means unbounded.
    capacity: usize,
}

impl SampleBuffer {
    /// Empty buffer with `start` and `end` at `now`.
    pub fn new(capacity: usize, interval: Interval, now: Timestamp) -> Self {
        Self {
            start: now,
            end: now,
            interval,
            data: VecDeque::with_capacity(capacity.min(PREALLOCATE_LIMIT)),
            capacity,
        }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Retained samples, oldest first.
    pub fn values(&self) -> Vec<i64> {
        self.data.iter().copied().collect()
    }

    /// Append `value` stamped at `now`, evicting the oldest sample when full.
    ///
    /// Returns the evicted sample, if any.
    pub fn push(&mut self, value: i64, now: Timestamp) -> Option<i64> {
        let mut evicted = None;
        if self.capacity > 0 && self.data.len() >= self.capacity {
            evicted = self.data.pop_front();
            self.start = self.start.shifted(self.interval);
        }
        self.data.push_back(value);
        self.end = now;
        evicted
    }

    /// Exactly `capacity` samples, left-padded with the oldest value.
    ///
    /// An empty buffer pads with zeros; an unbounded buffer yields nothing.
    pub fn padded(&self) -> Vec<i64> {
        let len = self.data.len();
        if len >= self.capacity {
            return self.data.iter().take(self.capacity).copied().collect();
        }

        let fill = self.data.front().copied().unwrap_or_default();
        let mut out = Vec::with_capacity(self.capacity);
        out.resize(self.capacity - len, fill);
        out.extend(self.data.iter().copied());
        out
    }

    /// Change the capacity, dropping the oldest samples that no longer fit.
    ///
    /// Returns how many samples were dropped. `start` advances one interval
    /// per dropped sample. Zero drops everything, then leaves the buffer
    /// unbounded.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        if self.data.len() <= capacity {
            return 0;
        }
        let dropped = self.data.len() - capacity;
        self.data.drain(..dropped);
        self.start = self.start.shifted(self.interval.times(dropped));
        dropped
    }

    /// Re-anchor `start` to `now - len * interval`.
    pub fn reset_start(&mut self, now: Timestamp) {
        let span = self.interval.times(self.data.len());
        self.start = now.shifted(Interval::from_nanos(span.as_nanos().saturating_neg()));
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            start: self.start,
            end: self.end,
            interval: self.interval,
            data: self.values(),
        }
    }
}
