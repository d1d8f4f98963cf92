//! Core types for bounded series.

use crate::duration::Interval;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Nanoseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current wall-clock time.
    pub fn now() -> Self {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => Timestamp(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)),
            Err(e) => Timestamp(-i64::try_from(e.duration().as_nanos()).unwrap_or(i64::MAX)),
        }
    }

    /// This timestamp moved by `by` (backwards when negative), saturating.
    pub fn shifted(self, by: Interval) -> Self {
        Timestamp(self.0.saturating_add(by.as_nanos()))
    }

    /// Signed distance from `earlier` to `self`.
    pub fn since(self, earlier: Timestamp) -> Interval {
        Interval::from_nanos(self.0.saturating_sub(earlier.0))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point-in-time copy of a series' values and time span.
///
/// Taken under the series' read lock by
/// [`BoundedSeries::snapshot`](crate::BoundedSeries::snapshot); owns no
/// locks or channels and can be handed to other components freely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    /// Nominal time of the oldest retained sample.
    pub start: Timestamp,
    /// Time of the most recent append.
    pub end: Timestamp,
    /// Nominal spacing between samples.
    pub interval: Interval,
    /// Retained samples, oldest first.
    pub data: Vec<i64>,
}

impl SeriesSnapshot {
    /// Encode as MessagePack.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    /// Decode from MessagePack.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    /// Nominal span covered by the retained samples.
    pub fn span(&self) -> Interval {
        self.end.since(self.start)
    }
}
