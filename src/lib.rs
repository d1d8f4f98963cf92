//! # Bounded Series
//!
//! A fixed-capacity, time-stamped series of integer samples with live
//! broadcast to subscribers, meant to sit inside a monitoring or dashboard
//! component.
//!
//! ## Core Concepts
//!
//! - **Series**: append-only samples, oldest evicted once capacity is reached
//! - **Time span**: `start`/`end` stamps plus a nominal sample interval; each
//!   eviction shifts `start` forward by one interval
//! - **Subscribers**: bounded channels fed on every append; slow ones are
//!   dropped instead of blocking the producer
//!
//! ## Example
//!
//! ```
//! use bounded_series::{BoundedSeries, Interval};
//!
//! let series = BoundedSeries::new(4, Interval::from_secs(1));
//! let handle = series.subscribe();
//!
//! series.add(7);
//! assert_eq!(handle.recv(), Ok(7));
//! assert_eq!(series.padded(), vec![7, 7, 7, 7]);
//!
//! series.unsubscribe(handle.id);
//! assert!(handle.recv().is_err());
//! ```

pub mod buffer;
pub mod config;
pub mod duration;
pub mod error;
pub mod series;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use buffer::SampleBuffer;
pub use config::SeriesConfig;
pub use duration::Interval;
pub use error::{Result, SeriesError};
pub use series::BoundedSeries;
pub use subscriptions::{
    DropReason, SubscriberRegistry, SubscriptionHandle, SubscriptionId, DEFAULT_CHANNEL_CAPACITY,
};
pub use types::{SeriesSnapshot, Timestamp};
