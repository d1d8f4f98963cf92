//! Live broadcast of appended samples.
//!
//! Every subscriber owns a bounded channel. Broadcasting never blocks: a
//! subscriber whose channel is full is dropped and its channel closed, so
//! consumers must be ready to see the channel close without having
//! unsubscribed themselves.
//!
//! # Example
//!
//! ```ignore
//! let series = BoundedSeries::new(60, Interval::from_secs(1));
//! let handle = series.subscribe();
//!
//! std::thread::spawn(move || {
//!     for sample in handle.iter() {
//!         println!("got {sample}");
//!     }
//!     // channel closed: unsubscribed, dropped for lagging, or series gone
//! });
//! ```

mod manager;
mod types;

pub use manager::SubscriberRegistry;
pub use types::{DropReason, SubscriptionHandle, SubscriptionId, DEFAULT_CHANNEL_CAPACITY};
