#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! # cumulus
//!
//! Cumulative histograms with fixed bucket boundaries, safe to feed from many threads at once,
//! with cheap views that observe and report in a different unit than the one the buckets
//! were defined in.
//!
//! # Defining buckets
//!
//! A [`BucketLayout`] is the ascending sequence of finite upper bounds (inclusive) of the
//! buckets. A final bucket with the upper bound `+inf` is always added by the histogram.
//!
//! ```
//! use cumulus::BucketLayout;
//!
//! // 15, 25, 35, 45, 55
//! let linear = BucketLayout::linear(5.0, 10.0, 5).unwrap();
//! assert_eq!(linear.boundaries(), [15.0, 25.0, 35.0, 45.0, 55.0]);
//!
//! // 1, 2, 4, 8, 16
//! let exponential = BucketLayout::exponential(1.0, 2.0, 5).unwrap();
//! assert_eq!(exponential.boundaries(), [1.0, 2.0, 4.0, 8.0, 16.0]);
//!
//! // Any strictly ascending sequence of finite values.
//! let custom = BucketLayout::custom([0.5, 1.0, 2.5, 10.0]).unwrap();
//! assert_eq!(custom.boundaries().len(), 4);
//! ```
//!
//! Requesting a layout that cannot produce a strictly ascending sequence of finite boundaries
//! (e.g. a zero bucket width or a growth factor of 1) fails with [`Error::InvalidParameter`].
//!
//! # Capturing observations
//!
//! ```
//! use cumulus::{BucketLayout, Histogram};
//!
//! let histogram = Histogram::new(BucketLayout::linear(5.0, 10.0, 5).unwrap());
//!
//! histogram.observe(14).unwrap();
//! histogram.observe(30.5).unwrap();
//!
//! // 500 samples with the same value in one call.
//! histogram.observe_batch(1000, 500).unwrap();
//!
//! // NaN cannot be placed in any bucket and is rejected without touching the counts.
//! assert!(histogram.observe(f64::NAN).is_err());
//! ```
//!
//! # Reading the counts
//!
//! A [`Snapshot`] holds the tag and the cumulative count of every bucket, in ascending order of
//! boundaries. The count of a bucket is the number of observations less than or equal to its
//! boundary, so the `+inf` bucket holds the total.
//!
//! ```
//! use cumulus::{BucketLayout, Histogram};
//!
//! let histogram = Histogram::new(BucketLayout::linear(5.0, 10.0, 5).unwrap());
//!
//! for value in [0, 14, 24, 30, 43, 1000] {
//!     histogram.observe(value).unwrap();
//! }
//!
//! let snapshot = histogram.snapshot();
//!
//! assert_eq!(
//!     snapshot.pairs().collect::<Vec<_>>(),
//!     [
//!         ("15.0", 2),
//!         ("25.0", 3),
//!         ("35.0", 4),
//!         ("45.0", 5),
//!         ("55.0", 5),
//!         ("Infinity", 6)
//!     ]
//! );
//!
//! // The Display implementation draws the snapshot for a terminal.
//! println!("{snapshot}");
//! ```
//!
//! # Observing in a different unit
//!
//! A [`ScaledHistogram`] is a view of a histogram that converts observations from its own
//! display unit into the unit the boundaries were defined in, and converts boundaries back
//! into the display unit when taking a snapshot. Rescaling creates a new view over the same
//! counts - nothing is copied and no recorded data changes.
//!
//! For quantities of time, [`TimeScaledHistogram`] derives the conversion from [`TimeUnit`]s
//! and can observe a [`Duration`][std::time::Duration] directly.
//!
//! ```
//! use std::time::Duration;
//!
//! use cumulus::{BucketLayout, Histogram, TimeScaledHistogram, TimeUnit};
//!
//! let latency = TimeScaledHistogram::new(
//!     Histogram::new(BucketLayout::linear(0.0, 10.0, 10).unwrap()),
//!     TimeUnit::Milliseconds,
//! );
//!
//! let latency_seconds = latency.shift_scale(TimeUnit::Seconds).unwrap();
//! latency_seconds.observe(0.015).unwrap();
//! latency.observe_duration(Duration::from_millis(12)).unwrap();
//!
//! let snapshot = latency_seconds.snapshot();
//! let bucket = snapshot.buckets().find(|b| b.count() > 0).unwrap();
//!
//! assert_eq!(bucket.tag(), "0.02");
//! assert_eq!(bucket.count(), 2);
//! ```
//!
//! # Tags
//!
//! Every bucket carries a tag, the text form of its boundary. The default [`TagFormatter`]
//! renders `15.0`, `0.02` and `Infinity`; supply your own via [`Histogram::builder()`] to
//! match the conventions of an exporter.
//!
//! # Panic policy
//!
//! This crate may panic when building a histogram if a required builder parameter is missing.
//!
//! This crate will not panic for "mathematical" reasons during observation, such as overflow
//! of bucket counters.
//!
//! # Mathematics policy
//!
//! Bucket counters wrap around on overflow. Do not stray near `u64::MAX` observations
//! and you should be fine.
//!
//! Conversions between units are performed in `f64`. A value that lies within rounding
//! distance of a boundary after conversion may land on either side of it.

mod bucket_layout;
mod bucket_snapshot;
mod error;
mod histogram;
mod histogram_builder;
mod observe;
mod scale_ratio;
mod scaled_histogram;
mod snapshot;
mod tag_formatter;
mod time_scaled_histogram;
mod time_unit;

pub use bucket_layout::*;
pub use bucket_snapshot::*;
pub use error::*;
pub use histogram::Histogram;
pub use histogram_builder::*;
pub use observe::*;
pub use scale_ratio::*;
pub use scaled_histogram::*;
pub use snapshot::*;
pub use tag_formatter::*;
pub use time_scaled_histogram::*;
pub use time_unit::*;

/// Implementation details exposed for benchmarks. Not part of the public API.
#[doc(hidden)]
pub mod private {
    pub use crate::histogram::find_bucket_index;
}
