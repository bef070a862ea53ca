use std::iter;
use std::sync::Arc;
use std::sync::atomic::{self, AtomicU64};

use num_traits::AsPrimitive;
use tracing::debug;

use crate::bucket_layout::is_strictly_ascending;
use crate::{
    BucketLayout, BucketSnapshot, Error, HistogramBuilder, Observe, Result, ScaleRatio, Snapshot,
    TagFormatter,
};

/// We use `Relaxed` ordering for the bucket counters. Each counter is only ever incremented
/// atomically, so no increment is lost, but we make no promise about the order in which
/// increments to different buckets become visible to a concurrent snapshot.
const SLOT_ACCESS_ORDERING: atomic::Ordering = atomic::Ordering::Relaxed;

/// A cumulative histogram with a fixed set of buckets.
///
/// Each bucket has an upper bound (inclusive) and counts the observations that are less than
/// or equal to that bound. The last bucket always has the upper bound `+inf` and therefore
/// counts every observation.
///
/// The set of buckets is fixed when the histogram is created from a [`BucketLayout`].
/// Only the counts change afterwards.
///
/// # Example
///
/// ```
/// use cumulus::{BucketLayout, Histogram};
///
/// let histogram = Histogram::new(BucketLayout::exponential(1.0, 2.0, 5).unwrap());
///
/// for value in [0.0, 1.5, 3.0, 7.0, 16.0, 17.0] {
///     histogram.observe(value).unwrap();
/// }
///
/// let snapshot = histogram.snapshot();
/// assert_eq!(
///     snapshot.tags().collect::<Vec<_>>(),
///     ["1.0", "2.0", "4.0", "8.0", "16.0", "Infinity"]
/// );
/// assert_eq!(snapshot.counts().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
/// ```
///
/// # Thread safety
///
/// This type is thread-safe. Any number of threads may observe values concurrently and no
/// observation is lost. A snapshot taken while other threads are observing values is not an
/// atomic point-in-time view across all buckets - each bucket's count is individually
/// consistent but different buckets may reflect slightly different moments.
#[derive(Debug)]
pub struct Histogram {
    /// Finite, strictly ascending. The `+inf` boundary is never stored here;
    /// it is implied by the last slot.
    boundaries: Box<[f64]>,

    /// One tag per bucket, including the `+inf` bucket.
    tags: Box<[Arc<str>]>,

    /// Observations that landed exactly in each bucket (not cumulative), including
    /// the `+inf` bucket. Cumulative counts are calculated when taking a snapshot.
    slot_counts: Box<[AtomicU64]>,

    tag_formatter: TagFormatter,
}

impl Histogram {
    /// Creates a new histogram builder with the default builder configuration.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Gets replaced with itself by different name, bad mutation.
    pub fn builder() -> HistogramBuilder {
        HistogramBuilder::new()
    }

    /// Creates a histogram with the given buckets and the default tag formatter.
    #[must_use]
    pub fn new(layout: BucketLayout) -> Self {
        Self::builder().layout(layout).build()
    }

    /// Creates a histogram with the given buckets and tag formatter.
    #[must_use]
    pub fn with_tag_formatter(layout: BucketLayout, tag_formatter: TagFormatter) -> Self {
        Self::builder()
            .layout(layout)
            .tag_formatter(tag_formatter)
            .build()
    }

    pub(crate) fn from_parts(layout: BucketLayout, tag_formatter: TagFormatter) -> Self {
        let boundaries = layout.into_boundaries();

        let tags: Box<[Arc<str>]> = boundaries
            .iter()
            .copied()
            .chain(iter::once(f64::INFINITY))
            .map(|boundary| Arc::from(tag_formatter.format(boundary)))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        let slot_counts = iter::repeat_with(|| AtomicU64::new(0))
            .take(tags.len())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        // Important type invariant - every lookup result from `find_bucket_index()`
        // must be a valid index into both of these.
        debug_assert_eq!(slot_counts.len(), boundaries.len() + 1);
        debug_assert_eq!(tags.len(), slot_counts.len());

        debug!(
            buckets = slot_counts.len(),
            lowest_boundary = boundaries.first().copied(),
            highest_finite_boundary = boundaries.last().copied(),
            "histogram created"
        );

        Self {
            boundaries,
            tags,
            slot_counts,
            tag_formatter,
        }
    }

    /// Observes one sample with the given value.
    ///
    /// The sample is counted in every bucket whose upper bound is greater than or equal to
    /// the value. Values greater than every finite boundary are only counted by the `+inf`
    /// bucket.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObservation`] if the value is NaN. No bucket is modified.
    #[inline]
    pub fn observe(&self, value: impl AsPrimitive<f64>) -> Result<()> {
        self.observe_batch(value, 1)
    }

    /// Observes `count` samples, each with the same value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObservation`] if the value is NaN. No bucket is modified.
    #[inline]
    pub fn observe_batch(&self, value: impl AsPrimitive<f64>, count: u64) -> Result<()> {
        let value: f64 = value.as_();

        if value.is_nan() {
            debug!(value, count, "rejected observation that cannot be ordered");
            return Err(Error::InvalidObservation { value });
        }

        let bucket_index = find_bucket_index(value, &self.boundaries);

        // Counters wrap on overflow. Crate policy is to not panic during observation.
        self.slot_counts
            .get(bucket_index)
            .expect("type invariant: there is one slot for every finite boundary plus one for +inf")
            .fetch_add(count, SLOT_ACCESS_ORDERING);

        Ok(())
    }

    /// Takes a snapshot of the current bucket counts, in ascending order of boundaries.
    ///
    /// The count of each bucket in the snapshot is the number of observations less than or
    /// equal to the boundary of that bucket.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let buckets = self
            .boundaries()
            .zip(self.tags.iter())
            .zip(self.cumulative_counts())
            .map(|((boundary, tag), count)| BucketSnapshot::new(boundary, Arc::clone(tag), count))
            .collect();

        Snapshot::new(buckets)
    }

    /// Checks that every finite boundary stays finite and strictly ascending
    /// when multiplied by `ratio`.
    pub(crate) fn check_scale(&self, ratio: ScaleRatio) -> Result<()> {
        let scaled = self
            .boundaries
            .iter()
            .map(|&boundary| ratio.base_to_display(boundary))
            .collect::<Vec<_>>();

        if !scaled.iter().all(|boundary| boundary.is_finite())
            || !is_strictly_ascending(&scaled)
        {
            return Err(Error::invalid_parameter(
                "ratio",
                ratio,
                "scaled bucket boundaries must remain finite and strictly ascending",
            ));
        }

        Ok(())
    }

    /// Takes a snapshot with every finite boundary multiplied by `ratio`
    /// and re-tagged with this histogram's tag formatter.
    ///
    /// The `+inf` bucket keeps its boundary and tag.
    pub(crate) fn snapshot_scaled(&self, ratio: ScaleRatio) -> Snapshot {
        if ratio.is_identity() {
            return self.snapshot();
        }

        let infinity_tag = self
            .tags
            .last()
            .expect("type invariant: there is always a +inf bucket");

        let buckets = self
            .boundaries
            .iter()
            .map(|&boundary| {
                let scaled = ratio.base_to_display(boundary);
                (scaled, Arc::from(self.tag_formatter.format(scaled)))
            })
            .chain(iter::once((f64::INFINITY, Arc::clone(infinity_tag))))
            .zip(self.cumulative_counts())
            .map(|((boundary, tag), count)| BucketSnapshot::new(boundary, tag, count))
            .collect();

        Snapshot::new(buckets)
    }

    /// Iterates over the upper bounds of the buckets, in ascending order.
    ///
    /// The last boundary is always `f64::INFINITY`.
    pub fn boundaries(&self) -> impl Iterator<Item = f64> {
        self.boundaries
            .iter()
            .copied()
            .chain(iter::once(f64::INFINITY))
    }

    /// The number of buckets, including the `+inf` bucket.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.slot_counts.len()
    }

    /// The formatter used to render bucket tags.
    #[must_use]
    pub fn tag_formatter(&self) -> &TagFormatter {
        &self.tag_formatter
    }

    fn cumulative_counts(&self) -> impl Iterator<Item = u64> {
        self.slot_counts.iter().scan(0_u64, |running_total, slot| {
            *running_total = running_total.wrapping_add(slot.load(SLOT_ACCESS_ORDERING));
            Some(*running_total)
        })
    }
}

impl Observe for Histogram {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    #[inline]
    fn observe(&self, value: impl AsPrimitive<f64>) -> Result<()> {
        self.observe(value)
    }

    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    #[inline]
    fn observe_batch(&self, value: impl AsPrimitive<f64>, count: u64) -> Result<()> {
        self.observe_batch(value, count)
    }
}

/// Identifies the bucket that accepts an observed value.
///
/// `boundaries` are the finite boundaries in ascending order. The result is the index of the
/// first boundary that is greater than or equal to `value`, or `boundaries.len()` (the `+inf`
/// bucket) if the value exceeds all of them.
///
/// The caller must have rejected NaN before calling this.
#[inline]
pub fn find_bucket_index(value: f64, boundaries: &[f64]) -> usize {
    boundaries
        .iter()
        .position(|&boundary| value <= boundary)
        .unwrap_or(boundaries.len())
}
