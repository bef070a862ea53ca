use std::sync::Arc;

use num_traits::AsPrimitive;
use tracing::trace;

use crate::{Histogram, Observe, Result, ScaleRatio, Snapshot};

/// A view of a [`Histogram`] in a different unit than the one its boundaries are defined in.
///
/// The boundaries of the underlying histogram are stored in a fixed base unit. The view
/// translates observations from its display unit into the base unit before recording them
/// and translates boundaries from the base unit into its display unit when taking a snapshot.
/// The bucket structure of the underlying histogram never changes.
///
/// Rescaling a view via [`shift_scale()`][Self::shift_scale] creates a new view that shares
/// the same underlying histogram. Both views observe into and read from the same counts -
/// they are two coordinate systems over one data set.
///
/// # Example
///
/// ```
/// use cumulus::{BucketLayout, Histogram, ScaleRatio, ScaledHistogram};
///
/// // Boundaries at 10, 20, ..., 100 (e.g. milliseconds).
/// let view = ScaledHistogram::new(Histogram::new(BucketLayout::linear(0.0, 10.0, 10).unwrap()));
///
/// // The consumer of this histogram wants to work in seconds instead.
/// let in_seconds = view.shift_scale(ScaleRatio::new(1, 1000).unwrap()).unwrap();
/// in_seconds.observe(0.015).unwrap();
///
/// let snapshot = in_seconds.snapshot();
/// let bucket = snapshot.buckets().find(|b| b.count() > 0).unwrap();
/// assert_eq!(bucket.tag(), "0.02");
/// assert_eq!(bucket.count(), 1);
///
/// // The original view sees the same observation, in the original unit.
/// let snapshot = view.snapshot();
/// let bucket = snapshot.buckets().find(|b| b.count() > 0).unwrap();
/// assert_eq!(bucket.tag(), "20.0");
/// ```
///
/// # Thread safety
///
/// This type is thread-safe. A view holds no mutable state of its own and may be cloned
/// and shared freely; all clones and all rescaled views record into the same histogram.
#[derive(Clone, Debug)]
pub struct ScaledHistogram {
    base: Arc<Histogram>,

    // Base unit to display unit. Never changes after the view is created.
    ratio: ScaleRatio,
}

impl ScaledHistogram {
    /// Creates a view of a histogram in its own base unit.
    #[must_use]
    pub fn new(base: Histogram) -> Self {
        Self::from_shared(Arc::new(base))
    }

    /// Creates a view of a histogram that may already be shared with other owners,
    /// in its own base unit.
    #[must_use]
    pub fn from_shared(base: Arc<Histogram>) -> Self {
        Self {
            base,
            ratio: ScaleRatio::IDENTITY,
        }
    }

    /// Creates a new view of the same histogram with a different display unit.
    ///
    /// `ratio` converts from the base unit of the underlying histogram to the new display
    /// unit. It is not relative to the display unit of this view.
    ///
    /// This view is not modified and no recorded data is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`][crate::Error::InvalidParameter] if the ratio would
    /// turn a finite boundary of the underlying histogram into an infinity or make two
    /// adjacent boundaries equal in the display unit.
    pub fn shift_scale(&self, ratio: ScaleRatio) -> Result<Self> {
        self.base.check_scale(ratio)?;

        trace!(from = %self.ratio, to = %ratio, "histogram view rescaled");

        Ok(Self {
            base: Arc::clone(&self.base),
            ratio,
        })
    }

    /// Observes one sample with the given value, expressed in the display unit of this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObservation`][crate::Error::InvalidObservation] if the value
    /// is NaN. No bucket is modified.
    #[inline]
    pub fn observe(&self, value: impl AsPrimitive<f64>) -> Result<()> {
        self.observe_batch(value, 1)
    }

    /// Observes `count` samples with the same value, expressed in the display unit of this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObservation`][crate::Error::InvalidObservation] if the value
    /// is NaN. No bucket is modified.
    #[inline]
    pub fn observe_batch(&self, value: impl AsPrimitive<f64>, count: u64) -> Result<()> {
        self.base.observe_batch(self.ratio.display_to_base(value.as_()), count)
    }

    /// Takes a snapshot of the current bucket counts, with boundaries and tags
    /// expressed in the display unit of this view.
    ///
    /// The `+inf` bucket is not affected by scaling.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.base.snapshot_scaled(self.ratio)
    }

    /// The ratio that converts from the base unit of the underlying histogram
    /// to the display unit of this view.
    #[must_use]
    pub fn ratio(&self) -> ScaleRatio {
        self.ratio
    }

    /// The underlying histogram, with boundaries in the base unit.
    #[must_use]
    pub fn base(&self) -> &Arc<Histogram> {
        &self.base
    }
}

impl From<Histogram> for ScaledHistogram {
    fn from(base: Histogram) -> Self {
        Self::new(base)
    }
}

impl Observe for ScaledHistogram {
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
