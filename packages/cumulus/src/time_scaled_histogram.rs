use std::sync::Arc;
use std::time::Duration;

use num_traits::AsPrimitive;

use crate::{Histogram, Observe, Result, ScaleRatio, ScaledHistogram, Snapshot, TimeUnit};

/// A view of a [`Histogram`] whose boundaries are a quantity of time.
///
/// This is a [`ScaledHistogram`] where the conversion ratio is derived from two units of time:
/// the base unit the boundaries of the histogram are defined in and the display unit that
/// this view observes and reports in.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use cumulus::{BucketLayout, Histogram, TimeScaledHistogram, TimeUnit};
///
/// // Boundaries at 10, 20, ..., 100 milliseconds.
/// let latency = TimeScaledHistogram::new(
///     Histogram::new(BucketLayout::linear(0.0, 10.0, 10).unwrap()),
///     TimeUnit::Milliseconds,
/// );
///
/// latency.observe_duration(Duration::from_micros(12_500)).unwrap();
///
/// let in_seconds = latency.shift_scale(TimeUnit::Seconds).unwrap();
/// in_seconds.observe(0.015).unwrap();
///
/// let snapshot = in_seconds.snapshot();
/// let bucket = snapshot.buckets().find(|b| b.count() > 0).unwrap();
/// assert_eq!(bucket.tag(), "0.02");
/// assert_eq!(bucket.count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct TimeScaledHistogram {
    scaled: ScaledHistogram,

    base_unit: TimeUnit,
    display_unit: TimeUnit,
}

impl TimeScaledHistogram {
    /// Creates a view of a histogram whose boundaries are expressed in `base_unit`.
    ///
    /// The view initially observes and reports in the base unit.
    #[must_use]
    pub fn new(base: Histogram, base_unit: TimeUnit) -> Self {
        Self::from_shared(Arc::new(base), base_unit)
    }

    /// Creates a view of a histogram that may already be shared with other owners.
    #[must_use]
    pub fn from_shared(base: Arc<Histogram>, base_unit: TimeUnit) -> Self {
        Self {
            scaled: ScaledHistogram::from_shared(base),
            base_unit,
            display_unit: base_unit,
        }
    }

    /// Creates a new view of the same histogram that observes and reports in `display_unit`.
    ///
    /// This view is not modified and no recorded data is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`][crate::Error::InvalidParameter] if a finite
    /// boundary of the underlying histogram cannot be expressed in `display_unit`, either
    /// because it overflows to infinity or because two adjacent boundaries become equal.
    pub fn shift_scale(&self, display_unit: TimeUnit) -> Result<Self> {
        Ok(Self {
            scaled: self
                .scaled
                .shift_scale(ScaleRatio::between(self.base_unit, display_unit))?,
            base_unit: self.base_unit,
            display_unit,
        })
    }

    /// Observes one sample, expressed in the display unit of this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObservation`][crate::Error::InvalidObservation] if the value
    /// is NaN. No bucket is modified.
    #[inline]
    pub fn observe(&self, value: impl AsPrimitive<f64>) -> Result<()> {
        self.scaled.observe(value)
    }

    /// Observes `count` samples with the same value, expressed in the display unit of this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObservation`][crate::Error::InvalidObservation] if the value
    /// is NaN. No bucket is modified.
    #[inline]
    pub fn observe_batch(&self, value: impl AsPrimitive<f64>, count: u64) -> Result<()> {
        self.scaled.observe_batch(value, count)
    }

    /// Observes one sample with the given duration.
    ///
    /// The duration is converted into a (possibly fractional) number of display units.
    ///
    /// # Errors
    ///
    /// This never fails in practice because a duration always converts to an ordered number,
    /// but shares the signature of the other observation methods.
    #[inline]
    pub fn observe_duration(&self, duration: Duration) -> Result<()> {
        self.scaled.observe(self.display_unit.units_in(duration))
    }

    /// Takes a snapshot of the current bucket counts, with boundaries and tags
    /// expressed in the display unit of this view.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.scaled.snapshot()
    }

    /// The unit the boundaries of the underlying histogram are defined in.
    #[must_use]
    pub fn base_unit(&self) -> TimeUnit {
        self.base_unit
    }

    /// The unit this view observes and reports in.
    #[must_use]
    pub fn display_unit(&self) -> TimeUnit {
        self.display_unit
    }

    /// The unit-agnostic view this time-scaled view is built on.
    #[must_use]
    pub fn as_scaled(&self) -> &ScaledHistogram {
        &self.scaled
    }
}

impl Observe for TimeScaledHistogram {
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
