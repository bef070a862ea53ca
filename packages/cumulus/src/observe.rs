use num_traits::AsPrimitive;

use crate::Result;

/// Operations common to every type that accepts observations into a histogram.
///
/// This allows code to record samples without caring whether it holds a plain
/// [`Histogram`][crate::Histogram] or a rescaled view of one.
pub trait Observe {
    /// Observes one sample with the given value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObservation`][crate::Error::InvalidObservation] if the value
    /// cannot be ordered against the bucket boundaries. No bucket is modified in that case.
    fn observe(&self, value: impl AsPrimitive<f64>) -> Result<()>;

    /// Observes `count` samples, each with the same value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObservation`][crate::Error::InvalidObservation] if the value
    /// cannot be ordered against the bucket boundaries. No bucket is modified in that case.
    fn observe_batch(&self, value: impl AsPrimitive<f64>, count: u64) -> Result<()>;
}
