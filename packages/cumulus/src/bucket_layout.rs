use itertools::Itertools;

use crate::{Error, Result};

/// The finite upper bounds (inclusive) of the buckets of a histogram, in ascending order.
///
/// A layout never contains the `+inf` bucket. Every histogram synthesizes that bucket
/// automatically to catch values that exceed the last finite boundary.
///
/// Layouts are produced by one of the generator functions:
///
/// * [`BucketLayout::linear()`] - evenly spaced boundaries.
/// * [`BucketLayout::exponential()`] - boundaries that grow by a constant factor.
/// * [`BucketLayout::custom()`] - an explicit list of boundaries.
///
/// # Example
///
/// ```
/// use cumulus::BucketLayout;
///
/// let layout = BucketLayout::linear(5.0, 10.0, 5).unwrap();
/// assert_eq!(layout.boundaries(), &[15.0, 25.0, 35.0, 45.0, 55.0]);
///
/// let layout = BucketLayout::exponential(1.0, 2.0, 5).unwrap();
/// assert_eq!(layout.boundaries(), &[1.0, 2.0, 4.0, 8.0, 16.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BucketLayout {
    // Finite, strictly ascending, never empty.
    boundaries: Box<[f64]>,
}

impl BucketLayout {
    /// Generates `count` evenly spaced boundaries, `width` apart.
    ///
    /// The first boundary is one step above `start`: the boundaries are `start + i * width`
    /// for `i` in `1..=count`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `start` is not finite, if `width` is not a finite
    /// value greater than zero, if `count` is zero or if the resulting boundaries cannot be
    /// represented as distinct finite values.
    pub fn linear(start: f64, width: f64, count: usize) -> Result<Self> {
        if !start.is_finite() {
            return Err(Error::invalid_parameter(
                "start",
                start,
                "must be a finite value",
            ));
        }

        if !(width.is_finite() && width > 0.0) {
            return Err(Error::invalid_parameter(
                "width",
                width,
                "must be a finite value greater than zero",
            ));
        }

        if count == 0 {
            return Err(Error::invalid_parameter(
                "count",
                count,
                "must be at least one",
            ));
        }

        let boundaries = (1..=count).map(|step| {
            #[expect(
                clippy::cast_precision_loss,
                reason = "bucket counts are far below the range where f64 loses integer precision"
            )]
            let step = step as f64;

            start + step * width
        });

        Self::from_generated(boundaries)
    }

    /// Generates `count` boundaries where each boundary is `factor` times the previous one,
    /// starting with `start` itself.
    ///
    /// The boundaries are `start * factor^i` for `i` in `0..count`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `start` is not a finite value greater than zero,
    /// if `factor` is not a finite value greater than one, if `count` is zero or if the
    /// boundaries grow beyond the finite range of `f64`.
    pub fn exponential(start: f64, factor: f64, count: usize) -> Result<Self> {
        if !(start.is_finite() && start > 0.0) {
            return Err(Error::invalid_parameter(
                "start",
                start,
                "must be a finite value greater than zero",
            ));
        }

        if !(factor.is_finite() && factor > 1.0) {
            return Err(Error::invalid_parameter(
                "factor",
                factor,
                "must be a finite value greater than one",
            ));
        }

        if count == 0 {
            return Err(Error::invalid_parameter(
                "count",
                count,
                "must be at least one",
            ));
        }

        let boundaries = itertools::iterate(start, |previous| previous * factor).take(count);

        Self::from_generated(boundaries)
    }

    /// Uses an explicit list of boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the list is empty, contains a non-finite value
    /// or is not in strictly ascending order.
    pub fn custom(boundaries: impl IntoIterator<Item = f64>) -> Result<Self> {
        let boundaries = boundaries.into_iter().collect::<Vec<_>>();

        if boundaries.is_empty() {
            return Err(Error::invalid_parameter(
                "boundaries",
                "[]",
                "at least one boundary is required",
            ));
        }

        if let Some(&invalid) = boundaries.iter().find(|b| !b.is_finite()) {
            return Err(Error::invalid_parameter(
                "boundaries",
                invalid,
                "every boundary must be finite (the +inf bucket is added automatically)",
            ));
        }

        if !is_strictly_ascending(&boundaries) {
            return Err(Error::invalid_parameter(
                "boundaries",
                format!("{boundaries:?}"),
                "boundaries must be in strictly ascending order",
            ));
        }

        Ok(Self {
            boundaries: boundaries.into_boxed_slice(),
        })
    }

    /// The finite boundaries of the layout, in ascending order.
    ///
    /// This does not include the `+inf` boundary that every histogram adds.
    #[must_use]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub(crate) fn into_boundaries(self) -> Box<[f64]> {
        self.boundaries
    }

    /// Validates the output of a generator. Parameter checks alone cannot rule out
    /// overflow to infinity or adjacent values collapsing into one due to limited precision.
    fn from_generated(boundaries: impl Iterator<Item = f64>) -> Result<Self> {
        let boundaries = boundaries.collect::<Vec<_>>();

        if let Some(&invalid) = boundaries.iter().find(|b| !b.is_finite()) {
            return Err(Error::invalid_parameter(
                "count",
                invalid,
                "generated boundaries exceed the finite range of f64",
            ));
        }

        if !is_strictly_ascending(&boundaries) {
            return Err(Error::invalid_parameter(
                "width",
                format!("{boundaries:?}"),
                "generated boundaries are not distinct at this precision",
            ));
        }

        Ok(Self {
            boundaries: boundaries.into_boxed_slice(),
        })
    }
}

pub(crate) fn is_strictly_ascending(values: &[f64]) -> bool {
    values.iter().tuple_windows().all(|(lower, upper)| lower < upper)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn assert_invalid_parameter(result: Result<BucketLayout>, expected_parameter: &str) {
        match result {
            Err(Error::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, expected_parameter);
            }
            other => panic!("expected InvalidParameter({expected_parameter}), got {other:?}"),
        }
    }

    #[test]
    fn linear_starts_one_step_above_start() {
        let layout = BucketLayout::linear(5.0, 10.0, 5).unwrap();

        assert_eq!(layout.boundaries(), &[15.0, 25.0, 35.0, 45.0, 55.0]);
    }

    #[test]
    fn linear_with_zero_start() {
        let layout = BucketLayout::linear(0.0, 10.0, 10).unwrap();

        assert_eq!(
            layout.boundaries(),
            &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );
    }

    #[test]
    fn linear_negative_start_is_fine() {
        let layout = BucketLayout::linear(-20.0, 10.0, 3).unwrap();

        assert_eq!(layout.boundaries(), &[-10.0, 0.0, 10.0]);
    }

    #[test]
    fn linear_single_bucket() {
        let layout = BucketLayout::linear(1.0, 1.0, 1).unwrap();

        assert_eq!(layout.boundaries(), &[2.0]);
    }

    #[test]
    fn linear_rejects_invalid_parameters() {
        assert_invalid_parameter(BucketLayout::linear(0.0, 0.0, 5), "width");
        assert_invalid_parameter(BucketLayout::linear(0.0, -1.0, 5), "width");
        assert_invalid_parameter(BucketLayout::linear(0.0, f64::NAN, 5), "width");
        assert_invalid_parameter(BucketLayout::linear(0.0, f64::INFINITY, 5), "width");
        assert_invalid_parameter(BucketLayout::linear(0.0, 1.0, 0), "count");
        assert_invalid_parameter(BucketLayout::linear(f64::NAN, 1.0, 5), "start");
        assert_invalid_parameter(BucketLayout::linear(f64::NEG_INFINITY, 1.0, 5), "start");
    }

    #[test]
    fn linear_rejects_width_lost_to_precision() {
        // 1e20 + 1 == 1e20 in f64, so every boundary would collapse into the same value.
        assert_invalid_parameter(BucketLayout::linear(1e20, 1.0, 3), "width");
    }

    #[test]
    fn exponential_starts_at_start() {
        let layout = BucketLayout::exponential(1.0, 2.0, 5).unwrap();

        assert_eq!(layout.boundaries(), &[1.0, 2.0, 4.0, 8.0, 16.0]);
    }

    #[test]
    fn exponential_fractional_factor() {
        let layout = BucketLayout::exponential(4.0, 1.5, 3).unwrap();

        assert_eq!(layout.boundaries(), &[4.0, 6.0, 9.0]);
    }

    #[test]
    fn exponential_rejects_invalid_parameters() {
        assert_invalid_parameter(BucketLayout::exponential(0.0, 2.0, 5), "start");
        assert_invalid_parameter(BucketLayout::exponential(-1.0, 2.0, 5), "start");
        assert_invalid_parameter(BucketLayout::exponential(f64::NAN, 2.0, 5), "start");
        assert_invalid_parameter(BucketLayout::exponential(1.0, 1.0, 5), "factor");
        assert_invalid_parameter(BucketLayout::exponential(1.0, 0.5, 5), "factor");
        assert_invalid_parameter(BucketLayout::exponential(1.0, f64::NAN, 5), "factor");
        assert_invalid_parameter(BucketLayout::exponential(1.0, 2.0, 0), "count");
    }

    #[test]
    fn exponential_rejects_overflow() {
        // 2^1024 is beyond f64::MAX.
        assert_invalid_parameter(BucketLayout::exponential(1.0, 2.0, 1100), "count");
    }

    #[test]
    fn custom_accepts_ascending_boundaries() {
        let layout = BucketLayout::custom([-100.0, -10.0, 0.0, 10.0, 100.0]).unwrap();

        assert_eq!(layout.boundaries(), &[-100.0, -10.0, 0.0, 10.0, 100.0]);
    }

    #[test]
    fn custom_rejects_invalid_boundaries() {
        assert_invalid_parameter(BucketLayout::custom([]), "boundaries");
        assert_invalid_parameter(BucketLayout::custom([3.0, 2.0, 1.0]), "boundaries");
        assert_invalid_parameter(BucketLayout::custom([1.0, 1.0]), "boundaries");
        assert_invalid_parameter(BucketLayout::custom([1.0, f64::INFINITY]), "boundaries");
        assert_invalid_parameter(BucketLayout::custom([f64::NAN]), "boundaries");
    }
}
