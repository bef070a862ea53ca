use std::fmt::{self, Display};
use std::num::NonZero;

use new_zealand::nz;
use num_integer::Integer;

use crate::{Error, Result, TimeUnit};

/// An exact, positive conversion factor from the base unit of a histogram to a display unit.
///
/// A boundary `b` expressed in the base unit is `b * numerator / denominator` in the display
/// unit. An observation `v` expressed in the display unit is `v * denominator / numerator`
/// in the base unit.
///
/// The ratio is stored as a reduced fraction of two integers. Keeping the ratio exact means
/// that converting boundaries divides by the true denominator instead of multiplying by an
/// already rounded reciprocal, so a 20 ms boundary shown in seconds is exactly `0.02`.
///
/// # Example
///
/// ```
/// use cumulus::{ScaleRatio, TimeUnit};
///
/// let ratio = ScaleRatio::new(1, 1000).unwrap();
/// assert_eq!(ratio, ScaleRatio::between(TimeUnit::Milliseconds, TimeUnit::Seconds));
/// assert_eq!(ratio.base_to_display(20.0), 0.02);
/// assert_eq!(ratio.display_to_base(0.015), 15.0);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ScaleRatio {
    numerator: NonZero<u64>,
    denominator: NonZero<u64>,
}

impl ScaleRatio {
    /// The ratio that leaves values unchanged.
    pub const IDENTITY: Self = Self {
        numerator: nz!(1),
        denominator: nz!(1),
    };

    /// Creates a ratio of `numerator / denominator`, reduced to lowest terms.
    ///
    /// The parts are exact but conversions multiply and divide in `f64`, so each result is
    /// rounded. A displayed boundary converted back into the base unit may therefore differ
    /// from the base boundary in its last bit. With a ratio such as `1/7` or `3/7`, an
    /// observation equal to a displayed boundary can land in the next bucket up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either part is zero.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        let numerator = NonZero::new(numerator).ok_or_else(|| {
            Error::invalid_parameter("numerator", numerator, "must be greater than zero")
        })?;

        let denominator = NonZero::new(denominator).ok_or_else(|| {
            Error::invalid_parameter("denominator", denominator, "must be greater than zero")
        })?;

        Ok(Self::reduced(numerator, denominator))
    }

    /// The ratio that converts a quantity of time expressed in `from` units into `to` units.
    ///
    /// For example, converting from milliseconds to seconds is a ratio of `1/1000`.
    #[must_use]
    pub fn between(from: TimeUnit, to: TimeUnit) -> Self {
        Self::reduced(from.nanos_per_unit(), to.nanos_per_unit())
    }

    fn reduced(numerator: NonZero<u64>, denominator: NonZero<u64>) -> Self {
        let divisor = NonZero::new(numerator.get().gcd(&denominator.get()))
            .expect("the greatest common divisor of two non-zero values is non-zero");

        // Exact, the divisor divides both values.
        let (numerator, denominator) = (numerator.get() / divisor, denominator.get() / divisor);

        Self {
            numerator: NonZero::new(numerator)
                .expect("a non-zero value divided by one of its divisors is non-zero"),
            denominator: NonZero::new(denominator)
                .expect("a non-zero value divided by one of its divisors is non-zero"),
        }
    }

    /// The numerator of the reduced fraction.
    #[must_use]
    pub fn numerator(&self) -> NonZero<u64> {
        self.numerator
    }

    /// The denominator of the reduced fraction.
    #[must_use]
    pub fn denominator(&self) -> NonZero<u64> {
        self.denominator
    }

    /// Whether this ratio leaves values unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Converts a value expressed in the base unit into the display unit.
    #[must_use]
    pub fn base_to_display(&self, value: f64) -> f64 {
        value * as_f64(self.numerator) / as_f64(self.denominator)
    }

    /// Converts a value expressed in the display unit into the base unit.
    #[must_use]
    pub fn display_to_base(&self, value: f64) -> f64 {
        value * as_f64(self.denominator) / as_f64(self.numerator)
    }
}

impl Default for ScaleRatio {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Display for ScaleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "ratios between practical units are far below 2^53 and remain exact"
)]
fn as_f64(value: NonZero<u64>) -> f64 {
    value.get() as f64
}
