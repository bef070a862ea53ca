use std::fmt::{self, Display};
use std::num::NonZero;
use std::time::Duration;

use new_zealand::nz;

/// A unit of time in which the boundaries and observations of a
/// [`TimeScaledHistogram`][crate::TimeScaledHistogram] are expressed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TimeUnit {
    /// 10^-9 seconds.
    Nanoseconds,

    /// 10^-6 seconds.
    Microseconds,

    /// 10^-3 seconds.
    Milliseconds,

    /// The SI second.
    Seconds,

    /// 60 seconds.
    Minutes,

    /// 60 minutes.
    Hours,

    /// 24 hours.
    Days,
}

impl TimeUnit {
    /// The length of one unit, in nanoseconds.
    #[must_use]
    pub const fn nanos_per_unit(self) -> NonZero<u64> {
        match self {
            Self::Nanoseconds => nz!(1),
            Self::Microseconds => nz!(1_000),
            Self::Milliseconds => nz!(1_000_000),
            Self::Seconds => nz!(1_000_000_000),
            Self::Minutes => nz!(60_000_000_000),
            Self::Hours => nz!(3_600_000_000_000),
            Self::Days => nz!(86_400_000_000_000),
        }
    }

    /// Expresses a duration as a (possibly fractional) number of this unit.
    #[must_use]
    pub fn units_in(self, duration: Duration) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "durations beyond 2^53 ns (~104 days) lose only their last nanoseconds"
        )]
        let nanos = duration.as_nanos() as f64;

        #[expect(
            clippy::cast_precision_loss,
            reason = "unit lengths are far below 2^53 and remain exact"
        )]
        let nanos_per_unit = self.nanos_per_unit().get() as f64;

        nanos / nanos_per_unit
    }

    /// The conventional abbreviation of the unit.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
