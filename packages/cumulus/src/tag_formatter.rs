use std::fmt;
use std::sync::Arc;

/// Renders a bucket boundary as the tag that identifies the bucket in a snapshot.
///
/// The formatter is applied once per bucket when a histogram is constructed and again
/// whenever a [`ScaledHistogram`][crate::ScaledHistogram] renders its boundaries in a
/// different unit. It is also applied to the `+inf` boundary of the last bucket.
///
/// The default formatter renders finite boundaries as the shortest decimal string that
/// parses back into the same value, keeping a fractional part on integral values
/// (`15.0`, `0.02`) and renders the `+inf` boundary as `Infinity`.
///
/// # Example
///
/// ```
/// use cumulus::TagFormatter;
///
/// let default = TagFormatter::default();
/// assert_eq!(default.format(15.0), "15.0");
/// assert_eq!(default.format(f64::INFINITY), "Infinity");
///
/// let prometheus = TagFormatter::new(|boundary| {
///     if boundary == f64::INFINITY {
///         "+Inf".to_string()
///     } else {
///         boundary.to_string()
///     }
/// });
/// assert_eq!(prometheus.format(15.0), "15");
/// assert_eq!(prometheus.format(f64::INFINITY), "+Inf");
/// ```
#[derive(Clone)]
pub struct TagFormatter {
    format_fn: Arc<dyn Fn(f64) -> String + Send + Sync>,
}

impl TagFormatter {
    /// Creates a formatter from a function that renders a boundary.
    #[must_use]
    pub fn new<F>(format_fn: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self {
            format_fn: Arc::new(format_fn),
        }
    }

    /// Renders the tag for a bucket with the given boundary.
    #[must_use]
    pub fn format(&self, boundary: f64) -> String {
        (self.format_fn)(boundary)
    }
}

impl Default for TagFormatter {
    fn default() -> Self {
        Self::new(format_boundary)
    }
}

impl fmt::Debug for TagFormatter {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagFormatter").finish_non_exhaustive()
    }
}

/// The default boundary rendering.
///
/// `Debug` output for `f64` is the shortest round-trip representation. Integral values
/// keep a `.0` suffix and extreme magnitudes switch to exponent notation (`1e-9`).
fn format_boundary(boundary: f64) -> String {
    if boundary.is_infinite() {
        if boundary.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        format!("{boundary:?}")
    }
}
