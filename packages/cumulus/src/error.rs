use thiserror::Error;

/// Errors that can occur when building or feeding a histogram.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A bucket layout or scale ratio was requested with parameters that cannot produce
    /// a valid, strictly ascending sequence of finite boundaries.
    #[error("invalid parameter: {parameter} = {value} is invalid: {problem}")]
    InvalidParameter {
        /// The name of the parameter that was rejected.
        parameter: &'static str,

        /// The rejected value, rendered for display.
        value: String,

        /// A human-readable description of the problem.
        problem: &'static str,
    },

    /// An observed value cannot be ordered against the bucket boundaries (i.e. it is NaN).
    ///
    /// No bucket is modified when this error is returned.
    #[error("invalid observation: {value} cannot be ordered against bucket boundaries")]
    InvalidObservation {
        /// The rejected value.
        value: f64,
    },
}

impl Error {
    pub(crate) fn invalid_parameter(
        parameter: &'static str,
        value: impl ToString,
        problem: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            parameter,
            value: value.to_string(),
            problem,
        }
    }
}

/// A specialized `Result` type for histogram operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
