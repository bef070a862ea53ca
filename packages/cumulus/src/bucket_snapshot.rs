use std::sync::Arc;

/// One bucket of a [`Snapshot`][crate::Snapshot].
#[derive(Clone, Debug, PartialEq)]
pub struct BucketSnapshot {
    boundary: f64,
    tag: Arc<str>,
    count: u64,
}

impl BucketSnapshot {
    pub(crate) fn new(boundary: f64, tag: Arc<str>, count: u64) -> Self {
        Self {
            boundary,
            tag,
            count,
        }
    }

    /// The upper bound (inclusive) of the bucket, in the unit of the snapshot.
    ///
    /// This is `f64::INFINITY` for the last bucket.
    #[must_use]
    pub fn boundary(&self) -> f64 {
        self.boundary
    }

    /// The tag rendered from the boundary by the histogram's tag formatter.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The number of observations less than or equal to the boundary.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
