use crate::{BucketLayout, Histogram, TagFormatter};

/// Creates instances of [`Histogram`].
///
/// Required parameters:
/// * `layout`
///
/// Use `Histogram::builder()` to create a new instance of this builder.
///
/// # Example
///
/// ```
/// use cumulus::{BucketLayout, Histogram, TagFormatter};
///
/// let histogram = Histogram::builder()
///     .layout(BucketLayout::linear(0.0, 10.0, 10).unwrap())
///     .tag_formatter(TagFormatter::new(|boundary| format!("{boundary}ms")))
///     .build();
///
/// assert_eq!(histogram.bucket_count(), 11);
/// ```
#[derive(Debug, Default)]
pub struct HistogramBuilder {
    layout: Option<BucketLayout>,
    tag_formatter: TagFormatter,
}

impl HistogramBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the finite bucket boundaries to use. This is a required property.
    #[must_use]
    pub fn layout(self, layout: BucketLayout) -> Self {
        Self {
            layout: Some(layout),
            ..self
        }
    }

    /// Sets the formatter used to render bucket tags.
    ///
    /// The default formatter renders `15.0`, `0.02` and `Infinity`.
    #[must_use]
    pub fn tag_formatter(self, tag_formatter: TagFormatter) -> Self {
        Self {
            tag_formatter,
            ..self
        }
    }

    /// Builds the histogram with the current configuration.
    ///
    /// # Panics
    ///
    /// Panics if a required parameter is not set.
    #[must_use]
    pub fn build(self) -> Histogram {
        let layout = self
            .layout
            .expect("the bucket layout is a required parameter of a histogram");

        Histogram::from_parts(layout, self.tag_formatter)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_tag_formatter() {
        let histogram = Histogram::builder()
            .layout(BucketLayout::custom([1.0, 2.0]).unwrap())
            .build();

        assert_eq!(
            histogram.snapshot().tags().collect::<Vec<_>>(),
            ["1.0", "2.0", "Infinity"]
        );
    }

    #[test]
    fn last_configured_value_wins() {
        let histogram = Histogram::builder()
            .layout(BucketLayout::custom([1.0, 2.0]).unwrap())
            .layout(BucketLayout::custom([5.0]).unwrap())
            .tag_formatter(TagFormatter::new(|_| "first".to_string()))
            .tag_formatter(TagFormatter::new(|_| "second".to_string()))
            .build();

        assert_eq!(histogram.bucket_count(), 2);
        assert_eq!(
            histogram.snapshot().tags().collect::<Vec<_>>(),
            ["second", "second"]
        );
    }

    #[test]
    #[should_panic]
    fn build_without_layout_panics() {
        drop(Histogram::builder().build());
    }
}
