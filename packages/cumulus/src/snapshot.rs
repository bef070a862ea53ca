use std::cmp;
use std::fmt::{self, Display, Write};
use std::num::NonZero;

use itertools::Itertools;
use new_zealand::nz;

use crate::BucketSnapshot;

/// A point in time copy of the buckets of a histogram, in ascending order of boundaries.
///
/// The count of each bucket is cumulative: it is the number of observations less than or
/// equal to the boundary of that bucket. The last bucket has the boundary `+inf` and its
/// count is the total number of observations.
///
/// For human-readable output, use the `Display` trait implementation. This is intended
/// for writing to a terminal.
///
/// For machine-readable output (e.g. to feed an exporter), inspect the buckets via the
/// provided methods.
///
/// # Example
///
/// ```
/// use cumulus::{BucketLayout, Histogram};
///
/// let histogram = Histogram::new(BucketLayout::linear(0.0, 10.0, 3).unwrap());
/// histogram.observe(5).unwrap();
/// histogram.observe(25).unwrap();
///
/// for (tag, count) in histogram.snapshot().pairs() {
///     println!("le={tag} count={count}");
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    // Ascending by boundary, never empty, last boundary is +inf.
    buckets: Box<[BucketSnapshot]>,
}

impl Snapshot {
    pub(crate) fn new(buckets: Box<[BucketSnapshot]>) -> Self {
        debug_assert!(
            buckets
                .last()
                .is_some_and(|bucket| bucket.boundary().is_infinite()),
            "a snapshot always ends with the +inf bucket"
        );
        debug_assert!(
            buckets
                .iter()
                .tuple_windows()
                .all(|(lower, upper)| lower.boundary() < upper.boundary()),
            "snapshot boundaries are strictly ascending, so only the last one is +inf"
        );

        Self { buckets }
    }

    /// Iterates over the buckets, in ascending order of boundaries.
    pub fn buckets(&self) -> impl ExactSizeIterator<Item = &BucketSnapshot> {
        self.buckets.iter()
    }

    /// Iterates over the bucket tags, in ascending order of boundaries.
    pub fn tags(&self) -> impl ExactSizeIterator<Item = &str> {
        self.buckets.iter().map(BucketSnapshot::tag)
    }

    /// Iterates over the cumulative bucket counts, in ascending order of boundaries.
    pub fn counts(&self) -> impl ExactSizeIterator<Item = u64> {
        self.buckets.iter().map(BucketSnapshot::count)
    }

    /// Iterates over the buckets as `(tag, count)` pairs, in ascending order of boundaries.
    ///
    /// This is the form typically consumed by exporters that render one cumulative
    /// sample per bucket.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (&str, u64)> {
        self.buckets
            .iter()
            .map(|bucket| (bucket.tag(), bucket.count()))
    }

    /// The total number of observations, equal to the count of the `+inf` bucket.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.buckets.last().map_or(0, BucketSnapshot::count)
    }

    /// The number of buckets, including the `+inf` bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always `false` - every snapshot contains at least the `+inf` bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// We auto-scale bars when rendering a snapshot. This is the number of characters
/// that we use to represent the largest bucket count.
///
/// Due to aliasing effects (have to assign at least 1 observation per character), the bars
/// may be shorter or slightly longer than this. Close enough is good enough for a terminal.
const BAR_WIDTH_CHARS: NonZero<u64> = nz!(50);

const BAR_CHAR: char = '∎';

impl Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // We measure the dynamic parts of the lines first to know how much padding to add.
        let widest_tag = self
            .tags()
            .map(|tag| tag.chars().count())
            .max()
            .unwrap_or_default();

        let widest_count = self
            .counts()
            .map(|count| count.to_string().len())
            .max()
            .unwrap_or_default();

        let scale = BarScale::new(self);

        for bucket in self.buckets() {
            write!(
                f,
                "value <= {tag:>widest_tag$} [ {count:>widest_count$} ]: ",
                tag = bucket.tag(),
                count = bucket.count()
            )?;
            scale.write_bar(bucket.count(), f)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

/// The auto-scaling logic of the bars, identifying the step size for rendering.
#[derive(Debug)]
struct BarScale {
    /// One character is rendered for each `count_per_char` observations (rounded down).
    count_per_char: NonZero<u64>,
}

impl BarScale {
    fn new(snapshot: &Snapshot) -> Self {
        // Counts are cumulative, so the largest is the +inf bucket.
        let max_count = snapshot.total();

        let count_per_char = NonZero::new(max_count / BAR_WIDTH_CHARS).unwrap_or(nz!(1));

        Self { count_per_char }
    }

    fn write_bar(&self, count: u64, f: &mut impl Write) -> fmt::Result {
        let bar_width = count / self.count_per_char;

        for _ in 0..cmp::min(bar_width, BAR_WIDTH_CHARS.get().saturating_mul(2)) {
            f.write_char(BAR_CHAR)?;
        }

        Ok(())
    }
}
