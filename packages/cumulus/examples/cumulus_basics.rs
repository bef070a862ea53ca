//! Demonstrates the usage shown in the crate documentation: linear and exponential buckets,
//! observing values and reading cumulative counts.

use cumulus::{BucketLayout, Histogram, ScaleRatio, ScaledHistogram};

fn main() {
    println!("=== cumulus basics example ===");

    let linear = Histogram::new(BucketLayout::linear(5.0, 10.0, 5).unwrap());

    for value in [0, 14, 24, 30, 43, 1000] {
        linear.observe(value).unwrap();
    }

    println!("Linear buckets:");
    println!("{}", linear.snapshot());

    let exponential = Histogram::new(BucketLayout::exponential(1.0, 2.0, 5).unwrap());

    for value in [0.0, 1.5, 3.0, 7.0, 16.0, 17.0] {
        exponential.observe(value).unwrap();
    }

    println!("Exponential buckets:");
    println!("{}", exponential.snapshot());

    // The same counts, with boundaries shown in a unit one thousand times smaller.
    let view = ScaledHistogram::new(exponential)
        .shift_scale(ScaleRatio::new(1000, 1).unwrap())
        .unwrap();

    println!("Exponential buckets, scaled by 1000:");
    println!("{}", view.snapshot());

    if let Err(e) = linear.observe(f64::NAN) {
        println!("Rejected as expected: {e}");
    }
}
