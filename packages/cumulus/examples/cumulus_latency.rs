//! Records request latencies from several worker threads into one histogram defined in
//! milliseconds, then prints the distribution as seen in milliseconds and in seconds.

use std::thread;
use std::time::Duration;

use cumulus::{BucketLayout, Histogram, TimeScaledHistogram, TimeUnit};

const WORKERS: u64 = 4;
const REQUESTS_PER_WORKER: u64 = 250;

fn main() {
    println!("=== cumulus latency example ===");

    // 1, 2, 4, ..., 512 milliseconds.
    let latency = TimeScaledHistogram::new(
        Histogram::new(BucketLayout::exponential(1.0, 2.0, 10).unwrap()),
        TimeUnit::Milliseconds,
    );

    thread::scope(|s| {
        for worker in 0..WORKERS {
            // Each worker reports in whatever unit its own timer uses.
            let view = latency.shift_scale(TimeUnit::Microseconds).unwrap();

            s.spawn(move || {
                for request in 0..REQUESTS_PER_WORKER {
                    let simulated = Duration::from_micros(500 + request * request * (worker + 1));
                    view.observe_duration(simulated).unwrap();
                }
            });
        }
    });

    println!();
    println!("Latency in milliseconds:");
    println!("{}", latency.snapshot());

    let in_seconds = latency.shift_scale(TimeUnit::Seconds).unwrap().snapshot();

    println!("Latency in seconds:");
    println!("{in_seconds}");

    println!("Exported as (le, count) pairs:");
    for (tag, count) in in_seconds.pairs() {
        println!("le=\"{tag}\" {count}");
    }
}
