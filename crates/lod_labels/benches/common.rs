use std::time::Duration;

use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in buckets or items; never zero so criterion reports a rate.
pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Advances `zoom` by `step`, wrapping back to `min` once it passes `max`.
#[allow(dead_code)]
pub fn next_zoom(zoom: f64, step: f64, min: f64, max: f64) -> f64 {
    let next = zoom + step;
    if next > max {
        min
    } else {
        next
    }
}
