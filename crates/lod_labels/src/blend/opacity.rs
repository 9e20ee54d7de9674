//! Cross-fade opacity for a bucket inside the visible window.
//!
//! While the ratio is inside the transition span `(-w, 1 - w)`, with `w = 1 / num_levels`,
//! each bucket fades against two centers in ratio space:
//!
//! - its own boundary `i / n`, over a band of `2 * fade_rate * w`;
//! - the boundary `(i - 2) / n`, over a narrower band of `fade_rate * w`.
//!
//! Inside a band the opacity is the distance to the center divided by the band width.
//! Outside the transition span every bucket stays fully opaque and the visibility gate
//! alone decides what is drawn.
use crate::blend::level_width;

/// Opacity of bucket `bucket_index` at `ratio`, in `[0, 1]`.
///
/// Single-level sets (`num_levels == 0`) are always fully opaque.
pub fn opacity_of(bucket_index: u32, ratio: f64, num_levels: u32, fade_rate: f32) -> f32 {
    let Some(width) = level_width(num_levels) else {
        return 1.0;
    };

    let mut opacity = 1.0f64;
    if ratio > -width && ratio < 1.0 - width {
        let n = num_levels as f64;
        let fade = fade_rate as f64;
        let index = bucket_index as f64;

        let own_band = 2.0 * fade * width;
        let own_distance = (ratio - index / n).abs();
        if own_distance < own_band {
            opacity = own_distance / own_band;
        }

        // The mirrored center sits two levels back, not one.
        let lagging_band = fade * width;
        let lagging_distance = (ratio - (index - 2.0) / n).abs();
        if lagging_distance < lagging_band {
            opacity = lagging_distance / lagging_band;
        }
    }

    (opacity as f32).clamp(0.0, 1.0)
}
