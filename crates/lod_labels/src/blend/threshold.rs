//! Hard zoom-threshold switching between levels.
//!
//! Above `threshold` only level 0 is shown. Each zoom unit below it reveals the next level
//! together with its successor. Buckets switch on and off without fading.
use crate::blend::visibility::VisibleWindow;

/// Visible window for `zoom` given the switching `threshold`.
pub fn threshold_window(zoom: f64, threshold: f64, num_levels: u32) -> VisibleWindow {
    if zoom > threshold {
        return VisibleWindow::single(0);
    }

    (0..=num_levels)
        .rev()
        .find(|&i| zoom <= threshold - i as f64)
        .map(|i| VisibleWindow::pair(i, num_levels))
        .unwrap_or_else(|| VisibleWindow::single(num_levels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_threshold_shows_level_zero() {
        assert_eq!(threshold_window(9.5, 9.0, 6), VisibleWindow::single(0));
    }

    #[test]
    fn each_zoom_step_reveals_one_level() {
        assert_eq!(threshold_window(9.0, 9.0, 6), VisibleWindow::pair(0, 6));
        assert_eq!(threshold_window(8.0, 9.0, 6), VisibleWindow::pair(1, 6));
        assert_eq!(threshold_window(6.5, 9.0, 6), VisibleWindow::pair(2, 6));
        assert_eq!(threshold_window(3.0, 9.0, 6), VisibleWindow::pair(6, 6));
    }

    #[test]
    fn far_below_threshold_shows_last_level() {
        assert_eq!(threshold_window(-20.0, 9.0, 3), VisibleWindow::single(3));
    }

    #[test]
    fn fractional_zoom_rounds_towards_coarser_levels() {
        assert_eq!(threshold_window(8.5, 9.0, 3), VisibleWindow::pair(0, 3));
        assert_eq!(threshold_window(7.9, 9.0, 3), VisibleWindow::pair(1, 3));
    }

    #[test]
    fn nan_zoom_falls_back_to_last_level() {
        assert_eq!(threshold_window(f64::NAN, 9.0, 3), VisibleWindow::single(3));
    }
}
