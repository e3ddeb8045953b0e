// Visible window over a time series and its gesture transitions

/// Windowing constants for one data profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowProfile {
    /// Smallest window a zoom-in may produce
    pub min_window_length: usize,
    /// Window length at which every visible point gets its own tick
    pub max_granularity: usize,
    pub drag_pixels_per_index: f64,
}

impl WindowProfile {
    pub const DEFAULT_DRAG_PIXELS_PER_INDEX: f64 = 50.0;

    pub fn new(min_window_length: usize, max_granularity: usize, drag_pixels_per_index: f64) -> Self {
        Self {
            min_window_length,
            max_granularity,
            drag_pixels_per_index,
        }
    }
}

impl Default for WindowProfile {
    fn default() -> Self {
        Self::new(39, 39, Self::DEFAULT_DRAG_PIXELS_PER_INDEX)
    }
}

/// Contiguous slice `start..=start + length` of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub start: usize,
    pub length: usize,
}

impl ViewWindow {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Window covering the whole series
    pub fn full(series_len: usize) -> Self {
        Self::new(0, series_len.saturating_sub(1))
    }

    /// Index of the last visible point
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn fits(&self, series_len: usize) -> bool {
        series_len > 0 && self.end() <= series_len - 1
    }

    /// Zoom in by shrinking from both ends around the series midpoint.
    ///
    /// The candidate length is measured from the series, not the current
    /// window, so an off-centre window may come back wider. Returns `None`
    /// when the step would go below the profile floor.
    pub fn zoomed_in(&self, magnification: f64, series_len: usize, profile: &WindowProfile) -> Option<Self> {
        if !magnification.is_finite() || magnification < 0.0 || series_len == 0 {
            return None;
        }

        let step = magnification.floor() as usize;
        let candidate_start = self.start.checked_add(step)?;
        // start stays below the series midpoint whenever this subtraction succeeds
        let candidate_length = (series_len - 1).checked_sub(candidate_start.checked_mul(2)?)?;

        if candidate_length < profile.min_window_length {
            return None;
        }

        let candidate = Self::new(candidate_start, candidate_length);
        (candidate != *self).then_some(candidate)
    }

    /// Zoom out by moving the start left and growing the length by the same
    /// amount. Only the left edge is checked; a step that would reach index 0
    /// is dropped rather than clamped.
    pub fn zoomed_out(&self, magnification: f64, series_len: usize) -> Option<Self> {
        if !magnification.is_finite() || series_len == 0 {
            return None;
        }

        let delta = (magnification * 4.0).abs().floor() as usize;
        if delta == 0 || self.start <= delta {
            return None;
        }

        let start = self.start - delta;
        let length = (self.length + delta).min(series_len - 1 - start);
        Some(Self::new(start, length))
    }

    /// Pan by a horizontal drag translation in pixels. Negative translations
    /// move forward in time. Overshoot snaps to the nearest edge.
    pub fn dragged(&self, translation_x: f64, series_len: usize, pixels_per_index: f64) -> Self {
        if !translation_x.is_finite() || pixels_per_index <= 0.0 || series_len == 0 {
            return *self;
        }

        let shift = (translation_x.abs() / pixels_per_index).floor() as usize;

        let start = if translation_x < 0.0 {
            match self.end().checked_add(shift) {
                Some(end) if end < series_len => self.start + shift,
                _ => series_len - self.length - 1,
            }
        } else if self.start > shift {
            self.start - shift
        } else {
            0
        };

        Self::new(start, self.length)
    }

    /// Series indices that get an axis tick.
    pub fn tick_indices(&self, max_granularity: usize) -> Vec<usize> {
        if self.length == max_granularity {
            return (self.start..=self.end()).collect();
        }

        let step = self.length / 4;
        vec![
            self.start,
            self.start + step,
            self.start + step * 2,
            self.start + step * 3,
            self.end(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEN: usize = 40;

    fn profile() -> WindowProfile {
        WindowProfile::default()
    }

    fn assert_invariants(window: &ViewWindow, series_len: usize, profile: &WindowProfile) {
        assert!(window.fits(series_len), "{:?} overruns {}", window, series_len);
        assert!(
            window.length >= profile.min_window_length,
            "{:?} below floor {}",
            window,
            profile.min_window_length
        );
    }

    #[test]
    fn test_full_window() {
        assert_eq!(ViewWindow::full(LEN), ViewWindow::new(0, 39));
        assert_eq!(ViewWindow::full(1), ViewWindow::new(0, 0));
    }

    #[test]
    fn test_zoom_in_rejected_below_floor() {
        let window = ViewWindow::full(LEN);
        assert_eq!(window.zoomed_in(2.0, LEN, &profile()), None);
    }

    #[test]
    fn test_zoom_in_shrinks_symmetrically() {
        let window = ViewWindow::full(100);
        let zoomed = window.zoomed_in(3.0, 100, &profile()).unwrap();
        assert_eq!(zoomed, ViewWindow::new(3, 93));

        let again = zoomed.zoomed_in(1.5, 100, &profile()).unwrap();
        assert_eq!(again, ViewWindow::new(4, 91));
    }

    #[test]
    fn test_zoom_in_noop_at_floor() {
        let floor = ViewWindow::new(30, 39);
        for magnification in [0.0, 0.5, 1.0, 1.9, 2.0, 7.5] {
            assert_eq!(floor.zoomed_in(magnification, 100, &profile()), None);
        }
    }

    #[test]
    fn test_zoom_in_recentres_shifted_window() {
        let shifted = ViewWindow::new(0, 39);
        assert_eq!(shifted.zoomed_in(1.2, 100, &profile()), Some(ViewWindow::new(1, 97)));

        let shifted = ViewWindow::new(0, 50);
        assert_eq!(shifted.zoomed_in(1.5, 100, &profile()), Some(ViewWindow::new(1, 97)));
    }

    #[test]
    fn test_zoom_in_rejects_start_past_midpoint() {
        let window = ViewWindow::new(10, 39);
        assert_eq!(window.zoomed_in(45.0, 100, &profile()), None);
        assert_eq!(window.zoomed_in(60.0, 100, &profile()), None);
    }

    #[test]
    fn test_zoom_in_rejects_bad_input() {
        let window = ViewWindow::full(100);
        assert_eq!(window.zoomed_in(f64::NAN, 100, &profile()), None);
        assert_eq!(window.zoomed_in(-1.0, 100, &profile()), None);
        assert_eq!(window.zoomed_in(f64::MAX, 100, &profile()), None);
    }

    #[test]
    fn test_zoom_out_moves_left_edge() {
        let window = ViewWindow::new(20, 59);
        let zoomed = window.zoomed_out(1.25, 100).unwrap();
        assert_eq!(zoomed, ViewWindow::new(15, 64));
        assert_eq!(zoomed.end(), window.end());
    }

    #[test]
    fn test_zoom_out_noop_at_left_edge() {
        let window = ViewWindow::new(4, 59);
        assert_eq!(window.zoomed_out(1.0, 100), None);
        assert_eq!(ViewWindow::full(100).zoomed_out(0.8, 100), None);
    }

    #[test]
    fn test_zoom_out_zero_delta_is_noop() {
        let window = ViewWindow::new(20, 59);
        assert_eq!(window.zoomed_out(0.2, 100), None);
    }

    #[test]
    fn test_drag_left_clamps_to_right_edge() {
        let window = ViewWindow::full(LEN);
        assert_eq!(window.dragged(-200.0, LEN, 50.0), ViewWindow::new(0, 39));

        let inner = ViewWindow::new(10, 39);
        assert_eq!(inner.dragged(-5000.0, 100, 50.0), ViewWindow::new(60, 39));
    }

    #[test]
    fn test_drag_left_pans_forward() {
        let window = ViewWindow::new(10, 39);
        assert_eq!(window.dragged(-149.0, 100, 50.0), ViewWindow::new(12, 39));
    }

    #[test]
    fn test_drag_right_pans_back_and_clamps() {
        let window = ViewWindow::new(10, 39);
        assert_eq!(window.dragged(120.0, 100, 50.0), ViewWindow::new(8, 39));
        assert_eq!(window.dragged(500.0, 100, 50.0), ViewWindow::new(0, 39));
        assert_eq!(window.dragged(5000.0, 100, 50.0), ViewWindow::new(0, 39));
    }

    #[test]
    fn test_drag_small_translation_keeps_start() {
        let window = ViewWindow::new(10, 39);
        assert_eq!(window.dragged(49.0, 100, 50.0), window);
        assert_eq!(window.dragged(-49.0, 100, 50.0), window);
    }

    #[test]
    fn test_tick_indices_five_labels() {
        let window = ViewWindow::new(3, 93);
        assert_eq!(window.tick_indices(39), vec![3, 26, 49, 72, 96]);
    }

    #[test]
    fn test_tick_indices_every_point_at_max_granularity() {
        let window = ViewWindow::new(5, 39);
        let ticks = window.tick_indices(39);
        assert_eq!(ticks.len(), 40);
        assert_eq!(ticks.first(), Some(&5));
        assert_eq!(ticks.last(), Some(&44));
    }

    #[test]
    fn test_invariants_hold_over_gesture_sequence() {
        let series_len = 120;
        let profile = profile();
        let mut window = ViewWindow::full(series_len);
        let magnifications = [1.1, 1.6, 2.3, 0.9, 0.4, 3.2, 1.0, 5.0, 0.7, 2.0];
        let drags = [-260.0, 75.0, -1000.0, 0.0, 430.0, -51.0, 9000.0, -9000.0];

        for round in 0..50 {
            let m = magnifications[round % magnifications.len()];
            let next = if round % 3 == 0 {
                window.zoomed_out(m, series_len)
            } else {
                window.zoomed_in(m, series_len, &profile)
            };
            if let Some(next) = next {
                window = next;
            }
            assert_invariants(&window, series_len, &profile);

            window = window.dragged(drags[round % drags.len()], series_len, 50.0);
            assert_invariants(&window, series_len, &profile);
            assert!(window.start <= series_len - window.length - 1);

            let ticks = window.tick_indices(profile.max_granularity);
            assert!(ticks.iter().all(|&i| i < series_len));
        }
    }
}
