// View window controller - Applies gestures to the visible window
use crate::domain::selection::{selection_summary, Selection};
use crate::domain::telemetry::{TimeSeries, TimeSeriesPoint};
use crate::domain::view_window::{ViewWindow, WindowProfile};
use chrono::{DateTime, FixedOffset, Timelike};
use std::sync::Arc;

/// Snapshot published to the renderer after every gesture step.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub window: ViewWindow,
    pub visible_start: DateTime<FixedOffset>,
    pub visible_end: DateTime<FixedOffset>,
    pub axis_labels: Vec<String>,
    pub selection: Option<Selection>,
    pub summary: String,
}

pub struct ViewWindowController {
    series: Arc<TimeSeries>,
    profile: WindowProfile,
    window: ViewWindow,
    axis_labels: Vec<String>,
    selection: Option<Selection>,
}

impl ViewWindowController {
    pub fn new(series: Arc<TimeSeries>, profile: WindowProfile) -> Self {
        let window = ViewWindow::full(series.len());
        let mut controller = Self {
            series,
            profile,
            window,
            axis_labels: Vec::new(),
            selection: None,
        };
        controller.update_axis_labels();
        controller
    }

    pub fn window(&self) -> ViewWindow {
        self.window
    }

    pub fn axis_labels(&self) -> &[String] {
        &self.axis_labels
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selection_summary(&self) -> String {
        selection_summary(self.selection.as_ref())
    }

    /// Points currently on screen, both window ends included
    pub fn visible_points(&self) -> &[TimeSeriesPoint] {
        &self.series.points()[self.window.start..=self.window.end()]
    }

    /// Time domain of the x axis
    pub fn visible_range(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        let points = self.visible_points();
        (points[0].timestamp, points[points.len() - 1].timestamp)
    }

    /// One pinch step. `magnification` above `previous` zooms in, anything
    /// else zooms out. Returns whether the window changed.
    pub fn zoom(&mut self, magnification: f64, previous: f64) -> bool {
        let len = self.series.len();
        let next = if magnification > previous {
            self.window.zoomed_in(magnification, len, &self.profile)
        } else {
            self.window.zoomed_out(magnification, len)
        };

        match next {
            Some(window) => {
                debug_assert!(window.fits(len));
                self.window = window;
                self.update_axis_labels();
                true
            }
            None => {
                tracing::debug!(
                    "Zoom step rejected (m={}, prev={}, window={:?})",
                    magnification,
                    previous,
                    self.window
                );
                false
            }
        }
    }

    /// One drag step with the horizontal translation in pixels.
    pub fn drag(&mut self, translation_x: f64) -> bool {
        let next = self.window.dragged(
            translation_x,
            self.series.len(),
            self.profile.drag_pixels_per_index,
        );
        debug_assert!(next.fits(self.series.len()));
        let changed = next != self.window;
        self.window = next;
        self.update_axis_labels();
        changed
    }

    /// Select the point at `time`, compared at minute resolution.
    pub fn select_time(&mut self, time: DateTime<FixedOffset>) -> bool {
        let Some(minute) = time.with_second(0).and_then(|t| t.with_nanosecond(0)) else {
            return false;
        };
        let index = self.series.position_by_time(&minute);
        self.select_index(index)
    }

    /// Select the point whose axis label equals `label`.
    pub fn select_label(&mut self, label: &str) -> bool {
        let index = self.series.position_by_label(label);
        self.select_index(index)
    }

    pub fn snapshot(&self) -> ViewState {
        let (visible_start, visible_end) = self.visible_range();
        ViewState {
            window: self.window,
            visible_start,
            visible_end,
            axis_labels: self.axis_labels().to_vec(),
            selection: self.selection().cloned(),
            summary: self.selection_summary(),
        }
    }

    fn select_index(&mut self, index: Option<usize>) -> bool {
        match index.and_then(|i| self.series.get(i)) {
            Some(point) => {
                self.selection = Some(Selection::from_point(point));
                true
            }
            None => {
                tracing::debug!("No point found for selection");
                false
            }
        }
    }

    fn update_axis_labels(&mut self) {
        self.axis_labels = self
            .window
            .tick_indices(self.profile.max_granularity)
            .into_iter()
            .filter_map(|i| self.series.get(i))
            .map(|p| p.label().to_string())
            .collect();
    }
}
