// Console renderer - Prints one text frame per published view state
use crate::application::view_controller::ViewState;
use crate::domain::category::{y_axis_marks, BarColor};
use crate::domain::telemetry::TimeSeries;
use futures::{Stream, StreamExt};
use std::sync::Arc;

pub struct ConsoleView {
    series: Arc<TimeSeries>,
}

impl ConsoleView {
    pub fn new(series: Arc<TimeSeries>) -> Self {
        Self { series }
    }

    pub fn render(&self, state: &ViewState) -> String {
        let window = state.window;
        let visible = &self.series.points()[window.start..=window.end()];

        let mut counts = [0usize; 4];
        for point in visible {
            let slot = match BarColor::for_category(point.category) {
                BarColor::Green => 0,
                BarColor::Yellow => 1,
                BarColor::Orange => 2,
                BarColor::Red => 3,
            };
            counts[slot] += 1;
        }
        let bars = [BarColor::Green, BarColor::Yellow, BarColor::Orange, BarColor::Red]
            .iter()
            .zip(counts)
            .map(|(color, count)| format!("{}={}", color.name(), count))
            .collect::<Vec<_>>()
            .join(" ");

        let bands = y_axis_marks()
            .into_iter()
            .map(|(value, label)| format!("{}@{}", label, value))
            .collect::<Vec<_>>()
            .join(" ");

        let peak = visible
            .iter()
            .filter_map(|p| p.level().map(|level| (p, level)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, level)| format!("{:.0} at {}", level, p.label()))
            .unwrap_or_else(|| "-".to_string());

        format!(
            "window {}..={} | {} - {} | {} points\n\
             x axis: {}\n\
             y axis: {}\n\
             bars: {}\n\
             peak: {}\n\
             {}",
            window.start,
            window.end(),
            state.visible_start.format("%H:%M"),
            state.visible_end.format("%H:%M"),
            visible.len(),
            state.axis_labels.join(" | "),
            bands,
            bars,
            peak,
            state.summary,
        )
    }

    /// Print frames until the state stream ends
    pub async fn run<S>(&self, mut states: S) -> usize
    where
        S: Stream<Item = ViewState> + Unpin,
    {
        let mut frames = 0;
        while let Some(state) = states.next().await {
            println!("{}\n", self.render(&state));
            frames += 1;
        }
        frames
    }
}
