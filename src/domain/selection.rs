// Tapped point selection
use super::category::Category;
use super::telemetry::TimeSeriesPoint;
use chrono::{DateTime, FixedOffset};

pub const NO_SELECTION_TEXT: &str = "No time is selected";

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub timestamp: DateTime<FixedOffset>,
    pub level: i64,
    pub category: Option<Category>,
    /// Category text shown in the summary
    pub category_label: Option<String>,
}

impl Selection {
    /// Level is the point's plotted level rounded to the nearest integer,
    /// or 0 when the point carries no metric.
    pub fn from_point(point: &TimeSeriesPoint) -> Self {
        let level = point.level().map(|l| l.round() as i64).unwrap_or(0);
        Self {
            timestamp: point.timestamp,
            level,
            category: point.category,
            category_label: point.category_label().map(str::to_string),
        }
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn summary(&self) -> String {
        let loudness = self.category_label.as_deref().unwrap_or("Unknown");
        format!("Selected time: {}\nLoudness: {}", self.time_label(), loudness)
    }
}

/// Human-readable line shown under the chart
pub fn selection_summary(selection: Option<&Selection>) -> String {
    match selection {
        Some(selection) => selection.summary(),
        None => NO_SELECTION_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(level: Option<f64>, category: Option<Category>) -> TimeSeriesPoint {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 26, 2, 5, 0)
            .unwrap();
        TimeSeriesPoint::new(ts, level, None, category)
    }

    #[test]
    fn test_from_point_rounds_level() {
        let selection = Selection::from_point(&point(Some(62.4), Some(Category::Loud)));
        assert_eq!(selection.level, 62);
        assert_eq!(selection.category, Some(Category::Loud));

        let selection = Selection::from_point(&point(Some(62.5), None));
        assert_eq!(selection.level, 63);
    }

    #[test]
    fn test_summary_text() {
        let selection = Selection::from_point(&point(Some(62.4), Some(Category::Loud)));
        assert_eq!(
            selection_summary(Some(&selection)),
            "Selected time: 02:05\nLoudness: Loud"
        );
        assert_eq!(selection_summary(None), "No time is selected");
    }

    #[test]
    fn test_summary_without_category() {
        let selection = Selection::from_point(&point(None, None));
        assert_eq!(selection.level, 0);
        assert_eq!(selection.summary(), "Selected time: 02:05\nLoudness: Unknown");
    }

    #[test]
    fn test_summary_uses_recorded_label() {
        let selection = Selection::from_point(&point(Some(80.0), None).with_category_label("Severe"));
        assert_eq!(selection.category, None);
        assert_eq!(selection.summary(), "Selected time: 02:05\nLoudness: Severe");
    }
}
