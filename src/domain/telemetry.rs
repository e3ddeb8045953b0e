// Sleep telemetry domain models
use super::category::Category;
use chrono::{DateTime, FixedOffset};

/// A decoded record before timestamp normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepReading {
    pub datetime: String,
    pub noise_level: Option<f64>,
    pub chill_level: Option<f64>,
    pub category: Option<String>,
}

impl SleepReading {
    pub fn new(
        datetime: String,
        noise_level: Option<f64>,
        chill_level: Option<f64>,
        category: Option<String>,
    ) -> Self {
        Self {
            datetime,
            noise_level,
            chill_level,
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub noise_level: Option<f64>,
    pub chill_level: Option<f64>,
    pub category: Option<Category>,
    category_label: Option<String>,
    label: String,
}

impl TimeSeriesPoint {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        noise_level: Option<f64>,
        chill_level: Option<f64>,
        category: Option<Category>,
    ) -> Self {
        let label = timestamp.format("%H:%M").to_string();
        Self {
            timestamp,
            noise_level,
            chill_level,
            category,
            category_label: None,
            label,
        }
    }

    /// Keep the category text as it appeared in the record.
    pub fn with_category_label(mut self, raw: impl Into<String>) -> Self {
        self.category_label = Some(raw.into());
        self
    }

    /// Category text for display: the recorded label, or the parsed
    /// category's name for points built without one.
    pub fn category_label(&self) -> Option<&str> {
        self.category_label
            .as_deref()
            .or_else(|| self.category.map(|c| c.label()))
    }

    /// `HH:MM` label used on the x axis
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Primary plotted level: the noise metric, or the chill metric when the
    /// record only carries that one.
    pub fn level(&self) -> Option<f64> {
        self.noise_level.or(self.chill_level)
    }
}

/// Chronologically ordered, non-empty series of points.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Returns `None` for an empty point list.
    pub fn new(points: Vec<TimeSeriesPoint>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Index of the last point
    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&TimeSeriesPoint> {
        self.points.get(index)
    }

    pub fn position_by_time(&self, timestamp: &DateTime<FixedOffset>) -> Option<usize> {
        self.points.iter().position(|p| &p.timestamp == timestamp)
    }

    pub fn position_by_label(&self, label: &str) -> Option<usize> {
        self.points.iter().position(|p| p.label == label)
    }
}
