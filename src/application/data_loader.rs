// Data loader - Turns raw records into a normalized time series
use crate::application::record_source::{LoadError, RecordSource};
use crate::domain::category::Category;
use crate::domain::telemetry::{SleepReading, TimeSeries, TimeSeriesPoint};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike, Utc};
use std::sync::Arc;

/// Offset-less layouts, read as UTC
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Clone)]
pub struct DataLoader {
    source: Arc<dyn RecordSource>,
    display_offset: FixedOffset,
}

impl DataLoader {
    pub fn new(source: Arc<dyn RecordSource>, display_offset: FixedOffset) -> Self {
        Self {
            source,
            display_offset,
        }
    }

    pub async fn load(&self) -> Result<TimeSeries, LoadError> {
        let readings = self.source.fetch_readings().await?;
        tracing::debug!("Fetched {} raw sleep records", readings.len());

        let series = normalize(readings, self.display_offset)?;
        tracing::info!(
            "Loaded {} points ({} - {})",
            series.len(),
            series.points()[0].label(),
            series.points()[series.last_index()].label()
        );
        Ok(series)
    }
}

/// Parse every reading in order. The first bad timestamp aborts the load.
pub fn normalize(readings: Vec<SleepReading>, display_offset: FixedOffset) -> Result<TimeSeries, LoadError> {
    let mut points = Vec::with_capacity(readings.len());

    for (index, reading) in readings.into_iter().enumerate() {
        let timestamp = parse_timestamp(&reading.datetime, display_offset).ok_or_else(|| {
            LoadError::InvalidTimestamp {
                index,
                value: reading.datetime.clone(),
            }
        })?;

        let raw_category = reading
            .category
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty());

        let category = raw_category.and_then(|label| {
            let category = Category::from_label(label);
            if category.is_none() {
                tracing::warn!("Unknown category {:?} in record {}", label, index);
            }
            category
        });

        let point = TimeSeriesPoint::new(timestamp, reading.noise_level, reading.chill_level, category);
        points.push(match raw_category {
            Some(label) => point.with_category_label(label),
            None => point,
        });
    }

    TimeSeries::new(points).ok_or(LoadError::EmptySeries)
}

/// Parse a record timestamp, shift it into `display_offset` and drop
/// everything below the minute.
pub fn parse_timestamp(raw: &str, display_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();

    let instant = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(_) => {
            let naive_part = trimmed
                .strip_suffix(" UTC")
                .or_else(|| trimmed.strip_suffix('Z'))
                .unwrap_or(trimmed);
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(naive_part, format).ok())?
                .and_utc()
        }
    };

    instant
        .with_timezone(&display_offset)
        .with_second(0)?
        .with_nanosecond(0)
}
