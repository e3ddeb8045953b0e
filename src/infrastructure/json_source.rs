// Bundled JSON file source
use crate::application::record_source::{LoadError, RecordSource};
use crate::domain::category::Category;
use crate::domain::telemetry::SleepReading;
use crate::infrastructure::config::SchemaKind;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    schema: SchemaKind,
}

/// Flat snore event record. Fields the chart does not plot are skipped.
#[derive(Debug, Deserialize)]
struct SnoreRecord {
    datetime: String,
    max_snore_db: Option<f64>,
    noise_level: Option<f64>,
    category: Option<String>,
}

/// Pivoted row: one column per loudness bucket plus the chill metric.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChillRow {
    #[serde(alias = "Row Labels")]
    row_labels: String,
    #[serde(alias = "Chill")]
    chill: Option<f64>,
    #[serde(alias = "Epic")]
    epic: Option<f64>,
    #[serde(alias = "Light")]
    light: Option<f64>,
    #[serde(alias = "Loud")]
    loud: Option<f64>,
    #[serde(alias = "Quiet")]
    quiet: Option<f64>,
}

impl SnoreRecord {
    fn into_reading(self) -> SleepReading {
        SleepReading::new(
            self.datetime,
            self.max_snore_db.or(self.noise_level),
            None,
            self.category,
        )
    }
}

impl ChillRow {
    /// The loudest populated bucket becomes the category and noise level.
    fn into_reading(self) -> SleepReading {
        let loudest = [
            (Category::Quiet, self.quiet),
            (Category::Light, self.light),
            (Category::Loud, self.loud),
            (Category::Epic, self.epic),
        ]
        .into_iter()
        .filter_map(|(category, value)| value.map(|v| (category, v)))
        .max_by(|a, b| a.1.total_cmp(&b.1));

        SleepReading::new(
            self.row_labels,
            loudest.map(|(_, value)| value),
            self.chill,
            loudest.map(|(category, _)| category.label().to_string()),
        )
    }
}

impl JsonFileSource {
    pub fn new(path: PathBuf, schema: SchemaKind) -> Self {
        Self { path, schema }
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch_readings(&self) -> Result<Vec<SleepReading>, LoadError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::ResourceMissing {
                path: self.path.clone(),
            },
            _ => LoadError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;

        tracing::debug!(
            "Read {} bytes from {} ({:?} schema)",
            bytes.len(),
            self.path.display(),
            self.schema
        );
        decode_readings(&bytes, self.schema)
    }
}

pub fn decode_readings(bytes: &[u8], schema: SchemaKind) -> Result<Vec<SleepReading>, LoadError> {
    let readings = match schema {
        SchemaKind::Snore => serde_json::from_slice::<Vec<SnoreRecord>>(bytes)?
            .into_iter()
            .map(SnoreRecord::into_reading)
            .collect(),
        SchemaKind::Chill => serde_json::from_slice::<Vec<ChillRow>>(bytes)?
            .into_iter()
            .map(ChillRow::into_reading)
            .collect(),
    };
    Ok(readings)
}
