// Source trait for raw sleep telemetry records
use crate::domain::telemetry::SleepReading;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("telemetry resource not found: {}", path.display())]
    ResourceMissing { path: PathBuf },

    #[error("failed to read telemetry resource {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed telemetry JSON")]
    MalformedJson(#[from] serde_json::Error),

    #[error("invalid timestamp {value:?} in record {index}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("telemetry resource contains no records")]
    EmptySeries,
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every record in source order
    async fn fetch_readings(&self) -> Result<Vec<SleepReading>, LoadError>;
}
