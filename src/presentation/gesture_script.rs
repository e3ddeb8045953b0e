// Scripted gesture feed, one JSON object per line
use crate::application::chart_session::{ChartHandle, SessionError, TapEvent};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum ScriptedGesture {
    Pinch {
        magnification: f64,
    },
    Drag {
        translation_x: f64,
    },
    TapTime {
        #[serde(deserialize_with = "deserialize_rfc3339")]
        time: DateTime<FixedOffset>,
    },
    TapLabel {
        label: String,
    },
}

fn deserialize_rfc3339<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
}

impl ScriptedGesture {
    pub async fn dispatch(self, handle: &ChartHandle) -> Result<(), SessionError> {
        match self {
            ScriptedGesture::Pinch { magnification } => handle.pinch(magnification).await,
            ScriptedGesture::Drag { translation_x } => handle.drag(translation_x).await,
            ScriptedGesture::TapTime { time } => handle.tap(TapEvent::Time(time)).await,
            ScriptedGesture::TapLabel { label } => handle.tap(TapEvent::Label(label)).await,
        }
    }
}

/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ScriptedGesture>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Feed every gesture in `reader` to the session. Unparsable lines are
/// logged and skipped. Returns the number of gestures dispatched.
pub async fn replay<R>(reader: R, handle: &ChartHandle) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_number = 0;
    let mut dispatched = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        match parse_line(&line) {
            Ok(Some(gesture)) => {
                gesture.dispatch(handle).await?;
                dispatched += 1;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Skipping gesture line {}: {}", line_number, e);
            }
        }
    }

    tracing::debug!("Replayed {} gestures from {} lines", dispatched, line_number);
    Ok(dispatched)
}
