use crate::domain::view_window::WindowProfile;
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub window: WindowSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub schema: SchemaKind,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            schema: SchemaKind::default(),
            utc_offset_minutes: 0,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/dump_graph.json")
}

/// Layout of the bundled JSON document
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Flat snore event records
    #[default]
    Snore,
    /// Pivoted rows with one column per loudness bucket plus chill
    Chill,
}

impl SchemaKind {
    pub fn default_profile(&self) -> WindowProfile {
        match self {
            SchemaKind::Snore => WindowProfile::new(39, 39, WindowProfile::DEFAULT_DRAG_PIXELS_PER_INDEX),
            SchemaKind::Chill => WindowProfile::new(7, 7, WindowProfile::DEFAULT_DRAG_PIXELS_PER_INDEX),
        }
    }
}

/// Optional overrides of the schema profile
#[derive(Debug, Deserialize, Clone, Default)]
pub struct WindowSettings {
    pub min_window_length: Option<usize>,
    pub max_granularity: Option<usize>,
    pub drag_pixels_per_index: Option<f64>,
}

impl AppConfig {
    pub fn window_profile(&self) -> anyhow::Result<WindowProfile> {
        let defaults = self.data.schema.default_profile();
        let profile = WindowProfile::new(
            self.window.min_window_length.unwrap_or(defaults.min_window_length),
            self.window.max_granularity.unwrap_or(defaults.max_granularity),
            self.window
                .drag_pixels_per_index
                .unwrap_or(defaults.drag_pixels_per_index),
        );

        anyhow::ensure!(
            profile.min_window_length > 0,
            "window.min_window_length must be positive"
        );
        anyhow::ensure!(
            profile.drag_pixels_per_index.is_finite() && profile.drag_pixels_per_index > 0.0,
            "window.drag_pixels_per_index must be a positive number, got {}",
            profile.drag_pixels_per_index
        );
        Ok(profile)
    }

    pub fn display_offset(&self) -> anyhow::Result<FixedOffset> {
        self.data
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "data.utc_offset_minutes out of range: {}",
                    self.data.utc_offset_minutes
                )
            })
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/sleep_chart").required(false))
        .add_source(
            config::Environment::with_prefix("SLEEP_CHART")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
