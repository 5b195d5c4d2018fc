use std::fs;
use std::path::Path;
use std::time::Duration;

use egui::{Color32, Stroke};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::JobHistory;
use crate::driver::{LineKind, LineStyle};
use crate::logging::LoggingConfig;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Width and colour of one line flavour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSettings {
    pub width: f32,
    pub color: Color32,
}

impl LineSettings {
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.width, self.color)
    }
}

/// Tunables of the pipeline. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Pause between two operations of the real-time driver
    pub real_time_interval_ms: u64,
    pub basic_line: LineSettings,
    pub special_line: LineSettings,
    pub history_capacity: usize,
    /// `env_logger` filter, `RUST_LOG` is used when unset
    pub log_filter: Option<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        let basic = LineStyle::basic().stroke;
        let special = LineStyle::special().stroke;
        Self {
            real_time_interval_ms: 20,
            basic_line: LineSettings { width: basic.width, color: basic.color },
            special_line: LineSettings { width: special.width, color: special.color },
            history_capacity: JobHistory::DEFAULT_CAPACITY,
            log_filter: None,
        }
    }
}

impl PipelineSettings {
    pub fn from_json_str(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SettingsResult<()> {
        for (label, line) in [("basic", &self.basic_line), ("special", &self.special_line)] {
            if !(line.width.is_finite() && line.width > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{} line width must be positive, got {}",
                    label, line.width
                )));
            }
        }
        Ok(())
    }

    pub fn real_time_interval(&self) -> Duration {
        Duration::from_millis(self.real_time_interval_ms)
    }

    pub fn basic_line_style(&self) -> LineStyle {
        LineStyle {
            kind: LineKind::Solid,
            stroke: self.basic_line.stroke(),
        }
    }

    /// Dashed, with the dash pattern of [`LineStyle::special`]
    pub fn special_line_style(&self) -> LineStyle {
        LineStyle {
            stroke: self.special_line.stroke(),
            ..LineStyle::special()
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }
}
