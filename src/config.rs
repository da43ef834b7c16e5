use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::model::PayloadRange;

/// Dataset read at startup when neither the CLI nor the config names one.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Dashboard settings, loaded from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub window_size: [f32; 2],
    /// Upper slider bound; raised to the observed maximum payload if lower.
    pub slider_max_kg: f64,
    pub slider_step_kg: f64,
    /// Distance between slider tick labels.
    pub slider_mark_kg: f64,
    pub data_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1200.0, 900.0],
            slider_max_kg: 10_000.0,
            slider_step_kg: 1000.0,
            slider_mark_kg: 1000.0,
            data_path: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_reader(file).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.slider_max_kg > 0.0) {
            return Err(ConfigError::Invalid("slider_max_kg must be positive".into()));
        }
        if !(self.slider_step_kg > 0.0) || !(self.slider_mark_kg > 0.0) {
            return Err(ConfigError::Invalid(
                "slider_step_kg and slider_mark_kg must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Bounds offered by the payload slider: zero up to the larger of the
    /// configured maximum and the observed maximum payload.
    pub fn slider_bounds(&self, observed: Option<PayloadRange>) -> PayloadRange {
        let observed_max = observed.map_or(0.0, |r| r.high);
        PayloadRange::new(0.0, self.slider_max_kg.max(observed_max))
    }

    /// Tick positions between the slider bounds.
    pub fn slider_marks(&self, bounds: &PayloadRange) -> Vec<f64> {
        let mut marks = Vec::new();
        let mut mark = bounds.low;
        while mark <= bounds.high {
            marks.push(mark);
            mark += self.slider_mark_kg;
        }
        marks
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_reference_slider() {
        let config = DashboardConfig::default();
        let bounds = config.slider_bounds(Some(PayloadRange::new(0.0, 9600.0)));
        assert_eq!(bounds, PayloadRange::new(0.0, 10_000.0));
        let marks = config.slider_marks(&bounds);
        assert_eq!(marks.len(), 11);
        assert_eq!(marks.last(), Some(&10_000.0));
    }

    #[test]
    fn slider_grows_to_observed_maximum() {
        let config = DashboardConfig::default();
        let bounds = config.slider_bounds(Some(PayloadRange::new(100.0, 15_600.0)));
        assert_eq!(bounds.high, 15_600.0);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "slider_step_kg": 500.0, "data_path": "launches.parquet" }}"#).unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.slider_step_kg, 500.0);
        assert_eq!(config.slider_max_kg, 10_000.0);
        assert_eq!(config.data_path, Some(PathBuf::from("launches.parquet")));
    }

    #[test]
    fn rejects_non_positive_step() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "slider_step_kg": 0.0 }}"#).unwrap();

        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/dashboard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
