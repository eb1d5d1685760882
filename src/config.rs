//! Key=value configuration loading.
//!
//! One `key=value` pair per line; `#` starts a comment; blank lines and
//! unrecognized keys are ignored. A missing file falls back to defaults
//! with a warning, matching the behavior expected of batch runs pointed at
//! a default config path.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{trace, warn};

use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    /// Neighbor distance threshold ε.
    pub neighbor_distance: f64,
    /// Weighted-PI prevalence threshold.
    pub min_prevalence: f64,
    /// Reserved for downstream conditional-probability filtering; parsed
    /// and carried but consumed by nothing.
    pub min_cond_prob: f64,
    /// Diagnostics only: raises the default log level in the driver.
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset.csv"),
            neighbor_distance: 1.0,
            min_prevalence: 0.5,
            min_cond_prob: 0.5,
            debug_mode: false,
        }
    }
}

/// Load configuration from `path`.
pub fn load(path: &Path) -> ConfigResult<AppConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut config = AppConfig::default();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        match key {
            "dataset_path" => config.dataset_path = PathBuf::from(value),
            "neighbor_distance" => config.neighbor_distance = parse_f64(key, value)?,
            "min_prevalence" => config.min_prevalence = parse_f64(key, value)?,
            "min_cond_prob" => config.min_cond_prob = parse_f64(key, value)?,
            "debug_mode" => config.debug_mode = value == "true" || value == "1",
            other => trace!("Ignoring unrecognized config key {other:?}"),
        }
    }

    Ok(config)
}

fn parse_f64(key: &str, value: &str) -> ConfigResult<f64> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
