//! Dashboard settings.
//! Read from an optional `dashboard.json` in the working directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "dashboard.json";
pub const DEFAULT_DATA_PATH: &str = "life_expectancy_cleaned.csv";
pub const DEFAULT_RANKING_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// CSV file with one row per country
    pub data_path: PathBuf,
    /// How many countries each gap bar chart shows
    pub ranking_size: usize,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            ranking_size: DEFAULT_RANKING_SIZE,
            window_size: [1280.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Load settings from `path`, or the defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let config =
            DashboardConfig::load_or_default(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("life_expectancy_cleaned.csv"));
        assert_eq!(config.ranking_size, 10);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = DashboardConfig::from_json(r#"{ "ranking_size": 5 }"#).unwrap();
        assert_eq!(config.ranking_size, 5);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(DashboardConfig::from_json(r#"{ "rankingsize": 5 }"#).is_err());
    }
}
