use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::BlankCriteriaCells;
use crate::data::pipeline::FilterOptions;
use crate::data::projector::OrtSplitPolicy;

/// Environment variable pointing at a settings file.
pub const CONFIG_ENV: &str = "CSV_FILTER_CONFIG";
/// Settings file looked up in the working directory when the env var is unset.
pub const CONFIG_FILE: &str = "csv-filter.json";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User-tunable settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delimiter of the data and criteria files.
    pub input_delimiter: char,
    /// Delimiter of the saved result.
    pub output_delimiter: char,
    pub ort_split: OrtSplitPolicy,
    pub blank_criteria_cells: BlankCriteriaCells,
    /// Columns of a fresh criteria grid.
    pub default_criteria_columns: Vec<String>,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_delimiter: ';',
            output_delimiter: ',',
            ort_split: OrtSplitPolicy::default(),
            blank_criteria_cells: BlankCriteriaCells::default(),
            default_criteria_columns: vec![
                "Gemkg-Name".to_string(),
                "Flur".to_string(),
                "Flurstuecksnummer".to_string(),
            ],
            window_size: [1000.0, 700.0],
        }
    }
}

impl Settings {
    /// Locate and read the settings file, or fall back to defaults when
    /// there is none.
    pub fn load() -> Result<Self> {
        match locate() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        for (name, c) in [
            ("input_delimiter", self.input_delimiter),
            ("output_delimiter", self.output_delimiter),
        ] {
            if !c.is_ascii() {
                bail!("{name} must be a single ASCII character, got '{c}'");
            }
        }
        Ok(())
    }

    pub fn input_delimiter_byte(&self) -> u8 {
        self.input_delimiter as u8
    }

    pub fn output_delimiter_byte(&self) -> u8 {
        self.output_delimiter as u8
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            ort_split: self.ort_split,
            blank_criteria_cells: self.blank_criteria_cells,
        }
    }
}

fn locate() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(CONFIG_FILE);
    local.exists().then_some(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "output_delimiter": ";", "ort_split": "reject" }"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.output_delimiter_byte(), b';');
        assert_eq!(settings.input_delimiter_byte(), b';');
        assert_eq!(settings.ort_split, OrtSplitPolicy::Reject);
        assert_eq!(settings.blank_criteria_cells, BlankCriteriaCells::MatchEmpty);
        assert_eq!(settings.default_criteria_columns.len(), 3);
    }

    #[test]
    fn policies_use_snake_case() {
        let settings: Settings = serde_json::from_str(
            r#"{ "ort_split": "place_from_whole", "blank_criteria_cells": "ignore" }"#,
        )
        .unwrap();
        let options = settings.filter_options();
        assert_eq!(options.ort_split, OrtSplitPolicy::PlaceFromWhole);
        assert_eq!(options.blank_criteria_cells, BlankCriteriaCells::Ignore);
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "input_delimiter": "§" }"#).unwrap();

        let err = Settings::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("input_delimiter"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Settings::from_file(&path).is_err());
    }
}
