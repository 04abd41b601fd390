use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::data::error::EngineResult;
use crate::data::loader::{load_criteria_file, load_file};
use crate::data::model::RecordSet;
use crate::data::pipeline::{filter_records, FilterOutcome};
use crate::data::writer::save_csv;

// ---------------------------------------------------------------------------
// Criteria grid – the editable table of criteria rows
// ---------------------------------------------------------------------------

/// Editable criteria table. Column names are free text until the grid is
/// turned into a [`RecordSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaGrid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CriteriaGrid {
    /// A grid with the given columns and one blank row.
    pub fn new(columns: Vec<String>) -> Self {
        let mut grid = Self {
            columns,
            rows: Vec::new(),
        };
        grid.add_row();
        grid
    }

    /// Replace the grid with the contents of a criteria file.
    pub fn from_record_set(records: &RecordSet) -> Self {
        Self {
            columns: records.columns().to_vec(),
            rows: records.rows().iter().map(|r| r.values().to_vec()).collect(),
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(vec![String::new(); self.columns.len()]);
    }

    /// Remove the last row.
    pub fn delete_row(&mut self) {
        self.rows.pop();
    }

    pub fn add_column(&mut self, name: impl Into<String>) {
        self.columns.push(name.into());
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    pub fn remove_column(&mut self, index: usize) {
        if index >= self.columns.len() {
            return;
        }
        self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Validate column names and build the criteria table.
    pub fn to_record_set(&self) -> EngineResult<RecordSet> {
        RecordSet::new(self.columns.iter().cloned(), self.rows.clone())
    }
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Data file chosen by the user.
    pub data_path: Option<PathBuf>,

    /// Criteria file the grid was last seeded from.
    pub criteria_path: Option<PathBuf>,

    pub criteria: CriteriaGrid,

    /// Output of the last successful filter run (preview).
    pub result: Option<RecordSet>,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let criteria = CriteriaGrid::new(settings.default_criteria_columns.clone());
        Self {
            settings,
            data_path: None,
            criteria_path: None,
            criteria,
            result: None,
            status_message: None,
        }
    }

    fn set_status(&mut self, severity: Severity, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            severity,
            text: text.into(),
        });
    }

    pub fn set_data_path(&mut self, path: PathBuf) {
        self.data_path = Some(path);
        self.result = None;
        self.status_message = None;
    }

    /// Seed the grid from a criteria file. On failure the grid is left as is.
    pub fn load_criteria(&mut self, path: PathBuf) {
        match load_criteria_file(&path, self.settings.input_delimiter_byte()) {
            Ok(records) => {
                self.criteria = CriteriaGrid::from_record_set(&records);
                self.criteria_path = Some(path);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to read criteria file: {e:#}");
                self.set_status(
                    Severity::Error,
                    format!("Could not read criteria file: {e:#}"),
                );
            }
        }
    }

    /// Load the data file and run the criteria against it.
    ///
    /// Returns the output table when at least one row matched. Every other
    /// outcome (missing input, load failure, engine error, no matches) is
    /// reported through `status_message` and yields `None`.
    pub fn run_filter(&mut self) -> Option<RecordSet> {
        self.result = None;

        let Some(data_path) = self.data_path.clone() else {
            self.set_status(Severity::Warning, "Please select a data CSV file.");
            return None;
        };

        if self.criteria.row_count() == 0 {
            self.set_status(
                Severity::Warning,
                "Please enter criteria or select a criteria file.",
            );
            return None;
        }

        let criteria = match self.criteria.to_record_set() {
            Ok(c) => c,
            Err(e) => {
                self.set_status(Severity::Error, format!("Invalid criteria: {e}"));
                return None;
            }
        };

        let data = match load_file(&data_path, self.settings.input_delimiter_byte()) {
            Ok(d) => d,
            Err(e) => {
                log::error!("Failed to load data file: {e:#}");
                self.set_status(Severity::Error, format!("Error reading file: {e:#}"));
                return None;
            }
        };

        match filter_records(&data, &criteria, &self.settings.filter_options()) {
            Ok(FilterOutcome::Matched(out)) => {
                self.set_status(Severity::Info, format!("{} matching records.", out.len()));
                self.result = Some(out.clone());
                Some(out)
            }
            Ok(FilterOutcome::NoMatches) => {
                self.set_status(Severity::Info, "No matching records found.");
                None
            }
            Err(e) => {
                log::error!("Filtering failed: {e}");
                self.set_status(Severity::Error, e.to_string());
                None
            }
        }
    }

    /// Persist a filter result and report the outcome.
    pub fn save_result(&mut self, records: &RecordSet, path: &Path) {
        match save_csv(records, path, self.settings.output_delimiter_byte()) {
            Ok(()) => self.set_status(
                Severity::Info,
                format!("Filtered data saved to '{}'.", path.display()),
            ),
            Err(e) => {
                log::error!("Failed to save result: {e:#}");
                self.set_status(Severity::Error, format!("Error saving file: {e:#}"));
            }
        }
    }
}
