use serde::{Deserialize, Serialize};

use super::error::EngineResult;
use super::model::{Record, RecordSet, Schema};

// ---------------------------------------------------------------------------
// Criteria compilation: criteria table → per-row column tests
// ---------------------------------------------------------------------------

/// How an empty cell in the criteria table is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankCriteriaCells {
    /// The cell only matches data values that are empty as well.
    #[default]
    MatchEmpty,
    /// The cell is left out of its criteria row entirely.
    Ignore,
}

/// One criteria row resolved against the data schema: each entry is a
/// data column index and the lower-cased value that column must equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaRow {
    tests: Vec<(usize, String)>,
}

impl CriteriaRow {
    pub fn new(tests: Vec<(usize, String)>) -> Self {
        CriteriaRow { tests }
    }
}

fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Resolve every criteria column against `data` once and fold the
/// criteria values.
///
/// Fails with `UnknownColumn` if a criteria column is absent from `data`,
/// even when the offending column would be skipped as blank.
pub fn compile_criteria(
    data: &Schema,
    criteria: &RecordSet,
    blanks: BlankCriteriaCells,
) -> EngineResult<Vec<CriteriaRow>> {
    let targets = criteria
        .columns()
        .iter()
        .map(|col| data.resolve(col))
        .collect::<EngineResult<Vec<usize>>>()?;

    let compiled = criteria
        .rows()
        .iter()
        .map(|row| {
            let tests = targets
                .iter()
                .zip(row.values())
                .filter(|(_, value)| match blanks {
                    BlankCriteriaCells::MatchEmpty => true,
                    BlankCriteriaCells::Ignore => !value.is_empty(),
                })
                .map(|(&idx, value)| (idx, fold(value)))
                .collect();
            CriteriaRow::new(tests)
        })
        .collect();

    Ok(compiled)
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// AND over the criteria row's columns: every column must equal its
/// criteria value, ignoring case. A row with no columns is satisfied by
/// every record.
pub fn row_satisfies_criteria_row(row: &Record, criteria: &CriteriaRow) -> bool {
    criteria
        .tests
        .iter()
        .all(|(idx, expected)| fold(row.get(*idx)) == *expected)
}

/// OR over the criteria rows.
pub fn row_matches_any(row: &Record, criteria: &[CriteriaRow]) -> bool {
    criteria.iter().any(|c| row_satisfies_criteria_row(row, c))
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Return the rows of `data` that satisfy at least one row of `criteria`,
/// in their original order.
///
/// If either table has no rows the result is empty and no columns are
/// resolved.
pub fn evaluate(
    data: &RecordSet,
    criteria: &RecordSet,
    blanks: BlankCriteriaCells,
) -> EngineResult<RecordSet> {
    if data.is_empty() || criteria.is_empty() {
        return Ok(RecordSet::empty(data.schema().clone()));
    }

    let compiled = compile_criteria(data.schema(), criteria, blanks)?;
    log::debug!(
        "Compiled {} criteria rows over columns {:?}",
        compiled.len(),
        criteria.columns()
    );

    Ok(data.filter(|row| row_matches_any(row, &compiled)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::EngineError;

    fn table(columns: &[&str], rows: &[&[&str]]) -> RecordSet {
        RecordSet::new(
            columns.iter().copied(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn people() -> RecordSet {
        table(
            &["Vorname", "Name", "Adresse", "Ort"],
            &[
                &["Anna", "Muster", "Hauptstr. 1", "12345 Berlin"],
                &["Bob", "Beispiel", "Nebenweg 2", "54321 Hamburg"],
                &["Carla", "Muster", "Ringstr. 3", "12345 Berlin"],
            ],
        )
    }

    fn first_names(rs: &RecordSet) -> Vec<&str> {
        rs.rows().iter().map(|r| r.get(0)).collect()
    }

    #[test]
    fn single_criteria_matches_case_insensitively() {
        let criteria = table(&["Vorname"], &[&["anna"]]);
        let out = evaluate(&people(), &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert_eq!(first_names(&out), ["Anna"]);
    }

    #[test]
    fn criteria_rows_are_or_combined_in_data_order() {
        let criteria = table(&["Vorname"], &[&["Bob"], &["Anna"]]);
        let out = evaluate(&people(), &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert_eq!(first_names(&out), ["Anna", "Bob"]);
    }

    #[test]
    fn columns_within_a_row_are_and_combined() {
        let criteria = table(&["Name", "Vorname"], &[&["muster", "CARLA"]]);
        let out = evaluate(&people(), &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert_eq!(first_names(&out), ["Carla"]);
    }

    #[test]
    fn overlapping_criteria_do_not_duplicate_rows() {
        let criteria = table(&["Name"], &[&["Muster"], &["MUSTER"]]);
        let out = evaluate(&people(), &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert_eq!(first_names(&out), ["Anna", "Carla"]);
    }

    #[test]
    fn uppercase_criteria_matches_lowercase_data() {
        let data = table(&["Vorname"], &[&["anna"]]);
        let criteria = table(&["Vorname"], &[&["ANNA"]]);
        let out = evaluate(&data, &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn no_trimming_or_partial_matches() {
        let criteria = table(&["Vorname"], &[&["Ann"], &[" Anna"]]);
        let out = evaluate(&people(), &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_inputs_match_nothing() {
        let criteria = table(&["Vorname"], &[&["Anna"]]);
        let no_data = table(&["Vorname"], &[]);
        let no_criteria = table(&["Vorname"], &[]);
        let blanks = BlankCriteriaCells::MatchEmpty;
        assert!(evaluate(&no_data, &criteria, blanks).unwrap().is_empty());
        assert!(evaluate(&people(), &no_criteria, blanks).unwrap().is_empty());
    }

    #[test]
    fn empty_criteria_table_skips_column_resolution() {
        let criteria = table(&["Beruf"], &[]);
        let out = evaluate(&people(), &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_criteria_column_fails() {
        let criteria = table(&["Beruf"], &[&["Koch"]]);
        let err = evaluate(&people(), &criteria, BlankCriteriaCells::MatchEmpty).unwrap_err();
        assert_eq!(err, EngineError::UnknownColumn("Beruf".into()));
    }

    #[test]
    fn zero_column_criteria_row_matches_everything() {
        let criteria = RecordSet::new(Vec::<String>::new(), vec![vec![]]).unwrap();
        let out = evaluate(&people(), &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn blank_cells_match_empty_by_default() {
        let data = table(&["Vorname", "Name"], &[&["Anna", ""], &["Bob", "Beispiel"]]);
        let criteria = table(&["Vorname", "Name"], &[&["", ""], &["bob", ""]]);
        let out = evaluate(&data, &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn blank_cell_matches_empty_data_value() {
        let data = table(&["Vorname", "Name"], &[&["Anna", ""], &["Bob", "Beispiel"]]);
        let criteria = table(&["Vorname", "Name"], &[&["anna", ""]]);
        let out = evaluate(&data, &criteria, BlankCriteriaCells::MatchEmpty).unwrap();
        assert_eq!(first_names(&out), ["Anna"]);
    }

    #[test]
    fn all_blank_row_matches_everything_when_ignored() {
        let data = table(&["Vorname", "Name"], &[&["Anna", ""], &["Bob", "Beispiel"]]);
        let criteria = table(&["Vorname", "Name"], &[&["", ""]]);
        let out = evaluate(&data, &criteria, BlankCriteriaCells::Ignore).unwrap();
        assert_eq!(first_names(&out), ["Anna", "Bob"]);
    }

    #[test]
    fn blank_cells_can_be_ignored() {
        let criteria = table(&["Vorname", "Name"], &[&["", "Muster"]]);
        let out = evaluate(&people(), &criteria, BlankCriteriaCells::Ignore).unwrap();
        assert_eq!(first_names(&out), ["Anna", "Carla"]);
    }

    #[test]
    fn predicates_compose() {
        let data = people();
        let schema = data.schema();
        let anna = CriteriaRow::new(vec![(schema.resolve("Vorname").unwrap(), "anna".into())]);
        let hamburg = CriteriaRow::new(vec![(
            schema.resolve("Ort").unwrap(),
            "54321 hamburg".into(),
        )]);
        let rows = data.rows();
        assert!(row_satisfies_criteria_row(&rows[0], &anna));
        assert!(!row_satisfies_criteria_row(&rows[1], &anna));
        assert!(row_matches_any(&rows[1], &[anna.clone(), hamburg.clone()]));
        assert!(!row_matches_any(&rows[2], &[anna, hamburg]));
        assert!(!row_matches_any(&rows[2], &[]));
    }
}
