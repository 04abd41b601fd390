use super::error::EngineResult;
use super::filter::{evaluate, BlankCriteriaCells};
use super::model::RecordSet;
use super::projector::{OrtSplitPolicy, ResultProjector};

// ---------------------------------------------------------------------------
// Evaluate → project in one pass
// ---------------------------------------------------------------------------

/// Knobs for a single filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub ort_split: OrtSplitPolicy,
    pub blank_criteria_cells: BlankCriteriaCells,
}

/// Result of a successful run. Zero matches is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Matched(RecordSet),
    NoMatches,
}

/// Select the data rows matching any criteria row, then reshape them into
/// the output table.
pub fn filter_records(
    data: &RecordSet,
    criteria: &RecordSet,
    options: &FilterOptions,
) -> EngineResult<FilterOutcome> {
    let matched = evaluate(data, criteria, options.blank_criteria_cells)?;
    let projected = ResultProjector::new(options.ort_split).project(&matched)?;

    log::info!(
        "{} of {} rows matched {} criteria rows",
        projected.len(),
        data.len(),
        criteria.len()
    );

    if projected.is_empty() {
        Ok(FilterOutcome::NoMatches)
    } else {
        Ok(FilterOutcome::Matched(projected))
    }
}
