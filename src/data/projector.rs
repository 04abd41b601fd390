use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use super::model::{RecordSet, Schema};

pub const VORNAME: &str = "Vorname";
pub const NAME: &str = "Name";
pub const ADRESSE: &str = "Adresse";
pub const ORT: &str = "Ort";

pub const VORNAME_NAME: &str = "Vorname_Name";
pub const PLZ: &str = "PLZ";
pub const ORTSNAME: &str = "Ortsname";

/// Output columns, in order.
pub const OUTPUT_COLUMNS: [&str; 4] = [VORNAME_NAME, ADRESSE, PLZ, ORTSNAME];

/// What to do with an `Ort` value that has no space to split on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrtSplitPolicy {
    /// `PLZ` gets the whole value, `Ortsname` stays empty.
    #[default]
    EmptyPlace,
    /// Both `PLZ` and `Ortsname` get the whole value.
    PlaceFromWhole,
    /// Fail the projection.
    Reject,
}

/// Split `"<PLZ> <Ortsname>"` on the first space. The place name keeps any
/// further spaces.
pub fn split_ort(ort: &str, policy: OrtSplitPolicy, row: usize) -> EngineResult<(String, String)> {
    match ort.split_once(' ') {
        Some((plz, place)) => Ok((plz.to_string(), place.to_string())),
        None => match policy {
            OrtSplitPolicy::EmptyPlace => Ok((ort.to_string(), String::new())),
            OrtSplitPolicy::PlaceFromWhole => Ok((ort.to_string(), ort.to_string())),
            OrtSplitPolicy::Reject => Err(EngineError::UnsplittableOrt {
                row,
                value: ort.to_string(),
            }),
        },
    }
}

/// The schema every projection produces.
pub fn output_schema() -> EngineResult<Arc<Schema>> {
    Ok(Arc::new(Schema::new(OUTPUT_COLUMNS)?))
}

// ---------------------------------------------------------------------------
// ResultProjector
// ---------------------------------------------------------------------------

/// Reshapes matched rows into `[Vorname_Name, Adresse, PLZ, Ortsname]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultProjector {
    pub ort_policy: OrtSplitPolicy,
}

impl ResultProjector {
    pub fn new(ort_policy: OrtSplitPolicy) -> Self {
        ResultProjector { ort_policy }
    }

    /// Derive the output table. A zero-row input yields a zero-row output
    /// without checking for the source columns.
    pub fn project(&self, matched: &RecordSet) -> EngineResult<RecordSet> {
        let schema = output_schema()?;
        if matched.is_empty() {
            return Ok(RecordSet::empty(schema));
        }

        let source = matched.schema();
        let required = |name: &str| {
            source
                .index_of(name)
                .ok_or_else(|| EngineError::MissingRequiredColumn(name.to_string()))
        };
        let vorname = required(VORNAME)?;
        let name = required(NAME)?;
        let adresse = required(ADRESSE)?;
        let ort = required(ORT)?;

        let rows = matched
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let (plz, ortsname) = split_ort(row.get(ort), self.ort_policy, i)?;
                Ok(vec![
                    format!("{} {}", row.get(vorname), row.get(name)),
                    row.get(adresse).to_string(),
                    plz,
                    ortsname,
                ])
            })
            .collect::<EngineResult<Vec<_>>>()?;

        RecordSet::with_schema(schema, rows)
    }
}
