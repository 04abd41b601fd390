use thiserror::Error;

// ---------------------------------------------------------------------------
// EngineError – schema and projection failures raised by the core
// ---------------------------------------------------------------------------

/// Errors surfaced by the matching / projection engine.
///
/// Any of these fails the whole call; the engine never skips past one.
/// An empty match is *not* an error, see [`super::pipeline::FilterOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A criteria row references a column the data does not have.
    #[error("Column '{0}' not found")]
    UnknownColumn(String),

    /// The matched rows lack a column the projection needs.
    #[error("Required column '{0}' is missing")]
    MissingRequiredColumn(String),

    /// `Ort` has no space and the split policy is `Reject`.
    #[error("Row {row}: cannot split Ort value '{value}' into PLZ and Ortsname")]
    UnsplittableOrt { row: usize, value: String },

    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("Column {0} has an empty name")]
    EmptyColumnName(usize),

    #[error("Row {row}: expected {expected} values but found {found}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
