/// Data layer: table model, loading, matching, projection and saving.
///
/// Architecture:
/// ```text
///  data.csv           criteria.csv / grid
///     │                     │
///     ▼                     ▼
///   ┌──────────────────────────┐
///   │  loader                   │  delimited text → RecordSet
///   └──────────────────────────┘
///              │
///              ▼
///   ┌──────────────────────────┐
///   │  filter                   │  OR over criteria rows, AND over columns
///   └──────────────────────────┘
///              │
///              ▼
///   ┌──────────────────────────┐
///   │  projector                │  Vorname_Name, Adresse, PLZ, Ortsname
///   └──────────────────────────┘
///              │
///              ▼
///   ┌──────────────────────────┐
///   │  writer                   │  RecordSet → delimited text
///   └──────────────────────────┘
/// ```
///
/// `pipeline` chains `filter` and `projector`.

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod projector;
pub mod writer;
