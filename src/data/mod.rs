/// Data layer: core types, loading, and the drill-down pipeline.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable (dates, "Unknown" fill)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable  │  immutable Vec<LaunchRecord>, shared via Arc
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  country → year → status → record cards
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
