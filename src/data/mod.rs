/// Data layer: core types, loading, cleaning, and statistics.
///
/// Architecture:
/// ```text
///  data/iris.csv (compiled in)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse bundled CSV → ObservationTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  drop rows with missing values
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats   │  column info, describe, GroupedSummary
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
