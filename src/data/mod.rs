/// Data layer: core types, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///  datasetspotify.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset (pop genres only)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache   │  DatasetHandle: load once, read many
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  popularity / genre predicates → Vec<&Track>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  group-by means, histogram, box summaries, metrics
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
