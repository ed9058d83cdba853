/// Data layer: schema, loading, reshaping, and filtering.
///
/// Architecture:
/// ```text
///  results_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  explicit schema → WideTable   (memoized by cache)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  melt wide → LongTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply sidebar predicates → filtered LongTable
///   └──────────┘
/// ```
///
/// Every stage is pure: the loaded table is immutable, the long table is
/// derived once, and filtering only changes row membership.

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;
pub mod schema;
