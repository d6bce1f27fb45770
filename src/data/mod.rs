/// Data layer: core types, loading, and the filter-aggregate pipeline.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ArticleDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ArticleDataset │  Vec<Article>, date bounds
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range → indices, term → (matching, non_matching)
///   └──────────┘
///        │                    │
///        ▼                    ▼
///   ┌───────────┐        ┌──────────┐
///   │ aggregate  │        │   rank    │
///   └───────────┘        └──────────┘
///   daily %, means        top-N by reaction
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod rank;
