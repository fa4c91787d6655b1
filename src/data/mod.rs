/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///   datos.csv (HTTP, once at startup)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  header check + serde rows → WageDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ WageDataset │  Vec<WageRecord>, distinct careers / years / states
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  career / year / state predicates → row views
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
