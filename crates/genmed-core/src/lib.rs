//! GenMed Core Library
//!
//! Substitute matching and ranking for a consumer medicine catalog.
//!
//! # Architecture
//!
//! ```text
//! Upstream catalog / AI source (duck-typed JSON)
//!                   │
//!         boundary coercion (models)
//!                   │
//!       ┌───────────┼────────────┐
//!       ▼           ▼            ▼
//!   PriceNorm   SaltMatch    ResultMerger
//!       │           │         (exact vs generated)
//!       └─────┬─────┘
//!             ▼
//!     SubstituteMatcher
//!   (rank by price, savings %)
//! ```
//!
//! This crate is pure and synchronous: no I/O, no async. The query
//! controller, collaborator trait, and translation cache that drive it
//! live in `genmed-search`.
//!
//! # Modules
//!
//! - [`models`]: boundary record types (CatalogItem, filters, cursor)
//! - [`matcher`]: price normalization, salt equivalence, ranking
//! - [`merge`]: exact/AI-generated result partitioning

pub mod matcher;
pub mod merge;
pub mod models;

// Re-export commonly used types
pub use matcher::{
    find_substitutes, find_substitutes_strict, normalize_price, same_composition,
    SaltComposition, SubstituteMatcher,
};
pub use merge::{merge, MergedResults};
pub use models::{
    CatalogItem, FilterOptions, PaginationCursor, RawPrice, SearchFilterState, SortKey,
    SubstituteResult,
};
