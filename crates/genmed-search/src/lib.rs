//! GenMed Search Library
//!
//! Async orchestration over the pure matching core: a debounced,
//! paginated catalog browser, a free-text search session, and the
//! translation toggles that ride along with a result set.
//!
//! # Architecture
//!
//! ```text
//!         user input                    upstream (CatalogSource)
//!             │                                  ▲
//!             ▼                                  │
//!   CatalogQueryController ──── query_catalog ───┤
//!   (debounce, pages, filters,                   │
//!    generation discard)                         │
//!                                                │
//!   SearchSession ───────────── search/subs ─────┤
//!     │    └── SubstituteMatcher (genmed-core)   │
//!     ▼                                          │
//!   TranslationCache ────────── translate ───────┘
//!   (per-result toggles, cleared per result set)
//! ```
//!
//! Everything here is tokio-flavored but runtime-light: plain mutexes
//! never held across an await, atomics for generation counting, and a
//! [`mock::StaticCatalogSource`] for tests that never touch a network.
//!
//! # Modules
//!
//! - [`source`]: the [`CatalogSource`] trait and [`SourceError`]
//! - [`controller`]: debounced paginated catalog browsing
//! - [`search`]: free-text session with substitute ranking
//! - [`translation`]: per-result translation toggles
//! - [`mock`]: deterministic in-memory source for tests

pub mod controller;
pub mod mock;
pub mod search;
pub mod source;
pub mod translation;

// Re-export commonly used types
pub use controller::{
    CatalogQueryController, ControllerConfig, ControllerSnapshot, Phase,
};
pub use mock::StaticCatalogSource;
pub use search::SearchSession;
pub use source::{CatalogSource, SourceError, SourceResult};
pub use translation::TranslationCache;
