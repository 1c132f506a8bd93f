//! Domain types shared across the engine.

mod filters;
mod medicine;
mod substitute;

pub use filters::{FilterOptions, PaginationCursor, SearchFilterState, SortKey};
pub use medicine::{CatalogItem, RawPrice};
pub use substitute::SubstituteResult;
