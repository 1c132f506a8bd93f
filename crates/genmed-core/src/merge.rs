//! Partitioning of mixed search results by provenance.

use serde::{Deserialize, Serialize};

use crate::models::CatalogItem;

/// A free-text search result set split by provenance.
///
/// Order within each partition is preserved from the upstream source,
/// which is responsible for ranking. Both partitions empty is the
/// terminal "not found" state, distinct from an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MergedResults {
    /// Catalog-backed matches
    pub exact: Vec<CatalogItem>,
    /// Results produced by the generative collaborator
    pub generated: Vec<CatalogItem>,
}

impl MergedResults {
    /// True when neither partition holds anything.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.generated.is_empty()
    }

    /// Total result count across both partitions.
    pub fn len(&self) -> usize {
        self.exact.len() + self.generated.len()
    }
}

/// Partition raw upstream results strictly by the `is_ai_generated`
/// flag, preserving source order within each partition.
pub fn merge(raw: Vec<CatalogItem>) -> MergedResults {
    let (generated, exact) = raw.into_iter().partition(|item| item.is_ai_generated);
    MergedResults { exact, generated }
}
