//! Substitute ranking result types.

use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// One ranked substitute, derived fresh on every matcher invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubstituteResult {
    /// The candidate item
    pub item: CatalogItem,
    /// Candidate price after normalization
    pub normalized_price: f64,
    /// Rounded percent saved versus the reference price, clamped to 0
    /// for candidates that are not cheaper
    pub savings_percent: u32,
    /// True only for the first (cheapest) result
    pub is_best: bool,
}

impl SubstituteResult {
    /// Absolute amount saved versus the given reference price, or 0.0
    /// when the candidate is not cheaper.
    pub fn savings_amount(&self, reference_price: f64) -> f64 {
        (reference_price - self.normalized_price).max(0.0)
    }
}
