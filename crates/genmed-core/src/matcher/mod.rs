//! Substitute matching and ranking.
//!
//! Pipeline: price normalization → exclusion → (optional) salt
//! verification → rank ascending by price → savings computation.

mod price;
mod salt;

pub use price::normalize as normalize_price;
pub use salt::{same_composition, SaltComposition};

use crate::models::{CatalogItem, RawPrice, SubstituteResult};

/// Ranks pharmacologically equivalent alternatives for one reference
/// medicine.
///
/// The candidate set is expected to be pre-filtered by salt composition
/// upstream; [`SubstituteMatcher::strict`] re-verifies that claim
/// client-side since upstream matching quality is unknown.
pub struct SubstituteMatcher {
    reference_salt: SaltComposition,
    reference_price: f64,
    exclude_id: String,
    strict: bool,
}

impl SubstituteMatcher {
    /// Matcher that trusts upstream pre-filtering.
    pub fn new(
        reference_salt: &str,
        current_price: Option<&RawPrice>,
        exclude_id: &str,
    ) -> Self {
        Self {
            reference_salt: SaltComposition::parse(reference_salt),
            reference_price: price::normalize(current_price),
            exclude_id: exclude_id.to_string(),
            strict: false,
        }
    }

    /// Matcher that additionally drops candidates whose composition is
    /// not equivalent to the reference under token-set matching.
    pub fn strict(
        reference_salt: &str,
        current_price: Option<&RawPrice>,
        exclude_id: &str,
    ) -> Self {
        Self {
            strict: true,
            ..Self::new(reference_salt, current_price, exclude_id)
        }
    }

    /// Matcher for substitutes of an existing catalog item.
    pub fn for_item(reference: &CatalogItem) -> Self {
        Self::strict(
            &reference.salt_composition,
            reference.price.as_ref(),
            &reference.id,
        )
    }

    /// The normalized reference price.
    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    /// Rank candidates ascending by normalized price.
    ///
    /// Ties break by manufacturer name (case-insensitive) then id, so
    /// the order is a deterministic total order. The first result is
    /// marked best. An empty candidate set yields an empty list; "no
    /// substitutes found" is not an error.
    pub fn rank(&self, candidates: Vec<CatalogItem>) -> Vec<SubstituteResult> {
        let mut scored: Vec<(CatalogItem, f64)> = candidates
            .into_iter()
            .filter(|c| c.id != self.exclude_id)
            .filter(|c| {
                !self.strict
                    || self
                        .reference_salt
                        .matches(&SaltComposition::parse(&c.salt_composition))
            })
            .map(|c| {
                let normalized = price::normalize(c.price.as_ref());
                (c, normalized)
            })
            .collect();

        scored.sort_by(|(a, price_a), (b, price_b)| {
            price_a
                .total_cmp(price_b)
                .then_with(|| {
                    a.manufacturer
                        .to_lowercase()
                        .cmp(&b.manufacturer.to_lowercase())
                })
                .then_with(|| a.id.cmp(&b.id))
        });

        scored
            .into_iter()
            .enumerate()
            .map(|(idx, (item, normalized_price))| SubstituteResult {
                savings_percent: self.savings_percent(normalized_price),
                is_best: idx == 0,
                normalized_price,
                item,
            })
            .collect()
    }

    /// Absolute and percent savings of the best-ranked substitute, or
    /// None when it would not save anything.
    pub fn best_savings(&self, results: &[SubstituteResult]) -> Option<(f64, u32)> {
        let best = results.first()?;
        if best.savings_percent == 0 {
            return None;
        }
        Some((best.savings_amount(self.reference_price), best.savings_percent))
    }

    /// Rounded percent saved versus the reference, clamped to 0 when
    /// the reference price is 0 or the candidate is not cheaper. A
    /// more expensive substitute shows 0%, never a negative badge.
    fn savings_percent(&self, candidate_price: f64) -> u32 {
        if self.reference_price <= 0.0 || candidate_price >= self.reference_price {
            return 0;
        }
        (((self.reference_price - candidate_price) / self.reference_price) * 100.0).round() as u32
    }
}

/// One-shot ranking that trusts upstream salt pre-filtering.
pub fn find_substitutes(
    reference_salt: &str,
    current_price: Option<&RawPrice>,
    exclude_id: &str,
    candidates: Vec<CatalogItem>,
) -> Vec<SubstituteResult> {
    SubstituteMatcher::new(reference_salt, current_price, exclude_id).rank(candidates)
}

/// One-shot ranking with client-side salt verification.
pub fn find_substitutes_strict(
    reference_salt: &str,
    current_price: Option<&RawPrice>,
    exclude_id: &str,
    candidates: Vec<CatalogItem>,
) -> Vec<SubstituteResult> {
    SubstituteMatcher::strict(reference_salt, current_price, exclude_id).rank(candidates)
}
