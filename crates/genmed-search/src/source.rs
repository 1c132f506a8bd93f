//! The abstract catalog/AI collaborator.
//!
//! Transport, authentication, and persistence live behind this trait;
//! the engine only sees typed results or a [`SourceError`].

use async_trait::async_trait;
use thiserror::Error;

use genmed_core::models::{CatalogItem, FilterOptions, SearchFilterState};

/// Collaborator failures. None of these are fatal: callers surface
/// them as an error flag or empty result and keep their previous state.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Query operations the upstream catalog/AI collaborator provides.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one catalog page for the given filter state.
    async fn query_catalog(
        &self,
        offset: usize,
        limit: usize,
        filters: &SearchFilterState,
    ) -> SourceResult<Vec<CatalogItem>>;

    /// Fetch substitute candidates for a medicine. The result is
    /// pre-filtered by salt composition upstream.
    async fn query_substitutes(
        &self,
        medicine_id: &str,
        salt_composition: &str,
        current_price: f64,
    ) -> SourceResult<Vec<CatalogItem>>;

    /// Free-text medicine search; returns a mix of catalog-backed and
    /// AI-generated items, flagged via `is_ai_generated`.
    async fn query_medicine_search(&self, free_text: &str) -> SourceResult<Vec<CatalogItem>>;

    /// Translate explanation text into the target language.
    async fn translate(&self, text: &str, target_language: &str) -> SourceResult<String>;

    /// List the selectable manufacturer and dosage-form values.
    async fn query_filter_options(&self) -> SourceResult<FilterOptions>;
}
