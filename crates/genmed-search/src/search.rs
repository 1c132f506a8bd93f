//! Free-text search session.
//!
//! Runs one query at a time against the catalog/AI collaborator,
//! partitions the response into exact and AI-generated groups, and
//! owns the translation toggles for the current result set.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use genmed_core::models::{CatalogItem, SubstituteResult};
use genmed_core::{merge, MergedResults, SubstituteMatcher};

use crate::source::{CatalogSource, SourceResult};
use crate::translation::TranslationCache;

#[derive(Default)]
struct SessionState {
    query: String,
    results: MergedResults,
}

/// One user-facing search surface: free-text lookup, substitute
/// ranking for a chosen result, and per-result translation.
///
/// Clones share state.
#[derive(Clone)]
pub struct SearchSession {
    source: Arc<dyn CatalogSource>,
    target_language: String,
    translations: TranslationCache,
    state: Arc<Mutex<SessionState>>,
}

impl SearchSession {
    pub fn new(source: Arc<dyn CatalogSource>, target_language: &str) -> Self {
        Self {
            source,
            target_language: target_language.to_string(),
            translations: TranslationCache::new(),
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a free-text query and replace the current result set.
    ///
    /// A blank query resolves to empty results without an upstream
    /// call. On failure the previous results stay in place. Either way
    /// the translation toggles for the old set are gone: a new query
    /// means a new set of result ids.
    pub async fn run(&self, query: &str) -> SourceResult<MergedResults> {
        self.translations.clear();

        let trimmed = query.trim();
        if trimmed.is_empty() {
            let mut st = self.state();
            st.query = String::new();
            st.results = MergedResults::default();
            return Ok(st.results.clone());
        }

        let raw = self.source.query_medicine_search(trimmed).await?;
        let merged = merge(raw);
        debug!(
            query = trimmed,
            exact = merged.exact.len(),
            generated = merged.generated.len(),
            "search resolved"
        );

        let mut st = self.state();
        st.query = trimmed.to_string();
        st.results = merged.clone();
        Ok(merged)
    }

    /// The last successfully resolved result set.
    pub fn results(&self) -> MergedResults {
        self.state().results.clone()
    }

    pub fn query(&self) -> String {
        self.state().query.clone()
    }

    /// Fetch and rank substitutes for one result, cheapest first.
    /// Candidates that do not share the result's salt composition are
    /// dropped even if the upstream returned them.
    pub async fn substitutes_for(
        &self,
        item: &CatalogItem,
    ) -> SourceResult<Vec<SubstituteResult>> {
        let matcher = SubstituteMatcher::for_item(item);
        let candidates = self
            .source
            .query_substitutes(&item.id, &item.salt_composition, matcher.reference_price())
            .await?;
        Ok(matcher.rank(candidates))
    }

    /// Flip one result's explanation between original and translated.
    /// Results without an explanation are left alone.
    pub async fn toggle_translation(&self, item: &CatalogItem) {
        let Some(text) = item.explanation.clone() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let lang = self.target_language.clone();
        self.translations
            .toggle(&item.id, move || async move {
                source.translate(&text, &lang).await
            })
            .await;
    }

    /// The explanation to display for a result, translated if toggled.
    pub fn display_explanation(&self, item: &CatalogItem) -> Option<String> {
        self.translations
            .get(&item.id)
            .or_else(|| item.explanation.clone())
    }

    pub fn is_translated(&self, result_id: &str) -> bool {
        self.translations.is_translated(result_id)
    }
}
