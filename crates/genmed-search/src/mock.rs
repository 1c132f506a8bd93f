//! Deterministic in-memory collaborator for testing without a live
//! catalog backend.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use genmed_core::models::{CatalogItem, FilterOptions, SearchFilterState, SortKey};
use genmed_core::{normalize_price, same_composition};

use crate::source::{CatalogSource, SourceError, SourceResult};

/// One recorded catalog page request.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCall {
    pub offset: usize,
    pub limit: usize,
    pub filters: SearchFilterState,
}

#[derive(Default)]
struct Inner {
    items: Vec<CatalogItem>,
    filter_options: FilterOptions,
    translations: HashMap<String, String>,
    /// Per-catalog-call latency, popped front first; empty = no delay.
    latency_plan: VecDeque<Duration>,
    /// Fail this many upcoming catalog calls with a transport error.
    fail_catalog_calls: usize,
    fail_translate: bool,
    catalog_calls: Vec<CatalogCall>,
    search_calls: Vec<String>,
    translate_calls: Vec<String>,
    filter_option_calls: usize,
}

/// In-memory [`CatalogSource`] with configurable latency and failure
/// injection, plus call recording for assertions.
#[derive(Clone, Default)]
pub struct StaticCatalogSource {
    inner: Arc<Mutex<Inner>>,
}

impl StaticCatalogSource {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let source = Self::default();
        source.lock().items = items;
        source
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_filter_options(&self, options: FilterOptions) {
        self.lock().filter_options = options;
    }

    /// Queue a latency for the next catalog call (FIFO).
    pub fn push_latency(&self, latency: Duration) {
        self.lock().latency_plan.push_back(latency);
    }

    /// Make the next `n` catalog calls fail with a transport error.
    pub fn fail_next_catalog_calls(&self, n: usize) {
        self.lock().fail_catalog_calls = n;
    }

    pub fn set_fail_translate(&self, fail: bool) {
        self.lock().fail_translate = fail;
    }

    /// Register a fixed translation; unregistered text translates to
    /// `"[{language}] {text}"`.
    pub fn set_translation(&self, text: &str, translated: &str) {
        self.lock()
            .translations
            .insert(text.to_string(), translated.to_string());
    }

    pub fn catalog_calls(&self) -> Vec<CatalogCall> {
        self.lock().catalog_calls.clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.lock().search_calls.clone()
    }

    pub fn translate_calls(&self) -> Vec<String> {
        self.lock().translate_calls.clone()
    }

    pub fn filter_option_calls(&self) -> usize {
        self.lock().filter_option_calls
    }

    fn matching_items(items: &[CatalogItem], filters: &SearchFilterState) -> Vec<CatalogItem> {
        let needle = filters.search_text.to_lowercase();
        let mut matched: Vec<CatalogItem> = items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || item.brand_name.to_lowercase().contains(&needle)
                    || item.salt_composition.to_lowercase().contains(&needle)
            })
            .filter(|item| {
                filters
                    .manufacturer
                    .as_ref()
                    .map_or(true, |m| &item.manufacturer == m)
            })
            .filter(|item| {
                filters
                    .dosage_form
                    .as_ref()
                    .map_or(true, |d| &item.dosage_form == d)
            })
            .filter(|item| !filters.has_image_only || item.has_image())
            .cloned()
            .collect();

        match filters.sort {
            SortKey::PriceAsc => matched.sort_by(|a, b| {
                normalize_price(a.price.as_ref()).total_cmp(&normalize_price(b.price.as_ref()))
            }),
            SortKey::PriceDesc => matched.sort_by(|a, b| {
                normalize_price(b.price.as_ref()).total_cmp(&normalize_price(a.price.as_ref()))
            }),
            SortKey::Name => matched.sort_by(|a, b| a.brand_name.cmp(&b.brand_name)),
            // Insertion order stands in for the remaining server-side orders.
            _ => {}
        }

        matched
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn query_catalog(
        &self,
        offset: usize,
        limit: usize,
        filters: &SearchFilterState,
    ) -> SourceResult<Vec<CatalogItem>> {
        let (latency, fail, page) = {
            let mut inner = self.lock();
            inner.catalog_calls.push(CatalogCall {
                offset,
                limit,
                filters: filters.clone(),
            });

            let latency = inner.latency_plan.pop_front().unwrap_or_default();
            let fail = if inner.fail_catalog_calls > 0 {
                inner.fail_catalog_calls -= 1;
                true
            } else {
                false
            };

            let matched = Self::matching_items(&inner.items, filters);
            let page: Vec<CatalogItem> =
                matched.into_iter().skip(offset).take(limit).collect();
            (latency, fail, page)
        };

        tokio::time::sleep(latency).await;

        if fail {
            return Err(SourceError::Transport("injected failure".into()));
        }
        Ok(page)
    }

    async fn query_substitutes(
        &self,
        medicine_id: &str,
        salt_composition: &str,
        _current_price: f64,
    ) -> SourceResult<Vec<CatalogItem>> {
        let inner = self.lock();
        Ok(inner
            .items
            .iter()
            .filter(|item| item.id != medicine_id)
            .filter(|item| same_composition(&item.salt_composition, salt_composition))
            .cloned()
            .collect())
    }

    async fn query_medicine_search(&self, free_text: &str) -> SourceResult<Vec<CatalogItem>> {
        let mut inner = self.lock();
        inner.search_calls.push(free_text.to_string());

        let needle = free_text.to_lowercase();
        Ok(inner
            .items
            .iter()
            .filter(|item| {
                item.brand_name.to_lowercase().contains(&needle)
                    || item.salt_composition.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn translate(&self, text: &str, target_language: &str) -> SourceResult<String> {
        let mut inner = self.lock();
        inner.translate_calls.push(text.to_string());

        if inner.fail_translate {
            return Err(SourceError::Status(503));
        }
        Ok(inner
            .translations
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[{target_language}] {text}")))
    }

    async fn query_filter_options(&self) -> SourceResult<FilterOptions> {
        let mut inner = self.lock();
        inner.filter_option_calls += 1;
        Ok(inner.filter_options.clone())
    }
}
