//! Catalog query controller.
//!
//! State machine over `{ filters, cursor, items }`:
//! Idle -> Debouncing (free-text keystroke) -> Fetching -> Idle.
//!
//! Every fetch carries a monotonically increasing generation; a
//! response is applied only if its generation is still the latest
//! issued one. A slow early response can therefore never overwrite a
//! fast later one. Cancellation is discard-on-arrival: in-flight
//! requests are not aborted, their results are ignored when stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, warn};

use genmed_core::models::{
    CatalogItem, FilterOptions, PaginationCursor, SearchFilterState, SortKey,
};

use crate::source::{CatalogSource, SourceResult};

/// Debounce window for free-text input.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Items requested per page.
const PAGE_SIZE: usize = 30;

/// Controller tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    pub page_size: usize,
    pub debounce: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            debounce: DEBOUNCE_WINDOW,
        }
    }
}

/// Where the controller currently is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No fetch pending or in flight
    Idle,
    /// A free-text keystroke is waiting out the debounce window
    Debouncing,
    /// A request is in flight
    Fetching,
}

/// Point-in-time view of the controller for display code.
#[derive(Debug, Clone)]
pub struct ControllerSnapshot {
    pub items: Vec<CatalogItem>,
    pub filters: SearchFilterState,
    pub cursor: PaginationCursor,
    pub phase: Phase,
    pub error: Option<String>,
}

struct ControllerState {
    filters: SearchFilterState,
    cursor: PaginationCursor,
    items: Vec<CatalogItem>,
    phase: Phase,
    error: Option<String>,
    /// Bumped on every keystroke; a debounce sleep only fires a fetch
    /// if its epoch is still current when it wakes.
    debounce_epoch: u64,
    filter_options: Option<FilterOptions>,
}

/// Debounced, paginated, filter-aware view over the catalog source.
///
/// Cheap to clone; clones share state. All mutation happens inside the
/// single apply-latest-generation transition, so there is exactly one
/// writer at a time and the state mutex is never held across an await.
#[derive(Clone)]
pub struct CatalogQueryController {
    source: Arc<dyn CatalogSource>,
    state: Arc<Mutex<ControllerState>>,
    generation: Arc<AtomicU64>,
    config: ControllerConfig,
}

impl CatalogQueryController {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_config(source, ControllerConfig::default())
    }

    pub fn with_config(source: Arc<dyn CatalogSource>, config: ControllerConfig) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(ControllerState {
                filters: SearchFilterState::default(),
                cursor: PaginationCursor::new(config.page_size),
                items: Vec::new(),
                phase: Phase::Idle,
                error: None,
                debounce_epoch: 0,
                filter_options: None,
            })),
            generation: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current state for display. Clones; the controller keeps going.
    pub fn snapshot(&self) -> ControllerSnapshot {
        let st = self.state();
        ControllerSnapshot {
            items: st.items.clone(),
            filters: st.filters.clone(),
            cursor: st.cursor,
            phase: st.phase,
            error: st.error.clone(),
        }
    }

    /// Record a free-text keystroke and wait out the debounce window.
    ///
    /// Callers spawn one call per keystroke; each new keystroke bumps
    /// the epoch, so only the call that is still current when its sleep
    /// elapses issues a fetch, so a burst of input coalesces into one
    /// request carrying the last-set value.
    pub async fn set_search_text(&self, text: &str) {
        let epoch = {
            let mut st = self.state();
            st.filters.search_text = text.to_string();
            st.debounce_epoch += 1;
            st.phase = Phase::Debouncing;
            st.debounce_epoch
        };

        tokio::time::sleep(self.config.debounce).await;

        {
            let st = self.state();
            if st.debounce_epoch != epoch {
                // Superseded by a newer keystroke; that call owns the fetch.
                return;
            }
        }

        self.refresh().await;
    }

    /// Select a manufacturer (None = all) and refetch immediately.
    pub async fn set_manufacturer(&self, manufacturer: Option<&str>) {
        self.state().filters.manufacturer = manufacturer.map(str::to_string);
        self.refresh().await;
    }

    /// Select a dosage form (None = all) and refetch immediately.
    pub async fn set_dosage_form(&self, dosage_form: Option<&str>) {
        self.state().filters.dosage_form = dosage_form.map(str::to_string);
        self.refresh().await;
    }

    /// Toggle the has-image restriction and refetch immediately.
    pub async fn set_has_image_only(&self, has_image_only: bool) {
        self.state().filters.has_image_only = has_image_only;
        self.refresh().await;
    }

    /// Change sort order and refetch immediately.
    pub async fn set_sort(&self, sort: SortKey) {
        self.state().filters.sort = sort;
        self.refresh().await;
    }

    /// Restore default filters and refetch page zero.
    pub async fn reset_filters(&self) {
        {
            let mut st = self.state();
            st.filters.reset();
            // Kill any pending debounce; its text no longer exists.
            st.debounce_epoch += 1;
        }
        self.refresh().await;
    }

    /// Reset pagination and fetch page zero for the current filters.
    /// The item list is replaced, not appended, once the page resolves.
    pub async fn refresh(&self) {
        let filters = {
            let mut st = self.state();
            st.cursor.reset();
            st.phase = Phase::Fetching;
            st.filters.clone()
        };

        let generation = self.next_generation();
        debug!(generation, page = 0, "issuing catalog refresh");
        let result = self
            .source
            .query_catalog(0, self.config.page_size, &filters)
            .await;
        self.apply(generation, 0, result, true);
    }

    /// Fetch the next page and append it. A no-op once a short page has
    /// latched `has_more` off. On failure the cursor does not advance,
    /// so a retry re-requests the same page.
    pub async fn load_more(&self) {
        let (page, filters) = {
            let mut st = self.state();
            if !st.cursor.has_more || st.phase == Phase::Fetching {
                return;
            }
            st.phase = Phase::Fetching;
            (st.cursor.page + 1, st.filters.clone())
        };

        let generation = self.next_generation();
        debug!(generation, page, "issuing catalog load-more");
        let result = self
            .source
            .query_catalog(page * self.config.page_size, self.config.page_size, &filters)
            .await;
        self.apply(generation, page, result, false);
    }

    /// Selectable manufacturer/dosage-form values, fetched once and
    /// memoized for the controller's lifetime.
    pub async fn filter_options(&self) -> SourceResult<FilterOptions> {
        if let Some(options) = self.state().filter_options.clone() {
            return Ok(options);
        }
        let options = self.source.query_filter_options().await?;
        self.state().filter_options = Some(options.clone());
        Ok(options)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The single state-mutating transition. Applies a settled fetch
    /// only if its generation is still the latest issued one.
    fn apply(
        &self,
        generation: u64,
        page: usize,
        result: SourceResult<Vec<CatalogItem>>,
        replace: bool,
    ) {
        let latest = self.generation.load(Ordering::SeqCst);
        let mut st = self.state();

        if generation != latest {
            warn!(generation, latest, "discarding stale catalog response");
            return;
        }

        match result {
            Ok(fetched) => {
                st.cursor.page = page;
                st.cursor.record_page(fetched.len());
                if replace {
                    st.items = fetched;
                } else {
                    st.items.extend(fetched);
                }
                st.error = None;
                st.phase = Phase::Idle;
                debug!(generation, page, total = st.items.len(), "applied catalog page");
            }
            Err(e) => {
                // Items and cursor untouched; the caller may retry.
                warn!(generation, page, error = %e, "catalog fetch failed");
                st.error = Some(e.to_string());
                st.phase = Phase::Idle;
            }
        }
    }
}
