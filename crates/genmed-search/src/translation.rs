//! Per-result translation toggles.
//!
//! Each search result can have its explanation shown either in the
//! original language or translated. Toggling a result that already has
//! a cached translation just flips it back without another upstream
//! call. The cache is scoped to one result set: a new set of results
//! clears it, and translations still in flight for the old set are
//! dropped when they arrive.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::source::SourceResult;

#[derive(Default)]
struct Inner {
    /// Result id to translated text, present only while shown translated.
    entries: HashMap<String, String>,
    /// Result ids with a translation request in flight.
    pending: HashSet<String>,
    /// Bumped by `clear`; an in-flight result is only stored if the
    /// epoch it was started under is still current.
    epoch: u64,
}

/// Toggleable translation store keyed by result id.
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct TranslationCache {
    inner: Arc<Mutex<Inner>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The translated text for a result, if it is currently shown
    /// translated.
    pub fn get(&self, result_id: &str) -> Option<String> {
        self.lock().entries.get(result_id).cloned()
    }

    pub fn is_translated(&self, result_id: &str) -> bool {
        self.lock().entries.contains_key(result_id)
    }

    /// Drop all entries. Belongs with every result-set change; ids are
    /// only meaningful within one set.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.pending.clear();
        inner.epoch += 1;
    }

    /// Flip one result between original and translated text.
    ///
    /// Currently translated: the entry is removed, no upstream call.
    /// Currently original: `translate` runs and the entry is stored on
    /// success. A failed translation leaves the result untouched in its
    /// original language. Re-toggling while a request is in flight is a
    /// no-op.
    pub async fn toggle<F, Fut>(&self, result_id: &str, translate: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SourceResult<String>>,
    {
        let epoch = {
            let mut inner = self.lock();
            if inner.entries.remove(result_id).is_some() {
                debug!(result_id, "reverted to original language");
                return;
            }
            if !inner.pending.insert(result_id.to_string()) {
                return;
            }
            inner.epoch
        };

        let result = translate().await;

        let mut inner = self.lock();
        inner.pending.remove(result_id);
        if inner.epoch != epoch {
            // The result set changed underneath; this text belongs to
            // an id from the old set.
            return;
        }
        match result {
            Ok(translated) => {
                inner.entries.insert(result_id.to_string(), translated);
            }
            Err(e) => {
                warn!(result_id, error = %e, "translation failed");
            }
        }
    }
}
