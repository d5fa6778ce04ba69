//! Keyed store of derived format sets.
//!
//! Each key maps to a once-cell. A miss inserts the cell under a short write
//! lock and builds the set outside the map lock, so loads of different keys
//! run side by side while requesters of the same key wait on one build.
//! Entries are never evicted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use chrono_tz::Tz;
use metrics::{counter, gauge, histogram};
use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, info};

use crate::domain::format_set::FormatSet;
use crate::domain::locale::Locale;

use super::keys::FormatSetKey;
use super::lock::{rw_read, rw_write};

pub(crate) const METRIC_CACHE_HIT_TOTAL: &str = "formatset_cache_hit_total";
pub(crate) const METRIC_CACHE_MISS_TOTAL: &str = "formatset_cache_miss_total";
pub(crate) const METRIC_CACHE_ENTRIES: &str = "formatset_cache_entries";
pub(crate) const METRIC_CACHE_LOAD_MS: &str = "formatset_cache_load_ms";

type Slot = Arc<OnceCell<Arc<FormatSet>>>;

static STANDARD_CACHE: Lazy<Arc<FormatSetCache>> =
    Lazy::new(|| Arc::new(FormatSetCache::new(FormatSet::standard())));

#[derive(Debug)]
pub struct FormatSetCache {
    default_set: Arc<FormatSet>,
    default_key: FormatSetKey,
    slots: RwLock<HashMap<FormatSetKey, Slot>>,
    loads: AtomicUsize,
}

impl FormatSetCache {
    /// Cache of sets derived from `default_set`, the template every entry is
    /// re-targeted from.
    pub fn new(default_set: Arc<FormatSet>) -> Self {
        let default_key = FormatSetKey::new(
            Some(default_set.time_zone()),
            Some(default_set.locale().clone()),
        );
        Self {
            default_set,
            default_key,
            slots: RwLock::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// The process-wide cache over [`FormatSet::standard`].
    pub fn standard() -> Arc<FormatSetCache> {
        Arc::clone(&STANDARD_CACHE)
    }

    pub fn default_set(&self) -> &Arc<FormatSet> {
        &self.default_set
    }

    pub fn default_key(&self) -> &FormatSetKey {
        &self.default_key
    }

    /// The set for `key`, built from the template on first request. Never fails.
    pub fn get(&self, key: &FormatSetKey) -> Arc<FormatSet> {
        if let Some(set) = self.cached(key) {
            counter!(METRIC_CACHE_HIT_TOTAL).increment(1);
            return set;
        }
        counter!(METRIC_CACHE_MISS_TOTAL).increment(1);

        let slot = self.slot(key);
        Arc::clone(slot.get_or_init(|| self.load(key)))
    }

    /// Set derived from the template; absent values keep the template's.
    pub fn with_zone_and_locale(
        &self,
        time_zone: Option<Tz>,
        locale: Option<Locale>,
    ) -> Arc<FormatSet> {
        self.get(&self.default_key.with_zone_and_locale(time_zone, locale))
    }

    pub fn with_time_zone(&self, time_zone: Option<Tz>) -> Arc<FormatSet> {
        self.get(&self.default_key.with_time_zone(time_zone))
    }

    pub fn with_locale(&self, locale: Option<Locale>) -> Arc<FormatSet> {
        self.get(&self.default_key.with_locale(locale))
    }

    /// Load every key up front. Returns how many sets were built by this call.
    pub fn warm<'a, I>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a FormatSetKey>,
    {
        let started_at = Instant::now();
        let before = self.loads();
        let mut requested = 0usize;
        for key in keys {
            self.get(key);
            requested += 1;
        }
        let loaded = self.loads() - before;
        info!(
            requested,
            loaded,
            elapsed_ms = started_at.elapsed().as_secs_f64() * 1000.0,
            "Format set cache warmed"
        );
        loaded
    }

    /// Number of keys seen so far, including loads still in progress.
    pub fn len(&self) -> usize {
        rw_read(&self.slots, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of format sets this cache has constructed.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Acquire)
    }

    fn cached(&self, key: &FormatSetKey) -> Option<Arc<FormatSet>> {
        rw_read(&self.slots, "get")
            .get(key)
            .and_then(|slot| slot.get().cloned())
    }

    fn slot(&self, key: &FormatSetKey) -> Slot {
        let mut slots = rw_write(&self.slots, "insert");
        let slot = Arc::clone(slots.entry(key.clone()).or_default());
        gauge!(METRIC_CACHE_ENTRIES).set(slots.len() as f64);
        slot
    }

    fn load(&self, key: &FormatSetKey) -> Arc<FormatSet> {
        let started_at = Instant::now();
        let set = self
            .default_set
            .with_zone_and_locale(Some(key.time_zone()), Some(key.locale().clone()));
        self.loads.fetch_add(1, Ordering::AcqRel);

        let elapsed_ms = started_at.elapsed().as_secs_f64() * 1000.0;
        histogram!(METRIC_CACHE_LOAD_MS).record(elapsed_ms);
        debug!(key = %key, elapsed_ms, "Loaded format set");
        set
    }
}
