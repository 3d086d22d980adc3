//! Per-gist rotation cache
//!
//! Each gist identifier maps to one cached document plus a cursor naming the
//! file to serve next. A lookup refetches the gist when its entry is missing
//! or older than [`CACHE_TTL_MINS`], then hands out the file under the cursor
//! and advances it, wrapping after the last file.
//!
//! Every identifier has its own async mutex. The freshness check, the refetch,
//! and the cursor step all happen while holding it, so concurrent requests
//! for one gist trigger at most one fetch and never read the same cursor
//! position twice. The map of slots is only locked long enough to find or
//! create a slot; requests for different gists never wait on each other's
//! network calls.

use crate::clock::{Clock, SystemClock};
use crate::fetcher::DocumentFetcher;
use crate::types::CacheStats;
use chrono::{DateTime, Duration, Utc};
use gist_api::{Gist, GistError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

/// Age after which a cached gist is refetched
pub const CACHE_TTL_MINS: i64 = 120;

/// File type every file in a gist must carry to be rotated
pub const DEFAULT_EXPECTED_TYPE: &str = "application/json";

/// Outcome of one rotation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rotation {
    /// Raw content of the file that was under the cursor
    Content(String),
    /// The gist has no files
    EmptyDocument,
    /// At least one file does not carry the expected type
    NonUniformTypes,
}

/// Copy of a cache entry, detached from the cache
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub gist: Arc<Gist>,
    pub fetched_at: DateTime<Utc>,
    pub cursor: usize,
}

struct CacheEntry {
    gist: Arc<Gist>,
    fetched_at: DateTime<Utc>,
    cursor: usize,
}

impl CacheEntry {
    fn new(gist: Arc<Gist>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            gist,
            fetched_at,
            cursor: 0,
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at <= ttl
    }

    /// Serve the file under the cursor and advance it.
    ///
    /// The cursor is left alone for empty and mixed-type gists.
    fn rotate(&mut self, expected_type: &str) -> Rotation {
        let count = self.gist.files.len();
        if count == 0 {
            return Rotation::EmptyDocument;
        }

        if self
            .gist
            .files_in_order()
            .any(|file| file.file_type != expected_type)
        {
            return Rotation::NonUniformTypes;
        }

        let content = self
            .gist
            .files_in_order()
            .nth(self.cursor)
            .map(|file| file.content.clone())
            .unwrap_or_default();
        self.cursor = (self.cursor + 1) % count;

        Rotation::Content(content)
    }

    fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            gist: Arc::clone(&self.gist),
            fetched_at: self.fetched_at,
            cursor: self.cursor,
        }
    }
}

type Slot = Arc<Mutex<Option<CacheEntry>>>;

/// Process-wide cache of gists and their rotation cursors
pub struct RotationCache {
    slots: RwLock<HashMap<String, Slot>>,
    fetcher: Arc<dyn DocumentFetcher>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    expected_type: String,
    /// Number of slots currently holding an entry
    entries: AtomicUsize,
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
    fetch_failures: AtomicU64,
}

impl RotationCache {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            fetcher,
            clock: Arc::new(SystemClock),
            ttl: Duration::minutes(CACHE_TTL_MINS),
            expected_type: DEFAULT_EXPECTED_TYPE.to_string(),
            entries: AtomicUsize::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_expected_type(mut self, expected_type: impl Into<String>) -> Self {
        self.expected_type = expected_type.into();
        self
    }

    pub fn expected_type(&self) -> &str {
        &self.expected_type
    }

    /// Serve the next file of a gist, fetching it first if needed.
    ///
    /// A failed fetch is returned as-is and leaves whatever was cached for
    /// `id` untouched.
    pub async fn next(&self, id: &str) -> Result<Rotation, GistError> {
        let slot = self.slot(id).await;
        let mut guard = slot.lock().await;
        let now = self.clock.now();

        let entry = match guard.take() {
            Some(entry) if entry.is_fresh(now, self.ttl) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(gist_id = %id, cursor = entry.cursor, "Cache hit");
                entry
            }
            previous => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                let stale = previous.is_some();
                if stale {
                    self.refreshes.fetch_add(1, Ordering::Relaxed);
                }
                info!(gist_id = %id, stale, "Fetching gist");

                match self.fetcher.fetch(id).await {
                    Ok(gist) => {
                        if !stale {
                            self.entries.fetch_add(1, Ordering::Relaxed);
                        }
                        CacheEntry::new(Arc::new(gist), now)
                    }
                    Err(e) => {
                        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
                        error!(gist_id = %id, error = %e, "Failed to fetch gist");
                        *guard = previous;
                        if !stale {
                            drop(guard);
                            self.prune(id, slot).await;
                        }
                        return Err(e);
                    }
                }
            }
        };

        let entry = guard.insert(entry);
        Ok(entry.rotate(&self.expected_type))
    }

    /// Inspect the cached entry for a gist without touching its cursor
    pub async fn lookup(&self, id: &str) -> Option<CacheSnapshot> {
        let slot = self.slots.read().await.get(id).cloned()?;
        let guard = slot.lock().await;
        guard.as_ref().map(CacheEntry::snapshot)
    }

    /// Install a gist as a freshly fetched entry with its cursor at the start
    pub async fn insert(&self, id: &str, gist: Gist) {
        let slot = self.slot(id).await;
        let mut guard = slot.lock().await;
        let entry = CacheEntry::new(Arc::new(gist), self.clock.now());
        if guard.replace(entry).is_none() {
            self.entries.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Drop the cached entry for a gist. Returns whether one existed.
    pub async fn evict(&self, id: &str) -> bool {
        let Some(slot) = self.slots.read().await.get(id).cloned() else {
            return false;
        };

        let removed = slot.lock().await.take().is_some();
        if removed {
            self.entries.fetch_sub(1, Ordering::Relaxed);
            debug!(gist_id = %id, "Evicted cache entry");
        }
        self.prune(id, slot).await;
        removed
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
        }
    }

    /// Find or create the lock slot for a gist
    async fn slot(&self, id: &str) -> Slot {
        if let Some(slot) = self.slots.read().await.get(id) {
            return Arc::clone(slot);
        }

        let mut slots = self.slots.write().await;
        Arc::clone(slots.entry(id.to_string()).or_default())
    }

    /// Drop an empty slot from the map once no other request holds it.
    ///
    /// Takes the caller's handle. New handles are only cloned under the map
    /// lock, so a strong count of two (map + caller) seen under the write lock
    /// means nobody else is waiting on the slot. The caller's handle is
    /// released before the map lock so a later pruner sees an exact count.
    async fn prune(&self, id: &str, slot: Slot) {
        let mut slots = self.slots.write().await;
        let removable = slots
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, &slot))
            && Arc::strong_count(&slot) == 2
            && slot.try_lock().map(|entry| entry.is_none()).unwrap_or(false);

        drop(slot);
        if removable {
            slots.remove(id);
        }
    }

    #[cfg(test)]
    async fn slot_count(&self) -> usize {
        self.slots.read().await.len()
    }
}
