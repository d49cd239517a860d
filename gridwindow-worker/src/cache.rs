use std::num::NonZeroUsize;

use lru::LruCache;

use gridwindow::{
    BufferMeta, Flow, InternalItem, ResizeMeasurement, SpaceAroundWindow, Viewport,
};

/// Bit pattern of a float with `-0.0` folded into `0.0`.
///
/// Only validated (finite) inputs reach the cache, so NaN payloads never appear in keys.
fn norm(x: f64) -> u64 {
    if x == 0.0 { 0u64 } else { x.to_bits() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct MeasurementKey {
    row_gap: u64,
    col_gap: u64,
    flow: Flow,
    columns: usize,
    rows: usize,
    item_width_with_gap: u64,
    item_height_with_gap: u64,
}

impl From<&ResizeMeasurement> for MeasurementKey {
    fn from(m: &ResizeMeasurement) -> Self {
        Self {
            row_gap: norm(m.grid.row_gap),
            col_gap: norm(m.grid.col_gap),
            flow: m.grid.flow,
            columns: m.grid.columns,
            rows: m.grid.rows,
            item_width_with_gap: norm(m.item_width_with_gap),
            item_height_with_gap: norm(m.item_height_with_gap),
        }
    }
}

/// A normalized parameter tuple identifying one computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum CacheKey {
    Buffer {
        space: [u64; 2],
        measurement: MeasurementKey,
        multiplier: u64,
        viewport: [u64; 2],
    },
    Items {
        buffer: BufferMeta,
        measurement: MeasurementKey,
        collection_length: usize,
    },
}

#[derive(Clone, Debug)]
enum CachedResult {
    Buffer(BufferMeta),
    Items(Vec<InternalItem>),
}

/// Hit/miss/eviction counters of a [`ResultCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// A bounded LRU cache of computed buffer windows and resolved item lists.
///
/// Owned by whichever side executes requests. A capacity of 0 disables caching: every lookup
/// computes and nothing is stored.
#[derive(Debug)]
pub struct ResultCache {
    entries: Option<LruCache<CacheKey, CachedResult>>,
    stats: CacheStats,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(LruCache::new),
            stats: CacheStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.as_ref().map_or(0, |c| c.cap().get())
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counters accumulate over the cache's lifetime, across [`ResultCache::clear`].
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every entry. Dropped entries are not counted as evictions.
    pub fn clear(&mut self) {
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
    }

    fn lookup(&mut self, key: &CacheKey) -> Option<&CachedResult> {
        let found = self.entries.as_mut().and_then(|entries| entries.get(key));
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    fn store(&mut self, key: CacheKey, value: CachedResult) {
        let Some(entries) = self.entries.as_mut() else {
            return;
        };
        if let Some((displaced, _)) = entries.push(key, value) {
            if displaced != key {
                self.stats.evictions += 1;
                vtrace!(evictions = self.stats.evictions, "result cache eviction");
            }
        }
    }

    /// Returns the cached buffer window, computing and storing it on a miss.
    pub fn buffer_meta_or_insert_with(
        &mut self,
        space: SpaceAroundWindow,
        measurement: &ResizeMeasurement,
        multiplier: f64,
        viewport: Viewport,
        compute: impl FnOnce() -> BufferMeta,
    ) -> BufferMeta {
        let key = CacheKey::Buffer {
            space: [norm(space.left), norm(space.top)],
            measurement: measurement.into(),
            multiplier: norm(multiplier),
            viewport: [norm(viewport.width), norm(viewport.height)],
        };
        if let Some(CachedResult::Buffer(meta)) = self.lookup(&key) {
            return *meta;
        }
        let meta = compute();
        self.store(key, CachedResult::Buffer(meta));
        meta
    }

    /// Returns a copy of the cached item list, computing and storing it on a miss.
    pub fn items_or_insert_with(
        &mut self,
        buffer: BufferMeta,
        measurement: &ResizeMeasurement,
        collection_length: usize,
        compute: impl FnOnce() -> Vec<InternalItem>,
    ) -> Vec<InternalItem> {
        let key = CacheKey::Items {
            buffer,
            measurement: measurement.into(),
            collection_length,
        };
        if let Some(CachedResult::Items(items)) = self.lookup(&key) {
            return items.clone();
        }
        let items = compute();
        if self.entries.is_some() {
            self.store(key, CachedResult::Items(items.clone()));
        }
        items
    }
}
