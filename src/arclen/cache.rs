use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::arclen::table::{ArcLengthTable, DEFAULT_DENSITY};
use crate::foundation::core::Vec3;
use crate::foundation::math::Cubic;

/// Default number of tables kept alive.
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TableKey {
    bits: [u64; 12],
    density: usize,
}

impl TableKey {
    fn new(cubic: &Cubic<Vec3>, density: usize) -> Self {
        let mut bits = [0u64; 12];
        for (i, p) in cubic.iter().enumerate() {
            bits[i * 3] = p.x.to_bits();
            bits[i * 3 + 1] = p.y.to_bits();
            bits[i * 3 + 2] = p.z.to_bits();
        }
        Self { bits, density }
    }
}

/// Bounded least-recently-used store of arc-length tables.
///
/// Owned by the caller and passed by `&mut` into 3D evaluation; identical cubics (bit-for-bit)
/// share one table until evicted.
pub struct ArcLengthCache {
    tables: LruCache<TableKey, Arc<ArcLengthTable>>,
    density: usize,
    hits: u64,
    misses: u64,
}

impl ArcLengthCache {
    /// Create a cache holding up to `capacity` tables built at `density`.
    pub fn new(capacity: usize, density: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            tables: LruCache::new(capacity),
            density: density.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Table for `cubic`, built on first use.
    pub fn table(&mut self, cubic: &Cubic<Vec3>) -> Arc<ArcLengthTable> {
        let key = TableKey::new(cubic, self.density);
        if let Some(t) = self.tables.get(&key) {
            self.hits += 1;
            return Arc::clone(t);
        }
        self.misses += 1;
        let table = Arc::new(ArcLengthTable::new(*cubic, self.density));
        self.tables.put(key, Arc::clone(&table));
        table
    }

    /// Integration density used for new tables.
    pub fn density(&self) -> usize {
        self.density
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the cache holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that built a new table.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for ArcLengthCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_DENSITY)
    }
}

impl std::fmt::Debug for ArcLengthCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcLengthCache")
            .field("len", &self.tables.len())
            .field("cap", &self.tables.cap())
            .field("density", &self.density)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/arclen/cache.rs"]
mod tests;
