//! Registry statistics for profiling and tooling.

use serde::Serialize;

use crate::table::SymbolRegistry;

/// Snapshot of the registry's size and traffic
///
/// # Examples
///
/// ```
/// use aterm_afun::SymbolRegistry;
///
/// let mut registry = SymbolRegistry::default();
/// registry.intern("f", 1, false);
/// registry.intern("f", 1, false);
///
/// let stats = registry.stats();
/// assert_eq!(stats.live + stats.free, stats.capacity);
/// assert!(stats.hits >= 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RegistryStats {
    pub table_class: u8,
    pub capacity: usize,
    /// Live symbols
    pub live: usize,
    /// Identities on the free list
    pub free: usize,
    /// Root-stack entries, duplicates included
    pub roots: usize,
    /// Growth events since bootstrap
    pub growths: u32,
    /// Interns answered by an existing symbol
    pub hits: u64,
    /// Interns that created a symbol
    pub misses: u64,
    pub releases: u64,
}

impl RegistryStats {
    /// Live symbols per slot
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.live as f64 / self.capacity as f64
        }
    }

    /// Fraction of interns answered without allocating
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl SymbolRegistry {
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            table_class: self.table_class(),
            capacity: self.capacity(),
            live: self.len(),
            free: self.free_count(),
            roots: self.roots.len(),
            growths: self.counters.growths,
            hits: self.counters.hits,
            misses: self.counters.misses,
            releases: self.counters.releases,
        }
    }
}
