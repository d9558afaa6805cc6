//! Mark-phase integration with the term collector.
//!
//! The registry never decides when to collect. A collector drives a cycle
//! through these hooks:
//!
//! 1. [`SymbolRegistry::unmark_all`] before a full mark
//! 2. [`SymbolRegistry::mark_all_protected`] (or the `_young` variant on a
//!    partial pass) plus [`SymbolRegistry::mark`] for every symbol it finds
//!    referenced from a live term
//! 3. [`SymbolRegistry::release`] for each unreachable symbol, or
//!    [`SymbolRegistry::sweep`] when the registry's own mark bits are the
//!    whole story
//!
//! Which mark variant a pass uses is the collector's policy; both are kept.

use serde::Serialize;

use crate::entry::Slot;
use crate::index_vec::IndexVec;
use crate::symbol::SymbolId;
use crate::table::SymbolRegistry;

/// Result of a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    /// Symbols released
    pub released: usize,
    /// Symbols that stayed live
    pub survivors: usize,
}

impl SymbolRegistry {
    /// Mark one symbol
    ///
    /// Identities that do not name a live symbol are ignored, so a
    /// conservative scanner may pass any candidate value.
    pub fn mark(&mut self, id: SymbolId) {
        mark_slot(&mut self.entries, id, false);
    }

    /// Mark one symbol unless it is already in the old generation
    pub fn mark_young(&mut self, id: SymbolId) {
        mark_slot(&mut self.entries, id, true);
    }

    /// Clear every mark bit
    pub fn unmark_all(&mut self) {
        for record in self.entries.iter_mut().filter_map(Slot::record_mut) {
            record.marked = false;
        }
    }

    /// True if `id` is live and marked
    pub fn is_marked(&self, id: SymbolId) -> bool {
        self.get(id).is_some_and(|record| record.is_marked())
    }

    /// Move a symbol to the old generation
    pub fn promote(&mut self, id: SymbolId) {
        if let Some(record) = self.entries.get_mut(id).and_then(Slot::record_mut) {
            record.old = true;
        }
    }

    /// Mark every rooted symbol and the parked symbol
    ///
    /// Idempotent: a second call changes nothing.
    pub fn mark_all_protected(&mut self) {
        for id in self.roots.iter() {
            mark_slot(&mut self.entries, id, false);
        }

        if let Some(id) = self.parked {
            self.mark(id);
        }
    }

    /// Mark every rooted young symbol and the parked symbol
    ///
    /// Old-generation roots are skipped; a partial collection does not
    /// reclaim them anyway.
    pub fn mark_all_protected_young(&mut self) {
        for id in self.roots.iter() {
            mark_slot(&mut self.entries, id, true);
        }

        if let Some(id) = self.parked {
            self.mark_young(id);
        }
    }

    /// Keep `id` alive across the next mark phase
    ///
    /// Used for the head symbol of a term under construction, which no live
    /// term references yet. Parking replaces the previously parked symbol.
    pub fn park(&mut self, id: SymbolId) {
        self.parked = Some(id);
    }

    /// Forget the parked symbol
    pub fn unpark(&mut self) -> Option<SymbolId> {
        self.parked.take()
    }

    pub fn parked(&self) -> Option<SymbolId> {
        self.parked
    }

    /// Release every unmarked, unrooted symbol
    ///
    /// Survivors lose their mark bit and are promoted to the old
    /// generation.
    pub fn sweep(&mut self) -> SweepStats {
        self.sweep_where(|_| true)
    }

    /// Release every unmarked, unrooted young symbol
    ///
    /// Old symbols are left alone whatever their mark.
    pub fn sweep_young(&mut self) -> SweepStats {
        self.sweep_where(|old| !old)
    }

    fn sweep_where(&mut self, eligible: impl Fn(bool) -> bool) -> SweepStats {
        let mut stats = SweepStats::default();
        let mut dead = Vec::new();

        let mut rooted = vec![false; self.capacity()];
        for id in self.roots.iter() {
            if let Some(flag) = rooted.get_mut(id.as_usize()) {
                *flag = true;
            }
        }

        for (id, slot) in self.entries.iter_enumerated_mut() {
            let Slot::Occupied(record) = slot else {
                continue;
            };
            if !eligible(record.old) {
                record.marked = false;
                stats.survivors += 1;
            } else if record.marked || rooted[id.as_usize()] {
                record.marked = false;
                record.old = true;
                stats.survivors += 1;
            } else {
                dead.push(id);
            }
        }

        for id in dead {
            self.release_unrooted(id);
            stats.released += 1;
        }

        log::debug!(
            "swept symbol table: {} released, {} survivors",
            stats.released,
            stats.survivors
        );
        stats
    }
}

fn mark_slot(entries: &mut IndexVec<SymbolId, Slot>, id: SymbolId, young_only: bool) {
    if let Some(record) = entries.get_mut(id).and_then(Slot::record_mut) {
        if !(young_only && record.old) {
            record.marked = true;
        }
    }
}
