//! Symbol Registry - Hash-Consed Function Symbols
//!
//! The registry assigns every distinct `(name, arity, quoted)` triple a
//! small dense [`SymbolId`] and returns the same identity for as long as
//! the symbol is live.
//!
//! # Layout
//!
//! ```text
//! buckets (secondary index)          entries (indexed by SymbolId)
//! ┌────┐                             ┌──────────────────────────┐
//! │ 0  │──► #7 ──► #2 ──► ∅          │ 0: Occupied("<integer>") │
//! │ 1  │──► ∅                        │ 1: Occupied("<real>")    │
//! │ .. │                             │ .. ..                    │
//! │ m  │──► #9 ──► ∅                 │ 8: Free ──► 11           │
//! └────┘                             │ 11: Free ──► ∅           │
//!                                    └──────────────────────────┘
//! ```
//!
//! Bucket chains and the free list are both threaded through the entry
//! store by identity. Buckets are derived data: growth rebuilds them from
//! the live entries without moving any identity.
//!
//! # Invariants
//!
//! 1. At most one live record per triple.
//! 2. Every live record sits in exactly the chain `hash & mask`.
//! 3. Free slots and live slots partition the store; every free slot is on
//!    the free list exactly once.
//! 4. Rooted identities are never released.
//!
//! [`SymbolRegistry::check_invariants`] verifies 1-3.

use std::collections::HashSet;

use crate::builtins;
use crate::config::{capacity_of_class, AfunConfig, MAX_TABLE_CLASS};
use crate::entry::{Slot, SymbolRecord};
use crate::error::{fatal, FatalError};
use crate::hash::{bucket_of, symbol_hash};
use crate::index_vec::{Idx, IndexVec};
use crate::render::{render_into, SymbolDisplay};
use crate::roots::RootStack;
use crate::symbol::{SymbolId, MAX_ARITY};

/// The function-symbol registry
///
/// Owns the entry store, the bucket table and the root stack. Exactly one
/// mutator may use it at a time; share it across threads through
/// [`SharedRegistry`](crate::SharedRegistry).
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    pub(crate) entries: IndexVec<SymbolId, Slot>,
    buckets: Vec<Option<SymbolId>>,
    free_head: Option<SymbolId>,
    class: u8,
    live: usize,
    pub(crate) roots: RootStack,
    pub(crate) parked: Option<SymbolId>,
    pub(crate) counters: Counters,
}

/// Operation counters reported through [`RegistryStats`](crate::RegistryStats)
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) releases: u64,
    pub(crate) growths: u32,
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        let config = AfunConfig::default();
        Self::bootstrapped(&config)
    }
}

impl SymbolRegistry {
    /// Create and bootstrap a registry
    ///
    /// Validates `config`, allocates the table at its class, links the free
    /// list in index order and interns the well-known symbols.
    pub fn new(config: AfunConfig) -> crate::config::Result<Self> {
        config.validate()?;
        Ok(Self::bootstrapped(&config))
    }

    fn bootstrapped(config: &AfunConfig) -> Self {
        let capacity = config.initial_capacity();
        let mut entries = IndexVec::with_capacity(capacity);
        entries.extend(free_run(0, capacity));

        let mut registry = Self {
            entries,
            buckets: vec![None; capacity],
            free_head: Some(SymbolId::from_usize(0)),
            class: config.table_class,
            live: 0,
            roots: RootStack::new(config.root_stack_initial, config.root_stack_increment),
            parked: None,
            counters: Counters::default(),
        };
        log::debug!(
            "symbol table created at class {} ({} slots)",
            registry.class,
            capacity
        );

        builtins::bootstrap(&mut registry);
        registry
    }

    // ========================================================================
    // Find-or-create
    // ========================================================================

    /// Find or create the symbol for `(name, arity, quoted)`
    ///
    /// # Panics
    ///
    /// If `arity >= MAX_ARITY`, or if the table cannot grow any further.
    pub fn intern(&mut self, name: &str, arity: usize, quoted: bool) -> SymbolId {
        if arity >= MAX_ARITY {
            fatal!(FatalError::ArityOverflow {
                name: name.to_string(),
                arity,
                max: MAX_ARITY,
            });
        }

        let hash = symbol_hash(name, arity);
        if let Some(id) = self.find(hash, name, arity, quoted) {
            self.counters.hits += 1;
            return id;
        }

        let id = match self.pop_free() {
            Some(id) => id,
            None => {
                self.grow();
                match self.pop_free() {
                    Some(id) => id,
                    None => fatal!(FatalError::TableExhausted {
                        class: self.class,
                        capacity: self.capacity(),
                    }),
                }
            }
        };

        // The mask may have changed during growth.
        let bucket = bucket_of(hash, self.mask());
        let record = SymbolRecord::new(name, arity, quoted, self.buckets[bucket]);
        self.entries[id] = Slot::Occupied(record);
        self.buckets[bucket] = Some(id);
        self.live += 1;
        self.counters.misses += 1;

        log::trace!("interned {}/{} as {}", name, arity, id);
        id
    }

    /// Find the symbol for `(name, arity, quoted)` without creating it
    pub fn lookup(&self, name: &str, arity: usize, quoted: bool) -> Option<SymbolId> {
        if arity >= MAX_ARITY {
            return None;
        }
        self.find(symbol_hash(name, arity), name, arity, quoted)
    }

    fn find(&self, hash: u64, name: &str, arity: usize, quoted: bool) -> Option<SymbolId> {
        let mut cursor = self.buckets[bucket_of(hash, self.mask())];
        while let Some(id) = cursor {
            let record = self.live_record(id);
            if record.matches(name, arity, quoted) {
                return Some(id);
            }
            cursor = record.next;
        }
        None
    }

    fn pop_free(&mut self) -> Option<SymbolId> {
        let id = self.free_head?;
        match self.entries[id] {
            Slot::Free { next } => self.free_head = next,
            Slot::Occupied(_) => fatal!(FatalError::Invariant(format!(
                "free list head {} is occupied",
                id
            ))),
        }
        Some(id)
    }

    // ========================================================================
    // Release
    // ========================================================================

    /// Forget a symbol and return its identity to the free list
    ///
    /// Only the collector calls this, once it has established that `id` is
    /// unreachable and unrooted. The table never shrinks.
    ///
    /// # Panics
    ///
    /// If `id` is not live or is missing from its bucket chain. In debug
    /// builds, also if `id` is rooted.
    pub fn release(&mut self, id: SymbolId) {
        debug_assert!(
            !self.roots.contains(id),
            "{}",
            FatalError::ReleaseProtected { id }
        );
        self.release_unrooted(id);
    }

    /// [`release`](Self::release) for callers that already know `id` is
    /// not rooted
    pub(crate) fn release_unrooted(&mut self, id: SymbolId) {
        let (hash, next) = match self.entries.get(id).and_then(Slot::record) {
            Some(record) => (symbol_hash(record.name(), record.arity()), record.next),
            None => fatal!(FatalError::NotLive { id }),
        };
        let bucket = bucket_of(hash, self.mask());

        if self.buckets[bucket] == Some(id) {
            self.buckets[bucket] = next;
        } else {
            let mut cursor = self.buckets[bucket];
            loop {
                let Some(prev) = cursor else {
                    fatal!(FatalError::NotInChain { id, bucket });
                };
                let prev_record = self.live_record_mut(prev);
                if prev_record.next == Some(id) {
                    prev_record.next = next;
                    break;
                }
                cursor = prev_record.next;
            }
        }

        if self.parked == Some(id) {
            self.parked = None;
        }
        // Dropping the record releases the name.
        self.entries[id] = Slot::Free {
            next: self.free_head,
        };
        self.free_head = Some(id);
        self.live -= 1;
        self.counters.releases += 1;

        log::trace!("released {}", id);
    }

    // ========================================================================
    // Growth
    // ========================================================================

    /// Double the table and rehash every live record
    ///
    /// Identities are unchanged; only bucket placement is recomputed. New
    /// slots are appended to the free list in index order.
    fn grow(&mut self) {
        if self.class >= MAX_TABLE_CLASS {
            fatal!(FatalError::TableExhausted {
                class: self.class,
                capacity: self.capacity(),
            });
        }

        let old_capacity = self.capacity();
        self.class += 1;
        let new_capacity = capacity_of_class(self.class);

        self.entries.reserve(new_capacity - old_capacity);
        self.entries.extend(free_run(old_capacity, new_capacity));
        self.free_head = Some(SymbolId::from_usize(old_capacity));

        let mask = self.mask();
        let mut buckets = vec![None; new_capacity];
        for (id, slot) in self.entries.iter_enumerated_mut() {
            if let Slot::Occupied(record) = slot {
                let bucket = bucket_of(symbol_hash(record.name(), record.arity()), mask);
                record.next = buckets[bucket];
                buckets[bucket] = Some(id);
            }
        }
        self.buckets = buckets;
        self.counters.growths += 1;

        log::debug!(
            "symbol table grown from {} to {} slots (class {}, {} live)",
            old_capacity,
            new_capacity,
            self.class,
            self.live
        );
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of identities the table can hold without growing
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Current table class; `capacity() == 1 << table_class()`
    #[inline]
    pub fn table_class(&self) -> u8 {
        self.class
    }

    /// Number of live symbols
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no symbol is live; never the case after bootstrap
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of identities on the free list
    #[inline]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.live
    }

    /// True if `id` names a live symbol
    #[inline]
    pub fn is_valid(&self, id: SymbolId) -> bool {
        self.get(id).is_some()
    }

    /// The record of a live symbol
    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&SymbolRecord> {
        self.entries.get(id).and_then(Slot::record)
    }

    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.get(id).map(SymbolRecord::name)
    }

    pub fn arity(&self, id: SymbolId) -> Option<usize> {
        self.get(id).map(SymbolRecord::arity)
    }

    pub fn is_quoted(&self, id: SymbolId) -> Option<bool> {
        self.get(id).map(SymbolRecord::is_quoted)
    }

    /// Live symbols in identity order
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolRecord)> {
        self.entries
            .iter_enumerated()
            .filter_map(|(id, slot)| slot.record().map(|record| (id, record)))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Textual form of a live symbol
    ///
    /// # Panics
    ///
    /// If `id` is not live.
    pub fn render(&self, id: SymbolId) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = render_into(self.live_record(id), &mut out);
        out
    }

    /// Write the textual form of a live symbol, returning the characters written
    ///
    /// # Panics
    ///
    /// If `id` is not live.
    pub fn render_to<W: std::fmt::Write + ?Sized>(
        &self,
        id: SymbolId,
        out: &mut W,
    ) -> Result<usize, std::fmt::Error> {
        render_into(self.live_record(id), out)
    }

    /// `Display` adapter; free identities print as `<free>`
    pub fn display(&self, id: SymbolId) -> SymbolDisplay<'_> {
        SymbolDisplay {
            record: self.get(id),
        }
    }

    // ========================================================================
    // Root stack
    // ========================================================================

    /// Root `id` so that no collection releases it
    pub fn protect(&mut self, id: SymbolId) {
        self.roots.protect(id);
    }

    /// Drop the most recent protection of `id`
    ///
    /// Returns false if `id` was not protected.
    pub fn unprotect(&mut self, id: SymbolId) -> bool {
        self.roots.unprotect(id)
    }

    /// Drop the most recent protection, whatever identity it holds
    pub fn pop_protected(&mut self) -> Option<SymbolId> {
        self.roots.pop_last()
    }

    pub fn is_protected(&self, id: SymbolId) -> bool {
        self.roots.contains(id)
    }

    /// The root stack, oldest protection first
    pub fn roots(&self) -> &RootStack {
        &self.roots
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Verify the table invariants
    ///
    /// O(capacity). Intended for tests and debugging.
    ///
    /// # Panics
    ///
    /// With a description of the first violation found.
    pub fn check_invariants(&self) {
        let mask = self.mask();
        if self.buckets.len() != self.capacity() || !self.capacity().is_power_of_two() {
            fatal!(FatalError::Invariant(format!(
                "{} buckets for {} entries",
                self.buckets.len(),
                self.capacity()
            )));
        }

        let mut chained = HashSet::new();
        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut cursor = *head;
            while let Some(id) = cursor {
                let record = match self.get(id) {
                    Some(record) => record,
                    None => fatal!(FatalError::Invariant(format!(
                        "bucket {} links free slot {}",
                        bucket, id
                    ))),
                };
                if bucket_of(symbol_hash(record.name(), record.arity()), mask) != bucket {
                    fatal!(FatalError::Invariant(format!(
                        "{} chained in bucket {} but hashes elsewhere",
                        id, bucket
                    )));
                }
                if !chained.insert(id) {
                    fatal!(FatalError::Invariant(format!("{} chained twice", id)));
                }
                cursor = record.next;
            }
        }

        let mut triples = HashSet::new();
        for (id, record) in self.iter() {
            if !chained.contains(&id) {
                fatal!(FatalError::Invariant(format!("{} missing from its chain", id)));
            }
            if !triples.insert((record.name(), record.arity(), record.is_quoted())) {
                fatal!(FatalError::Invariant(format!("{} duplicates a live triple", id)));
            }
        }

        let mut free = HashSet::new();
        let mut cursor = self.free_head;
        while let Some(id) = cursor {
            cursor = match self.entries.get(id) {
                Some(Slot::Free { next }) => *next,
                _ => fatal!(FatalError::Invariant(format!(
                    "free list reaches non-free slot {}",
                    id
                ))),
            };
            if !free.insert(id) {
                fatal!(FatalError::Invariant(format!("free list cycles at {}", id)));
            }
        }

        if chained.len() != self.live || free.len() + self.live != self.capacity() {
            fatal!(FatalError::Invariant(format!(
                "{} live, {} chained, {} free, capacity {}",
                self.live,
                chained.len(),
                free.len(),
                self.capacity()
            )));
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[inline]
    fn mask(&self) -> usize {
        self.capacity() - 1
    }

    pub(crate) fn live_record(&self, id: SymbolId) -> &SymbolRecord {
        match self.get(id) {
            Some(record) => record,
            None => fatal!(FatalError::NotLive { id }),
        }
    }

    fn live_record_mut(&mut self, id: SymbolId) -> &mut SymbolRecord {
        match self.entries.get_mut(id).and_then(Slot::record_mut) {
            Some(record) => record,
            None => fatal!(FatalError::NotLive { id }),
        }
    }
}

/// Free slots `start..end`, each linked to its successor
fn free_run(start: usize, end: usize) -> impl Iterator<Item = Slot> {
    (start..end).map(move |index| Slot::Free {
        next: (index + 1 < end).then(|| SymbolId::from_usize(index + 1)),
    })
}
