//! Test utilities for the symbol registry test suite.

#![allow(dead_code)]

use aterm_afun::{AfunConfig, SymbolId, SymbolRegistry};
use std::collections::HashSet;

/// Small class so a few dozen symbols force growth
pub const SMALL_CLASS: u8 = 3;

/// ============================================================================
/// REGISTRY FIXTURE
/// ============================================================================

/// Registry plus the symbols a test created through it
pub struct RegistryFixture {
    pub registry: SymbolRegistry,
    pub created: Vec<SymbolId>,
}

impl RegistryFixture {
    /// Fixture with the default configuration
    pub fn with_defaults() -> Self {
        Self::with_class(AfunConfig::default().table_class)
    }

    /// Fixture starting at `class`
    pub fn with_class(class: u8) -> Self {
        let config = AfunConfig {
            table_class: class,
            ..Default::default()
        };
        let registry = SymbolRegistry::new(config)
            .expect("registry initialization should succeed with a valid class");
        Self {
            registry,
            created: Vec::new(),
        }
    }

    /// Intern `count` distinct unquoted symbols named `{prefix}{i}`
    pub fn intern_many(&mut self, prefix: &str, count: usize, arity: usize) -> Vec<SymbolId> {
        let ids: Vec<_> = (0..count)
            .map(|i| self.registry.intern(&format!("{}{}", prefix, i), arity, false))
            .collect();
        self.created.extend(&ids);
        ids
    }

    /// Run a full collection that keeps only rooted symbols and `keep`
    pub fn collect_keeping(&mut self, keep: &[SymbolId]) -> aterm_afun::SweepStats {
        self.registry.unmark_all();
        self.registry.mark_all_protected();
        for &id in keep {
            self.registry.mark(id);
        }
        self.registry.sweep()
    }
}

/// ============================================================================
/// ASSERTION HELPERS
/// ============================================================================

/// Assert that all identities are distinct
#[track_caller]
pub fn assert_all_ids_unique(ids: &[SymbolId], context: &str) {
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(
        unique.len(),
        ids.len(),
        "{}: {} duplicate identities out of {}",
        context,
        ids.len() - unique.len(),
        ids.len()
    );
}

/// Assert that `id` is live with the given triple
#[track_caller]
pub fn assert_symbol(
    registry: &SymbolRegistry,
    id: SymbolId,
    name: &str,
    arity: usize,
    quoted: bool,
) {
    let record = registry
        .get(id)
        .unwrap_or_else(|| panic!("{} should be live", id));
    assert_eq!(
        (record.name(), record.arity(), record.is_quoted()),
        (name, arity, quoted),
        "{} holds the wrong triple",
        id
    );
}
