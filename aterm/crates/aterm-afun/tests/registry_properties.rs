//! Registry behaviour tests.
//!
//! Hash-consing, growth, free-list reuse, root discipline and the
//! collector hooks, exercised through the public API only.

mod common;

use aterm_afun::builtins::{self, BUILTINS, BUILTIN_COUNT};
use aterm_afun::render::unescape;
use aterm_afun::{SymbolId, MAX_ARITY};
use common::{assert_all_ids_unique, assert_symbol, RegistryFixture, SMALL_CLASS};

// ============================================================================
// HASH-CONSING
// ============================================================================

#[test]
fn test_same_triple_same_identity() {
    let mut fixture = RegistryFixture::with_defaults();
    let reg = &mut fixture.registry;

    let first = reg.intern("foo", 2, false);
    reg.protect(first);
    assert_eq!(reg.intern("foo", 2, false), first);
    assert_symbol(reg, first, "foo", 2, false);
}

#[test]
fn test_triples_differing_in_one_component_are_distinct() {
    let mut fixture = RegistryFixture::with_defaults();
    let reg = &mut fixture.registry;

    let ids = vec![
        reg.intern("foo", 2, false),
        reg.intern("foo", 3, false),
        reg.intern("foo", 2, true),
        reg.intern("oof", 2, false),
        reg.intern("fop", 2, false),
    ];
    assert_all_ids_unique(&ids, "single-component variations");
    reg.check_invariants();
}

#[test]
fn test_arity_just_below_maximum() {
    let mut fixture = RegistryFixture::with_defaults();
    let id = fixture.registry.intern("wide", MAX_ARITY - 1, true);
    assert_symbol(&fixture.registry, id, "wide", MAX_ARITY - 1, true);
}

#[test]
#[should_panic(expected = "exceeds maximum arity")]
fn test_arity_at_maximum_is_fatal() {
    let mut fixture = RegistryFixture::with_defaults();
    fixture.registry.intern("wide", MAX_ARITY, false);
}

// ============================================================================
// GROWTH
// ============================================================================

#[test]
fn test_growth_preserves_rooted_identities() {
    let mut fixture = RegistryFixture::with_class(SMALL_CLASS);
    let anchor = fixture.registry.intern("anchor", 1, false);
    fixture.registry.protect(anchor);
    let class_before = fixture.registry.table_class();

    let ids = fixture.intern_many("g", 500, 2);

    assert!(fixture.registry.table_class() > class_before);
    assert_eq!(fixture.registry.intern("anchor", 1, false), anchor);
    assert_all_ids_unique(&ids, "growth");
    for (i, id) in ids.iter().enumerate() {
        assert_symbol(&fixture.registry, *id, &format!("g{}", i), 2, false);
    }
    fixture.registry.check_invariants();
}

#[test]
fn test_capacity_follows_class() {
    let mut fixture = RegistryFixture::with_class(SMALL_CLASS);
    assert_eq!(fixture.registry.capacity(), 1 << SMALL_CLASS);

    fixture.intern_many("c", 100, 0);
    let reg = &fixture.registry;
    assert_eq!(reg.capacity(), 1usize << reg.table_class());
    assert_eq!(reg.len() + reg.free_count(), reg.capacity());
}

// ============================================================================
// FREE LIST
// ============================================================================

#[test]
fn test_released_slot_is_reused() {
    let mut fixture = RegistryFixture::with_defaults();
    let reg = &mut fixture.registry;

    let old = reg.intern("old", 0, false);
    reg.release(old);
    let new = reg.intern("new", 0, false);
    assert_eq!(new, old);
    assert_symbol(reg, new, "new", 0, false);
}

#[test]
fn test_reintern_after_release_creates_fresh_record() {
    let mut fixture = RegistryFixture::with_defaults();
    let reg = &mut fixture.registry;

    let id = reg.intern("phoenix", 1, false);
    reg.mark(id);
    reg.promote(id);
    reg.release(id);

    let again = reg.intern("phoenix", 1, false);
    let record = reg.get(again).expect("re-interned symbol is live");
    assert!(!record.is_marked());
    assert!(!record.is_old());
    reg.check_invariants();
}

// ============================================================================
// ROOTS
// ============================================================================

#[test]
fn test_protect_unprotect_symmetric() {
    let mut fixture = RegistryFixture::with_defaults();
    let reg = &mut fixture.registry;
    let id = reg.intern("r", 0, false);
    let roots_before = reg.roots().len();

    reg.protect(id);
    assert!(reg.is_protected(id));
    assert!(reg.unprotect(id));
    assert!(!reg.is_protected(id));
    assert_eq!(reg.roots().len(), roots_before);
}

#[test]
fn test_double_protect_survives_single_unprotect() {
    let mut fixture = RegistryFixture::with_defaults();
    let id = fixture.registry.intern("twice", 0, false);
    fixture.registry.protect(id);
    fixture.registry.protect(id);
    fixture.registry.unprotect(id);
    assert!(fixture.registry.is_protected(id));

    let stats = fixture.collect_keeping(&[]);
    assert_eq!(stats.released, 0);
    assert!(fixture.registry.is_valid(id));
}

#[test]
fn test_pop_protected_is_lifo() {
    let mut fixture = RegistryFixture::with_defaults();
    let reg = &mut fixture.registry;
    let a = reg.intern("a", 0, false);
    let b = reg.intern("b", 0, false);
    reg.protect(a);
    reg.protect(b);

    assert_eq!(reg.pop_protected(), Some(b));
    assert_eq!(reg.pop_protected(), Some(a));
    assert_eq!(reg.pop_protected(), Some(builtins::PAIR));
}

// ============================================================================
// COLLECTION
// ============================================================================

#[test]
fn test_collection_reclaims_only_unreachable() {
    let mut fixture = RegistryFixture::with_class(SMALL_CLASS);
    let ids = fixture.intern_many("t", 50, 1);
    let (kept, dropped) = ids.split_at(10);
    fixture.registry.protect(kept[0]);

    let stats = fixture.collect_keeping(&kept[1..]);

    assert_eq!(stats.released, dropped.len());
    assert!(kept.iter().all(|id| fixture.registry.is_valid(*id)));
    assert!(dropped.iter().all(|id| !fixture.registry.is_valid(*id)));
    for builtin in BUILTINS {
        assert!(fixture.registry.is_valid(builtin.id));
    }
    fixture.registry.check_invariants();
}

#[test]
fn test_mark_all_protected_twice_equals_once() {
    let mut fixture = RegistryFixture::with_defaults();
    let ids = fixture.intern_many("m", 8, 0);
    for id in ids.iter().step_by(2) {
        fixture.registry.protect(*id);
    }

    fixture.registry.mark_all_protected();
    let once: Vec<bool> = ids
        .iter()
        .map(|id| fixture.registry.is_marked(*id))
        .collect();
    fixture.registry.mark_all_protected();
    let twice: Vec<bool> = ids
        .iter()
        .map(|id| fixture.registry.is_marked(*id))
        .collect();

    assert_eq!(once, twice);
    assert_eq!(once, vec![true, false, true, false, true, false, true, false]);
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_quoted_rendering_unescapes_to_name() {
    let mut fixture = RegistryFixture::with_defaults();
    let name = "say \"hello\"\\n";
    let id = fixture.registry.intern(name, 0, true);

    let text = fixture.registry.render(id);
    assert!(text.starts_with('"') && text.ends_with('"'));
    assert_eq!(unescape(&text[1..text.len() - 1]).as_deref(), Some(name));
}

#[test]
fn test_unquoted_rendering_is_name() {
    let mut fixture = RegistryFixture::with_defaults();
    let id = fixture.registry.intern("a\"b", 0, false);
    assert_eq!(fixture.registry.render(id), "a\"b");
}

// ============================================================================
// END TO END
// ============================================================================

#[test]
fn test_end_to_end_bootstrap_intern_release_reuse() {
    let mut fixture = RegistryFixture::with_class(SMALL_CLASS);
    let reg = &mut fixture.registry;

    let int = reg.intern("<int>", 0, false);
    reg.protect(int);
    assert_eq!(int, SymbolId::from_u32(BUILTIN_COUNT as u32));

    assert_eq!(reg.intern("<int>", 0, false), int);

    assert!(reg.unprotect(int));
    reg.release(int);
    let other = reg.intern("<other>", 0, false);
    assert_eq!(other, int);
    reg.check_invariants();
}
