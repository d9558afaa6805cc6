//! Symbol identities.
//!
//! A [`SymbolId`] is the only externally visible name of an interned
//! `(name, arity, quoted)` triple. Identities are dense, start at 0 and are
//! stable for as long as the symbol is live, including across table growth.

use std::fmt;

use static_assertions::assert_eq_size;

use crate::index_vec::Idx;

/// Arities accepted by [`SymbolRegistry::intern`](crate::SymbolRegistry::intern)
/// are `0..MAX_ARITY`.
pub const MAX_ARITY: usize = 256;

/// SymbolId - A compact handle to an interned function symbol
///
/// # Size
///
/// `SymbolId` is exactly 4 bytes, so terms can store it inline.
///
/// # Examples
///
/// ```
/// use aterm_afun::{SymbolId, SymbolRegistry};
///
/// let mut registry = SymbolRegistry::default();
/// let f = registry.intern("f", 2, false);
///
/// assert_eq!(f, registry.intern("f", 2, false));
/// assert_eq!(registry.name(f), Some("f"));
/// assert!(f > SymbolId::from_u32(0));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

assert_eq_size!(SymbolId, u32);

impl SymbolId {
    /// Create an identity from its raw value
    ///
    /// The registry decides whether the identity is live; see
    /// [`SymbolRegistry::is_valid`](crate::SymbolRegistry::is_valid).
    #[inline]
    pub const fn from_u32(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index value
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Get the raw index value as a `usize`
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Idx for SymbolId {
    #[inline]
    fn from_usize(idx: usize) -> Self {
        assert!(
            idx <= u32::MAX as usize,
            "symbol index {} does not fit in 32 bits",
            idx
        );
        SymbolId(idx as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<SymbolId> for u32 {
    fn from(id: SymbolId) -> u32 {
        id.0
    }
}
