//! Entry store slots.
//!
//! Every identity indexes one [`Slot`]. A slot either holds the live
//! [`SymbolRecord`] for that identity or links to the next free identity.
//! The same storage therefore backs both the symbol table and the free
//! list, and the two partition it exactly.

use crate::symbol::SymbolId;

/// One interned `(name, arity, quoted)` triple
///
/// The record's identity is the index of the slot that holds it. The
/// `marked` and `old` flags belong to the external collector and are only
/// touched through the registry's mark-phase operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    name: Box<str>,
    arity: usize,
    quoted: bool,
    pub(crate) marked: bool,
    pub(crate) old: bool,
    /// Next record in the same bucket chain
    pub(crate) next: Option<SymbolId>,
}

impl SymbolRecord {
    pub(crate) fn new(name: &str, arity: usize, quoted: bool, next: Option<SymbolId>) -> Self {
        Self {
            name: Box::from(name),
            arity,
            quoted,
            marked: false,
            old: false,
            next,
        }
    }

    /// The symbol's name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arguments terms with this head symbol take
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// True if the textual form must be quoted
    #[inline]
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// True if the current mark phase reached this record
    #[inline]
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// True if the record has been promoted to the old generation
    #[inline]
    pub fn is_old(&self) -> bool {
        self.old
    }

    #[inline]
    pub(crate) fn matches(&self, name: &str, arity: usize, quoted: bool) -> bool {
        self.arity == arity && self.quoted == quoted && &*self.name == name
    }
}

/// Entry store slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Live symbol
    Occupied(SymbolRecord),
    /// Member of the free list; `None` terminates it
    Free { next: Option<SymbolId> },
}

impl Slot {
    /// The live record, if any
    #[inline]
    pub fn record(&self) -> Option<&SymbolRecord> {
        match self {
            Slot::Occupied(record) => Some(record),
            Slot::Free { .. } => None,
        }
    }

    #[inline]
    pub(crate) fn record_mut(&mut self) -> Option<&mut SymbolRecord> {
        match self {
            Slot::Occupied(record) => Some(record),
            Slot::Free { .. } => None,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, Slot::Free { .. })
    }
}
