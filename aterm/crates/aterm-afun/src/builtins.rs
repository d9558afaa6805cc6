//! Well-known symbols.
//!
//! Bootstrap interns these into an empty table in a fixed order and roots
//! them, so they always receive the identities below. Other components may
//! hard-code those identities.

use crate::error::{fatal, FatalError};
use crate::symbol::SymbolId;
use crate::table::SymbolRegistry;

/// Head symbol of integer literals
pub const INT: SymbolId = SymbolId::from_u32(0);
/// Head symbol of real literals
pub const REAL: SymbolId = SymbolId::from_u32(1);
/// Generic one-argument wrapper
pub const PLACEHOLDER: SymbolId = SymbolId::from_u32(2);
/// List constructor, `[head, tail]`
pub const LIST: SymbolId = SymbolId::from_u32(3);
/// Empty list
pub const EMPTY_LIST: SymbolId = SymbolId::from_u32(4);
/// Pair constructor
pub const PAIR: SymbolId = SymbolId::from_u32(5);

/// Number of well-known symbols; the first user symbol gets this identity
pub const BUILTIN_COUNT: usize = BUILTINS.len();

/// A well-known symbol and its reserved identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    pub id: SymbolId,
    pub name: &'static str,
    pub arity: usize,
}

/// Well-known symbols in bootstrap order
pub const BUILTINS: [Builtin; 6] = [
    Builtin {
        id: INT,
        name: "<integer>",
        arity: 0,
    },
    Builtin {
        id: REAL,
        name: "<real>",
        arity: 0,
    },
    Builtin {
        id: PLACEHOLDER,
        name: "<_>",
        arity: 1,
    },
    Builtin {
        id: LIST,
        name: "[_,_]",
        arity: 2,
    },
    Builtin {
        id: EMPTY_LIST,
        name: "[]",
        arity: 0,
    },
    Builtin {
        id: PAIR,
        name: "{_,_}",
        arity: 2,
    },
];

/// Intern and root every well-known symbol
///
/// Must run against an empty table.
pub(crate) fn bootstrap(registry: &mut SymbolRegistry) {
    for builtin in BUILTINS {
        let id = registry.intern(builtin.name, builtin.arity, false);
        if id != builtin.id {
            fatal!(FatalError::Invariant(format!(
                "well-known symbol `{}` bootstrapped as {} instead of {}",
                builtin.name, id, builtin.id
            )));
        }
        registry.protect(id);
    }
    log::debug!("bootstrapped {} well-known symbols", BUILTIN_COUNT);
}
