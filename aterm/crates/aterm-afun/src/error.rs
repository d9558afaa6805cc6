//! Error types for the symbol registry.
//!
//! # Error Categories
//!
//! ## Recoverable
//! - [`ConfigError`](crate::config::ConfigError) - invalid or deprecated
//!   configuration, returned as `Result` before the registry exists
//!
//! ## Fatal
//! - [`FatalError`] - conditions a correct system never reaches. They are
//!   raised through the crate-internal `fatal!` macro, which logs the
//!   condition and panics. No operation continues on a corrupted table.

use thiserror::Error;

use crate::symbol::SymbolId;

/// Conditions that terminate the hosting process
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// Configuration error: arity outside `0..max`
    #[error("arity {arity} of symbol `{name}` exceeds maximum arity {max}")]
    ArityOverflow {
        name: String,
        arity: usize,
        max: usize,
    },

    /// Resource exhaustion: no identity left even after growth
    #[error("symbol table exhausted at class {class} (capacity {capacity})")]
    TableExhausted { class: u8, capacity: usize },

    /// Caller-contract violation: release of a free or out-of-range slot
    #[error("symbol {id} is not a live symbol")]
    NotLive { id: SymbolId },

    /// Caller-contract violation: record missing from its bucket chain
    #[error("symbol {id} is not present in bucket chain {bucket}")]
    NotInChain { id: SymbolId, bucket: usize },

    /// Caller-contract violation: release of a rooted identity
    #[error("symbol {id} is protected and cannot be released")]
    ReleaseProtected { id: SymbolId },

    /// Structural invariant broken, found by a consistency check
    #[error("symbol table invariant violated: {0}")]
    Invariant(String),
}

/// Log a [`FatalError`] and panic with its message
macro_rules! fatal {
    ($err:expr) => {{
        let err: $crate::error::FatalError = $err;
        log::error!("{}", err);
        panic!("{}", err)
    }};
}

pub(crate) use fatal;
