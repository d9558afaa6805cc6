//! aterm-afun - Function Symbol Registry
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! Every term in the toolkit is headed by a function symbol: a
//! `(name, arity, quoted)` triple. This crate interns those triples. Two
//! requests for the same triple return the same [`SymbolId`] for as long as
//! the symbol is live (maximal sharing), and the registry exposes the hooks
//! a generational mark-and-sweep collector needs to reclaim symbols nobody
//! references any more.
//!
//! COMPONENTS:
//! -----------
//! - [`hash`]: order-sensitive hash of `(name, arity)`
//! - [`entry`]: entry-store slots, either a live record or a free-list link
//! - [`table`]: find-or-create, release, growth and rehash
//! - [`roots`]: the protection stack consulted on every mark phase
//! - [`gc`]: mark, unmark, park and sweep hooks for the collector
//! - [`builtins`]: well-known symbols with fixed identities
//! - [`render`]: textual form with quoting and escapes
//! - [`sync`]: mutex-guarded handle for multi-threaded hosts
//!
//! MEMORY LAYOUT:
//! --------------
//! ```text
//! SymbolId (4 bytes)            Slot
//! ┌──────────────┐              ┌──────────────────────────────────────┐
//! │ index (u32)  │ ───────────► │ Occupied { name, arity, quoted,      │
//! └──────────────┘              │            mark, old, next-in-chain }│
//!                               │ Free { next-free }                   │
//!                               └──────────────────────────────────────┘
//! ```
//!
//! ERROR MODEL:
//! ------------
//! Configuration is validated up front and reported through
//! [`ConfigError`]. Everything after bootstrap either succeeds or
//! terminates: arity overflow, table exhaustion and broken caller contracts
//! panic with a [`FatalError`] message. A registry never keeps running in a
//! corrupted state.
//!
//! # Examples
//!
//! ```
//! use aterm_afun::{builtins, SymbolRegistry};
//!
//! let mut registry = SymbolRegistry::default();
//! let cons = registry.intern("cons", 2, false);
//! registry.protect(cons);
//!
//! assert_eq!(registry.intern("cons", 2, false), cons);
//! assert_eq!(registry.name(builtins::EMPTY_LIST), Some("[]"));
//!
//! // A collection cycle driven by the host's collector.
//! registry.unmark_all();
//! registry.mark_all_protected();
//! registry.sweep();
//! assert!(registry.is_valid(cons));
//! ```

pub mod builtins;
pub mod config;
pub mod entry;
pub mod error;
pub mod gc;
pub mod hash;
pub(crate) mod index_vec;
pub mod render;
pub mod roots;
pub mod stats;
pub mod symbol;
pub mod sync;
pub mod table;

pub use config::{AfunConfig, ConfigError};
pub use entry::SymbolRecord;
pub use error::FatalError;
pub use gc::SweepStats;
pub use roots::RootStack;
pub use stats::RegistryStats;
pub use symbol::{SymbolId, MAX_ARITY};
pub use sync::SharedRegistry;
pub use table::SymbolRegistry;
