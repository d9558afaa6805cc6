//! Intern command implementation.

use std::io::Write;

use aterm_afun::{SymbolRegistry, MAX_ARITY};

use crate::error::{AtermtError, Result};

/// Arguments for the intern command.
#[derive(Debug, Clone, Default)]
pub struct InternArgs {
    /// Symbol names, interned in order.
    pub names: Vec<String>,
    pub arity: usize,
    pub quoted: bool,
}

/// Intern each name and print `identity<TAB>rendering`.
///
/// Repeated names print the same identity.
pub fn run_intern(
    args: InternArgs,
    registry: &mut SymbolRegistry,
    out: &mut impl Write,
) -> Result<()> {
    if args.arity >= MAX_ARITY {
        return Err(AtermtError::Validation(format!(
            "arity {} exceeds maximum arity {}",
            args.arity, MAX_ARITY
        )));
    }

    for name in &args.names {
        let id = registry.intern(name, args.arity, args.quoted);
        tracing::debug!(%id, name = name.as_str(), "interned");
        writeln!(out, "{}\t{}/{}", id, registry.display(id), args.arity)?;
    }
    Ok(())
}
