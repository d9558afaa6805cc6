//! Builtins command implementation.

use std::io::Write;

use aterm_afun::builtins::BUILTINS;
use aterm_afun::SymbolRegistry;

use crate::error::Result;

/// List the well-known symbols with their reserved identities.
pub fn run_builtins(registry: &SymbolRegistry, out: &mut impl Write) -> Result<()> {
    for builtin in BUILTINS {
        writeln!(
            out,
            "{}\t{}/{}",
            builtin.id,
            registry.display(builtin.id),
            builtin.arity
        )?;
    }
    Ok(())
}
