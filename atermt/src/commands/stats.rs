//! Stats command implementation.

use std::io::Write;

use aterm_afun::SymbolRegistry;

use crate::commands::write_stats;
use crate::error::Result;

/// Arguments for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsArgs {
    /// Print JSON instead of text.
    pub json: bool,
}

/// Report the statistics of a freshly bootstrapped registry.
pub fn run_stats(args: StatsArgs, registry: &SymbolRegistry, out: &mut impl Write) -> Result<()> {
    let stats = registry.stats();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
    } else {
        write_stats(out, &stats)?;
    }
    Ok(())
}
