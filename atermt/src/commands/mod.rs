//! Command modules for the atermt CLI.
//!
//! Every command receives a freshly bootstrapped registry and writes its
//! report to the given output.

pub mod builtins;
pub mod intern;
pub mod stats;
pub mod stress;

pub use builtins::run_builtins;
pub use intern::{run_intern, InternArgs};
pub use stats::{run_stats, StatsArgs};
pub use stress::{run_stress, StressArgs};

use std::io::Write;

use aterm_afun::RegistryStats;

use crate::error::Result;

/// Print statistics as aligned `key: value` lines
pub(crate) fn write_stats(out: &mut impl Write, stats: &RegistryStats) -> Result<()> {
    writeln!(out, "table class:  {}", stats.table_class)?;
    writeln!(out, "capacity:     {}", stats.capacity)?;
    writeln!(out, "live:         {}", stats.live)?;
    writeln!(out, "free:         {}", stats.free)?;
    writeln!(out, "roots:        {}", stats.roots)?;
    writeln!(out, "growths:      {}", stats.growths)?;
    writeln!(out, "hits:         {}", stats.hits)?;
    writeln!(out, "misses:       {}", stats.misses)?;
    writeln!(out, "releases:     {}", stats.releases)?;
    writeln!(out, "load factor:  {:.3}", stats.load_factor())?;
    Ok(())
}
