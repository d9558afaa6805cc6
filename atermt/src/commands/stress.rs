//! Stress command implementation.
//!
//! Interns many distinct symbols so the table grows several times, checks
//! that every identity survived growth, then collects them all again.

use std::io::Write;
use std::time::Instant;

use aterm_afun::SymbolRegistry;

use crate::commands::write_stats;
use crate::error::{AtermtError, Result};

/// Arguments for the stress command.
#[derive(Debug, Clone)]
pub struct StressArgs {
    /// Number of distinct symbols to intern.
    pub count: usize,
}

impl Default for StressArgs {
    fn default() -> Self {
        Self { count: 10_000 }
    }
}

/// Run one intern, verify and collect cycle.
pub fn run_stress(
    args: StressArgs,
    registry: &mut SymbolRegistry,
    out: &mut impl Write,
) -> Result<()> {
    let start_time = Instant::now();
    let class_before = registry.table_class();

    let ids: Vec<_> = (0..args.count)
        .map(|i| registry.intern(&stress_name(i), i % 4, i % 2 == 1))
        .collect();

    for (i, &id) in ids.iter().enumerate() {
        let again = registry.intern(&stress_name(i), i % 4, i % 2 == 1);
        if again != id {
            return Err(AtermtError::Verification(format!(
                "symbol `{}` moved from {} to {}",
                stress_name(i),
                id,
                again
            )));
        }
    }
    registry.check_invariants();
    tracing::info!(
        count = args.count,
        from = class_before,
        to = registry.table_class(),
        "interned stress symbols"
    );

    registry.unmark_all();
    registry.mark_all_protected();
    let swept = registry.sweep();
    if swept.released != args.count {
        return Err(AtermtError::Verification(format!(
            "sweep released {} symbols, expected {}",
            swept.released, args.count
        )));
    }
    registry.check_invariants();

    writeln!(out, "interned:     {}", args.count)?;
    writeln!(out, "released:     {}", swept.released)?;
    writeln!(out, "survivors:    {}", swept.survivors)?;
    write_stats(out, &registry.stats())?;
    writeln!(out, "elapsed:      {:.3}s", start_time.elapsed().as_secs_f64())?;
    Ok(())
}

fn stress_name(i: usize) -> String {
    format!("stress_{}", i)
}
