//! Symbol registry benchmarks
//!
//! Run with: `cargo bench --bench afun_bench`

use aterm_afun::hash::symbol_hash;
use aterm_afun::{AfunConfig, SymbolRegistry};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Benchmark find-or-create
fn bench_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern");
    group.throughput(Throughput::Elements(1));

    // Every call creates a symbol
    group.bench_function("intern_new_symbol", |b| {
        let mut registry = SymbolRegistry::default();
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            registry.intern(&format!("new_symbol_{}", counter), 2, false)
        })
    });

    // Every call finds the same symbol
    group.bench_function("intern_existing_symbol", |b| {
        let mut registry = SymbolRegistry::default();
        registry.intern("existing", 2, false);
        b.iter(|| black_box(registry.intern("existing", 2, false)))
    });

    group.bench_function("lookup_missing_symbol", |b| {
        let registry = SymbolRegistry::default();
        b.iter(|| black_box(registry.lookup("missing", 1, true)))
    });

    group.finish();
}

/// Benchmark filling a small table through repeated growth
fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth");

    for count in [1_000usize, 10_000, 100_000] {
        let names: Vec<String> = (0..count).map(|i| format!("g{}", i)).collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("fill_from_class_4", count), &names, |b, names| {
            b.iter(|| {
                let mut registry = SymbolRegistry::new(AfunConfig {
                    table_class: 4,
                    ..Default::default()
                })
                .unwrap();
                for name in names {
                    registry.intern(name, 1, false);
                }
                black_box(registry.table_class())
            })
        });
    }

    group.finish();
}

/// Benchmark the symbol hash on different name lengths
fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");

    for len in [4usize, 32, 256] {
        let name = "x".repeat(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("symbol_hash", len), &name, |b, name| {
            b.iter(|| black_box(symbol_hash(black_box(name), 3)))
        });
    }

    group.finish();
}

/// Benchmark textual rendering
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let mut registry = SymbolRegistry::default();
    let plain = registry.intern("plain_symbol", 2, false);
    let quoted = registry.intern("quoted \"symbol\"\n", 0, true);

    group.bench_function("render_unquoted", |b| b.iter(|| black_box(registry.render(plain))));
    group.bench_function("render_quoted", |b| b.iter(|| black_box(registry.render(quoted))));

    group.finish();
}

criterion_group!(benches, bench_intern, bench_growth, bench_hash, bench_render);
criterion_main!(benches);
