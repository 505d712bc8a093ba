//! Benchmarks for the hot string-rewriting operations.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use polars::prelude::*;
use tablab_core::clean::{
    map_binary_labels, strip_whitespace_all, truncate_column_suffix, yes_no_flags,
};

fn wide_table(rows: usize) -> DataFrame {
    let flags: Vec<&str> = (0..rows)
        .map(|i| if i % 2 == 0 { "Yes" } else { "No" })
        .collect();
    let terms: Vec<String> = (0..rows).map(|i| format!("{}000", 12 + i % 48)).collect();
    let names: Vec<String> = (0..rows).map(|i| format!("  holder {i}  ")).collect();
    df!(
        "self_employed" => flags,
        "term" => terms,
        "name" => names,
    )
    .unwrap()
}

fn bench_clean_ops(c: &mut Criterion) {
    let table = wide_table(100_000);

    c.bench_function("map_binary_labels_100k", |b| {
        b.iter_batched(
            || table.clone(),
            |mut df| map_binary_labels(&mut df, "self_employed", &yes_no_flags()).unwrap(),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("truncate_column_suffix_100k", |b| {
        b.iter_batched(
            || table.clone(),
            |mut df| truncate_column_suffix(&mut df, "term", 3).unwrap(),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("strip_whitespace_all_100k", |b| {
        b.iter_batched(
            || table.clone(),
            |mut df| strip_whitespace_all(&mut df).unwrap(),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_clean_ops);
criterion_main!(benches);
