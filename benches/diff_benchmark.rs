//! Benchmarks for extraction and the diff engine on the fixture packages.

use contract_tools::diff::{DiffEngine, DiffOptions};
use contract_tools::extract::{ExtractOptions, Extractor};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures")).join(name)
}

fn bench_extract(c: &mut Criterion) {
    let extractor = Extractor::new(ExtractOptions::default());
    let root = fixture("users/v1");

    c.bench_function("extract_users_package", |b| {
        b.iter(|| {
            let _ = black_box(extractor.extract(black_box(&root)));
        })
    });
}

fn bench_diff(c: &mut Criterion) {
    let extractor = Extractor::new(ExtractOptions::default());
    let (Ok(old), Ok(new)) = (
        extractor.extract(&fixture("users/v1")),
        extractor.extract(&fixture("users/v2")),
    ) else {
        return;
    };
    let engine = DiffEngine::new(DiffOptions::default());

    c.bench_function("diff_users_package", |b| {
        b.iter(|| {
            let _ = black_box(engine.diff(black_box(&old), black_box(&new)));
        })
    });
}

criterion_group!(benches, bench_extract, bench_diff);
criterion_main!(benches);
