#![allow(missing_docs)]
//! Normalization and construction benchmarks.
//!
//! Compares sequential construction of a batch of relaxed records against
//! the rayon batch path.

use bibrelax::{
    construct_batch, construct_bibitem, normalize_relaxed, record_from_json_str, RawRecord,
    ValidationMode,
};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

/// Load a record fixture from the test data directory.
fn load_fixture(filename: &str) -> RawRecord {
    let path = format!("tests/data/{filename}");
    let text =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"));
    record_from_json_str(&text).unwrap_or_else(|err| panic!("Invalid fixture {path}: {err}"))
}

fn benchmark_normalize_single(c: &mut Criterion) {
    let record = load_fixture("relaxed_rfc.json");

    c.bench_function("normalize_relaxed_single", |b| {
        b.iter_batched(
            || record.clone(),
            |mut data| {
                normalize_relaxed(&mut data).ok();
                black_box(data)
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_construct_modes(c: &mut Criterion) {
    let valid = load_fixture("relaxed_rfc.json");
    let malformed = load_fixture("malformed_item.json");

    c.bench_function("construct_strict_valid", |b| {
        b.iter_batched(
            || valid.clone(),
            |mut data| construct_bibitem(&mut data, ValidationMode::Strict).ok(),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("construct_lenient_malformed", |b| {
        b.iter_batched(
            || malformed.clone(),
            |mut data| construct_bibitem(&mut data, ValidationMode::Lenient).ok(),
            BatchSize::SmallInput,
        );
    });
}

/// 1k records, alternating valid and malformed.
fn benchmark_batch_1k(c: &mut Criterion) {
    let valid = load_fixture("relaxed_rfc.json");
    let malformed = load_fixture("malformed_item.json");
    let records: Vec<RawRecord> = (0..1000)
        .map(|i| if i % 2 == 0 { valid.clone() } else { malformed.clone() })
        .collect();

    c.bench_function("sequential_1k_lenient", |b| {
        b.iter_batched(
            || records.clone(),
            |mut batch| {
                batch
                    .iter_mut()
                    .map(|data| construct_bibitem(data, ValidationMode::Lenient))
                    .filter(Result::is_ok)
                    .count()
            },
            BatchSize::LargeInput,
        );
    });

    c.bench_function("parallel_1k_lenient", |b| {
        b.iter_batched(
            || records.clone(),
            |mut batch| {
                construct_batch(&mut batch, ValidationMode::Lenient)
                    .into_iter()
                    .filter(Result::is_ok)
                    .count()
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_normalize_single,
    benchmark_construct_modes,
    benchmark_batch_1k
);
criterion_main!(benches);
