//! Performance benchmarks for git-emoji.
//!
//! Run with: cargo bench
//!
//! Target performance:
//! - Index build: < 5ms per corpus version
//! - Suggestion latency: < 1ms per message

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use git_emoji::core::{score, IndexCache, IndexedDataset};
use git_emoji::services::{filter_listing, listing};
use git_emoji::{DataVersion, Dataset, Weights};

/// Benchmark building the index for each corpus version.
fn bench_index_build(c: &mut Criterion) {
    let dataset = Dataset::builtin().expect("builtin dataset");

    let mut group = c.benchmark_group("index_build");

    for version in DataVersion::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(version),
            &version,
            |b, &version| b.iter(|| black_box(IndexedDataset::build(&dataset, version))),
        );
    }

    group.finish();
}

/// Benchmark scoring typical commit messages against a cached index.
fn bench_suggest(c: &mut Criterion) {
    let cache = IndexCache::new(Dataset::builtin().expect("builtin dataset"));
    let weights = Weights::default();

    let messages = [
        ("short", "fix typo"),
        ("feature", "add login page with OAuth support"),
        ("release", "bump version and release 2.0 to production"),
        (
            "long",
            "refactor the configuration loader, remove dead code, update docs and fix CI tests",
        ),
    ];

    for version in DataVersion::ALL {
        let index = cache.get(version);
        let mut group = c.benchmark_group(format!("suggest_{}", version));

        for (name, message) in messages {
            group.bench_with_input(BenchmarkId::from_parameter(name), &message, |b, message| {
                b.iter(|| black_box(score(black_box(message), &index, &weights)))
            });
        }

        group.finish();
    }
}

/// Benchmark fuzzy filtering of the emoji listing.
fn bench_listing_filter(c: &mut Criterion) {
    let cache = IndexCache::new(Dataset::builtin().expect("builtin dataset"));
    let items = listing(&cache.get(DataVersion::V2));

    let queries = ["bug", "doc", "rel", "security"];

    let mut group = c.benchmark_group("listing_filter");

    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| black_box(filter_listing(&items, black_box(query))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_suggest, bench_listing_filter);

criterion_main!(benches);
