//! Offset index benchmarks for O(log n) verification.
//!
//! Month lists span decades (the default bounds cover 120 years), and every
//! scroll event resolves the visible range. Lookups must stay logarithmic.
//!
//! Run with: cargo bench --bench offset_index

#![allow(missing_docs)] // criterion macros generate undocumented items

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rangecal::calendar::LocaleConfig;
use rangecal::view_state::{
    Direction, MonthOffsetIndex, MonthSizeEstimator, ScrollArea, ScrollOptions, SizeCache,
};

fn estimator() -> MonthSizeEstimator {
    let options = ScrollOptions {
        enabled: true,
        ..ScrollOptions::default()
    };
    let area = ScrollArea::compute(&options, Direction::Vertical, 1);
    let min_date = NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid date");
    MonthSizeEstimator::new(area, min_date, LocaleConfig::default())
}

/// Building the index from calendar-derived estimates.
fn benchmark_build(c: &mut Criterion) {
    let estimator = estimator();
    let cache = SizeCache::new();
    let mut group = c.benchmark_group("offset_index_build");

    for months in [120, 1_440, 12_000] {
        group.bench_with_input(BenchmarkId::new("from_estimator", months), &months, |b, &months| {
            b.iter(|| MonthOffsetIndex::from_estimator(black_box(months), &estimator, &cache));
        });
    }

    group.finish();
}

/// Visible-range lookups at different positions of a 1000-year list.
fn benchmark_visible_range(c: &mut Criterion) {
    let index = MonthOffsetIndex::from_estimator(12_000, &estimator(), &SizeCache::new());
    let total = index.total();
    let mut group = c.benchmark_group("visible_range_12k");

    let positions = [
        ("start", 0),
        ("quarter", total / 4),
        ("middle", total / 2),
        ("three_quarters", total * 3 / 4),
        ("end", total.saturating_sub(240)),
    ];

    for (name, offset) in positions {
        group.bench_with_input(BenchmarkId::new("position", name), &offset, |b, &offset| {
            b.iter(|| index.visible_range(black_box(offset), black_box(240)));
        });
    }

    group.finish();
}

/// Applying host measurements one month at a time.
fn benchmark_measurements(c: &mut Criterion) {
    let base = MonthOffsetIndex::from_estimator(12_000, &estimator(), &SizeCache::new());

    c.bench_function("set_extent_12k", |b| {
        b.iter_batched(
            || base.clone(),
            |mut index| {
                for i in (0..index.len()).step_by(97) {
                    index.set(i, black_box(231));
                }
                index
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, benchmark_build, benchmark_visible_range, benchmark_measurements);
criterion_main!(benches);
