//! Performance benchmarks for the Residency Engine.
//!
//! Covers the calculators directly, without the HTTP layer:
//! - Single settled-holder snapshot with a handful of absences
//! - Projection for a non-holder
//! - Scaling of the snapshot with the number of absences
//! - Batch of 1000 profiles through normalisation and dispatch
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use residency_engine::calculation::{
    calculate_projection, calculate_settled_snapshot, evaluate_eligibility, merge_ranges,
};
use residency_engine::config::ThresholdConfig;
use residency_engine::models::{
    AbsenceEntry, DatePeriod, DateRange, NormalizedProfile, ProfileRecord, StatusCategory,
    StatusEntry,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Builds `count` short trips spread across 2019-2023, some of them overlapping.
fn absences(count: usize) -> Vec<DateRange> {
    let start = date("2019-01-05");
    (0..count)
        .map(|i| {
            let from = start + Days::new((i as u64 * 37) % 1800);
            let to = from + Days::new(3 + (i as u64 % 11));
            DateRange::new(from, to).unwrap()
        })
        .collect()
}

fn holder_profile(absence_count: usize) -> NormalizedProfile {
    NormalizedProfile {
        qualifying_since: Some(date("2021-03-01")),
        partial_periods: vec![
            DatePeriod {
                from: date("2017-09-01"),
                to: Some(date("2019-08-31")),
            },
            DatePeriod {
                from: date("2019-09-01"),
                to: Some(date("2021-02-28")),
            },
        ],
        absences: absences(absence_count),
    }
}

fn profile_record(i: usize) -> ProfileRecord {
    let holder = i % 2 == 0;
    let mut status_history = vec![StatusEntry {
        status: if i % 3 == 0 {
            StatusCategory::Student
        } else {
            StatusCategory::TemporaryWorker
        },
        from: "2018-09-01".to_string(),
        to: if holder {
            Some("2021-12-31".to_string())
        } else {
            None
        },
    }];
    if holder {
        status_history.push(StatusEntry {
            status: StatusCategory::PermanentResident,
            from: "2022-01-01".to_string(),
            to: None,
        });
    }

    ProfileRecord {
        id: format!("user_{:04}", i),
        display_name: None,
        status_history,
        qualifying_since: None,
        pre_qualifying_periods: vec![],
        absences: vec![
            AbsenceEntry {
                from: "2022-06-01".to_string(),
                to: "2022-06-20".to_string(),
                place: None,
            },
            AbsenceEntry {
                from: "2023-12-20".to_string(),
                to: "2024-01-03".to_string(),
                place: None,
            },
        ],
    }
}

/// Benchmark: Single settled-holder snapshot.
///
/// Target: < 10μs mean
fn bench_single_snapshot(c: &mut Criterion) {
    let thresholds = ThresholdConfig::default();
    let profile = holder_profile(8);
    let reference = date("2024-01-01");

    c.bench_function("single_snapshot", |b| {
        b.iter(|| black_box(calculate_settled_snapshot(&profile, reference, &thresholds)))
    });
}

/// Benchmark: Single projection.
fn bench_single_projection(c: &mut Criterion) {
    let thresholds = ThresholdConfig::default();
    let profile = NormalizedProfile {
        qualifying_since: None,
        ..holder_profile(8)
    };
    let reference = date("2024-01-01");

    c.bench_function("single_projection", |b| {
        b.iter(|| black_box(calculate_projection(&profile, reference, &thresholds)))
    });
}

/// Benchmark: Merging ranges of increasing size.
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_ranges");

    for count in [10usize, 100, 1000] {
        let ranges = absences(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("ranges", count), &ranges, |b, ranges| {
            b.iter(|| black_box(merge_ranges(ranges)))
        });
    }

    group.finish();
}

/// Benchmark: Snapshot cost as the absence list grows.
fn bench_absence_scaling(c: &mut Criterion) {
    let thresholds = ThresholdConfig::default();
    let reference = date("2024-01-01");
    let mut group = c.benchmark_group("absence_scaling");

    for count in [0usize, 10, 50, 200] {
        let profile = holder_profile(count);
        group.throughput(Throughput::Elements(count.max(1) as u64));
        group.bench_with_input(BenchmarkId::new("absences", count), &profile, |b, profile| {
            b.iter(|| black_box(calculate_settled_snapshot(profile, reference, &thresholds)))
        });
    }

    group.finish();
}

/// Benchmark: Batch of 1000 profile records through normalisation and dispatch.
///
/// Target: < 10ms mean
fn bench_batch_1000(c: &mut Criterion) {
    let thresholds = ThresholdConfig::default();
    let reference = date("2024-01-01");
    let profiles: Vec<ProfileRecord> = (0..1000).map(profile_record).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(20);

    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let results: Vec<_> = profiles
                .iter()
                .map(|p| evaluate_eligibility(p, reference, &thresholds))
                .collect();
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_snapshot,
    bench_single_projection,
    bench_merge,
    bench_absence_scaling,
    bench_batch_1000,
);
criterion_main!(benches);
