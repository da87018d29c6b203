//! Layout Benchmarks
//!
//! Measures layout cost at calendar scale:
//! - Partitioning
//! - Week band packing
//! - Day grouping and geometry

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use eg_core::{CalendarEvent, WeekStart, WeekWindow};
use eg_layout::{compute_week_bands, layout_day, partition_by_duration};

fn week() -> WeekWindow {
    WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(), WeekStart::Monday)
}

/// Mix of timed and multi-day events spread over the benchmark week
fn generate_events(count: usize) -> Vec<CalendarEvent> {
    let origin = week().start_instant();
    (0..count)
        .map(|i| {
            let start = origin + Duration::minutes((i as i64 * 97) % (7 * 24 * 60));
            let end = if i % 4 == 0 {
                start + Duration::days((i % 3) as i64 + 1)
            } else {
                start + Duration::minutes(30 + (i as i64 % 5) * 15)
            };
            CalendarEvent::new(format!("event-{}", i), start, end)
        })
        .collect()
}

/// Benchmark partitioning
fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    for size in [10, 100, 1000] {
        let events = generate_events(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &events, |b, events| {
            b.iter(|| black_box(partition_by_duration(events)))
        });
    }

    group.finish();
}

/// Benchmark week band packing
fn bench_week_bands(c: &mut Criterion) {
    let mut group = c.benchmark_group("week_bands");
    let week = week();

    for size in [10, 100, 1000] {
        let events = generate_events(size);
        let partition = partition_by_duration(&events);
        group.throughput(Throughput::Elements(partition.multi_day.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &partition.multi_day,
            |b, multi_day| b.iter(|| black_box(compute_week_bands(multi_day, &week))),
        );
    }

    group.finish();
}

/// Benchmark day grouping
fn bench_day_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("day_layout");
    let day = week().start();

    for size in [10, 100, 1000] {
        let events = generate_events(size);
        let partition = partition_by_duration(&events);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &partition.single_day,
            |b, single_day| b.iter(|| black_box(layout_day(single_day, day))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_partition, bench_week_bands, bench_day_layout);
criterion_main!(benches);
