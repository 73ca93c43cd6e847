//! Performance benchmarks for the evaluation core.
//!
//! - Single check-in classification
//! - A day's worth of check-ins and check-outs
//! - Sorting and scheduling a 1000-entry holiday calendar
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::config::AttendanceConfig;
use attendance_engine::evaluation::{evaluate, schedule, sort_holidays};
use attendance_engine::models::{ActionKind, HolidayFilter, HolidayRecord};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

/// Creates `count` holidays scattered over three years, out of order.
fn create_calendar(count: usize) -> Vec<HolidayRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let offset = (i as i64 * 7919) % (3 * 365);
            HolidayRecord::new(start + TimeDelta::days(offset), format!("Holiday {:04}", i))
        })
        .collect()
}

/// Creates one action per minute from 06:00 to 20:00.
fn create_actions() -> Vec<(ActionKind, NaiveDateTime)> {
    let base = day().and_hms_opt(6, 0, 0).unwrap();
    (0..14 * 60)
        .map(|m| {
            let action = if m % 2 == 0 {
                ActionKind::CheckIn
            } else {
                ActionKind::CheckOut
            };
            (action, base + TimeDelta::minutes(m))
        })
        .collect()
}

fn bench_single_check_in(c: &mut Criterion) {
    let config = AttendanceConfig::default();
    let now = day().and_hms_opt(8, 10, 29).unwrap();

    c.bench_function("single_check_in", |b| {
        b.iter(|| black_box(evaluate(ActionKind::CheckIn, black_box(now), &config)))
    });
}

fn bench_day_of_actions(c: &mut Criterion) {
    let config = AttendanceConfig::default();
    let actions = create_actions();

    let mut group = c.benchmark_group("evaluation");
    group.throughput(Throughput::Elements(actions.len() as u64));
    group.bench_function("day_of_actions", |b| {
        b.iter(|| {
            actions
                .iter()
                .map(|(action, now)| evaluate(*action, *now, &config))
                .collect::<Vec<_>>()
        })
    });
    group.finish();
}

fn bench_holiday_schedule(c: &mut Criterion) {
    let reference = day();
    let mut group = c.benchmark_group("holiday_schedule");

    for size in [100usize, 1000] {
        let calendar = create_calendar(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sort", size), &calendar, |b, calendar| {
            b.iter(|| sort_holidays(black_box(calendar.clone())))
        });

        let sorted = sort_holidays(calendar);
        for filter in [HolidayFilter::All, HolidayFilter::Upcoming] {
            group.bench_with_input(
                BenchmarkId::new(format!("schedule_{}", filter), size),
                &sorted,
                |b, sorted| b.iter(|| schedule(black_box(sorted), filter, reference)),
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_check_in,
    bench_day_of_actions,
    bench_holiday_schedule
);
criterion_main!(benches);
