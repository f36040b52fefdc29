//! Criterion benchmarks for the engine hot paths.
//!
//! Benchmarks:
//! 1. Timeline normalization (sparse entries → daily series)
//! 2. Risk computation (two rolling means + guarded ratio)
//! 3. Full per-player pass (store → normalize → risk)

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loadlab_core::{compute_risk, normalize, risk_for_player, RecordStore, RollingParams};

/// Two years of daily sessions with some double-session days.
fn make_store(days: i64) -> RecordStore {
    let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut store = RecordStore::new();
    for offset in 0..days {
        let date = base + chrono::Duration::days(offset);
        let minutes = 30 + (offset % 90) as u32;
        let rpe = 1 + (offset % 10) as u8;
        store.add_session(date, "A", minutes, rpe).unwrap();
        if offset % 5 == 0 {
            store.add_session(date, "A", 20, 4).unwrap();
        }
    }
    store
}

fn bench_normalize(c: &mut Criterion) {
    let store = make_store(730);
    let entries = store.for_player("A");

    c.bench_function("normalize_730_days", |b| {
        b.iter(|| normalize(black_box("A"), black_box(&entries)).unwrap())
    });
}

fn bench_compute_risk(c: &mut Criterion) {
    let store = make_store(730);
    let daily = normalize("A", &store.for_player("A")).unwrap();

    let mut group = c.benchmark_group("compute_risk");
    for (acute, chronic) in [(7, 28), (3, 21), (14, 56)] {
        let params = RollingParams::with_windows(acute, chronic);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{acute}_{chronic}")),
            &params,
            |b, params| b.iter(|| compute_risk(black_box(&daily), params)),
        );
    }
    group.finish();
}

fn bench_full_pass(c: &mut Criterion) {
    let store = make_store(730);
    let params = RollingParams::default();

    c.bench_function("risk_for_player_730_days", |b| {
        b.iter(|| risk_for_player(black_box(&store), "A", &params).unwrap())
    });
}

criterion_group!(benches, bench_normalize, bench_compute_risk, bench_full_pass);
criterion_main!(benches);
