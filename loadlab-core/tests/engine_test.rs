//! End-to-end engine scenarios: store → normalizer → aggregator.
//!
//! Exercises the boundary behaviors that matter in production use:
//! gap filling, same-date summation, window warmup edges, the
//! zero-chronic division guard, whole-player deletion, and recomputation
//! idempotence.

use chrono::NaiveDate;
use loadlab_core::{risk_for_player, EngineError, RecordStore, RollingParams};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Player "A" logs 8 consecutive days of minutes=60, rpe=5 (load 300/day).
fn eight_day_store() -> RecordStore {
    let mut store = RecordStore::new();
    for offset in 0..8 {
        store
            .add_session(d(2024, 3, 1) + chrono::Duration::days(offset), "A", 60, 5)
            .unwrap();
    }
    store
}

#[test]
fn eight_consecutive_days_scenario() {
    let store = eight_day_store();
    let (daily, risk) = risk_for_player(&store, "A", &RollingParams::default()).unwrap();

    // Daily series: 8 slots of 300.
    assert_eq!(daily.len(), 8);
    assert!(daily.loads.iter().all(|&l| l == 300.0));

    // Acute (7d) defined from day 7 onward, value 300.
    assert!(risk.acute[..6].iter().all(Option::is_none));
    assert_eq!(risk.acute[6], Some(300.0));
    assert_eq!(risk.acute[7], Some(300.0));

    // Chronic (28d) and the ratio stay undefined throughout.
    assert!(risk.chronic.iter().all(Option::is_none));
    assert!(risk.acwr.iter().all(Option::is_none));
    assert_eq!(risk.current_acwr(), None);
}

#[test]
fn gap_days_appear_with_zero_load() {
    let mut store = RecordStore::new();
    store.add_session(d(2024, 3, 1), "A", 60, 5).unwrap();
    store.add_session(d(2024, 3, 3), "A", 60, 5).unwrap();

    let (daily, _) = risk_for_player(&store, "A", &RollingParams::default()).unwrap();
    assert_eq!(daily.len(), 3);
    assert_eq!(daily.date_at(1), d(2024, 3, 2));
    assert_eq!(daily.loads[1], 0.0);
}

#[test]
fn same_day_sessions_sum_not_overwrite() {
    let mut store = RecordStore::new();
    store.add_session(d(2024, 3, 1), "A", 10, 3).unwrap(); // 30
    store.add_session(d(2024, 3, 1), "A", 10, 5).unwrap(); // 50

    let (daily, _) = risk_for_player(&store, "A", &RollingParams::default()).unwrap();
    assert_eq!(daily.loads, vec![80.0]);
}

#[test]
fn acwr_becomes_defined_with_full_chronic_history() {
    let mut store = RecordStore::new();
    for offset in 0..35 {
        store
            .add_session(d(2024, 3, 1) + chrono::Duration::days(offset), "A", 60, 5)
            .unwrap();
    }

    let (_, risk) = risk_for_player(&store, "A", &RollingParams::default()).unwrap();
    // First 27 slots lack chronic history.
    assert!(risk.acwr[..27].iter().all(Option::is_none));
    // From day 28 on: steady load, acute == chronic, ratio 1.0.
    for t in 27..35 {
        let acwr = risk.acwr[t].unwrap();
        assert!((acwr - 1.0).abs() < 1e-12, "acwr[{t}] = {acwr}");
    }
    assert_eq!(risk.current_acwr(), Some(1.0));
}

#[test]
fn all_zero_history_never_yields_infinity() {
    let mut store = RecordStore::new();
    // Two zero-minute sessions 40 days apart: long all-zero timeline.
    store.add_session(d(2024, 3, 1), "A", 0, 5).unwrap();
    store.add_session(d(2024, 4, 10), "A", 0, 5).unwrap();

    let (_, risk) = risk_for_player(&store, "A", &RollingParams::default()).unwrap();
    assert!(risk.acwr.iter().all(Option::is_none));
    for point in risk.acute.iter().chain(&risk.chronic) {
        if let Some(v) = point {
            assert!(v.is_finite());
        }
    }
}

#[test]
fn recomputation_is_idempotent() {
    let store = eight_day_store();
    let params = RollingParams::default();

    let first = risk_for_player(&store, "A", &params).unwrap();
    let second = risk_for_player(&store, "A", &params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn deletion_removes_player_entirely() {
    let mut store = eight_day_store();
    store.add_session(d(2024, 3, 1), "B", 45, 6).unwrap();

    assert_eq!(store.remove_player("A"), 8);
    assert!(store.for_player("A").is_empty());
    assert_eq!(store.players(), vec!["B".to_string()]);

    let err = risk_for_player(&store, "A", &RollingParams::default()).unwrap_err();
    assert!(matches!(err, EngineError::NoSessions { .. }));
}

#[test]
fn mutation_changes_the_next_recomputation() {
    let mut store = eight_day_store();
    let params = RollingParams::default();

    let (daily_before, _) = risk_for_player(&store, "A", &params).unwrap();
    store.add_session(d(2024, 3, 9), "A", 120, 10).unwrap();
    let (daily_after, _) = risk_for_player(&store, "A", &params).unwrap();

    assert_eq!(daily_before.len(), 8);
    assert_eq!(daily_after.len(), 9);
    assert_eq!(daily_after.loads[8], 1200.0);
}

#[test]
fn custom_windows_flow_through() {
    let mut store = RecordStore::new();
    for offset in 0..10 {
        store
            .add_session(d(2024, 3, 1) + chrono::Duration::days(offset), "A", 60, 5)
            .unwrap();
    }

    let params = RollingParams::with_windows(3, 6);
    let (_, risk) = risk_for_player(&store, "A", &params).unwrap();
    assert_eq!(risk.acute[2], Some(300.0));
    assert_eq!(risk.acwr[4], None);
    assert_eq!(risk.acwr[5], Some(1.0));
}
