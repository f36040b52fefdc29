//! LoadLab Core — training-load engine: record store, timeline normalizer,
//! rolling aggregator.
//!
//! This crate contains the heart of the injury-risk pipeline:
//! - Domain types (session entries, daily load series, risk series)
//! - Record store with CSV persistence and corruption quarantine
//! - Timeline normalizer (sparse entries → gap-free daily timeline)
//! - Rolling aggregator (acute/chronic trailing means, guarded ACWR ratio)
//!
//! Data flow: raw entries → `timeline::normalize` (per player) →
//! `rolling::compute_risk` → risk series → reporting (loadlab-report).

pub mod domain;
pub mod engine;
pub mod rolling;
pub mod store;
pub mod timeline;

pub use domain::{DailyLoadSeries, RiskSeries, SessionEntry, ValidationError};
pub use engine::{daily_series_for_player, risk_for_player, EngineError, MIN_SESSIONS_FOR_RISK};
pub use rolling::{compute_risk, rolling_mean, RollingParams};
pub use store::{RecordStore, StoreError};
pub use timeline::normalize;
