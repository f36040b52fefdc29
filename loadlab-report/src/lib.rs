//! LoadLab Report — the risk reporter.
//!
//! This crate builds on `loadlab-core` to provide:
//! - Per-player summary stats (session count, total load, average RPE)
//! - The `RiskReport` envelope with the current-risk fallback policy
//! - Chart-equivalent visualization data
//! - JSON/CSV/Markdown artifact export with schema versioning
//!
//! The reporter owns presentation policy: an undefined current ACWR is
//! reported as a `0.0` risk score, and all numeric formatting (two
//! decimal places for the scalar) happens here, never in the engine.

pub mod chart;
pub mod export;
pub mod summary;

pub use chart::ChartData;
pub use export::{
    export_json, export_risk_csv, import_json, load_artifacts, render_markdown, save_artifacts,
};
pub use summary::{report_for_player, PlayerSummary, RiskReport, SCHEMA_VERSION};
