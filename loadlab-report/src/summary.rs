//! Player summary stats and the risk report envelope.
//!
//! `RiskReport` is the serializable artifact the rest of the reporting
//! layer renders from. It snapshots everything a consumer needs: the
//! date index, the three aligned risk sequences, the parameters they
//! were computed with, and a hash of the store they came from.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use loadlab_core::{
    risk_for_player, DailyLoadSeries, EngineError, RecordStore, RiskSeries, RollingParams,
    SessionEntry,
};

/// Current schema version for persisted report artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Headline stats for one player's raw session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub session_count: usize,
    pub total_load: f64,
    pub avg_rpe: f64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

impl PlayerSummary {
    /// Compute from one player's entries. `None` for an empty slice.
    pub fn compute(entries: &[SessionEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let rpe_sum: f64 = entries.iter().map(|e| f64::from(e.rpe)).sum();
        Some(Self {
            session_count: entries.len(),
            total_load: entries.iter().map(|e| e.session_load).sum(),
            avg_rpe: rpe_sum / entries.len() as f64,
            first_date: entries.iter().map(|e| e.date).min().unwrap(),
            last_date: entries.iter().map(|e| e.date).max().unwrap(),
        })
    }
}

/// Complete renderable report for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub player: String,
    pub generated_at: NaiveDateTime,
    pub params: RollingParams,
    pub summary: PlayerSummary,
    /// Date index shared by `loads`, `acute`, `chronic`, and `acwr`.
    pub dates: Vec<NaiveDate>,
    pub loads: Vec<f64>,
    pub acute: Vec<Option<f64>>,
    pub chronic: Vec<Option<f64>>,
    pub acwr: Vec<Option<f64>>,
    /// ACWR at the last date, with the reporter's 0.0 fallback applied
    /// when the engine left it undefined.
    pub current_risk: f64,
    /// blake3 hash of the record store this report was computed from.
    pub dataset_hash: String,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl RiskReport {
    /// Assemble a report from engine output.
    ///
    /// The engine contract guarantees aligned lengths and a monotonic
    /// date index; both are asserted here so a broken caller fails loudly
    /// instead of rendering garbage.
    pub fn build(
        summary: PlayerSummary,
        daily: &DailyLoadSeries,
        risk: &RiskSeries,
        params: &RollingParams,
        dataset_hash: &str,
    ) -> Self {
        assert_eq!(daily.len(), risk.acute.len(), "acute series misaligned");
        assert_eq!(daily.len(), risk.chronic.len(), "chronic series misaligned");
        assert_eq!(daily.len(), risk.acwr.len(), "acwr series misaligned");

        Self {
            schema_version: SCHEMA_VERSION,
            player: daily.player.clone(),
            generated_at: chrono::Local::now().naive_local(),
            params: params.clone(),
            summary,
            dates: daily.dates().collect(),
            loads: daily.loads.clone(),
            acute: risk.acute.clone(),
            chronic: risk.chronic.clone(),
            acwr: risk.acwr.clone(),
            current_risk: risk.current_acwr().unwrap_or(0.0),
            dataset_hash: dataset_hash.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// High-level entry point: run the engine for one player and wrap the
/// result in a report. Fails with the engine's policy errors (no
/// sessions / below the minimum-session gate).
pub fn report_for_player(
    store: &RecordStore,
    player: &str,
    params: &RollingParams,
) -> Result<RiskReport, EngineError> {
    let (daily, risk) = risk_for_player(store, player, params)?;
    let summary = PlayerSummary::compute(&store.for_player(player))
        .expect("risk_for_player guarantees a non-empty entry set");
    Ok(RiskReport::build(
        summary,
        &daily,
        &risk,
        params,
        &store.dataset_hash(),
    ))
}
