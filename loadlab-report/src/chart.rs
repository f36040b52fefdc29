//! Chart-equivalent data — render-ready series for any plotting surface.
//!
//! Pure data, no drawing: a host UI plots the acute/chronic pair on one
//! panel and the ACWR line on another, with a horizontal line at the
//! risk threshold and a shaded safe band. Undefined points stay `None`
//! so the plotting layer can break the line instead of drawing zeros.

use serde::{Deserialize, Serialize};

use crate::summary::RiskReport;

/// Everything a plotting surface needs to reproduce the two-panel
/// load/risk chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// ISO 8601 date labels, ascending.
    pub dates: Vec<String>,
    /// Daily load (upper panel, bars or area).
    pub load: Vec<f64>,
    /// Acute rolling mean (upper panel, solid line).
    pub acute: Vec<Option<f64>>,
    /// Chronic rolling mean (upper panel, dashed line).
    pub chronic: Vec<Option<f64>>,
    /// ACWR (lower panel).
    pub acwr: Vec<Option<f64>>,
    /// Horizontal risk threshold line for the ACWR panel.
    pub threshold: f64,
    /// Shaded safe band for the ACWR panel, inclusive.
    pub safe_band: (f64, f64),
}

impl ChartData {
    pub fn from_report(report: &RiskReport) -> Self {
        Self {
            dates: report.dates.iter().map(|d| d.to_string()).collect(),
            load: report.loads.clone(),
            acute: report.acute.clone(),
            chronic: report.chronic.clone(),
            acwr: report.acwr.clone(),
            threshold: report.params.risk_upper_threshold,
            safe_band: report.params.safe_band,
        }
    }
}
