//! Rolling aggregator — acute/chronic trailing means and the ACWR ratio.
//!
//! Undefined points are `None`, never NaN or infinity: a point whose
//! window lacks history, or whose chronic mean is zero, stays undefined
//! all the way to the output.

use serde::{Deserialize, Serialize};

use crate::domain::{DailyLoadSeries, RiskSeries};

/// Window and presentation parameters for risk computation.
///
/// The threshold and safe band are carried here so the reporter renders
/// the same numbers the aggregator was configured with; the aggregator
/// itself only uses the windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingParams {
    /// Trailing window for recent load, in days.
    pub acute_window: usize,
    /// Trailing window for baseline load, in days.
    pub chronic_window: usize,
    /// ACWR above this marks elevated injury risk.
    pub risk_upper_threshold: f64,
    /// ACWR band considered safe, inclusive.
    pub safe_band: (f64, f64),
}

impl Default for RollingParams {
    fn default() -> Self {
        Self {
            acute_window: 7,
            chronic_window: 28,
            risk_upper_threshold: 1.5,
            safe_band: (0.8, 1.3),
        }
    }
}

impl RollingParams {
    /// Custom windows with the default threshold and band.
    pub fn with_windows(acute_window: usize, chronic_window: usize) -> Self {
        assert!(acute_window >= 1, "acute_window must be >= 1");
        assert!(
            chronic_window > acute_window,
            "chronic_window must be > acute_window"
        );
        Self {
            acute_window,
            chronic_window,
            ..Self::default()
        }
    }
}

/// Trailing simple moving average over `values`.
///
/// `out[t]` is the mean of `values[t - window + 1 ..= t]`; the first
/// `window - 1` slots are `None` (not enough history). O(n) via a
/// rolling sum.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 1, "window must be >= 1");

    let n = values.len();
    let mut out = vec![None; n];
    if n < window {
        return out;
    }

    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);

    for i in window..n {
        sum += values[i] - values[i - window];
        out[i] = Some(sum / window as f64);
    }

    out
}

/// Compute the acute mean, chronic mean, and ACWR for a daily series.
///
/// `acwr[t]` is defined only when both means are defined AND the chronic
/// mean is non-zero; the division is guarded explicitly so a zero
/// baseline can never leak out as infinity or NaN.
pub fn compute_risk(series: &DailyLoadSeries, params: &RollingParams) -> RiskSeries {
    let acute = rolling_mean(&series.loads, params.acute_window);
    let chronic = rolling_mean(&series.loads, params.chronic_window);

    let acwr = acute
        .iter()
        .zip(&chronic)
        .map(|(a, c)| match (a, c) {
            (Some(a), Some(c)) if *c != 0.0 => Some(a / c),
            _ => None,
        })
        .collect();

    RiskSeries {
        acute,
        chronic,
        acwr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(loads: Vec<f64>) -> DailyLoadSeries {
        DailyLoadSeries {
            player: "Ayse".into(),
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            loads,
        }
    }

    #[test]
    fn rolling_mean_basic() {
        let out = rolling_mean(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(11.0));
        assert_eq!(out[3], Some(12.0));
        assert_eq!(out[4], Some(13.0));
    }

    #[test]
    fn rolling_mean_window_one_is_identity() {
        let out = rolling_mean(&[5.0, 7.0], 1);
        assert_eq!(out, vec![Some(5.0), Some(7.0)]);
    }

    #[test]
    fn rolling_mean_short_input_all_undefined() {
        let out = rolling_mean(&[1.0, 2.0], 3);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn six_days_acute_all_undefined() {
        // acute_window = 7 needs 7 days of history.
        let risk = compute_risk(&series(vec![100.0; 6]), &RollingParams::default());
        assert!(risk.acute.iter().all(Option::is_none));
        assert!(risk.acwr.iter().all(Option::is_none));
    }

    #[test]
    fn seven_days_acute_defined_only_at_last() {
        let risk = compute_risk(&series(vec![100.0; 7]), &RollingParams::default());
        assert!(risk.acute[..6].iter().all(Option::is_none));
        assert_eq!(risk.acute[6], Some(100.0));
        // Chronic needs 28 days, so the ratio stays undefined.
        assert_eq!(risk.chronic[6], None);
        assert_eq!(risk.acwr[6], None);
    }

    #[test]
    fn zero_chronic_guards_the_division() {
        // 30 days of zero load: both means defined (0.0) at the tail,
        // but the ratio must stay undefined, never Inf or NaN.
        let risk = compute_risk(&series(vec![0.0; 30]), &RollingParams::default());
        assert_eq!(risk.chronic[29], Some(0.0));
        assert_eq!(risk.acute[29], Some(0.0));
        assert_eq!(risk.acwr[29], None);
    }

    #[test]
    fn ratio_defined_once_both_windows_fill() {
        let params = RollingParams::with_windows(2, 4);
        let risk = compute_risk(&series(vec![100.0, 100.0, 100.0, 100.0, 200.0]), &params);
        assert_eq!(risk.acwr[2], None); // chronic not yet defined
        assert_eq!(risk.acwr[3], Some(1.0));
        // acute mean 150, chronic mean 125
        assert_eq!(risk.acwr[4], Some(1.2));
    }

    #[test]
    fn output_is_aligned_with_input() {
        let s = series(vec![50.0; 40]);
        let risk = compute_risk(&s, &RollingParams::default());
        assert_eq!(risk.acute.len(), s.len());
        assert_eq!(risk.chronic.len(), s.len());
        assert_eq!(risk.acwr.len(), s.len());
    }

    #[test]
    fn no_non_finite_values_ever() {
        let mut loads = vec![0.0; 28];
        loads.extend_from_slice(&[500.0, 0.0, 250.0]);
        let risk = compute_risk(&series(loads), &RollingParams::default());
        for point in risk.acwr.iter().chain(&risk.acute).chain(&risk.chronic) {
            if let Some(v) = point {
                assert!(v.is_finite());
            }
        }
    }

    #[test]
    #[should_panic(expected = "chronic_window must be > acute_window")]
    fn rejects_chronic_leq_acute() {
        RollingParams::with_windows(28, 7);
    }
}
