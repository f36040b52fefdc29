//! Derived per-player series — the gap-free daily timeline and the
//! aligned risk sequences computed from it.
//!
//! Both types are ephemeral: rebuilt from the record store on every query,
//! never cached, never mutated in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Continuous daily load series for one player.
///
/// Spans `[start, start + loads.len() - 1]` at daily granularity with no
/// gaps: a calendar day with no recorded session holds `0.0`. Constructed
/// only by the timeline normalizer, which guarantees at least one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLoadSeries {
    pub player: String,
    pub start: NaiveDate,
    pub loads: Vec<f64>,
}

impl DailyLoadSeries {
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Calendar date of slot `index`.
    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + chrono::Duration::days(index as i64)
    }

    /// Last date in the span.
    pub fn end(&self) -> NaiveDate {
        self.date_at(self.len().saturating_sub(1))
    }

    /// Iterate the date index in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len()).map(|i| self.date_at(i))
    }

    /// Iterate `(date, load)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.loads
            .iter()
            .enumerate()
            .map(|(i, load)| (self.date_at(i), *load))
    }

    pub fn total_load(&self) -> f64 {
        self.loads.iter().sum()
    }
}

/// Acute/chronic rolling means and their ratio, aligned 1:1 with the
/// date index of the [`DailyLoadSeries`] they were computed from.
///
/// `None` marks an undefined point: not enough trailing history for the
/// window, or a zero chronic mean. Undefined is never encoded as zero,
/// NaN, or infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSeries {
    pub acute: Vec<Option<f64>>,
    pub chronic: Vec<Option<f64>>,
    pub acwr: Vec<Option<f64>>,
}

impl RiskSeries {
    pub fn len(&self) -> usize {
        self.acwr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acwr.is_empty()
    }

    /// ACWR at the last date in the series, if defined.
    ///
    /// The reporter maps `None` to a `0.0` risk score; that fallback is
    /// presentation policy and deliberately not applied here.
    pub fn current_acwr(&self) -> Option<f64> {
        self.acwr.last().copied().flatten()
    }
}
