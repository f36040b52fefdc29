//! Session entry — the fundamental training data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on a single session's duration in minutes.
pub const MAX_SESSION_MINUTES: u32 = 120;

/// RPE (Rate of Perceived Exertion) bounds, inclusive.
pub const RPE_MIN: u8 = 1;
pub const RPE_MAX: u8 = 10;

/// Entry validation failures. Surfaced to the caller immediately; no
/// partial write ever happens on a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("player name is empty or blank")]
    EmptyPlayer,

    #[error("minutes {0} exceeds the maximum of {MAX_SESSION_MINUTES}")]
    MinutesOutOfRange(u32),

    #[error("rpe {0} is outside {RPE_MIN}..={RPE_MAX}")]
    RpeOutOfRange(u8),
}

/// One recorded training session for one player on one calendar day.
///
/// `session_load = minutes * rpe` is computed once at construction and
/// stored redundantly so aggregation never recomputes it. Multiple
/// sessions per (player, date) are allowed; the timeline normalizer sums
/// them into a single daily value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub date: NaiveDate,
    pub player: String,
    pub minutes: u32,
    pub rpe: u8,
    pub session_load: f64,
}

impl SessionEntry {
    /// Validate inputs and construct an entry with its derived load.
    ///
    /// The player name is trimmed; an empty or all-whitespace name is
    /// rejected. `minutes` may be zero (a logged rest or travel day
    /// contributes zero load).
    pub fn new(
        date: NaiveDate,
        player: &str,
        minutes: u32,
        rpe: u8,
    ) -> Result<Self, ValidationError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(ValidationError::EmptyPlayer);
        }
        if minutes > MAX_SESSION_MINUTES {
            return Err(ValidationError::MinutesOutOfRange(minutes));
        }
        if !(RPE_MIN..=RPE_MAX).contains(&rpe) {
            return Err(ValidationError::RpeOutOfRange(rpe));
        }

        Ok(Self {
            date,
            player: player.to_string(),
            minutes,
            rpe,
            session_load: f64::from(minutes) * f64::from(rpe),
        })
    }

    /// Check the stored-load invariant: `session_load == minutes * rpe`.
    ///
    /// Persisted rows are re-checked on load; a row that fails is repaired
    /// with [`SessionEntry::recompute_load`].
    pub fn is_consistent(&self) -> bool {
        (self.session_load - f64::from(self.minutes) * f64::from(self.rpe)).abs() < f64::EPSILON
    }

    /// Recompute the derived load from minutes and RPE.
    pub fn recompute_load(&mut self) {
        self.session_load = f64::from(self.minutes) * f64::from(self.rpe);
    }
}
