//! Engine entry points — wire store → timeline normalizer → rolling aggregator.
//!
//! Every query recomputes from the store's full history for that player.
//! No state is kept between calls; a store mutation simply makes the next
//! query see different data. This is a design simplification, not an
//! optimization target — callers adding a cache must invalidate it on
//! every store mutation.

use thiserror::Error;

use crate::domain::{DailyLoadSeries, RiskSeries};
use crate::rolling::{compute_risk, RollingParams};
use crate::store::RecordStore;
use crate::timeline::normalize;

/// Minimum recorded sessions before risk computation is attempted.
///
/// Below this the normalizer/aggregator are skipped entirely; the caller
/// shows the raw sessions without a risk series.
pub const MIN_SESSIONS_FOR_RISK: usize = 2;

/// Errors from the per-player computation pass. None of these are fatal
/// to the application — they disable risk output for one player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no sessions recorded for player '{player}'")]
    NoSessions { player: String },

    #[error("player '{player}' has {have} session(s); risk computation needs at least {need}")]
    InsufficientSessions {
        player: String,
        have: usize,
        need: usize,
    },
}

/// Normalized daily timeline for one player, straight from the store.
pub fn daily_series_for_player(
    store: &RecordStore,
    player: &str,
) -> Result<DailyLoadSeries, EngineError> {
    normalize(player, &store.for_player(player))
}

/// Full recomputation pass: daily timeline plus aligned risk series.
///
/// Enforces the minimum-session policy before touching the normalizer.
pub fn risk_for_player(
    store: &RecordStore,
    player: &str,
    params: &RollingParams,
) -> Result<(DailyLoadSeries, RiskSeries), EngineError> {
    let entries = store.for_player(player);
    if entries.is_empty() {
        return Err(EngineError::NoSessions {
            player: player.to_string(),
        });
    }
    if entries.len() < MIN_SESSIONS_FOR_RISK {
        return Err(EngineError::InsufficientSessions {
            player: player.to_string(),
            have: entries.len(),
            need: MIN_SESSIONS_FOR_RISK,
        });
    }

    let daily = normalize(player, &entries)?;
    let risk = compute_risk(&daily, params);
    Ok((daily, risk))
}
