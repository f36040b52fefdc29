//! Timeline normalizer — irregular session entries to a gap-free daily series.
//!
//! Entries arrive unordered and sparse; the output is one slot per calendar
//! day over `[min date, max date]`, strictly increasing, with zero load on
//! days that have no session.

use crate::domain::{DailyLoadSeries, SessionEntry};
use crate::engine::EngineError;

/// Build the daily load series for one player's entries.
///
/// Same-date sessions are summed into a single daily slot before anything
/// is indexed by date — a unique-date reindex would silently keep only one
/// of them. Gap days hold `0.0`.
pub fn normalize(player: &str, entries: &[SessionEntry]) -> Result<DailyLoadSeries, EngineError> {
    if entries.is_empty() {
        return Err(EngineError::NoSessions {
            player: player.to_string(),
        });
    }

    let start = entries.iter().map(|e| e.date).min().unwrap();
    let end = entries.iter().map(|e| e.date).max().unwrap();
    let n_days = (end - start).num_days() as usize + 1;

    let mut loads = vec![0.0; n_days];
    for entry in entries {
        let slot = (entry.date - start).num_days() as usize;
        loads[slot] += entry.session_load;
    }

    Ok(DailyLoadSeries {
        player: player.to_string(),
        start,
        loads,
    })
}
