//! Session record store — owns the raw entries and their CSV round-trip.
//!
//! Persistence policy:
//! - Writes are atomic (write to .tmp, rename into place)
//! - A missing store file loads as an empty store
//! - A corrupt store file is quarantined ({path}.quarantined) and loads
//!   as an empty store, so the bad data stays inspectable
//! - Rows whose stored `session_load` disagrees with `minutes * rpe` are
//!   repaired on load
//!
//! Callers pass the store (and its path) explicitly; there is no ambient
//! global file. The store is single-writer: concurrent mutation is not
//! supported and callers in a concurrent context must add their own
//! serialization.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{SessionEntry, ValidationError};

/// Errors from persisting the store. Load never fails — corruption
/// degrades to an empty store by policy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// In-memory set of session entries with CSV persistence.
///
/// Entries are append-only from the engine's perspective; the only
/// deletion is whole-player removal.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    entries: Vec<SessionEntry>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-constructed (and therefore validated) entry.
    pub fn add(&mut self, entry: SessionEntry) {
        self.entries.push(entry);
    }

    /// Validate, construct, and append a session in one step.
    ///
    /// On a validation error nothing is written.
    pub fn add_session(
        &mut self,
        date: NaiveDate,
        player: &str,
        minutes: u32,
        rpe: u8,
    ) -> Result<&SessionEntry, ValidationError> {
        let entry = SessionEntry::new(date, player, minutes, rpe)?;
        self.entries.push(entry);
        Ok(self.entries.last().unwrap())
    }

    /// Remove every entry for `player`. Returns the number removed;
    /// zero (not an error) for an unknown player.
    pub fn remove_player(&mut self, player: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.player != player);
        before - self.entries.len()
    }

    pub fn all(&self) -> &[SessionEntry] {
        &self.entries
    }

    /// Entries for one player, in insertion order. The timeline
    /// normalizer sorts by date itself; other callers must not rely on
    /// any ordering.
    pub fn for_player(&self, player: &str) -> Vec<SessionEntry> {
        self.entries
            .iter()
            .filter(|e| e.player == player)
            .cloned()
            .collect()
    }

    /// Distinct player names in order of first appearance.
    ///
    /// The ordering is presentation-only (roster listings); nothing in
    /// the engine depends on it.
    pub fn players(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !seen.iter().any(|p| p == &entry.player) {
                seen.push(entry.player.clone());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Content hash of the store, stamped into exported report manifests
    /// so an artifact can be traced back to the exact data it came from.
    pub fn dataset_hash(&self) -> String {
        let json = serde_json::to_vec(&self.entries).expect("SessionEntry serialization failed");
        blake3::hash(&json).to_hex().to_string()
    }

    /// Persist to CSV with columns `date,player,minutes,rpe,session_load`.
    ///
    /// Atomic: writes `{path}.tmp` and renames into place.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_extension("csv.tmp");
        {
            let mut wtr = csv::Writer::from_path(&tmp_path)?;
            for entry in &self.entries {
                wtr.serialize(entry)?;
            }
            wtr.flush()?;
        }

        fs::rename(&tmp_path, path).map_err(|e| {
            // Clean up the temp file on rename failure
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io(e)
        })?;

        Ok(())
    }

    /// Load from CSV. Infallible by policy: a missing file yields an
    /// empty store, and a corrupt file is quarantined and yields an
    /// empty store rather than failing the caller.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let mut rdr = match csv::Reader::from_path(path) {
            Ok(rdr) => rdr,
            Err(e) => {
                quarantine(path, &e.to_string());
                return Self::default();
            }
        };

        let mut entries = Vec::new();
        for row in rdr.deserialize::<SessionEntry>() {
            match row {
                Ok(mut entry) => {
                    if !entry.is_consistent() {
                        eprintln!(
                            "WARNING: stored session_load for {} on {} disagrees with minutes*rpe; repairing",
                            entry.player, entry.date
                        );
                        entry.recompute_load();
                    }
                    entries.push(entry);
                }
                Err(e) => {
                    quarantine(path, &e.to_string());
                    return Self::default();
                }
            }
        }

        Self { entries }
    }
}

/// Rename a corrupt store file out of the way so the next save starts clean.
fn quarantine(path: &Path, reason: &str) {
    eprintln!(
        "WARNING: quarantining corrupt store file {}: {reason}",
        path.display()
    );
    let quarantine_path = path.with_extension("csv.quarantined");
    let _ = fs::rename(path, &quarantine_path);
}
