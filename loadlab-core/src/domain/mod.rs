//! Domain types for LoadLab

pub mod entry;
pub mod series;

pub use entry::{SessionEntry, ValidationError, MAX_SESSION_MINUTES, RPE_MAX, RPE_MIN};
pub use series::{DailyLoadSeries, RiskSeries};

/// Player identifier type alias
pub type Player = String;
