//! LoadLab CLI — record sessions, compute injury risk, export reports.
//!
//! Commands:
//! - `add` — record a training session and persist the store
//! - `report` — compute a player's ACWR report and save the artifact bundle
//! - `players` — roster listing with per-player summary stats
//! - `remove` — delete a player's entire history (preview without --confirm)
//! - `seed` — generate a synthetic demo roster
//! - `store status` — entry count, players, and date ranges
//!
//! The store path is an explicit argument on every command; there is no
//! ambient default location beyond the working directory. Every mutation
//! saves the store and the next query recomputes from scratch.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use loadlab_core::{EngineError, RecordStore, RollingParams, MIN_SESSIONS_FOR_RISK};
use loadlab_report::{report_for_player, save_artifacts, PlayerSummary};

#[derive(Parser)]
#[command(name = "loadlab", about = "LoadLab CLI — training load and injury-risk tracking")]
struct Cli {
    /// Path to the session store CSV.
    #[arg(long, global = true, default_value = "sessions.csv")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a training session.
    Add {
        /// Player name.
        #[arg(long)]
        player: String,

        /// Session date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Session duration in minutes (0–120).
        #[arg(long)]
        minutes: u32,

        /// Rate of Perceived Exertion (1–10).
        #[arg(long)]
        rpe: u8,
    },
    /// Compute a player's risk report and save the artifact bundle.
    Report {
        /// Player name.
        #[arg(long)]
        player: String,

        /// Acute window in days.
        #[arg(long, default_value_t = 7)]
        acute: usize,

        /// Chronic window in days.
        #[arg(long, default_value_t = 28)]
        chronic: usize,

        /// Output directory for the artifact bundle.
        #[arg(long, default_value = "reports")]
        output_dir: PathBuf,
    },
    /// List all players with summary stats.
    Players,
    /// Delete a player's entire session history.
    Remove {
        /// Player name.
        #[arg(long)]
        player: String,

        /// Actually delete (without this flag, only previews what would be removed).
        #[arg(long, default_value_t = false)]
        confirm: bool,
    },
    /// Generate a synthetic demo roster.
    Seed {
        /// Number of players.
        #[arg(long, default_value_t = 3)]
        players: usize,

        /// Number of calendar days of history.
        #[arg(long, default_value_t = 60)]
        days: i64,

        /// RNG seed for reproducible rosters.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Overwrite an existing non-empty store.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Store management commands.
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Report entry count, players, and per-player date ranges.
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store_path = cli.store;

    match cli.command {
        Commands::Add {
            player,
            date,
            minutes,
            rpe,
        } => run_add(&store_path, &player, date.as_deref(), minutes, rpe),
        Commands::Report {
            player,
            acute,
            chronic,
            output_dir,
        } => run_report(&store_path, &player, acute, chronic, &output_dir),
        Commands::Players => run_players(&store_path),
        Commands::Remove { player, confirm } => run_remove(&store_path, &player, confirm),
        Commands::Seed {
            players,
            days,
            seed,
            force,
        } => run_seed(&store_path, players, days, seed, force),
        Commands::Store { action } => match action {
            StoreAction::Status => run_store_status(&store_path),
        },
    }
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    Ok(date
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive()))
}

fn run_add(
    store_path: &Path,
    player: &str,
    date: Option<&str>,
    minutes: u32,
    rpe: u8,
) -> Result<()> {
    let date = parse_date(date)?;

    let mut store = RecordStore::load(store_path);
    let entry = store.add_session(date, player, minutes, rpe)?;
    println!(
        "Recorded {} on {}: {} min × RPE {} = load {:.0}",
        entry.player, entry.date, entry.minutes, entry.rpe, entry.session_load
    );
    store.save(store_path)?;

    Ok(())
}

fn run_report(
    store_path: &Path,
    player: &str,
    acute: usize,
    chronic: usize,
    output_dir: &Path,
) -> Result<()> {
    if acute < 1 {
        bail!("--acute must be >= 1");
    }
    if chronic <= acute {
        bail!("--chronic must be greater than --acute");
    }
    let params = RollingParams::with_windows(acute, chronic);

    let store = RecordStore::load(store_path);
    let report = match report_for_player(&store, player, &params) {
        Ok(report) => report,
        Err(EngineError::NoSessions { .. }) => {
            eprintln!("No sessions recorded for '{player}'. Add some with `loadlab add`.");
            std::process::exit(1);
        }
        Err(EngineError::InsufficientSessions { have, need, .. }) => {
            eprintln!(
                "'{player}' has {have} session(s); risk computation needs at least {need}. \
                 Keep logging — no report generated."
            );
            std::process::exit(1);
        }
    };

    print_report_summary(&report);

    let run_dir = save_artifacts(&report, output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn print_report_summary(report: &loadlab_report::RiskReport) {
    println!("Player: {}", report.player);
    println!(
        "History: {} to {} ({} days, {} sessions)",
        report.summary.first_date,
        report.summary.last_date,
        report.len(),
        report.summary.session_count
    );
    println!("Total load: {:.0}", report.summary.total_load);
    println!("Average RPE: {:.1}", report.summary.avg_rpe);
    println!("Current risk (ACWR): {:.2}", report.current_risk);
}

fn run_players(store_path: &Path) -> Result<()> {
    let store = RecordStore::load(store_path);
    if store.is_empty() {
        println!("Store is empty. Add sessions with `loadlab add` or `loadlab seed`.");
        return Ok(());
    }

    println!("{:<16} {:>8} {:>12} {:>8}  Range", "Player", "Sessions", "Total load", "Avg RPE");
    for player in store.players() {
        let entries = store.for_player(&player);
        // players() only yields names that have entries
        let summary = PlayerSummary::compute(&entries).unwrap();
        println!(
            "{:<16} {:>8} {:>12.0} {:>8.1}  {} to {}",
            player,
            summary.session_count,
            summary.total_load,
            summary.avg_rpe,
            summary.first_date,
            summary.last_date
        );
    }

    Ok(())
}

fn run_remove(store_path: &Path, player: &str, confirm: bool) -> Result<()> {
    let mut store = RecordStore::load(store_path);
    let count = store.for_player(player).len();

    if count == 0 {
        println!("No entries for '{player}' — nothing to remove.");
        return Ok(());
    }

    if !confirm {
        println!("Would remove {count} entries for '{player}'. Re-run with --confirm to delete.");
        return Ok(());
    }

    let removed = store.remove_player(player);
    store.save(store_path)?;
    println!("Removed {removed} entries for '{player}'.");

    Ok(())
}

/// Demo roster names.
const SEED_NAMES: &[&str] = &["Ayse", "Deniz", "Kaan", "Elif", "Mert", "Zeynep"];

fn run_seed(store_path: &Path, players: usize, days: i64, seed: u64, force: bool) -> Result<()> {
    if players == 0 || players > SEED_NAMES.len() {
        bail!("--players must be between 1 and {}", SEED_NAMES.len());
    }

    let existing = RecordStore::load(store_path);
    if !existing.is_empty() && !force {
        bail!(
            "store at {} already has {} entries; pass --force to overwrite",
            store_path.display(),
            existing.len()
        );
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = RecordStore::new();
    let start = chrono::Local::now().date_naive() - chrono::Duration::days(days - 1);

    for name in SEED_NAMES.iter().take(players) {
        for offset in 0..days {
            // Roughly three sessions out of four, occasionally doubled.
            if !rng.gen_bool(0.75) {
                continue;
            }
            let date = start + chrono::Duration::days(offset);
            store.add_session(date, name, rng.gen_range(30..=120), rng.gen_range(1..=10))?;
            if rng.gen_bool(0.1) {
                store.add_session(date, name, rng.gen_range(15..=45), rng.gen_range(1..=6))?;
            }
        }
    }

    store.save(store_path)?;
    println!(
        "Seeded {} sessions for {} players over {} days into {}",
        store.len(),
        players,
        days,
        store_path.display()
    );
    println!(
        "Players need at least {MIN_SESSIONS_FOR_RISK} sessions before `loadlab report` works."
    );

    Ok(())
}

fn run_store_status(store_path: &Path) -> Result<()> {
    let store = RecordStore::load(store_path);
    println!("Store: {}", store_path.display());
    println!("Entries: {}", store.len());
    println!("Players: {}", store.players().len());

    for player in store.players() {
        let entries = store.for_player(&player);
        let first = entries.iter().map(|e| e.date).min().unwrap();
        let last = entries.iter().map(|e| e.date).max().unwrap();
        println!("  {player}: {} entries, {first} to {last}", entries.len());
    }

    Ok(())
}
