//! Report export — JSON, CSV, and Markdown artifact generation.
//!
//! Three formats for one `RiskReport`:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: the date-indexed risk series for external analysis tools
//! - **Markdown**: human-readable report with the current risk score
//!
//! All persisted artifacts include a `schema_version` field. Versions
//! newer than this build understands are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::summary::{RiskReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `RiskReport` to pretty JSON.
pub fn export_json(report: &RiskReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize RiskReport to JSON")
}

/// Deserialize a `RiskReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<RiskReport> {
    let report: RiskReport =
        serde_json::from_str(json).context("failed to deserialize RiskReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the risk series as CSV.
///
/// Columns: date, load, acute, chronic, acwr. Undefined points render as
/// empty fields, not as 0 or NaN.
pub fn export_risk_csv(report: &RiskReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "load", "acute", "chronic", "acwr"])?;

    for i in 0..report.len() {
        wtr.write_record([
            report.dates[i].to_string(),
            format!("{:.1}", report.loads[i]),
            fmt_opt(report.acute[i]),
            fmt_opt(report.chronic[i]),
            fmt_opt(report.acwr[i]),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => String::new(),
    }
}

// ─── Markdown report ────────────────────────────────────────────────

/// Number of trailing days shown in the Markdown risk table.
const MARKDOWN_TAIL_DAYS: usize = 14;

/// Render a human-readable Markdown report.
///
/// Carries the report contract: the current risk scalar to two decimal
/// places and the generation timestamp.
pub fn render_markdown(report: &RiskReport) -> String {
    let (band_lo, band_hi) = report.params.safe_band;
    let mut out = format!(
        "# Training Load Report — {}\n\n\
Generated: {}\n\n\
Dataset: `{}`\n\n\
## Summary\n\
- Sessions: {}\n\
- Total load: {:.0}\n\
- Average RPE: {:.1}\n\
- History: {} to {}\n\
- Current risk (ACWR): **{:.2}**\n\
- Risk threshold: {:.2} / safe band {:.2}–{:.2}\n",
        report.player,
        report.generated_at.format("%Y-%m-%d %H:%M:%S"),
        report.dataset_hash,
        report.summary.session_count,
        report.summary.total_load,
        report.summary.avg_rpe,
        report.summary.first_date,
        report.summary.last_date,
        report.current_risk,
        report.params.risk_upper_threshold,
        band_lo,
        band_hi,
    );

    out.push_str(&format!(
        "\n## Last {MARKDOWN_TAIL_DAYS} days\n\n\
| Date | Load | Acute ({}d) | Chronic ({}d) | ACWR | Flag |\n\
|------|------|-------------|---------------|------|------|\n",
        report.params.acute_window, report.params.chronic_window
    ));

    let from = report.len().saturating_sub(MARKDOWN_TAIL_DAYS);
    for i in from..report.len() {
        out.push_str(&format!(
            "| {} | {:.0} | {} | {} | {} | {} |\n",
            report.dates[i],
            report.loads[i],
            fmt_cell(report.acute[i]),
            fmt_cell(report.chronic[i]),
            fmt_cell(report.acwr[i]),
            risk_flag(report.acwr[i], report.params.risk_upper_threshold, (band_lo, band_hi)),
        ));
    }

    out
}

fn fmt_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "—".to_string(),
    }
}

/// Classify one ACWR point against the threshold and safe band.
fn risk_flag(acwr: Option<f64>, threshold: f64, band: (f64, f64)) -> &'static str {
    match acwr {
        None => "—",
        Some(v) if v > threshold => "HIGH",
        Some(v) if v >= band.0 && v <= band.1 => "ok",
        Some(v) if v < band.0 => "low",
        Some(_) => "elevated",
    }
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one report.
///
/// Creates a directory named `{player}_{timestamp}/` under `output_dir`
/// containing:
/// - `manifest.json` — the full `RiskReport`
/// - `risk.csv` — the date-indexed risk series
/// - `report.md` — the rendered Markdown report
/// - `chart.json` — render-ready `ChartData` for a plotting surface
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &RiskReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        report.player.replace(char::is_whitespace, "_"),
        report.generated_at.format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(report)?;
    std::fs::write(run_dir.join("manifest.json"), &json)?;

    let risk_csv = export_risk_csv(report)?;
    std::fs::write(run_dir.join("risk.csv"), &risk_csv)?;

    let markdown = render_markdown(report);
    std::fs::write(run_dir.join("report.md"), &markdown)?;

    let chart = crate::chart::ChartData::from_report(report);
    let chart_json =
        serde_json::to_string_pretty(&chart).context("failed to serialize ChartData to JSON")?;
    std::fs::write(run_dir.join("chart.json"), &chart_json)?;

    Ok(run_dir)
}

/// Load a `RiskReport` back from an artifact directory's manifest.json.
pub fn load_artifacts(run_dir: &Path) -> Result<RiskReport> {
    let manifest_path = run_dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}
