use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::orchestrator::RunReport;

/// JSON shape of a run report. Targets are serialized in the spec/ledger
/// token vocabulary so the document stays greppable next to the ledger file.
#[derive(Debug, Serialize)]
pub struct ReportDocument {
    pub newly_booked: Vec<String>,
    pub already_booked: Vec<String>,
    pub failed: Vec<FailedTarget>,
    pub unrecorded: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FailedTarget {
    pub target: String,
    pub sports_tried: Vec<String>,
    pub reason: Option<String>,
}

impl ReportDocument {
    pub fn from_report(report: &RunReport) -> Self {
        ReportDocument {
            newly_booked: report.newly_booked.iter().map(|t| t.to_string()).collect(),
            already_booked: report
                .already_booked
                .iter()
                .map(|t| t.to_string())
                .collect(),
            failed: report
                .failed
                .iter()
                .map(|o| FailedTarget {
                    target: o.target.to_string(),
                    sports_tried: o.sports_tried.iter().map(|s| s.to_string()).collect(),
                    reason: o.reason.clone(),
                })
                .collect(),
            unrecorded: report.unrecorded.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Formats the run report as the human-readable multi-line summary.
pub fn format_run_report(report: &RunReport) -> String {
    let mut lines = Vec::new();

    if !report.newly_booked.is_empty() {
        lines.push(format!(
            "✓ Successfully booked {} slot(s):",
            report.newly_booked.len()
        ));
        for target in &report.newly_booked {
            lines.push(format!("  - {}", target));
        }
    }

    if !report.failed.is_empty() {
        lines.push(format!(
            "✗ No available slots for {} target(s):",
            report.failed.len()
        ));
        for outcome in &report.failed {
            lines.push(format!(
                "  - {}: {}",
                outcome.target,
                outcome.reason.as_deref().unwrap_or("no availability")
            ));
        }
    }

    if !report.already_booked.is_empty() {
        lines.push(format!(
            "⊘ Skipped {} already-booked slot(s):",
            report.already_booked.len()
        ));
        for target in &report.already_booked {
            lines.push(format!("  - {}", target));
        }
    }

    if !report.unrecorded.is_empty() {
        lines.push(format!(
            "! {} booking(s) stand but could not be written to the ledger:",
            report.unrecorded.len()
        ));
        for target in &report.unrecorded {
            lines.push(format!("  - {}", target));
        }
    }

    if lines.is_empty() {
        "No bookings to process.".to_string()
    } else {
        lines.join("\n")
    }
}

/// Writes the JSON report document to a file.
pub fn write_report_to_file(
    report: &RunReport,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &ReportDocument::from_report(report))?;
    Ok(())
}
