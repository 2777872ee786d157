//! Resolution Report - plain text rendering
//!
//! One paragraph per record, keyed by row number, under a header naming the
//! source document.

use std::fmt::Write;

use super::types::ResolutionSummary;

/// Header line naming the source
pub fn document_header(source: &str) -> String {
    format!("Resolution of document {}\n", source)
}

/// One record's paragraph
pub fn render_paragraph(summary: &ResolutionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Resolution of record {}:", summary.row);
    let _ = writeln!(out, "Event: {} - {}", summary.event_type, summary.event_class.as_str());
    let _ = writeln!(
        out,
        "Schedule: {} - {}",
        summary.timestamp.format("%Y-%m-%d %H:%M:%S"),
        summary.schedule.as_str()
    );
    let _ = writeln!(out, "Domain: {} - {}", summary.domain, summary.domain_class.as_str());
    let _ = writeln!(
        out,
        "Hash present: {} - {}",
        summary.file_hash.as_deref().unwrap_or("-"),
        if summary.hash_present { "Present" } else { "Not available" }
    );
    let _ = writeln!(out, "Overall classification: {}", summary.verdict());
    if let (Some(tier), Some(score)) = (summary.anomaly_tier, summary.anomaly_score) {
        let _ = writeln!(out, "Anomaly: {} (score {:.4})", tier, score);
    }
    out
}

/// Full document
pub fn render_report(source: &str, summaries: &[ResolutionSummary]) -> String {
    let mut out = document_header(source);
    for summary in summaries {
        out.push('\n');
        out.push_str(&render_paragraph(summary));
    }
    out
}
