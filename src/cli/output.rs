//! Output formatting for CLI

use crate::RunFailure;
use crate::models::Report;
use crate::services::format::format_size;
use std::fmt::Write;

/// Warning lists longer than this are truncated.
const MAX_LISTED_WARNINGS: usize = 10;
/// Number of warnings shown once truncated.
const TRUNCATED_WARNINGS: usize = 5;

fn rule() -> String {
    "=".repeat(60)
}

/// Render a report as human-readable text
pub fn format_report(report: &Report) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "               COMPRESSION REPORT");
    let _ = writeln!(out, "{}", rule());

    let _ = writeln!(out, "\nSummary:");
    let _ = writeln!(out, "  Output File: {}", summary.output_file);
    let _ = writeln!(out, "  Files Processed: {}", summary.files_processed);
    let _ = writeln!(out, "  Original Size: {}", format_size(summary.original_size));
    let _ = writeln!(
        out,
        "  Compressed Size: {}",
        format_size(summary.compressed_size)
    );
    let _ = writeln!(out, "  Compression Ratio: {}%", summary.compression_ratio);
    let _ = writeln!(out, "  Duration: {:.2}s", summary.duration_secs);
    let throughput = summary
        .throughput_bytes_per_sec
        .map_or_else(|| "n/a".to_string(), |bps| format!("{}/s", format_size(bps)));
    let _ = writeln!(out, "  Throughput: {throughput}");
    let _ = writeln!(out, "  SHA-256: {}", summary.checksum);
    let _ = writeln!(out, "  Content SHA-256: {}", summary.content_checksum);

    if report.statistics.errors > 0 || report.statistics.warnings > 0 {
        let _ = writeln!(out, "\nIssues:");
        let _ = writeln!(out, "  Errors: {}", report.statistics.errors);
        let _ = writeln!(out, "  Warnings: {}", report.statistics.warnings);
    }

    let env = &report.environment;
    let _ = writeln!(out, "\nSystem:");
    let _ = writeln!(out, "  Platform: {} {}", env.platform, env.arch);
    let _ = writeln!(out, "  Runtime: {}", env.runtime);
    if let Some(memory) = env.memory_bytes {
        let _ = writeln!(out, "  Memory Used: {}", format_size(memory));
    }

    write_errors(&mut out, &report.errors);
    write_warnings(&mut out, &report.warnings);

    let _ = writeln!(out, "\n{}", rule());
    out
}

/// Render a failed run: the cause, then the accumulated diagnostics
pub fn format_failure(failure: &RunFailure) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nFatal Error: {}", failure.error);

    let errors = &failure.diagnostics.errors;
    if !errors.is_empty() {
        let _ = writeln!(out, "\nDetailed Errors:");
        for (index, error) in errors.iter().enumerate() {
            let _ = writeln!(out, "  {}. {error}", index + 1);
        }
    }

    write_warnings(&mut out, &failure.diagnostics.warnings);
    out
}

fn write_errors(out: &mut String, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    let _ = writeln!(out, "\nErrors:");
    for (index, error) in errors.iter().enumerate() {
        let _ = writeln!(out, "  {}. {error}", index + 1);
    }
}

fn write_warnings(out: &mut String, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    let shown = if warnings.len() > MAX_LISTED_WARNINGS {
        let _ = writeln!(
            out,
            "\nWarnings: {} warnings (showing first {TRUNCATED_WARNINGS}):",
            warnings.len()
        );
        &warnings[..TRUNCATED_WARNINGS]
    } else {
        let _ = writeln!(out, "\nWarnings:");
        warnings
    };

    for (index, warning) in shown.iter().enumerate() {
        let _ = writeln!(out, "  {}. {warning}", index + 1);
    }
}
