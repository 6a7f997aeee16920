/*!
 * Console summary of a finished scan
 *
 * Rendered with the tabled library so the front end can print a compact
 * table after the report has been written.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::report::ScanStatistics;
use crate::utils::format_number;

/// Everything shown in the summary table
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Where the report went
    pub destination: String,
    pub duration: Duration,
    pub statistics: ScanStatistics,
    /// Lines of the complete report text
    pub report_lines: usize,
    /// Chars of the complete report text
    pub report_chars: usize,
}

impl ScanSummary {
    /// Collect summary figures from a rendered report
    pub fn new(
        destination: impl Into<String>,
        duration: Duration,
        statistics: ScanStatistics,
        report_text: &str,
    ) -> Self {
        Self {
            destination: destination.into(),
            duration,
            statistics,
            report_lines: report_text.lines().count(),
            report_chars: report_text.chars().count(),
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    key: String,

    #[tabled(rename = "Value")]
    value: String,
}

fn row(key: &str, value: String) -> SummaryRow {
    SummaryRow {
        key: key.to_string(),
        value,
    }
}

/// Render the summary table
pub fn render_summary(summary: &ScanSummary) -> String {
    let stats = &summary.statistics;
    let mut rows = vec![
        row("📂 Output", summary.destination.clone()),
        row("⏱️ Process Time", format!("{:.4?}", summary.duration)),
        row("📁 Directories", format_number(stats.directories)),
        row(
            "📄 Files Listed",
            format!(
                "{} ({} path only)",
                format_number(stats.files_listed),
                format_number(stats.path_only)
            ),
        ),
        row("📝 Files Read", format_number(stats.files_read)),
    ];

    if stats.binary_skipped > 0 {
        rows.push(row("🧱 Binary Skipped", format_number(stats.binary_skipped)));
    }
    if stats.truncated > 0 {
        rows.push(row("✂️ Truncated", format_number(stats.truncated)));
    }
    if stats.read_errors > 0 {
        rows.push(row("⚠️ Read Errors", format_number(stats.read_errors)));
    }

    rows.push(row(
        "📦 Report Size",
        format!(
            "{} lines, {} chars",
            format_number(summary.report_lines),
            format_number(summary.report_chars)
        ),
    ));

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));

    format!("✅  SCAN COMPLETE\n{}", table)
}

/// Print the summary table to stdout
pub fn print_summary(summary: &ScanSummary) {
    println!("\n{}", render_summary(summary));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_rows_only_when_nonzero() {
        let clean = ScanSummary::new(
            "out.txt",
            Duration::from_millis(5),
            ScanStatistics {
                files_listed: 3,
                files_read: 2,
                path_only: 1,
                ..ScanStatistics::default()
            },
            "a\nb\n",
        );
        let rendered = render_summary(&clean);

        assert!(rendered.contains("out.txt"));
        assert!(rendered.contains("3 (1 path only)"));
        assert!(rendered.contains("2 lines, 4 chars"));
        assert!(!rendered.contains("Read Errors"));

        let failing = ScanSummary {
            statistics: ScanStatistics {
                read_errors: 2,
                ..ScanStatistics::default()
            },
            ..clean
        };
        assert!(render_summary(&failing).contains("Read Errors"));
    }
}
