//! Output formatting for the run summary.
//!
//! The summary goes to stderr; it is informational only and never part of
//! the files written.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::layout::EmitReport;
use crate::plan::ChangeKind;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Record row for table display.
#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "File")]
    file: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats an emit report for display.
    #[must_use]
    pub fn format_report(&self, report: &EmitReport) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Text => Self::format_report_text(report),
        }
    }

    /// Formats a report as text.
    fn format_report_text(report: &EmitReport) -> String {
        if report.is_empty() {
            return format!(
                "{} No resource changes in plan; {} is empty.\n",
                "✓".green(),
                report.output_dir.display()
            );
        }

        let mut output = String::new();

        let rows: Vec<RecordRow> = report
            .records
            .iter()
            .map(|r| RecordRow {
                index: r.index,
                kind: Self::format_kind(r.kind),
                address: Self::truncate(&r.address, 60),
                file: r.file.display().to_string(),
            })
            .collect();
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        let _ = write!(
            output,
            "\nWrote {} files to {}: {} created, {} updated, {} deleted",
            report.files_written,
            report.output_dir.display(),
            report.count(ChangeKind::Create).to_string().green(),
            report.count(ChangeKind::Update).to_string().yellow(),
            report.count(ChangeKind::Delete).to_string().red(),
        );
        let empty = report.count(ChangeKind::Empty);
        if empty > 0 {
            let _ = write!(output, ", {empty} empty");
        }
        output.push('\n');

        output
    }

    /// Formats a change kind with color.
    fn format_kind(kind: ChangeKind) -> String {
        match kind {
            ChangeKind::Create => "+ create".green().to_string(),
            ChangeKind::Update => "~ update".yellow().to_string(),
            ChangeKind::Delete => "- delete".red().to_string(),
            ChangeKind::Empty => "  empty".dimmed().to_string(),
        }
    }

    /// Truncates a string to a maximum length.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
            format!("{kept}...")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::EmittedRecord;
    use std::path::PathBuf;

    fn sample_report() -> EmitReport {
        EmitReport {
            output_dir: PathBuf::from("diff"),
            records: vec![
                EmittedRecord {
                    index: 0,
                    address: "aws_instance.web".to_string(),
                    file: PathBuf::from("aws_instance.web.json"),
                    kind: ChangeKind::Create,
                },
                EmittedRecord {
                    index: 1,
                    address: "aws_s3_bucket.logs".to_string(),
                    file: PathBuf::from("aws_s3_bucket.logs.json"),
                    kind: ChangeKind::Delete,
                },
            ],
            files_written: 4,
        }
    }

    #[test]
    fn test_text_report_lists_records() {
        colored::control::set_override(false);
        let text = OutputFormatter::new(OutputFormat::Text).format_report(&sample_report());

        assert!(text.contains("aws_instance.web.json"));
        assert!(text.contains("Wrote 4 files to diff: 1 created, 0 updated, 1 deleted"));
    }

    #[test]
    fn test_json_report_is_parseable() {
        let json = OutputFormatter::new(OutputFormat::Json).format_report(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["files_written"], 4);
        assert_eq!(value["records"][1]["kind"], "delete");
    }

    #[test]
    fn test_empty_report() {
        let report = EmitReport {
            output_dir: PathBuf::from("out"),
            ..EmitReport::default()
        };
        let text = OutputFormatter::new(OutputFormat::Text).format_report(&report);
        assert!(text.contains("No resource changes"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(OutputFormatter::truncate("a_very_long_address", 10), "a_very_...");
    }
}
