//! `--check` report.
//!
//! ```text
//! checking damaged.pdf
//! PDF Version: 1.4
//! File is not encrypted
//! File is not linearized
//! WARNING: damaged.pdf: file is damaged
//! WARNING: damaged.pdf (offset 1092): xref not found
//! 2 warnings
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::ReportParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// One `WARNING:` or `ERROR:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckEntry {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub entries: Vec<CheckEntry>,
    /// `N warnings` summary as printed by qpdf. Advisory only.
    pub warning_count: Option<usize>,
    /// `N errors` summary as printed by qpdf. Advisory only.
    pub error_count: Option<usize>,
    pub pdf_version: Option<String>,
    pub encrypted: Option<bool>,
    pub linearized: Option<bool>,
    /// qpdf printed "No syntax or stream encoding errors found".
    pub no_errors_found: bool,
}

impl CheckReport {
    pub fn warnings(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.severity == Severity::Error)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckParser;

impl ReportParser for CheckParser {
    type Output = CheckReport;

    fn name(&self) -> &'static str {
        "check"
    }

    fn parse(&self, text: &str) -> CheckReport {
        static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(\d+) (warning|error)s?$").expect("static regex must compile")
        });

        let mut report = CheckReport::default();
        for line in text.lines() {
            let line = line.trim();
            if let Some(message) = line.strip_prefix("WARNING:") {
                report.entries.push(CheckEntry {
                    severity: Severity::Warning,
                    message: message.trim().to_string(),
                });
            } else if let Some(message) = line.strip_prefix("ERROR:") {
                report.entries.push(CheckEntry {
                    severity: Severity::Error,
                    message: message.trim().to_string(),
                });
            } else if let Some(version) = line.strip_prefix("PDF Version:") {
                report.pdf_version = Some(version.trim().to_string());
            } else if line == "File is not encrypted" {
                report.encrypted = Some(false);
            } else if line.starts_with("R = ") {
                report.encrypted = Some(true);
            } else if line == "File is not linearized" {
                report.linearized = Some(false);
            } else if line == "File is linearized" {
                report.linearized = Some(true);
            } else if line.starts_with("No syntax or stream encoding errors found") {
                report.no_errors_found = true;
            } else if let Some(caps) = SUMMARY_RE.captures(line) {
                let count = caps[1].parse().ok();
                match &caps[2] {
                    "warning" => report.warning_count = count,
                    _ => report.error_count = count,
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_header_lines() {
        let report = CheckParser.parse(
            "checking in.pdf\nPDF Version: 1.7\nFile is not encrypted\nFile is linearized\n\
             No syntax or stream encoding errors found; the file may still contain\n\
             errors that qpdf cannot detect",
        );
        assert_eq!(report.pdf_version.as_deref(), Some("1.7"));
        assert_eq!(report.encrypted, Some(false));
        assert_eq!(report.linearized, Some(true));
        assert!(report.no_errors_found);
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_collects_warnings_and_errors_in_order() {
        let report = CheckParser.parse(
            "WARNING: a.pdf: file is damaged\nERROR: a.pdf: unable to find trailer\n\
             WARNING: a.pdf (object 5 0): stream length mismatch\n2 warnings\n1 error",
        );
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.entries[1].severity, Severity::Error);
        assert_eq!(report.entries[1].message, "a.pdf: unable to find trailer");
        assert_eq!(report.warnings().count(), 2);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.warning_count, Some(2));
        assert_eq!(report.error_count, Some(1));
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(CheckParser.parse(""), CheckReport::default());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "WARNING: x\nPDF Version: 1.3\n1 warning";
        assert_eq!(CheckParser.parse(text), CheckParser.parse(text));
    }
}
