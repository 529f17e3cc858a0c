//! `--show-linearization` and `--check-linearization` reports.
//!
//! ```text
//! in.pdf: linearization data:
//!
//! file_size: 180701
//! first_page_obj: 8
//! npages: 20
//!
//! Page Offsets Hint Table
//!
//! min_nobjects: 1
//! Page 0:
//!   nobjects: 6
//!   length: 4214
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{ReportParser, split_field};

/// A numbered block inside a hint table (`Page 0:`, `Shared Object 3:`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HintGroup {
    pub label: String,
    pub fields: BTreeMap<String, i64>,
}

/// A hint table (`Page Offsets Hint Table`, `Shared Objects Hint Table`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HintSection {
    pub title: String,
    pub fields: BTreeMap<String, i64>,
    pub groups: Vec<HintGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinearizationReport {
    pub linearized: bool,
    /// Linearization parameter dictionary (`file_size`, `npages`, ...).
    pub header: BTreeMap<String, i64>,
    pub sections: Vec<HintSection>,
    pub warnings: Vec<String>,
    /// `--check-linearization` printed "no linearization errors".
    pub no_errors: bool,
}

impl LinearizationReport {
    pub fn section(&self, title: &str) -> Option<&HintSection> {
        self.sections.iter().find(|section| section.title == title)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearizationParser;

impl ReportParser for LinearizationParser {
    type Output = LinearizationReport;

    fn name(&self) -> &'static str {
        "linearization"
    }

    fn parse(&self, text: &str) -> LinearizationReport {
        static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([A-Za-z][A-Za-z ]*? \d+):$").expect("static regex must compile")
        });

        let mut report = LinearizationReport::default();
        // Indented fields only belong to a group while the group is open.
        let mut in_group = false;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if line.ends_with("linearization data:") {
                report.linearized = true;
            } else if line.ends_with("is not linearized") {
                report.linearized = false;
            } else if line.ends_with("no linearization errors") {
                report.linearized = true;
                report.no_errors = true;
            } else if let Some(warning) = line.strip_prefix("WARNING:") {
                report.warnings.push(warning.trim().to_string());
            } else if line.ends_with("Hint Table") {
                report.sections.push(HintSection {
                    title: line.to_string(),
                    ..HintSection::default()
                });
                in_group = false;
            } else if let Some(caps) = GROUP_RE.captures(line) {
                if let Some(section) = report.sections.last_mut() {
                    section.groups.push(HintGroup {
                        label: caps[1].to_string(),
                        fields: BTreeMap::new(),
                    });
                    in_group = true;
                }
            } else if let Some((key, value)) = split_field(line, ":") {
                let Ok(value) = value.parse::<i64>() else {
                    continue;
                };
                let indented = raw.starts_with(char::is_whitespace);
                let fields = match report.sections.last_mut() {
                    Some(section) => match section.groups.last_mut() {
                        Some(group) if in_group && indented => &mut group.fields,
                        _ => {
                            in_group = false;
                            &mut section.fields
                        }
                    },
                    None => &mut report.header,
                };
                fields.insert(key.to_string(), value);
            }
        }
        report
    }
}
