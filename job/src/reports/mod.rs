//! Parsers for qpdf's free-text reports.
//!
//! Each report shape has its own single-pass line scanner. Parsers never
//! fail: lines they do not recognize are skipped, and an empty report gives
//! an empty result. The record types derive `Serialize` so callers can
//! re-emit them as JSON or YAML.

pub mod attachments;
pub mod check;
pub mod encryption;
pub mod linearization;
pub mod pages;
pub mod xref;

pub use attachments::{AttachmentEntry, AttachmentsParser, DataStream};
pub use check::{CheckEntry, CheckParser, CheckReport, Severity};
pub use encryption::{EncryptionInfo, EncryptionParser, PasswordRole};
pub use linearization::{HintGroup, HintSection, LinearizationParser, LinearizationReport};
pub use pages::{PageEntry, PageImage, PagesParser, page_count};
pub use xref::{XrefEntry, XrefKind, XrefParser};

/// One report grammar.
pub trait ReportParser {
    type Output;

    fn name(&self) -> &'static str;
    fn parse(&self, text: &str) -> Self::Output;
}

/// Splits `key: value` (or `key = value`) around the first separator,
/// trimming both sides.
pub(crate) fn split_field<'a>(line: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    let (key, value) = line.split_once(separator)?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_field() {
        assert_eq!(split_field("R = 6", "="), Some(("R", "6")));
        assert_eq!(split_field("  npages: 20", ":"), Some(("npages", "20")));
        assert_eq!(split_field("User password = ", "="), Some(("User password", "")));
        assert_eq!(split_field(": orphan", ":"), None);
        assert_eq!(split_field("no separator", ":"), None);
    }

    #[test]
    fn test_parsers_are_named() {
        assert_eq!(CheckParser.name(), "check");
        assert_eq!(XrefParser.name(), "xref");
        assert_eq!(LinearizationParser.name(), "linearization");
        assert_eq!(AttachmentsParser.name(), "attachments");
        assert_eq!(EncryptionParser.name(), "encryption");
        assert_eq!(PagesParser.name(), "pages");
    }
}
