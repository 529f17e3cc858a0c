//! `--list-attachments` report.
//!
//! Each attachment starts with an unindented `key -> obj,gen` line. With
//! `--verbose`, indented detail lines follow:
//!
//! ```text
//! 20_pages.pdf -> 10,0
//!   preferred name: 20_pages.pdf
//!   all names:
//!     /F -> 20_pages.pdf
//!     /UF -> 20_pages.pdf
//!   all data streams:
//!     /F -> 12,0
//!     /UF -> 12,0
//! ```

use serde::Serialize;

use super::ReportParser;

/// One embedded-file data stream (`/F -> 12,0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataStream {
    pub name: String,
    pub object: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentEntry {
    pub key: String,
    /// Text after `->`, the file specification object (`10,0`).
    pub description: String,
    pub preferred_name: Option<String>,
    /// Name-dictionary entries (`/F`, `/UF`, ...) to file names.
    pub names: Vec<(String, String)>,
    pub data_streams: Vec<DataStream>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentsParser;

#[derive(Clone, Copy)]
enum Block {
    Top,
    Names,
    Streams,
}

impl ReportParser for AttachmentsParser {
    type Output = Vec<AttachmentEntry>;

    fn name(&self) -> &'static str {
        "attachments"
    }

    fn parse(&self, text: &str) -> Vec<AttachmentEntry> {
        let mut entries: Vec<AttachmentEntry> = Vec::new();
        let mut block = Block::Top;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let indented = line.starts_with(char::is_whitespace);

            if !indented {
                block = Block::Top;
                if let Some((key, description)) = line.rsplit_once(" -> ") {
                    entries.push(AttachmentEntry {
                        key: key.trim().to_string(),
                        description: description.trim().to_string(),
                        preferred_name: None,
                        names: Vec::new(),
                        data_streams: Vec::new(),
                    });
                }
                continue;
            }

            let Some(entry) = entries.last_mut() else {
                continue;
            };
            let detail = line.trim();
            if let Some(name) = detail.strip_prefix("preferred name:") {
                entry.preferred_name = Some(name.trim().to_string());
                block = Block::Top;
            } else if detail == "all names:" {
                block = Block::Names;
            } else if detail == "all data streams:" {
                block = Block::Streams;
            } else if let Some((name, value)) = detail.split_once(" -> ") {
                match block {
                    Block::Names => entry.names.push((name.to_string(), value.to_string())),
                    Block::Streams => entry.data_streams.push(DataStream {
                        name: name.to_string(),
                        object: value.to_string(),
                    }),
                    Block::Top => {}
                }
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_entry() {
        let entries = AttachmentsParser.parse("20_pages.pdf -> 10,0");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "20_pages.pdf");
        assert_eq!(entries[0].description, "10,0");
        assert!(entries[0].data_streams.is_empty());
    }

    #[test]
    fn test_verbose_details() {
        let entries = AttachmentsParser.parse(
            "a.txt -> 6,0\n  preferred name: a.txt\n  all names:\n    /F -> a.txt\n    /UF -> a.txt\n  \
             all data streams:\n    /F -> 8,0\n    /UF -> 8,0\nb.csv -> 9,0\n",
        );
        assert_eq!(entries.len(), 2);
        let first = &entries[0];
        assert_eq!(first.preferred_name.as_deref(), Some("a.txt"));
        assert_eq!(
            first.names,
            vec![
                ("/F".to_string(), "a.txt".to_string()),
                ("/UF".to_string(), "a.txt".to_string()),
            ]
        );
        assert_eq!(first.data_streams.len(), 2);
        assert_eq!(first.data_streams[0].object, "8,0");
        assert_eq!(entries[1].key, "b.csv");
    }

    #[test]
    fn test_no_attachments() {
        assert!(AttachmentsParser.parse("in.pdf has no embedded files").is_empty());
        assert!(AttachmentsParser.parse("").is_empty());
    }
}
