//! `--show-xref` report.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::ReportParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XrefKind {
    /// Stored at a byte offset in the file.
    Uncompressed,
    /// Stored inside an object stream.
    Compressed,
}

/// One cross-reference table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XrefEntry {
    pub object_id: u32,
    pub generation: u32,
    pub kind: XrefKind,
    /// Byte offset for uncompressed entries, object stream number for
    /// compressed ones.
    pub location: u64,
    /// Position inside the object stream (compressed entries only).
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XrefParser;

impl ReportParser for XrefParser {
    type Output = Vec<XrefEntry>;

    fn name(&self) -> &'static str {
        "xref"
    }

    fn parse(&self, text: &str) -> Vec<XrefEntry> {
        static XREF_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"^(\d+)/(\d+): (?:uncompressed; offset = (\d+)|compressed; stream = (\d+), index = (\d+))",
            )
            .expect("static regex must compile")
        });

        text.lines()
            .filter_map(|line| {
                let caps = XREF_RE.captures(line.trim())?;
                let object_id = caps[1].parse().ok()?;
                let generation = caps[2].parse().ok()?;
                if let Some(offset) = caps.get(3) {
                    return Some(XrefEntry {
                        object_id,
                        generation,
                        kind: XrefKind::Uncompressed,
                        location: offset.as_str().parse().ok()?,
                        index: None,
                    });
                }
                Some(XrefEntry {
                    object_id,
                    generation,
                    kind: XrefKind::Compressed,
                    location: caps.get(4)?.as_str().parse().ok()?,
                    index: caps.get(5)?.as_str().parse().ok(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncompressed_entry() {
        let entries = XrefParser.parse("1/0: uncompressed; offset = 15");
        assert_eq!(
            entries,
            vec![XrefEntry {
                object_id: 1,
                generation: 0,
                kind: XrefKind::Uncompressed,
                location: 15,
                index: None,
            }]
        );
    }

    #[test]
    fn test_compressed_entry_and_noise() {
        let entries = XrefParser.parse(
            "1/0: uncompressed; offset = 15\n\
             garbage line\n\
             12/0: compressed; stream = 5, index = 3\n\
             3/65535: free entry\n",
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind, XrefKind::Compressed);
        assert_eq!(entries[1].location, 5);
        assert_eq!(entries[1].index, Some(3));
    }
}
