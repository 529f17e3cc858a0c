//! `--show-pages` and `--show-npages` reports.
//!
//! ```text
//! page 1: 3 0 R
//!   images:
//!     /Im1: 10 0 R, 1275 x 1650
//!   content:
//!     4 0 R
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::ReportParser;

/// An image listed under a page with `--with-images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageImage {
    pub name: String,
    pub object: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// 1-based page number.
    pub page_number: u32,
    /// Page object reference (`3 0 R`).
    pub object: String,
    /// Content stream references.
    pub contents: Vec<String>,
    pub images: Vec<PageImage>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PagesParser;

#[derive(Clone, Copy)]
enum Block {
    None,
    Content,
    Images,
}

impl ReportParser for PagesParser {
    type Output = Vec<PageEntry>;

    fn name(&self) -> &'static str {
        "pages"
    }

    fn parse(&self, text: &str) -> Vec<PageEntry> {
        static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^page (\d+): (\d+ \d+ R)$").expect("static regex must compile")
        });
        static REF_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^\d+ \d+ R$").expect("static regex must compile"));
        static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(/\S+): (\d+ \d+ R), (\d+) x (\d+)$").expect("static regex must compile")
        });

        let mut pages: Vec<PageEntry> = Vec::new();
        let mut block = Block::None;

        for line in text.lines().map(str::trim) {
            if let Some(caps) = PAGE_RE.captures(line) {
                let Ok(page_number) = caps[1].parse() else {
                    continue;
                };
                pages.push(PageEntry {
                    page_number,
                    object: caps[2].to_string(),
                    contents: Vec::new(),
                    images: Vec::new(),
                });
                block = Block::None;
                continue;
            }
            let Some(page) = pages.last_mut() else {
                continue;
            };
            match line {
                "content:" => block = Block::Content,
                "images:" => block = Block::Images,
                _ => match block {
                    Block::Content if REF_RE.is_match(line) => page.contents.push(line.to_string()),
                    Block::Images => {
                        if let Some(caps) = IMAGE_RE.captures(line) {
                            if let (Ok(width), Ok(height)) = (caps[3].parse(), caps[4].parse()) {
                                page.images.push(PageImage {
                                    name: caps[1].to_string(),
                                    object: caps[2].to_string(),
                                    width,
                                    height,
                                });
                            }
                        }
                    }
                    _ => {}
                },
            }
        }
        pages
    }
}

/// Parses `--show-npages` output: the first line holding a bare number.
pub fn page_count(text: &str) -> Option<u32> {
    text.lines().find_map(|line| line.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_with_contents_and_images() {
        let pages = PagesParser.parse(
            "page 1: 3 0 R\n  images:\n    /Im1: 10 0 R, 1275 x 1650\n  content:\n    4 0 R\n\
             page 2: 5 0 R\n  content:\n    6 0 R\n    7 0 R\n",
        );
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].object, "3 0 R");
        assert_eq!(
            pages[0].images,
            vec![PageImage {
                name: "/Im1".to_string(),
                object: "10 0 R".to_string(),
                width: 1275,
                height: 1650,
            }]
        );
        assert_eq!(pages[0].contents, vec!["4 0 R"]);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].contents, vec!["6 0 R", "7 0 R"]);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count("20"), Some(20));
        assert_eq!(page_count("\n 7 \n"), Some(7));
        assert_eq!(page_count("not a number"), None);
        assert_eq!(page_count(""), None);
    }
}
