//! Thin model of qpdf's `--json` output.
//!
//! Only the outline tree is fully typed. The other top-level sections are
//! kept as raw [`serde_json::Value`]s so newer qpdf versions that add keys
//! still deserialize.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// qpdf writes `null` for empty arrays and unset flags in some places.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the document outline (bookmarks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfOutline {
    #[serde(default)]
    pub title: Option<String>,
    /// 1-based page the entry points at; absent when the destination is
    /// not a page.
    #[serde(rename = "destpageposfrom1", default)]
    pub page_number: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kids: Vec<PdfOutline>,
    /// Destination array as qpdf prints it (`["3 0 R", "/XYZ", null, ...]`);
    /// empty for items with an action instead of a destination.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dest: Vec<Value>,
    /// Indirect object reference of the outline item (`"12 0 R"`).
    #[serde(default)]
    pub object: Option<String>,
}

impl PdfOutline {
    /// Depth-first iterator over this entry and all of its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &PdfOutline> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.kids.iter().rev());
            Some(next)
        })
    }
}

/// Top-level `--json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonDocument {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outlines: Vec<PdfOutline>,
    #[serde(default)]
    pub attachments: Option<Value>,
    #[serde(default)]
    pub encrypt: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: Vec<Value>,
    /// Every other top-level key, untouched.
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

impl JsonDocument {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
