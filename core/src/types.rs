//! Option value types.
//!
//! Most qpdf options take a flag, a string, an integer, or one word from a
//! fixed set. A handful take a whole group of sub-arguments closed by `--`
//! (page selection, overlay/underlay, encryption, attachments); those are
//! modeled as the structured specs in this module and carried inside
//! [`OptionValue`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single value stored in an [`OptionSet`](crate::OptionSet).
///
/// # Examples
///
/// ```
/// use qpdf_job_core::{OptionValue, PageSelection};
///
/// let level = OptionValue::Integer(9);
/// assert_eq!(level.kind_name(), "integer");
///
/// let pages = OptionValue::Pages(PageSelection::primary("1-5,9"));
/// assert_eq!(pages.kind_name(), "page selection");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Presence-only flag (`--linearize`).
    Flag,
    /// Free text (`--password=secret`, file paths).
    Text(String),
    /// Integer (`--compression-level=9`).
    Integer(i64),
    /// One word from the option's allowed list (`--object-streams=generate`).
    Choice(String),
    /// One `--pages` source.
    Pages(PageSelection),
    /// One `--overlay`/`--underlay` group.
    Layer(LayerSpec),
    /// The `--encrypt` group.
    Encryption(EncryptionSpec),
    /// One `--add-attachment` group.
    Attachment(AttachmentSpec),
    /// One `--copy-attachments-from` group.
    CopyAttachments(CopyAttachmentsSpec),
    /// One `--rotate` specification.
    Rotation(Rotation),
}

impl OptionValue {
    /// Short human-readable name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Choice(_) => "choice",
            Self::Pages(_) => "page selection",
            Self::Layer(_) => "layer",
            Self::Encryption(_) => "encryption",
            Self::Attachment(_) => "attachment",
            Self::CopyAttachments(_) => "copy attachments",
            Self::Rotation(_) => "rotation",
        }
    }

    /// Returns the text payload of `Text` and `Choice` values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) | Self::Choice(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// File reference meaning "the primary input file" inside `--pages`.
pub const PRIMARY_INPUT: &str = ".";

/// One source in a `--pages ... --` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    /// Source file, or [`PRIMARY_INPUT`] for the job's input file.
    pub file: String,
    /// Password for an encrypted source file.
    pub password: Option<String>,
    /// qpdf page range (`1-5,9`, `z-1`, `r3-r1`); all pages when `None`.
    pub range: Option<String>,
}

impl PageSelection {
    pub fn new(file: impl Into<String>, range: Option<&str>) -> Self {
        Self {
            file: file.into(),
            password: None,
            range: range.map(String::from),
        }
    }

    /// Selects `range` from the primary input file.
    pub fn primary(range: &str) -> Self {
        Self::new(PRIMARY_INPUT, Some(range))
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// Returns `true` if this selection refers to the primary input file.
    pub fn is_primary(&self) -> bool {
        self.file == PRIMARY_INPUT
    }
}

/// One `--overlay` or `--underlay` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    pub file: String,
    /// Destination pages (`--to`).
    pub to: Option<String>,
    /// Source pages (`--from`).
    pub from: Option<String>,
    /// Source pages repeated after `--from` is exhausted (`--repeat`).
    pub repeat: Option<String>,
    pub password: Option<String>,
}

impl LayerSpec {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            to: None,
            from: None,
            repeat: None,
            password: None,
        }
    }

    pub fn to_pages(mut self, pages: &str) -> Self {
        self.to = Some(pages.to_string());
        self
    }

    pub fn from_pages(mut self, pages: &str) -> Self {
        self.from = Some(pages.to_string());
        self
    }

    pub fn repeat_pages(mut self, pages: &str) -> Self {
        self.repeat = Some(pages.to_string());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }
}

/// Encryption key length accepted by `--encrypt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyLength {
    Bits40,
    Bits128,
    Bits256,
}

impl KeyLength {
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits40 => 40,
            Self::Bits128 => 128,
            Self::Bits256 => 256,
        }
    }
}

/// Printing permission for 128/256-bit keys (`--print=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintLevel {
    Full,
    Low,
    None,
}

impl PrintLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

/// Modification permission for 128/256-bit keys (`--modify=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifyLevel {
    All,
    Annotate,
    Form,
    Assembly,
    None,
}

impl ModifyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Annotate => "annotate",
            Self::Form => "form",
            Self::Assembly => "assembly",
            Self::None => "none",
        }
    }
}

/// Restrictions placed inside an `--encrypt ... --` group.
///
/// Unset fields are left to qpdf's defaults (everything allowed). 40-bit
/// keys accept only `print`, `modify`, `extract` and `annotate`, and only as
/// all-or-nothing values; validation rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    pub accessibility: Option<bool>,
    pub extract: Option<bool>,
    pub print: Option<PrintLevel>,
    pub modify: Option<ModifyLevel>,
    pub annotate: Option<bool>,
    pub assemble: Option<bool>,
    pub form: Option<bool>,
    pub modify_other: Option<bool>,
    pub cleartext_metadata: bool,
    /// 128-bit only: use AES instead of RC4.
    pub use_aes: Option<bool>,
    /// 128-bit only.
    pub force_v4: bool,
    /// 256-bit only.
    pub force_r5: bool,
    /// 256-bit only: permit an empty owner password.
    pub allow_insecure: bool,
}

/// The `--encrypt` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionSpec {
    pub user_password: String,
    pub owner_password: String,
    pub key_length: KeyLength,
    pub permissions: Permissions,
}

impl EncryptionSpec {
    pub fn new(user_password: &str, owner_password: &str, key_length: KeyLength) -> Self {
        Self {
            user_password: user_password.to_string(),
            owner_password: owner_password.to_string(),
            key_length,
            permissions: Permissions::default(),
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Returns `true` when qpdf treats this encryption as weak and demands
    /// `--allow-weak-crypto` (40-bit RC4, or 128-bit without AES).
    pub fn is_weak(&self) -> bool {
        match self.key_length {
            KeyLength::Bits40 => true,
            KeyLength::Bits128 => self.permissions.use_aes != Some(true),
            KeyLength::Bits256 => false,
        }
    }
}

/// One `--add-attachment` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentSpec {
    pub file: String,
    /// Key in the embedded-files name tree; qpdf uses the file name when unset.
    pub key: Option<String>,
    /// File name shown to readers.
    pub filename: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub mod_date: Option<DateTime<Utc>>,
    pub mime_type: Option<String>,
    pub description: Option<String>,
    /// Replace an existing attachment with the same key.
    pub replace: bool,
}

impl AttachmentSpec {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            key: None,
            filename: None,
            creation_date: None,
            mod_date: None,
            mime_type: None,
            description: None,
            replace: false,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    pub fn with_mod_date(mut self, date: DateTime<Utc>) -> Self {
        self.mod_date = Some(date);
        self
    }

    pub fn replace(mut self) -> Self {
        self.replace = true;
        self
    }
}

/// Formats a timestamp as a PDF date string (`D:YYYYMMDDHHmmSSZ`).
pub fn pdf_date(date: &DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// One `--copy-attachments-from` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAttachmentsSpec {
    pub file: String,
    /// Prefix applied to copied keys to avoid clashes.
    pub prefix: Option<String>,
    pub password: Option<String>,
}

impl CopyAttachmentsSpec {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            prefix: None,
            password: None,
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }
}

/// One `--rotate=[+|-]angle[:pages]` specification.
///
/// Absolute rotations set the page's `/Rotate`; relative ones add to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    /// Degrees; a multiple of 90 between -270 and 270.
    pub angle: i32,
    pub relative: bool,
    /// Pages to rotate; all pages when `None`.
    pub pages: Option<String>,
}

impl Rotation {
    pub fn absolute(angle: i32) -> Self {
        Self {
            angle,
            relative: false,
            pages: None,
        }
    }

    pub fn relative(angle: i32) -> Self {
        Self {
            angle,
            relative: true,
            pages: None,
        }
    }

    pub fn on_pages(mut self, pages: &str) -> Self {
        self.pages = Some(pages.to_string());
        self
    }

    /// Renders the `--rotate` value (`+90:1-3`, `180`).
    pub fn to_arg_value(&self) -> String {
        let angle = if self.relative && self.angle >= 0 {
            format!("+{}", self.angle)
        } else {
            self.angle.to_string()
        };
        match &self.pages {
            Some(pages) => format!("{angle}:{pages}"),
            None => angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rotation_arg_value() {
        assert_eq!(Rotation::absolute(0).to_arg_value(), "0");
        assert_eq!(Rotation::relative(90).to_arg_value(), "+90");
        assert_eq!(Rotation::relative(-90).on_pages("1-3").to_arg_value(), "-90:1-3");
        assert_eq!(Rotation::absolute(180).on_pages("z").to_arg_value(), "180:z");
    }

    #[test]
    fn test_weak_encryption_detection() {
        assert!(EncryptionSpec::new("u", "o", KeyLength::Bits40).is_weak());
        assert!(EncryptionSpec::new("u", "o", KeyLength::Bits128).is_weak());
        let aes = EncryptionSpec::new("u", "o", KeyLength::Bits128).with_permissions(Permissions {
            use_aes: Some(true),
            ..Permissions::default()
        });
        assert!(!aes.is_weak());
        assert!(!EncryptionSpec::new("u", "o", KeyLength::Bits256).is_weak());
    }

    #[test]
    fn test_pdf_date_format() {
        let date = Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap();
        assert_eq!(pdf_date(&date), "D:20230405060708Z");
    }
}
