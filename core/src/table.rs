//! The option table.
//!
//! Every qpdf option the crate understands has exactly one [`OptionSpec`]
//! row here: its long-flag spelling, the kind of value it takes, the
//! category that fixes where it lands in the rendered argument vector, and
//! the options it conflicts with or depends on. Rows are ordered by
//! [`Category`] and appear in the same order as the [`OptionKey`] variants,
//! so rendering and validation can walk the table front to back.

use serde::{Deserialize, Serialize};

/// Where an option lands in the rendered argument vector.
///
/// Variants are declared in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Password and error-handling flags that affect how the input is read.
    Security,
    /// The input file or `--empty`.
    Input,
    /// Structural checks and `--show-*` reports.
    Inspection,
    /// `--encrypt`, `--decrypt` and friends.
    Encryption,
    /// Content and stream transformations.
    Transform,
    /// Page selection, overlay/underlay and attachment groups.
    Composition,
    /// Options that shape how the output file is written.
    OutputShaping,
    /// `--json` and its modifiers.
    Json,
    /// The output file or the in-place sentinel.
    Output,
}

/// Kind of value an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Flag,
    /// Non-empty text.
    Text,
    Integer { min: i64, max: i64 },
    /// Either bare (`--split-pages`) or with a number (`--split-pages=10`).
    FlagOrInteger { min: i64, max: i64 },
    Choice(&'static [&'static str]),
    Pages,
    Layer,
    Encryption,
    Attachment,
    CopyAttachments,
    Rotation,
}

/// Identity of one supported qpdf option.
///
/// Declaration order matches [`OPTION_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    // Security
    Password,
    PasswordFile,
    PasswordMode,
    SuppressPasswordRecovery,
    AllowWeakCrypto,
    SuppressRecovery,
    IgnoreXrefStreams,
    KeepFilesOpen,
    KeepFilesOpenThreshold,
    WarningExit0,
    NoWarn,
    Verbose,
    // Input
    InputFile,
    Empty,
    // Inspection
    Check,
    CheckLinearization,
    ShowLinearization,
    ShowXref,
    ShowObject,
    RawStreamData,
    FilteredStreamData,
    ShowNPages,
    ShowPages,
    WithImages,
    ListAttachments,
    ShowAttachment,
    ShowEncryption,
    ShowEncryptionKey,
    IsEncrypted,
    RequiresPassword,
    // Encryption
    Encrypt,
    Decrypt,
    RemoveRestrictions,
    CopyEncryption,
    EncryptionFilePassword,
    // Transform
    CompressStreams,
    DecodeLevel,
    StreamData,
    RecompressFlate,
    CompressionLevel,
    NormalizeContent,
    CoalesceContents,
    ExternalizeInlineImages,
    IiMinBytes,
    OptimizeImages,
    OiMinWidth,
    OiMinHeight,
    OiMinArea,
    KeepInlineImages,
    FlattenRotation,
    FlattenAnnotations,
    Rotate,
    GenerateAppearances,
    RemovePageLabels,
    RemoveUnreferencedResources,
    PreserveUnreferencedResources,
    // Composition
    Pages,
    Collate,
    Overlay,
    Underlay,
    AddAttachment,
    RemoveAttachment,
    CopyAttachmentsFrom,
    // Output shaping
    Linearize,
    Qdf,
    ObjectStreams,
    PreserveUnreferenced,
    NewlineBeforeEndstream,
    NoOriginalObjectIds,
    DeterministicId,
    MinVersion,
    ForceVersion,
    SplitPages,
    // Json
    Json,
    JsonKey,
    JsonObject,
    JsonStreamData,
    JsonStreamPrefix,
    // Output
    OutputFile,
}

impl OptionKey {
    /// Returns this option's table row.
    pub fn spec(self) -> &'static OptionSpec {
        &OPTION_TABLE[self as usize]
    }

    /// Long-flag name without dashes (`"linearize"`).
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Looks up an option by name, with or without leading dashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use qpdf_job_core::OptionKey;
    ///
    /// assert_eq!(OptionKey::from_name("--linearize"), Some(OptionKey::Linearize));
    /// assert_eq!(OptionKey::from_name("object-streams"), Some(OptionKey::ObjectStreams));
    /// assert_eq!(OptionKey::from_name("--no-such-flag"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim_start_matches('-');
        OPTION_TABLE
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.key)
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "--{}", self.name())
    }
}

/// One row of the option table.
#[derive(Debug)]
pub struct OptionSpec {
    pub key: OptionKey,
    /// Long-flag name without dashes.
    pub name: &'static str,
    pub category: Category,
    pub kind: ValueKind,
    /// May appear more than once; every value is kept in insertion order.
    pub multiple: bool,
    /// Options that may not be combined with this one.
    pub conflicts_with: &'static [OptionKey],
    /// At least one of these must also be present.
    pub requires: &'static [OptionKey],
    /// Only reads the input; jobs with any such option have no output clause.
    pub inspection: bool,
}

impl OptionSpec {
    const fn new(key: OptionKey, name: &'static str, category: Category, kind: ValueKind) -> Self {
        Self {
            key,
            name,
            category,
            kind,
            multiple: false,
            conflicts_with: &[],
            requires: &[],
            inspection: false,
        }
    }

    const fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    const fn conflicts(mut self, keys: &'static [OptionKey]) -> Self {
        self.conflicts_with = keys;
        self
    }

    const fn requires(mut self, keys: &'static [OptionKey]) -> Self {
        self.requires = keys;
        self
    }

    const fn inspection(mut self) -> Self {
        self.inspection = true;
        self
    }

    /// The flag as spelled on the command line (`--linearize`).
    pub fn flag(&self) -> String {
        format!("--{}", self.name)
    }
}

use Category as C;
use OptionKey as K;
use ValueKind as V;

const YES_NO: &[&str] = &["y", "n"];
const NON_NEGATIVE: V = V::Integer {
    min: 0,
    max: i64::MAX,
};
const POSITIVE_OR_BARE: V = V::FlagOrInteger {
    min: 1,
    max: i64::MAX,
};

/// All supported options, in rendering order.
pub static OPTION_TABLE: &[OptionSpec] = &[
    // Security
    OptionSpec::new(K::Password, "password", C::Security, V::Text).conflicts(&[K::PasswordFile]),
    OptionSpec::new(K::PasswordFile, "password-file", C::Security, V::Text),
    OptionSpec::new(
        K::PasswordMode,
        "password-mode",
        C::Security,
        V::Choice(&["bytes", "hex-bytes", "unicode", "auto"]),
    ),
    OptionSpec::new(K::SuppressPasswordRecovery, "suppress-password-recovery", C::Security, V::Flag)
        .conflicts(&[K::PasswordMode]),
    OptionSpec::new(K::AllowWeakCrypto, "allow-weak-crypto", C::Security, V::Flag),
    OptionSpec::new(K::SuppressRecovery, "suppress-recovery", C::Security, V::Flag),
    OptionSpec::new(K::IgnoreXrefStreams, "ignore-xref-streams", C::Security, V::Flag),
    OptionSpec::new(K::KeepFilesOpen, "keep-files-open", C::Security, V::Choice(YES_NO)),
    OptionSpec::new(K::KeepFilesOpenThreshold, "keep-files-open-threshold", C::Security, NON_NEGATIVE),
    OptionSpec::new(K::WarningExit0, "warning-exit-0", C::Security, V::Flag),
    OptionSpec::new(K::NoWarn, "no-warn", C::Security, V::Flag),
    OptionSpec::new(K::Verbose, "verbose", C::Security, V::Flag),
    // Input
    OptionSpec::new(K::InputFile, "input-file", C::Input, V::Text),
    OptionSpec::new(K::Empty, "empty", C::Input, V::Flag),
    // Inspection
    OptionSpec::new(K::Check, "check", C::Inspection, V::Flag).inspection(),
    OptionSpec::new(K::CheckLinearization, "check-linearization", C::Inspection, V::Flag).inspection(),
    OptionSpec::new(K::ShowLinearization, "show-linearization", C::Inspection, V::Flag).inspection(),
    OptionSpec::new(K::ShowXref, "show-xref", C::Inspection, V::Flag).inspection(),
    OptionSpec::new(K::ShowObject, "show-object", C::Inspection, V::Text).inspection(),
    OptionSpec::new(K::RawStreamData, "raw-stream-data", C::Inspection, V::Flag)
        .conflicts(&[K::FilteredStreamData])
        .requires(&[K::ShowObject]),
    OptionSpec::new(K::FilteredStreamData, "filtered-stream-data", C::Inspection, V::Flag)
        .requires(&[K::ShowObject]),
    OptionSpec::new(K::ShowNPages, "show-npages", C::Inspection, V::Flag).inspection(),
    OptionSpec::new(K::ShowPages, "show-pages", C::Inspection, V::Flag).inspection(),
    OptionSpec::new(K::WithImages, "with-images", C::Inspection, V::Flag).requires(&[K::ShowPages]),
    OptionSpec::new(K::ListAttachments, "list-attachments", C::Inspection, V::Flag).inspection(),
    OptionSpec::new(K::ShowAttachment, "show-attachment", C::Inspection, V::Text).inspection(),
    OptionSpec::new(K::ShowEncryption, "show-encryption", C::Inspection, V::Flag).inspection(),
    OptionSpec::new(K::ShowEncryptionKey, "show-encryption-key", C::Inspection, V::Flag)
        .requires(&[K::ShowEncryption, K::Check]),
    OptionSpec::new(K::IsEncrypted, "is-encrypted", C::Inspection, V::Flag)
        .conflicts(&[K::RequiresPassword])
        .inspection(),
    OptionSpec::new(K::RequiresPassword, "requires-password", C::Inspection, V::Flag).inspection(),
    // Encryption
    OptionSpec::new(K::Encrypt, "encrypt", C::Encryption, V::Encryption).conflicts(&[
        K::Decrypt,
        K::CopyEncryption,
        K::DeterministicId,
    ]),
    OptionSpec::new(K::Decrypt, "decrypt", C::Encryption, V::Flag).conflicts(&[K::CopyEncryption]),
    OptionSpec::new(K::RemoveRestrictions, "remove-restrictions", C::Encryption, V::Flag),
    OptionSpec::new(K::CopyEncryption, "copy-encryption", C::Encryption, V::Text),
    OptionSpec::new(K::EncryptionFilePassword, "encryption-file-password", C::Encryption, V::Text)
        .requires(&[K::CopyEncryption]),
    // Transform
    OptionSpec::new(K::CompressStreams, "compress-streams", C::Transform, V::Choice(YES_NO)),
    OptionSpec::new(
        K::DecodeLevel,
        "decode-level",
        C::Transform,
        V::Choice(&["none", "generalized", "specialized", "all"]),
    ),
    OptionSpec::new(
        K::StreamData,
        "stream-data",
        C::Transform,
        V::Choice(&["compress", "preserve", "uncompress"]),
    ),
    OptionSpec::new(K::RecompressFlate, "recompress-flate", C::Transform, V::Flag),
    OptionSpec::new(
        K::CompressionLevel,
        "compression-level",
        C::Transform,
        V::Integer { min: 1, max: 9 },
    ),
    OptionSpec::new(K::NormalizeContent, "normalize-content", C::Transform, V::Choice(YES_NO)),
    OptionSpec::new(K::CoalesceContents, "coalesce-contents", C::Transform, V::Flag),
    OptionSpec::new(K::ExternalizeInlineImages, "externalize-inline-images", C::Transform, V::Flag),
    OptionSpec::new(K::IiMinBytes, "ii-min-bytes", C::Transform, NON_NEGATIVE)
        .requires(&[K::ExternalizeInlineImages]),
    OptionSpec::new(K::OptimizeImages, "optimize-images", C::Transform, V::Flag),
    OptionSpec::new(K::OiMinWidth, "oi-min-width", C::Transform, NON_NEGATIVE)
        .requires(&[K::OptimizeImages]),
    OptionSpec::new(K::OiMinHeight, "oi-min-height", C::Transform, NON_NEGATIVE)
        .requires(&[K::OptimizeImages]),
    OptionSpec::new(K::OiMinArea, "oi-min-area", C::Transform, NON_NEGATIVE)
        .requires(&[K::OptimizeImages]),
    OptionSpec::new(K::KeepInlineImages, "keep-inline-images", C::Transform, V::Flag)
        .requires(&[K::OptimizeImages]),
    OptionSpec::new(K::FlattenRotation, "flatten-rotation", C::Transform, V::Flag),
    OptionSpec::new(
        K::FlattenAnnotations,
        "flatten-annotations",
        C::Transform,
        V::Choice(&["all", "print", "screen"]),
    ),
    OptionSpec::new(K::Rotate, "rotate", C::Transform, V::Rotation).multiple(),
    OptionSpec::new(K::GenerateAppearances, "generate-appearances", C::Transform, V::Flag),
    OptionSpec::new(K::RemovePageLabels, "remove-page-labels", C::Transform, V::Flag),
    OptionSpec::new(
        K::RemoveUnreferencedResources,
        "remove-unreferenced-resources",
        C::Transform,
        V::Choice(&["auto", "yes", "no"]),
    )
    .conflicts(&[K::PreserveUnreferencedResources]),
    OptionSpec::new(
        K::PreserveUnreferencedResources,
        "preserve-unreferenced-resources",
        C::Transform,
        V::Flag,
    ),
    // Composition
    OptionSpec::new(K::Pages, "pages", C::Composition, V::Pages).multiple(),
    OptionSpec::new(K::Collate, "collate", C::Composition, POSITIVE_OR_BARE).requires(&[K::Pages]),
    OptionSpec::new(K::Overlay, "overlay", C::Composition, V::Layer).multiple(),
    OptionSpec::new(K::Underlay, "underlay", C::Composition, V::Layer).multiple(),
    OptionSpec::new(K::AddAttachment, "add-attachment", C::Composition, V::Attachment).multiple(),
    OptionSpec::new(K::RemoveAttachment, "remove-attachment", C::Composition, V::Text).multiple(),
    OptionSpec::new(
        K::CopyAttachmentsFrom,
        "copy-attachments-from",
        C::Composition,
        V::CopyAttachments,
    )
    .multiple(),
    // Output shaping
    OptionSpec::new(K::Linearize, "linearize", C::OutputShaping, V::Flag),
    OptionSpec::new(K::Qdf, "qdf", C::OutputShaping, V::Flag).conflicts(&[K::ObjectStreams]),
    OptionSpec::new(
        K::ObjectStreams,
        "object-streams",
        C::OutputShaping,
        V::Choice(&["preserve", "disable", "generate"]),
    ),
    OptionSpec::new(K::PreserveUnreferenced, "preserve-unreferenced", C::OutputShaping, V::Flag),
    OptionSpec::new(K::NewlineBeforeEndstream, "newline-before-endstream", C::OutputShaping, V::Flag),
    OptionSpec::new(K::NoOriginalObjectIds, "no-original-object-ids", C::OutputShaping, V::Flag),
    OptionSpec::new(K::DeterministicId, "deterministic-id", C::OutputShaping, V::Flag),
    OptionSpec::new(K::MinVersion, "min-version", C::OutputShaping, V::Text),
    OptionSpec::new(K::ForceVersion, "force-version", C::OutputShaping, V::Text),
    OptionSpec::new(K::SplitPages, "split-pages", C::OutputShaping, POSITIVE_OR_BARE),
    // Json
    OptionSpec::new(K::Json, "json", C::Json, V::FlagOrInteger { min: 1, max: 2 }).inspection(),
    OptionSpec::new(K::JsonKey, "json-key", C::Json, V::Text)
        .multiple()
        .requires(&[K::Json]),
    OptionSpec::new(K::JsonObject, "json-object", C::Json, V::Text)
        .multiple()
        .requires(&[K::Json]),
    OptionSpec::new(
        K::JsonStreamData,
        "json-stream-data",
        C::Json,
        V::Choice(&["none", "inline", "file"]),
    )
    .requires(&[K::Json]),
    OptionSpec::new(K::JsonStreamPrefix, "json-stream-prefix", C::Json, V::Text)
        .requires(&[K::JsonStreamData]),
    // Output
    OptionSpec::new(K::OutputFile, "output-file", C::Output, V::Text),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_follow_key_order() {
        for (idx, spec) in OPTION_TABLE.iter().enumerate() {
            assert_eq!(spec.key as usize, idx, "row {idx} ({}) is out of order", spec.name);
        }
        assert_eq!(OPTION_TABLE.len(), OptionKey::OutputFile as usize + 1);
    }

    #[test]
    fn test_table_is_grouped_by_category() {
        for pair in OPTION_TABLE.windows(2) {
            assert!(
                pair[0].category <= pair[1].category,
                "{} ({:?}) precedes {} ({:?})",
                pair[0].name,
                pair[0].category,
                pair[1].name,
                pair[1].category
            );
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = OPTION_TABLE.iter().map(|spec| spec.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn test_relationships_do_not_point_at_self() {
        for spec in OPTION_TABLE {
            assert!(!spec.conflicts_with.contains(&spec.key), "{}", spec.name);
            assert!(!spec.requires.contains(&spec.key), "{}", spec.name);
        }
    }

    #[test]
    fn test_display_uses_long_flag() {
        assert_eq!(OptionKey::WarningExit0.to_string(), "--warning-exit-0");
        assert_eq!(OptionKey::ShowNPages.spec().flag(), "--show-npages");
    }
}
