//! Option-set validation.
//!
//! Setters only check the value they are given (kind, range, emptiness).
//! Everything that involves more than one option is checked here, in one
//! pass over the option table, so the order in which options were set
//! never changes the outcome.
//!
//! # Examples
//!
//! ```
//! use qpdf_job_core::*;
//!
//! let mut options = OptionSet::new();
//! options.set(OptionKey::InputFile, "in.pdf".into()).unwrap();
//! options.set(OptionKey::Decrypt, OptionValue::Flag).unwrap();
//! options
//!     .set(
//!         OptionKey::Encrypt,
//!         OptionValue::Encryption(EncryptionSpec::new("u", "o", KeyLength::Bits256)),
//!     )
//!     .unwrap();
//!
//! assert!(matches!(
//!     validate_options(&options),
//!     Err(ConfigError::Conflict { .. })
//! ));
//! ```

use thiserror::Error;

use crate::table::{OPTION_TABLE, OptionKey, ValueKind};
use crate::types::{EncryptionSpec, KeyLength, ModifyLevel, OptionValue, PrintLevel};
use crate::OptionSet;

/// Invalid or conflicting option state.
///
/// Always detected before any process is spawned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No option with this name exists.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// The value does not fit the option's kind or range.
    #[error("invalid value for {option}: {reason}")]
    InvalidValue { option: OptionKey, reason: String },
    /// Neither an input file nor `--empty` was given.
    #[error("an input file or --empty is required")]
    MissingInput,
    /// Both an input file and `--empty` were given.
    #[error("an input file and --empty cannot be combined")]
    ConflictingInput,
    /// Two mutually exclusive options are both present.
    #[error("{option} cannot be combined with {other}")]
    Conflict { option: OptionKey, other: OptionKey },
    /// A dependent option is present without any of its companions.
    #[error("{option} requires {requires}")]
    MissingCompanion { option: OptionKey, requires: String },
    /// A page selection refers to the primary input but the job uses `--empty`.
    #[error("page selection '.' refers to the primary input, but no input file is set")]
    PageSelectionWithoutInput,
    /// A page selection has no source file.
    #[error("page selection has an empty file reference")]
    EmptyPageSource,
    /// Encryption is missing the user or owner password.
    #[error("encryption requires both a user and an owner password")]
    IncompleteEncryption,
    /// Weak encryption was requested without `--allow-weak-crypto`.
    #[error("{bits}-bit encryption without AES requires --allow-weak-crypto")]
    WeakCryptoNotAllowed { bits: u32 },
    /// A restriction is not available for the chosen key length.
    #[error("{permission} is not supported with {bits}-bit encryption")]
    UnsupportedPermission { bits: u32, permission: String },
    /// `--split-pages` writes numbered files and needs an explicit output pattern.
    #[error("--split-pages requires an output file pattern")]
    SplitPagesWithoutOutput,
}

/// Checks a single value against its option's kind.
///
/// Called by [`OptionSet::set`] so bad values fail at the call that
/// introduced them.
pub(crate) fn check_value(key: OptionKey, value: &OptionValue) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        option: key,
        reason,
    };
    let spec = key.spec();

    match (spec.kind, value) {
        (ValueKind::Flag, OptionValue::Flag) => Ok(()),
        (ValueKind::Text, OptionValue::Text(text)) => {
            if text.trim().is_empty() {
                Err(invalid("value cannot be empty".to_string()))
            } else {
                Ok(())
            }
        }
        (ValueKind::Integer { min, max }, OptionValue::Integer(n))
        | (ValueKind::FlagOrInteger { min, max }, OptionValue::Integer(n)) => {
            if (min..=max).contains(n) {
                Ok(())
            } else if max == i64::MAX {
                Err(invalid(format!("{n} is below the minimum of {min}")))
            } else {
                Err(invalid(format!("{n} is outside {min}..={max}")))
            }
        }
        (ValueKind::FlagOrInteger { .. }, OptionValue::Flag) => Ok(()),
        (ValueKind::Choice(choices), OptionValue::Choice(choice))
        | (ValueKind::Choice(choices), OptionValue::Text(choice)) => {
            if choices.contains(&choice.as_str()) {
                Ok(())
            } else {
                Err(invalid(format!(
                    "'{choice}' is not one of {}",
                    choices.join(", ")
                )))
            }
        }
        (ValueKind::Pages, OptionValue::Pages(selection)) => {
            if selection.file.trim().is_empty() {
                return Err(ConfigError::EmptyPageSource);
            }
            match &selection.range {
                Some(range) if range.trim().is_empty() => {
                    Err(invalid("page range cannot be empty".to_string()))
                }
                _ => Ok(()),
            }
        }
        (ValueKind::Layer, OptionValue::Layer(layer)) => {
            if layer.file.trim().is_empty() {
                Err(invalid("layer file cannot be empty".to_string()))
            } else {
                Ok(())
            }
        }
        (ValueKind::Encryption, OptionValue::Encryption(_)) => Ok(()),
        (ValueKind::Attachment, OptionValue::Attachment(attachment)) => {
            if attachment.file.trim().is_empty() {
                Err(invalid("attachment file cannot be empty".to_string()))
            } else {
                Ok(())
            }
        }
        (ValueKind::CopyAttachments, OptionValue::CopyAttachments(copy)) => {
            if copy.file.trim().is_empty() {
                Err(invalid("source file cannot be empty".to_string()))
            } else {
                Ok(())
            }
        }
        (ValueKind::Rotation, OptionValue::Rotation(rotation)) => {
            let angle = rotation.angle;
            if angle % 90 != 0 || !(-270..=270).contains(&angle) {
                Err(invalid(format!("{angle} is not a multiple of 90 in -270..=270")))
            } else if angle < 0 && !rotation.relative {
                Err(invalid("absolute rotation cannot be negative".to_string()))
            } else {
                Ok(())
            }
        }
        (kind, value) => Err(invalid(format!(
            "expected {}, got {}",
            kind_label(kind),
            value.kind_name()
        ))),
    }
}

fn kind_label(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Flag => "flag",
        ValueKind::Text => "text",
        ValueKind::Integer { .. } => "integer",
        ValueKind::FlagOrInteger { .. } => "flag or integer",
        ValueKind::Choice(_) => "choice",
        ValueKind::Pages => "page selection",
        ValueKind::Layer => "layer",
        ValueKind::Encryption => "encryption",
        ValueKind::Attachment => "attachment",
        ValueKind::CopyAttachments => "copy attachments",
        ValueKind::Rotation => "rotation",
    }
}

/// Validates cross-option rules, returning the first violation.
///
/// Rules are checked in this order: input presence, table conflicts and
/// companions (in table order), page selections, encryption, split pages.
pub fn validate_options(options: &OptionSet) -> Result<(), ConfigError> {
    let has_input = options.contains(OptionKey::InputFile);
    let has_empty = options.contains(OptionKey::Empty);
    match (has_input, has_empty) {
        (false, false) => return Err(ConfigError::MissingInput),
        (true, true) => return Err(ConfigError::ConflictingInput),
        _ => {}
    }

    for spec in OPTION_TABLE {
        if !options.contains(spec.key) {
            continue;
        }
        if let Some(other) = spec
            .conflicts_with
            .iter()
            .find(|other| options.contains(**other))
        {
            return Err(ConfigError::Conflict {
                option: spec.key,
                other: *other,
            });
        }
        if !spec.requires.is_empty() && !spec.requires.iter().any(|req| options.contains(*req)) {
            let requires = spec
                .requires
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(ConfigError::MissingCompanion {
                option: spec.key,
                requires,
            });
        }
    }

    for value in options.values(OptionKey::Pages) {
        if let OptionValue::Pages(selection) = value {
            if selection.is_primary() && !has_input {
                return Err(ConfigError::PageSelectionWithoutInput);
            }
        }
    }

    if let Some(OptionValue::Encryption(spec)) = options.get(OptionKey::Encrypt) {
        validate_encryption(spec, options.contains(OptionKey::AllowWeakCrypto))?;
    }

    if options.contains(OptionKey::SplitPages) && !options.contains(OptionKey::OutputFile) {
        return Err(ConfigError::SplitPagesWithoutOutput);
    }

    Ok(())
}

fn validate_encryption(spec: &EncryptionSpec, allow_weak: bool) -> Result<(), ConfigError> {
    let permissions = &spec.permissions;
    let owner_missing = spec.owner_password.is_empty() && !permissions.allow_insecure;
    if spec.user_password.is_empty() || owner_missing {
        return Err(ConfigError::IncompleteEncryption);
    }

    let bits = spec.key_length.bits();
    let unsupported = |permission: &str| ConfigError::UnsupportedPermission {
        bits,
        permission: permission.to_string(),
    };

    match spec.key_length {
        KeyLength::Bits40 => {
            let extended = [
                ("accessibility", permissions.accessibility.is_some()),
                ("assemble", permissions.assemble.is_some()),
                ("form", permissions.form.is_some()),
                ("modify-other", permissions.modify_other.is_some()),
                ("cleartext-metadata", permissions.cleartext_metadata),
                ("use-aes", permissions.use_aes.is_some()),
                ("force-V4", permissions.force_v4),
                ("force-R5", permissions.force_r5),
                ("allow-insecure", permissions.allow_insecure),
            ];
            if let Some((name, _)) = extended.iter().find(|(_, set)| *set) {
                return Err(unsupported(name));
            }
            if permissions.print == Some(PrintLevel::Low) {
                return Err(unsupported("print=low"));
            }
            if let Some(level) = permissions.modify {
                if !matches!(level, ModifyLevel::All | ModifyLevel::None) {
                    return Err(unsupported(&format!("modify={}", level.as_str())));
                }
            }
        }
        KeyLength::Bits128 => {
            if permissions.force_r5 {
                return Err(unsupported("force-R5"));
            }
            if permissions.allow_insecure {
                return Err(unsupported("allow-insecure"));
            }
        }
        KeyLength::Bits256 => {
            if permissions.use_aes.is_some() {
                return Err(unsupported("use-aes"));
            }
            if permissions.force_v4 {
                return Err(unsupported("force-V4"));
            }
        }
    }

    if spec.is_weak() && !allow_weak {
        return Err(ConfigError::WeakCryptoNotAllowed { bits });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PageSelection, Permissions};

    fn with_input() -> OptionSet {
        let mut options = OptionSet::new();
        options.set(OptionKey::InputFile, "in.pdf".into()).unwrap();
        options
    }

    fn encryption(spec: EncryptionSpec) -> OptionValue {
        OptionValue::Encryption(spec)
    }

    #[test]
    fn test_input_is_required() {
        assert_eq!(validate_options(&OptionSet::new()), Err(ConfigError::MissingInput));

        let mut options = with_input();
        options.set(OptionKey::Empty, OptionValue::Flag).unwrap();
        assert_eq!(validate_options(&options), Err(ConfigError::ConflictingInput));
    }

    #[test]
    fn test_conflict_is_reported_regardless_of_set_order() {
        let mut first = with_input();
        first.set(OptionKey::Qdf, OptionValue::Flag).unwrap();
        first
            .set(OptionKey::ObjectStreams, OptionValue::Choice("generate".into()))
            .unwrap();

        let mut second = with_input();
        second
            .set(OptionKey::ObjectStreams, OptionValue::Choice("generate".into()))
            .unwrap();
        second.set(OptionKey::Qdf, OptionValue::Flag).unwrap();

        let expected = Err(ConfigError::Conflict {
            option: OptionKey::Qdf,
            other: OptionKey::ObjectStreams,
        });
        assert_eq!(validate_options(&first), expected);
        assert_eq!(validate_options(&second), expected);
    }

    #[test]
    fn test_linearize_and_qdf_together_are_legal() {
        let mut options = with_input();
        options.set(OptionKey::OutputFile, "out.pdf".into()).unwrap();
        options.set(OptionKey::Linearize, OptionValue::Flag).unwrap();
        options.set(OptionKey::Qdf, OptionValue::Flag).unwrap();
        assert_eq!(validate_options(&options), Ok(()));
    }

    #[test]
    fn test_missing_companion_lists_alternatives() {
        let mut options = with_input();
        options.set(OptionKey::ShowEncryptionKey, OptionValue::Flag).unwrap();
        let err = validate_options(&options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--show-encryption-key requires --show-encryption or --check"
        );

        options.set(OptionKey::Check, OptionValue::Flag).unwrap();
        assert_eq!(validate_options(&options), Ok(()));
    }

    #[test]
    fn test_stream_data_needs_show_object() {
        for key in [OptionKey::RawStreamData, OptionKey::FilteredStreamData] {
            let mut options = with_input();
            options.set(key, OptionValue::Flag).unwrap();
            assert_eq!(
                validate_options(&options),
                Err(ConfigError::MissingCompanion {
                    option: key,
                    requires: "--show-object".to_string(),
                })
            );

            options.set(OptionKey::ShowObject, "5,0".into()).unwrap();
            assert_eq!(validate_options(&options), Ok(()));
        }
    }

    #[test]
    fn test_json_modifiers_need_json() {
        let mut options = with_input();
        options.set(OptionKey::JsonKey, "pages".into()).unwrap();
        assert!(matches!(
            validate_options(&options),
            Err(ConfigError::MissingCompanion {
                option: OptionKey::JsonKey,
                ..
            })
        ));
    }

    #[test]
    fn test_primary_page_selection_needs_input_file() {
        let mut options = OptionSet::new();
        options.set(OptionKey::Empty, OptionValue::Flag).unwrap();
        options
            .set(OptionKey::Pages, OptionValue::Pages(PageSelection::primary("1-3")))
            .unwrap();
        options.set(OptionKey::OutputFile, "out.pdf".into()).unwrap();
        assert_eq!(
            validate_options(&options),
            Err(ConfigError::PageSelectionWithoutInput)
        );
    }

    #[test]
    fn test_encryption_requires_both_passwords() {
        let mut options = with_input();
        options
            .set(
                OptionKey::Encrypt,
                encryption(EncryptionSpec::new("", "owner", KeyLength::Bits256)),
            )
            .unwrap();
        assert_eq!(validate_options(&options), Err(ConfigError::IncompleteEncryption));

        options
            .set(
                OptionKey::Encrypt,
                encryption(EncryptionSpec::new("user", "", KeyLength::Bits256)),
            )
            .unwrap();
        assert_eq!(validate_options(&options), Err(ConfigError::IncompleteEncryption));
    }

    #[test]
    fn test_weak_crypto_needs_opt_in() {
        let mut options = with_input();
        options
            .set(
                OptionKey::Encrypt,
                encryption(EncryptionSpec::new("user", "owner", KeyLength::Bits40)),
            )
            .unwrap();
        assert_eq!(
            validate_options(&options),
            Err(ConfigError::WeakCryptoNotAllowed { bits: 40 })
        );

        options.set(OptionKey::AllowWeakCrypto, OptionValue::Flag).unwrap();
        assert_eq!(validate_options(&options), Ok(()));
    }

    #[test]
    fn test_forty_bit_rejects_extended_permissions() {
        let spec = EncryptionSpec::new("user", "owner", KeyLength::Bits40).with_permissions(
            Permissions {
                assemble: Some(false),
                ..Permissions::default()
            },
        );
        let mut options = with_input();
        options.set(OptionKey::AllowWeakCrypto, OptionValue::Flag).unwrap();
        options.set(OptionKey::Encrypt, encryption(spec)).unwrap();
        assert_eq!(
            validate_options(&options),
            Err(ConfigError::UnsupportedPermission {
                bits: 40,
                permission: "assemble".to_string()
            })
        );
    }

    #[test]
    fn test_encrypt_conflicts_with_deterministic_id() {
        let mut options = with_input();
        options.set(OptionKey::DeterministicId, OptionValue::Flag).unwrap();
        options
            .set(
                OptionKey::Encrypt,
                encryption(EncryptionSpec::new("user", "owner", KeyLength::Bits256)),
            )
            .unwrap();
        assert!(matches!(
            validate_options(&options),
            Err(ConfigError::Conflict {
                option: OptionKey::Encrypt,
                other: OptionKey::DeterministicId
            })
        ));
    }

    #[test]
    fn test_split_pages_needs_output() {
        let mut options = with_input();
        options.set(OptionKey::SplitPages, OptionValue::Integer(10)).unwrap();
        assert_eq!(
            validate_options(&options),
            Err(ConfigError::SplitPagesWithoutOutput)
        );
    }

    #[test]
    fn test_check_value_rejects_wrong_kind_and_range() {
        assert!(check_value(OptionKey::Linearize, &OptionValue::Integer(1)).is_err());
        assert!(check_value(OptionKey::CompressionLevel, &OptionValue::Integer(10)).is_err());
        assert!(check_value(OptionKey::CompressionLevel, &OptionValue::Integer(9)).is_ok());
        assert!(check_value(OptionKey::OiMinWidth, &OptionValue::Integer(-1)).is_err());
        assert!(check_value(OptionKey::Password, &OptionValue::Text("  ".into())).is_err());
        assert!(
            check_value(OptionKey::ObjectStreams, &OptionValue::Choice("sometimes".into()))
                .is_err()
        );
        assert!(check_value(OptionKey::SplitPages, &OptionValue::Flag).is_ok());
        assert!(check_value(OptionKey::SplitPages, &OptionValue::Integer(0)).is_err());
    }
}
