//! The option set a job accumulates before it is rendered.

use std::collections::BTreeMap;

use crate::exit::JobMode;
use crate::table::{OptionKey, ValueKind};
use crate::types::{OptionValue, Rotation};
use crate::validate::{ConfigError, check_value, validate_options};

/// Typed option state for one qpdf invocation.
///
/// Keys iterate in option-table order, which is also rendering order.
/// Scalar options hold one value and the last set wins; options marked
/// `multiple` in the table keep every value in insertion order.
///
/// # Examples
///
/// ```
/// use qpdf_job_core::{OptionKey, OptionSet, OptionValue};
///
/// let mut options = OptionSet::new();
/// options.set(OptionKey::InputFile, "in.pdf".into()).unwrap();
/// options.set_named("compression-level", Some("9")).unwrap();
/// options.set_named("linearize", None).unwrap();
///
/// assert_eq!(options.get(OptionKey::CompressionLevel), Some(&OptionValue::Integer(9)));
/// assert!(options.contains(OptionKey::Linearize));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: BTreeMap<OptionKey, Vec<OptionValue>>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key` after checking its kind and range.
    ///
    /// Cross-option rules are left to [`validate`](Self::validate).
    pub fn set(&mut self, key: OptionKey, value: OptionValue) -> Result<(), ConfigError> {
        check_value(key, &value)?;
        let slot = self.values.entry(key).or_default();
        if !key.spec().multiple {
            slot.clear();
        }
        slot.push(value);
        Ok(())
    }

    /// Stores an option given by its command-line spelling.
    ///
    /// `value` is parsed according to the option's kind. Group options
    /// (pages, overlay, encryption, attachments) need their typed values
    /// and are rejected here; `--rotate` accepts `[+|-]angle[:pages]`.
    pub fn set_named(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let key =
            OptionKey::from_name(name).ok_or_else(|| ConfigError::UnknownOption(name.to_string()))?;
        let parsed = parse_value(key, value)?;
        self.set(key, parsed)
    }

    /// Removes every value stored under `key`.
    pub fn unset(&mut self, key: OptionKey) {
        self.values.remove(&key);
    }

    pub fn contains(&self, key: OptionKey) -> bool {
        self.values.get(&key).is_some_and(|values| !values.is_empty())
    }

    /// The most recently stored value for `key`.
    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.values.get(&key).and_then(|values| values.last())
    }

    /// Every value stored for `key`, in insertion order.
    pub fn values(&self, key: OptionKey) -> &[OptionValue] {
        self.values.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Text payload of `key`, if it holds text or a choice.
    pub fn text(&self, key: OptionKey) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_text)
    }

    /// Present options in table order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &[OptionValue])> {
        self.values
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(key, values)| (*key, values.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Mode used to classify the exit code.
    pub fn mode(&self) -> JobMode {
        if self.contains(OptionKey::IsEncrypted) {
            JobMode::EncryptionCheck
        } else if self.contains(OptionKey::RequiresPassword) {
            JobMode::PasswordCheck
        } else {
            JobMode::Normal
        }
    }

    /// `true` when any present option only reads the input.
    pub fn is_inspection(&self) -> bool {
        self.iter().any(|(key, _)| key.spec().inspection)
    }

    /// `true` when stdout carries binary data rather than a text report.
    pub fn wants_binary_extraction(&self) -> bool {
        let stream_data = self.contains(OptionKey::RawStreamData)
            || self.contains(OptionKey::FilteredStreamData);
        self.contains(OptionKey::ShowAttachment)
            || self.contains(OptionKey::Json)
            || (self.contains(OptionKey::ShowObject) && stream_data)
    }

    /// Checks cross-option rules. See [`validate_options`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_options(self)
    }
}

fn parse_value(key: OptionKey, raw: Option<&str>) -> Result<OptionValue, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        option: key,
        reason: reason.to_string(),
    };
    let parse_int = |text: &str| {
        text.trim()
            .parse::<i64>()
            .map(OptionValue::Integer)
            .map_err(|_| invalid(&format!("'{text}' is not an integer")))
    };

    match (key.spec().kind, raw) {
        (ValueKind::Flag, None) => Ok(OptionValue::Flag),
        (ValueKind::Flag, Some(_)) => Err(invalid("flag takes no value")),
        (ValueKind::FlagOrInteger { .. }, None) => Ok(OptionValue::Flag),
        (ValueKind::FlagOrInteger { .. }, Some(text))
        | (ValueKind::Integer { .. }, Some(text)) => parse_int(text),
        (ValueKind::Text, Some(text)) => Ok(OptionValue::Text(text.to_string())),
        (ValueKind::Choice(_), Some(text)) => Ok(OptionValue::Choice(text.to_string())),
        (ValueKind::Rotation, Some(text)) => parse_rotation(text).ok_or_else(|| {
            invalid(&format!("'{text}' is not a rotation like +90 or 180:1-3"))
        }),
        (ValueKind::Pages, _)
        | (ValueKind::Layer, _)
        | (ValueKind::Encryption, _)
        | (ValueKind::Attachment, _)
        | (ValueKind::CopyAttachments, _) => {
            Err(invalid("group options must be set with a typed value"))
        }
        (_, None) => Err(invalid("a value is required")),
    }
}

fn parse_rotation(text: &str) -> Option<OptionValue> {
    let (angle, pages) = match text.split_once(':') {
        Some((angle, pages)) => (angle, Some(pages)),
        None => (text, None),
    };
    let relative = angle.starts_with('+') || angle.starts_with('-');
    let degrees = angle.parse::<i32>().ok()?;
    let rotation = if relative {
        Rotation::relative(degrees)
    } else {
        Rotation::absolute(degrees)
    };
    Some(OptionValue::Rotation(match pages {
        Some(pages) if !pages.is_empty() => rotation.on_pages(pages),
        _ => rotation,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageSelection;

    #[test]
    fn test_scalar_options_keep_last_value() {
        let mut options = OptionSet::new();
        options.set(OptionKey::Password, "first".into()).unwrap();
        options.set(OptionKey::Password, "second".into()).unwrap();
        assert_eq!(options.values(OptionKey::Password).len(), 1);
        assert_eq!(options.text(OptionKey::Password), Some("second"));
    }

    #[test]
    fn test_multiple_options_append_in_order() {
        let mut options = OptionSet::new();
        options
            .set(OptionKey::Pages, OptionValue::Pages(PageSelection::primary("1-3")))
            .unwrap();
        options
            .set(
                OptionKey::Pages,
                OptionValue::Pages(PageSelection::new("b.pdf", None)),
            )
            .unwrap();
        let files: Vec<_> = options
            .values(OptionKey::Pages)
            .iter()
            .map(|value| match value {
                OptionValue::Pages(selection) => selection.file.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(files, vec![".", "b.pdf"]);
    }

    #[test]
    fn test_rejected_value_leaves_state_unchanged() {
        let mut options = OptionSet::new();
        options.set(OptionKey::CompressionLevel, OptionValue::Integer(5)).unwrap();
        assert!(options
            .set(OptionKey::CompressionLevel, OptionValue::Integer(0))
            .is_err());
        assert_eq!(
            options.get(OptionKey::CompressionLevel),
            Some(&OptionValue::Integer(5))
        );
    }

    #[test]
    fn test_set_named_parses_by_kind() {
        let mut options = OptionSet::new();
        options.set_named("--split-pages", None).unwrap();
        options.set_named("object-streams", Some("generate")).unwrap();
        options.set_named("rotate", Some("+90:1-3")).unwrap();

        assert_eq!(options.get(OptionKey::SplitPages), Some(&OptionValue::Flag));
        assert_eq!(options.text(OptionKey::ObjectStreams), Some("generate"));
        assert_eq!(
            options.get(OptionKey::Rotate),
            Some(&OptionValue::Rotation(Rotation::relative(90).on_pages("1-3")))
        );
    }

    #[test]
    fn test_set_named_errors() {
        let mut options = OptionSet::new();
        assert_eq!(
            options.set_named("--frobnicate", None),
            Err(ConfigError::UnknownOption("--frobnicate".to_string()))
        );
        assert!(options.set_named("linearize", Some("yes")).is_err());
        assert!(options.set_named("compression-level", Some("high")).is_err());
        assert!(options.set_named("password", None).is_err());
        assert!(options.set_named("pages", Some("1-3")).is_err());
        assert!(options.is_empty());
    }

    #[test]
    fn test_mode_and_inspection() {
        let mut options = OptionSet::new();
        assert_eq!(options.mode(), JobMode::Normal);
        assert!(!options.is_inspection());

        options.set(OptionKey::RequiresPassword, OptionValue::Flag).unwrap();
        assert_eq!(options.mode(), JobMode::PasswordCheck);
        assert!(options.is_inspection());

        options.unset(OptionKey::RequiresPassword);
        options.set(OptionKey::IsEncrypted, OptionValue::Flag).unwrap();
        assert_eq!(options.mode(), JobMode::EncryptionCheck);
    }

    #[test]
    fn test_binary_extraction_detection() {
        let mut options = OptionSet::new();
        options.set(OptionKey::ShowObject, "5,0".into()).unwrap();
        assert!(!options.wants_binary_extraction());
        options.set(OptionKey::FilteredStreamData, OptionValue::Flag).unwrap();
        assert!(options.wants_binary_extraction());

        let mut json = OptionSet::new();
        json.set(OptionKey::Json, OptionValue::Integer(2)).unwrap();
        assert!(json.wants_binary_extraction());
    }
}
