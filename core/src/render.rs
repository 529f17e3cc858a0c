//! Argument-vector rendering.
//!
//! [`render`] is a pure function of the option set: it walks present
//! options in table order, which groups them by [`Category`](crate::Category),
//! and turns each into one or more argv elements. Values are separate
//! elements and never shell-quoted.

use crate::OptionSet;
use crate::table::OptionKey;
use crate::types::{
    AttachmentSpec, CopyAttachmentsSpec, EncryptionSpec, KeyLength, LayerSpec, ModifyLevel,
    OptionValue, PageSelection, Permissions, PrintLevel, pdf_date,
};
use crate::validate::ConfigError;

/// Closes `--pages`, `--encrypt`, overlay and attachment groups.
pub const GROUP_END: &str = "--";

/// Written in place of an output path to overwrite the input file.
pub const REPLACE_INPUT: &str = "--replace-input";

/// Validates `options`, then renders them.
pub fn build_arguments(options: &OptionSet) -> Result<Vec<String>, ConfigError> {
    options.validate()?;
    Ok(render(options))
}

/// Renders `options` into qpdf's argument vector.
///
/// Does not validate; callers that need a runnable vector should use
/// [`build_arguments`].
///
/// # Examples
///
/// ```
/// use qpdf_job_core::*;
///
/// let mut options = OptionSet::new();
/// options.set(OptionKey::OutputFile, "out.pdf".into()).unwrap();
/// options.set(OptionKey::Linearize, OptionValue::Flag).unwrap();
/// options.set(OptionKey::InputFile, "in.pdf".into()).unwrap();
/// options.set(OptionKey::Password, "secret".into()).unwrap();
///
/// assert_eq!(
///     render(&options),
///     vec!["--password=secret", "in.pdf", "--linearize", "out.pdf"]
/// );
/// ```
pub fn render(options: &OptionSet) -> Vec<String> {
    let mut args = Vec::new();

    for (key, values) in options.iter() {
        match key {
            OptionKey::InputFile | OptionKey::OutputFile => {
                if let Some(path) = values.last().and_then(OptionValue::as_text) {
                    args.push(path.to_string());
                }
            }
            OptionKey::Pages => render_pages(&mut args, values),
            _ => {
                for value in values {
                    render_value(&mut args, key, value);
                }
            }
        }
    }

    if !options.contains(OptionKey::OutputFile) && !options.is_inspection() {
        args.push(REPLACE_INPUT.to_string());
    }

    args
}

fn render_value(args: &mut Vec<String>, key: OptionKey, value: &OptionValue) {
    let flag = key.spec().flag();
    match value {
        OptionValue::Flag => args.push(flag),
        OptionValue::Text(text) | OptionValue::Choice(text) => args.push(format!("{flag}={text}")),
        OptionValue::Integer(n) => args.push(format!("{flag}={n}")),
        OptionValue::Rotation(rotation) => {
            args.push(format!("{flag}={}", rotation.to_arg_value()));
        }
        OptionValue::Layer(layer) => render_layer(args, flag, layer),
        OptionValue::Encryption(spec) => render_encryption(args, spec),
        OptionValue::Attachment(attachment) => render_attachment(args, attachment),
        OptionValue::CopyAttachments(copy) => render_copy_attachments(args, copy),
        // Page selections share one group and are rendered by `render_pages`.
        OptionValue::Pages(_) => {}
    }
}

fn render_pages(args: &mut Vec<String>, values: &[OptionValue]) {
    let selections: Vec<&PageSelection> = values
        .iter()
        .filter_map(|value| match value {
            OptionValue::Pages(selection) => Some(selection),
            _ => None,
        })
        .collect();
    if selections.is_empty() {
        return;
    }

    args.push(OptionKey::Pages.spec().flag());
    for selection in selections {
        args.push(selection.file.clone());
        if let Some(password) = &selection.password {
            args.push(format!("--password={password}"));
        }
        if let Some(range) = &selection.range {
            args.push(range.clone());
        }
    }
    args.push(GROUP_END.to_string());
}

fn render_layer(args: &mut Vec<String>, flag: String, layer: &LayerSpec) {
    args.push(flag);
    args.push(layer.file.clone());
    push_opt(args, "password", layer.password.as_deref());
    push_opt(args, "to", layer.to.as_deref());
    push_opt(args, "from", layer.from.as_deref());
    push_opt(args, "repeat", layer.repeat.as_deref());
    args.push(GROUP_END.to_string());
}

fn render_encryption(args: &mut Vec<String>, spec: &EncryptionSpec) {
    args.push(OptionKey::Encrypt.spec().flag());
    args.push(spec.user_password.clone());
    args.push(spec.owner_password.clone());
    args.push(spec.key_length.bits().to_string());
    render_permissions(args, spec.key_length, &spec.permissions);
    args.push(GROUP_END.to_string());
}

fn render_permissions(args: &mut Vec<String>, key_length: KeyLength, perms: &Permissions) {
    let yes_no = |allowed: bool| if allowed { "y" } else { "n" };

    if key_length == KeyLength::Bits40 {
        // 40-bit keys only know all-or-nothing print and modify.
        if let Some(print) = perms.print {
            args.push(format!("--print={}", yes_no(print != PrintLevel::None)));
        }
        if let Some(modify) = perms.modify {
            args.push(format!("--modify={}", yes_no(modify != ModifyLevel::None)));
        }
        push_yes_no(args, "extract", perms.extract);
        push_yes_no(args, "annotate", perms.annotate);
        return;
    }

    push_yes_no(args, "accessibility", perms.accessibility);
    push_yes_no(args, "extract", perms.extract);
    if let Some(print) = perms.print {
        args.push(format!("--print={}", print.as_str()));
    }
    if let Some(modify) = perms.modify {
        args.push(format!("--modify={}", modify.as_str()));
    }
    push_yes_no(args, "annotate", perms.annotate);
    push_yes_no(args, "assemble", perms.assemble);
    push_yes_no(args, "form", perms.form);
    push_yes_no(args, "modify-other", perms.modify_other);
    if perms.cleartext_metadata {
        args.push("--cleartext-metadata".to_string());
    }
    push_yes_no(args, "use-aes", perms.use_aes);
    if perms.force_v4 {
        args.push("--force-V4".to_string());
    }
    if perms.force_r5 {
        args.push("--force-R5".to_string());
    }
    if perms.allow_insecure {
        args.push("--allow-insecure".to_string());
    }
}

fn render_attachment(args: &mut Vec<String>, attachment: &AttachmentSpec) {
    args.push(OptionKey::AddAttachment.spec().flag());
    args.push(attachment.file.clone());
    push_opt(args, "key", attachment.key.as_deref());
    push_opt(args, "filename", attachment.filename.as_deref());
    if let Some(date) = &attachment.creation_date {
        args.push(format!("--creationdate={}", pdf_date(date)));
    }
    if let Some(date) = &attachment.mod_date {
        args.push(format!("--moddate={}", pdf_date(date)));
    }
    push_opt(args, "mimetype", attachment.mime_type.as_deref());
    push_opt(args, "description", attachment.description.as_deref());
    if attachment.replace {
        args.push("--replace".to_string());
    }
    args.push(GROUP_END.to_string());
}

fn render_copy_attachments(args: &mut Vec<String>, copy: &CopyAttachmentsSpec) {
    args.push(OptionKey::CopyAttachmentsFrom.spec().flag());
    args.push(copy.file.clone());
    push_opt(args, "prefix", copy.prefix.as_deref());
    push_opt(args, "password", copy.password.as_deref());
    args.push(GROUP_END.to_string());
}

fn push_opt(args: &mut Vec<String>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        args.push(format!("--{name}={value}"));
    }
}

fn push_yes_no(args: &mut Vec<String>, name: &str, value: Option<bool>) {
    if let Some(allowed) = value {
        args.push(format!("--{name}={}", if allowed { "y" } else { "n" }));
    }
}
