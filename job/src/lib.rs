//! Run qpdf jobs and read their reports.
//!
//! [`Job`] is a fluent builder over an [`OptionSet`]. Setters never fail
//! immediately: the first rejected value is remembered and reported when
//! the job is rendered or run. Running a job validates and renders the
//! options, starts one qpdf process through a [`Runner`], and classifies the
//! exit code for the job's mode.
//!
//! Captured text can be turned into typed records with the parsers in
//! [`reports`], either directly or through the helpers on [`JobOutput`].
//!
//! # Example
//!
//! ```no_run
//! use qpdf_job::{ExitCode, Job};
//!
//! let output = Job::new()
//!     .input_file("in.pdf")
//!     .linearize()
//!     .output_file("out.pdf")
//!     .run()
//!     .unwrap();
//! assert_eq!(output.exit_code, ExitCode::Success);
//!
//! let report = Job::new().input_file("in.pdf").check().run().unwrap().check_report();
//! for warning in report.warnings() {
//!     println!("{}", warning.message);
//! }
//! ```

mod error;
pub mod reports;
mod runner;
mod settings;

use std::time::Duration;

use tracing::info;

pub use error::{ExecutionError, JobError, Result, SettingsError};
pub use qpdf_job_core::*;
pub use runner::{ProcessResult, ProcessRunner, Runner};
pub use settings::{
    DEFAULT_PROGRAM, DEFAULT_TIMEOUT_MS, ENV_BINARY, ENV_TIMEOUT_MS, RunnerSettings,
};

use reports::{
    AttachmentEntry, AttachmentsParser, CheckParser, CheckReport, EncryptionInfo,
    EncryptionParser, LinearizationParser, LinearizationReport, PageEntry, PagesParser,
    ReportParser, XrefEntry, XrefParser,
};

/// One configured qpdf invocation.
#[derive(Debug, Clone, Default)]
pub struct Job {
    options: OptionSet,
    settings: RunnerSettings,
    error: Option<ConfigError>,
}

macro_rules! flag_setters {
    ($($(#[$meta:meta])* $name:ident => $key:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(self) -> Self {
                self.with(OptionKey::$key, OptionValue::Flag)
            }
        )+
    };
}

macro_rules! text_setters {
    ($($(#[$meta:meta])* $name:ident => $key:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(self, value: impl Into<String>) -> Self {
                self.with(OptionKey::$key, OptionValue::Text(value.into()))
            }
        )+
    };
}

macro_rules! integer_setters {
    ($($(#[$meta:meta])* $name:ident => $key:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(self, value: i64) -> Self {
                self.with(OptionKey::$key, OptionValue::Integer(value))
            }
        )+
    };
}

macro_rules! choice_setters {
    ($($(#[$meta:meta])* $name:ident => $key:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(self, choice: &str) -> Self {
                self.with(OptionKey::$key, OptionValue::Choice(choice.to_string()))
            }
        )+
    };
}

macro_rules! yes_no_setters {
    ($($(#[$meta:meta])* $name:ident => $key:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(self, enabled: bool) -> Self {
                let choice = if enabled { "y" } else { "n" };
                self.with(OptionKey::$key, OptionValue::Choice(choice.to_string()))
            }
        )+
    };
}

impl Job {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the runner settings used by [`run`](Self::run).
    pub fn with_settings(mut self, settings: RunnerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    fn with(mut self, key: OptionKey, value: OptionValue) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.options.set(key, value) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Sets an option by its command-line name (`"linearize"`,
    /// `"--compression-level"` with `Some("9")`).
    pub fn option(mut self, name: &str, value: Option<&str>) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.options.set_named(name, value) {
                self.error = Some(err);
            }
        }
        self
    }

    flag_setters! {
        /// Permit 40-bit and non-AES 128-bit encryption.
        allow_weak_crypto => AllowWeakCrypto,
        suppress_password_recovery => SuppressPasswordRecovery,
        /// Give up on damaged files instead of reconstructing the xref table.
        suppress_recovery => SuppressRecovery,
        ignore_xref_streams => IgnoreXrefStreams,
        /// Exit 0 instead of 3 when there are warnings.
        warning_exit_0 => WarningExit0,
        no_warn => NoWarn,
        verbose => Verbose,
        /// Start from an empty PDF instead of an input file.
        empty => Empty,
        check => Check,
        check_linearization => CheckLinearization,
        show_linearization => ShowLinearization,
        show_xref => ShowXref,
        /// With [`show_object`](Self::show_object): write the raw stream data.
        raw_stream_data => RawStreamData,
        /// With [`show_object`](Self::show_object): write the decoded stream data.
        filtered_stream_data => FilteredStreamData,
        show_npages => ShowNPages,
        show_pages => ShowPages,
        with_images => WithImages,
        list_attachments => ListAttachments,
        show_encryption => ShowEncryption,
        show_encryption_key => ShowEncryptionKey,
        decrypt => Decrypt,
        remove_restrictions => RemoveRestrictions,
        recompress_flate => RecompressFlate,
        coalesce_contents => CoalesceContents,
        externalize_inline_images => ExternalizeInlineImages,
        optimize_images => OptimizeImages,
        keep_inline_images => KeepInlineImages,
        flatten_rotation => FlattenRotation,
        generate_appearances => GenerateAppearances,
        remove_page_labels => RemovePageLabels,
        preserve_unreferenced_resources => PreserveUnreferencedResources,
        linearize => Linearize,
        /// Write a file in QDF mode for inspection with a text editor.
        qdf => Qdf,
        preserve_unreferenced => PreserveUnreferenced,
        newline_before_endstream => NewlineBeforeEndstream,
        no_original_object_ids => NoOriginalObjectIds,
        deterministic_id => DeterministicId,
    }

    text_setters! {
        password => Password,
        password_file => PasswordFile,
        input_file => InputFile,
        /// Object to print, as `obj[,gen]` or `trailer`.
        show_object => ShowObject,
        /// Writes the attachment with this key to stdout as binary data.
        show_attachment => ShowAttachment,
        /// Copy encryption parameters from another file.
        copy_encryption => CopyEncryption,
        encryption_file_password => EncryptionFilePassword,
        remove_attachment => RemoveAttachment,
        min_version => MinVersion,
        force_version => ForceVersion,
        json_key => JsonKey,
        json_object => JsonObject,
        json_stream_prefix => JsonStreamPrefix,
        output_file => OutputFile,
    }

    integer_setters! {
        keep_files_open_threshold => KeepFilesOpenThreshold,
        /// Deflate level, 1 to 9.
        compression_level => CompressionLevel,
        ii_min_bytes => IiMinBytes,
        oi_min_width => OiMinWidth,
        oi_min_height => OiMinHeight,
        oi_min_area => OiMinArea,
    }

    choice_setters! {
        /// `bytes`, `hex-bytes`, `unicode` or `auto`.
        password_mode => PasswordMode,
        /// `none`, `generalized`, `specialized` or `all`.
        decode_level => DecodeLevel,
        /// `compress`, `preserve` or `uncompress`.
        stream_data => StreamData,
        /// `all`, `print` or `screen`.
        flatten_annotations => FlattenAnnotations,
        /// `auto`, `yes` or `no`.
        remove_unreferenced_resources => RemoveUnreferencedResources,
        /// `preserve`, `disable` or `generate`.
        object_streams => ObjectStreams,
        /// `none`, `inline` or `file`.
        json_stream_data => JsonStreamData,
    }

    yes_no_setters! {
        keep_files_open => KeepFilesOpen,
        compress_streams => CompressStreams,
        normalize_content => NormalizeContent,
    }

    pub fn encrypt(self, spec: EncryptionSpec) -> Self {
        self.with(OptionKey::Encrypt, OptionValue::Encryption(spec))
    }

    pub fn rotate(self, rotation: Rotation) -> Self {
        self.with(OptionKey::Rotate, OptionValue::Rotation(rotation))
    }

    /// Adds one source to the `--pages` group.
    pub fn pages(self, selection: PageSelection) -> Self {
        self.with(OptionKey::Pages, OptionValue::Pages(selection))
    }

    /// Interleaves page sources, `group` pages at a time (1 when `None`).
    pub fn collate(self, group: Option<u32>) -> Self {
        self.with(OptionKey::Collate, flag_or_integer(group))
    }

    pub fn overlay(self, layer: LayerSpec) -> Self {
        self.with(OptionKey::Overlay, OptionValue::Layer(layer))
    }

    pub fn underlay(self, layer: LayerSpec) -> Self {
        self.with(OptionKey::Underlay, OptionValue::Layer(layer))
    }

    /// Embeds a file. A missing media type is filled in from the file name.
    pub fn add_attachment(self, mut attachment: AttachmentSpec) -> Self {
        if attachment.mime_type.is_none() {
            let name = attachment.filename.as_deref().unwrap_or(&attachment.file);
            attachment.mime_type = Some(mime_type(name).to_string());
        }
        self.with(OptionKey::AddAttachment, OptionValue::Attachment(attachment))
    }

    pub fn copy_attachments_from(self, source: CopyAttachmentsSpec) -> Self {
        self.with(OptionKey::CopyAttachmentsFrom, OptionValue::CopyAttachments(source))
    }

    /// Writes one output file per `group` pages (1 when `None`).
    pub fn split_pages(self, group: Option<u32>) -> Self {
        self.with(OptionKey::SplitPages, flag_or_integer(group))
    }

    /// Writes the JSON representation, optionally pinning the format version.
    pub fn json(self, version: Option<u32>) -> Self {
        self.with(OptionKey::Json, flag_or_integer(version))
    }

    /// Validates and renders the argument vector without running anything.
    pub fn arguments(&self) -> std::result::Result<Vec<String>, ConfigError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        build_arguments(&self.options)
    }

    /// Runs the job. The exit code is classified for the job's
    /// [`mode`](OptionSet::mode) in [`JobOutput::outcome`].
    pub fn run(&self) -> Result<JobOutput> {
        self.run_with(&ProcessRunner::new(self.settings.clone()))
    }

    /// Like [`run`](Self::run), with a caller-supplied runner.
    pub fn run_with(&self, runner: &dyn Runner) -> Result<JobOutput> {
        let args = self.arguments()?;
        let result = runner.execute(&args, self.options.wants_binary_extraction())?;
        let outcome = classify(result.raw_exit_code, self.options.mode());
        info!(
            outcome = %outcome,
            exit_code = result.raw_exit_code,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "qpdf job finished"
        );
        Ok(JobOutput::new(outcome, result))
    }

    /// Asks qpdf whether the input is encrypted (`--is-encrypted`).
    pub fn run_is_encrypted(&self) -> Result<EncryptionStatus> {
        self.run_is_encrypted_with(&ProcessRunner::new(self.settings.clone()))
    }

    pub fn run_is_encrypted_with(&self, runner: &dyn Runner) -> Result<EncryptionStatus> {
        let raw = self.run_check(OptionKey::IsEncrypted, runner)?;
        let status = EncryptionStatus::from_raw(raw);
        info!(outcome = %status, exit_code = raw, "qpdf encryption check finished");
        Ok(status)
    }

    /// Asks qpdf which password the input needs (`--requires-password`).
    pub fn run_requires_password(&self) -> Result<PasswordStatus> {
        self.run_requires_password_with(&ProcessRunner::new(self.settings.clone()))
    }

    pub fn run_requires_password_with(&self, runner: &dyn Runner) -> Result<PasswordStatus> {
        let raw = self.run_check(OptionKey::RequiresPassword, runner)?;
        let status = PasswordStatus::from_raw(raw);
        info!(outcome = %status, exit_code = raw, "qpdf password check finished");
        Ok(status)
    }

    fn run_check(&self, key: OptionKey, runner: &dyn Runner) -> Result<i32> {
        let args = self.clone().with(key, OptionValue::Flag).arguments()?;
        let result = runner.execute(&args, false)?;
        Ok(result.raw_exit_code)
    }
}

fn flag_or_integer(value: Option<u32>) -> OptionValue {
    match value {
        Some(n) => OptionValue::Integer(i64::from(n)),
        None => OptionValue::Flag,
    }
}

/// Result of [`Job::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutput {
    /// Exit code read with the normal-job table.
    pub exit_code: ExitCode,
    /// Exit code read for the job's mode; differs from `exit_code` for
    /// `--is-encrypted` and `--requires-password` jobs.
    pub outcome: ExitOutcome,
    pub raw_exit_code: i32,
    /// Stdout text, trailing whitespace removed.
    pub text: Option<String>,
    /// Stderr text, where qpdf writes warnings.
    pub stderr: Option<String>,
    /// Stdout bytes for jobs that extract binary data.
    pub data: Option<Vec<u8>>,
    pub args: Vec<String>,
    pub elapsed: Duration,
}

impl JobOutput {
    fn new(outcome: ExitOutcome, result: ProcessResult) -> Self {
        Self {
            exit_code: ExitCode::from_raw(result.raw_exit_code),
            outcome,
            raw_exit_code: result.raw_exit_code,
            text: result.stdout_text,
            stderr: result.stderr_text,
            data: result.extracted_binary,
            args: result.args,
            elapsed: result.elapsed,
        }
    }

    fn stdout(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Stdout followed by stderr.
    fn combined(&self) -> String {
        [self.text.as_deref(), self.stderr.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn check_report(&self) -> CheckReport {
        CheckParser.parse(&self.combined())
    }

    pub fn xref(&self) -> Vec<XrefEntry> {
        XrefParser.parse(self.stdout())
    }

    pub fn attachments(&self) -> Vec<AttachmentEntry> {
        AttachmentsParser.parse(self.stdout())
    }

    pub fn encryption_info(&self) -> EncryptionInfo {
        EncryptionParser.parse(self.stdout())
    }

    pub fn linearization(&self) -> LinearizationReport {
        LinearizationParser.parse(&self.combined())
    }

    pub fn pages(&self) -> Vec<PageEntry> {
        PagesParser.parse(self.stdout())
    }

    pub fn page_count(&self) -> Option<u32> {
        reports::page_count(self.stdout())
    }

    /// Parses `--json` output from the extracted data (or stdout text).
    pub fn json_document(&self) -> serde_json::Result<JsonDocument> {
        match &self.data {
            Some(bytes) => JsonDocument::from_slice(bytes),
            None => JsonDocument::from_slice(self.stdout().as_bytes()),
        }
    }

    pub fn outlines(&self) -> serde_json::Result<Vec<PdfOutline>> {
        self.json_document().map(|doc| doc.outlines)
    }
}
