use std::cell::RefCell;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use qpdf_job::{
    AttachmentSpec, ConfigError, EncryptionSpec, EncryptionStatus, ExecutionError, ExitCode,
    ExitOutcome, Job, JobError, KeyLength, LayerSpec, OptionKey, PageSelection, PasswordStatus,
    ProcessResult, Runner,
};

/// Returns a fixed result and records every argument vector it was given.
struct CannedRunner {
    raw_exit_code: i32,
    stdout: Option<&'static str>,
    stderr: Option<&'static str>,
    calls: RefCell<Vec<(Vec<String>, bool)>>,
}

impl CannedRunner {
    fn new(raw_exit_code: i32) -> Self {
        Self {
            raw_exit_code,
            stdout: None,
            stderr: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn with_stdout(mut self, text: &'static str) -> Self {
        self.stdout = Some(text);
        self
    }

    fn with_stderr(mut self, text: &'static str) -> Self {
        self.stderr = Some(text);
        self
    }

    fn last_args(&self) -> Vec<String> {
        self.calls.borrow().last().map(|(args, _)| args.clone()).unwrap_or_default()
    }
}

impl Runner for CannedRunner {
    fn execute(
        &self,
        args: &[String],
        extract_binary: bool,
    ) -> Result<ProcessResult, ExecutionError> {
        self.calls.borrow_mut().push((args.to_vec(), extract_binary));
        let (stdout_text, extracted_binary) = match (self.stdout, extract_binary) {
            (Some(text), true) => (None, Some(text.as_bytes().to_vec())),
            (text, _) => (text.map(String::from), None),
        };
        Ok(ProcessResult {
            args: args.to_vec(),
            raw_exit_code: self.raw_exit_code,
            stdout_text,
            stderr_text: self.stderr.map(String::from),
            extracted_binary,
            elapsed: Duration::from_millis(5),
        })
    }
}

#[test]
fn test_arguments_follow_canonical_order() {
    let job = Job::new()
        .output_file("out.pdf")
        .object_streams("generate")
        .compression_level(9)
        .pages(PageSelection::primary("1-5"))
        .input_file("in.pdf")
        .password("secret");

    assert_eq!(
        job.arguments().unwrap(),
        vec![
            "--password=secret",
            "in.pdf",
            "--compression-level=9",
            "--pages",
            ".",
            "1-5",
            "--",
            "--object-streams=generate",
            "out.pdf",
        ]
    );
}

#[test]
fn test_first_setter_error_is_reported() {
    let job = Job::new()
        .input_file("in.pdf")
        .compression_level(12)
        .decode_level("everything");

    match job.arguments() {
        Err(ConfigError::InvalidValue { option, .. }) => {
            assert_eq!(option, OptionKey::CompressionLevel)
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_configuration_error_never_spawns() {
    let runner = CannedRunner::new(0);
    let job = Job::new()
        .input_file("in.pdf")
        .encrypt(EncryptionSpec::new("user", "owner", KeyLength::Bits256))
        .decrypt();

    let err = job.run_with(&runner).unwrap_err();
    assert!(matches!(err, JobError::Configuration(ConfigError::Conflict { .. })));
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_run_classifies_warnings_and_parses_check_report() {
    let runner = CannedRunner::new(3)
        .with_stdout("checking in.pdf\nPDF Version: 1.4\nFile is not encrypted")
        .with_stderr("WARNING: in.pdf: file is damaged\nWARNING: in.pdf: xref not found");
    let output = Job::new().input_file("in.pdf").check().run_with(&runner).unwrap();

    assert_eq!(output.exit_code, ExitCode::WarningsFileProcessed);
    assert_eq!(output.raw_exit_code, 3);
    assert_eq!(runner.last_args(), vec!["in.pdf", "--check"]);

    let report = output.check_report();
    assert_eq!(report.pdf_version.as_deref(), Some("1.4"));
    assert_eq!(report.warnings().count(), 2);
}

#[test]
fn test_in_place_job_uses_replace_input() {
    let runner = CannedRunner::new(0);
    let output = Job::new()
        .input_file("in.pdf")
        .linearize()
        .run_with(&runner)
        .unwrap();

    assert_eq!(output.exit_code, ExitCode::Success);
    assert_eq!(runner.last_args(), vec!["in.pdf", "--linearize", "--replace-input"]);
}

#[test]
fn test_run_classifies_for_the_job_mode() {
    let runner = CannedRunner::new(2);
    let output = Job::new()
        .input_file("in.pdf")
        .option("is-encrypted", None)
        .run_with(&runner)
        .unwrap();
    assert_eq!(
        output.outcome,
        ExitOutcome::EncryptionCheck(EncryptionStatus::NotEncrypted)
    );

    let output = Job::new()
        .input_file("in.pdf")
        .option("requires-password", None)
        .run_with(&CannedRunner::new(0))
        .unwrap();
    assert_eq!(
        output.outcome,
        ExitOutcome::PasswordCheck(PasswordStatus::OtherPasswordRequired)
    );

    let output = Job::new()
        .input_file("in.pdf")
        .check()
        .run_with(&CannedRunner::new(2))
        .unwrap();
    assert_eq!(output.outcome, ExitOutcome::Normal(ExitCode::ErrorsFileNotProcessed));
}

#[test]
fn test_is_encrypted_mode() {
    let runner = CannedRunner::new(2);
    let status = Job::new()
        .input_file("in.pdf")
        .run_is_encrypted_with(&runner)
        .unwrap();

    assert_eq!(status, EncryptionStatus::NotEncrypted);
    assert_eq!(runner.last_args(), vec!["in.pdf", "--is-encrypted"]);
}

#[test]
fn test_requires_password_mode() {
    let runner = CannedRunner::new(0);
    let status = Job::new()
        .input_file("in.pdf")
        .password("owner")
        .run_requires_password_with(&runner)
        .unwrap();

    assert_eq!(status, PasswordStatus::OtherPasswordRequired);
    assert_eq!(
        runner.last_args(),
        vec!["--password=owner", "in.pdf", "--requires-password"]
    );
}

#[test]
fn test_binary_extraction_for_attachments_and_json() {
    let runner = CannedRunner::new(0).with_stdout(r#"{"version": 2, "outlines": []}"#);
    let output = Job::new()
        .input_file("in.pdf")
        .json(Some(2))
        .json_key("outlines")
        .run_with(&runner)
        .unwrap();

    let calls = runner.calls.borrow();
    assert!(calls[0].1, "json output should be extracted as bytes");
    assert!(output.text.is_none());
    assert!(output.data.is_some());
    assert_eq!(output.json_document().unwrap().version, Some(2));
    assert!(output.outlines().unwrap().is_empty());
}

#[test]
fn test_show_npages_helper() {
    let runner = CannedRunner::new(0).with_stdout("20");
    let output = Job::new()
        .input_file("in.pdf")
        .show_npages()
        .run_with(&runner)
        .unwrap();
    assert_eq!(output.page_count(), Some(20));
}

#[test]
fn test_attachment_mime_type_is_inferred() {
    let date = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let args = Job::new()
        .input_file("in.pdf")
        .add_attachment(AttachmentSpec::new("report.PDF").with_creation_date(date))
        .add_attachment(AttachmentSpec::new("blob").with_mime_type("text/plain"))
        .output_file("out.pdf")
        .arguments()
        .unwrap();

    assert_eq!(
        args,
        vec![
            "in.pdf",
            "--add-attachment",
            "report.PDF",
            "--creationdate=D:20230101000000Z",
            "--mimetype=application/pdf",
            "--",
            "--add-attachment",
            "blob",
            "--mimetype=text/plain",
            "--",
            "out.pdf",
        ]
    );
}

#[test]
fn test_option_by_name() {
    let args = Job::new()
        .input_file("in.pdf")
        .option("--rotate", Some("+90:1"))
        .option("newline-before-endstream", None)
        .overlay(LayerSpec::new("watermark.pdf").repeat_pages("1"))
        .output_file("out.pdf")
        .arguments()
        .unwrap();

    assert_eq!(
        args,
        vec![
            "in.pdf",
            "--rotate=+90:1",
            "--overlay",
            "watermark.pdf",
            "--repeat=1",
            "--",
            "--newline-before-endstream",
            "out.pdf",
        ]
    );

    let err = Job::new().option("--bogus", None).arguments().unwrap_err();
    assert_eq!(err, ConfigError::UnknownOption("--bogus".to_string()));
}

fn qpdf_installed() -> bool {
    Command::new("qpdf").arg("--version").output().is_ok()
}

#[test]
fn test_round_trip_with_real_qpdf() {
    if !qpdf_installed() {
        eprintln!("qpdf not installed, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let blank = dir.path().join("blank.pdf");
    let out = dir.path().join("out.pdf");

    let created = Job::new()
        .empty()
        .output_file(path_str(&blank))
        .run()
        .unwrap();
    assert_eq!(created.exit_code, ExitCode::Success);

    let output = Job::new()
        .input_file(path_str(&blank))
        .object_streams("disable")
        .output_file(path_str(&out))
        .run()
        .unwrap();
    assert_eq!(output.exit_code, ExitCode::Success);
    assert!(out.metadata().unwrap().len() > 0);

    let status = Job::new()
        .input_file(path_str(&out))
        .run_is_encrypted()
        .unwrap();
    assert_eq!(status, EncryptionStatus::NotEncrypted);

    let pages = Job::new()
        .input_file(path_str(&out))
        .show_npages()
        .run()
        .unwrap();
    assert_eq!(pages.page_count(), Some(0));
}

#[test]
fn test_missing_binary_surfaces_as_execution_error() {
    let settings = qpdf_job::RunnerSettings {
        program: "qpdf-job-missing-binary".to_string(),
        ..Default::default()
    };
    let err = Job::new()
        .with_settings(settings)
        .input_file("in.pdf")
        .check()
        .run()
        .unwrap_err();
    assert!(matches!(
        err,
        JobError::Execution(ExecutionError::NotFound { .. })
    ));
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
