//! Exit-code classification.
//!
//! qpdf's exit code means different things depending on what the job
//! asked for. Normal jobs report success or warnings/errors;
//! `--is-encrypted` and `--requires-password` reuse the same small codes
//! to answer their question. Each mode has a fixed, total table and
//! unknown codes fall back to the mode's error variant.

use serde::{Deserialize, Serialize};

/// What a job asked qpdf to do, as far as exit codes are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobMode {
    Normal,
    /// `--is-encrypted`
    EncryptionCheck,
    /// `--requires-password`
    PasswordCheck,
}

/// Outcome of a normal job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitCode {
    Success,
    WarningsFileNotProcessed,
    ErrorsFileNotProcessed,
    /// qpdf wrote the output but reported warnings (exit 3).
    WarningsFileProcessed,
}

impl ExitCode {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Success,
            1 => Self::WarningsFileNotProcessed,
            3 => Self::WarningsFileProcessed,
            _ => Self::ErrorsFileNotProcessed,
        }
    }

    /// `true` when qpdf produced its output, with or without warnings.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::WarningsFileProcessed)
    }
}

/// Answer to `--is-encrypted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionStatus {
    Encrypted,
    NotEncrypted,
    ErrorOccurred,
}

impl EncryptionStatus {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Encrypted,
            2 => Self::NotEncrypted,
            _ => Self::ErrorOccurred,
        }
    }
}

/// Answer to `--requires-password`.
///
/// qpdf documents exits 0, 2 and 3 for this check; 1 is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStatus {
    /// Exit 0: a password other than the one supplied (if any) is needed
    /// to open the file.
    OtherPasswordRequired,
    /// Exit 1: reserved by qpdf and not emitted by current releases.
    UserPasswordRequired,
    /// Exit 2: the file is not encrypted.
    NoPasswordRequired,
    /// Exit 3: the file is encrypted and opens with the supplied password,
    /// or with none when no password was supplied.
    OwnerPasswordRequired,
    ErrorOccurred,
}

impl PasswordStatus {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::OtherPasswordRequired,
            1 => Self::UserPasswordRequired,
            2 => Self::NoPasswordRequired,
            3 => Self::OwnerPasswordRequired,
            _ => Self::ErrorOccurred,
        }
    }

    /// `true` when the file can be read with the password that was
    /// supplied, or without one.
    pub fn is_readable(self) -> bool {
        matches!(self, Self::NoPasswordRequired | Self::OwnerPasswordRequired)
    }
}

/// A raw exit code classified for its job mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "outcome", rename_all = "snake_case")]
pub enum ExitOutcome {
    Normal(ExitCode),
    EncryptionCheck(EncryptionStatus),
    PasswordCheck(PasswordStatus),
}

/// Classifies `raw` for `mode`.
///
/// Total: every `i32` maps to a variant.
///
/// # Examples
///
/// ```
/// use qpdf_job_core::{EncryptionStatus, ExitCode, ExitOutcome, JobMode, classify};
///
/// assert_eq!(classify(3, JobMode::Normal), ExitOutcome::Normal(ExitCode::WarningsFileProcessed));
/// assert_eq!(
///     classify(2, JobMode::EncryptionCheck),
///     ExitOutcome::EncryptionCheck(EncryptionStatus::NotEncrypted)
/// );
/// ```
pub fn classify(raw: i32, mode: JobMode) -> ExitOutcome {
    match mode {
        JobMode::Normal => ExitOutcome::Normal(ExitCode::from_raw(raw)),
        JobMode::EncryptionCheck => ExitOutcome::EncryptionCheck(EncryptionStatus::from_raw(raw)),
        JobMode::PasswordCheck => ExitOutcome::PasswordCheck(PasswordStatus::from_raw(raw)),
    }
}

macro_rules! display_snake_case {
    ($($ty:ty => { $($variant:ident => $text:literal),+ $(,)? }),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(match self {
                        $(Self::$variant => $text),+
                    })
                }
            }
        )+
    };
}

display_snake_case! {
    JobMode => {
        Normal => "normal",
        EncryptionCheck => "encryption_check",
        PasswordCheck => "password_check",
    },
    ExitCode => {
        Success => "success",
        WarningsFileNotProcessed => "warnings_file_not_processed",
        ErrorsFileNotProcessed => "errors_file_not_processed",
        WarningsFileProcessed => "warnings_file_processed",
    },
    EncryptionStatus => {
        Encrypted => "encrypted",
        NotEncrypted => "not_encrypted",
        ErrorOccurred => "error_occurred",
    },
    PasswordStatus => {
        OtherPasswordRequired => "other_password_required",
        UserPasswordRequired => "user_password_required",
        NoPasswordRequired => "no_password_required",
        OwnerPasswordRequired => "owner_password_required",
        ErrorOccurred => "error_occurred",
    },
}

impl std::fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal(code) => code.fmt(f),
            Self::EncryptionCheck(status) => status.fmt(f),
            Self::PasswordCheck(status) => status.fmt(f),
        }
    }
}
