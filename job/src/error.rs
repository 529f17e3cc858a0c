//! Error types for running qpdf jobs.
//!
//! Configuration problems ([`ConfigError`]) are caught before any process
//! starts; [`ExecutionError`] covers everything that can go wrong while
//! starting, waiting on, or reading from the qpdf process. A non-zero exit
//! code is never an error here; it is classified into an
//! [`ExitOutcome`](qpdf_job_core::ExitOutcome) instead.

use std::time::Duration;

use qpdf_job_core::ConfigError;
use thiserror::Error;

/// Failures of the qpdf subprocess itself.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The qpdf binary could not be found.
    #[error("qpdf binary not found: {program}")]
    NotFound { program: String },

    /// The process could not be started for another reason.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the process or reading its output failed.
    #[error("I/O error while running qpdf: {0}")]
    Io(#[from] std::io::Error),

    /// The process ran longer than the configured timeout and was killed.
    #[error("qpdf did not finish within {timeout:?}")]
    Timeout { timeout: Duration },

    /// The process was terminated by a signal and has no exit code.
    #[error("qpdf was terminated by a signal")]
    Terminated,
}

/// Any failure of a job: bad configuration or a failed process.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("invalid job configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Failures loading or saving runner settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An environment override could not be parsed.
    #[error("invalid value for {variable}: {value}")]
    InvalidEnv { variable: String, value: String },
}

/// Convenience alias for results with [`JobError`].
pub type Result<T> = std::result::Result<T, JobError>;
