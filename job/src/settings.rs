//! Runner settings.
//!
//! Controls which qpdf binary is started and how. Settings can be built in
//! code, loaded from YAML, and overridden from the environment.
//!
//! # Example YAML
//!
//! ```yaml
//! program: /usr/local/bin/qpdf
//! timeout_ms: 30000
//! working_dir: /tmp/pdf-work
//! env:
//!   TMPDIR: /tmp/pdf-work
//! ```

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Default program name, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "qpdf";

/// Default wall-clock limit for one qpdf run.
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Overrides [`RunnerSettings::program`].
pub const ENV_BINARY: &str = "QPDF_JOB_BINARY";

/// Overrides [`RunnerSettings::timeout_ms`].
pub const ENV_TIMEOUT_MS: &str = "QPDF_JOB_TIMEOUT_MS";

/// How the qpdf process is started.
///
/// # Examples
///
/// ```
/// use qpdf_job::RunnerSettings;
///
/// let settings: RunnerSettings = serde_yaml::from_str("timeout_ms: 5000").unwrap();
/// assert_eq!(settings.program, "qpdf");
/// assert_eq!(settings.timeout().as_secs(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    /// Binary name or path.
    pub program: String,
    /// Kill the process after this many milliseconds.
    pub timeout_ms: u64,
    /// Working directory for the process; inherited when unset.
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables for the process.
    pub env: BTreeMap<String, String>,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            working_dir: None,
            env: BTreeMap::new(),
        }
    }
}

impl RunnerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Loads settings from a YAML file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be read, or
    /// [`SettingsError::Yaml`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let settings = serde_yaml::from_reader(reader)?;
        Ok(settings)
    }

    /// Saves the settings as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Default settings with environment overrides applied.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Applies [`ENV_BINARY`] and [`ENV_TIMEOUT_MS`] as returned by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        if let Some(program) = lookup(ENV_BINARY).filter(|value| !value.trim().is_empty()) {
            self.program = program;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS).filter(|value| !value.trim().is_empty()) {
            self.timeout_ms = raw
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidEnv {
                    variable: ENV_TIMEOUT_MS.to_string(),
                    value: raw.clone(),
                })?;
        }
        Ok(self)
    }
}
