//! qpdf subprocess execution.
//!
//! One call to [`ProcessRunner::execute`] starts exactly one process with
//! stdin closed, drains stdout and stderr on helper threads so a chatty
//! child cannot block on a full pipe, and waits with a timeout. When binary
//! extraction is requested, stdout is returned as raw bytes instead of text.

use std::io::{ErrorKind, Read};
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::error::ExecutionError;
use crate::settings::RunnerSettings;

/// Everything captured from one qpdf run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// Arguments passed to qpdf, without the program name.
    pub args: Vec<String>,
    pub raw_exit_code: i32,
    /// Stdout as text with trailing whitespace removed; `None` when empty or
    /// when stdout was extracted as binary.
    pub stdout_text: Option<String>,
    /// Stderr as text with trailing whitespace removed; `None` when empty.
    pub stderr_text: Option<String>,
    /// Raw stdout when binary extraction was requested.
    pub extracted_binary: Option<Vec<u8>>,
    pub elapsed: Duration,
}

/// Something that can run a rendered qpdf argument vector.
///
/// [`ProcessRunner`] is the real implementation; tests substitute canned
/// results.
pub trait Runner {
    fn execute(&self, args: &[String], extract_binary: bool)
    -> Result<ProcessResult, ExecutionError>;
}

/// Runs qpdf as a child process according to [`RunnerSettings`].
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    settings: RunnerSettings,
}

impl ProcessRunner {
    pub fn new(settings: RunnerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new(&self.settings.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.settings.working_dir {
            command.current_dir(dir);
        }
        for (key, value) in &self.settings.env {
            command.env(key, value);
        }
        command
    }
}

impl Runner for ProcessRunner {
    fn execute(
        &self,
        args: &[String],
        extract_binary: bool,
    ) -> Result<ProcessResult, ExecutionError> {
        let program = &self.settings.program;
        debug!(program = %program, args = ?args, extract_binary, "starting qpdf");

        let started = Instant::now();
        let mut child = self.command(args).spawn().map_err(|e| {
            debug!(program = %program, error = %e, "failed to spawn qpdf");
            if e.kind() == ErrorKind::NotFound {
                ExecutionError::NotFound {
                    program: program.clone(),
                }
            } else {
                ExecutionError::Spawn {
                    program: program.clone(),
                    source: e,
                }
            }
        })?;

        let stdout_thread = drain(child.stdout.take());
        let stderr_thread = drain(child.stderr.take());

        let timeout = self.settings.timeout();
        let status = match child.wait_timeout(timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(
                    program = %program,
                    timeout_ms = self.settings.timeout_ms,
                    "qpdf timed out, killing process"
                );
                kill(&mut child);
                // Detached, not joined: a grandchild may still hold the pipes.
                drop(stdout_thread);
                drop(stderr_thread);
                return Err(ExecutionError::Timeout { timeout });
            }
            Err(e) => {
                debug!(program = %program, error = %e, "failed to wait on qpdf");
                kill(&mut child);
                return Err(ExecutionError::Io(e));
            }
        };

        let stdout = join(stdout_thread, "stdout")?;
        let stderr = join(stderr_thread, "stderr")?;
        let raw_exit_code = status.code().ok_or(ExecutionError::Terminated)?;
        let elapsed = started.elapsed();
        debug!(
            program = %program,
            exit_code = raw_exit_code,
            stdout_len = stdout.len(),
            stderr_len = stderr.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "qpdf exited"
        );

        let (stdout_text, extracted_binary) = if extract_binary {
            (None, Some(stdout))
        } else {
            (into_text(&stdout), None)
        };

        Ok(ProcessResult {
            args: args.to_vec(),
            raw_exit_code,
            stdout_text,
            stderr_text: into_text(&stderr),
            extracted_binary,
            elapsed,
        })
    }
}

type PipeReader = JoinHandle<(Vec<u8>, std::io::Result<usize>)>;

fn drain(pipe: Option<impl Read + Send + 'static>) -> Option<PipeReader> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let result = pipe.read_to_end(&mut buf);
            (buf, result)
        })
    })
}

fn join(reader: Option<PipeReader>, stream: &'static str) -> Result<Vec<u8>, ExecutionError> {
    let Some(reader) = reader else {
        return Ok(Vec::new());
    };
    match reader.join() {
        Ok((buf, Ok(_))) => Ok(buf),
        Ok((_, Err(e))) => {
            debug!(stream, error = %e, "failed to read qpdf output");
            Err(ExecutionError::Io(e))
        }
        Err(_) => Err(ExecutionError::Io(std::io::Error::other(format!(
            "{stream} reader thread panicked"
        )))),
    }
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn into_text(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_end();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_text_trims_trailing_whitespace() {
        assert_eq!(into_text(b"checking in.pdf\n\n"), Some("checking in.pdf".to_string()));
        assert_eq!(into_text(b"  indented\r\n"), Some("  indented".to_string()));
        assert_eq!(into_text(b"\n \t"), None);
    }

    #[test]
    fn test_missing_binary_is_not_found() {
        let runner = ProcessRunner::new(RunnerSettings {
            program: "qpdf-job-definitely-not-installed".to_string(),
            ..RunnerSettings::default()
        });
        let err = runner.execute(&["--version".to_string()], false).unwrap_err();
        assert!(matches!(err, ExecutionError::NotFound { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_output_and_exit_code() {
        let runner = ProcessRunner::new(RunnerSettings {
            program: "sh".to_string(),
            ..RunnerSettings::default()
        });
        let args = vec![
            "-c".to_string(),
            "printf 'out\\n'; printf 'err\\n' >&2; exit 3".to_string(),
        ];
        let result = runner.execute(&args, false).unwrap();
        assert_eq!(result.raw_exit_code, 3);
        assert_eq!(result.stdout_text.as_deref(), Some("out"));
        assert_eq!(result.stderr_text.as_deref(), Some("err"));
        assert!(result.extracted_binary.is_none());
        assert_eq!(result.args, args);
    }

    #[cfg(unix)]
    #[test]
    fn test_binary_extraction_keeps_raw_bytes() {
        let runner = ProcessRunner::new(RunnerSettings {
            program: "sh".to_string(),
            ..RunnerSettings::default()
        });
        let args = vec!["-c".to_string(), "printf 'a\\000b\\n'".to_string()];
        let result = runner.execute(&args, true).unwrap();
        assert_eq!(result.extracted_binary.as_deref(), Some(&b"a\0b\n"[..]));
        assert!(result.stdout_text.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_process() {
        let runner = ProcessRunner::new(RunnerSettings {
            program: "sleep".to_string(),
            timeout_ms: 100,
            ..RunnerSettings::default()
        });
        let started = Instant::now();
        let err = runner.execute(&["5".to_string()], false).unwrap_err();
        assert!(matches!(err, ExecutionError::Timeout { .. }), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_does_not_wait_for_inherited_pipes() {
        let runner = ProcessRunner::new(RunnerSettings {
            program: "sh".to_string(),
            timeout_ms: 200,
            ..RunnerSettings::default()
        });
        // The background sleep keeps stdout and stderr open after sh is killed.
        let args = vec!["-c".to_string(), "sleep 5 & sleep 5".to_string()];
        let started = Instant::now();
        let err = runner.execute(&args, false).unwrap_err();
        assert!(matches!(err, ExecutionError::Timeout { .. }), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_working_dir_and_env_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = RunnerSettings {
            program: "sh".to_string(),
            working_dir: Some(dir.path().to_path_buf()),
            ..RunnerSettings::default()
        };
        settings.env.insert("QPDF_JOB_TEST_VALUE".to_string(), "42".to_string());
        let runner = ProcessRunner::new(settings);
        let args = vec!["-c".to_string(), "echo $QPDF_JOB_TEST_VALUE; pwd".to_string()];
        let result = runner.execute(&args, false).unwrap();
        let text = result.stdout_text.unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("42"));
        let pwd = std::path::PathBuf::from(lines.next().unwrap());
        assert_eq!(
            pwd.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
