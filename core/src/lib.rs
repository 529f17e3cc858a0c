//! Typed option model for the `qpdf` command-line tool.
//!
//! This crate holds everything that can be decided without running qpdf:
//!
//! - [`OptionSet`]: typed option state keyed by [`OptionKey`], with
//!   per-value checks on every setter.
//! - [`OPTION_TABLE`]: one [`OptionSpec`] row per supported option (flag
//!   spelling, value kind, rendering [`Category`], conflicts and companions).
//! - [`validate_options`]: cross-option rules, reported as [`ConfigError`].
//! - [`render`] / [`build_arguments`]: option set to argument vector in a
//!   fixed canonical order.
//! - [`classify`]: raw exit code plus [`JobMode`] to an [`ExitOutcome`].
//! - [`JsonDocument`] / [`PdfOutline`]: the `--json` envelope and outline tree.
//! - [`mime_type`]: media type lookup for attachment file names.
//!
//! # Example
//!
//! ```
//! use qpdf_job_core::*;
//!
//! let mut options = OptionSet::new();
//! options.set(OptionKey::InputFile, "in.pdf".into()).unwrap();
//! options.set(OptionKey::OutputFile, "out.pdf".into()).unwrap();
//! options
//!     .set(OptionKey::Pages, OptionValue::Pages(PageSelection::primary("1-3")))
//!     .unwrap();
//! options.set(OptionKey::Linearize, OptionValue::Flag).unwrap();
//!
//! let args = build_arguments(&options).unwrap();
//! assert_eq!(
//!     args,
//!     vec!["in.pdf", "--pages", ".", "1-3", "--", "--linearize", "out.pdf"]
//! );
//! assert_eq!(classify(0, options.mode()), ExitOutcome::Normal(ExitCode::Success));
//! ```

mod exit;
mod mime;
mod options;
mod outline;
mod render;
mod table;
mod types;
mod validate;

pub use exit::{EncryptionStatus, ExitCode, ExitOutcome, JobMode, PasswordStatus, classify};
pub use mime::{DEFAULT_MIME_TYPE, mime_type};
pub use options::OptionSet;
pub use outline::{JsonDocument, PdfOutline};
pub use render::{GROUP_END, REPLACE_INPUT, build_arguments, render};
pub use table::{Category, OPTION_TABLE, OptionKey, OptionSpec, ValueKind};
pub use types::*;
pub use validate::{ConfigError, validate_options};
