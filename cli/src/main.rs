use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use qpdf_job::reports::{
    AttachmentsParser, CheckParser, EncryptionParser, LinearizationParser, PagesParser,
    ReportParser, XrefParser,
};
use qpdf_job::{Job, PageSelection, RunnerSettings, mime_type};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Report grammar selected by `parse --kind`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ReportKind {
    Check,
    Xref,
    Linearization,
    Attachments,
    Encryption,
    Pages,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

/// Which question the job asks qpdf.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RunMode {
    Normal,
    IsEncrypted,
    RequiresPassword,
}

#[derive(Debug, Parser)]
#[command(name = "qpdf-job")]
#[command(about = "Build, run and interpret qpdf jobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a qpdf job and exit with qpdf's exit code.
    Run(RunArgs),
    /// Print the argument vector a job would run, as JSON.
    Args(JobArgs),
    /// Parse a captured qpdf report from a file or stdin.
    Parse(ParseArgs),
    /// Print the media type for each file name.
    Mime(MimeArgs),
}

#[derive(Debug, Args)]
struct JobArgs {
    /// Input PDF.
    #[arg(long)]
    input: Option<String>,
    /// Start from an empty PDF instead of an input file.
    #[arg(long)]
    empty: bool,
    /// Output PDF. Without it, non-inspection jobs rewrite the input in place.
    #[arg(long)]
    output: Option<String>,
    /// Password for the input file.
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    linearize: bool,
    #[arg(long)]
    qdf: bool,
    #[arg(long)]
    decrypt: bool,
    #[arg(long)]
    check: bool,
    #[arg(long)]
    show_encryption: bool,
    #[arg(long)]
    show_xref: bool,
    #[arg(long)]
    show_pages: bool,
    #[arg(long)]
    show_npages: bool,
    #[arg(long)]
    list_attachments: bool,
    /// Page source as FILE[:RANGE]; use "." for the input file. Repeatable.
    #[arg(long = "pages", value_name = "FILE[:RANGE]")]
    pages: Vec<String>,
    /// Any other qpdf option as KEY[=VALUE] (e.g. compression-level=9). Repeatable.
    #[arg(long = "option", value_name = "KEY[=VALUE]")]
    options: Vec<String>,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    job: JobArgs,
    /// YAML runner settings (program, timeout_ms, working_dir, env).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Write extracted binary output here instead of stdout.
    #[arg(long)]
    data_out: Option<PathBuf>,
    #[arg(long, default_value = "normal")]
    mode: RunMode,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Report grammar to apply.
    #[arg(long)]
    kind: ReportKind,
    /// Report file; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct MimeArgs {
    /// File names to look up.
    #[arg(required = true)]
    names: Vec<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qpdf_job=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run(args) => run_job(args),
        Command::Args(args) => run_args(args).map(|()| 0),
        Command::Parse(args) => run_parse(args).map(|()| 0),
        Command::Mime(args) => run_mime(args).map(|()| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn build_job(args: &JobArgs) -> Job {
    let mut job = Job::new();
    if let Some(input) = &args.input {
        job = job.input_file(input.as_str());
    }
    if let Some(password) = &args.password {
        job = job.password(password.as_str());
    }

    let flags = [
        (args.empty, "empty"),
        (args.linearize, "linearize"),
        (args.qdf, "qdf"),
        (args.decrypt, "decrypt"),
        (args.check, "check"),
        (args.show_encryption, "show-encryption"),
        (args.show_xref, "show-xref"),
        (args.show_pages, "show-pages"),
        (args.show_npages, "show-npages"),
        (args.list_attachments, "list-attachments"),
    ];
    for (_, name) in flags.iter().filter(|(set, _)| *set) {
        job = job.option(name, None);
    }

    for source in &args.pages {
        job = job.pages(parse_page_source(source));
    }
    for option in &args.options {
        let (key, value) = match option.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (option.as_str(), None),
        };
        job = job.option(key, value);
    }

    if let Some(output) = &args.output {
        job = job.output_file(output.as_str());
    }
    job
}

/// `FILE[:RANGE]`; a trailing segment containing a path separator is part
/// of the file name.
fn parse_page_source(source: &str) -> PageSelection {
    match source.rsplit_once(':') {
        Some((file, range)) if !range.contains(['/', '\\']) && !file.is_empty() => {
            PageSelection::new(file, (!range.is_empty()).then_some(range))
        }
        _ => PageSelection::new(source, None),
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<RunnerSettings, String> {
    let settings = match path {
        Some(path) => RunnerSettings::load(path)
            .map_err(|err| format!("Failed to load settings '{}': {err}", path.display()))?,
        None => RunnerSettings::default(),
    };
    settings
        .with_env_overrides(|name| std::env::var(name).ok())
        .map_err(|err| err.to_string())
}

fn run_job(args: RunArgs) -> Result<i32, String> {
    let settings = load_settings(args.settings.as_ref())?;
    let job = build_job(&args.job).with_settings(settings);

    match args.mode {
        RunMode::IsEncrypted => {
            let status = job.run_is_encrypted().map_err(|err| err.to_string())?;
            println!("{status}");
            return Ok(0);
        }
        RunMode::RequiresPassword => {
            let status = job.run_requires_password().map_err(|err| err.to_string())?;
            println!("{status}");
            return Ok(0);
        }
        RunMode::Normal => {}
    }

    let output = job.run().map_err(|err| err.to_string())?;
    if let Some(text) = &output.text {
        println!("{text}");
    }
    if let Some(text) = &output.stderr {
        eprintln!("{text}");
    }
    if let Some(data) = &output.data {
        match &args.data_out {
            Some(path) => fs::write(path, data)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?,
            None => std::io::stdout()
                .write_all(data)
                .map_err(|err| format!("Failed to write stdout: {err}"))?,
        }
    }
    Ok(output.raw_exit_code)
}

fn run_args(args: JobArgs) -> Result<(), String> {
    let argv = build_job(&args).arguments().map_err(|err| err.to_string())?;
    emit(&argv, CliOutputFormat::Json)
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            text
        }
    };

    match args.kind {
        ReportKind::Check => emit(&CheckParser.parse(&text), args.format),
        ReportKind::Xref => emit(&XrefParser.parse(&text), args.format),
        ReportKind::Linearization => emit(&LinearizationParser.parse(&text), args.format),
        ReportKind::Attachments => emit(&AttachmentsParser.parse(&text), args.format),
        ReportKind::Encryption => emit(&EncryptionParser.parse(&text), args.format),
        ReportKind::Pages => emit(&PagesParser.parse(&text), args.format),
    }
}

fn run_mime(args: MimeArgs) -> Result<(), String> {
    for name in &args.names {
        println!("{name}\t{}", mime_type(name));
    }
    Ok(())
}

fn emit<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<(), String> {
    let rendered = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("Failed to serialize output: {e}"))?
        }
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_source() {
        assert_eq!(parse_page_source(".:1-3"), PageSelection::primary("1-3"));
        assert_eq!(parse_page_source("b.pdf"), PageSelection::new("b.pdf", None));
        assert_eq!(parse_page_source("b.pdf:"), PageSelection::new("b.pdf", None));
        assert_eq!(
            parse_page_source("C:\\docs\\a.pdf"),
            PageSelection::new("C:\\docs\\a.pdf", None)
        );
        assert_eq!(
            parse_page_source("dir/a.pdf:z-1"),
            PageSelection::new("dir/a.pdf", Some("z-1"))
        );
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
