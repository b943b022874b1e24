mod markdown;
mod payload;
mod sanitize;
mod source;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use tracing::{debug, info};

use payload::{DEFAULT_BASE_REF, Format, PullRequestOptions};
use sanitize::{Preset, SanitizeOptions, Step};
use source::Source;

#[derive(Parser, Debug)]
#[command(name = "prbody")]
#[command(version, about = "Escape pull-request markdown for JSON payloads and shell strings", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "text"])))]
#[command(after_help = "EXAMPLES:
    prbody .github/PULL_REQUEST_TEMPLATE.md -f json     {\"content\": ...} envelope
    prbody --text \"$BODY\" --preset markup             escape for a shell literal
    prbody body.md -f pull-request --base main          branch-delete event payload")]
struct Cli {
    /// Markdown file to read
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Markdown passed directly instead of a file (may start with `-`)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    text: Option<String>,

    /// Starting set of transformation steps
    #[arg(long, value_enum, default_value_t = Preset::Full)]
    preset: Preset,

    /// Steps to turn off on top of the preset (comma-separated)
    #[arg(long, value_enum, value_delimiter = ',', value_name = "STEP")]
    skip: Vec<Step>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Raw)]
    format: Format,

    /// Base branch written into the pull-request payload
    #[arg(long, value_name = "REF", default_value = DEFAULT_BASE_REF)]
    base: String,

    /// Mark the pull request in the payload as not merged
    #[arg(long)]
    unmerged: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Log each step to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn source(&self) -> Source {
        match (&self.file, &self.text) {
            (Some(path), _) => Source::File(path.clone()),
            (None, text) => Source::Text(text.clone().unwrap_or_default()),
        }
    }

    fn sanitize_options(&self) -> SanitizeOptions {
        self.skip
            .iter()
            .fold(SanitizeOptions::from_preset(self.preset), |opts, step| {
                opts.skip(*step)
            })
    }

    fn pull_request_options(&self) -> PullRequestOptions {
        PullRequestOptions {
            base: self.base.clone(),
            merged: !self.unmerged,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("prbody={level}").parse()?),
        )
        .init();
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = cli.source();
    info!(%source, format = ?cli.format, "sanitizing");

    let raw = source.read()?;
    let sanitized = sanitize::sanitize(&raw, &cli.sanitize_options());
    let output = payload::render(
        &sanitized,
        cli.format,
        &cli.pull_request_options(),
        cli.pretty,
    )?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    stdout.flush()?;
    Ok(())
}
