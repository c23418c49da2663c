use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use occasion_classifier::artifacts::MODEL_PATH_ENV;
use occasion_classifier::{predict, ArtifactPaths, Failure};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prints the occasion label predicted for a piece of text.
#[derive(Parser, Debug)]
#[command(name = "occasion-classifier", version)]
struct Cli {
    /// Text to classify
    #[arg(allow_hyphen_values = true)]
    text: Option<String>,

    /// Arguments after the text are ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    ignored: Vec<String>,

    /// Directory holding config.json, model.safetensors and vectorizer.json
    /// (defaults to the directory of this executable)
    #[arg(long, env = MODEL_PATH_ENV)]
    model_dir: Option<PathBuf>,

    /// Print the label and its score as JSON
    #[arg(long)]
    json: bool,
}

fn run(cli: Cli) -> Result<(), Failure> {
    if !cli.ignored.is_empty() {
        debug!(count = cli.ignored.len(), "ignoring arguments after the text");
    }
    let text = cli.text.ok_or(Failure::MissingText)?;
    let paths = ArtifactPaths::resolve(cli.model_dir)
        .context("locating the artifact directory")
        .map_err(Failure::Main)?;

    let response = predict(&paths, &text)?;

    let line = if cli.json {
        serde_json::to_string(&response)
            .context("encoding prediction")
            .map_err(Failure::Main)?
    } else {
        response.label
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")
        .and_then(|_| stdout.flush())
        .context("writing prediction")
        .map_err(Failure::Main)
}

fn main() -> ExitCode {
    // stdout carries only the label; diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let message = err.to_string();
            let first_line = message.lines().next().unwrap_or_default().to_string();
            let failure = Failure::Main(anyhow::anyhow!(first_line));
            eprintln!("{failure}");
            return ExitCode::from(failure.exit_code());
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("{failure}");
            ExitCode::from(failure.exit_code())
        }
    }
}
