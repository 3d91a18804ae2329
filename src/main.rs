//! licaudit command-line entry point

use anyhow::Context;
use clap::{Parser, ValueEnum};
use licaudit::engine::repo_root::find_repo_root;
use licaudit::report::{self, RenderOptions, ReportFormat};
use licaudit::{AuditConfig, AuditEngine, Policy};
use std::path::PathBuf;
use std::process::ExitCode;

/// Audit every file in a repository for license headers and check them
/// against the project's license manifest.
#[derive(Debug, Parser)]
#[command(name = "licaudit")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory to audit (default: enclosing git repository)
    dir: Option<PathBuf>,

    /// Only print failing files
    #[arg(short, long)]
    quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = CliFormat::Text)]
    format: CliFormat,

    /// Worker threads (default: available parallelism)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Policy file (default: .licaudit.toml in the audited directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Text,
    Json,
}

impl From<CliFormat> for ReportFormat {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Text => ReportFormat::Text,
            CliFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(2);
    }

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let root = match cli.dir {
        Some(dir) => dir,
        None => {
            let cwd = std::env::current_dir().context("unable to get working directory")?;
            find_repo_root(&cwd)?
        }
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to enter target directory {}", root.display()))?;
    tracing::info!("Using directory: {}", root.display());

    let policy = match &cli.config {
        Some(path) => Policy::from_file(path)?,
        None => Policy::from_project_root(&root)?,
    };
    let config = AuditConfig { workers: cli.jobs };
    let engine = AuditEngine::new(config, policy)?;
    let audit = engine.audit(&root)?;

    let options = RenderOptions { quiet: cli.quiet };
    match &cli.output {
        Some(path) => {
            report::write_report(&audit, cli.format.into(), options, path)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => print!("{}", report::render_report(&audit, cli.format.into(), options)?),
    }

    Ok(report::exit_code(&audit))
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "info" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LICAUDIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
