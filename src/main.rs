//! lexlog - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lexlog::changelog::DEFAULT_OUTPUT_FILE;
use lexlog::config::load_config;
use lexlog::git::DEFAULT_COMMIT_LIMIT;
use lexlog::{ChangelogOptions, RunError, create_changelog, report_failure};

/// Generate a Markdown changelog from conventional commit bodies.
#[derive(Parser, Debug)]
#[command(name = "lexlog")]
#[command(about = "Generate a Markdown changelog from conventional commit bodies")]
#[command(version)]
struct Cli {
    /// Number of most recent commits to read
    #[arg(short = 'n', long, default_value_t = DEFAULT_COMMIT_LIMIT)]
    limit: usize,

    /// Output file, relative to the working directory
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE)]
    output: String,

    /// Base URL of the hosted repository, used for commit links
    #[arg(long, env = "LEXLOG_GIT_URL")]
    git_url: Option<String>,

    /// Path to the project config (defaults to lex.config.json if present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Working directory (defaults to the current directory)
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// Name shown in error messages
    #[arg(long, default_value = "lexlog")]
    cli_name: String,

    /// Suppress status output
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Print the changelog without writing it
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let cwd = match cli.cwd {
        Some(ref cwd) => cwd.clone(),
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    let config = match load_config(&cwd, cli.config.as_deref()) {
        Ok(config) => config.with_git_url(cli.git_url),
        Err(e) => {
            let status = report_failure(&cli.cli_name, &RunError::from(e));
            return Ok(exit_code(status));
        }
    };

    let options = ChangelogOptions {
        cli_name: cli.cli_name,
        config,
        output_file: cli.output,
        quiet: cli.quiet,
        limit: cli.limit,
        cwd,
        dry_run: cli.dry_run,
    };

    let status = create_changelog(&options).await;
    Ok(exit_code(status))
}

fn exit_code(status: i32) -> ExitCode {
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
