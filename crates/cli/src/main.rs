//! texpress - build LaTeX documents into timestamped PDF artifacts

mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use output::OutputFormat;

/// texpress - deterministic LaTeX build pipeline
#[derive(Parser)]
#[command(name = "texpress")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile a source document and promote the timestamped artifact
  Build {
    /// Path to the document root source file
    #[arg(default_value = "main.tex")]
    source: PathBuf,

    /// Directory promoted artifacts land in
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Compiler path or bare tool name (default: pdflatex)
    #[arg(long)]
    tool: Option<PathBuf>,

    /// Identity label embedded in the artifact name (default: source stem)
    #[arg(short, long)]
    label: Option<String>,

    /// Upper bound on compiler invocations
    #[arg(long, default_value_t = texpress_core::DEFAULT_MAX_ATTEMPTS)]
    attempts: u32,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
  },

  /// Install a TeX distribution via the system package manager
  Install {
    /// Tool that must become resolvable after the install
    #[arg(long, default_value = "pdflatex")]
    tool: String,

    /// Print the install command without running it
    #[arg(long)]
    dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },

  /// Show platform, package manager, and compiler resolution state
  Status {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // RUST_LOG wins; --verbose only raises the default
  let default_filter = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
    )
    .without_time()
    .init();

  match cli.command {
    Commands::Build {
      source,
      output_dir,
      tool,
      label,
      attempts,
      format,
    } => cmd::cmd_build(source, output_dir, tool, label, attempts, format),
    Commands::Install { tool, dry_run, yes } => cmd::cmd_install(&tool, dry_run, yes),
    Commands::Status { format } => cmd::cmd_status(format),
  }
}
