//! Implementation of the `texpress build` command.
//!
//! Constructs an immutable build request from the flags, runs the pipeline
//! to completion on a fresh runtime, and renders the result. Any fatal
//! pipeline error prints its category, remediation hint, and (for
//! compilation failures) the compiler log tail, then exits nonzero.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use texpress_core::{BuildError, BuildRequest, LogReporter, pipeline};

use crate::output::{self, OutputFormat, TermReporter};

pub fn cmd_build(
  source: PathBuf,
  output_dir: PathBuf,
  tool: Option<PathBuf>,
  label: Option<String>,
  attempts: u32,
  format: OutputFormat,
) -> Result<()> {
  if !source.is_file() {
    output::print_error(&format!("source file not found: {}", source.display()));
    std::process::exit(1);
  }

  let mut request = BuildRequest::new(source, output_dir).with_max_attempts(attempts);
  request.tool = tool;
  if let Some(label) = label {
    request.label = label;
  }

  debug!(
    source = %request.source.display(),
    label = %request.label,
    max_attempts = request.max_attempts,
    "build request"
  );

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let started = Instant::now();

  // JSON mode keeps stdout clean for the result document
  let outcome = if format.is_json() {
    rt.block_on(pipeline::run(&request, &LogReporter))
  } else {
    rt.block_on(pipeline::run(&request, &TermReporter))
  };

  match outcome {
    Ok(result) => {
      if format.is_json() {
        output::print_json(&result)?;
      } else {
        if let Some(artifact) = &result.artifact {
          output::print_stat("artifact", &artifact.display().to_string());
        }
        if let Some(size) = result.size_bytes {
          output::print_stat("size", &output::format_bytes(size));
        }
        output::print_stat("attempts", &result.attempts.len().to_string());
        output::print_stat("took", &output::format_duration(started.elapsed()));
      }
      Ok(())
    }
    Err(err) => {
      output::print_error(&err.to_string());
      if let BuildError::Compilation { log_tail, .. } = &err {
        for line in log_tail {
          eprintln!("    {}", line);
        }
      }
      output::print_warning(err.remediation());
      std::process::exit(1);
    }
  }
}
