//! Compilation stage with bounded retry.
//!
//! Each attempt runs the compiler synchronously in the source directory,
//! non-interactively, with stdout/stderr captured into fresh per-attempt
//! log files. Artifact presence on disk is the authoritative success
//! signal; LaTeX compilers routinely exit nonzero on recoverable warnings
//! while still emitting a usable document, so the exit code is recorded
//! but never trusted.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::Result;
use crate::report::{Reporter, Severity};
use crate::types::{BuildAttempt, BuildRequest};

/// Lines surfaced from the compiler log on failure.
pub const LOG_TAIL_LINES: usize = 20;

/// Outcome of the compile stage: every attempt made, plus the derived
/// artifact if any attempt produced one.
#[derive(Debug)]
pub struct CompileOutcome {
  pub attempts: Vec<BuildAttempt>,
  pub artifact: Option<PathBuf>,
}

/// Run the compiler up to `request.max_attempts` times, stopping as soon
/// as the derived artifact appears on disk.
pub async fn compile(
  request: &BuildRequest,
  compiler: &Path,
  log_dir: &Path,
  reporter: &dyn Reporter,
) -> Result<CompileOutcome> {
  let derived = request.derived_artifact();

  // A leftover artifact from an earlier run would make presence detection
  // meaningless; start from a clean slate.
  if derived.exists() {
    std::fs::remove_file(&derived)?;
    debug!(path = %derived.display(), "removed stale artifact");
  }

  let source_name = request
    .source
    .file_name()
    .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "source has no file name"))?;

  let mut attempts = Vec::new();

  for number in 1..=request.max_attempts {
    reporter.event(
      Severity::Info,
      &format!("compiling {} (attempt {}/{})", request.source.display(), number, request.max_attempts),
    );

    let output = Command::new(compiler)
      .arg("-interaction=nonstopmode")
      .arg(source_name)
      .current_dir(request.source_dir())
      .output()
      .await?;

    let stdout_log = log_dir.join(format!("attempt-{}.stdout.log", number));
    let stderr_log = log_dir.join(format!("attempt-{}.stderr.log", number));
    std::fs::write(&stdout_log, &output.stdout)?;
    std::fs::write(&stderr_log, &output.stderr)?;

    let exit_code = output.status.code();
    debug!(attempt = number, code = ?exit_code, "compiler exited");

    attempts.push(BuildAttempt {
      number,
      exit_code,
      stdout_log,
      stderr_log,
    });

    if derived.is_file() {
      info!(attempt = number, artifact = %derived.display(), "artifact produced");
      return Ok(CompileOutcome {
        attempts,
        artifact: Some(derived),
      });
    }

    warn!(attempt = number, code = ?exit_code, "attempt produced no artifact");
  }

  Ok(CompileOutcome {
    attempts,
    artifact: None,
  })
}

/// The compiler's own log file, written next to the source.
pub fn primary_log(request: &BuildRequest) -> PathBuf {
  request.source_dir().join(format!("{}.log", request.source_stem()))
}

/// Last `limit` lines of a log file; empty if the file is unreadable.
pub fn read_log_tail(path: &Path, limit: usize) -> Vec<String> {
  let Ok(file) = std::fs::File::open(path) else {
    return Vec::new();
  };

  let mut tail: Vec<String> = Vec::new();
  for line in BufReader::new(file).lines() {
    let Ok(line) = line else { break };
    tail.push(line);
    if tail.len() > limit {
      tail.remove(0);
    }
  }
  tail
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tail_of_missing_file_is_empty() {
    assert!(read_log_tail(Path::new("/no/such/file.log"), LOG_TAIL_LINES).is_empty());
  }

  #[test]
  fn tail_keeps_only_last_lines() {
    let temp = tempfile::TempDir::new().unwrap();
    let log = temp.path().join("build.log");
    let content: Vec<String> = (1..=30).map(|i| format!("line {}", i)).collect();
    std::fs::write(&log, content.join("\n")).unwrap();

    let tail = read_log_tail(&log, 20);
    assert_eq!(tail.len(), 20);
    assert_eq!(tail.first().unwrap(), "line 11");
    assert_eq!(tail.last().unwrap(), "line 30");
  }

  #[test]
  fn tail_of_short_file_is_whole_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let log = temp.path().join("build.log");
    std::fs::write(&log, "only line\n").unwrap();

    assert_eq!(read_log_tail(&log, 20), vec!["only line".to_string()]);
  }

  #[test]
  fn primary_log_sits_next_to_source() {
    let request = BuildRequest::new("docs/cv.tex", "out");
    assert_eq!(primary_log(&request), PathBuf::from("docs/cv.log"));
  }
}
