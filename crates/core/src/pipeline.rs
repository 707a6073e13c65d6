//! Pipeline orchestration.
//!
//! Strictly sequential stage machine:
//! `PREFLIGHT → PREPARE_OUTPUT → COMPILING(1..N) → {PROMOTING | FAILED} → CLEANUP`.
//! Cleanup runs on both verdicts; only the compile stage loops. On failure
//! the compiler log tail is captured before cleanup deletes it.

use tracing::info;

use crate::report::{Reporter, Severity};
use crate::types::{BuildRequest, BuildResult};
use crate::{Result, cleanup, compile, error::BuildError, outdir, preflight, promote};

/// Run one pipeline invocation to completion.
///
/// Returns the terminal `BuildResult` on success; every error variant is
/// fatal to the invocation and maps to a nonzero process exit at the CLI.
pub async fn run(request: &BuildRequest, reporter: &dyn Reporter) -> Result<BuildResult> {
  if !request.source.is_file() {
    return Err(BuildError::Io(std::io::Error::new(
      std::io::ErrorKind::NotFound,
      format!("source file not found: {}", request.source.display()),
    )));
  }

  let compiler = preflight::resolve_compiler(request.tool.as_deref())?;
  reporter.event(Severity::Info, &format!("compiler: {}", compiler.display()));

  outdir::prepare_output_dir(&request.output_dir)?;

  let logs = tempfile::Builder::new().prefix("texpress-logs-").tempdir()?;
  let outcome = compile::compile(request, &compiler, logs.path(), reporter).await?;

  match outcome.artifact {
    Some(artifact) => {
      reporter.event(Severity::Info, "promoting artifact");
      let promoted = promote::promote(&artifact, &request.output_dir, &request.label);
      cleanup::cleanup_workspace(request, logs);

      let promoted = promoted?;
      reporter.event(
        Severity::Success,
        &format!("built {} ({} bytes)", promoted.path.display(), promoted.size_bytes),
      );
      info!(attempts = outcome.attempts.len(), "pipeline done");

      Ok(BuildResult {
        success: true,
        artifact: Some(promoted.path),
        size_bytes: Some(promoted.size_bytes),
        attempts: outcome.attempts,
      })
    }
    None => {
      let log_tail = failure_tail(request, &outcome.attempts);
      reporter.event(Severity::Error, "compilation exhausted its attempts");
      cleanup::cleanup_workspace(request, logs);

      Err(BuildError::Compilation {
        attempts: outcome.attempts,
        log_tail,
      })
    }
  }
}

/// Diagnostic tail for a failed build: the compiler's own log if it wrote
/// one, otherwise the captured stderr/stdout of the final attempt.
fn failure_tail(request: &BuildRequest, attempts: &[crate::types::BuildAttempt]) -> Vec<String> {
  let tail = compile::read_log_tail(&compile::primary_log(request), compile::LOG_TAIL_LINES);
  if !tail.is_empty() {
    return tail;
  }

  let Some(last) = attempts.last() else {
    return Vec::new();
  };
  let tail = compile::read_log_tail(&last.stderr_log, compile::LOG_TAIL_LINES);
  if !tail.is_empty() {
    return tail;
  }
  compile::read_log_tail(&last.stdout_log, compile::LOG_TAIL_LINES)
}
