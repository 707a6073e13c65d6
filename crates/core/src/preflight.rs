//! Compiler preflight.
//!
//! Resolves the compiler before any mutating stage runs, so a missing
//! toolchain fails fast with a remediation hint instead of half-way through
//! a build. Read-only: only filesystem and environment queries.

use std::path::{Path, PathBuf};

use tracing::info;

use texpress_platform::{find_in_path, is_executable};

use crate::Result;
use crate::error::BuildError;

/// Tool resolved when the request does not name one.
pub const DEFAULT_TOOL: &str = "pdflatex";

/// Resolve a compiler from an explicit path or a bare tool name.
///
/// An explicit path (anything with more than one component) must point at
/// an executable file; a bare name is searched across the process `PATH`.
/// The resolved path is canonicalized when possible.
pub fn resolve_compiler(tool: Option<&Path>) -> Result<PathBuf> {
  let tool = tool.unwrap_or(Path::new(DEFAULT_TOOL));

  let resolved = if tool.components().count() > 1 {
    is_executable(tool).then(|| tool.to_path_buf())
  } else {
    tool.to_str().and_then(find_in_path)
  };

  let resolved = resolved.ok_or_else(|| BuildError::ToolNotFound {
    tool: tool.display().to_string(),
  })?;

  // Canonicalization is best-effort; the resolved path already works
  let resolved = dunce::canonicalize(&resolved).unwrap_or(resolved);
  info!(compiler = %resolved.display(), "preflight passed");
  Ok(resolved)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn missing_explicit_path_fails() {
    let err = resolve_compiler(Some(Path::new("/no/such/dir/pdflatex"))).unwrap_err();
    assert!(matches!(err, BuildError::ToolNotFound { .. }));
    assert!(err.to_string().contains("/no/such/dir/pdflatex"));
  }

  #[test]
  fn unresolvable_bare_name_fails() {
    let err = resolve_compiler(Some(Path::new("texpress-no-such-tool"))).unwrap_err();
    assert!(matches!(err, BuildError::ToolNotFound { .. }));
  }

  #[test]
  #[cfg(unix)]
  fn explicit_executable_path_resolves() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let tool = temp.path().join("fakelatex");
    std::fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    let resolved = resolve_compiler(Some(&tool)).unwrap();
    assert!(resolved.is_absolute() || resolved == tool);
    assert!(is_executable(&resolved));
  }

  #[test]
  #[cfg(unix)]
  fn explicit_non_executable_path_fails() {
    let temp = TempDir::new().unwrap();
    let tool = temp.path().join("fakelatex");
    std::fs::write(&tool, "not a program").unwrap();

    let err = resolve_compiler(Some(&tool)).unwrap_err();
    assert!(matches!(err, BuildError::ToolNotFound { .. }));
  }
}
