//! Compiler provisioning through the system package manager.
//!
//! One install strategy per detected package manager, selected from the
//! `PackageManager` tag rather than by OS conditionals at call sites. The
//! install command runs with inherited stdio so the operator sees the
//! manager's own progress output, retried once, then the tool is verified
//! to have become resolvable.

use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

use texpress_platform::{Os, PackageManager, find_in_path, is_elevated};

use crate::report::{Reporter, Severity};

/// Bounded install retry, mirroring the compile stage's two-try policy.
pub const INSTALL_MAX_ATTEMPTS: u32 = 2;

/// Errors from the provisioning path.
#[derive(Debug, Error)]
pub enum InstallError {
  #[error("no supported package manager found on this system")]
  NoPackageManager,

  #[error("{manager} install failed with exit code {code:?}")]
  CommandFailed {
    manager: PackageManager,
    code: Option<i32>,
  },

  #[error("'{tool}' is still unresolvable after install")]
  ToolStillMissing { tool: String },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl InstallError {
  /// Operator-facing hint shown next to the error message.
  pub fn remediation(&self) -> &'static str {
    match self {
      InstallError::NoPackageManager => {
        "install a TeX distribution manually from https://www.tug.org/texlive/"
      }
      InstallError::CommandFailed { .. } => {
        "rerun with --verbose, or run the printed command yourself to see the manager's output"
      }
      InstallError::ToolStillMissing { .. } => {
        "the distribution may install to a path not yet on PATH; open a fresh shell and retry"
      }
      InstallError::Io(_) => "unexpected I/O failure; rerun with --verbose for details",
    }
  }
}

/// The exact command line an installer strategy runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
  pub manager: PackageManager,
  pub program: String,
  pub args: Vec<String>,
}

impl InstallPlan {
  /// Non-interactive TeX distribution install for the given manager.
  pub fn for_manager(manager: PackageManager) -> Self {
    let mut argv: Vec<String> = match manager {
      PackageManager::Apt => vec!["apt-get", "install", "-y", "texlive"],
      PackageManager::Dnf => vec!["dnf", "install", "-y", "texlive-scheme-basic"],
      PackageManager::Pacman => vec!["pacman", "-S", "--noconfirm", "texlive-core"],
      PackageManager::Zypper => vec!["zypper", "--non-interactive", "install", "texlive"],
      PackageManager::Homebrew => vec!["brew", "install", "--cask", "basictex"],
      PackageManager::Winget => vec![
        "winget",
        "install",
        "--id",
        "MiKTeX.MiKTeX",
        "-e",
        "--accept-source-agreements",
        "--accept-package-agreements",
      ],
      PackageManager::Chocolatey => vec!["choco", "install", "miktex", "-y"],
    }
    .into_iter()
    .map(String::from)
    .collect();

    if needs_root(manager) && !is_elevated() {
      argv.insert(0, "sudo".to_string());
    }

    let program = argv.remove(0);
    Self {
      manager,
      program,
      args: argv,
    }
  }

  /// The command line as the operator would type it.
  pub fn render(&self) -> String {
    let mut parts = vec![self.program.clone()];
    parts.extend(self.args.iter().cloned());
    parts.join(" ")
  }
}

/// System package managers that require root on their platforms.
fn needs_root(manager: PackageManager) -> bool {
  matches!(
    manager,
    PackageManager::Apt | PackageManager::Dnf | PackageManager::Pacman | PackageManager::Zypper
  )
}

/// Provision a TeX distribution and verify `tool` becomes resolvable.
///
/// With `dry_run` the selected plan is returned without executing anything.
pub async fn install(
  tool: &str,
  dry_run: bool,
  reporter: &dyn Reporter,
) -> Result<InstallPlan, InstallError> {
  let manager = PackageManager::detect(Os::current()).ok_or(InstallError::NoPackageManager)?;
  let plan = InstallPlan::for_manager(manager);
  info!(manager = %manager, command = %plan.render(), "selected install strategy");

  if dry_run {
    return Ok(plan);
  }

  for attempt in 1..=INSTALL_MAX_ATTEMPTS {
    reporter.event(
      Severity::Info,
      &format!("installing via {} (attempt {}/{})", manager, attempt, INSTALL_MAX_ATTEMPTS),
    );

    let status = Command::new(&plan.program).args(&plan.args).status().await?;
    if status.success() {
      break;
    }

    warn!(attempt, code = ?status.code(), "install attempt failed");
    if attempt == INSTALL_MAX_ATTEMPTS {
      return Err(InstallError::CommandFailed {
        manager,
        code: status.code(),
      });
    }
  }

  if find_in_path(tool).is_none() {
    return Err(InstallError::ToolStillMissing {
      tool: tool.to_string(),
    });
  }

  reporter.event(Severity::Success, &format!("'{}' is now resolvable", tool));
  Ok(plan)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plans_are_non_interactive() {
    let apt = InstallPlan::for_manager(PackageManager::Apt);
    assert!(apt.args.contains(&"-y".to_string()));

    let pacman = InstallPlan::for_manager(PackageManager::Pacman);
    assert!(pacman.args.contains(&"--noconfirm".to_string()));

    let winget = InstallPlan::for_manager(PackageManager::Winget);
    assert!(winget.args.contains(&"--accept-package-agreements".to_string()));
    assert_eq!(winget.program, "winget");
  }

  #[test]
  fn render_joins_program_and_args() {
    let plan = InstallPlan {
      manager: PackageManager::Chocolatey,
      program: "choco".into(),
      args: vec!["install".into(), "miktex".into(), "-y".into()],
    };
    assert_eq!(plan.render(), "choco install miktex -y");
  }

  #[test]
  fn user_space_managers_never_use_sudo() {
    let brew = InstallPlan::for_manager(PackageManager::Homebrew);
    assert_eq!(brew.program, "brew");
  }
}
